// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::latent::Latent;
use crate::logging::log_learn_step;
use crate::numeric::{mean, sigmoid, variance, EPS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

pub const SHAPE_MIN: f64 = 0.01;
pub const SHAPE_MAX: f64 = 50.0;

/// Draws `ln X` for `X ~ Gamma(shape, 1)` together with `∂ln X/∂shape`,
/// holding the accepted Marsaglia–Tsang normal variate fixed.
pub fn gamma_log_sample<R: Rng + ?Sized>(rng: &mut R, shape: f64) -> (f64, f64) {
    if shape < 1.0 {
        // boost: X = X' · U^(1/shape), X' ~ Gamma(shape + 1)
        let (log_x, dlog_x) = gamma_log_sample(rng, shape + 1.0);
        let log_u = (1.0 - rng.gen::<f64>()).ln();
        return (
            log_x + log_u / shape,
            dlog_x - log_u / (shape * shape),
        );
    }
    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let z: f64 = rng.sample(StandardNormal);
        let t = 1.0 + c * z;
        if t <= 0.0 {
            continue;
        }
        let v = t * t * t;
        let u: f64 = rng.gen();
        let z2 = z * z;
        if u < 1.0 - 0.0331 * z2 * z2 || u.ln() < 0.5 * z2 + d * (1.0 - v + v.ln()) {
            return ((d * v).ln(), (1.0 - 0.5 * c * z) / (d * t));
        }
    }
}

fn ln_beta(a: f64, b: f64) -> f64 {
    libm::lgamma(a) + libm::lgamma(b) - libm::lgamma(a + b)
}

pub fn beta_log_pdf(theta: f64, a: f64, b: f64) -> f64 {
    (a - 1.0) * theta.ln() + (b - 1.0) * (1.0 - theta).ln() - ln_beta(a, b)
}

#[derive(Debug, Clone)]
struct Draw {
    a: f64,
    b: f64,
    theta: Vec<f64>,
    dtheta_da: Vec<f64>,
    dtheta_db: Vec<f64>,
}

/// Beta(a, b) belief over the reward probability with `a = clamp(exp(log_a))`,
/// `b = clamp(exp(log_b))`, trained by one pathwise gradient step per trial.
#[derive(Debug, Clone)]
pub struct BetaBelief {
    log_shape: Latent<2>,
    n_samples: usize,
    rng: StdRng,
    draw: Option<Draw>,
    fresh: bool,
}

impl BetaBelief {
    pub fn new(log_shape: f64, n_samples: usize, seed: u64) -> Self {
        Self::with_shapes(log_shape, log_shape, n_samples, seed)
    }

    pub fn with_shapes(log_a: f64, log_b: f64, n_samples: usize, seed: u64) -> Self {
        Self {
            log_shape: Latent::new([log_a, log_b]),
            n_samples: n_samples.max(1),
            rng: StdRng::seed_from_u64(seed),
            draw: None,
            fresh: false,
        }
    }

    pub fn shapes(&self) -> (f64, f64) {
        let [log_a, log_b] = *self.log_shape.value();
        (
            log_a.exp().clamp(SHAPE_MIN, SHAPE_MAX),
            log_b.exp().clamp(SHAPE_MIN, SHAPE_MAX),
        )
    }

    pub fn latent(&self) -> &Latent<2> {
        &self.log_shape
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Draws a fresh set of `θ_i ~ Beta(a, b)` and caches it for `learn`.
    pub fn sample(&mut self) -> &[f64] {
        let (a, b) = self.shapes();
        let mut theta = Vec::with_capacity(self.n_samples);
        let mut dtheta_da = Vec::with_capacity(self.n_samples);
        let mut dtheta_db = Vec::with_capacity(self.n_samples);
        for _ in 0..self.n_samples {
            let (log_x, dlog_x) = gamma_log_sample(&mut self.rng, a);
            let (log_y, dlog_y) = gamma_log_sample(&mut self.rng, b);
            // θ = X / (X + Y), evaluated in log space
            let th = sigmoid(log_x - log_y).clamp(EPS, 1.0 - EPS);
            let spread = th * (1.0 - th);
            theta.push(th);
            dtheta_da.push(spread * dlog_x);
            dtheta_db.push(-spread * dlog_y);
        }
        self.fresh = true;
        let draw = self.draw.insert(Draw {
            a,
            b,
            theta,
            dtheta_da,
            dtheta_db,
        });
        &draw.theta
    }

    pub fn samples(&self) -> Option<&[f64]> {
        self.draw.as_ref().map(|d| d.theta.as_slice())
    }

    pub fn ready(&self) -> bool {
        self.fresh
    }

    /// Posterior mean estimate from the cached draw, or the analytic mean
    /// before anything was sampled.
    pub fn point(&self) -> f64 {
        match &self.draw {
            Some(draw) => mean(&draw.theta),
            None => {
                let (a, b) = self.shapes();
                a / (a + b)
            }
        }
    }

    pub fn sample_variance(&self) -> f64 {
        match &self.draw {
            Some(draw) => variance(&draw.theta),
            None => {
                let (a, b) = self.shapes();
                a * b / ((a + b) * (a + b) * (a + b + 1.0))
            }
        }
    }

    /// Minimises `mean(log Beta(θ_i; a, b)) − mean(log p(o | θ_i))` with the
    /// density shapes detached, so gradient reaches `log_a`, `log_b` only
    /// through the reparameterised samples. Returns the loss.
    pub fn learn(&mut self, outcome: u8, rates: [f64; 2]) -> f64 {
        if !self.fresh {
            return 0.0;
        }
        self.fresh = false;
        let Some(draw) = &self.draw else {
            return 0.0;
        };
        let o = f64::from(outcome.min(1));
        let (a, b) = (draw.a, draw.b);
        let n = draw.theta.len() as f64;

        let mut log_post = 0.0;
        let mut log_like = 0.0;
        let mut grad_a = 0.0;
        let mut grad_b = 0.0;
        for ((&th, &da), &db) in draw
            .theta
            .iter()
            .zip(&draw.dtheta_da)
            .zip(&draw.dtheta_db)
        {
            log_post += beta_log_pdf(th, a, b);
            log_like += o * th.ln() + (1.0 - o) * (1.0 - th).ln();
            let g = (a - 1.0) / th - (b - 1.0) / (1.0 - th) - o / th + (1.0 - o) / (1.0 - th);
            grad_a += g * da;
            grad_b += g * db;
        }
        let loss = (log_post - log_like) / n;

        // chain through a = exp(log_a); the clamp blocks gradient outside its range
        let [log_a, log_b] = *self.log_shape.value();
        let pass = |log_s: f64| {
            let s = log_s.exp();
            if (SHAPE_MIN..=SHAPE_MAX).contains(&s) {
                s
            } else {
                0.0
            }
        };
        self.log_shape
            .accumulate([grad_a / n * pass(log_a), grad_b / n * pass(log_b)]);
        self.log_shape.step_each(rates);
        log_learn_step("beta_belief", loss, self.point());
        loss
    }
}
