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

use crate::buffer::{Context, Gated};
use crate::numeric::{mean, sigmoid, signed_power, softmax, EPS};

pub type ActionProbs = [f64; 2];

/// What the critic hands to the policy: a point distribution over states or a
/// set of sampled reward probabilities.
#[derive(Debug, Clone, Copy)]
pub enum BeliefView<'a> {
    Point([f64; 2]),
    Samples(&'a [f64]),
}

impl BeliefView<'_> {
    pub fn point(&self) -> [f64; 2] {
        match self {
            BeliefView::Point(p_s) => *p_s,
            BeliefView::Samples(theta) => {
                let p = mean(theta);
                [1.0 - p, p]
            }
        }
    }

    fn for_each_sample(&self, mut f: impl FnMut(f64)) -> usize {
        match self {
            BeliefView::Point(p_s) => {
                f(p_s[1]);
                1
            }
            BeliefView::Samples(theta) => {
                theta.iter().for_each(|&t| f(t));
                theta.len()
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PolicyInputs<'a> {
    pub context: Option<Context>,
    pub mag: [f64; 2],
    pub belief: BeliefView<'a>,
    /// Actor/perseveration distribution `q_A`; uniform when the model has none.
    pub habit: Option<[f64; 2]>,
}

/// `(w0, w1, w2)`; the fourth weight is `1 − w0 − w1 − w2` and is left
/// unconstrained, so it can go negative.
pub type Weights = [f64; 3];

pub fn implicit_weight(w: &Weights) -> f64 {
    1.0 - w[0] - w[1] - w[2]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MixtureWeights {
    Global(Weights),
    Gated(Gated<Weights>),
}

impl MixtureWeights {
    fn select(&self, context: Option<Context>) -> Weights {
        match (self, context) {
            (MixtureWeights::Global(w), _) => *w,
            (MixtureWeights::Gated(g), Some(ctx)) => g.select(ctx),
            (MixtureWeights::Gated(g), None) => g.volatile,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PolicyRule {
    /// `softmax(β · p_S · mag)`
    BeliefMagnitude { beta: f64 },
    /// `σ(β_ctx·v + β_ACT·(q − (1 − q)))` with
    /// `v = λ(p − (1 − p)) + (1 − λ)·sign(Δm)|Δm|^r`.
    Logistic {
        beta: Gated<f64>,
        beta_act: Option<f64>,
        lambda: f64,
        r: f64,
    },
    /// `softmax(β · p_S · mag + λ_ctx · ln(q_A + ε))`
    LogPrior { beta: f64, lambda: Gated<f64> },
    /// `softmax(β · (w0·p_S·mag + w1·p_S + w2·mag + w3·q_A))`
    Mixture { beta: f64, weights: MixtureWeights },
    /// Sample average of `softmax(β · θ_i · mag)`.
    SampledMagnitude { beta: f64 },
    /// Sample average of the mixture with `θ_i` in place of `p_S`.
    SampledMixture { beta: f64, weights: Weights },
}

impl PolicyRule {
    pub fn needs_context(&self) -> bool {
        match self {
            PolicyRule::Logistic { .. } | PolicyRule::LogPrior { .. } => true,
            PolicyRule::Mixture {
                weights: MixtureWeights::Gated(_),
                ..
            } => true,
            _ => false,
        }
    }

    pub fn evaluate(&self, inputs: &PolicyInputs<'_>) -> ActionProbs {
        let mag = inputs.mag;
        let q_a = inputs.habit.unwrap_or([0.5, 0.5]);
        match self {
            PolicyRule::BeliefMagnitude { beta } => {
                let p_s = inputs.belief.point();
                softmax([beta * p_s[0] * mag[0], beta * p_s[1] * mag[1]])
            }
            PolicyRule::Logistic {
                beta,
                beta_act,
                lambda,
                r,
            } => {
                let p = inputs.belief.point()[1];
                let beta = inputs
                    .context
                    .map_or(beta.volatile, |ctx| beta.select(ctx));
                let v = lambda * (p - (1.0 - p))
                    + (1.0 - lambda) * signed_power(mag[1] - mag[0], *r);
                let mut va = beta * v;
                if let Some(beta_act) = beta_act {
                    va += beta_act * (q_a[1] - (1.0 - q_a[1]));
                }
                let pa = sigmoid(va);
                [1.0 - pa, pa]
            }
            PolicyRule::LogPrior { beta, lambda } => {
                let p_s = inputs.belief.point();
                let lambda = inputs
                    .context
                    .map_or(lambda.volatile, |ctx| lambda.select(ctx));
                softmax([
                    beta * p_s[0] * mag[0] + lambda * (q_a[0] + EPS).ln(),
                    beta * p_s[1] * mag[1] + lambda * (q_a[1] + EPS).ln(),
                ])
            }
            PolicyRule::Mixture { beta, weights } => {
                let w = weights.select(inputs.context);
                let p_s = inputs.belief.point();
                let u = mixture_utility(&w, p_s, mag, q_a);
                softmax([beta * u[0], beta * u[1]])
            }
            PolicyRule::SampledMagnitude { beta } => {
                average_over_samples(&inputs.belief, |theta| {
                    softmax([beta * theta * mag[0], beta * theta * mag[1]])
                })
            }
            PolicyRule::SampledMixture { beta, weights } => {
                average_over_samples(&inputs.belief, |theta| {
                    let u = mixture_utility(weights, [theta, theta], mag, q_a);
                    softmax([beta * u[0], beta * u[1]])
                })
            }
        }
    }
}

/// `w0·p_S·mag + w1·p_S + w2·mag + (1 − w0 − w1 − w2)·q_A`
pub fn mixture_utility(w: &Weights, p_s: [f64; 2], mag: [f64; 2], q_a: [f64; 2]) -> [f64; 2] {
    let w3 = implicit_weight(w);
    [0usize, 1].map(|i| w[0] * p_s[i] * mag[i] + w[1] * p_s[i] + w[2] * mag[i] + w3 * q_a[i])
}

fn average_over_samples(belief: &BeliefView<'_>, policy: impl Fn(f64) -> ActionProbs) -> ActionProbs {
    let mut total = [0.0; 2];
    let n = belief.for_each_sample(|theta| {
        let pi = policy(theta);
        total[0] += pi[0];
        total[1] += pi[1];
    });
    if n == 0 {
        return [0.5, 0.5];
    }
    total.map(|t| t / n as f64)
}
