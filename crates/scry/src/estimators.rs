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
use crate::numeric::{sigmoid, softmax, EPS};
use std::fmt;

/// A learnable estimate of a two-way distribution: the critic's belief over
/// which state is rewarding, or the actor's perseveration over actions.
pub trait Estimator: fmt::Debug + Send {
    /// Distribution used for action selection. Gradient estimators cache it
    /// for the loss of the following `learn`.
    fn forward(&mut self) -> [f64; 2];

    /// Current distribution, no caching.
    fn peek(&self) -> [f64; 2];

    /// One update toward `target` (0 or 1). Returns the trial loss or
    /// prediction error.
    fn learn(&mut self, target: usize, rate: f64) -> f64;

    /// False while a cached forward pass is required and missing.
    fn ready(&self) -> bool {
        true
    }

    fn grad_is_zero(&self) -> bool {
        true
    }

    /// Distribution from the most recent `forward`, kept after `learn`.
    /// `None` for estimators that do not cache.
    fn last_forward(&self) -> Option<[f64; 2]> {
        None
    }

    fn probability(&self) -> f64 {
        self.peek()[1]
    }
}

/// Delta rule directly in probability space: `p += α(o − p)`.
#[derive(Debug, Clone)]
pub struct DeltaRule {
    p: f64,
}

impl DeltaRule {
    pub fn new(p: f64) -> Self {
        Self { p }
    }
}

impl Default for DeltaRule {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Estimator for DeltaRule {
    fn forward(&mut self) -> [f64; 2] {
        self.peek()
    }

    fn peek(&self) -> [f64; 2] {
        [1.0 - self.p, self.p]
    }

    fn learn(&mut self, target: usize, rate: f64) -> f64 {
        let error = target as f64 - self.p;
        self.p += rate * error;
        error
    }
}

/// Delta rule on an unbounded log-odds accumulator `θ += α(o − σ(θ))`.
#[derive(Debug, Clone)]
pub struct LogOddsRule {
    theta: f64,
    p: f64,
}

impl LogOddsRule {
    pub fn new(theta: f64) -> Self {
        Self {
            theta,
            p: sigmoid(theta),
        }
    }

    pub fn log_odds(&self) -> f64 {
        self.theta
    }
}

impl Default for LogOddsRule {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Estimator for LogOddsRule {
    fn forward(&mut self) -> [f64; 2] {
        self.peek()
    }

    fn peek(&self) -> [f64; 2] {
        [1.0 - self.p, self.p]
    }

    fn learn(&mut self, target: usize, rate: f64) -> f64 {
        let error = target as f64 - self.p;
        self.theta += rate * error;
        self.p = sigmoid(self.theta);
        error
    }
}

/// Categorical estimate `softmax(μ)` trained by one gradient step on the
/// cross-entropy against a one-hot target.
#[derive(Debug, Clone)]
pub struct SoftmaxLatent {
    mu: Latent<2>,
    cached: Option<[f64; 2]>,
    last: Option<[f64; 2]>,
}

impl SoftmaxLatent {
    pub fn new() -> Self {
        Self {
            mu: Latent::filled(0.0),
            cached: None,
            last: None,
        }
    }

    pub fn latent(&self) -> &Latent<2> {
        &self.mu
    }
}

impl Default for SoftmaxLatent {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for SoftmaxLatent {
    fn forward(&mut self) -> [f64; 2] {
        let theta = self.peek();
        self.cached = Some(theta);
        self.last = Some(theta);
        theta
    }

    fn peek(&self) -> [f64; 2] {
        softmax(*self.mu.value())
    }

    fn learn(&mut self, target: usize, rate: f64) -> f64 {
        let Some(theta) = self.cached.take() else {
            return 0.0;
        };
        let t = target.min(1);
        let loss = -(theta[t] + EPS).ln();
        // d/dμ_k of −ln(θ_t + ε) through the softmax Jacobian
        let scale = -theta[t] / (theta[t] + EPS);
        let mut grad = [0.0; 2];
        for (k, g) in grad.iter_mut().enumerate() {
            let delta = if k == t { 1.0 } else { 0.0 };
            *g = scale * (delta - theta[k]);
        }
        self.mu.accumulate(grad);
        self.mu.step(rate);
        loss
    }

    fn ready(&self) -> bool {
        self.cached.is_some()
    }

    fn grad_is_zero(&self) -> bool {
        self.mu.grad_is_zero()
    }

    fn last_forward(&self) -> Option<[f64; 2]> {
        self.last
    }
}

/// Bernoulli estimate `σ(μ)` trained by one gradient step on the binary
/// cross-entropy.
#[derive(Debug, Clone)]
pub struct SigmoidLatent {
    mu: Latent<1>,
    cached: Option<f64>,
    last: Option<[f64; 2]>,
}

impl SigmoidLatent {
    pub fn new() -> Self {
        Self {
            mu: Latent::filled(0.0),
            cached: None,
            last: None,
        }
    }

    pub fn latent(&self) -> &Latent<1> {
        &self.mu
    }
}

impl Default for SigmoidLatent {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for SigmoidLatent {
    fn forward(&mut self) -> [f64; 2] {
        let theta = sigmoid(self.mu.value()[0]);
        self.cached = Some(theta);
        self.last = Some([1.0 - theta, theta]);
        [1.0 - theta, theta]
    }

    fn peek(&self) -> [f64; 2] {
        let theta = sigmoid(self.mu.value()[0]);
        [1.0 - theta, theta]
    }

    fn learn(&mut self, target: usize, rate: f64) -> f64 {
        let Some(theta) = self.cached.take() else {
            return 0.0;
        };
        let o = target.min(1) as f64;
        let loss = -(o * (theta + EPS).ln() + (1.0 - o) * (1.0 - theta + EPS).ln());
        let dloss_dtheta = -(o / (theta + EPS) - (1.0 - o) / (1.0 - theta + EPS));
        self.mu.accumulate([dloss_dtheta * theta * (1.0 - theta)]);
        self.mu.step(rate);
        loss
    }

    fn ready(&self) -> bool {
        self.cached.is_some()
    }

    fn grad_is_zero(&self) -> bool {
        self.mu.grad_is_zero()
    }

    fn last_forward(&self) -> Option<[f64; 2]> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_rule_moves_toward_outcome() {
        let mut rule = DeltaRule::default();
        rule.learn(1, 0.3);
        assert!((rule.probability() - 0.65).abs() < 1e-12);
        rule.learn(0, 0.3);
        assert!((rule.probability() - 0.455).abs() < 1e-12);
    }

    #[test]
    fn log_odds_rule_stays_inside_unit_interval() {
        let mut rule = LogOddsRule::default();
        for _ in 0..200 {
            rule.learn(1, 25.0);
        }
        let p = rule.probability();
        assert!(p > 0.99 && p <= 1.0);
        assert!(rule.log_odds() > 0.0);
    }

    #[test]
    fn softmax_latent_needs_forward_pass() {
        let mut latent = SoftmaxLatent::new();
        assert!(!latent.ready());
        latent.forward();
        assert!(latent.ready());
        let loss = latent.learn(1, 0.5);
        assert!((loss - 2f64.ln()).abs() < 1e-9);
        assert!(!latent.ready());
        assert!(latent.grad_is_zero());
        assert!(latent.probability() > 0.5);
        // symmetric logits move in opposite directions
        let mu = latent.latent().value();
        assert!((mu[0] + mu[1]).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_latent_gradient_matches_finite_difference() {
        let mut latent = SigmoidLatent::new();
        latent.forward();
        latent.learn(1, 1.0);
        latent.forward();
        let mu = latent.latent().value()[0];
        let loss_at = |m: f64| -(sigmoid(m) + EPS).ln();
        let h = 1e-6;
        let numeric = (loss_at(mu + h) - loss_at(mu - h)) / (2.0 * h);
        latent.learn(1, 1.0);
        let stepped = latent.latent().value()[0];
        assert!(((mu - stepped) - numeric).abs() < 1e-6);
    }

    #[test]
    fn last_forward_survives_learn() {
        let mut latent = SigmoidLatent::new();
        assert_eq!(latent.last_forward(), None);
        let before = latent.forward();
        latent.learn(1, 0.5);
        assert_eq!(latent.last_forward(), Some(before));
        assert!(latent.probability() > before[1]);
        assert_eq!(DeltaRule::default().last_forward(), None);
    }
}
