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

use crate::error::{AgentError, Result};

/// Additive floor applied before every logarithm of a probability.
pub const EPS: f64 = 1e-12;

pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

pub fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Max-shifted softmax; the result always sums to one for finite input.
pub fn softmax<const N: usize>(scores: [f64; N]) -> [f64; N] {
    let max_score = scores.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let mut out = scores.map(|s| (s - max_score).exp());
    let sum_exps: f64 = out.iter().sum();
    if sum_exps > 0.0 && sum_exps.is_finite() {
        for value in out.iter_mut() {
            *value /= sum_exps;
        }
    } else {
        out = [1.0 / N as f64; N];
    }
    out
}

/// Zero at zero, like numpy's `sign`.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `sign(x) * |x|^r`, real-valued for any exponent.
pub fn signed_power(x: f64, r: f64) -> f64 {
    sign(x) * x.abs().powf(r)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by `n`).
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values
        .iter()
        .map(|v| {
            let diff = v - m;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64
}

pub fn log_prob(probs: &[f64], action: usize) -> Result<f64> {
    probs
        .get(action)
        .map(|p| (p + EPS).ln())
        .ok_or(AgentError::InvalidAction {
            action,
            n_actions: probs.len(),
        })
}

/// Information the policy carries about the state beyond the action prior:
/// `Σ p_s·π·(ln(π+ε) − ln(q_a+ε))`.
pub fn mutual_information(p_s: &[f64], pi: &[f64], q_a: &[f64]) -> Result<f64> {
    if p_s.len() != pi.len() {
        return Err(AgentError::LengthMismatch {
            left: p_s.len(),
            right: pi.len(),
        });
    }
    if pi.len() != q_a.len() {
        return Err(AgentError::LengthMismatch {
            left: pi.len(),
            right: q_a.len(),
        });
    }
    Ok(p_s
        .iter()
        .zip(pi)
        .zip(q_a)
        .map(|((p, pi), q)| p * pi * ((pi + EPS).ln() - (q + EPS).ln()))
        .sum())
}
