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

/// Unconstrained learnable parameters with an explicit gradient accumulator.
///
/// Gradients are summed by [`Latent::accumulate`] and consumed by
/// [`Latent::step`], which always leaves the accumulator at zero so nothing
/// carries over into the next trial.
#[derive(Debug, Clone, PartialEq)]
pub struct Latent<const N: usize> {
    value: [f64; N],
    grad: [f64; N],
}

impl<const N: usize> Latent<N> {
    pub fn new(value: [f64; N]) -> Self {
        Self {
            value,
            grad: [0.0; N],
        }
    }

    pub fn filled(value: f64) -> Self {
        Self::new([value; N])
    }

    pub fn value(&self) -> &[f64; N] {
        &self.value
    }

    pub fn grad(&self) -> &[f64; N] {
        &self.grad
    }

    pub fn accumulate(&mut self, grad: [f64; N]) {
        for (acc, g) in self.grad.iter_mut().zip(grad) {
            *acc += g;
        }
    }

    /// Plain gradient descent: `value -= rate * grad`, then zero the gradient.
    pub fn step(&mut self, rate: f64) {
        for (value, grad) in self.value.iter_mut().zip(self.grad.iter()) {
            *value -= rate * grad;
        }
        self.zero_grad();
    }

    /// Like [`Latent::step`] with a separate rate per component.
    pub fn step_each(&mut self, rates: [f64; N]) {
        for ((value, grad), rate) in self.value.iter_mut().zip(self.grad.iter()).zip(rates) {
            *value -= rate * grad;
        }
        self.zero_grad();
    }

    pub fn zero_grad(&mut self) {
        self.grad = [0.0; N];
    }

    pub fn grad_is_zero(&self) -> bool {
        self.grad.iter().all(|g| *g == 0.0)
    }
}
