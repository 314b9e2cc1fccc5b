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

use serde_json::json;
use tracing::{debug, info, warn};

pub fn log_agent_built(model: &str, params: &[f64]) {
    info!(
        model = model,
        params = %json!(params),
        "Agent constructed"
    );
}

pub fn log_policy(model: &str, probs: &[f64]) {
    debug!(
        model = model,
        pi = %json!(probs),
        "Policy evaluated"
    );
}

pub fn log_learn_step(component: &str, loss: f64, belief: f64) {
    debug!(
        component = component,
        loss = loss,
        belief = belief,
        "Learn step"
    );
}

pub fn log_control(model: &str, mode: &str, action: usize, log_prob: f64) {
    debug!(
        model = model,
        mode = mode,
        action = action,
        log_prob = log_prob,
        "Control"
    );
}

pub fn log_wiring_error(model: &str, error: &dyn std::error::Error) {
    warn!(
        model = model,
        error = %error,
        "Trial rejected"
    );
}
