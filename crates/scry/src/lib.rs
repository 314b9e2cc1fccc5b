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

pub mod agent;
pub mod buffer;
pub mod config;
pub mod distributional;
pub mod error;
pub mod estimators;
pub mod latent;
pub mod logging;
pub mod numeric;
pub mod policy;
pub mod registry;

pub use agent::{Agent, ControlMode, ControlOutcome, ModelAgent, N_ACTIONS};
pub use buffer::{Context, FieldValue, Gated, Trial, TrialBuffer, TrialField};
pub use config::AgentConfig;
pub use distributional::BetaBelief;
pub use error::{AgentError, ConfigError, Result};
pub use estimators::{DeltaRule, Estimator, LogOddsRule, SigmoidLatent, SoftmaxLatent};
pub use latent::Latent;
pub use numeric::{mutual_information, EPS};
pub use policy::{ActionProbs, PolicyRule};
pub use registry::{catalogue, ModelKind, ModelSpec, Variable};
