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

use crate::buffer::TrialField;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Trial field '{field}' was not pushed for the current trial")]
    MissingField { field: TrialField },
    #[error("Model '{model}' expects {expected} parameters, got {found}")]
    ParameterCount {
        model: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Model '{model}' supports an action space of {expected}, got {found}")]
    ActionSpace {
        model: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Outcome must be 0 or 1, got {value}")]
    InvalidOutcome { value: u8 },
    #[error("Action {action} is outside the action space of size {n_actions}")]
    InvalidAction { action: usize, n_actions: usize },
    #[error("Model '{model}' must evaluate its policy before learning in the same trial")]
    PolicyNotEvaluated { model: &'static str },
    #[error("Sampling an action requires a random source")]
    MissingRng,
    #[error("Unknown model '{name}'")]
    UnknownModel { name: String },
    #[error("Unknown trial field '{name}'")]
    UnknownField { name: String },
    #[error("Unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },
    #[error("Model '{model}' produced an invalid policy: {reason}")]
    InvalidPolicy { model: &'static str, reason: String },
    #[error("Model '{model}' does not report variable '{variable}'")]
    UnsupportedVariable {
        model: &'static str,
        variable: &'static str,
    },
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse YAML configuration: {source}")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },
    #[error("Failed to parse JSON configuration: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("Failed to read configuration file '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    pub fn category(&self) -> &'static str {
        match self {
            AgentError::ParameterCount { .. }
            | AgentError::ActionSpace { .. }
            | AgentError::UnknownModel { .. }
            | AgentError::Config(_) => "Configuration",
            AgentError::MissingField { .. }
            | AgentError::UnknownField { .. }
            | AgentError::InvalidOutcome { .. } => "Trial",
            AgentError::PolicyNotEvaluated { .. } | AgentError::MissingRng => "Ordering",
            AgentError::InvalidAction { .. }
            | AgentError::UnsupportedVariable { .. }
            | AgentError::UnknownName { .. }
            | AgentError::LengthMismatch { .. } => "Usage",
            AgentError::InvalidPolicy { .. } => "Numerical",
        }
    }

    /// Harness wiring bugs: the run should be treated as fatal.
    pub fn is_wiring_error(&self) -> bool {
        matches!(
            self,
            AgentError::MissingField { .. }
                | AgentError::PolicyNotEvaluated { .. }
                | AgentError::MissingRng
        )
    }
}
