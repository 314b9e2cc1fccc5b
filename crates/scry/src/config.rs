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

use crate::agent::{ModelAgent, N_ACTIONS};
use crate::error::{AgentError, ConfigError, Result};
use crate::registry::ModelKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_n_actions() -> usize {
    N_ACTIONS
}

/// Declarative description of one agent: which variant, its parameter
/// vector in declared order, and an optional seed for sampled beliefs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub model: ModelKind,
    pub params: Vec<f64>,
    #[serde(default = "default_n_actions")]
    pub n_actions: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub fn new(model: ModelKind, params: Vec<f64>) -> Self {
        Self {
            model,
            params,
            n_actions: N_ACTIONS,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| AgentError::from(ConfigError::from(e)))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AgentError::from(ConfigError::from(e)))
    }

    /// Loads a `.json` file as JSON and anything else as YAML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::File {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn build(&self) -> Result<ModelAgent> {
        match self.seed {
            Some(seed) => self.model.build_seeded(self.n_actions, &self.params, seed),
            None => self.model.build(self.n_actions, &self.params),
        }
    }
}
