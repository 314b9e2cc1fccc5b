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

use crate::agent::ModelAgent;
use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DIST_RL_SAMPLES: usize = 5000;
pub const DIST_RL_MIX_SAMPLES: usize = 100;

/// Variables a model can report for simulation output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    /// Belief that state 1 is the rewarding one.
    Ps,
    /// Probability of choosing action 1.
    Pi,
    /// Sample variance of the belief.
    Vars,
}

impl Variable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variable::Ps => "ps",
            Variable::Pi => "pi",
            Variable::Vars => "vars",
        }
    }
}

impl FromStr for Variable {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ps" => Ok(Variable::Ps),
            "pi" => Ok(Variable::Pi),
            "vars" => Ok(Variable::Vars),
            other => Err(AgentError::UnknownName {
                kind: "variable",
                name: other.to_string(),
            }),
        }
    }
}

/// Static declaration read by fitting harnesses. Never mutated.
#[derive(Debug, Serialize)]
pub struct ModelSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub param_names: &'static [&'static str],
    pub bounds: &'static [(f64, f64)],
    pub plausible_bounds: &'static [(f64, f64)],
    pub variables: &'static [Variable],
}

impl ModelSpec {
    pub fn n_params(&self) -> usize {
        self.param_names.len()
    }

    pub fn reports(&self, variable: Variable) -> bool {
        self.variables.contains(&variable)
    }

    /// Fails unless `params` has exactly one value per declared name.
    pub fn check_params(&self, params: &[f64]) -> Result<()> {
        if params.len() != self.n_params() {
            return Err(AgentError::ParameterCount {
                model: self.id,
                expected: self.n_params(),
                found: params.len(),
            });
        }
        Ok(())
    }
}

const POINT_VARIABLES: &[Variable] = &[Variable::Ps, Variable::Pi];
const DIST_VARIABLES: &[Variable] = &[Variable::Ps, Variable::Pi, Variable::Vars];

const MIX_NAMES: &[&str] = &["α_STA", "α_VOL", "α_ACT", "β", "w0", "w1", "w2"];
const MIX_BOUNDS: &[(f64, f64)] = &[
    (0.0, 50.0),
    (0.0, 50.0),
    (0.0, 50.0),
    (0.0, 50.0),
    (0.0, 1.0),
    (0.0, 1.0),
    (0.0, 1.0),
];
const MIX_PLAUSIBLE: &[(f64, f64)] = &[
    (0.0, 2.0),
    (0.0, 2.0),
    (0.0, 3.0),
    (0.0, 10.0),
    (0.0, 1.0),
    (0.0, 1.0),
    (0.0, 1.0),
];

static GAG_RL: ModelSpec = ModelSpec {
    id: "gag_rl",
    name: "Gagne RL",
    param_names: &["α_STA", "α_VOL", "β"],
    bounds: &[(0.0, 1.0), (0.0, 1.0), (0.0, 30.0)],
    plausible_bounds: &[(0.0, 0.5), (0.0, 0.5), (0.0, 10.0)],
    variables: POINT_VARIABLES,
};

static GAG_MODEL: ModelSpec = ModelSpec {
    id: "gag_model",
    name: "Gagne best model",
    param_names: &["α_STA", "α_VOL", "β_STA", "β_VOL", "α_ACT", "β_ACT", "λ", "r"],
    bounds: &[
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 30.0),
        (0.0, 30.0),
        (0.0, 1.0),
        (0.0, 30.0),
        (0.0, 1.0),
        (0.0, 1.0),
    ],
    plausible_bounds: &[
        (0.0, 0.5),
        (0.0, 0.5),
        (0.0, 10.0),
        (0.0, 10.0),
        (0.0, 1.0),
        (0.0, 30.0),
        (0.0, 1.0),
        (0.0, 1.0),
    ],
    variables: POINT_VARIABLES,
};

static GAG_MODEL2: ModelSpec = ModelSpec {
    id: "gag_model2",
    name: "Gagne best model, no perseveration",
    param_names: &["α_STA", "α_VOL", "β_STA", "β_VOL", "λ", "r"],
    bounds: &[
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 30.0),
        (0.0, 30.0),
        (0.0, 1.0),
        (0.0, 1.0),
    ],
    plausible_bounds: &[
        (0.0, 0.5),
        (0.0, 0.5),
        (0.0, 10.0),
        (0.0, 10.0),
        (0.0, 1.0),
        (0.0, 1.0),
    ],
    variables: POINT_VARIABLES,
};

static CE_RL: ModelSpec = ModelSpec {
    id: "ce_rl",
    name: "ce RL",
    param_names: &["α_STA", "α_VOL", "β"],
    bounds: &[(0.0, 30.0), (0.0, 30.0), (0.0, 30.0)],
    plausible_bounds: &[(0.0, 2.0), (0.0, 2.0), (0.0, 10.0)],
    variables: POINT_VARIABLES,
};

static CSCE: ModelSpec = ModelSpec {
    id: "csce",
    name: "ce RL, context-sensitive perseveration",
    param_names: &["α_STA", "α_VOL", "λ_STA", "λ_VOL", "α_ACT", "β"],
    bounds: &[
        (0.0, 50.0),
        (0.0, 50.0),
        (0.0, 50.0),
        (0.0, 50.0),
        (0.0, 50.0),
        (0.0, 50.0),
    ],
    plausible_bounds: &[
        (0.0, 2.0),
        (0.0, 2.0),
        (0.0, 10.0),
        (0.0, 10.0),
        (0.0, 3.0),
        (0.0, 10.0),
    ],
    variables: POINT_VARIABLES,
};

static MIX: ModelSpec = ModelSpec {
    id: "mix",
    name: "mix",
    param_names: MIX_NAMES,
    bounds: MIX_BOUNDS,
    plausible_bounds: MIX_PLAUSIBLE,
    variables: POINT_VARIABLES,
};

static MIX_EXPLORE: ModelSpec = ModelSpec {
    id: "mix_explore",
    name: "mix, fit different",
    param_names: &[
        "α_STA", "α_VOL", "α_ACT", "β", "w0_STA", "w1_STA", "w2_STA", "w0_VOL", "w1_VOL",
        "w2_VOL",
    ],
    bounds: &[
        (0.0, 50.0),
        (0.0, 50.0),
        (0.0, 50.0),
        (0.0, 50.0),
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 1.0),
    ],
    plausible_bounds: &[
        (0.0, 2.0),
        (0.0, 2.0),
        (0.0, 3.0),
        (0.0, 10.0),
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 1.0),
    ],
    variables: POINT_VARIABLES,
};

static MIX_NN: ModelSpec = ModelSpec {
    id: "mix_nn",
    name: "mix, NN implementation",
    param_names: MIX_NAMES,
    bounds: MIX_BOUNDS,
    plausible_bounds: MIX_PLAUSIBLE,
    variables: POINT_VARIABLES,
};

static MIX_NN2: ModelSpec = ModelSpec {
    id: "mix_nn2",
    name: "mix, NN implementation, sigmoid latents",
    param_names: MIX_NAMES,
    bounds: MIX_BOUNDS,
    plausible_bounds: MIX_PLAUSIBLE,
    variables: POINT_VARIABLES,
};

static DIST_RL: ModelSpec = ModelSpec {
    id: "dist_rl",
    name: "Distributional RL",
    param_names: &["α", "β", "logv"],
    bounds: &[(0.0, 50.0), (0.0, 20.0), (0.0, 10.0)],
    plausible_bounds: &[(0.0, 1.0), (0.0, 5.0), (0.0, 2.0)],
    variables: DIST_VARIABLES,
};

static DIST_RL_MIX: ModelSpec = ModelSpec {
    id: "dist_rl_mix",
    name: "Distributional RL, mix",
    param_names: &["α_MU", "α_SIG", "β", "logσ0", "α_ACT", "w0", "w1", "w2"],
    bounds: &[
        (0.0, 2.0),
        (0.0, 2.0),
        (0.0, 5.0),
        (0.0, 5.0),
        (0.0, 2.0),
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 1.0),
    ],
    plausible_bounds: &[
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 2.0),
        (0.0, 2.0),
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 1.0),
        (0.0, 1.0),
    ],
    variables: DIST_VARIABLES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    GagRl,
    GagModel,
    GagModel2,
    CeRl,
    Csce,
    Mix,
    MixExplore,
    MixNn,
    MixNn2,
    DistRl,
    DistRlMix,
}

impl ModelKind {
    pub const ALL: [ModelKind; 11] = [
        ModelKind::GagRl,
        ModelKind::GagModel,
        ModelKind::GagModel2,
        ModelKind::CeRl,
        ModelKind::Csce,
        ModelKind::Mix,
        ModelKind::MixExplore,
        ModelKind::MixNn,
        ModelKind::MixNn2,
        ModelKind::DistRl,
        ModelKind::DistRlMix,
    ];

    pub fn spec(&self) -> &'static ModelSpec {
        match self {
            ModelKind::GagRl => &GAG_RL,
            ModelKind::GagModel => &GAG_MODEL,
            ModelKind::GagModel2 => &GAG_MODEL2,
            ModelKind::CeRl => &CE_RL,
            ModelKind::Csce => &CSCE,
            ModelKind::Mix => &MIX,
            ModelKind::MixExplore => &MIX_EXPLORE,
            ModelKind::MixNn => &MIX_NN,
            ModelKind::MixNn2 => &MIX_NN2,
            ModelKind::DistRl => &DIST_RL,
            ModelKind::DistRlMix => &DIST_RL_MIX,
        }
    }

    pub fn id(&self) -> &'static str {
        self.spec().id
    }

    pub fn n_params(&self) -> usize {
        self.spec().n_params()
    }

    /// Builds an agent; sampled variants draw their seed from the OS.
    pub fn build(&self, n_actions: usize, params: &[f64]) -> Result<ModelAgent> {
        ModelAgent::new(*self, n_actions, params, rand::random())
    }

    pub fn build_seeded(&self, n_actions: usize, params: &[f64], seed: u64) -> Result<ModelAgent> {
        ModelAgent::new(*self, n_actions, params, seed)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModelKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self> {
        ModelKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| AgentError::UnknownModel {
                name: s.to_string(),
            })
    }
}

/// The full metadata table as JSON, keyed by model id.
pub fn catalogue() -> serde_json::Value {
    let entries = ModelKind::ALL
        .iter()
        .map(|kind| {
            let spec = kind.spec();
            (
                spec.id.to_string(),
                serde_json::to_value(spec).unwrap_or(serde_json::Value::Null),
            )
        })
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(entries)
}
