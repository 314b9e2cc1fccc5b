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
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    Stable,
    Volatile,
}

impl Context {
    pub fn as_str(&self) -> &'static str {
        match self {
            Context::Stable => "stable",
            Context::Volatile => "volatile",
        }
    }

    /// Picks the value gated on this context.
    pub fn gate<T: Copy>(&self, stable: T, volatile: T) -> T {
        match self {
            Context::Stable => stable,
            Context::Volatile => volatile,
        }
    }
}

/// A stable/volatile pair where exactly one value applies per trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gated<T> {
    pub stable: T,
    pub volatile: T,
}

impl<T: Copy> Gated<T> {
    pub fn new(stable: T, volatile: T) -> Self {
        Self { stable, volatile }
    }

    pub fn select(&self, context: Context) -> T {
        context.gate(self.stable, self.volatile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrialField {
    #[serde(rename = "ctxt")]
    Context,
    #[serde(rename = "mag0")]
    Mag0,
    #[serde(rename = "mag1")]
    Mag1,
    #[serde(rename = "state")]
    Outcome,
    #[serde(rename = "act")]
    Action,
}

impl TrialField {
    pub const ALL: [TrialField; 5] = [
        TrialField::Context,
        TrialField::Mag0,
        TrialField::Mag1,
        TrialField::Outcome,
        TrialField::Action,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrialField::Context => "ctxt",
            TrialField::Mag0 => "mag0",
            TrialField::Mag1 => "mag1",
            TrialField::Outcome => "state",
            TrialField::Action => "act",
        }
    }
}

impl fmt::Display for TrialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrialField {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self> {
        TrialField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| AgentError::UnknownField {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Context(Context),
    Scalar(f64),
    Index(usize),
}

/// One trial's observations. Fields that were not observed stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    #[serde(rename = "ctxt", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag1: Option<f64>,
    #[serde(rename = "state", default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<u8>,
    #[serde(rename = "act", default, skip_serializing_if = "Option::is_none")]
    pub action: Option<usize>,
}

impl Trial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn magnitudes(mut self, mag0: f64, mag1: f64) -> Self {
        self.mag0 = Some(mag0);
        self.mag1 = Some(mag1);
        self
    }

    pub fn outcome(mut self, outcome: u8) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn action(mut self, action: usize) -> Self {
        self.action = Some(action);
        self
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| crate::error::ConfigError::from(e).into())
    }

    pub fn get(&self, field: TrialField) -> Option<FieldValue> {
        match field {
            TrialField::Context => self.context.map(FieldValue::Context),
            TrialField::Mag0 => self.mag0.map(FieldValue::Scalar),
            TrialField::Mag1 => self.mag1.map(FieldValue::Scalar),
            TrialField::Outcome => self.outcome.map(|o| FieldValue::Index(o as usize)),
            TrialField::Action => self.action.map(FieldValue::Index),
        }
    }

    pub fn has(&self, field: TrialField) -> bool {
        self.get(field).is_some()
    }
}

/// Single-slot store for the current trial. Every push replaces the whole
/// record, so fields from an earlier trial never leak into the next one.
#[derive(Debug, Clone, Default)]
pub struct TrialBuffer {
    current: Trial,
}

impl TrialBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trial: Trial) {
        self.current = trial;
    }

    pub fn current(&self) -> &Trial {
        &self.current
    }

    pub fn sample(&self, fields: &[TrialField]) -> Result<Vec<FieldValue>> {
        fields
            .iter()
            .map(|&field| {
                self.current
                    .get(field)
                    .ok_or(AgentError::MissingField { field })
            })
            .collect()
    }

    pub fn require(&self, fields: &[TrialField]) -> Result<()> {
        match fields.iter().find(|field| !self.current.has(**field)) {
            Some(&field) => Err(AgentError::MissingField { field }),
            None => Ok(()),
        }
    }

    pub fn context(&self) -> Result<Context> {
        self.current.context.ok_or(AgentError::MissingField {
            field: TrialField::Context,
        })
    }

    pub fn magnitudes(&self) -> Result<[f64; 2]> {
        let mag0 = self.current.mag0.ok_or(AgentError::MissingField {
            field: TrialField::Mag0,
        })?;
        let mag1 = self.current.mag1.ok_or(AgentError::MissingField {
            field: TrialField::Mag1,
        })?;
        Ok([mag0, mag1])
    }

    pub fn outcome(&self) -> Result<u8> {
        let value = self.current.outcome.ok_or(AgentError::MissingField {
            field: TrialField::Outcome,
        })?;
        if value > 1 {
            return Err(AgentError::InvalidOutcome { value });
        }
        Ok(value)
    }

    pub fn action(&self) -> Result<usize> {
        self.current.action.ok_or(AgentError::MissingField {
            field: TrialField::Action,
        })
    }
}
