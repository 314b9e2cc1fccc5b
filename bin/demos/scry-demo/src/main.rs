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


use anyhow::{bail, Context as _, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use scry::{
    catalogue, Agent, AgentConfig, Context, ControlMode, ControlOutcome, ModelAgent, ModelKind,
    Trial, Variable,
};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "scry-demo")]
#[command(about = "Simulates a stable/volatile reversal-learning session for one agent variant.")]
struct Cli {
    #[arg(long, default_value_t = false)]
    debug: bool,
    /// Print the model catalogue as JSON and exit.
    #[arg(long, default_value_t = false)]
    catalogue: bool,
    /// YAML or JSON agent configuration; overrides --model and --params.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    #[arg(long, default_value = "gag_rl")]
    model: ModelKind,
    /// Comma separated, in declared order. Defaults to the middle of each
    /// plausible range.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    params: Vec<f64>,
    /// Trials per context block.
    #[arg(long, default_value_t = 90)]
    trials: usize,
    /// Trials between reversals in the volatile block.
    #[arg(long, default_value_t = 20, value_parser = parse_reversal)]
    reversal: usize,
    #[arg(long)]
    seed: Option<u64>,
}

const SAMPLING_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed for action sampling, kept apart from the agent's belief stream.
fn sampling_seed(seed: u64) -> u64 {
    seed ^ SAMPLING_SEED_MIX
}

fn parse_reversal(s: &str) -> std::result::Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("reversal interval must be at least 1 trial".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Debug, Default)]
struct BlockSummary {
    trials: usize,
    log_likelihood: f64,
    rewarded: usize,
    ps: f64,
    pi: f64,
    information: f64,
}

fn build_agent(cli: &Cli, seed: u64) -> Result<ModelAgent> {
    let config = match &cli.config {
        Some(path) => AgentConfig::from_path(path)
            .with_context(|| format!("loading agent config {}", path.display()))?,
        None => {
            let params = if cli.params.is_empty() {
                cli.model
                    .spec()
                    .plausible_bounds
                    .iter()
                    .map(|(lo, hi)| 0.5 * (lo + hi))
                    .collect()
            } else {
                cli.params.clone()
            };
            AgentConfig::new(cli.model, params)
        }
    };
    let config = match config.seed {
        Some(_) => config,
        None => config.with_seed(seed),
    };
    Ok(config.build()?)
}

fn run_block(
    agent: &mut ModelAgent,
    rng: &mut StdRng,
    context: Context,
    trials: usize,
    reversal: Option<usize>,
) -> Result<BlockSummary> {
    let mut summary = BlockSummary::default();
    let mut good = 1u8;
    for t in 0..trials {
        if let Some(every) = reversal.filter(|&n| n > 0) {
            if t > 0 && t % every == 0 {
                good = 1 - good;
            }
        }
        let outcome = if rng.gen_bool(0.8) { good } else { 1 - good };
        let mag0: f64 = rng.gen_range(0.05..0.95);
        let trial = Trial::new()
            .context(context)
            .magnitudes(mag0, 1.0 - mag0)
            .outcome(outcome);

        agent.push(trial.clone());
        let outcome_of_control =
            agent.control(0, Some(&mut *rng as &mut dyn RngCore), ControlMode::Sample)?;
        let action = match outcome_of_control {
            ControlOutcome::Sampled { action, .. } => action,
            other => bail!("sample mode returned {other:?}"),
        };
        summary.log_likelihood += outcome_of_control.log_prob();
        summary.information += agent.information()?;

        agent.push(trial.action(action));
        agent.learn()?;

        summary.trials += 1;
        summary.rewarded += usize::from(action == outcome as usize);
        summary.ps += agent.report(Variable::Ps)?;
        summary.pi += agent.report(Variable::Pi)?;
    }
    Ok(summary)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.catalogue {
        println!("{}", serde_json::to_string_pretty(&catalogue())?);
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut agent = match build_agent(&cli, seed) {
        Ok(agent) => agent,
        Err(e) => {
            error!("Failed to build agent: {e:#}");
            return Err(e);
        }
    };
    info!(model = %agent.kind(), seed, "Starting simulated session");

    let mut rng = StdRng::seed_from_u64(sampling_seed(seed));
    let mut blocks = Vec::new();
    for (context, reversal) in [(Context::Stable, None), (Context::Volatile, Some(cli.reversal))] {
        let summary = run_block(&mut agent, &mut rng, context, cli.trials, reversal)?;
        let n = summary.trials.max(1) as f64;
        let mut block = json!({
            "context": context.as_str(),
            "trials": summary.trials,
            "log_likelihood": summary.log_likelihood,
            "reward_rate": summary.rewarded as f64 / n,
            "mean_ps": summary.ps / n,
            "mean_pi": summary.pi / n,
            "mean_information": summary.information / n,
        });
        if agent.spec().reports(Variable::Vars) {
            block["vars"] = json!(agent.report(Variable::Vars)?);
        }
        info!(context = context.as_str(), log_likelihood = summary.log_likelihood, "Block finished");
        blocks.push(block);
    }

    let total: f64 = blocks
        .iter()
        .filter_map(|b| b["log_likelihood"].as_f64())
        .sum();
    let report = json!({
        "model": agent.spec().id,
        "params": agent.params(),
        "seed": seed,
        "blocks": blocks,
        "log_likelihood": total,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_reversal_interval_is_rejected() {
        let err = Cli::try_parse_from(["scry-demo", "--reversal", "0"]).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
        let cli = Cli::try_parse_from(["scry-demo", "--reversal", "5"]).unwrap();
        assert_eq!(cli.reversal, 5);
    }

    #[test]
    fn test_run_block_without_reversals() {
        let mut agent = ModelKind::GagRl.build_seeded(2, &[0.3, 0.6, 5.0], 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let summary = run_block(&mut agent, &mut rng, Context::Volatile, 5, Some(0)).unwrap();
        assert_eq!(summary.trials, 5);
        assert!(summary.log_likelihood < 0.0);
    }

    #[test]
    fn test_sampling_stream_is_not_the_belief_stream() {
        for seed in [0u64, 7, u64::MAX] {
            let mut belief = StdRng::seed_from_u64(seed);
            let mut sampling = StdRng::seed_from_u64(sampling_seed(seed));
            assert_ne!(belief.next_u64(), sampling.next_u64());
        }
    }
}
