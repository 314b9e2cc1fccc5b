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

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use scry::numeric::sigmoid;
use scry::{
    Agent, AgentError, Context, ControlMode, ControlOutcome, ModelKind, Trial, TrialField,
    Variable, EPS,
};

fn stable_trial(outcome: u8, action: usize) -> Trial {
    Trial::new()
        .context(Context::Stable)
        .magnitudes(1.0, 1.0)
        .outcome(outcome)
        .action(action)
}

fn mid_params(kind: ModelKind) -> Vec<f64> {
    kind.spec()
        .plausible_bounds
        .iter()
        .map(|(lo, hi)| 0.5 * (lo + hi))
        .collect()
}

#[test]
fn test_delta_rule_agent_end_to_end() {
    let mut agent = ModelKind::GagRl.build_seeded(2, &[0.3, 0.3, 5.0], 0).unwrap();
    agent.push(
        Trial::new()
            .context(Context::Stable)
            .outcome(1)
            .magnitudes(1.0, 1.0),
    );
    assert_eq!(agent.report(Variable::Ps).unwrap(), 0.5);

    agent.policy().unwrap();
    agent.learn().unwrap();
    assert!((agent.report(Variable::Ps).unwrap() - 0.65).abs() < 1e-12);

    let pi = agent.policy().unwrap();
    assert!((pi[0] - 0.18242552380635635).abs() < 1e-9);
    assert!((pi[1] - 0.8175744761936437).abs() < 1e-9);
    assert!((agent.report(Variable::Pi).unwrap() - pi[1]).abs() < 1e-12);
}

#[test]
fn test_variational_bernoulli_agent_moves_toward_outcome() {
    let mut agent = ModelKind::MixNn2
        .build_seeded(2, &[0.1, 0.1, 0.1, 3.0, 0.4, 0.3, 0.2], 0)
        .unwrap();
    assert_eq!(agent.report(Variable::Ps).unwrap(), 0.5);
    agent.push(stable_trial(1, 1));
    agent.policy().unwrap();
    agent.learn().unwrap();
    assert!(agent.belief() > 0.5);
    assert!(agent.grads_are_zero());
}

#[test]
fn test_eval_matches_policy_for_every_variant() {
    for kind in ModelKind::ALL {
        let mut agent = kind.build_seeded(2, &mid_params(kind), 11).unwrap();
        agent.push(
            Trial::new()
                .context(Context::Volatile)
                .magnitudes(0.3, 0.7),
        );
        // sampled beliefs redraw on every evaluation, so compare against the
        // cached draw through report instead of a second policy call
        let lp = agent.eval(1).unwrap();
        let pi1 = agent.report(Variable::Pi).unwrap();
        assert!((lp - (pi1 + EPS).ln()).abs() < 1e-12, "{kind}");
    }
}

#[test]
fn test_learning_before_policy_is_an_ordering_error() {
    for kind in [ModelKind::MixNn, ModelKind::MixNn2, ModelKind::DistRl, ModelKind::DistRlMix] {
        let mut agent = kind.build_seeded(2, &mid_params(kind), 3).unwrap();
        agent.push(stable_trial(1, 0));
        let err = agent.learn().unwrap_err();
        assert!(matches!(err, AgentError::PolicyNotEvaluated { .. }), "{kind}");
        assert_eq!(err.category(), "Ordering");
    }
}

#[test]
fn test_missing_outcome_leaves_state_untouched() {
    let mut agent = ModelKind::Mix
        .build_seeded(2, &[0.5, 0.5, 0.5, 3.0, 0.3, 0.3, 0.3], 0)
        .unwrap();
    agent.push(
        Trial::new()
            .context(Context::Stable)
            .magnitudes(0.5, 0.5)
            .action(1),
    );
    agent.policy().unwrap();
    let err = agent.learn().unwrap_err();
    assert!(matches!(
        err,
        AgentError::MissingField {
            field: TrialField::Outcome
        }
    ));
    assert!(err.is_wiring_error());
    assert_eq!(agent.report(Variable::Ps).unwrap(), 0.5);
    assert_eq!(agent.habit(), Some([0.5, 0.5]));
}

#[test]
fn test_push_does_not_carry_fields_forward() {
    let mut agent = ModelKind::CeRl.build_seeded(2, &[1.0, 1.0, 3.0], 0).unwrap();
    agent.push(stable_trial(1, 1));
    agent.push(Trial::new().magnitudes(0.2, 0.8));
    agent.policy().unwrap();
    assert!(matches!(
        agent.learn(),
        Err(AgentError::MissingField {
            field: TrialField::Outcome
        })
    ));
}

#[test]
fn test_gradients_are_cleared_after_every_learn() {
    for kind in [ModelKind::MixNn, ModelKind::MixNn2, ModelKind::DistRl, ModelKind::DistRlMix] {
        let mut agent = kind.build_seeded(2, &mid_params(kind), 5).unwrap();
        for t in 0..20 {
            agent.push(stable_trial((t % 3 != 0) as u8, t % 2));
            agent.policy().unwrap();
            agent.learn().unwrap();
            assert!(agent.grads_are_zero(), "{kind} trial {t}");
        }
    }
}

#[test]
fn test_distributional_agent_reports_variance_and_learns() {
    let mut agent = ModelKind::DistRl.build_seeded(2, &[0.1, 3.0, 0.0], 21).unwrap();
    let prior_var = agent.report(Variable::Vars).unwrap();
    assert!((prior_var - 1.0 / 12.0).abs() < 1e-12);

    for _ in 0..30 {
        agent.push(Trial::new().magnitudes(0.5, 0.5).outcome(1));
        agent.policy().unwrap();
        agent.learn().unwrap();
    }
    agent.policy().unwrap();
    assert!(agent.report(Variable::Ps).unwrap() > 0.5);
    let (a, b) = agent.beta_shapes().unwrap();
    assert!(a > b);
}

#[test]
fn test_sampling_session_is_reproducible() {
    let run = || {
        let mut agent = ModelKind::DistRlMix
            .build_seeded(2, &mid_params(ModelKind::DistRlMix), 42)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut actions = Vec::new();
        for t in 0..15 {
            agent.push(
                Trial::new()
                    .context(Context::Volatile)
                    .magnitudes(0.4, 0.6)
                    .outcome((t % 2) as u8),
            );
            let outcome = agent
                .control(0, Some(&mut rng as &mut dyn RngCore), ControlMode::Sample)
                .unwrap();
            let ControlOutcome::Sampled { action, .. } = outcome else {
                panic!("sample mode returned {outcome:?}");
            };
            agent.push(
                Trial::new()
                    .context(Context::Volatile)
                    .magnitudes(0.4, 0.6)
                    .outcome((t % 2) as u8)
                    .action(action),
            );
            agent.learn().unwrap();
            actions.push(action);
        }
        (actions, agent.report(Variable::Ps).unwrap())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_trials_parse_from_historical_keys() {
    let trial = Trial::from_json(serde_json::json!({
        "ctxt": "volatile",
        "mag0": 0.25,
        "mag1": 0.75,
        "state": 0,
        "act": 1
    }))
    .unwrap();
    let mut agent = ModelKind::Csce
        .build_seeded(2, &[0.5, 0.8, 1.0, 2.0, 0.4, 3.0], 0)
        .unwrap();
    agent.push(trial);
    agent.policy().unwrap();
    agent.learn().unwrap();
    assert!(agent.report(Variable::Ps).unwrap() < 0.5);
    assert!(agent.habit().unwrap()[1] > 0.5);
}

fn learn_once(kind: ModelKind, params: &[f64], context: Context) -> scry::ModelAgent {
    let mut agent = kind.build_seeded(2, params, 0).unwrap();
    agent.push(
        Trial::new()
            .context(context)
            .magnitudes(1.0, 1.0)
            .outcome(1)
            .action(1),
    );
    agent.policy().unwrap();
    agent.learn().unwrap();
    agent
}

#[test]
fn test_delta_rule_uses_the_rate_of_the_current_context() {
    let params = [0.1, 0.9, 5.0];
    let stable = learn_once(ModelKind::GagRl, &params, Context::Stable);
    assert!((stable.report(Variable::Ps).unwrap() - 0.55).abs() < 1e-12);
    let volatile = learn_once(ModelKind::GagRl, &params, Context::Volatile);
    assert!((volatile.report(Variable::Ps).unwrap() - 0.95).abs() < 1e-12);

    let mut agent = stable;
    agent.push(stable_trial(1, 1).context(Context::Volatile));
    agent.learn().unwrap();
    assert!((agent.report(Variable::Ps).unwrap() - 0.955).abs() < 1e-12);
}

#[test]
fn test_log_odds_rule_uses_the_rate_of_the_current_context() {
    let params = [0.1, 0.9, 5.0];
    let stable = learn_once(ModelKind::CeRl, &params, Context::Stable);
    assert!((stable.report(Variable::Ps).unwrap() - sigmoid(0.05)).abs() < 1e-12);
    let volatile = learn_once(ModelKind::CeRl, &params, Context::Volatile);
    assert!((volatile.report(Variable::Ps).unwrap() - sigmoid(0.45)).abs() < 1e-12);
}

#[test]
fn test_distributional_mixture_steps_each_shape_with_its_own_rate() {
    let prior = 0.5f64.exp();
    let only_a = learn_once(
        ModelKind::DistRlMix,
        &[0.1, 0.0, 3.0, 0.5, 0.2, 0.3, 0.3, 0.2],
        Context::Stable,
    );
    let (a, b) = only_a.beta_shapes().unwrap();
    assert_eq!(b, prior);
    assert_ne!(a, prior);

    let only_b = learn_once(
        ModelKind::DistRlMix,
        &[0.0, 0.1, 3.0, 0.5, 0.2, 0.3, 0.3, 0.2],
        Context::Stable,
    );
    let (a, b) = only_b.beta_shapes().unwrap();
    assert_eq!(a, prior);
    assert_ne!(b, prior);
}
