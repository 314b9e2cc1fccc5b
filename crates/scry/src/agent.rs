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

use crate::buffer::{Context, Gated, Trial, TrialBuffer, TrialField};
use crate::distributional::BetaBelief;
use crate::error::{AgentError, Result};
use crate::estimators::{DeltaRule, Estimator, LogOddsRule, SigmoidLatent, SoftmaxLatent};
use crate::logging::{log_agent_built, log_control, log_learn_step, log_policy, log_wiring_error};
use crate::numeric::{log_prob, mutual_information};
use crate::policy::{ActionProbs, BeliefView, MixtureWeights, PolicyInputs, PolicyRule};
use crate::registry::{
    ModelKind, ModelSpec, Variable, DIST_RL_MIX_SAMPLES, DIST_RL_SAMPLES,
};
use rand::distributions::{Distribution, WeightedIndex};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every model in this crate chooses between two options.
pub const N_ACTIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// Log-probability of a given action, for likelihood fitting.
    Eval,
    /// Draw an action from the policy.
    Sample,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Eval => "eval",
            ControlMode::Sample => "sample",
        }
    }
}

impl FromStr for ControlMode {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eval" => Ok(ControlMode::Eval),
            "sample" => Ok(ControlMode::Sample),
            other => Err(AgentError::UnknownName {
                kind: "control mode",
                name: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlOutcome {
    LogProb(f64),
    Sampled { action: usize, log_prob: f64 },
}

impl ControlOutcome {
    pub fn log_prob(&self) -> f64 {
        match self {
            ControlOutcome::LogProb(lp) => *lp,
            ControlOutcome::Sampled { log_prob, .. } => *log_prob,
        }
    }
}

/// The lifecycle every model follows each trial: push the observations,
/// evaluate or sample from the policy, then learn.
pub trait Agent: fmt::Debug + Send {
    fn spec(&self) -> &'static ModelSpec;

    fn n_actions(&self) -> usize;

    fn buffer(&self) -> &TrialBuffer;

    fn push(&mut self, trial: Trial);

    /// Action probabilities for the trial in the buffer. Variants that cache
    /// an estimate for the loss do so here.
    fn policy(&mut self) -> Result<ActionProbs>;

    fn learn(&mut self) -> Result<()>;

    fn report(&self, variable: Variable) -> Result<f64>;

    fn eval(&mut self, action: usize) -> Result<f64> {
        let pi = self.policy()?;
        let lp = log_prob(&pi, action)?;
        log_control(self.spec().id, "eval", action, lp);
        Ok(lp)
    }

    fn sample(&mut self, rng: &mut dyn RngCore) -> Result<(usize, f64)> {
        let pi = self.policy()?;
        let dist = WeightedIndex::new(pi).map_err(|e| AgentError::InvalidPolicy {
            model: self.spec().id,
            reason: e.to_string(),
        })?;
        let action = dist.sample(rng);
        let lp = log_prob(&pi, action)?;
        log_control(self.spec().id, "sample", action, lp);
        Ok((action, lp))
    }

    fn control(
        &mut self,
        action: usize,
        rng: Option<&mut dyn RngCore>,
        mode: ControlMode,
    ) -> Result<ControlOutcome> {
        match mode {
            ControlMode::Eval => self.eval(action).map(ControlOutcome::LogProb),
            ControlMode::Sample => {
                let rng = rng.ok_or(AgentError::MissingRng)?;
                let (action, log_prob) = self.sample(rng)?;
                Ok(ControlOutcome::Sampled { action, log_prob })
            }
        }
    }
}

#[derive(Debug)]
enum Critic {
    Point {
        estimator: Box<dyn Estimator>,
        rate: Gated<f64>,
    },
    Beta {
        belief: BetaBelief,
        rates: [f64; 2],
    },
}

impl Critic {
    fn point(estimator: impl Estimator + 'static, stable: f64, volatile: f64) -> Self {
        Critic::Point {
            estimator: Box::new(estimator),
            rate: Gated::new(stable, volatile),
        }
    }

    fn ready(&self) -> bool {
        match self {
            Critic::Point { estimator, .. } => estimator.ready(),
            Critic::Beta { belief, .. } => belief.ready(),
        }
    }

    fn probability(&self) -> f64 {
        match self {
            Critic::Point { estimator, .. } => estimator.probability(),
            Critic::Beta { belief, .. } => belief.point(),
        }
    }

    /// True once a policy evaluation has left a cached estimate behind.
    fn has_cache(&self) -> bool {
        match self {
            Critic::Point { estimator, .. } => estimator.last_forward().is_some(),
            Critic::Beta { belief, .. } => belief.samples().is_some(),
        }
    }

    /// Belief as reported: the estimate from the last policy evaluation for
    /// caching critics, the live estimate otherwise.
    fn reported(&self) -> f64 {
        match self {
            Critic::Point { estimator, .. } => estimator
                .last_forward()
                .map_or_else(|| estimator.probability(), |p| p[1]),
            Critic::Beta { belief, .. } => belief.point(),
        }
    }
}

#[derive(Debug)]
struct Actor {
    estimator: Box<dyn Estimator>,
    rate: f64,
}

impl Actor {
    fn boxed(estimator: impl Estimator + 'static, rate: f64) -> Option<Self> {
        Some(Self {
            estimator: Box::new(estimator),
            rate,
        })
    }
}

/// A model variant assembled from a critic, an optional actor and a policy
/// rule, selected by [`ModelKind`].
#[derive(Debug)]
pub struct ModelAgent {
    kind: ModelKind,
    n_actions: usize,
    params: Vec<f64>,
    critic: Critic,
    actor: Option<Actor>,
    policy: PolicyRule,
    buffer: TrialBuffer,
    last_policy: Option<ActionProbs>,
}

impl ModelAgent {
    pub fn new(kind: ModelKind, n_actions: usize, params: &[f64], seed: u64) -> Result<Self> {
        let spec = kind.spec();
        if n_actions != N_ACTIONS {
            return Err(AgentError::ActionSpace {
                model: spec.id,
                expected: N_ACTIONS,
                found: n_actions,
            });
        }
        spec.check_params(params)?;
        let p = params;

        let (critic, actor, policy) = match kind {
            ModelKind::GagRl => (
                Critic::point(DeltaRule::default(), p[0], p[1]),
                None,
                PolicyRule::BeliefMagnitude { beta: p[2] },
            ),
            ModelKind::GagModel => (
                Critic::point(DeltaRule::default(), p[0], p[1]),
                Actor::boxed(DeltaRule::default(), p[4]),
                PolicyRule::Logistic {
                    beta: Gated::new(p[2], p[3]),
                    beta_act: Some(p[5]),
                    lambda: p[6],
                    r: p[7],
                },
            ),
            ModelKind::GagModel2 => (
                Critic::point(DeltaRule::default(), p[0], p[1]),
                None,
                PolicyRule::Logistic {
                    beta: Gated::new(p[2], p[3]),
                    beta_act: None,
                    lambda: p[4],
                    r: p[5],
                },
            ),
            ModelKind::CeRl => (
                Critic::point(LogOddsRule::default(), p[0], p[1]),
                None,
                PolicyRule::BeliefMagnitude { beta: p[2] },
            ),
            ModelKind::Csce => (
                Critic::point(LogOddsRule::default(), p[0], p[1]),
                Actor::boxed(LogOddsRule::default(), p[4]),
                PolicyRule::LogPrior {
                    beta: p[5],
                    lambda: Gated::new(p[2], p[3]),
                },
            ),
            ModelKind::Mix => (
                Critic::point(LogOddsRule::default(), p[0], p[1]),
                Actor::boxed(LogOddsRule::default(), p[2]),
                PolicyRule::Mixture {
                    beta: p[3],
                    weights: MixtureWeights::Global([p[4], p[5], p[6]]),
                },
            ),
            ModelKind::MixExplore => (
                Critic::point(LogOddsRule::default(), p[0], p[1]),
                Actor::boxed(LogOddsRule::default(), p[2]),
                PolicyRule::Mixture {
                    beta: p[3],
                    weights: MixtureWeights::Gated(Gated::new(
                        [p[4], p[5], p[6]],
                        [p[7], p[8], p[9]],
                    )),
                },
            ),
            ModelKind::MixNn => (
                Critic::point(SoftmaxLatent::new(), p[0], p[1]),
                Actor::boxed(SoftmaxLatent::new(), p[2]),
                PolicyRule::Mixture {
                    beta: p[3],
                    weights: MixtureWeights::Global([p[4], p[5], p[6]]),
                },
            ),
            ModelKind::MixNn2 => (
                Critic::point(SigmoidLatent::new(), p[0], p[1]),
                Actor::boxed(SigmoidLatent::new(), p[2]),
                PolicyRule::Mixture {
                    beta: p[3],
                    weights: MixtureWeights::Global([p[4], p[5], p[6]]),
                },
            ),
            ModelKind::DistRl => (
                Critic::Beta {
                    belief: BetaBelief::new(p[2], DIST_RL_SAMPLES, seed),
                    rates: [p[0], p[0]],
                },
                None,
                PolicyRule::SampledMagnitude { beta: p[1] },
            ),
            ModelKind::DistRlMix => (
                Critic::Beta {
                    belief: BetaBelief::new(p[3], DIST_RL_MIX_SAMPLES, seed),
                    rates: [p[0], p[1]],
                },
                Actor::boxed(SoftmaxLatent::new(), p[4]),
                PolicyRule::SampledMixture {
                    beta: p[2],
                    weights: [p[5], p[6], p[7]],
                },
            ),
        };

        log_agent_built(spec.id, params);
        Ok(Self {
            kind,
            n_actions,
            params: params.to_vec(),
            critic,
            actor,
            policy,
            buffer: TrialBuffer::new(),
            last_policy: None,
        })
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    pub fn policy_rule(&self) -> &PolicyRule {
        &self.policy
    }

    /// Fields `policy` reads from the buffer.
    pub fn policy_fields(&self) -> Vec<TrialField> {
        let mut fields = vec![TrialField::Mag0, TrialField::Mag1];
        if self.policy.needs_context() {
            fields.push(TrialField::Context);
        }
        fields
    }

    /// Fields `learn` reads from the buffer.
    pub fn learn_fields(&self) -> Vec<TrialField> {
        let mut fields = vec![TrialField::Outcome];
        if matches!(self.critic, Critic::Point { .. }) {
            fields.push(TrialField::Context);
        }
        if self.actor.is_some() {
            fields.push(TrialField::Action);
        }
        fields
    }

    /// True when no learnable latent holds a pending gradient.
    pub fn grads_are_zero(&self) -> bool {
        let critic = match &self.critic {
            Critic::Point { estimator, .. } => estimator.grad_is_zero(),
            Critic::Beta { belief, .. } => belief.latent().grad_is_zero(),
        };
        critic
            && self
                .actor
                .as_ref()
                .map_or(true, |a| a.estimator.grad_is_zero())
    }

    pub fn belief(&self) -> f64 {
        self.critic.probability()
    }

    pub fn habit(&self) -> Option<[f64; 2]> {
        self.actor.as_ref().map(|a| a.estimator.peek())
    }

    pub fn beta_shapes(&self) -> Option<(f64, f64)> {
        match &self.critic {
            Critic::Beta { belief, .. } => Some(belief.shapes()),
            Critic::Point { .. } => None,
        }
    }

    /// Mutual information between the believed state and the chosen action,
    /// relative to the actor's prior over actions (uniform without an actor).
    pub fn information(&self) -> Result<f64> {
        let p = self.critic.probability();
        let pi = self.peek_policy()?;
        let q_a = self.habit().unwrap_or([0.5, 0.5]);
        mutual_information(&[1.0 - p, p], &pi, &q_a)
    }

    fn context_for_policy(&self) -> Result<Option<Context>> {
        if self.policy.needs_context() {
            self.buffer.context().map(Some)
        } else {
            Ok(self.buffer.current().context)
        }
    }

    /// Policy from the current state without caching or resampling.
    fn peek_policy(&self) -> Result<ActionProbs> {
        self.buffer.require(&self.policy_fields())?;
        let mag = self.buffer.magnitudes()?;
        let context = self.context_for_policy()?;
        let habit = self.habit();
        let belief = match &self.critic {
            Critic::Point { estimator, .. } => BeliefView::Point(estimator.peek()),
            Critic::Beta { belief, .. } => match belief.samples() {
                Some(theta) => BeliefView::Samples(theta),
                None => {
                    let p = belief.point();
                    BeliefView::Point([1.0 - p, p])
                }
            },
        };
        Ok(self.policy.evaluate(&PolicyInputs {
            context,
            mag,
            belief,
            habit,
        }))
    }

    fn checked<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if err.is_wiring_error() {
                log_wiring_error(self.kind.id(), err);
            }
        }
        result
    }
}

impl Agent for ModelAgent {
    fn spec(&self) -> &'static ModelSpec {
        self.kind.spec()
    }

    fn n_actions(&self) -> usize {
        self.n_actions
    }

    fn buffer(&self) -> &TrialBuffer {
        &self.buffer
    }

    fn push(&mut self, trial: Trial) {
        self.buffer.push(trial);
    }

    fn policy(&mut self) -> Result<ActionProbs> {
        let fields = self.policy_fields();
        self.checked(self.buffer.require(&fields))?;
        let mag = self.buffer.magnitudes()?;
        let context = self.context_for_policy()?;

        let habit = self.actor.as_mut().map(|a| a.estimator.forward());
        let belief = match &mut self.critic {
            Critic::Point { estimator, .. } => BeliefView::Point(estimator.forward()),
            Critic::Beta { belief, .. } => BeliefView::Samples(belief.sample()),
        };
        let pi = self.policy.evaluate(&PolicyInputs {
            context,
            mag,
            belief,
            habit,
        });
        log_policy(self.kind.id(), &pi);
        self.last_policy = Some(pi);
        Ok(pi)
    }

    fn learn(&mut self) -> Result<()> {
        let fields = self.learn_fields();
        self.checked(self.buffer.require(&fields))?;
        let ready = self.critic.ready()
            && self
                .actor
                .as_ref()
                .map_or(true, |a| a.estimator.ready());
        if !ready {
            return self.checked(Err(AgentError::PolicyNotEvaluated {
                model: self.kind.id(),
            }));
        }
        let outcome = self.buffer.outcome()?;
        let action = match &self.actor {
            Some(_) => {
                let action = self.buffer.action()?;
                if action >= self.n_actions {
                    return Err(AgentError::InvalidAction {
                        action,
                        n_actions: self.n_actions,
                    });
                }
                Some(action)
            }
            None => None,
        };

        match &mut self.critic {
            Critic::Point { estimator, rate } => {
                let rate = rate.select(self.buffer.context()?);
                let loss = estimator.learn(outcome as usize, rate);
                log_learn_step("critic", loss, estimator.probability());
            }
            Critic::Beta { belief, rates } => {
                belief.learn(outcome, *rates);
            }
        }
        if let (Some(actor), Some(action)) = (self.actor.as_mut(), action) {
            let loss = actor.estimator.learn(action, actor.rate);
            log_learn_step("actor", loss, actor.estimator.probability());
        }
        Ok(())
    }

    fn report(&self, variable: Variable) -> Result<f64> {
        let spec = self.spec();
        if !spec.reports(variable) {
            return Err(AgentError::UnsupportedVariable {
                model: spec.id,
                variable: variable.as_str(),
            });
        }
        match variable {
            Variable::Ps => Ok(self.critic.reported()),
            Variable::Pi => match self.last_policy.filter(|_| self.critic.has_cache()) {
                Some(pi) => Ok(pi[1]),
                None => Ok(self.peek_policy()?[1]),
            },
            Variable::Vars => match &self.critic {
                Critic::Beta { belief, .. } => Ok(belief.sample_variance()),
                Critic::Point { .. } => Err(AgentError::UnsupportedVariable {
                    model: spec.id,
                    variable: variable.as_str(),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn full_trial(context: Context, outcome: u8, action: usize) -> Trial {
        Trial::new()
            .context(context)
            .magnitudes(0.4, 0.6)
            .outcome(outcome)
            .action(action)
    }

    #[test]
    fn rejects_wrong_action_space_and_param_count() {
        assert!(matches!(
            ModelKind::GagRl.build_seeded(3, &[0.3, 0.3, 5.0], 0),
            Err(AgentError::ActionSpace { found: 3, .. })
        ));
        assert!(matches!(
            ModelKind::Mix.build_seeded(2, &[0.3; 6], 0),
            Err(AgentError::ParameterCount {
                expected: 7,
                found: 6,
                ..
            })
        ));
    }

    #[test]
    fn learn_requires_fields_before_mutating() {
        let mut agent = ModelKind::GagModel
            .build_seeded(2, &[0.3, 0.3, 5.0, 5.0, 0.2, 1.0, 0.5, 0.5], 0)
            .unwrap();
        agent.push(
            Trial::new()
                .context(Context::Stable)
                .magnitudes(0.5, 0.5)
                .outcome(1),
        );
        let err = agent.learn().unwrap_err();
        assert!(matches!(
            err,
            AgentError::MissingField {
                field: TrialField::Action
            }
        ));
        // critic untouched
        assert_eq!(agent.belief(), 0.5);
    }

    #[test]
    fn gradient_variants_need_policy_first() {
        let mut agent = ModelKind::MixNn
            .build_seeded(2, &[0.5, 0.5, 0.5, 3.0, 0.3, 0.3, 0.3], 0)
            .unwrap();
        agent.push(full_trial(Context::Volatile, 1, 1));
        assert!(matches!(
            agent.learn(),
            Err(AgentError::PolicyNotEvaluated { model: "mix_nn" })
        ));
        agent.policy().unwrap();
        agent.learn().unwrap();
        assert!(agent.grads_are_zero());
        assert!(agent.learn().is_err());
    }

    #[test]
    fn eval_is_log_of_policy_plus_floor() {
        let mut agent = ModelKind::Csce
            .build_seeded(2, &[0.5, 0.8, 1.0, 2.0, 0.4, 3.0], 0)
            .unwrap();
        agent.push(full_trial(Context::Stable, 0, 1));
        let pi = agent.policy().unwrap();
        for a in 0..2 {
            assert_eq!(agent.eval(a).unwrap(), (pi[a] + crate::numeric::EPS).ln());
        }
        assert!(matches!(
            agent.eval(2),
            Err(AgentError::InvalidAction { action: 2, .. })
        ));
    }

    #[test]
    fn sample_requires_rng_and_returns_drawn_action_log_prob() {
        let mut agent = ModelKind::GagRl.build_seeded(2, &[0.3, 0.3, 5.0], 0).unwrap();
        agent.push(full_trial(Context::Stable, 1, 0));
        assert!(matches!(
            agent.control(0, None, ControlMode::Sample),
            Err(AgentError::MissingRng)
        ));
        let mut rng = StdRng::seed_from_u64(9);
        let pi = agent.policy().unwrap();
        match agent
            .control(0, Some(&mut rng as &mut dyn RngCore), ControlMode::Sample)
            .unwrap()
        {
            ControlOutcome::Sampled { action, log_prob } => {
                assert!(action < 2);
                assert_eq!(log_prob, (pi[action] + crate::numeric::EPS).ln());
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[derive(Debug)]
    struct FixedPolicy {
        pi: ActionProbs,
        buffer: TrialBuffer,
    }

    impl FixedPolicy {
        fn new(pi: ActionProbs) -> Self {
            Self {
                pi,
                buffer: TrialBuffer::new(),
            }
        }
    }

    impl Agent for FixedPolicy {
        fn spec(&self) -> &'static ModelSpec {
            ModelKind::GagRl.spec()
        }

        fn n_actions(&self) -> usize {
            N_ACTIONS
        }

        fn buffer(&self) -> &TrialBuffer {
            &self.buffer
        }

        fn push(&mut self, trial: Trial) {
            self.buffer.push(trial);
        }

        fn policy(&mut self) -> Result<ActionProbs> {
            Ok(self.pi)
        }

        fn learn(&mut self) -> Result<()> {
            Ok(())
        }

        fn report(&self, _variable: Variable) -> Result<f64> {
            Ok(self.pi[1])
        }
    }

    #[test]
    fn sample_draws_only_supported_actions() {
        let mut agent = FixedPolicy::new([0.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let (action, lp) = agent.sample(&mut rng).unwrap();
            assert_eq!(action, 1);
            assert_eq!(lp, (1.0 + crate::numeric::EPS).ln());
        }
    }

    #[test]
    fn sample_rejects_degenerate_policies() {
        let mut rng = StdRng::seed_from_u64(3);
        for pi in [[f64::NAN, 0.5], [0.0, 0.0]] {
            let err = FixedPolicy::new(pi).sample(&mut rng).unwrap_err();
            assert!(
                matches!(err, AgentError::InvalidPolicy { model: "gag_rl", .. }),
                "{err}"
            );
            assert_eq!(err.category(), "Numerical");
        }
    }

    #[test]
    fn control_mode_parse_error_names_the_kind() {
        assert_eq!("sample".parse::<ControlMode>().unwrap(), ControlMode::Sample);
        let err = "fit".parse::<ControlMode>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown control mode 'fit'");
    }

    #[test]
    fn gradient_variants_report_the_evaluated_estimate() {
        let mut agent = ModelKind::MixNn
            .build_seeded(2, &[0.5, 0.5, 0.5, 3.0, 0.3, 0.3, 0.3], 0)
            .unwrap();
        agent.push(full_trial(Context::Stable, 1, 1));
        let pi = agent.policy().unwrap();
        agent.learn().unwrap();
        assert!(agent.belief() > 0.5);
        assert_eq!(agent.report(Variable::Ps).unwrap(), 0.5);
        assert_eq!(agent.report(Variable::Pi).unwrap(), pi[1]);

        agent.policy().unwrap();
        assert_eq!(agent.report(Variable::Ps).unwrap(), agent.belief());
    }

    #[test]
    fn point_variants_do_not_report_variance() {
        let agent = ModelKind::CeRl.build_seeded(2, &[1.0, 1.0, 3.0], 0).unwrap();
        assert!(matches!(
            agent.report(Variable::Vars),
            Err(AgentError::UnsupportedVariable { .. })
        ));
    }

    #[test]
    fn information_is_zero_under_uniform_policy() {
        let mut agent = ModelKind::GagRl.build_seeded(2, &[0.3, 0.3, 0.0], 0).unwrap();
        agent.push(full_trial(Context::Stable, 1, 0));
        assert!(agent.information().unwrap().abs() < 1e-12);
    }

    #[test]
    fn required_fields_follow_strategies() {
        let dist = ModelKind::DistRl.build_seeded(2, &[0.1, 3.0, 1.0], 0).unwrap();
        assert_eq!(dist.learn_fields(), vec![TrialField::Outcome]);
        assert_eq!(dist.policy_fields(), vec![TrialField::Mag0, TrialField::Mag1]);
        let explore = ModelKind::MixExplore
            .build_seeded(2, &[0.5, 0.5, 0.5, 3.0, 0.2, 0.2, 0.2, 0.1, 0.1, 0.1], 0)
            .unwrap();
        assert!(explore.policy_fields().contains(&TrialField::Context));
        assert!(explore.learn_fields().contains(&TrialField::Action));
    }
}
