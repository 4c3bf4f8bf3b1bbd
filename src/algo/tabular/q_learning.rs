use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    agent::Agent,
    check_interval,
    decay::{self, Decay},
    env::{DiscreteActionSpace, RoutePlanner},
    error::Result,
    exploration::{Choice, EpsilonGreedy},
    memory::Transition,
    state::StateEncoder,
    trial::Clock,
};

use super::q_table::QTable;

/// Configuration for the [`QLearningAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct QLearningAgentConfig {
    /// Explore with probability `1 / t` at timestep `t`; otherwise act purely greedily
    ///
    /// **Default**: `true`
    pub use_epsilon: bool,
    /// Decay the learning rate as `1 / t`; otherwise every update fully replaces the old estimate
    ///
    /// **Default**: `true`
    pub use_alpha: bool,
    /// The discount factor, in `[0, 1)`
    ///
    /// **Default**: `0.0`
    pub gamma: f64,
}

impl Default for QLearningAgentConfig {
    fn default() -> Self {
        Self {
            use_epsilon: true,
            use_alpha: true,
            gamma: 0.0,
        }
    }
}

impl QLearningAgentConfig {
    /// **Errors** if `gamma` is not in the interval `[0, 1)`
    pub fn validate(&self) -> Result<()> {
        check_interval!(self.gamma, 0.0..1.0)
    }
}

/// Weighted blend of an old estimate toward a new target
///
/// Q ← (1 − α)Q + α·target, so `alpha = 1.0` replaces the estimate outright.
pub fn blend(old: f64, target: f64, alpha: f64) -> f64 {
    (1.0 - alpha) * old + alpha * target
}

/// A Q-learning agent driven one timestep at a time by its environment
///
/// Each [`update`](Agent::update) senses the environment, applies the temporal-difference update to
/// the transition left pending by the previous step, picks an action epsilon-greedily, acts, and
/// stores the new transition. The backup uses the best value of the current state rather than the
/// value of the action actually chosen next.
///
/// ### Generics
/// - `E` - The [`Environment`](crate::env::Environment) the agent drives in
/// - `P` - The [`RoutePlanner`] that supplies the desired heading
/// - `C` - The [`StateEncoder`] turning percepts and headings into table keys
/// - `R` - The random source for exploration and tie-breaking
pub struct QLearningAgent<E, P, C, R = StdRng>
where
    E: DiscreteActionSpace,
    P: RoutePlanner<E>,
    C: StateEncoder<E::Percept, P::Waypoint>,
    R: Rng,
{
    q_table: QTable<C::State, E::Action>,
    exploration: Option<EpsilonGreedy<decay::Reciprocal>>,
    alpha: Box<dyn Decay>,
    gamma: f64,
    planner: P,
    encoder: C,
    pending: Option<Transition<C::State, E::Action>>,
    clock: Clock,
    rng: R,
}

impl<E, P, C, R> QLearningAgent<E, P, C, R>
where
    E: DiscreteActionSpace,
    P: RoutePlanner<E>,
    C: StateEncoder<E::Percept, P::Waypoint>,
    R: Rng,
{
    /// Initialize a new agent over the action set of `env`
    ///
    /// **Errors** if the configuration is invalid or `env` exposes no actions
    pub fn new(
        config: QLearningAgentConfig,
        env: &E,
        planner: P,
        encoder: C,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        let alpha: Box<dyn Decay> = if config.use_alpha {
            Box::new(decay::Reciprocal::default())
        } else {
            Box::new(decay::Constant::new(1.0))
        };
        Ok(Self {
            q_table: QTable::new(env.actions())?,
            exploration: config.use_epsilon.then(EpsilonGreedy::default),
            alpha,
            gamma: config.gamma,
            planner,
            encoder,
            pending: None,
            clock: Clock::new(),
            rng,
        })
    }

    pub fn q_table(&self) -> &QTable<C::State, E::Action> {
        &self.q_table
    }

    pub fn q_table_mut(&mut self) -> &mut QTable<C::State, E::Action> {
        &mut self.q_table
    }

    /// The transition awaiting its update, if any
    pub fn pending(&self) -> Option<&Transition<C::State, E::Action>> {
        self.pending.as_ref()
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    /// Current exploration probability, or `None` when exploration is disabled or no step has run yet
    pub fn epsilon(&self) -> Option<f64> {
        let t = self.clock.timestep();
        self.exploration
            .as_ref()
            .filter(|_| t > 0)
            .map(|e| e.epsilon(t))
    }

    /// Select an action for an ensured `state` at the current timestep
    fn choose_action(&mut self, state: &C::State) -> E::Action {
        let t = self.clock.timestep();
        debug_assert!(t >= 1, "the clock must tick before choosing an action");

        let choice = self
            .exploration
            .as_ref()
            .map_or(Choice::Exploit, |e| e.choose(t, &mut self.rng));

        let candidates = match choice {
            Choice::Explore => {
                trace!("random action selected at timestep {t}");
                self.q_table.actions().to_vec()
            }
            Choice::Exploit => self.q_table.best_actions(state),
        };

        *candidates
            .choose(&mut self.rng)
            .expect("There is always at least one action available")
    }

    /// Update the pending transition toward its reward plus the discounted best value of `state`
    fn learn(&mut self, state: &C::State) {
        let Some(Transition {
            state: prev_state,
            action: prev_action,
            reward,
        }) = self.pending.take()
        else {
            return;
        };

        let alpha = self.alpha.evaluate(self.clock.timestep() as f64);
        let target = reward + self.gamma * self.q_table.best_value(state);
        let q_value = self.q_table.get(&prev_state, &prev_action);

        self.q_table
            .set(&prev_state, prev_action, blend(q_value, target, alpha));
    }
}

impl<E, P, C> QLearningAgent<E, P, C, StdRng>
where
    E: DiscreteActionSpace,
    P: RoutePlanner<E>,
    C: StateEncoder<E::Percept, P::Waypoint>,
{
    /// Initialize a new agent with a seeded [`StdRng`]
    pub fn with_seed(
        config: QLearningAgentConfig,
        env: &E,
        planner: P,
        encoder: C,
        seed: u64,
    ) -> Result<Self> {
        Self::new(config, env, planner, encoder, StdRng::seed_from_u64(seed))
    }
}

impl<E, P, C, R> Agent<E> for QLearningAgent<E, P, C, R>
where
    E: DiscreteActionSpace,
    P: RoutePlanner<E>,
    C: StateEncoder<E::Percept, P::Waypoint>,
    R: Rng,
{
    type Destination = P::Destination;

    fn reset(&mut self, destination: P::Destination) {
        self.pending = None;
        self.planner.route_to(destination);
        let episode = self.clock.next_episode();
        debug!(
            "QLearningAgent::reset(): trial = {episode}, timestep = {}, states = {}",
            self.clock.timestep(),
            self.q_table.len()
        );
    }

    fn update(&mut self, env: &mut E, t: u32) {
        let waypoint = self.planner.next_waypoint(env);
        let percept = env.sense();
        let deadline = env.deadline();
        self.clock.tick();

        let state = self.encoder.encode(&percept, &waypoint);
        self.q_table.ensure(state);
        self.learn(&state);

        let action = self.choose_action(&state);
        let reward = env.act(action);
        self.pending = Some(Transition::new(state, action, reward));

        debug!(
            "QLearningAgent::update(): t = {t}, deadline = {deadline:?}, state = {state:?}, action = {action:?}, reward = {reward}"
        );
    }
}
