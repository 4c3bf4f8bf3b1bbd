use crate::algo::tabular::Hashable;

/// The world a learning agent drives in, seen from the agent's seat
///
/// The environment owns everything outside the agent: traffic, intersection rules, deadline
/// tracking and reward computation. The agent only ever senses it, reads the deadline and acts.
pub trait Environment {
    /// What the agent can perceive at its current position
    type Percept;

    /// A representation of an action that an agent can take to affect the environment
    type Action: Hashable;

    /// Snapshot of the agent's surroundings
    fn sense(&self) -> Self::Percept;

    /// Steps left before the deadline, or `None` when deadlines are not tracked
    fn deadline(&self) -> Option<i32>;

    /// Execute an action for the agent and return the reward it earned
    fn act(&mut self, action: Self::Action) -> f64;
}

/// An environment whose actions form a fixed, finite set shared by every state
pub trait DiscreteActionSpace: Environment {
    /// Get the full action set
    ///
    /// The returned `Vec` should never be empty, instead specify an action that represents doing nothing if necessary.
    fn actions(&self) -> Vec<Self::Action>;
}

/// Yields the next desired heading toward a destination
pub trait RoutePlanner<E: Environment> {
    type Destination;
    type Waypoint;

    /// Plan a new route
    fn route_to(&mut self, destination: Self::Destination);

    /// The heading the agent should take next given where it stands in `env`
    fn next_waypoint(&self, env: &E) -> Self::Waypoint;
}
