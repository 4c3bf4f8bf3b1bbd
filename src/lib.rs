//! A tabular Q-learning agent that learns to drive a smartcab through a grid of signalled
//! intersections.
//!
//! The learning core ([`algo`], [`exploration`], [`decay`], [`state`], [`trial`]) only talks to the
//! world through the traits in [`env`]. A complete traffic world, route planner and trial
//! simulator live in [`gym`].

/// Driving agents
pub mod agent;

/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Environment and route planner interfaces
pub mod env;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// Pending transition memory
pub mod memory;

/// State encoding and the traffic domain's percepts and actions
pub mod state;

/// Run-wide episode and timestep counters
pub mod trial;

/// Traffic world, route planner and trial simulator
#[cfg(feature = "gym")]
pub mod gym;

mod util;
