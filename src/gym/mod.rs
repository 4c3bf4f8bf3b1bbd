pub mod planner;
pub mod simulator;
pub mod traffic_world;

pub use planner::GridPlanner;
pub use simulator::{success_rate, Simulator, TrialSummary};
pub use traffic_world::{Heading, Pos, TrafficWorld, TrafficWorldConfig};
