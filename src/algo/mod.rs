pub mod tabular;

pub use tabular::q_learning::{QLearningAgent, QLearningAgentConfig};
pub use tabular::q_table::QTable;
