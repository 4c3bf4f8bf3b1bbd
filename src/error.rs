use thiserror::Error;

/// Errors raised while configuring agents, tables, and environments
///
/// Everything here is a construction-time failure. Logic faults at run time, like reading
/// a state that was never passed through [`QTable::ensure`](crate::algo::tabular::q_table::QTable::ensure),
/// panic instead.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("action set must contain at least one action")]
    EmptyActionSet,

    #[error("invalid value for `{name}`: {value} is not in the interval {interval}")]
    OutOfInterval {
        name: &'static str,
        value: f64,
        interval: String,
    },

    #[error("invalid world: {reason}")]
    InvalidWorld { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
