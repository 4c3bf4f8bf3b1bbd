/// The single pending transition a learning agent carries between timesteps
///
/// Recorded after acting and consumed by the temporal-difference update at the start of the
/// next step, once the successor state is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<S, A> {
    /// The state the action was taken in
    pub state: S,
    /// The action taken in the given state
    pub action: A,
    /// The reward received after taking the action
    pub reward: f64,
}

impl<S, A> Transition<S, A> {
    pub fn new(state: S, action: A, reward: f64) -> Self {
        Self {
            state,
            action,
            reward,
        }
    }
}
