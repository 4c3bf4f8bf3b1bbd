use crate::env::Environment;

/// An agent driven one timestep at a time by its environment
pub trait Agent<E>
where
    E: Environment,
{
    type Destination;

    /// Prepare for a new trip to `destination`
    fn reset(&mut self, destination: Self::Destination);

    /// Perform one step at time `t` of the current trip, acting exactly once in `env`
    fn update(&mut self, env: &mut E, t: u32);
}
