/// Run-wide schedule counters
///
/// The timestep counter spans the whole run and is never reset between episodes, so the
/// exploration and learning-rate schedules keep decaying across trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clock {
    timestep: u64,
    episode: u32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of learning steps taken so far
    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    /// Number of episodes started so far
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Advance to the next learning step and return its (1-based) index
    pub fn tick(&mut self) -> u64 {
        self.timestep += 1;
        self.timestep
    }

    /// Start a new episode and return its (1-based) index
    pub fn next_episode(&mut self) -> u32 {
        self.episode += 1;
        self.episode
    }
}
