use log::info;

use crate::agent::Agent;

use super::traffic_world::{Pos, TrafficWorld};

/// Outcome of a single trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialSummary {
    pub trial: u32,
    pub steps: u32,
    pub total_reward: f64,
    pub penalties: u32,
    pub reached: bool,
    /// Steps left on the deadline when the trial ended
    pub deadline_left: i32,
}

/// Fraction of trials that reached their destination
pub fn success_rate(summaries: &[TrialSummary]) -> f64 {
    if summaries.is_empty() {
        return 0.0;
    }
    let reached = summaries.iter().filter(|s| s.reached).count();
    reached as f64 / summaries.len() as f64
}

/// Drives an agent through consecutive trials of a [`TrafficWorld`]
pub struct Simulator {
    world: TrafficWorld,
}

impl Simulator {
    pub fn new(world: TrafficWorld) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &TrafficWorld {
        &self.world
    }

    /// Run `n_trials` trials back to back
    pub fn run<A>(&mut self, agent: &mut A, n_trials: u32) -> Vec<TrialSummary>
    where
        A: Agent<TrafficWorld, Destination = Pos>,
    {
        (1..=n_trials)
            .map(|trial| self.run_trial(agent, trial))
            .collect()
    }

    /// Reset the world and the agent, then step until the trial ends
    pub fn run_trial<A>(&mut self, agent: &mut A, trial: u32) -> TrialSummary
    where
        A: Agent<TrafficWorld, Destination = Pos>,
    {
        let destination = self.world.reset();
        agent.reset(destination);

        while !self.world.is_done() {
            self.world.step(agent);
        }

        let stats = self.world.stats();
        let summary = TrialSummary {
            trial,
            steps: stats.steps,
            total_reward: stats.total_reward,
            penalties: stats.penalties,
            reached: self.world.reached(),
            deadline_left: self.world.time_left(),
        };
        info!(
            "trial {trial}: {} in {} steps, reward = {:.1}, penalties = {}",
            if summary.reached { "reached" } else { "aborted" },
            summary.steps,
            summary.total_reward,
            summary.penalties
        );
        summary
    }
}
