use std::{error::Error, fs, path::Path};

use log::info;
use smartcab::{
    algo::{QLearningAgent, QLearningAgentConfig},
    gym::{success_rate, GridPlanner, Simulator, TrafficWorld, TrafficWorldConfig},
    state::IntersectionEncoder,
};

const NUM_TRIALS: u32 = 100;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = Path::new("demos/smartcab");

    let world = TrafficWorld::new(TrafficWorldConfig::default())?;
    let config = QLearningAgentConfig {
        gamma: 0.3,
        ..Default::default()
    };
    let mut agent = QLearningAgent::with_seed(
        config,
        &world,
        GridPlanner::new(),
        IntersectionEncoder,
        rand::random(),
    )?;
    let mut sim = Simulator::new(world);

    let summaries = sim.run(&mut agent, NUM_TRIALS);

    fs::create_dir_all(path.join("out"))?;
    let mut wtr = csv::Writer::from_path(path.join("out/trials.csv"))?;
    wtr.write_record(["trial", "steps", "reward", "penalties", "reached", "deadline_left"])?;
    for s in &summaries {
        wtr.write_record(&[
            s.trial.to_string(),
            s.steps.to_string(),
            s.total_reward.to_string(),
            s.penalties.to_string(),
            s.reached.to_string(),
            s.deadline_left.to_string(),
        ])?;
    }
    wtr.flush()?;

    let half = summaries.len() / 2;
    info!(
        "success rate: first half {:.2}, second half {:.2}, {} states learned",
        success_rate(&summaries[..half]),
        success_rate(&summaries[half..]),
        agent.q_table().len()
    );

    Ok(())
}
