use anyhow::Result;
use std::time::Instant;
use stigmergy_core::config::SimConfig;
use stigmergy_core::world::World;

fn main() -> Result<()> {
    let steps = 500;

    // Wander mode: raw tick cost at well above the demo's agent count.
    let config = SimConfig {
        agent_count: 5_000,
        ..SimConfig::default()
    };
    let mut world = World::try_new(config)?;
    println!(
        "Wander: {} agents on a {} x {} grid",
        world.agents.len(),
        world.config().cols(),
        world.config().rows()
    );
    let start = Instant::now();
    let mut move_us = 0u64;
    let mut decay_us = 0u64;
    for _ in 0..steps {
        let t = world.step();
        move_us += t.move_us;
        decay_us += t.decay_us;
    }
    let elapsed = start.elapsed();
    println!("Time for {} steps: {:?}", steps, elapsed);
    println!("Avg per step: {:?}", elapsed / steps as u32);
    println!(
        "Phase totals: move {} us, decay {} us",
        move_us, decay_us
    );

    // Scan mode: detection-heavy run, sampled metrics dumped as JSON.
    let config = SimConfig {
        agent_count: 500,
        point_count: 2_000,
        ..SimConfig::file_scan()
    };
    let mut world = World::try_new(config)?;
    println!(
        "\nScan: {} agents, {} points",
        world.agents.len(),
        world.points().len()
    );
    let start = Instant::now();
    let summary = world.try_run_experiment(steps, 100)?;
    println!("Time for {} steps with metrics: {:?}", steps, start.elapsed());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
