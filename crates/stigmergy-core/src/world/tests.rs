use super::World;
use crate::agent::Agent;
use crate::bias::BiasField;
use crate::config::{MovementMode, SimConfig, SimConfigError};
use crate::detection::{DetectionEvent, PointOfInterest};
use crate::world::{ExperimentError, WorldInitError};

/// Wander-mode config on a `cols x rows` grid with 1-unit cells.
fn wander_config(cols: usize, rows: usize, agent_count: usize) -> SimConfig {
    SimConfig {
        surface_width: cols as f64,
        surface_height: rows as f64,
        cell_size: 1.0,
        agent_count,
        ..SimConfig::default()
    }
}

/// Scan-mode config on a 10 x 10 grid with no pre-placed points; tests
/// insert their own agents and points for exact scenarios.
fn scan_config(agent_count: usize) -> SimConfig {
    SimConfig {
        surface_width: 100.0,
        surface_height: 100.0,
        agent_count,
        point_count: 0,
        ..SimConfig::file_scan()
    }
}

#[test]
fn tiebreak_on_flat_field_picks_first_enumerated_direction() {
    let config = SimConfig {
        exploration: 0.0,
        ..wander_config(10, 10, 1)
    };
    let mut world = World::try_new(config).unwrap();
    world.agents[0] = Agent::new([5.0, 5.0], [0.0, 0.0]);

    world.step();

    // All four neighbor scores tie at 0, so (+1, 0) wins.
    assert_eq!(world.agents[0].position, [6.0, 5.0]);
}

#[test]
fn deposit_lands_at_the_new_cell_before_decay() {
    let config = SimConfig {
        exploration: 0.0,
        ..wander_config(10, 10, 1)
    };
    let mut world = World::try_new(config).unwrap();
    world.agents[0] = Agent::new([5.0, 5.0], [0.0, 0.0]);

    world.step();

    // Deposited 4.0 at (6,5) during the move, then decayed once.
    assert_eq!(world.pheromone().intensity_at(6, 5), 4.0f32 * 0.995);
    assert_eq!(world.pheromone().intensity_at(5, 5), 0.0);
}

#[test]
fn later_agents_follow_trail_laid_earlier_in_the_same_tick() {
    let config = SimConfig {
        exploration: 0.0,
        ..wander_config(10, 10, 2)
    };
    let mut world = World::try_new(config).unwrap();
    world.agents[0] = Agent::new([5.0, 5.0], [0.0, 0.0]);
    world.agents[1] = Agent::new([5.0, 5.0], [0.0, 0.0]);

    world.step();

    // Agent 0 broke the tie toward (6,5) and deposited there; agent 1
    // scored that cell at deposit * trail_weight and followed.
    assert_eq!(world.agents[0].position, [6.0, 5.0]);
    assert_eq!(world.agents[1].position, [6.0, 5.0]);
}

#[test]
fn bias_outweighs_tiebreak_order() {
    let config = SimConfig {
        exploration: 0.0,
        ..wander_config(10, 10, 1)
    };
    // Brightness spike at cell (5, 6) only.
    let bias = BiasField::from_samples(10, 10, 1.0, |px, py| {
        if px == 5.0 && py == 6.0 {
            200.0
        } else {
            0.0
        }
    });
    let mut world = World::try_new_with_bias(config, bias).unwrap();
    world.agents[0] = Agent::new([5.0, 5.0], [0.0, 0.0]);

    world.step();

    assert_eq!(world.agents[0].position, [5.0, 6.0]);
}

#[test]
fn wander_positions_stay_in_bounds() {
    let mut world = World::try_new(wander_config(12, 7, 30)).unwrap();
    for _ in 0..300 {
        world.step();
        for agent in &world.agents {
            let (x, y) = agent.cell();
            assert!((0..12).contains(&x), "x={x} out of bounds");
            assert!((0..7).contains(&y), "y={y} out of bounds");
        }
    }
}

#[test]
fn scan_positions_stay_in_bounds() {
    let config = SimConfig {
        point_count: 20,
        ..scan_config(25)
    };
    let mut world = World::try_new(config).unwrap();
    for _ in 0..500 {
        world.step();
        for agent in &world.agents {
            assert!(
                (0.0..10.0).contains(&agent.position[0])
                    && (0.0..10.0).contains(&agent.position[1]),
                "position {:?} out of bounds",
                agent.position
            );
        }
    }
}

#[test]
fn untouched_cell_decays_by_exactly_the_evaporation_factor() {
    let mut world = World::try_new(scan_config(1)).unwrap();
    // Park the agent so nothing deposits this tick.
    world.agents[0] = Agent::new([0.0, 0.0], [0.0, 0.0]);
    world.pheromone.deposit(5, 5, 2.0);

    world.step();

    assert_eq!(world.pheromone().intensity_at(5, 5), 2.0f32 * 0.98);
}

#[test]
fn reset_with_zero_ticks_matches_configured_counts() {
    let config = SimConfig {
        point_count: 15,
        ..scan_config(8)
    };
    let mut world = World::try_new(config).unwrap();
    world.run_experiment(50, 10);
    world.reset();

    assert_eq!(world.agents.len(), 8);
    assert_eq!(world.points().len(), 15);
    assert_eq!(world.pheromone().total(), 0.0);
    assert_eq!(world.step_index(), 0);
    let stats = world.scan_stats();
    assert_eq!(stats.points_scanned, 0);
    assert_eq!(stats.threats_found, 0);
    assert_eq!(stats.live_events, 0);
}

#[test]
fn reset_replays_a_fresh_construction_exactly() {
    let config = SimConfig {
        point_count: 15,
        ..scan_config(8)
    };
    let mut run = World::try_new(config.clone()).unwrap();
    run.run_experiment(40, 40);
    run.reset();
    let fresh = World::try_new(config).unwrap();

    assert_eq!(run.agents, fresh.agents);
    assert_eq!(run.points(), fresh.points());
    assert_eq!(run.pheromone(), fresh.pheromone());
}

#[test]
fn identical_seeds_give_identical_wander_trajectories() {
    let config = wander_config(30, 30, 40);
    let mut a = World::try_new(config.clone()).unwrap();
    let mut b = World::try_new(config).unwrap();
    for _ in 0..150 {
        a.step();
        b.step();
        assert_eq!(a.agents, b.agents);
    }
    assert_eq!(a.pheromone(), b.pheromone());
}

#[test]
fn identical_seeds_give_identical_scan_runs() {
    let config = SimConfig {
        agent_count: 20,
        point_count: 30,
        ..SimConfig::file_scan()
    };
    let mut a = World::try_new(config.clone()).unwrap();
    let mut b = World::try_new(config).unwrap();
    for _ in 0..200 {
        a.step();
        b.step();
    }
    assert_eq!(a.agents, b.agents);
    assert_eq!(a.points(), b.points());
    assert_eq!(a.scan_stats().threats_found, b.scan_stats().threats_found);
}

#[test]
fn threat_within_radius_is_flagged_exactly_once() {
    let mut world = World::try_new(scan_config(1)).unwrap();
    world.detection.points.push(PointOfInterest {
        position: [3.0, 3.0],
        is_threat: true,
        scanned: false,
    });
    world.agents[0] = Agent::new([3.5, 3.0], [0.0, 0.0]);

    world.step();

    assert!(world.points()[0].scanned);
    let stats = world.scan_stats();
    assert_eq!(stats.points_scanned, 1);
    assert_eq!(stats.threats_found, 1);
    // One event, created with the configured lifetime and aged once by
    // the tick that created it.
    assert_eq!(world.events().len(), 1);
    assert_eq!(world.events()[0].remaining, world.config().detection_lifetime - 1);
    assert_eq!(world.events()[0].position, [3.0, 3.0]);
    // Pheromone deposited at the point's cell, then decayed once.
    assert_eq!(world.pheromone().intensity_at(3, 3), 5.0f32 * 0.98);

    // Lingering next to the point must not re-count it.
    world.step();
    let stats = world.scan_stats();
    assert_eq!(stats.points_scanned, 1);
    assert_eq!(stats.threats_found, 1);
    assert_eq!(world.events().len(), 1);
}

#[test]
fn benign_point_is_scanned_without_an_event() {
    let mut world = World::try_new(scan_config(1)).unwrap();
    world.detection.points.push(PointOfInterest {
        position: [3.0, 3.0],
        is_threat: false,
        scanned: false,
    });
    world.agents[0] = Agent::new([3.5, 3.0], [0.0, 0.0]);

    world.step();

    assert!(world.points()[0].scanned);
    assert_eq!(world.scan_stats().points_scanned, 1);
    assert_eq!(world.scan_stats().threats_found, 0);
    assert!(world.events().is_empty());
    assert_eq!(world.pheromone().total(), 0.0);
}

#[test]
fn point_outside_radius_stays_unscanned() {
    let mut world = World::try_new(scan_config(1)).unwrap();
    world.detection.points.push(PointOfInterest {
        position: [3.0, 3.0],
        is_threat: true,
        scanned: false,
    });
    world.agents[0] = Agent::new([3.0, 4.6], [0.0, 0.0]);

    world.step();

    assert!(!world.points()[0].scanned);
    assert_eq!(world.scan_stats().points_scanned, 0);
}

#[test]
fn detection_events_expire_after_their_lifetime_in_ticks() {
    let mut world = World::try_new(scan_config(1)).unwrap();
    world.agents[0] = Agent::new([0.0, 0.0], [0.0, 0.0]);
    world.detection.events.push(DetectionEvent {
        position: [3.0, 3.0],
        remaining: 20,
    });

    for _ in 0..19 {
        world.step();
    }
    assert_eq!(world.events().len(), 1);
    world.step();
    assert!(world.events().is_empty());
}

#[test]
fn rejects_bias_field_of_wrong_extent() {
    let config = wander_config(10, 10, 1);
    let bias = BiasField::flat(8, 10);
    let err = World::try_new_with_bias(config, bias).unwrap_err();
    assert_eq!(
        err,
        WorldInitError::BiasDimensionMismatch {
            expected: (10, 10),
            actual: (8, 10),
        }
    );
}

#[test]
fn invalid_config_is_reported_through_try_new() {
    let config = SimConfig {
        surface_width: 1.0,
        surface_height: 1.0,
        cell_size: 3.0,
        ..SimConfig::default()
    };
    match World::try_new(config) {
        Err(WorldInitError::Config(SimConfigError::DegenerateGrid { .. })) => {}
        other => panic!("expected degenerate-grid error, got {other:?}"),
    }
}

#[test]
fn run_experiment_samples_on_cadence_and_final_step() {
    let mut world = World::try_new(wander_config(20, 20, 10)).unwrap();
    let summary = world.try_run_experiment(10, 3).unwrap();
    let sampled: Vec<usize> = summary.samples.iter().map(|s| s.step).collect();
    assert_eq!(sampled, vec![3, 6, 9, 10]);
    assert!(summary.samples.last().unwrap().trail_total > 0.0);
}

#[test]
fn run_experiment_rejects_zero_cadence() {
    let mut world = World::try_new(wander_config(20, 20, 10)).unwrap();
    assert_eq!(
        world.try_run_experiment(10, 0),
        Err(ExperimentError::InvalidSampleEvery)
    );
}

#[test]
fn run_summary_serializes_with_schema_version() {
    let mut world = World::try_new(wander_config(20, 20, 10)).unwrap();
    let summary = world.try_run_experiment(5, 5).unwrap();
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"schema_version\":1"));
    let back: crate::world::RunSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back.samples.len(), summary.samples.len());
}

#[test]
fn wander_agents_spawn_on_integral_cells() {
    let world = World::try_new(wander_config(15, 9, 50)).unwrap();
    assert_eq!(world.agents.len(), 50);
    for agent in &world.agents {
        assert_eq!(agent.position[0].fract(), 0.0);
        assert_eq!(agent.position[1].fract(), 0.0);
        assert_eq!(agent.velocity, [0.0, 0.0]);
    }
}

#[test]
fn scan_mode_draws_threats_from_the_configured_probability() {
    let config = SimConfig {
        agent_count: 1,
        point_count: 500,
        threat_probability: 0.3,
        ..SimConfig::file_scan()
    };
    let world = World::try_new(config).unwrap();
    let threats = world.points().iter().filter(|p| p.is_threat).count();
    // Loose band around 150; the draw is seeded so this cannot flake.
    assert!((90..=210).contains(&threats), "threats={threats}");
    assert_eq!(world.config().movement, MovementMode::Scan);
}
