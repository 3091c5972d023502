use super::metrics::StepTimings;
use super::World;
use crate::config::MovementMode;
use crate::detection::DetectionEvent;
use crate::spatial;
use rand::Rng;
use std::time::Instant;

/// Candidate moves in fixed evaluation order. Score ties resolve to the
/// earliest entry, so the order is part of the movement contract.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl World {
    /// Advance exactly one tick: move every agent (deposits land inline,
    /// so later agents in the pass see earlier agents' trail), then decay
    /// the field once, then age out detection events.
    pub fn step(&mut self) -> StepTimings {
        let total_start = Instant::now();
        self.step_index = self.step_index.saturating_add(1);

        let t0 = Instant::now();
        match self.config.movement {
            MovementMode::Wander => self.step_wander_phase(),
            MovementMode::Scan => self.step_scan_phase(),
        }
        let move_us = t0.elapsed().as_micros() as u64;

        let t1 = Instant::now();
        self.pheromone.decay_all(self.config.evaporation);
        self.detection.age_events();
        let decay_us = t1.elapsed().as_micros() as u64;

        StepTimings {
            move_us,
            decay_us,
            total_us: total_start.elapsed().as_micros() as u64,
        }
    }

    /// Greedy-with-random-restart local walk over the combined bias +
    /// trail score. Not a global optimizer and it never converges to one.
    fn step_wander_phase(&mut self) {
        let cols = self.pheromone.cols() as i32;
        let rows = self.pheromone.rows() as i32;
        for i in 0..self.agents.len() {
            let (cx, cy) = self.agents[i].cell();

            let mut best: Option<(i32, i32)> = None;
            let mut best_score = f32::NEG_INFINITY;
            for &(dx, dy) in &DIRECTIONS {
                let nx = cx + dx;
                let ny = cy + dy;
                if nx < 0 || ny < 0 || nx >= cols || ny >= rows {
                    continue;
                }
                let score = self.bias.value_at(nx, ny)
                    + self.pheromone.intensity_at(nx, ny) * self.config.trail_weight;
                if score > best_score {
                    best_score = score;
                    best = Some((dx, dy));
                }
            }

            // Exploration override: one RNG draw when a scored choice
            // exists, an unconditional random pick when cornered.
            let (dx, dy) = match best {
                Some(dir) if self.rng.random::<f64>() >= self.config.exploration => dir,
                _ => DIRECTIONS[self.rng.random_range(0..DIRECTIONS.len())],
            };

            let nx = (cx + dx).clamp(0, cols - 1);
            let ny = (cy + dy).clamp(0, rows - 1);
            self.agents[i].position = [nx as f64, ny as f64];
            self.pheromone.deposit(nx, ny, self.config.deposit);
        }
    }

    /// Continuous drift with wall reflection; each agent scans the point
    /// index around its new position and flags first-time detections.
    fn step_scan_phase(&mut self) {
        let cols = self.pheromone.cols() as f64;
        let rows = self.pheromone.rows() as f64;
        let tree = spatial::build_index(&self.detection.points);

        for i in 0..self.agents.len() {
            let agent = &mut self.agents[i];
            agent.position[0] += agent.velocity[0];
            agent.position[1] += agent.velocity[1];

            if agent.position[0] < 0.0 || agent.position[0] > cols - 1.0 {
                agent.velocity[0] = -agent.velocity[0];
            }
            if agent.position[1] < 0.0 || agent.position[1] > rows - 1.0 {
                agent.velocity[1] = -agent.velocity[1];
            }
            agent.position[0] = agent.position[0].clamp(0.0, cols - 1.0);
            agent.position[1] = agent.position[1].clamp(0.0, rows - 1.0);
            let center = agent.position;

            for idx in spatial::query_within(&tree, center, self.config.detection_radius) {
                let (is_threat, position) = {
                    let point = &mut self.detection.points[idx];
                    if point.scanned {
                        continue;
                    }
                    point.scanned = true;
                    (point.is_threat, point.position)
                };
                self.detection.points_scanned += 1;
                if is_threat {
                    self.detection.threats_found += 1;
                    self.pheromone.deposit(
                        position[0].floor() as i32,
                        position[1].floor() as i32,
                        self.config.deposit,
                    );
                    self.detection.events.push(DetectionEvent {
                        position,
                        remaining: self.config.detection_lifetime,
                    });
                }
            }
        }
    }
}
