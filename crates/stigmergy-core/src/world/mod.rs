pub mod metrics;
mod tick;
#[cfg(test)]
mod tests;

pub use metrics::*;

use crate::agent::Agent;
use crate::bias::BiasField;
use crate::config::{MovementMode, SimConfig, SimConfigError};
use crate::detection::{DetectionEvent, DetectionRegistry, PointOfInterest};
use crate::field::PheromoneField;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::{error::Error, fmt};

/// Single-threaded, tick-driven simulation state. One external driver
/// (typically a render loop) calls [`World::step`] once per frame and
/// reads the field, agents, and detection registry afterwards. All state
/// is owned here; there are no module-level globals.
#[derive(Debug)]
pub struct World {
    pub agents: Vec<Agent>,
    pub(crate) config: SimConfig,
    pub(crate) pheromone: PheromoneField,
    pub(crate) bias: BiasField,
    pub(crate) detection: DetectionRegistry,
    pub(crate) rng: ChaCha12Rng,
    pub(crate) step_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldInitError {
    Config(SimConfigError),
    BiasDimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

impl fmt::Display for WorldInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldInitError::Config(e) => write!(f, "{}", e),
            WorldInitError::BiasDimensionMismatch { expected, actual } => write!(
                f,
                "bias field is {} x {} cells but the configured grid is {} x {}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl From<SimConfigError> for WorldInitError {
    fn from(err: SimConfigError) -> Self {
        WorldInitError::Config(err)
    }
}

impl Error for WorldInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldInitError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl World {
    pub fn new(config: SimConfig) -> Self {
        Self::try_new(config).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Build a world with no external bias source: the bias field is flat
    /// zero and movement degrades to pheromone + random walk.
    pub fn try_new(config: SimConfig) -> Result<Self, WorldInitError> {
        config.validate()?;
        let bias = BiasField::flat(config.cols(), config.rows());
        Ok(Self::assemble(config, bias))
    }

    /// Build a world steered by a precomputed bias field. The field's
    /// dimensions must match the grid derived from the config.
    pub fn try_new_with_bias(config: SimConfig, bias: BiasField) -> Result<Self, WorldInitError> {
        config.validate()?;
        let expected = (config.cols(), config.rows());
        let actual = (bias.cols(), bias.rows());
        if expected != actual {
            return Err(WorldInitError::BiasDimensionMismatch { expected, actual });
        }
        Ok(Self::assemble(config, bias))
    }

    fn assemble(config: SimConfig, bias: BiasField) -> Self {
        let (cols, rows) = (config.cols(), config.rows());
        let mut world = Self {
            agents: Vec::with_capacity(config.agent_count),
            pheromone: PheromoneField::new(cols, rows),
            bias,
            detection: DetectionRegistry::default(),
            rng: ChaCha12Rng::seed_from_u64(config.seed),
            step_index: 0,
            config,
        };
        world.spawn_population();
        world
    }

    /// Reinitialize to the state of a freshly constructed world: zeroed
    /// field, fresh agents and points, no events, counters at zero. The
    /// RNG is reseeded from the configured seed so a reset run replays a
    /// fresh run exactly.
    pub fn reset(&mut self) {
        self.rng = ChaCha12Rng::seed_from_u64(self.config.seed);
        self.pheromone.clear();
        self.detection.clear();
        self.agents.clear();
        self.step_index = 0;
        self.spawn_population();
    }

    fn spawn_population(&mut self) {
        let (cols, rows) = (self.pheromone.cols(), self.pheromone.rows());
        for _ in 0..self.config.agent_count {
            let position = [
                self.rng.random_range(0..cols) as f64,
                self.rng.random_range(0..rows) as f64,
            ];
            let velocity = match self.config.movement {
                MovementMode::Wander => [0.0, 0.0],
                MovementMode::Scan => [
                    (self.rng.random::<f64>() - 0.5) * self.config.initial_speed,
                    (self.rng.random::<f64>() - 0.5) * self.config.initial_speed,
                ],
            };
            self.agents.push(Agent::new(position, velocity));
        }
        if self.config.movement == MovementMode::Scan {
            for _ in 0..self.config.point_count {
                let position = [
                    self.rng.random_range(0..cols) as f64,
                    self.rng.random_range(0..rows) as f64,
                ];
                let is_threat = self.rng.random::<f64>() < self.config.threat_probability;
                self.detection.points.push(PointOfInterest {
                    position,
                    is_threat,
                    scanned: false,
                });
            }
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn pheromone(&self) -> &PheromoneField {
        &self.pheromone
    }

    pub fn bias(&self) -> &BiasField {
        &self.bias
    }

    pub fn detection(&self) -> &DetectionRegistry {
        &self.detection
    }

    pub fn points(&self) -> &[PointOfInterest] {
        self.detection.points()
    }

    pub fn events(&self) -> &[DetectionEvent] {
        self.detection.events()
    }

    /// Ticks advanced since construction or the last reset.
    pub fn step_index(&self) -> usize {
        self.step_index
    }
}
