use super::World;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Intensity below which a cell is not counted as carrying a visible
/// trail (the sparse-draw cutoff renderers use).
pub const ACTIVE_TRAIL_THRESHOLD: f32 = 0.4;

/// Wall-clock cost of one tick, split by phase.
#[derive(Clone, Debug)]
pub struct StepTimings {
    pub move_us: u64,
    pub decay_us: u64,
    pub total_us: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StepMetrics {
    pub step: usize,
    pub trail_total: f64,
    pub trail_max: f32,
    pub active_cells: usize,
    pub points_scanned: usize,
    pub threats_found: usize,
    pub live_events: usize,
    /// Fraction of placed points scanned so far; 0 when none are placed.
    pub scan_progress: f32,
}

/// Point-in-time counters over the detection registry.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ScanStats {
    pub points_total: usize,
    pub points_scanned: usize,
    pub threats_found: usize,
    pub live_events: usize,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub steps: usize,
    pub sample_every: usize,
    pub samples: Vec<StepMetrics>,
    pub final_points_scanned: usize,
    pub final_threats_found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    InvalidSampleEvery,
    TooManySteps { max: usize, actual: usize },
    TooManySamples { max: usize, actual: usize },
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::InvalidSampleEvery => write!(f, "sample_every must be positive"),
            ExperimentError::TooManySteps { max, actual } => {
                write!(f, "steps ({actual}) exceed supported maximum ({max})")
            }
            ExperimentError::TooManySamples { max, actual } => {
                write!(f, "sample count ({actual}) exceeds supported maximum ({max})")
            }
        }
    }
}

impl Error for ExperimentError {}

impl World {
    pub const MAX_EXPERIMENT_STEPS: usize = 1_000_000;
    pub const MAX_EXPERIMENT_SAMPLES: usize = 50_000;

    pub fn scan_stats(&self) -> ScanStats {
        ScanStats {
            points_total: self.detection.points().len(),
            points_scanned: self.detection.points_scanned(),
            threats_found: self.detection.threats_found(),
            live_events: self.detection.events().len(),
        }
    }

    pub(crate) fn collect_step_metrics(&self, step: usize) -> StepMetrics {
        let points_total = self.detection.points().len();
        let points_scanned = self.detection.points_scanned();
        StepMetrics {
            step,
            trail_total: self.pheromone.total(),
            trail_max: self.pheromone.max_intensity(),
            active_cells: self.pheromone.cells_above(ACTIVE_TRAIL_THRESHOLD).count(),
            points_scanned,
            threats_found: self.detection.threats_found(),
            live_events: self.detection.events().len(),
            scan_progress: if points_total > 0 {
                points_scanned as f32 / points_total as f32
            } else {
                0.0
            },
        }
    }

    pub fn run_experiment(&mut self, steps: usize, sample_every: usize) -> RunSummary {
        self.try_run_experiment(steps, sample_every)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Advance `steps` ticks, sampling metrics every `sample_every` ticks
    /// (and always on the final tick).
    pub fn try_run_experiment(
        &mut self,
        steps: usize,
        sample_every: usize,
    ) -> Result<RunSummary, ExperimentError> {
        if sample_every == 0 {
            return Err(ExperimentError::InvalidSampleEvery);
        }
        if steps > Self::MAX_EXPERIMENT_STEPS {
            return Err(ExperimentError::TooManySteps {
                max: Self::MAX_EXPERIMENT_STEPS,
                actual: steps,
            });
        }
        let estimated_samples = if steps == 0 {
            0
        } else {
            ((steps - 1) / sample_every) + 1
        };
        if estimated_samples > Self::MAX_EXPERIMENT_SAMPLES {
            return Err(ExperimentError::TooManySamples {
                max: Self::MAX_EXPERIMENT_SAMPLES,
                actual: estimated_samples,
            });
        }

        let mut samples = Vec::with_capacity(estimated_samples);
        for step in 1..=steps {
            self.step();
            if step % sample_every == 0 || step == steps {
                samples.push(self.collect_step_metrics(step));
            }
        }
        Ok(RunSummary {
            schema_version: 1,
            steps,
            sample_every,
            samples,
            final_points_scanned: self.detection.points_scanned(),
            final_threats_found: self.detection.threats_found(),
        })
    }
}
