use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Movement model an agent follows each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    /// Discrete four-direction walk scored by bias + trail intensity.
    Wander,
    /// Continuous sub-cell motion with wall reflection and proximity
    /// detection of points of interest.
    Scan,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Deterministic seed for reproducible simulation runs.
    pub seed: u64,
    /// Host-provided surface width (pixels or any continuous unit).
    pub surface_width: f64,
    /// Host-provided surface height.
    pub surface_height: f64,
    /// Edge length of one grid cell in surface units.
    pub cell_size: f64,
    /// Agent movement model.
    pub movement: MovementMode,
    /// Number of agents spawned at construction and on reset.
    pub agent_count: usize,
    /// Multiplicative per-tick evaporation factor, in (0, 1).
    pub evaporation: f32,
    /// Pheromone added per move (Wander) or per threat detection (Scan).
    pub deposit: f32,
    /// Probability of discarding the scored move for a uniformly random
    /// direction.
    pub exploration: f64,
    /// Weight of trail intensity relative to the static bias when scoring
    /// neighbor cells.
    pub trail_weight: f32,
    /// Points of interest placed at construction and on reset (Scan mode;
    /// 0 disables detection entirely).
    pub point_count: usize,
    /// Probability that a freshly placed point of interest is a threat.
    pub threat_probability: f64,
    /// Euclidean detection radius around an agent, in cells.
    pub detection_radius: f64,
    /// Initial remaining lifetime of a detection event, in ticks.
    pub detection_lifetime: u32,
    /// Width of the uniform interval spawn velocity components are drawn
    /// from, centered on zero (Scan mode).
    pub initial_speed: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            surface_width: 600.0,
            surface_height: 600.0,
            cell_size: 3.0,
            movement: MovementMode::Wander,
            agent_count: 220,
            evaporation: 0.995,
            deposit: 4.0,
            exploration: 0.25,
            trail_weight: 15.0,
            point_count: 0,
            threat_probability: 0.3,
            detection_radius: 1.5,
            detection_lifetime: 20,
            initial_speed: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimConfigError {
    CellSizeOutOfRange(f64),
    SurfaceOutOfRange { width: f64, height: f64 },
    DegenerateGrid { cols: usize, rows: usize },
    TooManyCells { max: usize, actual: usize },
    ZeroAgents,
    TooManyAgents { max: usize, actual: usize },
    TooManyPoints { max: usize, actual: usize },
    EvaporationOutOfRange(f32),
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    RateOutOfRange { name: &'static str, value: f64 },
}

impl fmt::Display for SimConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimConfigError::CellSizeOutOfRange(v) => {
                write!(f, "cell_size ({v}) must be positive and finite")
            }
            SimConfigError::SurfaceOutOfRange { width, height } => write!(
                f,
                "surface extent ({width} x {height}) must be positive and finite"
            ),
            SimConfigError::DegenerateGrid { cols, rows } => write!(
                f,
                "surface resolves to a degenerate {cols} x {rows} cell grid"
            ),
            SimConfigError::TooManyCells { max, actual } => {
                write!(f, "grid cell count ({actual}) exceeds supported maximum ({max})")
            }
            SimConfigError::ZeroAgents => write!(f, "agent_count must be positive"),
            SimConfigError::TooManyAgents { max, actual } => {
                write!(f, "agent_count ({actual}) exceeds supported maximum ({max})")
            }
            SimConfigError::TooManyPoints { max, actual } => {
                write!(f, "point_count ({actual}) exceeds supported maximum ({max})")
            }
            SimConfigError::EvaporationOutOfRange(v) => {
                write!(f, "evaporation ({v}) must lie strictly inside (0, 1)")
            }
            SimConfigError::ProbabilityOutOfRange { name, value } => {
                write!(f, "{name} ({value}) must lie in [0, 1]")
            }
            SimConfigError::RateOutOfRange { name, value } => {
                write!(f, "{name} ({value}) must be non-negative and finite")
            }
        }
    }
}

impl Error for SimConfigError {}

impl SimConfig {
    pub const MAX_TOTAL_AGENTS: usize = 100_000;
    pub const MAX_TOTAL_CELLS: usize = 4_194_304;
    pub const MAX_TOTAL_POINTS: usize = 65_536;

    /// Preset reproducing the file-scan demonstration: a coarse 80 x 40
    /// grid swept by drifting agents that flag threatening files.
    pub fn file_scan() -> Self {
        Self {
            surface_width: 800.0,
            surface_height: 400.0,
            cell_size: 10.0,
            movement: MovementMode::Scan,
            agent_count: 50,
            evaporation: 0.98,
            deposit: 5.0,
            exploration: 0.0,
            point_count: 80,
            ..Self::default()
        }
    }

    /// Grid width in cells, derived from the surface extent.
    pub fn cols(&self) -> usize {
        (self.surface_width / self.cell_size).floor() as usize
    }

    /// Grid height in cells.
    pub fn rows(&self) -> usize {
        (self.surface_height / self.cell_size).floor() as usize
    }

    pub fn validate(&self) -> Result<(), SimConfigError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(SimConfigError::CellSizeOutOfRange(self.cell_size));
        }
        if !self.surface_width.is_finite()
            || !self.surface_height.is_finite()
            || self.surface_width <= 0.0
            || self.surface_height <= 0.0
        {
            return Err(SimConfigError::SurfaceOutOfRange {
                width: self.surface_width,
                height: self.surface_height,
            });
        }
        let (cols, rows) = (self.cols(), self.rows());
        if cols == 0 || rows == 0 {
            return Err(SimConfigError::DegenerateGrid { cols, rows });
        }
        let cells = cols
            .checked_mul(rows)
            .ok_or(SimConfigError::TooManyCells {
                max: Self::MAX_TOTAL_CELLS,
                actual: usize::MAX,
            })?;
        if cells > Self::MAX_TOTAL_CELLS {
            return Err(SimConfigError::TooManyCells {
                max: Self::MAX_TOTAL_CELLS,
                actual: cells,
            });
        }
        if self.agent_count == 0 {
            return Err(SimConfigError::ZeroAgents);
        }
        if self.agent_count > Self::MAX_TOTAL_AGENTS {
            return Err(SimConfigError::TooManyAgents {
                max: Self::MAX_TOTAL_AGENTS,
                actual: self.agent_count,
            });
        }
        if self.point_count > Self::MAX_TOTAL_POINTS {
            return Err(SimConfigError::TooManyPoints {
                max: Self::MAX_TOTAL_POINTS,
                actual: self.point_count,
            });
        }
        if !self.evaporation.is_finite() || self.evaporation <= 0.0 || self.evaporation >= 1.0 {
            return Err(SimConfigError::EvaporationOutOfRange(self.evaporation));
        }
        for (name, value) in [
            ("exploration", self.exploration),
            ("threat_probability", self.threat_probability),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SimConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        for (name, value) in [
            ("deposit", self.deposit as f64),
            ("trail_weight", self.trail_weight as f64),
            ("detection_radius", self.detection_radius),
            ("initial_speed", self.initial_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimConfigError::RateOutOfRange { name, value });
            }
        }
        Ok(())
    }
}
