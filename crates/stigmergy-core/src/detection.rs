use serde::{Deserialize, Serialize};

/// A placed file-like entity. `is_threat` is fixed at placement;
/// `scanned` flips once, the first time any agent comes within the
/// detection radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub position: [f64; 2],
    pub is_threat: bool,
    pub scanned: bool,
}

/// Transient trace of a threat detection, aged once per tick and dropped
/// when its lifetime runs out. Audit/visual trail only, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    pub position: [f64; 2],
    pub remaining: u32,
}

/// Points of interest plus the live detection events and running
/// counters over them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionRegistry {
    pub(crate) points: Vec<PointOfInterest>,
    pub(crate) events: Vec<DetectionEvent>,
    pub(crate) points_scanned: usize,
    pub(crate) threats_found: usize,
}

impl DetectionRegistry {
    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    pub fn events(&self) -> &[DetectionEvent] {
        &self.events
    }

    /// Points scanned since the last reset. Each point counts once.
    pub fn points_scanned(&self) -> usize {
        self.points_scanned
    }

    /// Threatening points found since the last reset. Each counts once.
    pub fn threats_found(&self) -> usize {
        self.threats_found
    }

    pub(crate) fn clear(&mut self) {
        self.points.clear();
        self.events.clear();
        self.points_scanned = 0;
        self.threats_found = 0;
    }

    /// Age every live event by one tick and drop the expired ones.
    pub(crate) fn age_events(&mut self) {
        for event in &mut self.events {
            event.remaining = event.remaining.saturating_sub(1);
        }
        self.events.retain(|event| event.remaining > 0);
    }
}
