/// One mobile entity. Wander agents keep integral positions and a zero
/// velocity; scan agents drift sub-cell with a persistent velocity that
/// reflects off the grid walls. Stored by value in a `Vec` owned by the
/// world, so the hot tick loop does no per-agent allocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Agent {
    /// Grid-space position, kept inside `[0, cols) x [0, rows)`.
    pub position: [f64; 2],
    /// Cells per tick; unused (zero) in Wander mode.
    pub velocity: [f64; 2],
}

impl Agent {
    pub fn new(position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self { position, velocity }
    }

    /// Grid cell containing this agent.
    pub fn cell(&self) -> (i32, i32) {
        (self.position[0].floor() as i32, self.position[1].floor() as i32)
    }
}
