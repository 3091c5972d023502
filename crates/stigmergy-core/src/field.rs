/// Shared trail intensity grid, reinforced by agent deposits and weakened
/// by uniform per-tick evaporation. Intensities never go negative: deposits
/// only add validated non-negative amounts and decay multiplies by a factor
/// in (0, 1). No upper cap is applied; growth under loitering agents is
/// bounded only by evaporation.
#[derive(Clone, Debug, PartialEq)]
pub struct PheromoneField {
    cols: usize,
    rows: usize,
    data: Vec<f32>,
}

impl PheromoneField {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            data: vec![0.0; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.cols as i32 || y >= self.rows as i32 {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    /// Intensity at a cell; 0.0 for out-of-bounds coordinates, so a
    /// renderer may query generously.
    pub fn intensity_at(&self, x: i32, y: i32) -> f32 {
        self.index(x, y).map_or(0.0, |i| self.data[i])
    }

    /// Add `amount` to one cell. Out-of-bounds deposits are ignored; agent
    /// positions are kept in-bounds by the tick loop.
    pub fn deposit(&mut self, x: i32, y: i32, amount: f32) {
        if let Some(i) = self.index(x, y) {
            self.data[i] += amount;
        }
    }

    /// Multiply every cell by `factor`. Called exactly once per tick,
    /// after all agent moves, so agents score against pre-decay values.
    pub fn decay_all(&mut self, factor: f32) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    pub fn total(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }

    pub fn max_intensity(&self) -> f32 {
        self.data.iter().copied().fold(0.0, f32::max)
    }

    /// Cells with intensity strictly above `threshold`, for sparse-draw
    /// renderers that skip near-empty cells.
    pub fn cells_above(&self, threshold: f32) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter_map(move |(i, &v)| (v > threshold).then_some((i % self.cols, i / self.cols, v)))
    }
}
