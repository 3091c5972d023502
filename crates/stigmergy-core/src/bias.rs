/// Static per-cell movement preference, e.g. sampled brightness of a
/// background image. Computed once from its source and never mutated;
/// re-initialization means building a fresh field.
#[derive(Clone, Debug, PartialEq)]
pub struct BiasField {
    cols: usize,
    rows: usize,
    data: Vec<f32>,
}

impl BiasField {
    /// All-zero field for when no external source is configured. The
    /// simulation then degrades to pure pheromone + random-walk behavior.
    pub fn flat(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            data: vec![0.0; cols * rows],
        }
    }

    /// One-time O(cols * rows) precomputation. `sample` is called with the
    /// surface coordinate of each cell's origin (`cx * cell_size`,
    /// `cy * cell_size`), matching a pixel-brightness accessor.
    pub fn from_samples<F>(cols: usize, rows: usize, cell_size: f64, mut sample: F) -> Self
    where
        F: FnMut(f64, f64) -> f32,
    {
        let mut data = Vec::with_capacity(cols * rows);
        for cy in 0..rows {
            for cx in 0..cols {
                data.push(sample(cx as f64 * cell_size, cy as f64 * cell_size));
            }
        }
        Self { cols, rows, data }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Preference value at a cell; 0.0 out of bounds.
    pub fn value_at(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x >= self.cols as i32 || y >= self.rows as i32 {
            return 0.0;
        }
        self.data[y as usize * self.cols + x as usize]
    }
}
