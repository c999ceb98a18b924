//! The viewport - what portion of the document is visible.

/// Visible window into the document: top-left offsets plus size. The size
/// excludes the status and message bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// First visible row index.
    pub row_off: usize,
    /// First visible rendered column.
    pub col_off: usize,
    /// Visible text rows.
    pub screen_rows: usize,
    /// Visible columns.
    pub screen_cols: usize,
}

impl Viewport {
    pub fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            row_off: 0,
            col_off: 0,
            screen_rows,
            screen_cols,
        }
    }

    /// Update terminal dimensions.
    pub fn resize(&mut self, screen_rows: usize, screen_cols: usize) {
        self.screen_rows = screen_rows;
        self.screen_cols = screen_cols;
    }

    /// Recompute the offsets so the cursor's `(cy, rx)` lies inside the
    /// visible window. Called once per frame, after any cursor motion.
    pub fn scroll(&mut self, cy: usize, rx: usize) {
        if cy < self.row_off {
            self.row_off = cy;
        }
        if self.screen_rows > 0 && cy >= self.row_off + self.screen_rows {
            self.row_off = cy - self.screen_rows + 1;
        }
        if rx < self.col_off {
            self.col_off = rx;
        }
        if self.screen_cols > 0 && rx >= self.col_off + self.screen_cols {
            self.col_off = rx - self.screen_cols + 1;
        }
    }

    /// Whether `(cy, rx)` is currently visible.
    pub fn contains(&self, cy: usize, rx: usize) -> bool {
        cy >= self.row_off
            && cy < self.row_off + self.screen_rows
            && rx >= self.col_off
            && rx < self.col_off + self.screen_cols
    }
}
