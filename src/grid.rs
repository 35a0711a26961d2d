use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Color every cell starts with, and the color the eraser paints
pub const BLANK: Color32 = Color32::WHITE;

/// Number of cells along one side of the grid.
///
/// Only the sizes offered by the size slider can be constructed:
/// `MIN..=MAX` in steps of `STEP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct GridSize(usize);

impl GridSize {
    pub const MIN: usize = 8;
    pub const MAX: usize = 32;
    pub const STEP: usize = 8;

    pub fn new(size: usize) -> Result<Self, GridError> {
        if (Self::MIN..=Self::MAX).contains(&size) && size % Self::STEP == 0 {
            Ok(Self(size))
        } else {
            Err(GridError::UnsupportedSize(size))
        }
    }

    /// All supported sizes, smallest first
    pub fn all() -> impl Iterator<Item = GridSize> {
        (Self::MIN..=Self::MAX).step_by(Self::STEP).map(GridSize)
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn cell_count(self) -> usize {
        self.0 * self.0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self(16)
    }
}

impl TryFrom<usize> for GridSize {
    type Error = GridError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// The pixel grid: `size * size` colors stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    size: GridSize,
    cells: Vec<Color32>,
}

impl Default for CellGrid {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}

impl CellGrid {
    /// Creates an all-white grid
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![BLANK; size.cell_count()],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Color32] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Color32> {
        self.cells.get(index).copied()
    }

    /// Replaces the color of one cell. The grid is left untouched if `index`
    /// is out of range.
    pub fn set_cell_color(&mut self, index: usize, color: Color32) -> Result<(), GridError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(GridError::IndexOutOfBounds { index, len })?;
        *cell = color;
        Ok(())
    }

    /// Reallocates the grid at `new_size`. Previous pixels are discarded,
    /// even when the size does not change.
    pub fn resize(&mut self, new_size: GridSize) {
        log::info!("Resizing grid from {} to {}", self.size, new_size);
        *self = Self::new(new_size);
    }

    /// Whitens every cell, keeping the current size
    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    pub fn index_of(&self, col: usize, row: usize) -> Option<usize> {
        let side = self.size.get();
        (col < side && row < side).then(|| row * side + col)
    }

    /// Returns `(col, row)` for a cell index
    pub fn position_of(&self, index: usize) -> Option<(usize, usize)> {
        let side = self.size.get();
        (index < self.cells.len()).then(|| (index % side, index / side))
    }
}
