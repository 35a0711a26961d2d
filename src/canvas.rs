use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::grid::{BLANK, CellGrid, GridSize};
use crate::input::CellEvent;

/// Light border drawn around each cell
pub const CELL_BORDER: Color32 = Color32::from_rgb(0xF3, 0xF4, 0xF6);
/// Border drawn around the whole grid
pub const GRID_BORDER: Color32 = Color32::from_rgb(0xD1, 0xD5, 0xDB);

/// How the grid region looks, both on screen and in exported images
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasStyle {
    /// Edge length of the whole canvas region, padding included
    pub canvas_px: f32,
    /// White margin between the region edge and the cells
    pub padding_px: f32,
    pub show_cell_borders: bool,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            canvas_px: 500.0,
            padding_px: 16.0,
            show_cell_borders: true,
        }
    }
}

/// Maps a screen rectangle onto the cells of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// The full region, padding included
    pub outer: Rect,
    /// The part covered by cells
    pub grid: Rect,
    side: usize,
    cell_size: f32,
}

impl CanvasLayout {
    pub fn new(outer: Rect, size: GridSize, padding: f32) -> Self {
        let grid = outer.shrink(padding);
        let side = size.get();
        let cell_size = grid.width().min(grid.height()) / side as f32;
        let grid = Rect::from_min_size(grid.min, Vec2::splat(cell_size * side as f32));
        Self {
            outer,
            grid,
            side,
            cell_size,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn cell_rect(&self, index: usize) -> Rect {
        let col = (index % self.side) as f32;
        let row = (index / self.side) as f32;
        Rect::from_min_size(
            self.grid.min + Vec2::new(col, row) * self.cell_size,
            Vec2::splat(self.cell_size),
        )
    }

    /// Index of the cell under `pos`, or `None` outside the grid
    pub fn cell_at(&self, pos: Pos2) -> Option<usize> {
        if !self.grid.contains(pos) || self.cell_size <= 0.0 {
            return None;
        }
        let last = self.side - 1;
        let col = (((pos.x - self.grid.min.x) / self.cell_size) as usize).min(last);
        let row = (((pos.y - self.grid.min.y) / self.cell_size) as usize).min(last);
        Some(row * self.side + col)
    }

    /// Cells on the straight line from `from` to `to`, excluding `from`.
    pub fn cells_between(&self, from: usize, to: usize) -> Vec<usize> {
        let side = self.side as i64;
        let (mut x, mut y) = (from as i64 % side, from as i64 / side);
        let (x1, y1) = (to as i64 % side, to as i64 / side);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut cells = Vec::new();
        while (x, y) != (x1, y1) {
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            cells.push((y * side + x) as usize);
        }
        cells
    }
}

/// Tracks the hovered cell between frames and emits [`CellEvent`]s.
#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    last_cell: Option<usize>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the hovered cell, e.g. after the grid was resized
    pub fn reset(&mut self) {
        self.last_cell = None;
    }

    pub fn update(
        &mut self,
        layout: &CanvasLayout,
        pointer_pos: Option<Pos2>,
        pressed: bool,
        released: bool,
    ) -> Vec<CellEvent> {
        let current = pointer_pos.and_then(|pos| layout.cell_at(pos));
        let mut events = Vec::new();

        match (self.last_cell, current) {
            (Some(prev), Some(cur)) if prev != cur => {
                // Fill cells skipped by a fast drag
                events.extend(layout.cells_between(prev, cur).into_iter().map(CellEvent::Enter));
            }
            (None, Some(cur)) => events.push(CellEvent::Enter(cur)),
            (Some(_), None) => events.push(CellEvent::LeaveCanvas),
            _ => {}
        }

        if pressed {
            if let Some(cur) = current {
                events.push(CellEvent::Down(cur));
            }
        }
        if released {
            events.push(CellEvent::Up);
        }

        self.last_cell = current;
        events
    }
}

/// Paints the canvas region: white background, cells, and borders
pub fn paint_grid(painter: &Painter, layout: &CanvasLayout, grid: &CellGrid, style: &CanvasStyle) {
    painter.rect_filled(layout.outer, 0.0, BLANK);

    for (index, color) in grid.cells().iter().enumerate() {
        let rect = layout.cell_rect(index);
        painter.rect_filled(rect, 0.0, *color);
        if style.show_cell_borders {
            painter.rect_stroke(rect, 0.0, Stroke::new(1.0, CELL_BORDER));
        }
    }

    painter.rect_stroke(layout.grid, 0.0, Stroke::new(1.0, GRID_BORDER));
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn layout_8() -> CanvasLayout {
        let outer = Rect::from_min_size(pos2(0.0, 0.0), Vec2::splat(96.0));
        CanvasLayout::new(outer, GridSize::new(8).unwrap(), 8.0)
    }

    #[test]
    fn test_cell_centres_hit_their_own_index() {
        let layout = layout_8();
        assert_eq!(layout.cell_size(), 10.0);
        for index in 0..64 {
            let centre = layout.cell_rect(index).center();
            assert_eq!(layout.cell_at(centre), Some(index));
        }
    }

    #[test]
    fn test_points_outside_grid_miss() {
        let layout = layout_8();
        assert_eq!(layout.cell_at(pos2(4.0, 4.0)), None);
        assert_eq!(layout.cell_at(pos2(90.0, 50.0)), None);
        assert_eq!(layout.cell_at(pos2(-1.0, -1.0)), None);
        // The far edge still belongs to the last cell
        assert_eq!(layout.cell_at(pos2(88.0, 88.0)), Some(63));
    }

    #[test]
    fn test_cells_between_diagonal() {
        let layout = layout_8();
        assert_eq!(layout.cells_between(0, 27), vec![9, 18, 27]);
        assert_eq!(layout.cells_between(3, 0), vec![2, 1, 0]);
        assert!(layout.cells_between(5, 5).is_empty());
    }

    #[test]
    fn test_tracker_emits_enter_and_leave() {
        let layout = layout_8();
        let mut tracker = PointerTracker::new();

        let inside = layout.cell_rect(0).center();
        assert_eq!(
            tracker.update(&layout, Some(inside), false, false),
            vec![CellEvent::Enter(0)]
        );
        // Same cell again: nothing new
        assert!(tracker.update(&layout, Some(inside), false, false).is_empty());
        assert_eq!(
            tracker.update(&layout, None, false, false),
            vec![CellEvent::LeaveCanvas]
        );
    }

    #[test]
    fn test_tracker_press_and_release() {
        let layout = layout_8();
        let mut tracker = PointerTracker::new();
        let pos = layout.cell_rect(9).center();

        assert_eq!(
            tracker.update(&layout, Some(pos), true, false),
            vec![CellEvent::Enter(9), CellEvent::Down(9)]
        );
        assert_eq!(
            tracker.update(&layout, Some(pos), false, true),
            vec![CellEvent::Up]
        );
    }

    #[test]
    fn test_paint_grid_runs_on_headless_context() {
        let ctx = egui::Context::default();
        let layout = layout_8();
        let painter = Painter::new(ctx, egui::LayerId::background(), layout.outer);
        let grid = CellGrid::new(GridSize::new(8).unwrap());

        paint_grid(&painter, &layout, &grid, &CanvasStyle::default());
    }
}
