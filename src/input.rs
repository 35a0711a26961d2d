use egui::Color32;

use crate::error::GridError;
use crate::grid::CellGrid;
use crate::tools::{Tool, ToolState};

/// Pointer events, already resolved to grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEvent {
    /// Primary button pressed over a cell
    Down(usize),
    /// Pointer moved onto a cell
    Enter(usize),
    /// Primary button released
    Up,
    /// Pointer left the canvas bounds
    LeaveCanvas,
}

/// Turns cell-level pointer events into paint commands on a [`CellGrid`].
///
/// A drag paints every cell the pointer enters while the button is held;
/// hovering with no button held paints nothing.
#[derive(Debug, Default, Clone)]
pub struct InteractionController {
    tool_state: ToolState,
    drawing: bool,
}

impl InteractionController {
    pub fn new(tool_state: ToolState) -> Self {
        Self {
            tool_state,
            drawing: false,
        }
    }

    pub fn tool_state(&self) -> ToolState {
        self.tool_state
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.tool_state.tool != tool {
            log::info!("Tool selected: {}", tool.name());
        }
        self.tool_state.tool = tool;
    }

    pub fn select_color(&mut self, color: Color32) {
        self.tool_state.color = color;
    }

    pub fn on_pointer_down(&mut self, grid: &mut CellGrid, index: usize) -> Result<(), GridError> {
        self.drawing = true;
        self.paint(grid, index)
    }

    pub fn on_pointer_enter(&mut self, grid: &mut CellGrid, index: usize) -> Result<(), GridError> {
        if self.drawing {
            self.paint(grid, index)
        } else {
            Ok(())
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.drawing = false;
    }

    pub fn on_pointer_leave_canvas(&mut self) {
        self.drawing = false;
    }

    pub fn handle(&mut self, grid: &mut CellGrid, event: CellEvent) -> Result<(), GridError> {
        match event {
            CellEvent::Down(index) => self.on_pointer_down(grid, index),
            CellEvent::Enter(index) => self.on_pointer_enter(grid, index),
            CellEvent::Up => {
                self.on_pointer_up();
                Ok(())
            }
            CellEvent::LeaveCanvas => {
                self.on_pointer_leave_canvas();
                Ok(())
            }
        }
    }

    /// Applies events in delivery order, stopping at the first bad index
    pub fn handle_all(
        &mut self,
        grid: &mut CellGrid,
        events: impl IntoIterator<Item = CellEvent>,
    ) -> Result<(), GridError> {
        for event in events {
            self.handle(grid, event)?;
        }
        Ok(())
    }

    fn paint(&self, grid: &mut CellGrid, index: usize) -> Result<(), GridError> {
        let color = self.tool_state.paint_color();
        log::trace!("Painting cell {} with {:?}", index, color);
        grid.set_cell_color(index, color)
    }
}
