use egui::Color32;

use crate::grid::BLANK;

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Tool {
    /// Deposits the selected color
    #[default]
    Brush,
    /// Always deposits white
    Eraser,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
        }
    }
}

/// The active tool and the selected brush color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    pub tool: Tool,
    pub color: Color32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            color: Color32::BLACK,
        }
    }
}

impl ToolState {
    pub fn new(color: Color32) -> Self {
        Self {
            tool: Tool::Brush,
            color,
        }
    }

    /// Color a paint command writes with the current tool
    pub fn paint_color(&self) -> Color32 {
        match self.tool {
            Tool::Brush => self.color,
            Tool::Eraser => BLANK,
        }
    }
}
