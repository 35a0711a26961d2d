mod central_panel;
mod preview_window;
mod tools_panel;

pub use central_panel::{canvas_ui, central_panel};
pub use preview_window::preview_window;
pub use tools_panel::tools_panel;
