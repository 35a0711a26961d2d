#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod input;
pub mod panels;
pub mod tools;

pub use app::PixelStudioApp;
pub use canvas::{CanvasLayout, CanvasStyle, PointerTracker};
pub use config::StudioConfig;
pub use error::{ConfigError, ExportError, GridError};
pub use export::{EncodedImage, ExportFlow, ExportResult, ExportState, PngRasterizer, Rasterizer};
pub use grid::{CellGrid, GridSize};
pub use input::{CellEvent, InteractionController};
pub use tools::{Tool, ToolState};
