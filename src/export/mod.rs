//! Exporting the grid to an image and previewing the result.

mod flow;
mod pending;
mod rasterizer;
mod save;

pub use flow::{ExportFlow, ExportResult, ExportState};
pub use pending::PendingExport;
pub use rasterizer::{EncodedImage, GridSnapshot, PNG_MIME, PngRasterizer, Rasterizer};
pub use save::{EXPORT_FILE_NAME, Saved, save_image};
