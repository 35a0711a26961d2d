use thiserror::Error;

/// Errors raised by the grid state store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A cell index past the end of the grid. Callers derive indices from the
    /// rendered grid, so this means an internal caller broke the contract.
    #[error("cell index {index} is out of bounds for a grid of {len} cells")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("unsupported grid size {0} (expected 8, 16, 24 or 32)")]
    UnsupportedSize(usize),
}

/// Errors that can occur while exporting or saving the grid image
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("an export is already in progress")]
    AlreadyExporting,
    #[error("there is no exported image to save")]
    NothingToSave,
    #[error("failed to encode image: {0}")]
    Encode(String),
    #[error("rasterizer failed: {0}")]
    Rasterize(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("browser error: {0}")]
    Web(String),
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Errors that can occur while loading the studio configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid color {0:?} (expected #RRGGBB)")]
    InvalidColor(String),
    #[error("invalid canvas geometry: {0}")]
    InvalidGeometry(String),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
