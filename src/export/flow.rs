use std::path::Path;

use super::rasterizer::{EncodedImage, GridSnapshot, Rasterizer};
use super::save::{self, Saved};
use crate::canvas::CanvasStyle;
use crate::error::ExportError;
use crate::grid::CellGrid;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    #[default]
    Idle,
    /// A snapshot was handed to the rasterizer and has not come back yet
    Exporting,
    PreviewVisible,
}

/// The most recent export and whether its preview is showing
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExportResult {
    pub image: Option<EncodedImage>,
    pub preview_visible: bool,
}

/// State machine for export and preview.
///
/// `Idle -> Exporting -> PreviewVisible -> Idle`. A failed export goes
/// back to `Idle` without producing a result. Only one export may be in
/// flight; further requests are rejected until it completes.
#[derive(Debug, Default)]
pub struct ExportFlow {
    exporting: bool,
    result: ExportResult,
    last_failure: Option<String>,
}

impl ExportFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ExportState {
        if self.exporting {
            ExportState::Exporting
        } else if self.result.preview_visible {
            ExportState::PreviewVisible
        } else {
            ExportState::Idle
        }
    }

    pub fn result(&self) -> &ExportResult {
        &self.result
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Message from the last failed export, cleared by the next request
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Snapshots the grid and enters `Exporting`.
    pub fn begin_export(&mut self, grid: &CellGrid, style: CanvasStyle) -> Result<GridSnapshot, ExportError> {
        if self.exporting {
            log::warn!("Export requested while another export is pending; ignoring");
            return Err(ExportError::AlreadyExporting);
        }
        self.exporting = true;
        self.last_failure = None;
        log::info!("Exporting {} grid", grid.size());
        Ok(GridSnapshot::capture(grid, style))
    }

    /// Applies the rasterizer's outcome. Failures only reach the log and
    /// [`Self::last_failure`]; the previous result is left as it was.
    pub fn finish_export(&mut self, outcome: Result<EncodedImage, ExportError>) {
        self.exporting = false;
        match outcome {
            Ok(image) => {
                log::info!(
                    "Export {} finished: {}x{} {}",
                    image.id(),
                    image.width(),
                    image.height(),
                    image.mime()
                );
                self.result = ExportResult {
                    image: Some(image),
                    preview_visible: true,
                };
            }
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.last_failure = Some(err.to_string());
            }
        }
    }

    /// Runs a whole export against `rasterizer`.
    ///
    /// Only a rejected concurrent request is returned as an error; a failing
    /// rasterizer leaves the flow `Idle` and returns `Ok`.
    pub async fn export_image(
        &mut self,
        grid: &CellGrid,
        style: CanvasStyle,
        rasterizer: &dyn Rasterizer,
    ) -> Result<(), ExportError> {
        let snapshot = self.begin_export(grid, style)?;
        let outcome = rasterizer.rasterize(snapshot).await;
        self.finish_export(outcome);
        Ok(())
    }

    /// Hides the preview and drops the stored image
    pub fn dismiss_preview(&mut self) {
        if let Some(image) = self.result.image.take() {
            log::debug!("Discarding export {}", image.id());
        }
        self.result.preview_visible = false;
    }

    pub fn save(&self, dir: &Path) -> Result<Saved, ExportError> {
        let image = self.result.image.as_ref().ok_or(ExportError::NothingToSave)?;
        save::save_image(image, dir)
    }
}
