use std::sync::Arc;

use egui::Color32;

use crate::canvas::{CanvasStyle, PointerTracker};
use crate::config::StudioConfig;
use crate::export::{ExportFlow, PendingExport, PngRasterizer, Rasterizer};
use crate::grid::{CellGrid, GridSize};
use crate::input::{CellEvent, InteractionController};
use crate::panels::{central_panel, preview_window, tools_panel};
use crate::tools::{Tool, ToolState};

/// The whole studio: grid, tools, and export state owned by the view.
pub struct PixelStudioApp {
    config: StudioConfig,
    style: CanvasStyle,
    grid: CellGrid,
    controller: InteractionController,
    tracker: PointerTracker,
    export: ExportFlow,
    rasterizer: Arc<dyn Rasterizer>,
    pending: Option<PendingExport>,
    preview_texture: Option<egui::TextureHandle>,
    status: Option<String>,
}

impl Default for PixelStudioApp {
    fn default() -> Self {
        Self::with_config(StudioConfig::default())
    }
}

impl PixelStudioApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: StudioConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: StudioConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{}; using the default config", err);
                StudioConfig::default()
            }
        };
        let color = config.brush_color().unwrap_or_else(|err| {
            log::warn!("{}; using black", err);
            Color32::BLACK
        });
        Self {
            style: config.canvas_style(),
            grid: CellGrid::new(config.default_grid_size),
            controller: InteractionController::new(ToolState::new(color)),
            tracker: PointerTracker::new(),
            export: ExportFlow::new(),
            rasterizer: Arc::new(PngRasterizer),
            pending: None,
            preview_texture: None,
            status: None,
            config,
        }
    }

    /// Swaps the export collaborator
    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn style(&self) -> &CanvasStyle {
        &self.style
    }

    pub fn tool_state(&self) -> ToolState {
        self.controller.tool_state()
    }

    pub fn export_flow(&self) -> &ExportFlow {
        &self.export
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(crate) fn preview_texture(&self) -> Option<&egui::TextureHandle> {
        self.preview_texture.as_ref()
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.controller.select_tool(tool);
    }

    pub fn select_color(&mut self, color: Color32) {
        self.controller.select_color(color);
    }

    pub fn resize(&mut self, size: GridSize) {
        self.grid.resize(size);
        self.tracker.reset();
        self.controller.on_pointer_leave_canvas();
    }

    pub fn clear(&mut self) {
        log::info!("Clearing canvas");
        self.grid.clear();
    }

    /// Feeds pointer events for this frame to the controller, in order
    pub fn apply_canvas_events(&mut self, events: Vec<CellEvent>) {
        if let Err(err) = self.controller.handle_all(&mut self.grid, events) {
            log::error!("Dropped paint command: {}", err);
        }
    }

    pub(crate) fn track_pointer(
        &mut self,
        layout: &crate::canvas::CanvasLayout,
        pointer_pos: Option<egui::Pos2>,
        pressed: bool,
        released: bool,
    ) {
        let events = self.tracker.update(layout, pointer_pos, pressed, released);
        self.apply_canvas_events(events);
    }

    /// Starts rasterizing the current grid in the background
    pub fn request_export(&mut self, ctx: &egui::Context) {
        match self.export.begin_export(&self.grid, self.style) {
            Ok(snapshot) => {
                self.status = None;
                let future = self.rasterizer.rasterize(snapshot);
                self.pending = Some(PendingExport::spawn(future, ctx.clone()));
            }
            Err(err) => log::warn!("Export not started: {}", err),
        }
    }

    /// Applies a finished export, if any, and loads its preview texture
    pub fn poll_export(&mut self, ctx: &egui::Context) {
        let Some(outcome) = self.pending.as_ref().and_then(PendingExport::poll) else {
            return;
        };
        self.pending = None;
        self.export.finish_export(outcome);

        if let Some(failure) = self.export.last_failure() {
            self.status = Some(format!("Export failed: {}", failure));
            return;
        }
        let Some(image) = self.export.result().image.as_ref() else {
            return;
        };
        match image.decode() {
            Ok(pixels) => {
                let name = format!("export_{}", image.id());
                self.preview_texture = Some(ctx.load_texture(name, pixels, egui::TextureOptions::NEAREST));
            }
            Err(err) => {
                log::error!("Failed to decode export for preview: {}", err);
                self.status = Some(format!("Preview unavailable: {}", err));
            }
        }
    }

    pub fn dismiss_preview(&mut self) {
        self.export.dismiss_preview();
        self.preview_texture = None;
    }

    pub fn save_export(&mut self) {
        match self.export.save(&self.config.export_dir) {
            Ok(saved) => self.status = Some(saved.to_string()),
            Err(err) => {
                log::error!("Save failed: {}", err);
                self.status = Some(format!("Save failed: {}", err));
            }
        }
    }
}

impl eframe::App for PixelStudioApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_export(ctx);

        tools_panel(self, ctx);
        preview_window(self, ctx);
        central_panel(self, ctx);

        if self.export.is_exporting() {
            ctx.request_repaint();
        }
    }
}
