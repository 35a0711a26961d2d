use crate::PixelStudioApp;
use crate::canvas::{CanvasLayout, paint_grid};

pub fn central_panel(app: &mut PixelStudioApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("PixelArt Studio");
            ui.add_space(8.0);
            canvas_ui(app, ui);
        });
    });
}

/// Allocates the canvas, feeds this frame's pointer input to the app and
/// paints the grid.
///
/// Only pointer input that reaches the canvas itself counts: a popup or
/// window drawn over it hides the pointer from the grid.
pub fn canvas_ui(app: &mut PixelStudioApp, ui: &mut egui::Ui) -> egui::Response {
    let edge = app.style().canvas_px;
    let (response, painter) = ui.allocate_painter(egui::Vec2::splat(edge), egui::Sense::click_and_drag());
    let layout = CanvasLayout::new(response.rect, app.grid().size(), app.style().padding_px);

    let released = ui.input(|i| i.pointer.primary_released());
    // The preview is modal: the canvas ignores the pointer while it is open
    let pointer_pos = if app.export_flow().result().preview_visible {
        None
    } else {
        response.hover_pos()
    };
    let pressed = pointer_pos.is_some() && ui.input(|i| i.pointer.primary_pressed());
    app.track_pointer(&layout, pointer_pos, pressed, released);

    paint_grid(&painter, &layout, app.grid(), app.style());
    response
}
