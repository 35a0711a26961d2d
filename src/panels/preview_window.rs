use crate::PixelStudioApp;

/// Modal showing the latest export with Save and Close actions.
///
/// A click anywhere outside the window closes it, like clicking a backdrop.
pub fn preview_window(app: &mut PixelStudioApp, ctx: &egui::Context) {
    if !app.export_flow().result().preview_visible {
        return;
    }

    let mut save = false;
    let mut close = false;
    let shown = egui::Window::new("Preview")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            match app.preview_texture() {
                Some(texture) => {
                    ui.add(egui::Image::new(texture).max_size(egui::Vec2::splat(400.0)));
                }
                None => {
                    ui.label("Preview unavailable");
                }
            }
            ui.horizontal(|ui| {
                save = ui.button("Save").clicked();
                close = ui.button("Close").clicked();
            });
        });

    if let Some(window_rect) = shown.map(|inner| inner.response.rect) {
        let clicked_outside = ctx.input(|i| {
            i.pointer.primary_clicked()
                && i.pointer.interact_pos().is_some_and(|pos| !window_rect.contains(pos))
        });
        close |= clicked_outside;
    }

    if save {
        app.save_export();
    }
    if close {
        app.dismiss_preview();
    }
}
