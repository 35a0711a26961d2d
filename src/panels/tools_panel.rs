use crate::PixelStudioApp;
use crate::grid::GridSize;
use crate::tools::Tool;

pub fn tools_panel(app: &mut PixelStudioApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            // Everything behind the preview is inert until it is closed
            let enabled = !app.export_flow().result().preview_visible;
            ui.add_enabled_ui(enabled, |ui| tools_ui(app, ui, ctx));
        });
}

fn tools_ui(app: &mut PixelStudioApp, ui: &mut egui::Ui, ctx: &egui::Context) {
    ui.heading("Tools");
    ui.separator();

    ui.label("Color Picker");
    let mut color = app.tool_state().color;
    if egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque)
        .changed()
    {
        app.select_color(color);
    }

    ui.add_space(8.0);
    let active = app.tool_state().tool;
    ui.horizontal(|ui| {
        for tool in [Tool::Brush, Tool::Eraser] {
            if ui.selectable_label(active == tool, tool.name()).clicked() {
                app.select_tool(tool);
            }
        }
    });

    ui.add_space(8.0);
    let current = app.grid().size();
    ui.label(format!("Grid Size: {}", current));
    let mut side = current.get();
    ui.add(
        egui::Slider::new(&mut side, GridSize::MIN..=GridSize::MAX)
            .step_by(GridSize::STEP as f64)
            .show_value(false),
    );
    if side != current.get() {
        match GridSize::new(side) {
            Ok(size) => app.resize(size),
            Err(err) => log::warn!("Ignoring grid size change: {}", err),
        }
    }

    ui.separator();
    let exporting = app.export_flow().is_exporting();
    if ui.add_enabled(!exporting, egui::Button::new("Export PNG")).clicked() {
        app.request_export(ctx);
    }
    if exporting {
        ui.spinner();
    }
    if ui.button("Clear Canvas").clicked() {
        app.clear();
    }

    if let Some(status) = app.status() {
        ui.separator();
        if app.export_flow().last_failure().is_some() {
            let error_color = ui.visuals().error_fg_color;
            ui.colored_label(error_color, status);
        } else {
            ui.label(status);
        }
    }
}
