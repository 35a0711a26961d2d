use egui::{Color32, Event, Modifiers, Pos2, PointerButton, Rect, Vec2, pos2};
use pixel_studio::PixelStudioApp;
use pixel_studio::canvas::{CanvasLayout, PointerTracker};
use pixel_studio::grid::{CellGrid, GridSize};
use pixel_studio::input::{CellEvent, InteractionController};
use pixel_studio::panels::canvas_ui;
use pixel_studio::tools::{Tool, ToolState};

fn red_brush() -> InteractionController {
    InteractionController::new(ToolState::new(Color32::RED))
}

fn painted(grid: &CellGrid) -> Vec<usize> {
    (0..grid.len())
        .filter(|&i| grid.cell(i) != Some(Color32::WHITE))
        .collect()
}

#[test]
fn test_drag_paints_every_entered_cell() {
    let mut grid = CellGrid::default();
    let mut controller = red_brush();

    controller
        .handle_all(
            &mut grid,
            [
                CellEvent::Down(0),
                CellEvent::Enter(1),
                CellEvent::Enter(17),
                CellEvent::Enter(18),
                CellEvent::Up,
            ],
        )
        .unwrap();

    assert_eq!(painted(&grid), vec![0, 1, 17, 18]);
    assert!(!controller.is_drawing());

    // After release, entering cells paints nothing
    controller.handle(&mut grid, CellEvent::Enter(100)).unwrap();
    assert_eq!(grid.cell(100), Some(Color32::WHITE));
}

#[test]
fn test_paint_order_follows_event_order() {
    let mut grid = CellGrid::default();
    let mut controller = red_brush();

    controller.on_pointer_down(&mut grid, 4).unwrap();
    controller.select_color(Color32::BLUE);
    controller.on_pointer_enter(&mut grid, 4).unwrap();
    controller.on_pointer_up();

    // The later write wins
    assert_eq!(grid.cell(4), Some(Color32::BLUE));
}

#[test]
fn test_hover_without_press_paints_nothing() {
    let mut grid = CellGrid::default();
    let mut controller = red_brush();
    for index in 0..grid.len() {
        controller.on_pointer_enter(&mut grid, index).unwrap();
    }
    assert!(painted(&grid).is_empty());
}

#[test]
fn test_leaving_canvas_ends_drag() {
    let mut grid = CellGrid::default();
    let mut controller = red_brush();

    controller
        .handle_all(
            &mut grid,
            [CellEvent::Down(0), CellEvent::LeaveCanvas, CellEvent::Enter(1)],
        )
        .unwrap();
    assert_eq!(painted(&grid), vec![0]);
}

#[test]
fn test_eraser_always_paints_white() {
    let mut grid = CellGrid::default();
    let mut controller = red_brush();
    controller.on_pointer_down(&mut grid, 9).unwrap();
    controller.on_pointer_up();

    for color in [Color32::RED, Color32::BLACK, Color32::from_rgb(9, 99, 199)] {
        controller.select_tool(Tool::Eraser);
        controller.select_color(color);
        controller.on_pointer_down(&mut grid, 9).unwrap();
        controller.on_pointer_up();
        assert_eq!(grid.cell(9), Some(Color32::WHITE));

        controller.select_tool(Tool::Brush);
        controller.on_pointer_down(&mut grid, 9).unwrap();
        controller.on_pointer_up();
        assert_eq!(grid.cell(9), Some(color));
    }
}

#[test]
fn test_out_of_range_event_is_reported() {
    let mut grid = CellGrid::new(GridSize::new(8).unwrap());
    let mut controller = red_brush();
    assert!(controller.handle(&mut grid, CellEvent::Down(64)).is_err());
    assert!(painted(&grid).is_empty());
}

#[test]
fn test_fast_drag_fills_skipped_cells() {
    let outer = Rect::from_min_size(pos2(0.0, 0.0), Vec2::splat(96.0));
    let size = GridSize::new(8).unwrap();
    let layout = CanvasLayout::new(outer, size, 8.0);
    let mut grid = CellGrid::new(size);
    let mut controller = red_brush();
    let mut tracker = PointerTracker::new();

    let frames = [
        (Some(layout.cell_rect(0).center()), true, false),
        (Some(layout.cell_rect(3).center()), false, false),
        (Some(layout.cell_rect(3).center()), false, true),
    ];
    for (pos, pressed, released) in frames {
        let events = tracker.update(&layout, pos, pressed, released);
        controller.handle_all(&mut grid, events).unwrap();
    }

    assert_eq!(painted(&grid), vec![0, 1, 2, 3]);
}

#[test]
fn test_tracker_hover_never_paints() {
    let outer = Rect::from_min_size(pos2(0.0, 0.0), Vec2::splat(96.0));
    let size = GridSize::new(8).unwrap();
    let layout = CanvasLayout::new(outer, size, 8.0);
    let mut grid = CellGrid::new(size);
    let mut controller = red_brush();
    let mut tracker = PointerTracker::new();

    for index in [0, 7, 63, 56] {
        let events = tracker.update(&layout, Some(layout.cell_rect(index).center()), false, false);
        controller.handle_all(&mut grid, events).unwrap();
    }
    assert!(painted(&grid).is_empty());
}

#[test]
fn test_resize_mid_drag_stops_painting() {
    let mut app = PixelStudioApp::default();
    app.select_color(Color32::RED);
    app.apply_canvas_events(vec![CellEvent::Down(0)]);
    assert_eq!(app.grid().cell(0), Some(Color32::RED));

    app.resize(GridSize::new(8).unwrap());
    app.apply_canvas_events(vec![CellEvent::Enter(1), CellEvent::Enter(2)]);

    assert_eq!(app.grid().len(), 64);
    assert!(painted(app.grid()).is_empty());
}

fn press(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

/// Clicks `pos` over a canvas drawn at the origin, optionally under a
/// foreground area standing in for a popup.
fn click_canvas(app: &mut PixelStudioApp, pos: Pos2, covered: bool) {
    let ctx = egui::Context::default();
    let frames = [
        vec![Event::PointerMoved(pos)],
        vec![],
        vec![],
        vec![press(pos, true)],
        vec![press(pos, false)],
    ];
    for (frame, events) in frames.into_iter().enumerate() {
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::splat(800.0))),
            time: Some(frame as f64 * 0.05),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::Area::new(egui::Id::new("canvas"))
                .fixed_pos(Pos2::ZERO)
                .show(ctx, |ui| {
                    canvas_ui(app, ui);
                });
            if covered {
                egui::Area::new(egui::Id::new("popup"))
                    .order(egui::Order::Foreground)
                    .fixed_pos(Pos2::ZERO)
                    .show(ctx, |ui| {
                        ui.allocate_exact_size(Vec2::splat(600.0), egui::Sense::click());
                    });
            }
        });
    }
}

fn first_cell_center(app: &PixelStudioApp) -> Pos2 {
    let style = app.style();
    let outer = Rect::from_min_size(Pos2::ZERO, Vec2::splat(style.canvas_px));
    CanvasLayout::new(outer, app.grid().size(), style.padding_px)
        .cell_rect(0)
        .center()
}

#[test]
fn test_click_on_canvas_paints_cell() {
    let mut app = PixelStudioApp::default();
    app.select_color(Color32::RED);
    let pos = first_cell_center(&app);

    click_canvas(&mut app, pos, false);

    assert_eq!(painted(app.grid()), vec![0]);
    assert_eq!(app.grid().cell(0), Some(Color32::RED));
}

#[test]
fn test_click_on_overlapping_layer_skips_canvas() {
    let mut app = PixelStudioApp::default();
    app.select_color(Color32::RED);
    let pos = first_cell_center(&app);

    click_canvas(&mut app, pos, true);

    assert!(painted(app.grid()).is_empty());
}
