use crate::app::FramerApp;

pub fn show(ctx: &egui::Context, app: &mut FramerApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        if app.renderer.is_none() {
            show_placeholder(ui, "Loading frame...");
            return;
        }

        let geometry = app.config.layout.geometry_for(rect.width().max(0.0) as u32);
        app.set_canvas_geometry(geometry);

        let surface_size = egui::vec2(
            geometry.surface_width() as f32,
            geometry.surface_height() as f32,
        );
        let surface_rect = egui::Rect::from_center_size(rect.center(), surface_size);
        let response = ui.allocate_rect(surface_rect, egui::Sense::drag());

        if app.has_subject_loaded() {
            if response.hovered() {
                ctx.set_cursor_icon(if response.dragged() {
                    egui::CursorIcon::Grabbing
                } else {
                    egui::CursorIcon::Grab
                });
            }
            if response.dragged_by(egui::PointerButton::Primary) {
                let delta = response.drag_delta();
                app.view.drag_by(delta.x as f64, delta.y as f64, geometry);
            }
        }

        app.refresh_preview(ctx);

        if let Some(ref texture) = app.canvas.texture {
            ui.painter().image(
                texture.id(),
                surface_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        if !app.has_subject_loaded() {
            ui.painter().text(
                surface_rect.center(),
                egui::Align2::CENTER_CENTER,
                "Choose a photo to begin",
                egui::FontId::proportional(18.0),
                egui::Color32::from_gray(100),
            );
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn show_placeholder(ui: &mut egui::Ui, text: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
