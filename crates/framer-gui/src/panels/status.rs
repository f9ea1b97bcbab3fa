use crate::app::FramerApp;

pub fn show(ctx: &egui::Context, app: &mut FramerApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if app.ui_state.is_busy() {
            ui.add(egui::ProgressBar::new(0.0).text("Exporting...").animate(true));
        } else {
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if let Some([w, h]) = app.ui_state.frame_size {
                ui.label(format!("Frame {w}x{h}"));
                ui.separator();
            }
            if let Some([w, h]) = app.ui_state.subject_size {
                ui.label(format!("Photo {w}x{h}"));
                ui.separator();
            }
            ui.label(format!("Zoom: {:.1}", app.view.scale()));
            ui.separator();
            ui.label(format!("Rotation: {:.0}\u{00b0}", app.view.rotation_degrees()));
        });

        ui.add_space(2.0);
    });
}
