use framer_core::consts::{
    ROTATION_MAX_DEGREES, ROTATION_MIN_DEGREES, ROTATION_STEP_DEGREES, SCALE_MAX, SCALE_MIN,
    SCALE_STEP,
};

use crate::app::FramerApp;
use crate::messages::WorkerResult;
use crate::panels::{pick_subject, section_header};

const LEFT_PANEL_WIDTH: f32 = 260.0;

pub fn show(ctx: &egui::Context, app: &mut FramerApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                photo_section(ui, app);
                if app.has_subject_loaded() {
                    ui.separator();
                    transform_section(ui, app);
                    ui.separator();
                    export_section(ui, app);
                }
            });
        });
}

fn photo_section(ui: &mut egui::Ui, app: &mut FramerApp) {
    section_header(ui, "Photo", None);
    ui.add_space(4.0);

    if ui.button("Choose Photo...").clicked() {
        pick_subject(app);
    }

    if let Some(ref path) = app.ui_state.subject_path {
        ui.label(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
    }
    if let Some([w, h]) = app.ui_state.subject_size {
        ui.small(format!("{w}x{h}"));
    }
}

fn transform_section(ui: &mut egui::Ui, app: &mut FramerApp) {
    section_header(ui, "Transform", None);
    ui.add_space(4.0);

    let mut scale = app.view.scale();
    if ui
        .add(
            egui::Slider::new(&mut scale, SCALE_MIN..=SCALE_MAX)
                .step_by(SCALE_STEP)
                .text("Zoom"),
        )
        .changed()
    {
        app.view.set_scale(scale);
    }
    if app.view.effective_scale() != app.view.scale() {
        ui.small(format!("Rendered at {:.1}", app.view.effective_scale()));
    }

    let mut rotation = app.view.rotation_degrees();
    if ui
        .add(
            egui::Slider::new(&mut rotation, ROTATION_MIN_DEGREES..=ROTATION_MAX_DEGREES)
                .step_by(ROTATION_STEP_DEGREES)
                .suffix("\u{00b0}")
                .text("Rotation"),
        )
        .changed()
    {
        app.view.set_rotation(rotation);
    }

    let (pan_x, pan_y) = app.view.pan();
    ui.small(format!("Pan {pan_x:+.2}, {pan_y:+.2}"));
    ui.small("Drag the preview to move the photo");

    ui.add_space(4.0);
    if ui.button("Reset").clicked() {
        app.view.reset();
    }
}

fn export_section(ui: &mut egui::Ui, app: &mut FramerApp) {
    let status = app.ui_state.is_busy().then_some("working...");
    section_header(ui, "Export", status);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label("File");
        ui.text_edit_singleline(&mut app.config.output.filename);
    });
    ui.horizontal(|ui| {
        ui.label("Folder");
        ui.small(app.config.output.directory.display().to_string());
        if ui.small_button("Change...").clicked() {
            pick_output_dir(ui.ctx(), app);
        }
    });

    ui.checkbox(&mut app.config.platform.touch, "Touch device");
    ui.checkbox(&mut app.config.platform.file_download, "Direct file save");
    let plan: Vec<String> = app
        .config
        .platform
        .plan()
        .iter()
        .map(ToString::to_string)
        .collect();
    ui.small(format!("Delivery: {}", plan.join(" -> ")));

    ui.add_space(4.0);
    if ui
        .add_enabled(app.can_export(), egui::Button::new("Export"))
        .clicked()
    {
        app.request_export();
    }

    if let Some(ref path) = app.ui_state.last_export {
        ui.small(format!("Last: {}", path.display()));
    }
}

fn pick_output_dir(ctx: &egui::Context, app: &FramerApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            let _ = result_tx.send(WorkerResult::OutputDirChosen { path });
            ctx.request_repaint();
        }
    });
}
