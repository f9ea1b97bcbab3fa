pub mod canvas;
pub mod controls;
pub mod menu_bar;
pub mod status;

use crate::app::FramerApp;
use crate::messages::WorkerCommand;

pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}

/// Ask for a photo off the UI thread; the worker decodes it.
pub(crate) fn pick_subject(app: &FramerApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadSubject { path });
        }
    });
}
