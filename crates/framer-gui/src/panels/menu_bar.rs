use framer_core::config::FramerConfig;

use crate::app::FramerApp;
use crate::messages::WorkerResult;
use crate::panels::pick_subject;

pub fn show(ctx: &egui::Context, app: &mut FramerApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let export_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::E);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(egui::Button::new("Open Photo...").shortcut_text(ctx.format_shortcut(&open_shortcut)))
                    .clicked()
                {
                    ui.close();
                    pick_subject(app);
                }

                let export = egui::Button::new("Export").shortcut_text(ctx.format_shortcut(&export_shortcut));
                if ui.add_enabled(app.can_export(), export).clicked() {
                    ui.close();
                    app.request_export();
                }

                ui.separator();

                if ui.button("Import Session...").clicked() {
                    ui.close();
                    import_session(ctx, app);
                }

                if ui.button("Save Session...").clicked() {
                    ui.close();
                    save_session(ctx, app);
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui
                    .add_enabled(app.has_subject_loaded(), egui::Button::new("Reset Transform"))
                    .clicked()
                {
                    ui.close();
                    app.view.reset();
                    app.ui_state.add_log("Transform reset".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            pick_subject(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&export_shortcut)) {
            app.request_export();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn import_session(ctx: &egui::Context, app: &mut FramerApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new().add_filter("TOML", &["toml"]).pick_file() else {
            return;
        };
        let result = match FramerConfig::load(&path) {
            Ok(config) => WorkerResult::SessionImported {
                config: Box::new(config),
            },
            Err(e) => WorkerResult::Error {
                message: format!("Could not import {}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(result);
        ctx.request_repaint();
    });
}

fn save_session(ctx: &egui::Context, app: &mut FramerApp) {
    let session = app.session();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("framer.toml")
            .save_file()
        else {
            return;
        };
        let result = match session.save(&path) {
            Ok(()) => WorkerResult::Log {
                message: format!("Session saved to {}", path.display()),
            },
            Err(e) => WorkerResult::Error {
                message: format!("Could not save session: {e}"),
            },
        };
        let _ = result_tx.send(result);
        ctx.request_repaint();
    });
}
