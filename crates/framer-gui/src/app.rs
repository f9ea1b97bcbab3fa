use std::sync::mpsc;
use std::sync::Arc;

use framer_core::asset::ImageAsset;
use framer_core::config::FramerConfig;
use framer_core::delivery::DeliveryMethod;
use framer_core::export::ExportCompositor;
use framer_core::geometry::PreviewCanvasGeometry;
use framer_core::preview::PreviewRenderer;
use framer_core::viewport::ViewportState;

use crate::convert::rgba_to_color_image;
use crate::messages::{ExportRequest, WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{CanvasState, UIState};
use crate::worker;

pub struct FramerApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub compositor: Arc<ExportCompositor>,
    pub ui_state: UIState,
    pub config: FramerConfig,
    pub view: ViewportState,
    pub canvas: CanvasState,
    pub renderer: Option<PreviewRenderer>,
    pub subject: Option<ImageAsset>,
    pub show_about: bool,
}

impl FramerApp {
    pub fn new(ctx: &egui::Context, config: FramerConfig) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let compositor = Arc::new(ExportCompositor::new());
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone(), Arc::clone(&compositor));

        let app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            compositor,
            ui_state: UIState::default(),
            view: config.viewport.clone(),
            config,
            canvas: CanvasState::default(),
            renderer: None,
            subject: None,
            show_about: false,
        };
        app.send_command(WorkerCommand::LoadFrame {
            path: app.config.frame.clone(),
        });
        app
    }

    /// Gates the transform and export controls.
    pub fn has_subject_loaded(&self) -> bool {
        self.subject.is_some()
    }

    /// Gates the export button and menu entry.
    pub fn can_export(&self) -> bool {
        self.ui_state.export_ready(self.has_subject_loaded())
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::FrameLoaded { path, asset } => {
                    self.ui_state.add_log(format!(
                        "Frame: {} ({}x{})",
                        path.display(),
                        asset.width(),
                        asset.height()
                    ));
                    if !asset.has_transparency() {
                        self.ui_state
                            .add_log("Warning: frame has no transparent cutout".into());
                    }
                    self.ui_state.frame_size = Some([asset.width(), asset.height()]);

                    let geometry = self
                        .renderer
                        .as_ref()
                        .map(|r| r.geometry())
                        .unwrap_or_else(|| self.view.reference_geometry());
                    let mut renderer = PreviewRenderer::new(asset, geometry);
                    renderer.set_subject(self.subject.as_ref());
                    self.renderer = Some(renderer);
                    self.view.invalidate();
                }
                WorkerResult::SubjectLoaded {
                    path,
                    asset,
                    elapsed,
                } => {
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{}, {})",
                        path.display(),
                        asset.width(),
                        asset.height(),
                        format_duration(elapsed)
                    ));
                    if let Some(renderer) = self.renderer.as_mut() {
                        renderer.set_subject(Some(&asset));
                    }
                    self.view.reset();
                    self.ui_state.subject_size = Some([asset.width(), asset.height()]);
                    self.ui_state.subject_path = Some(path);
                    self.subject = Some(asset);
                }
                WorkerResult::ExportComplete {
                    report,
                    destination,
                    elapsed,
                } => {
                    self.ui_state.exporting = false;
                    for failure in &report.failures {
                        self.ui_state.add_log(format!("Delivery fallback: {failure}"));
                    }
                    let detail = match report.method {
                        DeliveryMethod::TransientHandle => {
                            self.ui_state.last_export = Some(destination.clone());
                            format!("Saved: {}", destination.display())
                        }
                        DeliveryMethod::EmbeddedData => "Delivered as embedded data".to_string(),
                        DeliveryMethod::ManualSave => "Saved from dialog".to_string(),
                    };
                    self.ui_state.add_log(format!(
                        "{detail} ({:.1} KB, {})",
                        report.bytes as f64 / 1024.0,
                        format_duration(elapsed)
                    ));
                }
                WorkerResult::ExportSkipped { reason } => {
                    self.ui_state.exporting = false;
                    self.ui_state.add_log(format!("Export skipped: {reason}"));
                }
                WorkerResult::ExportFailed { message } => {
                    self.ui_state.exporting = false;
                    self.ui_state.add_log(format!("ERROR: export failed: {message}"));
                }
                WorkerResult::EmbeddedData { uri, filename } => {
                    let len = uri.len();
                    ctx.copy_text(uri);
                    self.ui_state.add_log(format!(
                        "{filename} copied to clipboard as a data URI ({len} chars)"
                    ));
                }
                WorkerResult::SessionImported { config } => {
                    self.apply_session(*config);
                }
                WorkerResult::OutputDirChosen { path } => {
                    self.config.output.directory = path;
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Adopt an imported session. The frame is reloaded only when it changed.
    fn apply_session(&mut self, config: FramerConfig) {
        let frame_changed = config.frame != self.config.frame;
        self.view = config.viewport.clone();
        self.view.invalidate();
        self.config = config;
        if frame_changed {
            self.send_command(WorkerCommand::LoadFrame {
                path: self.config.frame.clone(),
            });
        }
        self.ui_state.add_log("Session imported".into());
    }

    /// Session as it would be saved: the config plus the live transform.
    pub fn session(&self) -> FramerConfig {
        FramerConfig {
            viewport: self.view.clone(),
            ..self.config.clone()
        }
    }

    /// Follow the responsive layout: a new canvas size rebuilds the
    /// renderer's scaled frame and forces a redraw.
    pub fn set_canvas_geometry(&mut self, geometry: PreviewCanvasGeometry) {
        if let Some(renderer) = self.renderer.as_mut() {
            if renderer.geometry() != geometry {
                renderer.set_geometry(geometry);
                self.view.invalidate();
            }
        }
        self.view.set_reference_geometry(geometry);
    }

    /// Re-render the preview surface if the transform changed.
    pub fn refresh_preview(&mut self, ctx: &egui::Context) {
        let Some(renderer) = self.renderer.as_ref() else {
            return;
        };
        if let Some(surface) = renderer.render_if_dirty(&mut self.view) {
            let image = rgba_to_color_image(&surface);
            self.canvas.texture = Some(ctx.load_texture("preview", image, egui::TextureOptions::LINEAR));
        }
    }

    /// Queue an export of the current snapshot. Ignored until both images
    /// are loaded or while another export is outstanding.
    pub fn request_export(&mut self) {
        let Some(subject) = self.subject.clone() else {
            self.ui_state.add_log("Choose a photo before exporting".into());
            return;
        };
        if self.ui_state.frame_size.is_none() {
            self.ui_state.add_log("Frame not loaded yet".into());
            return;
        }
        if self.ui_state.is_busy() || self.compositor.is_busy() {
            self.ui_state.add_log("Export already in progress".into());
            return;
        }
        self.ui_state.exporting = true;
        self.send_command(WorkerCommand::Export(ExportRequest {
            subject,
            frame: self.config.frame.clone(),
            view: self.view.snapshot(),
            output_dir: self.config.output.directory.clone(),
            filename: self.config.output.filename.clone(),
            platform: self.config.platform,
        }));
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for FramerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::canvas::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Framer")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Framer");
                        ui.label("Place a photo behind a decorative frame");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else {
        format!("{secs:.1}s")
    }
}
