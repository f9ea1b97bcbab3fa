use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use framer_core::asset::{load_asset, AssetRole};
use framer_core::delivery::{
    DataUriTarget, DeliveryChain, DeliveryMethod, EncodedImage, ManualSaveTarget,
    TransientFileTarget,
};
use framer_core::error::FramerError;
use framer_core::export::{ExportCompositor, ExportOutcome, FrameSource};
use tracing::{info, warn};

use crate::messages::{ExportRequest, WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    compositor: Arc<ExportCompositor>,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("framer-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, compositor);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    compositor: Arc<ExportCompositor>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadSubject { path } => {
                handle_load(&path, AssetRole::Subject, &tx, &ctx);
            }
            WorkerCommand::LoadFrame { path } => {
                handle_load(&path, AssetRole::Frame, &tx, &ctx);
            }
            WorkerCommand::Export(request) => {
                handle_export(request, &compositor, &tx, &ctx);
            }
        }
    }
}

fn handle_load(path: &Path, role: AssetRole, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    let start = Instant::now();
    let asset = match load_asset(path, role) {
        Ok(asset) => asset,
        Err(e) => {
            warn!(%role, path = %path.display(), error = %e, "Asset load failed");
            send_error(tx, ctx, format!("Could not open {}: {e}", path.display()));
            return;
        }
    };
    let path = path.to_path_buf();
    let result = match role {
        AssetRole::Subject => WorkerResult::SubjectLoaded {
            path,
            asset,
            elapsed: start.elapsed(),
        },
        AssetRole::Frame => WorkerResult::FrameLoaded { path, asset },
    };
    send(tx, ctx, result);
}

fn handle_export(
    request: ExportRequest,
    compositor: &ExportCompositor,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let mut chain = build_chain(&request, tx, ctx);
    let outcome = compositor.export_and_deliver(
        Some(&request.subject),
        &FrameSource::File(request.frame.clone()),
        request.view,
        &mut chain,
        &request.filename,
    );

    let result = match outcome {
        Ok(ExportOutcome::Completed(report)) => {
            info!(method = %report.method, bytes = report.bytes, "Export finished");
            WorkerResult::ExportComplete {
                report,
                destination: request.output_dir.join(&request.filename),
                elapsed: start.elapsed(),
            }
        }
        Ok(ExportOutcome::Skipped(reason)) => WorkerResult::ExportSkipped { reason },
        Err(e) => WorkerResult::ExportFailed {
            message: e.to_string(),
        },
    };
    send(tx, ctx, result);
}

/// Delivery targets in the order the platform prefers.
fn build_chain(
    request: &ExportRequest,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> DeliveryChain {
    let mut chain = DeliveryChain::new();
    for method in request.platform.plan() {
        chain = match method {
            DeliveryMethod::TransientHandle => {
                chain.with(method, TransientFileTarget::new(&request.output_dir))
            }
            DeliveryMethod::EmbeddedData => {
                let tx = tx.clone();
                let ctx = ctx.clone();
                chain.with(
                    method,
                    DataUriTarget::new(move |uri: &str, name: &str| {
                        tx.send(WorkerResult::EmbeddedData {
                            uri: uri.to_string(),
                            filename: name.to_string(),
                        })
                        .map_err(|e| FramerError::delivery(DeliveryMethod::EmbeddedData, e))?;
                        ctx.request_repaint();
                        Ok(())
                    }),
                )
            }
            DeliveryMethod::ManualSave => chain.with(method, ManualSaveTarget::new(save_with_dialog)),
        };
    }
    chain
}

fn save_with_dialog(encoded: &EncodedImage, name: &str) -> framer_core::error::Result<()> {
    let path = rfd::FileDialog::new()
        .add_filter("PNG", &["png"])
        .set_file_name(name)
        .save_file()
        .ok_or_else(|| FramerError::delivery(DeliveryMethod::ManualSave, "save dialog cancelled"))?;
    std::fs::write(&path, encoded.bytes())?;
    Ok(())
}
