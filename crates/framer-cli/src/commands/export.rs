use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Args;
use console::Term;
use framer_core::asset::{load_asset, AssetRole};
use framer_core::config::FramerConfig;
use framer_core::delivery::{
    write_data_uri, DataUriTarget, DeliveryChain, DeliveryMethod, EncodedImage, ManualSaveTarget,
    TransientFileTarget,
};
use framer_core::error::FramerError;
use framer_core::export::{ExportCompositor, ExportOutcome, FrameSource};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use super::SessionArgs;

#[derive(Args)]
pub struct ExportArgs {
    /// Subject photo
    pub subject: PathBuf,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Directory the export is written to
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,

    /// Suggested output filename
    #[arg(long)]
    pub filename: Option<String>,

    /// Use the touch-device delivery order
    #[arg(long)]
    pub touch: bool,

    /// Host cannot save files directly
    #[arg(long)]
    pub no_download: bool,

    /// Save the resolved session (including the transform) to a TOML file
    #[arg(long)]
    pub save_session: Option<PathBuf>,
}

pub fn run(args: &ExportArgs) -> Result<()> {
    let mut config = args.session.resolve()?;
    if let Some(ref dir) = args.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(ref name) = args.filename {
        config.output.filename = name.clone();
    }
    if args.touch {
        config.platform.touch = true;
    }
    if args.no_download {
        config.platform.file_download = false;
    }

    std::fs::create_dir_all(&config.output.directory).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output.directory.display()
        )
    })?;

    let subject = load_asset(&args.subject, AssetRole::Subject)?;
    let frame = FrameSource::File(config.frame.clone());
    let mut chain = build_chain(&config);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Compositing");

    let start = Instant::now();
    let outcome = ExportCompositor::new().export_and_deliver(
        Some(&subject),
        &frame,
        config.viewport.snapshot(),
        &mut chain,
        &config.output.filename,
    );
    pb.finish_and_clear();

    let report = match outcome? {
        ExportOutcome::Completed(report) => report,
        ExportOutcome::Skipped(reason) => bail!("Export skipped: {reason}"),
    };

    if let Some(ref path) = args.save_session {
        config
            .save(path)
            .with_context(|| format!("Failed to save session to {}", path.display()))?;
    }

    // Manual save streams the PNG on stdout, so keep the summary off it.
    if report.method == DeliveryMethod::ManualSave {
        eprintln!("Export delivered on stdout ({} bytes)", report.bytes);
    } else {
        crate::summary::print_export_summary(&config, &subject, &report, start.elapsed());
    }

    Ok(())
}

/// Delivery targets in the order the platform prefers.
fn build_chain(config: &FramerConfig) -> DeliveryChain {
    let plan = config.platform.plan();
    debug!(?plan, dir = %config.output.directory.display(), "Delivery plan");
    let mut chain = DeliveryChain::new();
    for method in plan {
        chain = match method {
            DeliveryMethod::TransientHandle => {
                chain.with(method, TransientFileTarget::new(&config.output.directory))
            }
            DeliveryMethod::EmbeddedData => {
                let path = config.output_path();
                chain.with(
                    method,
                    DataUriTarget::new(move |uri: &str, _name: &str| write_data_uri(uri, &path)),
                )
            }
            DeliveryMethod::ManualSave => chain.with(method, ManualSaveTarget::new(write_to_stdout)),
        };
    }
    chain
}

fn write_to_stdout(encoded: &EncodedImage, _name: &str) -> framer_core::error::Result<()> {
    if Term::stdout().is_term() {
        return Err(FramerError::delivery(
            DeliveryMethod::ManualSave,
            "stdout is a terminal, redirect it to a file to save the image",
        ));
    }
    let mut out = std::io::stdout().lock();
    out.write_all(encoded.bytes())?;
    out.flush()?;
    Ok(())
}
