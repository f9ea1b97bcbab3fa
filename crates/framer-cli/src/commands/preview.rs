use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use framer_core::asset::{load_asset, AssetRole};
use framer_core::preview::PreviewRenderer;

use super::SessionArgs;

#[derive(Args)]
pub struct PreviewArgs {
    /// Subject photo
    pub subject: PathBuf,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Container width used to lay out the canvas
    #[arg(long, default_value = "740")]
    pub container: u32,

    /// Output file path
    #[arg(short, long, default_value = "preview.png")]
    pub output: PathBuf,
}

pub fn run(args: &PreviewArgs) -> Result<()> {
    let mut config = args.session.resolve()?;

    let frame = load_asset(&config.frame, AssetRole::Frame)?;
    let subject = load_asset(&args.subject, AssetRole::Subject)?;

    let geometry = config.layout.geometry_for(args.container);
    // Pan saved against another canvas size is still normalized, so only
    // adopt the live geometry when none was recorded.
    if args.session.config.is_none() {
        config.viewport.set_reference_geometry(geometry);
    }

    let mut renderer = PreviewRenderer::new(frame, geometry);
    renderer.set_subject(Some(&subject));
    let surface = renderer.render(&config.viewport.snapshot());

    surface
        .save(&args.output)
        .with_context(|| format!("Failed to write preview to {}", args.output.display()))?;

    println!(
        "Preview {}x{} (canvas {}x{}, border {}) saved to {}",
        surface.width(),
        surface.height(),
        geometry.display_width,
        geometry.display_height,
        geometry.border_inset,
        args.output.display()
    );

    Ok(())
}
