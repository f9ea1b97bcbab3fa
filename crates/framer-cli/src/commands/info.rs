use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use framer_core::asset::{load_asset, AssetRole};

#[derive(Args)]
pub struct InfoArgs {
    /// Image file
    pub file: PathBuf,

    /// Inspect the file as a frame overlay
    #[arg(long)]
    pub frame: bool,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let role = if args.frame {
        AssetRole::Frame
    } else {
        AssetRole::Subject
    };
    let asset = load_asset(&args.file, role)?;

    println!("File:         {}", args.file.display());
    println!("Role:         {}", role);
    println!("Dimensions:   {}x{}", asset.width(), asset.height());
    println!("Aspect ratio: {:.4}", asset.aspect_ratio());
    println!(
        "Transparency: {}",
        if asset.has_transparency() { "yes" } else { "no" }
    );

    if role == AssetRole::Frame && !asset.has_transparency() {
        println!("Warning:      frame has no transparent cutout, the photo will be hidden");
    }

    Ok(())
}
