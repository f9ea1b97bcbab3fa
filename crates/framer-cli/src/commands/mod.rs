pub mod config;
pub mod export;
pub mod info;
pub mod preview;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use framer_core::config::FramerConfig;
use framer_core::viewport::ViewportState;

/// Session overrides shared by `preview` and `export`.
#[derive(Args, Clone, Debug)]
pub struct SessionArgs {
    /// Session config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Frame overlay image (overrides the config)
    #[arg(long)]
    pub frame: Option<PathBuf>,

    /// Zoom, -2.0 to 3.0 (values below 0.1 render at 0.1)
    #[arg(long, allow_hyphen_values = true)]
    pub scale: Option<f64>,

    /// Clockwise rotation in degrees, -180 to 180
    #[arg(long, allow_hyphen_values = true)]
    pub rotate: Option<f64>,

    /// Horizontal pan as a fraction of the canvas width
    #[arg(long, allow_hyphen_values = true)]
    pub pan_x: Option<f64>,

    /// Vertical pan as a fraction of the canvas height
    #[arg(long, allow_hyphen_values = true)]
    pub pan_y: Option<f64>,
}

impl SessionArgs {
    /// Load the config (or the default) and apply command-line overrides.
    pub fn resolve(&self) -> Result<FramerConfig> {
        let mut config = match self.config {
            Some(ref path) => load_config(path)?,
            None => FramerConfig::default(),
        };
        if let Some(ref frame) = self.frame {
            config.frame = frame.clone();
        }
        apply_view_overrides(&mut config.viewport, self);
        Ok(config)
    }
}

fn apply_view_overrides(view: &mut ViewportState, args: &SessionArgs) {
    if let Some(scale) = args.scale {
        view.set_scale(scale);
    }
    if let Some(degrees) = args.rotate {
        view.set_rotation(degrees);
    }
    if args.pan_x.is_some() || args.pan_y.is_some() {
        let (x, y) = view.pan();
        view.set_pan(args.pan_x.unwrap_or(x), args.pan_y.unwrap_or(y));
    }
}

pub fn load_config(path: &Path) -> Result<FramerConfig> {
    FramerConfig::load(path).with_context(|| format!("Failed to read config {}", path.display()))
}
