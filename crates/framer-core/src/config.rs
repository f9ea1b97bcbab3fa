use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FRAME_PATH, DEFAULT_OUTPUT_FILENAME};
use crate::delivery::PlatformCapabilities;
use crate::error::{FramerError, Result};
use crate::geometry::LayoutPolicy;
use crate::viewport::ViewportState;

/// A framing session: which frame, where the export goes, how the canvas
/// is laid out, and the transform last applied.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FramerConfig {
    pub frame: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub layout: LayoutPolicy,
    #[serde(default)]
    pub platform: PlatformCapabilities,
    #[serde(default)]
    pub viewport: ViewportState,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            frame: PathBuf::from(DEFAULT_FRAME_PATH),
            output: OutputConfig::default(),
            layout: LayoutPolicy::default(),
            platform: PlatformCapabilities::default(),
            viewport: ViewportState::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            filename: DEFAULT_OUTPUT_FILENAME.to_string(),
        }
    }
}

impl FramerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| FramerError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FramerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Full path of the exported file.
    pub fn output_path(&self) -> PathBuf {
        self.output.directory.join(&self.output.filename)
    }
}
