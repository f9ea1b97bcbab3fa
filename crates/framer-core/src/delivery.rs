use std::io::Write;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::consts::OUTPUT_MIME_TYPE;
use crate::error::{FramerError, Result};

/// PNG-encoded export, ready to hand to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl EncodedImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mime_type(&self) -> &'static str {
        OUTPUT_MIME_TYPE
    }

    /// `data:` URI embedding the encoded bytes.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            BASE64_STANDARD.encode(&self.bytes)
        )
    }
}

/// Encode an RGBA buffer as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<EncodedImage> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(EncodedImage {
        bytes,
        width: image.width(),
        height: image.height(),
    })
}

/// How an encoded export reaches the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryMethod {
    /// Write through a transient handle, then persist under the final name.
    TransientHandle,
    /// Hand over the image embedded in a `data:` URI.
    EmbeddedData,
    /// Present the image so the user can save it by hand.
    ManualSave,
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransientHandle => write!(f, "transient handle"),
            Self::EmbeddedData => write!(f, "embedded data"),
            Self::ManualSave => write!(f, "manual save"),
        }
    }
}

/// What the host platform can do with a finished file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformCapabilities {
    pub touch: bool,
    pub file_download: bool,
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self {
            touch: false,
            file_download: true,
        }
    }
}

impl PlatformCapabilities {
    /// Delivery methods to try, in order.
    pub fn plan(&self) -> Vec<DeliveryMethod> {
        match (self.touch, self.file_download) {
            (true, false) => vec![DeliveryMethod::EmbeddedData, DeliveryMethod::ManualSave],
            (true, true) => vec![
                DeliveryMethod::TransientHandle,
                DeliveryMethod::EmbeddedData,
                DeliveryMethod::ManualSave,
            ],
            (false, _) => vec![DeliveryMethod::TransientHandle, DeliveryMethod::EmbeddedData],
        }
    }
}

/// Host-side save mechanism. Receives the complete encoded buffer.
pub trait Persist: Send {
    fn persist(&mut self, encoded: &EncodedImage, suggested_filename: &str) -> Result<()>;
}

/// Primary path: write into a temporary file in `dir`, then atomically
/// rename it to the suggested name. Nothing is left behind on failure.
pub struct TransientFileTarget {
    dir: PathBuf,
}

impl TransientFileTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn destination(&self, suggested_filename: &str) -> PathBuf {
        self.dir.join(suggested_filename)
    }
}

impl Persist for TransientFileTarget {
    fn persist(&mut self, encoded: &EncodedImage, suggested_filename: &str) -> Result<()> {
        let mut handle = tempfile::NamedTempFile::new_in(&self.dir)?;
        handle.write_all(encoded.bytes())?;
        handle.flush()?;
        let destination = self.destination(suggested_filename);
        handle
            .persist(&destination)
            .map_err(|e| FramerError::Io(e.error))?;
        info!(path = %destination.display(), bytes = encoded.len(), "Export written");
        Ok(())
    }
}

/// Fallback path: give the host a `data:` URI it can open or store.
pub struct DataUriTarget<F> {
    sink: F,
}

impl<F> DataUriTarget<F>
where
    F: FnMut(&str, &str) -> Result<()> + Send,
{
    /// `sink` receives `(data_uri, suggested_filename)`.
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<F> Persist for DataUriTarget<F>
where
    F: FnMut(&str, &str) -> Result<()> + Send,
{
    fn persist(&mut self, encoded: &EncodedImage, suggested_filename: &str) -> Result<()> {
        (self.sink)(&encoded.to_data_uri(), suggested_filename)
    }
}

/// Last resort on touch platforms: show the image for a manual save.
pub struct ManualSaveTarget<F> {
    present: F,
}

impl<F> ManualSaveTarget<F>
where
    F: FnMut(&EncodedImage, &str) -> Result<()> + Send,
{
    pub fn new(present: F) -> Self {
        Self { present }
    }
}

impl<F> Persist for ManualSaveTarget<F>
where
    F: FnMut(&EncodedImage, &str) -> Result<()> + Send,
{
    fn persist(&mut self, encoded: &EncodedImage, suggested_filename: &str) -> Result<()> {
        (self.present)(encoded, suggested_filename)
    }
}

/// Write a `data:` URI back out as the image file it embeds.
pub fn write_data_uri(data_uri: &str, path: &Path) -> Result<()> {
    let payload = data_uri
        .split_once(";base64,")
        .map(|(_, b64)| b64)
        .ok_or_else(|| FramerError::delivery(DeliveryMethod::EmbeddedData, "not a base64 data URI"))?;
    let bytes = BASE64_STANDARD
        .decode(payload)
        .map_err(|e| FramerError::delivery(DeliveryMethod::EmbeddedData, e))?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Which method delivered the export, and what failed before it.
#[derive(Clone, Debug)]
pub struct DeliveryReport {
    pub method: DeliveryMethod,
    pub failures: Vec<String>,
    pub bytes: usize,
}

/// Ordered delivery methods, each tried at most once per export.
#[derive(Default)]
pub struct DeliveryChain {
    targets: Vec<(DeliveryMethod, Box<dyn Persist>)>,
}

impl DeliveryChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, method: DeliveryMethod, target: impl Persist + 'static) -> Self {
        self.targets.push((method, Box::new(target)));
        self
    }

    pub fn methods(&self) -> Vec<DeliveryMethod> {
        self.targets.iter().map(|(m, _)| *m).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Try each target in order with the same encoded bytes.
    pub fn deliver(
        &mut self,
        encoded: &EncodedImage,
        suggested_filename: &str,
    ) -> Result<DeliveryReport> {
        let mut failures = Vec::new();
        for (method, target) in self.targets.iter_mut() {
            match target.persist(encoded, suggested_filename) {
                Ok(()) => {
                    info!(%method, file = suggested_filename, "Export delivered");
                    return Ok(DeliveryReport {
                        method: *method,
                        failures,
                        bytes: encoded.len(),
                    });
                }
                Err(e) => {
                    warn!(%method, error = %e, "Delivery failed, trying next method");
                    failures.push(format!("{method}: {e}"));
                }
            }
        }
        Err(FramerError::DeliveryExhausted { attempts: failures })
    }
}
