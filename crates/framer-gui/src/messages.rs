use std::path::PathBuf;
use std::time::Duration;

use framer_core::asset::ImageAsset;
use framer_core::config::FramerConfig;
use framer_core::delivery::{DeliveryReport, PlatformCapabilities};
use framer_core::export::SkipReason;
use framer_core::viewport::ViewportSnapshot;

/// Everything an export needs, captured when the user clicks Export.
pub struct ExportRequest {
    pub subject: ImageAsset,
    pub frame: PathBuf,
    pub view: ViewportSnapshot,
    pub output_dir: PathBuf,
    pub filename: String,
    pub platform: PlatformCapabilities,
}

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode a new subject photo.
    LoadSubject { path: PathBuf },

    /// Decode the frame overlay (startup, or after a session import).
    LoadFrame { path: PathBuf },

    /// Composite at frame resolution and deliver.
    Export(ExportRequest),
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    SubjectLoaded {
        path: PathBuf,
        asset: ImageAsset,
        elapsed: Duration,
    },
    FrameLoaded {
        path: PathBuf,
        asset: ImageAsset,
    },
    ExportComplete {
        report: DeliveryReport,
        destination: PathBuf,
        elapsed: Duration,
    },
    ExportSkipped {
        reason: SkipReason,
    },
    ExportFailed {
        message: String,
    },
    /// Embedded-data fallback: the UI places the URI on the clipboard.
    EmbeddedData {
        uri: String,
        filename: String,
    },
    SessionImported {
        config: Box<FramerConfig>,
    },
    OutputDirChosen {
        path: PathBuf,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
