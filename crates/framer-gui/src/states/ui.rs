use std::path::PathBuf;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub subject_path: Option<PathBuf>,
    pub subject_size: Option<[u32; 2]>,
    pub frame_size: Option<[u32; 2]>,

    /// An export request is queued or running on the worker.
    pub exporting: bool,
    pub last_export: Option<PathBuf>,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.exporting
    }

    /// Export needs both images decoded and no export outstanding.
    pub fn export_ready(&self, has_subject: bool) -> bool {
        has_subject && self.frame_size.is_some() && !self.is_busy()
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
