//! Display state for the diagnosis and query regions.
//!
//! Pure state: the egui layer reads it each frame, the request layer writes
//! it. A failed request never touches what is on screen.

use crate::error::RequestError;
use crate::markup::{document_text, fragment_text};
use crate::net::diagnosis::AnalyzeResponse;
use crate::net::query::{DataSource, QueryResponse};

pub const IDLE_TEXT: &str = "Awaiting biometric scan";
pub const SCANNING_TEXT: &str = "Scanning Biometrics...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Scanning,
    Displayed,
}

/// Status line plus tip list.
#[derive(Debug, Clone)]
pub struct DiagnosisPanel {
    status: String,
    tips: Vec<String>,
    phase: ScanPhase,
}

impl Default for DiagnosisPanel {
    fn default() -> Self {
        Self {
            status: IDLE_TEXT.to_string(),
            tips: Vec::new(),
            phase: ScanPhase::Idle,
        }
    }
}

impl DiagnosisPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Called synchronously with the trigger, before the request is sent.
    pub fn begin_scan(&mut self) {
        self.status = SCANNING_TEXT.to_string();
        self.phase = ScanPhase::Scanning;
    }

    /// Write the analyzer's answer. Tips are replaced only when the reply
    /// carries a list; otherwise the previous ones stay.
    pub fn show(&mut self, response: &AnalyzeResponse) {
        self.status = format!("Diagnosis: {}", response.diagnosis);
        if let Some(tips) = &response.tips {
            self.tips = tips.iter().map(|t| fragment_text(t)).collect();
        }
        self.phase = ScanPhase::Displayed;
    }

    /// Log a failed scan. Status and tips stay as they were.
    pub fn fail(&mut self, err: &RequestError) {
        match err {
            RequestError::Cancelled => log::debug!("Scan superseded"),
            _ => log::error!("Biometric scan failed: {}", err),
        }
    }
}

/// Free-text query box and its last reply.
#[derive(Debug, Clone, Default)]
pub struct QueryPanel {
    pub input: String,
    reply: Option<String>,
    source: Option<DataSource>,
    pending: bool,
}

impl QueryPanel {
    pub fn reply(&self) -> Option<&str> {
        self.reply.as_deref()
    }

    pub fn source(&self) -> Option<DataSource> {
        self.source
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn begin(&mut self) {
        self.pending = true;
    }

    pub fn show(&mut self, response: &QueryResponse) {
        self.reply = Some(document_text(&response.reply));
        self.source = Some(response.source);
        self.pending = false;
    }

    /// Previous reply stays on screen.
    pub fn fail(&mut self, err: &RequestError) {
        self.pending = false;
        match err {
            RequestError::Cancelled => log::debug!("Query superseded"),
            _ => log::error!("Clinical query failed: {}", err),
        }
    }
}
