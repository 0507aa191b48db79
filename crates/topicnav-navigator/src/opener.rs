//! Opening targets outside the content pane.

use std::sync::Mutex;

/// Opens a target in a new browsing context.
pub trait ExternalOpener: Send + Sync {
    fn open(&self, target: &str);
}

/// Only logs the request. Used where no browser is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOpener;

impl ExternalOpener for LogOpener {
    fn open(&self, target: &str) {
        tracing::info!("Opening {} in a new window", target);
    }
}

/// Opens targets with the desktop's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open(&self, target: &str) {
        if let Err(e) = open::that_detached(target) {
            tracing::warn!("Failed to open {}: {}", target, e);
        }
    }
}

/// Remembers every target it was asked to open.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets opened so far, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|list| list.clone())
            .unwrap_or_default()
    }
}

impl ExternalOpener for RecordingOpener {
    fn open(&self, target: &str) {
        tracing::debug!("Recording external open of {}", target);
        if let Ok(mut list) = self.opened.lock() {
            list.push(target.to_string());
        }
    }
}
