use std::{cell::RefCell, rc::Rc};

use crate::config::model::OverlayConfig;

/// Credits shown once the ground has settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayInfo {
    pub title: String,
    pub lines: Vec<String>,
}

impl From<&OverlayConfig> for OverlayInfo {
    fn from(cfg: &OverlayConfig) -> Self {
        Self {
            title: cfg.title.clone(),
            lines: cfg.lines.clone(),
        }
    }
}

/// Surface the coordinator hands the credits to. Called at most once per run.
pub trait InfoOverlay {
    fn reveal(&mut self, info: &OverlayInfo);
}

/// Writes the credits to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogOverlay;

impl InfoOverlay for LogOverlay {
    fn reveal(&mut self, info: &OverlayInfo) {
        tracing::info!(title = %info.title, "overlay revealed");
        for line in &info.lines {
            tracing::info!("{line}");
        }
    }
}

/// Keeps every revealed overlay; clones share the same record.
#[derive(Clone, Debug, Default)]
pub struct RecordingOverlay {
    revealed: Rc<RefCell<Vec<OverlayInfo>>>,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revealed(&self) -> Vec<OverlayInfo> {
        self.revealed.borrow().clone()
    }
}

impl InfoOverlay for RecordingOverlay {
    fn reveal(&mut self, info: &OverlayInfo) {
        self.revealed.borrow_mut().push(info.clone());
    }
}
