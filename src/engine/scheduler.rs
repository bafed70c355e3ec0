use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crate::foundation::error::{SceneError, SceneResult};

/// Decides when (and whether) the next frame runs.
pub trait FrameScheduler {
    /// Block until the next frame is due. `false` ends the loop.
    fn next_frame(&mut self) -> bool;
}

/// Runs as fast as possible for a fixed number of frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBudget {
    remaining: u64,
}

impl FrameBudget {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FrameScheduler for FrameBudget {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Paces frames at a wall-clock rate, optionally stopping after `limit` frames.
#[derive(Clone, Debug)]
pub struct FixedRateScheduler {
    period: Duration,
    limit: Option<FrameBudget>,
    next_due: Option<Instant>,
}

impl FixedRateScheduler {
    pub fn new(fps: u32, limit: Option<u64>) -> SceneResult<Self> {
        if fps == 0 {
            return Err(SceneError::validation("fps must be non-zero"));
        }
        Ok(Self {
            period: Duration::from_secs(1) / fps,
            limit: limit.map(FrameBudget::new),
            next_due: None,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn next_frame(&mut self) -> bool {
        if let Some(limit) = self.limit.as_mut()
            && !limit.next_frame()
        {
            return false;
        }
        let now = Instant::now();
        let due = self.next_due.unwrap_or(now);
        if due > now {
            std::thread::sleep(due - now);
        }
        // Late frames do not try to catch up.
        self.next_due = Some(due.max(now) + self.period);
        true
    }
}

/// Shared running flag; clearing it stops the loop after the current frame.
#[derive(Clone, Debug)]
pub struct RunHandle {
    running: Arc<AtomicBool>,
}

impl Default for RunHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl RunHandle {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scheduler.rs"]
mod tests;
