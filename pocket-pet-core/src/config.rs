//! Configuration for the pet client.
//!
//! This module provides the `Config` struct with a builder pattern for
//! configuring the API base URL, the poll cadence, and the UI timing knobs
//! (bar animation step count, warning flash duration).

use std::time::Duration;

/// Default base URL for the pet API.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default interval between scheduled status polls.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Default number of frames a progress-bar animation runs for.
///
/// The animation is linear in value over a fixed frame count, so its wall
/// clock duration depends on the frontend's frame rate.
const DEFAULT_ANIMATION_STEPS: u32 = 30;

/// Default duration a flashed warning stays on screen.
const DEFAULT_WARNING_MILLIS: u64 = 1500;

/// Configuration for the pet client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the pet API.
    pub base_url: String,

    /// Interval between scheduled status polls.
    pub poll_interval: Duration,

    /// Number of frames a progress-bar animation runs for.
    pub animation_steps: u32,

    /// How long a flashed warning overlays the mood text.
    pub warning_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            animation_steps: DEFAULT_ANIMATION_STEPS,
            warning_duration: Duration::from_millis(DEFAULT_WARNING_MILLIS),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL. A trailing slash is stripped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the interval between scheduled status polls.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the interval between scheduled status polls in seconds.
    pub fn poll_interval_secs(mut self, secs: u64) -> Self {
        self.poll_interval = Duration::from_secs(secs);
        self
    }

    /// Set the number of frames a progress-bar animation runs for.
    pub fn animation_steps(mut self, steps: u32) -> Self {
        self.animation_steps = steps.max(1);
        self
    }

    /// Set how long a flashed warning overlays the mood text.
    pub fn warning_duration(mut self, duration: Duration) -> Self {
        self.warning_duration = duration;
        self
    }
}
