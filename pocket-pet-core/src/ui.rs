//! Render model for the pet widget.
//!
//! This module provides `UiState`, the single application-state object a
//! frontend draws from. It is mutated only through [`UiState::apply`] (one
//! event at a time) and [`UiState::tick`] (one animation frame at a time),
//! so every visual rule — exact labels, animated bars, the disconnected
//! sentinel, the transient warning overlay — lives in one testable place.

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::event::Event;
use crate::pet::{ConnectionStatus, Mood, PetState, DISCONNECTED_TEXT, FALLBACK_ICON, WARNING_ICON};

/// A linear progress-bar animation over a fixed number of frames.
///
/// The animation is linear in value, not in wall-clock time: each call to
/// [`advance`](BarAnimation::advance) moves one frame, and the final frame
/// lands exactly on the target regardless of direction.
#[derive(Debug, Clone)]
pub struct BarAnimation {
    start: f64,
    target: f64,
    steps: u32,
    step: u32,
}

impl BarAnimation {
    /// Create an animation from `start` to `target` over `steps` frames.
    pub fn new(start: f64, target: f64, steps: u32) -> Self {
        Self {
            start,
            target,
            steps: steps.max(1),
            step: 0,
        }
    }

    /// Create a finished animation resting at `value`.
    pub fn idle(value: f64) -> Self {
        Self {
            start: value,
            target: value,
            steps: 1,
            step: 1,
        }
    }

    /// The currently displayed value.
    pub fn value(&self) -> f64 {
        if self.step >= self.steps {
            // Land exactly on the target, no interpolation residue.
            self.target
        } else {
            self.start + (self.target - self.start) * f64::from(self.step) / f64::from(self.steps)
        }
    }

    /// The value this animation is heading toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Advance one frame and return the new displayed value.
    pub fn advance(&mut self) -> f64 {
        if self.step < self.steps {
            self.step += 1;
        }
        self.value()
    }

    /// Whether the animation has reached its target.
    pub fn is_done(&self) -> bool {
        self.step >= self.steps
    }
}

/// A transient warning overlaying the mood text.
#[derive(Debug, Clone)]
struct Warning {
    text: String,
    expires_at: Instant,
}

/// The widget's complete render state.
///
/// Holds displayed bar values, exact percentage labels, mood icon and text,
/// the warning overlay, the loading flag, and button enablement. When the
/// warning overlay expires it reveals whatever the mood text currently is —
/// a render that happened mid-flash is never overwritten by a stale capture.
#[derive(Debug, Clone)]
pub struct UiState {
    animation_steps: u32,
    warning_duration: Duration,
    hunger_bar: BarAnimation,
    happiness_bar: BarAnimation,
    hunger_label: String,
    happiness_label: String,
    name: Option<String>,
    mood_icon: &'static str,
    mood_text: String,
    warning: Option<Warning>,
    loading: bool,
    buttons_enabled: bool,
    connection: ConnectionStatus,
    state: Option<PetState>,
}

impl UiState {
    /// Create a fresh render state with both bars at zero.
    pub fn new(config: &Config) -> Self {
        Self {
            animation_steps: config.animation_steps,
            warning_duration: config.warning_duration,
            hunger_bar: BarAnimation::idle(0.0),
            happiness_bar: BarAnimation::idle(0.0),
            hunger_label: "0%".to_string(),
            happiness_label: "0%".to_string(),
            name: None,
            mood_icon: FALLBACK_ICON,
            mood_text: String::new(),
            warning: None,
            loading: false,
            buttons_enabled: true,
            connection: ConnectionStatus::Connected,
            state: None,
        }
    }

    /// Apply a client event to the render state.
    pub fn apply(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Loading { active } => self.loading = *active,
            Event::ButtonsEnabled { enabled } => self.buttons_enabled = *enabled,
            Event::StateUpdated { state } => self.render_state(state),
            Event::Disconnected => {
                self.connection = ConnectionStatus::Disconnected;
                self.mood_icon = WARNING_ICON;
                self.mood_text = DISCONNECTED_TEXT.to_string();
            }
            Event::WarningFlashed { text } => {
                self.warning = Some(Warning {
                    text: text.clone(),
                    expires_at: now + self.warning_duration,
                });
            }
            // Sound and shutdown are frontend concerns, not render state.
            Event::SoundRequested | Event::Stopped { .. } => {}
        }
    }

    /// Advance one animation frame and expire any elapsed warning.
    ///
    /// Returns true when something changed and the frontend should redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut dirty = false;

        if !self.hunger_bar.is_done() {
            self.hunger_bar.advance();
            dirty = true;
        }
        if !self.happiness_bar.is_done() {
            self.happiness_bar.advance();
            dirty = true;
        }

        if let Some(warning) = &self.warning {
            if now >= warning.expires_at {
                self.warning = None;
                dirty = true;
            }
        }

        dirty
    }

    /// Replace the held snapshot and restart both bar animations.
    ///
    /// Labels jump to their exact values immediately; only the bars animate.
    /// Each bar restarts from whatever value it currently displays, so an
    /// update landing mid-animation truncates the old one instead of jumping.
    fn render_state(&mut self, state: &PetState) {
        let hunger = state.hunger.clamp(0.0, 100.0);
        let happiness = state.happiness.clamp(0.0, 100.0);

        self.hunger_bar = BarAnimation::new(self.hunger_bar.value(), hunger, self.animation_steps);
        self.happiness_bar =
            BarAnimation::new(self.happiness_bar.value(), happiness, self.animation_steps);

        self.hunger_label = format!("{}%", state.hunger_percent());
        self.happiness_label = format!("{}%", state.happiness_percent());

        if state.name.is_some() {
            self.name = state.name.clone();
        }
        self.mood_icon = state.mood.icon();
        self.mood_text = state.mood.to_string();

        self.connection = ConnectionStatus::Connected;
        self.state = Some(state.clone());
    }

    /// The currently displayed hunger bar value, 0–100.
    pub fn hunger_bar(&self) -> f64 {
        self.hunger_bar.value()
    }

    /// The currently displayed happiness bar value, 0–100.
    pub fn happiness_bar(&self) -> f64 {
        self.happiness_bar.value()
    }

    /// The exact hunger label, e.g. `"42%"`.
    pub fn hunger_label(&self) -> &str {
        &self.hunger_label
    }

    /// The exact happiness label, e.g. `"70%"`.
    pub fn happiness_label(&self) -> &str {
        &self.happiness_label
    }

    /// The pet's name, once a snapshot has carried one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The mood icon glyph currently shown.
    pub fn mood_icon(&self) -> &'static str {
        self.mood_icon
    }

    /// The mood line currently shown: the warning text while a flash is
    /// live, otherwise the mood name or the disconnected sentinel.
    pub fn mood_text(&self) -> &str {
        match &self.warning {
            Some(warning) => &warning.text,
            None => &self.mood_text,
        }
    }

    /// Whether a warning flash is currently overlaying the mood text.
    pub fn warning_active(&self) -> bool {
        self.warning.is_some()
    }

    /// Whether a request is currently in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Whether the action buttons accept input.
    pub fn buttons_enabled(&self) -> bool {
        self.buttons_enabled
    }

    /// The outcome of the last completed network operation.
    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    /// Whether any bar animation still has frames to run.
    pub fn animating(&self) -> bool {
        !self.hunger_bar.is_done() || !self.happiness_bar.is_done()
    }

    /// The last successfully rendered snapshot, if any.
    pub fn last_state(&self) -> Option<&PetState> {
        self.state.as_ref()
    }

    /// The mood of the last rendered snapshot.
    pub fn mood(&self) -> Option<&Mood> {
        self.state.as_ref().map(|s| &s.mood)
    }
}
