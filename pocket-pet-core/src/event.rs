//! Event system for the pet client.
//!
//! This module provides an event-driven architecture for communicating UI
//! changes from the client to a frontend (CLI, TUI). State snapshots,
//! loading/button flags, warning flashes, and sound requests all flow
//! through this channel-based system; the frontend owns the render model
//! and applies events to it.

use tokio::sync::mpsc;

use crate::pet::PetState;

/// Default channel buffer size.
const DEFAULT_CHANNEL_SIZE: usize = 100;

/// Events emitted by the client as it polls and performs actions.
#[derive(Debug, Clone)]
pub enum Event {
    /// The loading indicator turned on or off.
    ///
    /// Emitted around every network call, on both exit paths.
    Loading {
        /// Whether a request is currently in flight.
        active: bool,
    },

    /// The action buttons were enabled or disabled.
    ///
    /// Emitted around every user action; buttons are always re-enabled after
    /// the action completes, success or failure.
    ButtonsEnabled {
        /// Whether the buttons accept input.
        enabled: bool,
    },

    /// A fresh pet state snapshot was received and should be rendered.
    StateUpdated {
        /// The new snapshot. Replaces any previously held state.
        state: PetState,
    },

    /// The last network operation failed; render the sentinel UI.
    Disconnected,

    /// A transient warning should overlay the mood text.
    WarningFlashed {
        /// The warning text.
        text: String,
    },

    /// A successful action wants the sound effect played, from the start.
    SoundRequested,

    /// The poll loop has stopped.
    Stopped {
        /// Number of status polls completed (including the initial fetch).
        polls: u32,
        /// Why the loop stopped.
        reason: StopReason,
    },
}

/// Reasons for the poll loop stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Externally cancelled via the client handle.
    Cancelled,
    /// The event receiver was dropped; nobody is rendering anymore.
    ChannelClosed,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Cancelled => write!(f, "cancelled"),
            StopReason::ChannelClosed => write!(f, "event channel closed"),
        }
    }
}

/// Sender for events.
pub type EventSender = mpsc::Sender<Event>;

/// Receiver for events.
pub type EventReceiver = mpsc::Receiver<Event>;

/// Create a new event channel with the default buffer size.
///
/// Returns a sender and receiver pair for event communication.
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_SIZE)
}

impl Event {
    /// Create a loading indicator event.
    pub fn loading(active: bool) -> Self {
        Self::Loading { active }
    }

    /// Create a button enablement event.
    pub fn buttons(enabled: bool) -> Self {
        Self::ButtonsEnabled { enabled }
    }

    /// Create a state update event.
    pub fn state(state: PetState) -> Self {
        Self::StateUpdated { state }
    }

    /// Create a warning flash event with the given text.
    pub fn warning(text: impl Into<String>) -> Self {
        Self::WarningFlashed { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_creation() {
        let (tx, _rx) = channel();
        // Should be able to send without blocking
        tx.try_send(Event::loading(true)).unwrap();
    }

    #[test]
    fn test_event_constructors() {
        assert!(matches!(Event::loading(true), Event::Loading { active: true }));
        assert!(matches!(
            Event::buttons(false),
            Event::ButtonsEnabled { enabled: false }
        ));
        assert!(
            matches!(Event::warning("too hungry"), Event::WarningFlashed { text } if text == "too hungry")
        );
    }

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(StopReason::Cancelled.to_string(), "cancelled");
        assert_eq!(StopReason::ChannelClosed.to_string(), "event channel closed");
    }
}
