//! The pet client: polling, user actions, and event emission.
//!
//! This module provides the `PetClient` struct that owns the API handle and
//! the recurring synchronization loop, plus a `ClientHandle` for cancelling
//! the loop from another task. All UI changes are communicated through the
//! event channel; the client itself never renders.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use crate::api::PetApi;
use crate::config::Config;
use crate::error::Result;
use crate::event::{channel, Event, EventReceiver, EventSender, StopReason};
use crate::pet::Action;

/// Warning flashed when the server denies a play request.
pub const PLAY_DENIED_TEXT: &str = "Too hungry to play 😴";

/// The pet client.
///
/// Orchestrates the initial fetch, the fixed-interval poll loop, and
/// user-triggered actions. Methods take `&self`, so the client can be shared
/// (for example in an `Arc`) between the poll task and an input task. A poll
/// and an action may be in flight simultaneously; their completions
/// interleave and the last `StateUpdated` wins. There is deliberately no
/// sequencing between them.
#[derive(Debug)]
pub struct PetClient {
    /// Configuration for the client.
    config: Config,
    /// HTTP access to the pet API.
    api: PetApi,
    /// Event sender for communicating with the frontend.
    events: EventSender,
    /// Shared cancellation flag.
    cancel_flag: Arc<AtomicBool>,
    /// Wakes the poll loop out of its sleep on cancellation.
    cancel_notify: Arc<Notify>,
}

/// Handle for controlling a running pet client.
///
/// This handle can be cloned and used to cancel the poll loop from another
/// task, giving the recurring timer a deterministic teardown path.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    cancel_flag: Arc<AtomicBool>,
    cancel_notify: Arc<Notify>,
}

impl ClientHandle {
    /// Signal the poll loop to stop at the next opportunity.
    ///
    /// Wakes the loop immediately if it is sleeping between polls.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
        self.cancel_notify.notify_waiters();
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }
}

/// The outcome of a finished poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Number of status polls completed, including the initial fetch.
    pub polls: u32,
    /// Why the loop stopped.
    pub reason: StopReason,
}

impl PetClient {
    /// Create a new client with the given configuration.
    ///
    /// Returns a tuple of (PetClient, EventReceiver, ClientHandle).
    /// - The `PetClient` performs fetches and actions and runs the poll loop.
    /// - The `EventReceiver` delivers UI events to the frontend.
    /// - The `ClientHandle` cancels the poll loop.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBaseUrl` if the configured base URL does not
    /// parse. Construction is the startup boundary; a bad URL fails fast
    /// here rather than on every poll.
    pub fn new(config: Config) -> Result<(Self, EventReceiver, ClientHandle)> {
        let api = PetApi::new(&config.base_url)?;
        let (tx, rx) = channel();
        let cancel_flag = Arc::new(AtomicBool::new(false));
        let cancel_notify = Arc::new(Notify::new());

        let client = Self {
            config,
            api,
            events: tx,
            cancel_flag: cancel_flag.clone(),
            cancel_notify: cancel_notify.clone(),
        };

        let handle = ClientHandle {
            cancel_flag,
            cancel_notify,
        };

        Ok((client, rx, handle))
    }

    /// Get the client configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if cancellation has been requested.
    fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }

    /// Send an event, ignoring a closed channel.
    async fn emit(&self, event: Event) {
        let _ = self.events.send(event).await;
    }

    /// Fetch the current pet state and emit the result.
    ///
    /// Shows the loading indicator for the duration of the call. On success
    /// emits `StateUpdated`; on any failure — transport error, non-2xx
    /// status, malformed body — emits `Disconnected`. Failures are terminal
    /// for this call and never returned to the caller. The loading indicator
    /// is cleared on both exit paths.
    pub async fn fetch_status(&self) {
        self.emit(Event::loading(true)).await;

        match self.api.status().await {
            Ok(state) => {
                self.emit(Event::state(state)).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "status fetch failed");
                self.emit(Event::Disconnected).await;
            }
        }

        self.emit(Event::loading(false)).await;
    }

    /// Perform a user action and emit the result.
    ///
    /// Disables both action buttons and shows the loading indicator for the
    /// duration; both are restored on every exit path. On success emits the
    /// new state, then either a warning flash (a play denied via
    /// `action_allowed: false` — a normal response, not an error) or a sound
    /// request. On failure emits `Disconnected` and requests no sound.
    pub async fn perform_action(&self, action: Action) {
        self.emit(Event::buttons(false)).await;
        self.emit(Event::loading(true)).await;

        match self.api.act(action).await {
            Ok(state) => {
                let denied = action == Action::Play && state.action_allowed == Some(false);
                self.emit(Event::state(state)).await;
                if denied {
                    self.emit(Event::warning(PLAY_DENIED_TEXT)).await;
                } else {
                    self.emit(Event::SoundRequested).await;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, %action, "action failed");
                self.emit(Event::Disconnected).await;
            }
        }

        self.emit(Event::buttons(true)).await;
        self.emit(Event::loading(false)).await;
    }

    /// Run the synchronization loop.
    ///
    /// Performs one immediate status fetch, then refetches on a fixed
    /// interval until cancelled. There is no retry or backoff: a failed poll
    /// renders the sentinel and recovery happens on whichever of the next
    /// scheduled poll or the next user action succeeds first.
    pub async fn run(&self) -> Outcome {
        tracing::info!(
            base_url = %self.api.base_url(),
            interval_secs = self.config.poll_interval.as_secs_f64(),
            "starting pet sync loop"
        );

        self.fetch_status().await;
        let mut polls: u32 = 1;

        loop {
            if self.is_cancelled() {
                return self.stop(polls, StopReason::Cancelled).await;
            }
            if self.events.is_closed() {
                return self.stop(polls, StopReason::ChannelClosed).await;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_interval) => {}
                _ = self.cancel_notify.notified() => {}
            }

            if self.is_cancelled() {
                return self.stop(polls, StopReason::Cancelled).await;
            }

            self.fetch_status().await;
            polls += 1;
        }
    }

    /// Emit the stop event and build the outcome.
    async fn stop(&self, polls: u32, reason: StopReason) -> Outcome {
        tracing::info!(polls, %reason, "pet sync loop stopped");
        self.emit(Event::Stopped { polls, reason }).await;
        Outcome { polls, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn collect_pending(rx: &mut EventReceiver) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_client_handle_cancel() {
        let (_client, _rx, handle) = PetClient::new(Config::new()).unwrap();
        assert!(!handle.is_cancelled());
        handle.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_client_handle_clone_shares_flag() {
        let (_client, _rx, handle) = PetClient::new(Config::new()).unwrap();
        let clone = handle.clone();
        clone.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let config = Config::new().base_url("definitely not a url");
        assert!(PetClient::new(config).is_err());
    }

    #[tokio::test]
    async fn test_run_cancelled_before_start() {
        let (client, mut rx, handle) = PetClient::new(
            // Unroutable port; the initial fetch fails fast with a refusal.
            Config::new().base_url(format!("http://127.0.0.1:{}", free_port())),
        )
        .unwrap();

        handle.cancel();
        let outcome = client.run().await;
        assert_eq!(outcome.reason, StopReason::Cancelled);
        assert_eq!(outcome.polls, 1);

        let events = collect_pending(&mut rx);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::Disconnected)));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::Stopped { .. })));
    }

    #[tokio::test]
    async fn test_fetch_failure_brackets_loading_and_renders_sentinel() {
        let (client, mut rx, _handle) = PetClient::new(
            Config::new().base_url(format!("http://127.0.0.1:{}", free_port())),
        )
        .unwrap();

        client.fetch_status().await;

        let events = collect_pending(&mut rx);
        assert!(matches!(events.first(), Some(Event::Loading { active: true })));
        assert!(matches!(events.last(), Some(Event::Loading { active: false })));
        assert!(events.iter().any(|e| matches!(e, Event::Disconnected)));
        assert!(!events.iter().any(|e| matches!(e, Event::StateUpdated { .. })));
    }

    #[tokio::test]
    async fn test_action_failure_reenables_buttons_and_plays_no_sound() {
        let (client, mut rx, _handle) = PetClient::new(
            Config::new().base_url(format!("http://127.0.0.1:{}", free_port())),
        )
        .unwrap();

        client.perform_action(Action::Play).await;

        let events = collect_pending(&mut rx);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ButtonsEnabled { enabled: false })));
        assert!(events.iter().any(|e| matches!(e, Event::Disconnected)));
        assert!(matches!(events.last(), Some(Event::Loading { active: false })));
        assert!(events
            .iter()
            .rev()
            .any(|e| matches!(e, Event::ButtonsEnabled { enabled: true })));
        assert!(!events.iter().any(|e| matches!(e, Event::SoundRequested)));
    }

    #[tokio::test]
    async fn test_run_stops_when_receiver_dropped() {
        let (client, rx, _handle) = PetClient::new(
            Config::new()
                .base_url(format!("http://127.0.0.1:{}", free_port()))
                .poll_interval(Duration::from_millis(10)),
        )
        .unwrap();

        drop(rx);
        let outcome = client.run().await;
        assert_eq!(outcome.reason, StopReason::ChannelClosed);
    }

    /// Bind an ephemeral port and release it, yielding an address that
    /// refuses connections.
    fn free_port() -> u16 {
        std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port()
    }
}
