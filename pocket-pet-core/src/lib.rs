//! Pocket Pet core library
//!
//! This crate provides the client side of the pocket-pet widget: the pet
//! state model, the HTTP API client, the event system, the UI render model
//! with animated progress bars, and the polling client with a cancellable
//! synchronization loop.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod pet;
pub mod ui;

pub use api::PetApi;
pub use client::{ClientHandle, Outcome, PetClient, PLAY_DENIED_TEXT};
pub use config::Config;
pub use error::{Error, Result};
pub use event::{channel, Event, EventReceiver, EventSender, StopReason};
pub use pet::{Action, ConnectionStatus, Mood, PetState};
pub use ui::{BarAnimation, UiState};
