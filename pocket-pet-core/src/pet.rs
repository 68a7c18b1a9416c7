//! Pet state types received from the pet API.
//!
//! This module provides the wire-level types for the pet's state snapshot
//! (hunger, happiness, mood) and the two user-triggered actions. A snapshot
//! is replaced wholesale on every successful fetch; there are no partial
//! merges.

use serde::Deserialize;

/// Icon shown while the client is in the disconnected sentinel state.
pub const WARNING_ICON: &str = "⚠️";

/// Mood text shown while the client is in the disconnected sentinel state.
pub const DISCONNECTED_TEXT: &str = "Disconnected";

/// Icon shown for mood values the client does not recognize.
pub const FALLBACK_ICON: &str = "🙂";

/// Categorical pet emotional state, derived server-side.
///
/// Unrecognized mood strings deserialize into [`Mood::Unknown`] carrying the
/// raw value, so a newer server can introduce moods without breaking older
/// clients. Unknown moods render with the fallback icon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Mood {
    Delighted,
    Content,
    Neutral,
    Sad,
    /// A mood string this client does not know. Carries the raw value.
    Unknown(String),
}

impl Mood {
    /// Get the icon glyph for this mood.
    ///
    /// Unknown moods fall back to [`FALLBACK_ICON`] rather than failing.
    pub fn icon(&self) -> &'static str {
        match self {
            Mood::Delighted => "✨",
            Mood::Content => "😊",
            Mood::Neutral => "😐",
            Mood::Sad => "😢",
            Mood::Unknown(_) => FALLBACK_ICON,
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Unknown(String::new())
    }
}

impl From<String> for Mood {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Delighted" => Mood::Delighted,
            "Content" => Mood::Content,
            "Neutral" => Mood::Neutral,
            "Sad" => Mood::Sad,
            _ => Mood::Unknown(value),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mood::Delighted => write!(f, "Delighted"),
            Mood::Content => write!(f, "Content"),
            Mood::Neutral => write!(f, "Neutral"),
            Mood::Sad => write!(f, "Sad"),
            Mood::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// A snapshot of the pet's state as returned by the API.
///
/// Every field defaults when absent; the client renders whatever the server
/// sent rather than rejecting a partially populated body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PetState {
    /// The pet's name, if the server sends one.
    #[serde(default)]
    pub name: Option<String>,

    /// Hunger level, 0 (full) to 100 (starving).
    #[serde(default)]
    pub hunger: f64,

    /// Happiness level, 0 (depressed) to 100 (joyful).
    #[serde(default)]
    pub happiness: f64,

    /// The pet's mood, derived server-side.
    #[serde(default)]
    pub mood: Mood,

    /// Whether the action that produced this response was allowed.
    ///
    /// Only present on action responses. `Some(false)` is a normal denial
    /// communicated via the body, not a transport-level error.
    #[serde(default)]
    pub action_allowed: Option<bool>,
}

impl PetState {
    /// Hunger rounded to an integer percentage, for display.
    pub fn hunger_percent(&self) -> i64 {
        self.hunger.round() as i64
    }

    /// Happiness rounded to an integer percentage, for display.
    pub fn happiness_percent(&self) -> i64 {
        self.happiness.round() as i64
    }
}

/// A user-triggered mutation request sent to the pet API.
///
/// The two variants are the only entry points; there is no string-typed
/// action surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Feed the pet (`POST /feed`).
    Feed,
    /// Play with the pet (`POST /play`). May be denied by the server.
    Play,
}

impl Action {
    /// Get the URL path segment for this action.
    pub fn path(&self) -> &'static str {
        match self {
            Action::Feed => "feed",
            Action::Play => "play",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// The outcome of the last completed network operation.
///
/// Orthogonal to the loading overlay: a request can be in flight while the
/// client is still considered connected from its last completed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// The last fetch or action succeeded.
    Connected,
    /// The last fetch or action failed; the sentinel UI is shown.
    Disconnected,
}
