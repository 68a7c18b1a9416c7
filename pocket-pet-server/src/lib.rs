//! Pocket Pet API server.
//!
//! The authoritative pet model behind three endpoints: `GET /status`,
//! `POST /feed`, and `POST /play`. The pet decays over time — hunger rises
//! and happiness falls — and the decay is applied lazily before every read
//! or mutation, so the pet stays "alive" without a background task. The
//! same router serves production traffic and the core crate's integration
//! tests.

use std::sync::Arc;

use axum::{extract::State, routing::get, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::cors::CorsLayer;

/// Name of the default pet.
pub const DEFAULT_PET_NAME: &str = "Nova";

/// Starting hunger level (0 = full, 100 = starving).
const INITIAL_HUNGER: f64 = 50.0;

/// Starting happiness level (0 = depressed, 100 = joyful).
const INITIAL_HAPPINESS: f64 = 70.0;

/// Hunger gained per minute of neglect.
const HUNGER_PER_MINUTE: f64 = 1.5;

/// Happiness lost per minute of neglect.
const HAPPINESS_LOSS_PER_MINUTE: f64 = 1.0;

/// Hunger level at or above which the pet refuses to play.
const TOO_HUNGRY_TO_PLAY: f64 = 80.0;

/// The authoritative pet state.
#[derive(Debug, Clone)]
pub struct Pet {
    name: String,
    hunger: f64,
    happiness: f64,
    last_updated: DateTime<Utc>,
}

impl Pet {
    /// Create a pet with the default starting stats.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with_stats(name, INITIAL_HUNGER, INITIAL_HAPPINESS, now)
    }

    /// Create a pet with explicit stats. Used to stage test scenarios like
    /// a pet too hungry to play.
    pub fn with_stats(
        name: impl Into<String>,
        hunger: f64,
        happiness: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            hunger,
            happiness,
            last_updated: now,
        }
    }

    /// Apply time-based decay for the interval since the last update.
    fn apply_time_decay(&mut self, now: DateTime<Utc>) {
        let elapsed_minutes = (now - self.last_updated).num_milliseconds() as f64 / 60_000.0;
        if elapsed_minutes <= 0.0 {
            return;
        }

        self.hunger = (self.hunger + elapsed_minutes * HUNGER_PER_MINUTE).min(100.0);
        self.happiness = (self.happiness - elapsed_minutes * HAPPINESS_LOSS_PER_MINUTE).max(0.0);
        self.last_updated = now;
    }

    /// Feed the pet: hunger drops, happiness nudges up.
    pub fn feed(&mut self, now: DateTime<Utc>) {
        self.apply_time_decay(now);
        self.hunger = (self.hunger - 25.0).max(0.0);
        self.happiness = (self.happiness + 5.0).min(100.0);
    }

    /// Play with the pet. Returns false when the pet is too hungry to play;
    /// in that case only the time decay is applied.
    pub fn play(&mut self, now: DateTime<Utc>) -> bool {
        self.apply_time_decay(now);

        if self.hunger >= TOO_HUNGRY_TO_PLAY {
            return false;
        }

        self.happiness = (self.happiness + 20.0).min(100.0);
        self.hunger = (self.hunger + 10.0).min(100.0);
        true
    }

    /// Derive the pet's mood. Hunger drags the mood down at half weight.
    pub fn mood(&self) -> &'static str {
        let mood_score = self.happiness - self.hunger * 0.5;

        if mood_score >= 70.0 {
            "Delighted"
        } else if mood_score >= 50.0 {
            "Content"
        } else if mood_score >= 30.0 {
            "Neutral"
        } else {
            "Sad"
        }
    }

    /// Apply decay and snapshot the pet for the wire.
    pub fn status(&mut self, now: DateTime<Utc>) -> PetStatus {
        self.apply_time_decay(now);
        PetStatus {
            name: self.name.clone(),
            hunger: self.hunger.round() as i64,
            happiness: self.happiness.round() as i64,
            mood: self.mood().to_string(),
            action_allowed: None,
        }
    }
}

/// Wire representation of the pet, as returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PetStatus {
    pub name: String,
    pub hunger: i64,
    pub happiness: i64,
    pub mood: String,
    /// Present only on action responses; `Some(false)` communicates a
    /// denial without being an HTTP error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_allowed: Option<bool>,
}

/// Shared, mutable pet state behind the router.
pub type SharedPet = Arc<RwLock<Pet>>;

/// Wrap a pet for sharing with the router.
pub fn shared(pet: Pet) -> SharedPet {
    Arc::new(RwLock::new(pet))
}

/// Build the router with a freshly hatched default pet.
pub fn app() -> Router {
    app_with_pet(shared(Pet::new(DEFAULT_PET_NAME, Utc::now())))
}

/// Build the router around an existing pet.
pub fn app_with_pet(pet: SharedPet) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/feed", post(feed_pet))
        .route("/play", post(play_pet))
        .layer(CorsLayer::permissive())
        .with_state(pet)
}

/// Serve the default app on the given listener until the process dies.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_status(State(pet): State<SharedPet>) -> Json<PetStatus> {
    let mut pet = pet.write().await;
    Json(pet.status(Utc::now()))
}

async fn feed_pet(State(pet): State<SharedPet>) -> Json<PetStatus> {
    let now = Utc::now();
    let mut pet = pet.write().await;
    pet.feed(now);
    let status = pet.status(now);
    tracing::debug!(hunger = status.hunger, happiness = status.happiness, "pet fed");
    Json(status)
}

async fn play_pet(State(pet): State<SharedPet>) -> Json<PetStatus> {
    let now = Utc::now();
    let mut pet = pet.write().await;
    let allowed = pet.play(now);
    let mut status = pet.status(now);
    status.action_allowed = Some(allowed);
    tracing::debug!(allowed, happiness = status.happiness, "pet play requested");
    Json(status)
}
