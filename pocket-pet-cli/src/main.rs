//! Pocket Pet CLI - a terminal dashboard for the pet API.

mod render;
mod sound;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use pocket_pet_core::{
    Action, ClientHandle, Config, ConnectionStatus, Event, EventReceiver, PetClient, UiState,
};
use render::Screen;
use sound::SoundPlayer;

/// Milliseconds between animation frames.
const FRAME_MILLIS: u64 = 33;

/// Pocket Pet - watch and care for a virtual pet from the terminal.
///
/// Polls the pet API on a fixed interval, renders hunger and happiness as
/// animated bars, and sends feed/play actions typed on stdin.
#[derive(Parser, Debug)]
#[command(name = "pocket-pet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the pet API.
    #[arg(
        long = "base-url",
        default_value = "http://localhost:8000",
        env = "POCKET_PET_URL"
    )]
    pub base_url: String,

    /// Seconds between scheduled status polls.
    #[arg(short = 'i', long = "interval", default_value = "30")]
    pub interval: u64,

    /// Fetch the status once, print the dashboard, and exit.
    #[arg(long = "once")]
    pub once: bool,

    /// External command used to play the sound effect (e.g. "paplay").
    ///
    /// Without this the terminal bell is used instead.
    #[arg(long = "sound-cmd", env = "POCKET_PET_SOUND_CMD")]
    pub sound_cmd: Option<String>,

    /// Sound file passed to the sound command.
    #[arg(long = "sound-file")]
    pub sound_file: Option<PathBuf>,

    /// Disable the sound effect entirely.
    #[arg(long = "no-sound")]
    pub no_sound: bool,

    /// Enable verbose logging.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Convert CLI arguments to a client Config.
    pub fn to_config(&self) -> Config {
        Config::new()
            .base_url(&self.base_url)
            .poll_interval_secs(self.interval)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.to_config();
    let (client, events, handle) =
        PetClient::new(config.clone()).context("failed to create pet client")?;
    let client = Arc::new(client);

    if cli.once {
        return run_once(&client, events, &config).await;
    }

    let player = SoundPlayer::new(cli.sound_cmd.clone(), cli.sound_file.clone(), !cli.no_sound);

    // Ctrl-C cancels the poll loop; the Stopped event unwinds the UI.
    let ctrl_c_handle = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_handle.cancel();
        }
    });

    let poll_client = client.clone();
    let poll_task = tokio::spawn(async move { poll_client.run().await });

    let (commands_tx, commands_rx) = mpsc::channel(8);
    tokio::spawn(read_commands(commands_tx, handle.clone()));

    run_dashboard(client, events, commands_rx, &config, player).await?;

    let outcome = poll_task.await.context("poll task panicked")?;
    tracing::info!(polls = outcome.polls, reason = %outcome.reason, "shut down");
    Ok(())
}

/// Consume client events and stdin commands, redrawing the dashboard.
async fn run_dashboard(
    client: Arc<PetClient>,
    mut events: EventReceiver,
    mut commands: mpsc::Receiver<Action>,
    config: &Config,
    player: SoundPlayer,
) -> anyhow::Result<()> {
    let mut ui = UiState::new(config);
    let mut screen = Screen::new();
    let mut frames = tokio::time::interval(Duration::from_millis(FRAME_MILLIS));
    let mut commands_open = true;

    screen.init()?;
    screen.draw(&ui)?;

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(Event::SoundRequested) => player.play(),
                    Some(Event::Stopped { .. }) | None => break,
                    Some(event) => {
                        ui.apply(&event, Instant::now());
                        screen.draw(&ui)?;
                    }
                }
            }
            _ = frames.tick() => {
                if ui.tick(Instant::now()) {
                    screen.draw(&ui)?;
                }
            }
            command = commands.recv(), if commands_open => {
                match command {
                    Some(action) if ui.buttons_enabled() => {
                        let client = client.clone();
                        tokio::spawn(async move { client.perform_action(action).await });
                    }
                    Some(action) => {
                        tracing::info!(%action, "an action is already in flight, ignoring");
                    }
                    None => commands_open = false,
                }
            }
        }
    }

    screen.finish()?;
    Ok(())
}

/// Translate stdin lines into actions; `quit` cancels the poll loop.
async fn read_commands(commands: mpsc::Sender<Action>, handle: ClientHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        match line.trim().to_ascii_lowercase().as_str() {
            "f" | "feed" => {
                let _ = commands.send(Action::Feed).await;
            }
            "p" | "play" => {
                let _ = commands.send(Action::Play).await;
            }
            "q" | "quit" | "exit" => {
                handle.cancel();
                return;
            }
            "" => {}
            other => {
                tracing::warn!(command = other, "unknown command (try feed, play, quit)");
            }
        }
    }
}

/// Fetch the status a single time and print the finished dashboard.
async fn run_once(
    client: &PetClient,
    mut events: EventReceiver,
    config: &Config,
) -> anyhow::Result<()> {
    client.fetch_status().await;

    let mut ui = UiState::new(config);
    let now = Instant::now();
    while let Ok(event) = events.try_recv() {
        ui.apply(&event, now);
    }
    // No frame loop in one-shot mode; jump the bars to their targets.
    while ui.tick(now) {}

    for line in render::frame_lines(&ui) {
        println!("{line}");
    }

    if ui.connection() == ConnectionStatus::Disconnected {
        anyhow::bail!("pet API at {} is unreachable", config.base_url);
    }
    Ok(())
}
