//! Best-effort sound playback.
//!
//! Each playback request spawns a fresh instance of the configured player
//! command, so the effect always restarts from the beginning of the file.
//! With no player configured the terminal bell stands in. Playback failures
//! are swallowed entirely; a silent pet is not an error.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

/// The sound effect player.
#[derive(Debug, Clone)]
pub struct SoundPlayer {
    /// External player command, e.g. `paplay` or `afplay`.
    command: Option<String>,
    /// Sound file passed to the player.
    file: Option<PathBuf>,
    /// Whether playback is enabled at all.
    enabled: bool,
}

impl SoundPlayer {
    pub fn new(command: Option<String>, file: Option<PathBuf>, enabled: bool) -> Self {
        Self {
            command,
            file,
            enabled,
        }
    }

    /// Request one playback, restarted from time zero.
    pub fn play(&self) {
        if !self.enabled {
            return;
        }

        match &self.command {
            Some(player) => {
                let mut cmd = Command::new(player);
                if let Some(file) = &self.file {
                    cmd.arg(file);
                }
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null());

                if let Err(e) = cmd.spawn() {
                    tracing::debug!(error = %e, player = %player, "sound playback failed");
                }
            }
            None => {
                // Terminal bell; ignored by terminals that mute it.
                print!("\x07");
                use std::io::Write;
                let _ = std::io::stdout().flush();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_player_is_a_noop() {
        let player = SoundPlayer::new(Some("definitely-not-a-player".into()), None, false);
        player.play();
    }

    #[tokio::test]
    async fn test_missing_player_command_is_swallowed() {
        let player = SoundPlayer::new(
            Some("pocket-pet-nonexistent-player".into()),
            Some(PathBuf::from("meow.mp3")),
            true,
        );
        // Must not panic or surface the spawn failure.
        player.play();
    }
}
