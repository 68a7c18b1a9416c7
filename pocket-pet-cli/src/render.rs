//! Terminal rendering for the pet dashboard.
//!
//! Draws a small fixed-height frame — name line, two progress bars, mood
//! line, key hints — and redraws it in place with ANSI cursor movement, so
//! the bar animations look continuous instead of scrolling.

use std::io::{self, Write};

use pocket_pet_core::{ConnectionStatus, UiState};

/// Character width of a progress bar.
const BAR_WIDTH: usize = 24;

const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const CLEAR_LINE: &str = "\x1b[2K";
const RED: &str = "\x1b[91m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Render a bar of filled and empty cells for a 0–100 value.
pub fn bar(value: f64) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    let mut out = String::with_capacity(BAR_WIDTH * 3);
    for _ in 0..filled {
        out.push('█');
    }
    for _ in filled..BAR_WIDTH {
        out.push('░');
    }
    out
}

/// Produce the dashboard lines for the current render state.
pub fn frame_lines(ui: &UiState) -> Vec<String> {
    let name = ui.name().unwrap_or("pet");
    let sync = if ui.loading() { "  ⏳ syncing" } else { "" };

    let mood_line = if ui.warning_active() {
        format!("  {} {}{}{}", ui.mood_icon(), RED, ui.mood_text(), RESET)
    } else if ui.connection() == ConnectionStatus::Disconnected {
        format!("  {} {}{}{}", ui.mood_icon(), DIM, ui.mood_text(), RESET)
    } else {
        format!("  {} {}", ui.mood_icon(), ui.mood_text())
    };

    let hints = if ui.buttons_enabled() {
        "  [f]eed  [p]lay  [q]uit".to_string()
    } else {
        format!("  {DIM}[f]eed  [p]lay  [q]uit{RESET}")
    };

    vec![
        format!("🐾 {name}{sync}"),
        format!("  hunger     {}  {:>4}", bar(ui.hunger_bar()), ui.hunger_label()),
        format!("  happiness  {}  {:>4}", bar(ui.happiness_bar()), ui.happiness_label()),
        mood_line,
        hints,
    ]
}

/// An in-place redrawn region of the terminal.
#[derive(Debug, Default)]
pub struct Screen {
    lines_drawn: usize,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the cursor before the first draw.
    pub fn init(&mut self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "{HIDE_CURSOR}")?;
        out.flush()
    }

    /// Redraw the dashboard in place.
    pub fn draw(&mut self, ui: &UiState) -> io::Result<()> {
        let lines = frame_lines(ui);
        let mut out = io::stdout().lock();
        if self.lines_drawn > 0 {
            write!(out, "\x1b[{}A", self.lines_drawn)?;
        }
        for line in &lines {
            writeln!(out, "{CLEAR_LINE}{line}")?;
        }
        self.lines_drawn = lines.len();
        out.flush()
    }

    /// Restore the cursor on teardown.
    pub fn finish(&mut self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "{SHOW_CURSOR}")?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use pocket_pet_core::{Config, Event, PetState};

    fn ui_with(hunger: f64, happiness: f64, mood: &str) -> UiState {
        let mut ui = UiState::new(&Config::new());
        let state: PetState = serde_json::from_str(&format!(
            r#"{{"hunger":{hunger},"happiness":{happiness},"mood":"{mood}"}}"#
        ))
        .unwrap();
        ui.apply(&Event::state(state), Instant::now());
        // Fast-forward the bar animations to their targets.
        let now = Instant::now();
        while ui.tick(now) {}
        ui
    }

    #[test]
    fn test_bar_widths() {
        assert_eq!(bar(0.0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(bar(50.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
        assert_eq!(bar(100.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH);
        assert_eq!(bar(0.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(73.0).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_bar_clamps_out_of_range() {
        assert_eq!(bar(250.0), bar(100.0));
        assert_eq!(bar(-10.0), bar(0.0));
    }

    #[test]
    fn test_frame_shows_labels_and_mood() {
        let ui = ui_with(42.0, 77.0, "Content");
        let frame = frame_lines(&ui).join("\n");
        assert!(frame.contains("42%"));
        assert!(frame.contains("77%"));
        assert!(frame.contains("😊 Content"));
    }

    #[test]
    fn test_frame_shows_disconnected_sentinel() {
        let mut ui = ui_with(42.0, 77.0, "Content");
        ui.apply(&Event::Disconnected, Instant::now());
        let frame = frame_lines(&ui).join("\n");
        assert!(frame.contains("⚠️"));
        assert!(frame.contains("Disconnected"));
    }

    #[test]
    fn test_frame_dims_hints_while_buttons_disabled() {
        let mut ui = ui_with(42.0, 77.0, "Content");
        ui.apply(&Event::buttons(false), Instant::now());
        let hints = frame_lines(&ui).pop().unwrap();
        assert!(hints.contains(DIM));
    }
}
