//! Terminal reader — the crossterm presentation host.
//!
//! # Architecture
//!
//! [`ReaderApp`] owns a [`Player`] and runs a raw-mode event loop: it sleeps
//! until the player's next tick deadline (or a short idle poll while
//! paused), lets the player catch up, and redraws the current word with its
//! ORP anchor held at a fixed column.
//!
//! # Key map
//!
//! | Key        | Operation          |
//! |------------|--------------------|
//! | Space      | play / pause       |
//! | ← / →      | one word back/fwd  |
//! | ↑ / ↓      | ten words back/fwd |
//! | `+` / `-`  | rate up/down       |
//! | `r`        | restart            |
//! | `q` / Esc  | quit               |
//!
//! The terminal is restored by an RAII guard, so every exit path — quit
//! key, draw error, panic unwind — leaves raw mode and the alternate
//! screen.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::config::PlaybackConfig;
use crate::playback::Player;
use crate::text::{orp_split, WordSequence};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Column the ORP anchor character is pinned to.
const ANCHOR_COL: usize = 24;

/// Event-poll timeout while no tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

// ---------------------------------------------------------------------------
// ReaderApp
// ---------------------------------------------------------------------------

/// What a key press asks the event loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// The terminal reader host.
pub struct ReaderApp {
    player: Player,
    config: PlaybackConfig,
}

impl ReaderApp {
    /// Build a reader over `words`, starting at the configured rate.
    pub fn new(words: WordSequence, config: PlaybackConfig) -> Self {
        let mut player = Player::new(config.clamp_wpm(config.wpm));
        player.load(words);
        Self { player, config }
    }

    /// Read access for status displays and tests.
    pub fn player(&self) -> &Player {
        &self.player
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    /// Run the reader until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let _screen = RawScreen::enter()?;
        let mut stdout = io::stdout();
        self.draw(&mut stdout)?;

        loop {
            let now = Instant::now();
            if self.player.poll(now) {
                self.draw(&mut stdout)?;
            }

            let timeout = self
                .player
                .next_tick()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
                .unwrap_or(IDLE_POLL);

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(KeyEvent {
                        code,
                        kind: KeyEventKind::Press,
                        ..
                    }) => {
                        if self.handle_key(code, Instant::now()) == KeyOutcome::Quit {
                            break;
                        }
                        self.draw(&mut stdout)?;
                    }
                    Event::Resize(..) => self.draw(&mut stdout)?,
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Map one key press onto a transport operation.
    pub fn handle_key(&mut self, code: KeyCode, now: Instant) -> KeyOutcome {
        match code {
            KeyCode::Char(' ') => self.player.toggle_play(now),
            KeyCode::Left => self.player.seek(-1),
            KeyCode::Right => self.player.seek(1),
            KeyCode::Up => self.player.seek(-10),
            KeyCode::Down => self.player.seek(10),
            KeyCode::Char('r') | KeyCode::Char('R') => self.player.restart(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let next = self
                    .config
                    .clamp_wpm(self.player.wpm().saturating_add(self.config.wpm_step));
                self.player.set_wpm(next, now);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let next = self
                    .config
                    .clamp_wpm(self.player.wpm().saturating_sub(self.config.wpm_step));
                self.player.set_wpm(next, now);
            }
            KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
            _ => {}
        }
        KeyOutcome::Continue
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    fn draw(&self, out: &mut impl Write) -> Result<()> {
        let split = orp_split(self.player.current_word());
        let pad = ANCHOR_COL.saturating_sub(split.before.chars().count());

        queue!(
            out,
            Clear(ClearType::All),
            cursor::MoveTo(0, 1),
            Print(" ".repeat(pad)),
            Print(split.before),
            SetForegroundColor(Color::Red),
            SetAttribute(Attribute::Bold),
            Print(split.anchor),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print(split.after),
        )?;

        let (position, total) = self.player.progress();
        let state = if self.player.is_running() {
            "playing"
        } else {
            "paused"
        };
        queue!(
            out,
            cursor::MoveTo(0, 3),
            Print(format!(
                "  {position}/{total}   {} wpm   {} left   [{state}]",
                self.player.wpm(),
                format_remaining(self.player.time_remaining()),
            )),
            cursor::MoveTo(0, 5),
            Print("  space play/pause   \u{2190}/\u{2192} \u{b1}1   \u{2191}/\u{2193} \u{b1}10   +/- speed   r restart   q quit"),
        )?;

        out.flush()?;
        Ok(())
    }
}

/// `m:ss` rendering of the remaining reading time.
fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

// ---------------------------------------------------------------------------
// RawScreen — terminal state guard
// ---------------------------------------------------------------------------

/// Enters raw mode + alternate screen; restores both on drop.
struct RawScreen;

impl RawScreen {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize;

    fn app(text: &str) -> ReaderApp {
        ReaderApp::new(tokenize(text), PlaybackConfig::default())
    }

    #[test]
    fn space_toggles_playback() {
        let mut app = app("a b c");
        let now = Instant::now();

        assert_eq!(app.handle_key(KeyCode::Char(' '), now), KeyOutcome::Continue);
        assert!(app.player().is_running());

        app.handle_key(KeyCode::Char(' '), now);
        assert!(!app.player().is_running());
    }

    #[test]
    fn arrows_seek_by_one_and_ten() {
        let mut app = app("w0 w1 w2 w3 w4 w5 w6 w7 w8 w9 w10 w11");
        let now = Instant::now();

        app.handle_key(KeyCode::Right, now);
        assert_eq!(app.player().current_index(), 1);

        app.handle_key(KeyCode::Down, now);
        assert_eq!(app.player().current_index(), 11);

        app.handle_key(KeyCode::Up, now);
        assert_eq!(app.player().current_index(), 1);

        app.handle_key(KeyCode::Left, now);
        app.handle_key(KeyCode::Left, now); // clamps at 0
        assert_eq!(app.player().current_index(), 0);
    }

    #[test]
    fn rate_keys_step_within_bounds() {
        let mut app = app("a b");
        let now = Instant::now();

        app.handle_key(KeyCode::Char('+'), now);
        assert_eq!(app.player().wpm(), 375);

        app.handle_key(KeyCode::Char('-'), now);
        app.handle_key(KeyCode::Char('-'), now);
        assert_eq!(app.player().wpm(), 325);

        // Hammering `-` stops at min_wpm.
        for _ in 0..100 {
            app.handle_key(KeyCode::Char('-'), now);
        }
        assert_eq!(app.player().wpm(), 100);
    }

    #[test]
    fn restart_key_rewinds() {
        let mut app = app("a b c");
        let now = Instant::now();
        app.handle_key(KeyCode::Right, now);
        app.handle_key(KeyCode::Char('r'), now);
        assert_eq!(app.player().current_index(), 0);
        assert!(!app.player().is_running());
    }

    #[test]
    fn quit_keys_quit() {
        let mut app = app("a");
        let now = Instant::now();
        assert_eq!(app.handle_key(KeyCode::Char('q'), now), KeyOutcome::Quit);
        assert_eq!(app.handle_key(KeyCode::Esc, now), KeyOutcome::Quit);
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut app = app("a b");
        let now = Instant::now();
        assert_eq!(app.handle_key(KeyCode::Char('x'), now), KeyOutcome::Continue);
        assert_eq!(app.player().current_index(), 0);
    }

    #[test]
    fn starting_wpm_is_clamped_into_bounds() {
        let config = PlaybackConfig {
            wpm: 5000,
            ..PlaybackConfig::default()
        };
        let app = ReaderApp::new(tokenize("a"), config);
        assert_eq!(app.player().wpm(), 1200);
    }

    #[test]
    fn format_remaining_renders_minutes_and_seconds() {
        assert_eq!(format_remaining(Duration::from_secs(0)), "0:00");
        assert_eq!(format_remaining(Duration::from_secs(9)), "0:09");
        assert_eq!(format_remaining(Duration::from_secs(83)), "1:23");
        assert_eq!(format_remaining(Duration::from_secs(600)), "10:00");
    }
}
