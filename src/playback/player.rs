//! The playback transport state machine.
//!
//! # Model
//!
//! [`Player`] advances through a word list at `60000 / wpm` milliseconds per
//! word.  It owns no timer thread; instead it holds at most one pending tick
//! deadline and the host drives it by calling [`Player::poll`] with the
//! current instant (and can sleep until [`Player::next_tick`]).  Starting
//! playback, changing the rate, restarting, or loading a new sequence all
//! *replace* the deadline, so double-speed advancement is impossible by
//! construction and every exit path cancels the pending tick.
//!
//! # Edge behavior
//!
//! * Transport on an empty sequence is a no-op, never an error.
//! * Reaching the last word while playing auto-pauses; the index stays on
//!   the last valid position.
//! * Seeking clamps silently into `0..len`.

use std::time::{Duration, Instant};

use crate::text::WordSequence;

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Timer-driven transport over a [`WordSequence`].
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use rsvp_reader::playback::Player;
/// use rsvp_reader::text::tokenize;
///
/// let mut player = Player::new(600); // 100 ms per word
/// player.load(tokenize("one two three"));
///
/// let start = Instant::now();
/// player.toggle_play(start);
/// player.poll(start + Duration::from_millis(350));
///
/// // Two ticks advanced to the last word, the third auto-paused.
/// assert_eq!(player.current_word(), "three");
/// assert!(!player.is_running());
/// ```
#[derive(Debug)]
pub struct Player {
    words: WordSequence,
    current: usize,
    wpm: u32,
    running: bool,
    next_tick: Option<Instant>,
}

impl Player {
    /// A player with no content at `wpm` words per minute (clamped to ≥ 1).
    pub fn new(wpm: u32) -> Self {
        Self {
            words: WordSequence::new(),
            current: 0,
            wpm: wpm.max(1),
            running: false,
            next_tick: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// `true` while playback is advancing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current position (always `0` for an empty sequence).
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Current rate in words per minute.
    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    /// Number of loaded words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The word under the eye, or the empty word when nothing is loaded.
    pub fn current_word(&self) -> &str {
        self.words.get(self.current).unwrap_or("")
    }

    /// Time between ticks at the current rate.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(60.0 / f64::from(self.wpm))
    }

    /// The pending tick deadline, if playback is running.
    ///
    /// Hosts sleep until this instant, then call [`poll`](Self::poll).
    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    /// `(current word number, total)` — 1-based for display, `(0, 0)` when
    /// empty.
    pub fn progress(&self) -> (usize, usize) {
        if self.words.is_empty() {
            (0, 0)
        } else {
            (self.current + 1, self.words.len())
        }
    }

    /// Reading time left after the current word at the current rate.
    pub fn time_remaining(&self) -> Duration {
        if self.words.is_empty() {
            return Duration::ZERO;
        }
        let remaining = self.words.len() - 1 - self.current;
        self.tick_interval() * remaining as u32
    }

    // -----------------------------------------------------------------------
    // Transport operations
    // -----------------------------------------------------------------------

    /// Replace the content.  Position resets to the start, playback stops,
    /// and any pending tick is cancelled.
    pub fn load(&mut self, words: WordSequence) {
        self.words = words;
        self.current = 0;
        self.running = false;
        self.next_tick = None;
    }

    /// Flip between playing and paused.  No-op on an empty sequence.
    ///
    /// Starting playback schedules the next tick one interval from `now`,
    /// replacing any deadline that might already exist; stopping cancels it.
    pub fn toggle_play(&mut self, now: Instant) {
        if self.words.is_empty() {
            return;
        }
        self.running = !self.running;
        self.next_tick = self.running.then(|| now + self.tick_interval());
    }

    /// Change the rate (clamped to ≥ 1).
    ///
    /// While running, the pending deadline is replaced with one interval at
    /// the new rate from `now` — the old deadline is discarded, never
    /// stacked.
    pub fn set_wpm(&mut self, wpm: u32, now: Instant) {
        self.wpm = wpm.max(1);
        if self.running {
            self.next_tick = Some(now + self.tick_interval());
        }
    }

    /// Move by `delta` words, clamped into the valid range.  Never fails
    /// and does not change the running state.
    pub fn seek(&mut self, delta: isize) {
        if self.words.is_empty() {
            return;
        }
        let last = (self.words.len() - 1) as isize;
        let target = self.current as isize + delta;
        self.current = target.clamp(0, last) as usize;
    }

    /// Back to the first word, stopped, pending tick cancelled.
    pub fn restart(&mut self) {
        self.current = 0;
        self.running = false;
        self.next_tick = None;
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Fire every tick whose deadline has passed as of `now`.
    ///
    /// Returns `true` if the visible state changed.  A stalled host catches
    /// up word by word rather than jumping, matching what a recurring timer
    /// would have delivered.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while self.running {
            let Some(deadline) = self.next_tick else {
                break;
            };
            if now < deadline {
                break;
            }
            self.tick(deadline);
            changed = true;
        }
        changed
    }

    /// One tick: advance, or auto-pause on the last word without moving.
    fn tick(&mut self, fired: Instant) {
        if self.current + 1 >= self.words.len() {
            self.running = false;
            self.next_tick = None;
        } else {
            self.current += 1;
            self.next_tick = Some(fired + self.tick_interval());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize;

    const MS: Duration = Duration::from_millis(1);

    /// 600 wpm → one tick every 100 ms, which keeps the arithmetic obvious.
    fn player_with(text: &str) -> Player {
        let mut player = Player::new(600);
        player.load(tokenize(text));
        player
    }

    // ---- load ---

    #[test]
    fn load_resets_position_and_stops() {
        let mut player = player_with("a b c");
        let t0 = Instant::now();
        player.toggle_play(t0);
        player.poll(t0 + 100 * MS);
        assert_eq!(player.current_index(), 1);

        player.load(tokenize("x y"));
        assert_eq!(player.current_index(), 0);
        assert!(!player.is_running());
        assert!(player.next_tick().is_none());
    }

    #[test]
    fn load_empty_sequence_is_valid_and_inert() {
        let mut player = player_with("");
        assert_eq!(player.current_word(), "");
        assert_eq!(player.progress(), (0, 0));

        player.toggle_play(Instant::now());
        assert!(!player.is_running());
        assert!(player.next_tick().is_none());
    }

    // ---- toggle / tick ---

    #[test]
    fn three_ticks_on_three_words_auto_pauses_without_overshoot() {
        let mut player = player_with("a b c");
        let t0 = Instant::now();
        player.toggle_play(t0);

        // Deadlines at t0+100, t0+200, t0+300; the third tick auto-pauses.
        player.poll(t0 + 300 * MS);

        assert_eq!(player.current_index(), 2);
        assert!(!player.is_running());
        assert!(player.next_tick().is_none());
        assert_eq!(player.current_word(), "c");
    }

    #[test]
    fn pause_cancels_the_pending_tick() {
        let mut player = player_with("a b c");
        let t0 = Instant::now();
        player.toggle_play(t0);
        assert!(player.next_tick().is_some());

        player.toggle_play(t0 + 10 * MS);
        assert!(!player.is_running());
        assert!(player.next_tick().is_none());

        // A late poll after pausing must not advance.
        assert!(!player.poll(t0 + 500 * MS));
        assert_eq!(player.current_index(), 0);
    }

    #[test]
    fn poll_before_the_deadline_does_nothing() {
        let mut player = player_with("a b c");
        let t0 = Instant::now();
        player.toggle_play(t0);

        assert!(!player.poll(t0 + 99 * MS));
        assert_eq!(player.current_index(), 0);
    }

    #[test]
    fn stalled_host_catches_up_word_by_word() {
        let mut player = player_with("a b c d e");
        let t0 = Instant::now();
        player.toggle_play(t0);

        // One very late poll delivers every elapsed tick.
        player.poll(t0 + 250 * MS);
        assert_eq!(player.current_index(), 2);
        assert!(player.is_running());
    }

    #[test]
    fn single_word_sequence_auto_pauses_on_first_tick() {
        let mut player = player_with("only");
        let t0 = Instant::now();
        player.toggle_play(t0);

        player.poll(t0 + 100 * MS);
        assert_eq!(player.current_index(), 0);
        assert!(!player.is_running());
    }

    // ---- rate changes ---

    #[test]
    fn set_wpm_while_running_replaces_the_deadline() {
        let mut player = player_with("a b c d");
        let t0 = Instant::now();
        player.toggle_play(t0); // deadline at t0+100ms

        player.set_wpm(1200, t0); // 50 ms interval, deadline now t0+50ms
        assert_eq!(player.next_tick(), Some(t0 + 50 * MS));

        // Exactly one tick by t0+99ms: the replaced deadline fired, the old
        // 100 ms one is gone, and the next is 50 ms after the fired one.
        player.poll(t0 + 99 * MS);
        assert_eq!(player.current_index(), 1);
        assert_eq!(player.next_tick(), Some(t0 + 100 * MS));
    }

    #[test]
    fn set_wpm_while_paused_does_not_schedule() {
        let mut player = player_with("a b c");
        player.set_wpm(100, Instant::now());
        assert!(player.next_tick().is_none());
        assert_eq!(player.wpm(), 100);
    }

    #[test]
    fn wpm_is_clamped_to_at_least_one() {
        let mut player = player_with("a b");
        player.set_wpm(0, Instant::now());
        assert_eq!(player.wpm(), 1);
        assert_eq!(player.tick_interval(), Duration::from_secs(60));
    }

    // ---- seek ---

    #[test]
    fn seek_clamps_at_the_start() {
        let mut player = player_with("a b c");
        player.seek(1);
        assert_eq!(player.current_index(), 1);

        player.seek(-5);
        assert_eq!(player.current_index(), 0);
    }

    #[test]
    fn seek_clamps_at_the_end() {
        let mut player = player_with("a b c");
        player.seek(10);
        assert_eq!(player.current_index(), 2);
    }

    #[test]
    fn seek_does_not_change_running_state() {
        let mut player = player_with("a b c");
        let t0 = Instant::now();
        player.toggle_play(t0);
        player.seek(1);
        assert!(player.is_running());

        player.toggle_play(t0);
        player.seek(-1);
        assert!(!player.is_running());
    }

    #[test]
    fn seek_on_empty_sequence_is_a_no_op() {
        let mut player = player_with("");
        player.seek(-10);
        player.seek(10);
        assert_eq!(player.current_index(), 0);
    }

    // ---- restart ---

    #[test]
    fn restart_rewinds_stops_and_cancels() {
        let mut player = player_with("a b c");
        let t0 = Instant::now();
        player.toggle_play(t0);
        player.poll(t0 + 100 * MS);
        assert_eq!(player.current_index(), 1);

        player.restart();
        assert_eq!(player.current_index(), 0);
        assert!(!player.is_running());
        assert!(player.next_tick().is_none());
    }

    // ---- readouts ---

    #[test]
    fn progress_is_one_based() {
        let mut player = player_with("a b c");
        assert_eq!(player.progress(), (1, 3));
        player.seek(2);
        assert_eq!(player.progress(), (3, 3));
    }

    #[test]
    fn time_remaining_counts_words_after_the_current_one() {
        let mut player = player_with("a b c");
        player.set_wpm(60, Instant::now()); // one word per second
        assert_eq!(player.time_remaining(), Duration::from_secs(2));

        player.seek(2);
        assert_eq!(player.time_remaining(), Duration::ZERO);
    }

    #[test]
    fn time_remaining_is_zero_when_empty() {
        let player = player_with("");
        assert_eq!(player.time_remaining(), Duration::ZERO);
    }

    #[test]
    fn tick_interval_matches_rate() {
        let player = player_with("a");
        assert_eq!(player.tick_interval(), Duration::from_millis(100));
    }
}
