//! Word-by-word playback.
//!
//! [`Player`] is the transport state machine over a
//! [`WordSequence`](crate::text::WordSequence); the host polls it with the
//! current instant and renders whatever [`Player::current_word`] returns.

pub mod player;

pub use player::Player;
