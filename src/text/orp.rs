//! Optimal Recognition Point (ORP) calculation.
//!
//! RSVP display holds one character of each word fixed under the eye — the
//! anchor.  The anchor sits slightly left of center and drifts right more
//! slowly than word length grows, so it is looked up from the word's
//! character count rather than computed from content:
//!
//! | length | anchor index |
//! |--------|--------------|
//! | 0–1    | 0            |
//! | 2–3    | 0            |
//! | 4–5    | 1            |
//! | 6–9    | 2            |
//! | 10–13  | 3            |
//! | ≥14    | 4            |
//!
//! [`orp_split`] cuts a word into `before` / `anchor` / `after` slices on
//! character boundaries, so multi-byte words split cleanly.

// ---------------------------------------------------------------------------
// orp_index
// ---------------------------------------------------------------------------

/// Anchor character index for a word of `len` characters.
///
/// Defined for every length, including zero.
///
/// # Example
///
/// ```rust
/// use rsvp_reader::text::orp_index;
///
/// assert_eq!(orp_index(0), 0);
/// assert_eq!(orp_index(5), 1);
/// assert_eq!(orp_index(9), 2);
/// assert_eq!(orp_index(100), 4);
/// ```
pub fn orp_index(len: usize) -> usize {
    match len {
        0..=3 => 0,
        4..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

// ---------------------------------------------------------------------------
// OrpSplit
// ---------------------------------------------------------------------------

/// A word cut at its ORP anchor.
///
/// Invariant: `before + anchor + after` reassembles the original word
/// exactly, and `anchor` is empty only for the empty word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrpSplit<'a> {
    /// Characters before the anchor (may be empty).
    pub before: &'a str,
    /// The single anchor character.
    pub anchor: &'a str,
    /// Characters after the anchor (may be empty).
    pub after: &'a str,
}

/// Split `word` at its ORP anchor on character boundaries.
///
/// # Example
///
/// ```rust
/// use rsvp_reader::text::orp_split;
///
/// let split = orp_split("reading");
/// assert_eq!(split.before, "re");
/// assert_eq!(split.anchor, "a");
/// assert_eq!(split.after, "ding");
/// ```
pub fn orp_split(word: &str) -> OrpSplit<'_> {
    if word.is_empty() {
        return OrpSplit {
            before: "",
            anchor: "",
            after: "",
        };
    }

    let anchor = orp_index(word.chars().count());

    // The anchor index is always < the character count, so both byte
    // offsets exist; the fallbacks are never reached for valid UTF-8.
    let mut offsets = word.char_indices().map(|(i, _)| i);
    let start = offsets.nth(anchor).unwrap_or(0);
    let end = offsets.next().unwrap_or(word.len());

    OrpSplit {
        before: &word[..start],
        anchor: &word[start..end],
        after: &word[end..],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
