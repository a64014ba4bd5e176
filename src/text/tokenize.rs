//! Whitespace tokenization into a [`WordSequence`].
//!
//! Splitting is deliberately simple: any run of whitespace separates two
//! words, empty tokens are discarded, and punctuation stays attached to its
//! word.  No locale-aware segmentation.

// ---------------------------------------------------------------------------
// WordSequence
// ---------------------------------------------------------------------------

/// An ordered, immutable-once-built list of words in reading order.
///
/// The only way to build a non-empty `WordSequence` is [`tokenize`] (or
/// [`WordSequence::from_text`]), which upholds the invariant that no word is
/// empty, whitespace-only, or contains internal whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSequence {
    words: Vec<String>,
}

impl WordSequence {
    /// An empty sequence (playback over it is inert).
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize `text` into a sequence.  Equivalent to [`tokenize`].
    pub fn from_text(text: &str) -> Self {
        Self {
            words: text.split_whitespace().map(str::to_owned).collect(),
        }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `true` when the sequence holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// All words in reading order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Iterate over the words in reading order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// tokenize
// ---------------------------------------------------------------------------

/// Split `text` on whitespace runs into a [`WordSequence`].
///
/// Idempotent over a single-space rejoin: tokenizing
/// `sequence.words().join(" ")` yields the same sequence.
///
/// # Example
///
/// ```rust
/// use rsvp_reader::text::tokenize;
///
/// let words = tokenize("  a   b\tc\n");
/// assert_eq!(words.words(), ["a", "b", "c"]);
/// assert!(tokenize("   \n\t ").is_empty());
/// ```
pub fn tokenize(text: &str) -> WordSequence {
    WordSequence::from_text(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_mixed_whitespace_runs() {
        let words = tokenize("  a   b\tc\n");
        assert_eq!(words.words(), ["a", "b", "c"]);
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(tokenize("").is_empty());
        assert_eq!(tokenize("").len(), 0);
    }

    #[test]
    fn whitespace_only_input_yields_empty_sequence() {
        assert!(tokenize(" \t \n \r\n ").is_empty());
    }

    #[test]
    fn punctuation_stays_attached() {
        let words = tokenize("Hello, world!");
        assert_eq!(words.words(), ["Hello,", "world!"]);
    }

    #[test]
    fn no_word_is_empty_or_contains_whitespace() {
        let words = tokenize("one  two\n three\t\tfour ");
        assert!(!words.is_empty());
        for word in words.iter() {
            assert!(!word.is_empty());
            assert!(!word.chars().any(char::is_whitespace));
        }
    }

    #[test]
    fn idempotent_over_single_space_rejoin() {
        let first = tokenize("  page \n breaks\tand   runs  ");
        let rejoined = first.words().join(" ");
        assert_eq!(tokenize(&rejoined), first);
    }

    #[test]
    fn get_in_and_out_of_range() {
        let words = tokenize("a b");
        assert_eq!(words.get(0), Some("a"));
        assert_eq!(words.get(1), Some("b"));
        assert_eq!(words.get(2), None);
    }

    #[test]
    fn handles_unicode_whitespace() {
        // U+00A0 no-break space counts as whitespace for char::is_whitespace.
        let words = tokenize("a\u{a0}b");
        assert_eq!(words.words(), ["a", "b"]);
    }
}
