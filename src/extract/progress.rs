//! Extraction progress reporting.
//!
//! Progress is a transient `(percent, message)` pair pushed to an observer —
//! never stored.  Percentages are advisory and partitioned into bands (the
//! text-layer tier owns one band, the OCR tier another); the only hard
//! guarantees are that percent never decreases within one extraction call
//! and reaches 100 on success.  [`ProgressReporter`] enforces both no matter
//! what the pipeline stages ask for.

// ---------------------------------------------------------------------------
// ProgressSink
// ---------------------------------------------------------------------------

/// Observer for extraction progress.
///
/// Implemented for any `FnMut(u8, &str)` closure, so hosts can pass
/// `&mut |percent, message| { … }` directly.
pub trait ProgressSink {
    /// Receive one progress update.  `percent` is 0–100.
    fn progress(&mut self, percent: u8, message: &str);
}

impl<F: FnMut(u8, &str)> ProgressSink for F {
    fn progress(&mut self, percent: u8, message: &str) {
        self(percent, message)
    }
}

// ---------------------------------------------------------------------------
// ProgressReporter
// ---------------------------------------------------------------------------

/// Wraps a [`ProgressSink`] and enforces the monotonicity contract:
/// every emitted percent is clamped to `last..=100`.
pub struct ProgressReporter<'a> {
    sink: &'a mut dyn ProgressSink,
    last: u8,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(sink: &'a mut dyn ProgressSink) -> Self {
        Self { sink, last: 0 }
    }

    /// Emit `percent` (clamped to be non-decreasing and ≤ 100).
    pub fn report(&mut self, percent: u8, message: &str) {
        let clamped = percent.min(100).max(self.last);
        self.last = clamped;
        self.sink.progress(clamped, message);
    }

    /// Emit progress for `done`-of-`total` steps mapped into the band
    /// `start..=end`.  A zero `total` counts as one step.
    pub fn report_band(&mut self, start: u8, end: u8, done: usize, total: usize, message: &str) {
        let total = total.max(1);
        let span = usize::from(end.saturating_sub(start));
        let offset = (span * done.min(total)) / total;
        self.report(start.saturating_add(offset as u8), message);
    }

    /// The highest percent emitted so far.
    pub fn last(&self) -> u8 {
        self.last
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
