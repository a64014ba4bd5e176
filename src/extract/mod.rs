//! Two-tier text extraction: text layer first, OCR fallback.
//!
//! [`Extractor`] drives the whole pipeline; [`ProgressSink`] /
//! [`ProgressReporter`] carry banded, monotonic progress out to the host.

pub mod pipeline;
pub mod progress;

pub use pipeline::{ExtractOptions, ExtractionError, Extractor, TEXT_LAYER_MIN_WORDS};
pub use progress::{ProgressReporter, ProgressSink};
