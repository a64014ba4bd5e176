//! RSVP speed reader — core library.
//!
//! Turns a PDF (digital-text or scanned) or a plain-text source into an
//! ordered word sequence and plays it back one word at a time, each word
//! anchored on its optimal recognition point (ORP).
//!
//! # Subsystems
//!
//! * [`text`] — pure helpers: whitespace tokenization into a
//!   [`WordSequence`](text::WordSequence) and the ORP anchor calculation.
//! * [`pdf`] — the structural-parser seam ([`pdf::PdfEngine`]) and the
//!   production PDFium adapter.
//! * [`ocr`] — the OCR seam ([`ocr::OcrProvider`] / [`ocr::OcrEngine`]) and
//!   the Tesseract backend.
//! * [`extract`] — the two-tier extraction pipeline: text layer first, OCR
//!   fallback when the layer is sparse, with banded progress reporting.
//! * [`playback`] — the [`Player`](playback::Player) transport state machine.
//! * [`config`] — TOML settings and platform paths.
//! * [`app`] — the terminal reader loop (presentation host).
//!
//! # Data flow
//!
//! ```text
//! file bytes ──▶ extract::Extractor ──▶ WordSequence ──▶ playback::Player
//!                                                           │
//!                                         display ◀── text::orp_split
//! ```

pub mod app;
pub mod config;
pub mod extract;
pub mod ocr;
pub mod pdf;
pub mod playback;
pub mod text;

pub use extract::{ExtractOptions, ExtractionError, Extractor, ProgressSink};
pub use playback::Player;
pub use text::{orp_index, orp_split, tokenize, OrpSplit, WordSequence};
