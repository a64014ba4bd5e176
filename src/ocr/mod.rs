//! OCR seam for scanned-page recognition.
//!
//! [`OcrProvider`] builds a fresh [`OcrEngine`] per extraction call; the
//! engine is released when its box drops, on success and failure alike.
//! [`TesseractProvider`] is the production backend.

pub mod engine;
pub mod tesseract;

pub use engine::{OcrEngine, OcrError, OcrProvider};
pub use tesseract::TesseractProvider;

#[cfg(test)]
pub use engine::MockOcrProvider;
