//! Core OCR traits and errors.
//!
//! # Overview
//!
//! [`OcrProvider`] is the factory the pipeline holds for the lifetime of the
//! application; [`OcrEngine`] is the per-extraction worker it creates.  The
//! split mirrors how OCR backends actually behave: loading language models
//! is expensive and stateful, so an engine is created once per extraction
//! call and torn down unconditionally when its box drops.
//!
//! [`MockOcrProvider`] (available under `#[cfg(test)]`) scripts recognition
//! results and counts engine creations so pipeline tests can assert whether
//! and how often the OCR tier ran.

use image::DynamicImage;
use thiserror::Error;

// ---------------------------------------------------------------------------
// OcrError
// ---------------------------------------------------------------------------

/// All errors that can arise from the OCR subsystem.
#[derive(Debug, Clone, Error)]
pub enum OcrError {
    /// The OCR backend could not be initialised (missing language data,
    /// missing native library).
    #[error("OCR engine initialisation failed: {0}")]
    Init(String),

    /// The page raster could not be encoded for the backend.
    #[error("could not encode page raster: {0}")]
    Encode(String),

    /// Recognition itself failed.
    #[error("recognition failed: {0}")]
    Recognition(String),
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A stateful recognition engine, created per extraction call.
///
/// `recognize` takes `&mut self` because backends keep per-image state.
/// Release is by drop — there is no explicit terminate step to forget.
pub trait OcrEngine {
    /// Recognize the text in `image`.
    fn recognize(&mut self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// Factory for [`OcrEngine`]s.
pub trait OcrProvider {
    /// Create an engine for `language` (Tesseract language code, e.g. `eng`).
    fn create(&self, language: &str) -> Result<Box<dyn OcrEngine>, OcrError>;
}

// Compile-time assertion: the traits must stay object-safe.
const _: fn() = || {
    fn _assert_object_safe(_: &dyn OcrProvider, _: &mut dyn OcrEngine) {}
};

// ---------------------------------------------------------------------------
// MockOcrProvider  (test-only)
// ---------------------------------------------------------------------------

/// A test double whose engines replay a script of recognition results.
#[cfg(test)]
pub struct MockOcrProvider {
    script: Vec<Result<String, OcrError>>,
    fail_create: Option<OcrError>,
    creates: std::cell::Cell<usize>,
}

#[cfg(test)]
impl MockOcrProvider {
    /// Engines whose every `recognize` call returns `Ok(text)`.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self {
            script: vec![Ok(text.into())],
            fail_create: None,
            creates: std::cell::Cell::new(0),
        }
    }

    /// Engines that replay `script` call-by-call, then return empty text.
    pub fn scripted(script: Vec<Result<String, OcrError>>) -> Self {
        Self {
            script,
            fail_create: None,
            creates: std::cell::Cell::new(0),
        }
    }

    /// A provider whose `create` always fails.
    pub fn failing_create() -> Self {
        Self {
            script: Vec::new(),
            fail_create: Some(OcrError::Init("no language data".into())),
            creates: std::cell::Cell::new(0),
        }
    }

    /// How many engines have been created so far.
    pub fn created(&self) -> usize {
        self.creates.get()
    }
}

#[cfg(test)]
impl OcrProvider for MockOcrProvider {
    fn create(&self, _language: &str) -> Result<Box<dyn OcrEngine>, OcrError> {
        self.creates.set(self.creates.get() + 1);
        match &self.fail_create {
            Some(err) => Err(err.clone()),
            None => Ok(Box::new(MockOcrEngine {
                script: self.script.clone().into(),
                repeat_last: self.script.len() == 1,
            })),
        }
    }
}

#[cfg(test)]
struct MockOcrEngine {
    script: std::collections::VecDeque<Result<String, OcrError>>,
    repeat_last: bool,
}

#[cfg(test)]
impl OcrEngine for MockOcrEngine {
    fn recognize(&mut self, _image: &DynamicImage) -> Result<String, OcrError> {
        if self.repeat_last {
            return self.script.front().cloned().unwrap_or(Ok(String::new()));
        }
        self.script.pop_front().unwrap_or(Ok(String::new()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> DynamicImage {
        DynamicImage::new_rgba8(1, 1)
    }

    #[test]
    fn fixed_mock_repeats_its_text() {
        let provider = MockOcrProvider::fixed("hello");
        let mut engine = provider.create("eng").unwrap();
        assert_eq!(engine.recognize(&blank()).unwrap(), "hello");
        assert_eq!(engine.recognize(&blank()).unwrap(), "hello");
    }

    #[test]
    fn scripted_mock_replays_then_goes_quiet() {
        let provider = MockOcrProvider::scripted(vec![
            Ok("first".into()),
            Err(OcrError::Recognition("smudge".into())),
        ]);
        let mut engine = provider.create("eng").unwrap();
        assert_eq!(engine.recognize(&blank()).unwrap(), "first");
        assert!(engine.recognize(&blank()).is_err());
        assert_eq!(engine.recognize(&blank()).unwrap(), "");
    }

    #[test]
    fn failing_create_still_counts_attempts() {
        let provider = MockOcrProvider::failing_create();
        assert!(provider.create("eng").is_err());
        assert_eq!(provider.created(), 1);
    }

    #[test]
    fn box_dyn_engine_compiles() {
        // If this test compiles, the trait is object-safe.
        let provider = MockOcrProvider::fixed("ok");
        let mut engine: Box<dyn OcrEngine> = provider.create("eng").unwrap();
        let _ = engine.recognize(&blank());
    }

    #[test]
    fn error_display() {
        assert!(OcrError::Init("x".into()).to_string().contains("initialisation"));
        assert!(OcrError::Recognition("y".into()).to_string().contains('y'));
    }
}
