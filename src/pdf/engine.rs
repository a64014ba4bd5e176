//! Core PDF engine traits and errors.
//!
//! # Overview
//!
//! [`PdfEngine`] opens raw bytes into a [`PdfDocument`]; a document exposes
//! its page count and individual [`PdfPage`]s; a page yields either its text
//! layer or a raster rendered at an upscale factor (for OCR).  All three are
//! object-safe so the pipeline can hold them as trait objects and tests can
//! inject fakes.
//!
//! [`MockPdfEngine`] (available under `#[cfg(test)]`) builds an in-memory
//! document from per-page scripts — no PDF bytes or native library needed.

use image::DynamicImage;
use thiserror::Error;

// ---------------------------------------------------------------------------
// PdfError
// ---------------------------------------------------------------------------

/// All errors that can arise from the PDF parsing subsystem.
#[derive(Debug, Clone, Error)]
pub enum PdfError {
    /// The PDF library could not be located or initialised.
    #[error("PDF engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The document bytes could not be parsed (corrupt, truncated, or
    /// password-protected input).
    #[error("could not parse document: {0}")]
    Parse(String),

    /// The requested page does not exist or failed to load.
    #[error("page {index} unavailable: {reason}")]
    Page { index: usize, reason: String },

    /// The page loaded but its text layer could not be read.
    #[error("text extraction failed on page {index}: {reason}")]
    Text { index: usize, reason: String },

    /// The page loaded but could not be rendered to a raster.
    #[error("render failed on page {index}: {reason}")]
    Render { index: usize, reason: String },
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Opens raw PDF bytes into a document.
///
/// The returned document borrows both the engine and the bytes, which keeps
/// the engine's lifetime honest: a document never outlives the library
/// handle that produced it.
pub trait PdfEngine {
    /// Parse `bytes` into a document.
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn PdfDocument + 'a>, PdfError>;
}

/// A parsed document: an ordered sequence of pages.
pub trait PdfDocument {
    /// Total number of pages.
    fn page_count(&self) -> usize;

    /// Page at `index` (0-based).
    fn page(&self, index: usize) -> Result<Box<dyn PdfPage + '_>, PdfError>;
}

/// A single page: text layer access and rasterization.
pub trait PdfPage {
    /// The page's text-layer content, fragments joined in content order.
    fn text(&self) -> Result<String, PdfError>;

    /// Render the page to a raster, scaled by `scale` (1.0 = native size).
    /// Upscaling improves OCR accuracy on scanned pages.
    fn render(&self, scale: f32) -> Result<DynamicImage, PdfError>;
}

// Compile-time assertion: the traits must stay object-safe.
const _: fn() = || {
    fn _assert_object_safe(_: &dyn PdfEngine, _: &dyn PdfDocument, _: &dyn PdfPage) {}
};

// ---------------------------------------------------------------------------
// MockPdfEngine  (test-only)
// ---------------------------------------------------------------------------

/// Per-page script for [`MockPdfEngine`].
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct MockPage {
    text: Result<String, String>,
    renderable: bool,
}

#[cfg(test)]
impl MockPage {
    /// A page whose text layer yields `text` and which renders fine.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Ok(text.into()),
            renderable: true,
        }
    }

    /// A page whose text fetch fails with `reason` but which still renders.
    pub fn text_failure(reason: impl Into<String>) -> Self {
        Self {
            text: Err(reason.into()),
            renderable: true,
        }
    }

    /// A page whose text fetch fails and whose render fails too.
    pub fn broken(reason: impl Into<String>) -> Self {
        Self {
            text: Err(reason.into()),
            renderable: false,
        }
    }
}

/// A test double that serves scripted pages without parsing any bytes.
#[cfg(test)]
pub struct MockPdfEngine {
    pages: Vec<MockPage>,
    fail_open: Option<String>,
}

#[cfg(test)]
impl MockPdfEngine {
    /// An engine whose documents contain exactly `pages`.
    pub fn with_pages(pages: Vec<MockPage>) -> Self {
        Self {
            pages,
            fail_open: None,
        }
    }

    /// `count` identical text pages, each yielding `text`.
    pub fn text_pages(count: usize, text: &str) -> Self {
        Self::with_pages(vec![MockPage::with_text(text); count])
    }

    /// An engine for which every `open` fails (corrupt document).
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            pages: Vec::new(),
            fail_open: Some(reason.into()),
        }
    }
}

#[cfg(test)]
impl PdfEngine for MockPdfEngine {
    fn open<'a>(&'a self, _bytes: &'a [u8]) -> Result<Box<dyn PdfDocument + 'a>, PdfError> {
        match &self.fail_open {
            Some(reason) => Err(PdfError::Parse(reason.clone())),
            None => Ok(Box::new(MockDocument { pages: &self.pages })),
        }
    }
}

#[cfg(test)]
struct MockDocument<'a> {
    pages: &'a [MockPage],
}

#[cfg(test)]
impl PdfDocument for MockDocument<'_> {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<Box<dyn PdfPage + '_>, PdfError> {
        match self.pages.get(index) {
            Some(script) => Ok(Box::new(MockPageRef { index, script })),
            None => Err(PdfError::Page {
                index,
                reason: "out of range".into(),
            }),
        }
    }
}

#[cfg(test)]
struct MockPageRef<'a> {
    index: usize,
    script: &'a MockPage,
}

#[cfg(test)]
impl PdfPage for MockPageRef<'_> {
    fn text(&self) -> Result<String, PdfError> {
        self.script.text.clone().map_err(|reason| PdfError::Text {
            index: self.index,
            reason,
        })
    }

    fn render(&self, _scale: f32) -> Result<DynamicImage, PdfError> {
        if self.script.renderable {
            Ok(DynamicImage::new_rgba8(1, 1))
        } else {
            Err(PdfError::Render {
                index: self.index,
                reason: "unrenderable".into(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_serves_scripted_pages() {
        let engine = MockPdfEngine::with_pages(vec![
            MockPage::with_text("first page"),
            MockPage::text_failure("boom"),
        ]);

        let doc = engine.open(b"ignored").unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page(0).unwrap().text().unwrap(), "first page");
        assert!(matches!(
            doc.page(1).unwrap().text().unwrap_err(),
            PdfError::Text { index: 1, .. }
        ));
    }

    #[test]
    fn mock_page_out_of_range_errors() {
        let engine = MockPdfEngine::text_pages(1, "only");
        let doc = engine.open(b"ignored").unwrap();
        assert!(matches!(
            doc.page(5).unwrap_err(),
            PdfError::Page { index: 5, .. }
        ));
    }

    #[test]
    fn mock_failing_engine_refuses_open() {
        let engine = MockPdfEngine::failing("bad xref");
        assert!(matches!(
            engine.open(b"ignored").unwrap_err(),
            PdfError::Parse(_)
        ));
    }

    #[test]
    fn broken_page_fails_both_text_and_render() {
        let engine = MockPdfEngine::with_pages(vec![MockPage::broken("damaged")]);
        let doc = engine.open(b"ignored").unwrap();
        let page = doc.page(0).unwrap();
        assert!(page.text().is_err());
        assert!(page.render(2.0).is_err());
    }

    #[test]
    fn error_display_carries_page_index() {
        let e = PdfError::Text {
            index: 7,
            reason: "no layer".into(),
        };
        assert!(e.to_string().contains('7'));
    }
}
