//! Production PDF engine backed by PDFium via `pdfium-render`.
//!
//! [`PdfiumEngine::new`] binds to the system PDFium library once; the engine
//! is then an explicitly owned value injected into the extraction pipeline
//! (no ambient global).  PDFium handles are not `Send`, so the engine must
//! be constructed on the thread that uses it — the extraction worker does
//! exactly that.

use image::DynamicImage;
use pdfium_render::prelude::{
    PdfDocument as PdfiumDocument, PdfPage as PdfiumPage, PdfRenderConfig, Pdfium,
};

use super::engine::{PdfDocument, PdfEngine, PdfError, PdfPage};

// ---------------------------------------------------------------------------
// PdfiumEngine
// ---------------------------------------------------------------------------

/// PDF engine over the system PDFium library.
///
/// ```rust,no_run
/// use rsvp_reader::pdf::{PdfEngine, PdfiumEngine};
///
/// # fn main() -> Result<(), rsvp_reader::pdf::PdfError> {
/// let engine = PdfiumEngine::new()?;
/// let bytes = std::fs::read("paper.pdf").expect("failed to read file");
/// let document = engine.open(&bytes)?;
/// println!("{} pages", document.page_count());
/// # Ok(())
/// # }
/// ```
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    /// Bind to the system PDFium library.
    ///
    /// # Errors
    ///
    /// [`PdfError::EngineUnavailable`] when no PDFium library can be found
    /// or loaded.
    pub fn new() -> Result<Self, PdfError> {
        let bindings = Pdfium::bind_to_system_library()
            .map_err(|e| PdfError::EngineUnavailable(e.to_string()))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl PdfEngine for PdfiumEngine {
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn PdfDocument + 'a>, PdfError> {
        let doc = self
            .pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| PdfError::Parse(e.to_string()))?;

        Ok(Box::new(LoadedDocument { doc }))
    }
}

// ---------------------------------------------------------------------------
// LoadedDocument / LoadedPage
// ---------------------------------------------------------------------------

struct LoadedDocument<'a> {
    doc: PdfiumDocument<'a>,
}

impl PdfDocument for LoadedDocument<'_> {
    fn page_count(&self) -> usize {
        self.doc.pages().len() as usize
    }

    fn page(&self, index: usize) -> Result<Box<dyn PdfPage + '_>, PdfError> {
        let page_index = u16::try_from(index).map_err(|_| PdfError::Page {
            index,
            reason: "index exceeds PDFium page range".into(),
        })?;

        let page = self
            .doc
            .pages()
            .get(page_index)
            .map_err(|e| PdfError::Page {
                index,
                reason: e.to_string(),
            })?;

        Ok(Box::new(LoadedPage { index, page }))
    }
}

struct LoadedPage<'a> {
    index: usize,
    page: PdfiumPage<'a>,
}

impl PdfPage for LoadedPage<'_> {
    fn text(&self) -> Result<String, PdfError> {
        self.page
            .text()
            .map(|text| text.all())
            .map_err(|e| PdfError::Text {
                index: self.index,
                reason: e.to_string(),
            })
    }

    fn render(&self, scale: f32) -> Result<DynamicImage, PdfError> {
        let config = PdfRenderConfig::new().scale_page_by_factor(scale);

        let bitmap = self
            .page
            .render_with_config(&config)
            .map_err(|e| PdfError::Render {
                index: self.index,
                reason: e.to_string(),
            })?;

        Ok(bitmap.as_image())
    }
}
