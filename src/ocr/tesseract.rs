//! Production OCR backend over Tesseract via `leptess`.
//!
//! Page rasters arrive as [`image::DynamicImage`]; Leptonica wants encoded
//! bytes, so each raster is PNG-encoded in memory before recognition.  A
//! [`TesseractOcr`] engine owns one `LepTess` instance with its loaded
//! language model; dropping the engine releases it.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use leptess::LepTess;

use super::engine::{OcrEngine, OcrError, OcrProvider};

// ---------------------------------------------------------------------------
// TesseractProvider
// ---------------------------------------------------------------------------

/// Creates [`TesseractOcr`] engines using the system Tesseract data path.
///
/// ```rust,no_run
/// use rsvp_reader::ocr::{OcrProvider, TesseractProvider};
///
/// # fn main() -> Result<(), rsvp_reader::ocr::OcrError> {
/// let provider = TesseractProvider::new();
/// let _engine = provider.create("eng")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct TesseractProvider;

impl TesseractProvider {
    pub fn new() -> Self {
        Self
    }
}

impl OcrProvider for TesseractProvider {
    /// Load the `language` model into a fresh engine.
    ///
    /// # Errors
    ///
    /// [`OcrError::Init`] when Tesseract or its language data cannot be
    /// loaded.
    fn create(&self, language: &str) -> Result<Box<dyn OcrEngine>, OcrError> {
        let inner = LepTess::new(None, language).map_err(|e| OcrError::Init(e.to_string()))?;
        Ok(Box::new(TesseractOcr { inner }))
    }
}

// ---------------------------------------------------------------------------
// TesseractOcr
// ---------------------------------------------------------------------------

/// One Tesseract instance with a loaded language model.
pub struct TesseractOcr {
    inner: LepTess,
}

impl OcrEngine for TesseractOcr {
    fn recognize(&mut self, image: &DynamicImage) -> Result<String, OcrError> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| OcrError::Encode(e.to_string()))?;

        self.inner
            .set_image_from_mem(&png)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        self.inner
            .get_utf8_text()
            .map_err(|e| OcrError::Recognition(e.to_string()))
    }
}
