//! The two-tier extraction pipeline.
//!
//! # Pipeline flow
//!
//! ```text
//! bytes ──▶ tier 1: text layer, page by page (failures skipped)
//!             │
//!             ├─ > 50 words ──▶ done (100%)
//!             │
//!             ├─ ≤ 50 words (scan-like) ─┐
//!             └─ parse failed ───────────┴─▶ tier 2: render + OCR,
//!                                            page by page up to the cap
//!                                              │
//!                                              ├─ Ok  ──▶ tokenize, done
//!                                              └─ Err ──▶ ExtractionError
//! ```
//!
//! The fallback gate is word count alone — no confidence scores from the
//! parser.  Any document whose text layer yields 50 words or fewer is
//! treated as scan-like.  Falling back is a policy branch, not an error;
//! only both tiers failing surfaces an [`ExtractionError`].
//!
//! Pages are processed strictly in order with one engine call in flight, so
//! at most one rendered raster is alive at a time regardless of document
//! size.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ocr::{OcrError, OcrProvider};
use crate::pdf::{PdfEngine, PdfError};
use crate::text::{tokenize, WordSequence};

use super::progress::{ProgressReporter, ProgressSink};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Tier-1 acceptance gate: a text layer must yield more than this many
/// words to be accepted without OCR.
pub const TEXT_LAYER_MIN_WORDS: usize = 50;

// ---------------------------------------------------------------------------
// ExtractOptions
// ---------------------------------------------------------------------------

/// Knobs for the OCR fallback tier.
///
/// Serialised as the `[extraction]` section of `settings.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Maximum number of pages the OCR tier will process.  Bounds
    /// worst-case cost on long scanned documents; pages past the cap simply
    /// contribute no text.
    pub ocr_page_limit: usize,

    /// Upscale factor for page rasters fed to OCR (1.0 = native page size).
    /// Higher values improve recognition accuracy at the cost of memory.
    pub ocr_render_scale: f32,

    /// Tesseract language code (e.g. `"eng"`).
    pub ocr_language: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            ocr_page_limit: 20,
            ocr_render_scale: 2.0,
            ocr_language: "eng".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ExtractionError
// ---------------------------------------------------------------------------

/// Both extraction tiers are exhausted.
///
/// Page-level failures never surface here — they are logged and the page
/// contributes no text.  Exactly one `ExtractionError` is produced per
/// failed call.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The document itself never parsed, in either tier.
    #[error("could not extract text: the file may be corrupted or protected ({source})")]
    Unreadable {
        #[source]
        source: PdfError,
    },

    /// The document parsed, but the OCR tier could not run.
    #[error("text recognition failed: {source}")]
    Ocr {
        #[source]
        source: OcrError,
    },
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Drives the complete bytes → [`WordSequence`] pipeline.
///
/// Both engines are injected so tests can substitute fakes, and because the
/// production PDF engine must be constructed on the worker thread that runs
/// the extraction.
///
/// ```rust,no_run
/// use rsvp_reader::extract::{ExtractOptions, Extractor};
/// use rsvp_reader::ocr::TesseractProvider;
/// use rsvp_reader::pdf::PdfiumEngine;
///
/// # fn main() -> anyhow::Result<()> {
/// let pdf = PdfiumEngine::new()?;
/// let ocr = TesseractProvider::new();
/// let extractor = Extractor::new(&pdf, &ocr, ExtractOptions::default());
///
/// let bytes = std::fs::read("paper.pdf")?;
/// let words = extractor.extract(&bytes, &mut |percent, message: &str| {
///     eprintln!("{percent:>3}% {message}");
/// })?;
/// println!("{} words", words.len());
/// # Ok(())
/// # }
/// ```
pub struct Extractor<'e> {
    pdf: &'e dyn PdfEngine,
    ocr: &'e dyn OcrProvider,
    options: ExtractOptions,
}

impl<'e> Extractor<'e> {
    pub fn new(pdf: &'e dyn PdfEngine, ocr: &'e dyn OcrProvider, options: ExtractOptions) -> Self {
        Self { pdf, ocr, options }
    }

    // -----------------------------------------------------------------------
    // Public entry point
    // -----------------------------------------------------------------------

    /// Extract the word sequence from `bytes`.
    ///
    /// Progress lands in `sink` as a monotonic 0–100 percent with a short
    /// message, reaching 100 on success.
    ///
    /// # Errors
    ///
    /// [`ExtractionError`] only when both tiers fail; a sparse or partially
    /// unreadable document is not an error.
    pub fn extract(
        &self,
        bytes: &[u8],
        sink: &mut dyn ProgressSink,
    ) -> Result<WordSequence, ExtractionError> {
        let mut progress = ProgressReporter::new(sink);
        progress.report(5, "Loading PDF...");

        match self.text_layer_pass(bytes, &mut progress) {
            Ok(text) => {
                let words = tokenize(&text);
                log::debug!("text layer yielded {} words", words.len());

                if words.len() > TEXT_LAYER_MIN_WORDS {
                    progress.report(100, "Extraction complete");
                    return Ok(words);
                }

                log::info!(
                    "text layer sparse ({} words), falling back to OCR",
                    words.len()
                );
                progress.report(30, "Text layer sparse, starting OCR...");
            }
            Err(e) => {
                log::warn!("text-layer extraction failed ({e}), falling back to OCR");
                progress.report(20, "Text extraction failed, trying OCR...");
            }
        }

        let ocr_text = self.ocr_pass(bytes, &mut progress)?;
        progress.report(100, "OCR complete");
        Ok(tokenize(&ocr_text))
    }

    // -----------------------------------------------------------------------
    // Tier 1 — text layer
    // -----------------------------------------------------------------------

    /// Concatenate every page's text layer, separated by spaces.
    ///
    /// A page whose text fetch fails is logged and skipped; only a document
    /// that fails to parse aborts the tier.
    fn text_layer_pass(
        &self,
        bytes: &[u8],
        progress: &mut ProgressReporter<'_>,
    ) -> Result<String, PdfError> {
        progress.report(10, "Reading PDF...");
        let doc = self.pdf.open(bytes)?;

        let total = doc.page_count();
        let mut full_text = String::new();

        for index in 0..total {
            progress.report_band(
                10,
                30,
                index + 1,
                total,
                &format!("Extracting page {}/{}", index + 1, total),
            );

            match doc.page(index).and_then(|page| page.text()) {
                Ok(text) => {
                    full_text.push_str(&text);
                    full_text.push(' ');
                }
                Err(e) => log::warn!("skipping text layer of page {}: {e}", index + 1),
            }
        }

        Ok(full_text)
    }

    // -----------------------------------------------------------------------
    // Tier 2 — OCR
    // -----------------------------------------------------------------------

    /// Render and recognize pages up to the configured cap.
    ///
    /// The OCR engine lives exactly as long as this call; its box drops on
    /// every exit path.  Each page's raster is dropped before the next page
    /// renders, bounding peak memory.
    fn ocr_pass(
        &self,
        bytes: &[u8],
        progress: &mut ProgressReporter<'_>,
    ) -> Result<String, ExtractionError> {
        progress.report(35, "Preparing OCR...");

        let doc = self
            .pdf
            .open(bytes)
            .map_err(|source| ExtractionError::Unreadable { source })?;

        let total = doc.page_count();
        let limit = total.min(self.options.ocr_page_limit);

        let mut engine = self
            .ocr
            .create(&self.options.ocr_language)
            .map_err(|source| ExtractionError::Ocr { source })?;

        let mut full_text = String::new();

        for index in 0..limit {
            progress.report_band(
                35,
                95,
                index + 1,
                limit,
                &format!("OCR page {}/{}", index + 1, limit),
            );

            let raster = match doc
                .page(index)
                .and_then(|page| page.render(self.options.ocr_render_scale))
            {
                Ok(raster) => raster,
                Err(e) => {
                    log::warn!("skipping OCR of page {}: {e}", index + 1);
                    continue;
                }
            };

            match engine.recognize(&raster) {
                Ok(text) => {
                    full_text.push_str(&text);
                    full_text.push(' ');
                }
                Err(e) => log::warn!("OCR failed on page {}: {e}", index + 1),
            }
        }

        if limit < total {
            log::info!("OCR processed {limit} of {total} pages");
        }

        Ok(full_text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
