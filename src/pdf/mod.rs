//! PDF structural-parser seam.
//!
//! The extraction pipeline never talks to a PDF library directly; it goes
//! through the object-safe [`PdfEngine`] / [`PdfDocument`] / [`PdfPage`]
//! traits so tests can substitute a fake document.  [`PdfiumEngine`] is the
//! production implementation over the system PDFium library.

pub mod engine;
pub mod pdfium;

pub use engine::{PdfDocument, PdfEngine, PdfError, PdfPage};
pub use pdfium::PdfiumEngine;

#[cfg(test)]
pub use engine::{MockPage, MockPdfEngine};
