//! Application entry point — RSVP reader.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Parse CLI arguments.
//! 3. Load [`AppConfig`] from disk (returns default on first run) and apply
//!    CLI overrides.
//! 4. Load the source: a PDF goes through the extraction pipeline on a
//!    blocking worker (with a progress bar fed by the pipeline's callback);
//!    anything else is read as plain text and tokenized directly.
//! 5. Run the terminal reader loop — blocks until the user quits.
//! 6. Persist the rate the session ended at so the next one starts there.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use rsvp_reader::{
    app::ReaderApp,
    config::AppConfig,
    extract::{ExtractOptions, Extractor},
    ocr::TesseractProvider,
    pdf::PdfiumEngine,
    text::{tokenize, WordSequence},
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "rsvp-reader")]
#[command(version)]
#[command(about = "Read PDFs and text files one word at a time", long_about = None)]
struct Cli {
    /// Input file — a PDF (text layer or scanned) or any plain-text file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Words per minute (overrides the saved setting)
    #[arg(short, long)]
    wpm: Option<u32>,

    /// Maximum pages to OCR when falling back on scanned documents
    #[arg(long, value_name = "N")]
    ocr_pages: Option<usize>,

    /// Render upscale factor for OCR page rasters
    #[arg(long, value_name = "FACTOR")]
    ocr_scale: Option<f32>,

    /// OCR language (Tesseract code, e.g. "eng")
    #[arg(long, value_name = "LANG")]
    language: Option<String>,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. CLI
    let cli = Cli::parse();

    // 3. Configuration + overrides
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    if let Some(wpm) = cli.wpm {
        config.playback.wpm = config.playback.clamp_wpm(wpm);
    }

    // Extraction flags are one-shot overrides; they are not written back to
    // settings.toml.
    let mut extraction = config.extraction.clone();
    if let Some(pages) = cli.ocr_pages {
        extraction.ocr_page_limit = pages;
    }
    if let Some(scale) = cli.ocr_scale {
        extraction.ocr_render_scale = scale;
    }
    if let Some(language) = cli.language {
        extraction.ocr_language = language;
    }

    // 4. Source loading
    let words = load_source(&cli.input, &extraction)?;
    if words.is_empty() {
        bail!("no words found in {}", cli.input.display());
    }
    log::info!("loaded {} words from {}", words.len(), cli.input.display());

    // 5. Reader loop
    let mut app = ReaderApp::new(words, config.playback.clone());
    app.run()?;

    // 6. Persist the rate the session ended at
    config.playback.wpm = app.player().wpm();
    if let Err(e) = config.save() {
        log::warn!("could not save settings: {e}");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Source loading
// ---------------------------------------------------------------------------

/// Route the input to the right front end: PDFs through the extraction
/// pipeline, everything else straight to the tokenizer.
fn load_source(input: &Path, options: &ExtractOptions) -> Result<WordSequence> {
    let bytes =
        fs::read(input).with_context(|| format!("could not read {}", input.display()))?;

    let looks_like_pdf = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        || bytes.starts_with(b"%PDF-");

    if looks_like_pdf {
        extract_pdf(bytes, options.clone())
    } else {
        let text = String::from_utf8(bytes)
            .with_context(|| format!("{} is not valid UTF-8 text", input.display()))?;
        Ok(tokenize(&text))
    }
}

/// Run the extraction pipeline on a blocking worker with a progress bar.
///
/// PDFium handles are not `Send`, so both engines are constructed inside
/// the worker closure; only the bytes, the options, and the (thread-safe)
/// progress bar cross the boundary.
fn extract_pdf(bytes: Vec<u8>, options: ExtractOptions) -> Result<WordSequence> {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos:>3}% {msg}")
            .context("invalid progress template")?,
    );
    let sink_bar = bar.clone();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let handle = rt.spawn_blocking(move || -> Result<WordSequence> {
        let pdf = PdfiumEngine::new()?;
        let ocr = TesseractProvider::new();
        let extractor = Extractor::new(&pdf, &ocr, options);

        let mut sink = |percent: u8, message: &str| {
            sink_bar.set_position(u64::from(percent));
            sink_bar.set_message(message.to_string());
        };

        Ok(extractor.extract(&bytes, &mut sink)?)
    });

    let words = rt
        .block_on(handle)
        .context("extraction worker panicked")??;

    bar.finish_with_message("done");
    Ok(words)
}
