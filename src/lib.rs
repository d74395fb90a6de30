//! Render model-generated analysis text into PDF reports and HTML emails.
//!
//! Analysis text uses a small markdown dialect: `#`/`##`/`###` headings,
//! lines fully wrapped in `**` as section headings, `•`/`-`/`*` bullets,
//! `N.` numbered items, inline `**bold**` and blank-line paragraph breaks.
//! [`parse`] turns it into [`Block`]s once; [`PrintRenderer`] and
//! [`MarkupRenderer`] each consume the same blocks.

pub mod analysis;
mod block;
mod config;
pub mod email;
mod error;
mod html;
pub mod images;
mod inline;
mod parser;
mod print;
pub mod prompts;
mod report;
mod typst;

pub use analysis::{Analyzer, MockAnalyzer};
pub use block::{Block, HeadingMarker, NumberedItem};
pub use config::{
    Config, EmailConfig, ImageConfig, PageConfig, ParagraphConfig, ReportConfig, StyleSheet,
    TextStyle,
};
pub use error::{ReportError, Result};
pub use html::MarkupRenderer;
pub use inline::{bold_to_html, escape_html, strip_bold};
pub use print::PrintRenderer;
pub use report::{
    AnalysisResult, Renderer, ReportMetadata, render_report, report_filename, report_stem,
};

use chrono::NaiveDateTime;

/// Parse analysis text into a vector of blocks.
pub fn parse(text: &str) -> Vec<Block> {
    parser::parse(text)
}

/// Typst source for the PDF report of `result`.
pub fn report_to_typst(
    result: &AnalysisResult,
    generated_at: NaiveDateTime,
    config: &Config,
) -> String {
    let blocks = parse(result.body());
    let meta = ReportMetadata::new(result, generated_at);
    typst::report_to_typst(&blocks, &meta, config)
}

/// Render `result` to PDF bytes.
pub fn report_to_pdf(
    result: &AnalysisResult,
    generated_at: NaiveDateTime,
    config: &Config,
) -> Result<Vec<u8>> {
    render_report(&PrintRenderer::new(config.clone()), result, generated_at)
}

/// Render `result` to a complete HTML email document.
pub fn report_to_html(
    result: &AnalysisResult,
    generated_at: NaiveDateTime,
    config: &Config,
) -> String {
    let blocks = parse(result.body());
    let meta = ReportMetadata::new(result, generated_at);
    MarkupRenderer::new(config.clone()).document(&blocks, &meta)
}
