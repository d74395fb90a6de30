use tracing::{debug, info};
use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

use crate::block::Block;
use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::report::{ReportMetadata, Renderer};
use crate::typst::report_to_typst;

/// Renders blocks to a paginated PDF report.
///
/// Only the fonts embedded in the binary are used, and no creation date is
/// written, so identical input produces identical bytes.
#[derive(Debug, Clone)]
pub struct PrintRenderer {
    config: Config,
}

impl PrintRenderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The Typst source the PDF is compiled from.
    pub fn markup(&self, blocks: &[Block], meta: &ReportMetadata) -> String {
        report_to_typst(blocks, meta, &self.config)
    }
}

impl Default for PrintRenderer {
    fn default() -> Self {
        Self::new(Config::compiled_default())
    }
}

impl Renderer for PrintRenderer {
    type Output = Vec<u8>;

    fn render(&self, blocks: &[Block], meta: &ReportMetadata) -> Result<Vec<u8>> {
        let markup = self.markup(blocks, meta);
        debug!("Generated {} bytes of Typst markup", markup.len());

        let doc = compile_document(markup)?;
        let pdf = typst_pdf::pdf(&doc, &PdfOptions::default())
            .map_err(|e| ReportError::Build(format!("PDF generation failed: {:?}", e)))?;

        info!("Rendered PDF report: {} pages, {} bytes", doc.pages.len(), pdf.len());
        Ok(pdf)
    }
}

fn compile_document(markup: String) -> Result<PagedDocument> {
    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(markup)
        .search_fonts_with(font_options)
        .build();

    engine
        .compile()
        .output
        .map_err(|e| ReportError::Build(format!("Typst compilation failed: {:?}", e)))
}
