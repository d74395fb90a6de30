use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::Result;
use crate::parser;

const NOT_AVAILABLE: &str = "N/A";
const NO_ANALYSIS: &str = "No analysis available.";

/// Output of an analysis run: the model's text plus display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub image_count: usize,
}

impl AnalysisResult {
    /// The text to render, or a placeholder when the model returned nothing.
    pub fn body(&self) -> &str {
        if self.analysis.trim().is_empty() {
            NO_ANALYSIS
        } else {
            &self.analysis
        }
    }
}

/// Metadata printed alongside the rendered analysis.
///
/// The generation time is supplied by the caller so that rendering stays a
/// pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMetadata {
    pub generated_at: NaiveDateTime,
    pub provider: String,
    pub model: String,
    pub role: String,
    pub image_count: usize,
}

impl ReportMetadata {
    pub fn new(result: &AnalysisResult, generated_at: NaiveDateTime) -> Self {
        Self {
            generated_at,
            provider: result.provider.clone(),
            model: result.model.clone(),
            role: result.role.clone(),
            image_count: result.image_count,
        }
    }

    pub fn generated(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Upper-cased provider name.
    pub fn provider_display(&self) -> String {
        or_not_available(&self.provider).to_uppercase()
    }

    pub fn model_display(&self) -> &str {
        or_not_available(&self.model)
    }

    pub fn role_display(&self) -> &str {
        or_not_available(&self.role)
    }

    /// Label/value rows shown in the metadata table and panel.
    pub fn rows(&self) -> [(&'static str, String); 5] {
        [
            ("Generated:", self.generated()),
            ("AI Provider:", self.provider_display()),
            ("Model:", self.model_display().to_string()),
            ("User Role:", self.role_display().to_string()),
            ("Images Analyzed:", self.image_count.to_string()),
        ]
    }
}

fn or_not_available(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() { NOT_AVAILABLE } else { value }
}

/// `Financial_Analysis_YYYYMMDD_HHMMSS`
pub fn report_stem(timestamp: NaiveDateTime) -> String {
    format!("Financial_Analysis_{}", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Suggested file name for an exported artifact, e.g.
/// `Financial_Analysis_20241001_093000.pdf`.
pub fn report_filename(timestamp: NaiveDateTime, ext: &str) -> String {
    format!("{}.{}", report_stem(timestamp), ext)
}

/// A renderer turns parsed blocks into one output artifact.
pub trait Renderer {
    type Output;

    fn render(&self, blocks: &[Block], meta: &ReportMetadata) -> Result<Self::Output>;
}

/// Parse an analysis result and hand it to `renderer`.
pub fn render_report<R: Renderer>(
    renderer: &R,
    result: &AnalysisResult,
    generated_at: NaiveDateTime,
) -> Result<R::Output> {
    let blocks = parser::parse(result.body());
    let meta = ReportMetadata::new(result, generated_at);
    renderer.render(&blocks, &meta)
}
