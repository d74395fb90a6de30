//! The analysis boundary.
//!
//! Remote multimodal providers sit behind [`Analyzer`]. The crate ships only
//! [`MockAnalyzer`], which returns canned reports without network access.

use tracing::info;

use crate::error::{ReportError, Result};
use crate::report::AnalysisResult;

const MOCK_INVESTOR: &str = include_str!("mock/investor.md");
const MOCK_ANALYST: &str = include_str!("mock/analyst.md");
const MOCK_AUDITOR: &str = include_str!("mock/auditor.md");

/// Something that can turn document images and a prompt into analysis text.
pub trait Analyzer {
    fn analyze(&self, images: &[Vec<u8>], prompt: &str, role: &str) -> Result<AnalysisResult>;
}

/// Prefix the prompt with the user's role.
pub fn enhance_prompt(prompt: &str, role: &str) -> String {
    format!("[User Role: {role}]\n\n{prompt}")
}

/// Reject requests with no images or an empty prompt.
pub fn check_request(images: &[Vec<u8>], prompt: &str) -> Result<()> {
    if images.is_empty() {
        return Err(ReportError::InvalidRequest(
            "No images provided for analysis".to_string(),
        ));
    }
    if prompt.trim().is_empty() {
        return Err(ReportError::InvalidRequest(
            "No prompt provided for analysis".to_string(),
        ));
    }
    Ok(())
}

/// Returns pre-written reports keyed by role. Used for debugging the
/// rendering pipeline without spending API credits.
#[derive(Debug, Clone)]
pub struct MockAnalyzer {
    analysis_type: String,
}

impl MockAnalyzer {
    pub fn new(analysis_type: impl Into<String>) -> Self {
        Self {
            analysis_type: analysis_type.into(),
        }
    }

    /// The canned text for a role and analysis type.
    pub fn text_for(&self, role: &str) -> String {
        let base = match role {
            "Analyst" => MOCK_ANALYST,
            "Auditor" => MOCK_AUDITOR,
            _ => MOCK_INVESTOR,
        };

        let focus = [
            ("Risk", "risk factors and challenges"),
            ("Growth", "growth opportunities and expansion potential"),
            ("Profitability", "profit margins and return metrics"),
        ]
        .into_iter()
        .find(|(key, _)| self.analysis_type.contains(key));

        match focus {
            Some((key, emphasis)) => {
                let mut text = base.replace("Summary of", &format!("{key} Analysis of"));
                text.push_str(&format!(
                    "\n\n**Note:** This mock analysis emphasizes {emphasis}."
                ));
                text
            }
            None => base.to_string(),
        }
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new(crate::prompts::DEFAULT_ANALYSIS_TYPE)
    }
}

impl Analyzer for MockAnalyzer {
    fn analyze(&self, images: &[Vec<u8>], prompt: &str, role: &str) -> Result<AnalysisResult> {
        check_request(images, prompt)?;
        info!(
            "Generating mock {} for role {} ({} images)",
            self.analysis_type,
            role,
            images.len()
        );

        Ok(AnalysisResult {
            analysis: self.text_for(role),
            provider: "mock".to_string(),
            model: "debug-mode".to_string(),
            role: role.to_string(),
            image_count: images.len(),
        })
    }
}
