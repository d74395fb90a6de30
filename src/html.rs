//! HTML email rendering.
//!
//! [`MarkupRenderer::render`] produces a body fragment from parsed blocks;
//! [`MarkupRenderer::wrap`] embeds a fragment in a complete styled document
//! with a header banner, metadata panel and footer.

use tracing::debug;

use crate::block::{Block, HeadingMarker};
use crate::config::Config;
use crate::error::Result;
use crate::inline::{bold_to_html, escape_html, strip_bold};
use crate::report::{ReportMetadata, Renderer};

const UL_STYLE: &str = "margin-left: 20px; margin-bottom: 10px;";
const LI_STYLE: &str = "margin-bottom: 5px;";
const P_STYLE: &str = "margin-bottom: 8px;";

#[derive(Debug, Clone)]
pub struct MarkupRenderer {
    config: Config,
}

impl MarkupRenderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Render blocks to an HTML fragment.
    ///
    /// `#` maps to `<h2>`, `##` and `###` both map to `<h3>`, and a line
    /// fully wrapped in `**` maps to a styled `<h4>`. Numbered items are
    /// emitted as paragraphs, not as an `<ol>`.
    pub fn fragment(&self, blocks: &[Block]) -> String {
        let mut lines = Vec::new();

        for block in blocks {
            match block {
                Block::Heading {
                    level,
                    text,
                    marker,
                } => {
                    let text = escape_html(&strip_bold(text));
                    let line = match (marker, level) {
                        (HeadingMarker::Bold, _) => format!(
                            r#"<h4 style="color: {}; margin-top: 15px;">{text}</h4>"#,
                            self.config.styles.subtitle.color
                        ),
                        (HeadingMarker::Hash, 1) => format!("<h2>{text}</h2>"),
                        (HeadingMarker::Hash, _) => format!("<h3>{text}</h3>"),
                    };
                    lines.push(line);
                }
                Block::Paragraph { text } => {
                    lines.push(format!(r#"<p style="{P_STYLE}">{}</p>"#, inline(text)));
                }
                Block::BulletList { items } => {
                    lines.push(format!(r#"<ul style="{UL_STYLE}">"#));
                    for item in items {
                        lines.push(format!(r#"<li style="{LI_STYLE}">{}</li>"#, inline(item)));
                    }
                    lines.push("</ul>".to_string());
                }
                Block::NumberedList { items } => {
                    for item in items {
                        lines.push(format!(
                            r#"<p style="{P_STYLE}">{}. {}</p>"#,
                            item.index,
                            inline(&item.text)
                        ));
                    }
                }
            }
        }

        lines.join("\n")
    }

    /// Embed a fragment in the full email document.
    pub fn wrap(&self, fragment: &str, meta: &ReportMetadata) -> String {
        let report = &self.config.report;
        let styles = &self.config.styles;
        let accent = &styles.title.color;
        let heading = &styles.subtitle.color;

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&report.title)));
        html.push_str("<style>\n");
        html.push_str(
            "body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; \
             max-width: 800px; margin: 0 auto; padding: 20px; }\n",
        );
        html.push_str(&format!(
            ".header {{ background-color: {accent}; color: white; padding: 20px; \
             text-align: center; border-radius: 5px; }}\n"
        ));
        html.push_str(&format!(
            ".metadata {{ background-color: #f4f4f4; padding: 15px; margin: 20px 0; \
             border-left: 4px solid {accent}; }}\n"
        ));
        html.push_str(".metadata-item { margin: 5px 0; }\n");
        html.push_str(".analysis { margin-top: 20px; padding: 20px; background-color: white; }\n");
        html.push_str(&format!(
            "h2 {{ color: {accent}; border-bottom: 2px solid {accent}; padding-bottom: 10px; }}\n"
        ));
        html.push_str(&format!("h3 {{ color: {heading}; margin-top: 20px; }}\n"));
        html.push_str(
            ".footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; \
             font-size: 12px; color: #666; text-align: center; }\n",
        );
        html.push_str("</style>\n</head>\n<body>\n");

        html.push_str(&format!(
            "<div class=\"header\">\n<h1>{}</h1>\n</div>\n",
            escape_html(&report.title)
        ));

        html.push_str("<div class=\"metadata\">\n");
        for (label, value) in meta.rows() {
            html.push_str(&format!(
                "<div class=\"metadata-item\"><strong>{label}</strong> {}</div>\n",
                escape_html(&value)
            ));
        }
        html.push_str("</div>\n");

        html.push_str(&format!(
            "<div class=\"analysis\">\n<h2>{}</h2>\n{fragment}\n</div>\n",
            escape_html(&report.body_title)
        ));

        html.push_str("<div class=\"footer\">\n");
        for line in &report.footer {
            html.push_str(&format!("<p>{}</p>\n", escape_html(line)));
        }
        html.push_str("</div>\n</body>\n</html>\n");

        html
    }

    /// Fragment plus envelope in one call.
    pub fn document(&self, blocks: &[Block], meta: &ReportMetadata) -> String {
        self.wrap(&self.fragment(blocks), meta)
    }
}

impl Default for MarkupRenderer {
    fn default() -> Self {
        Self::new(Config::compiled_default())
    }
}

impl Renderer for MarkupRenderer {
    type Output = String;

    /// Never fails; malformed emphasis degrades to plain text.
    fn render(&self, blocks: &[Block], _meta: &ReportMetadata) -> Result<String> {
        let fragment = self.fragment(blocks);
        debug!("Rendered HTML fragment: {} chars", fragment.len());
        Ok(fragment)
    }
}

fn inline(text: &str) -> String {
    bold_to_html(&escape_html(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn fragment(text: &str) -> String {
        MarkupRenderer::default().fragment(&parse(text))
    }

    fn meta() -> ReportMetadata {
        ReportMetadata {
            generated_at: NaiveDate::from_ymd_opt(2024, 11, 5)
                .unwrap()
                .and_hms_opt(14, 2, 9)
                .unwrap(),
            provider: "openai".into(),
            model: "gpt-4o-mini".into(),
            role: "Auditor".into(),
            image_count: 4,
        }
    }

    #[test]
    fn heading_tiers() {
        assert_eq!(fragment("# Top"), "<h2>Top</h2>");
        assert_eq!(fragment("## Mid"), "<h3>Mid</h3>");
        assert_eq!(fragment("### Low"), "<h3>Low</h3>");
        assert_eq!(
            fragment("**Section**"),
            r#"<h4 style="color: #2c5f99; margin-top: 15px;">Section</h4>"#
        );
    }

    #[test]
    fn bullet_list_is_a_real_list() {
        assert_eq!(
            fragment("• **Revenue**: 100\n• Profit: 20"),
            [
                r#"<ul style="margin-left: 20px; margin-bottom: 10px;">"#,
                r#"<li style="margin-bottom: 5px;"><strong>Revenue</strong>: 100</li>"#,
                r#"<li style="margin-bottom: 5px;">Profit: 20</li>"#,
                "</ul>",
            ]
            .join("\n")
        );
    }

    #[test]
    fn numbered_items_are_paragraphs() {
        assert_eq!(
            fragment("3. First\n9. Second"),
            [
                r#"<p style="margin-bottom: 8px;">1. First</p>"#,
                r#"<p style="margin-bottom: 8px;">2. Second</p>"#,
            ]
            .join("\n")
        );
    }

    #[test]
    fn unbalanced_bold_is_stripped() {
        let out = fragment("Revenue **grew by 12%");
        assert_eq!(out, r#"<p style="margin-bottom: 8px;">Revenue grew by 12%</p>"#);
        assert!(!out.contains("<strong>"));
        assert!(!out.contains("**"));
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(
            fragment("R&D <rose>"),
            r#"<p style="margin-bottom: 8px;">R&amp;D &lt;rose&gt;</p>"#
        );
    }

    #[test]
    fn wrap_contains_metadata() {
        let html = MarkupRenderer::default().wrap("<p>body</p>", &meta());
        assert!(html.contains("<strong>AI Provider:</strong> OPENAI"));
        assert!(html.contains("<strong>Images Analyzed:</strong> 4"));
        assert!(html.contains("<strong>Generated:</strong> 2024-11-05 14:02:09"));
        assert!(html.contains("<strong>Model:</strong> gpt-4o-mini"));
        assert!(html.contains("<h2>Analysis Results</h2>\n<p>body</p>"));
        assert!(html.contains("should be reviewed by qualified professionals."));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn render_never_fails() {
        let renderer = MarkupRenderer::default();
        let blocks = parse("**\n** odd ** markers **here\n- **");
        assert!(renderer.render(&blocks, &meta()).is_ok());
    }
}
