use crate::block::{Block, HeadingMarker};
use crate::config::{Config, StyleSheet, TextStyle};
use crate::inline::strip_bold;
use crate::report::ReportMetadata;

/// Convert a full report (title page, metadata table, body) to Typst markup.
pub fn report_to_typst(blocks: &[Block], meta: &ReportMetadata, config: &Config) -> String {
    let styles = &config.styles;
    let mut out = String::new();

    emit_setup(config, &mut out);

    out.push_str("#align(center)[");
    styled_text(&config.report.title, &styles.title, &mut out);
    out.push_str("]\n");
    out.push_str(&format!("#v({}pt)\n\n", styles.title.space_after));

    emit_metadata_table(meta, styles, &mut out);
    out.push_str("#v(0.4in)\n\n");

    emit_heading(&config.report.body_title, &styles.subtitle, &mut out);
    out.push_str("#v(0.2in)\n\n");

    out.push_str(&blocks_to_typst(blocks, styles));
    out
}

/// Convert body blocks to Typst markup.
///
/// `###` and full-bold lines use the section style; `#` and `##` share the
/// subtitle style. Inline `**` markers are dropped.
pub fn blocks_to_typst(blocks: &[Block], styles: &StyleSheet) -> String {
    let mut out = String::new();

    for block in blocks {
        match block {
            Block::Heading {
                level,
                text,
                marker,
            } => {
                let style = match (marker, level) {
                    (HeadingMarker::Bold, _) | (HeadingMarker::Hash, 3..) => &styles.section,
                    (HeadingMarker::Hash, _) => &styles.subtitle,
                };
                emit_heading(&strip_bold(text), style, &mut out);
            }
            Block::Paragraph { text } => {
                escape_text(&strip_bold(text), &mut out);
                out.push_str("\n\n");
            }
            Block::BulletList { items } => {
                for item in items {
                    out.push_str("• ");
                    escape_text(&strip_bold(item), &mut out);
                    out.push_str("\n\n");
                }
            }
            Block::NumberedList { items } => {
                for item in items {
                    escape_text(&format!("{}. {}", item.index, strip_bold(&item.text)), &mut out);
                    out.push_str("\n\n");
                }
            }
        }
    }

    out
}

fn emit_setup(config: &Config, out: &mut String) {
    let page = &config.page;
    let body = &config.styles.body;
    let paragraph = &config.styles.paragraph;

    out.push_str("#set document(title: ");
    string_literal(&config.report.title, out);
    out.push_str(", date: none)\n");

    out.push_str("#set page(paper: ");
    string_literal(&page.paper, out);
    out.push_str(&format!(
        ", margin: (top: {}, bottom: {}, x: {}))\n",
        page.margin_top, page.margin_bottom, page.margin_x
    ));

    out.push_str(&format!("#set text(size: {}pt, fill: rgb(", body.size));
    string_literal(&body.color, out);
    out.push_str("))\n");

    out.push_str(&format!(
        "#set par(justify: {}, leading: {}pt, spacing: {}pt, linebreaks: \"optimized\")\n\n",
        paragraph.justify, paragraph.line_spacing, body.space_after
    ));
}

fn emit_heading(text: &str, style: &TextStyle, out: &mut String) {
    // Sticky keeps the heading on the same page as the block after it.
    out.push_str(&format!(
        "#block(above: {}pt, below: {}pt, sticky: true)[",
        style.space_before, style.space_after
    ));
    styled_text(text, style, out);
    out.push_str("]\n\n");
}

fn emit_metadata_table(meta: &ReportMetadata, styles: &StyleSheet, out: &mut String) {
    out.push_str("#table(\n");
    out.push_str("  columns: (1.5in, 4.5in),\n");
    out.push_str("  stroke: none,\n");
    out.push_str(&format!(
        "  inset: (x: 0pt, top: 0pt, bottom: {}pt),\n",
        styles.metadata.space_after
    ));

    let value_style = TextStyle {
        color: styles.body.color.clone(),
        ..styles.metadata.clone()
    };
    for (label, value) in meta.rows() {
        out.push_str("  [");
        styled_text(label, &styles.metadata, out);
        out.push_str("], [");
        styled_text(&value, &value_style, out);
        out.push_str("],\n");
    }

    out.push_str(")\n");
}

fn styled_text(text: &str, style: &TextStyle, out: &mut String) {
    out.push_str(&format!("#text(size: {}pt, fill: rgb(", style.size));
    string_literal(&style.color, out);
    out.push(')');
    if style.bold {
        out.push_str(", weight: \"bold\"");
    }
    out.push_str(")[");
    escape_text(text, out);
    out.push(']');
}

/// Escape text for Typst markup.
///
/// Every ASCII punctuation character is backslash-escaped, which covers
/// markup syntax (`*`, `_`, `#`, `=`, `-`, `+`, `/`, `<`, `>`, `@`, `$`, ...)
/// as well as list and enum markers at the start of a paragraph.
pub(crate) fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        if ch.is_ascii_punctuation() {
            out.push('\\');
            out.push(ch);
        } else if ch.is_control() {
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
}

fn string_literal(value: &str, out: &mut String) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}
