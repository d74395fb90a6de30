use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::block::{Block, HeadingMarker, NumberedItem};
use crate::inline::strip_bold;

static NUMBERED_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());

/// Parse analysis text into a list of blocks.
///
/// Never fails: a line that matches no structural rule becomes a paragraph.
pub fn parse(text: &str) -> Vec<Block> {
    let mut parser = LineParser::default();
    for line in text.lines() {
        parser.feed(classify(line));
    }
    let blocks = parser.finish();
    debug!("Parsed {} blocks", blocks.len());
    blocks
}

/// Classification of one trimmed input line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    BoldHeading(&'a str),
    Bullet(&'a str),
    Numbered(&'a str),
    Text(&'a str),
}

/// Rules are tried in precedence order: `#` markers, full-bold line, bullet
/// marker, numbered marker, then plain text.
fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }

    if line.starts_with('#') {
        let rest = line.trim_start_matches('#');
        let hashes = line.len() - rest.len();
        return Line::Heading {
            level: hashes.min(3) as u8,
            text: rest.trim(),
        };
    }

    if let Some(text) = bold_heading(line) {
        return Line::BoldHeading(text);
    }

    if let Some(rest) = line
        .strip_prefix('•')
        .or_else(|| line.strip_prefix("- "))
        .or_else(|| line.strip_prefix("* "))
    {
        return Line::Bullet(rest.trim());
    }

    if let Some(m) = NUMBERED_PREFIX.find(line) {
        return Line::Numbered(&line[m.end()..]);
    }

    Line::Text(line)
}

/// `**Revenue Growth**` -> `Revenue Growth`. The interior must be non-empty.
/// Markers inside the interior are removed when the heading block is built.
fn bold_heading(line: &str) -> Option<&str> {
    if line.len() <= 4 {
        return None;
    }
    let inner = line.strip_prefix("**")?.strip_suffix("**")?.trim();
    (!inner.is_empty()).then_some(inner)
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Default,
    InBulletList(Vec<String>),
    InNumberedList(Vec<NumberedItem>),
}

#[derive(Default)]
struct LineParser {
    state: State,
    blocks: Vec<Block>,
}

impl LineParser {
    fn feed(&mut self, line: Line<'_>) {
        let state = std::mem::take(&mut self.state);
        self.state = match (state, line) {
            (State::InBulletList(mut items), Line::Bullet(text)) => {
                items.push(text.to_string());
                State::InBulletList(items)
            }
            (State::InNumberedList(mut items), Line::Numbered(text)) => {
                items.push(NumberedItem {
                    index: items.len() + 1,
                    text: text.to_string(),
                });
                State::InNumberedList(items)
            }
            // A blank line closes an open list and is consumed with it.
            (open, Line::Blank) => {
                self.close(open);
                State::Default
            }
            (open, line) => {
                self.close(open);
                self.start(line)
            }
        };
    }

    /// Handle a line with no list open.
    fn start(&mut self, line: Line<'_>) -> State {
        match line {
            Line::Blank => State::Default,
            Line::Heading { level, text } => {
                self.blocks.push(Block::heading(level, text));
                State::Default
            }
            Line::BoldHeading(text) => {
                self.blocks.push(Block::Heading {
                    level: 3,
                    text: strip_bold(text).trim().to_string(),
                    marker: HeadingMarker::Bold,
                });
                State::Default
            }
            Line::Bullet(text) => State::InBulletList(vec![text.to_string()]),
            Line::Numbered(text) => State::InNumberedList(vec![NumberedItem {
                index: 1,
                text: text.to_string(),
            }]),
            Line::Text(text) => {
                self.blocks.push(Block::paragraph(text));
                State::Default
            }
        }
    }

    fn close(&mut self, state: State) {
        match state {
            State::Default => {}
            State::InBulletList(items) => self.blocks.push(Block::BulletList { items }),
            State::InNumberedList(items) => self.blocks.push(Block::NumberedList { items }),
        }
    }

    fn finish(mut self) -> Vec<Block> {
        let state = std::mem::take(&mut self.state);
        self.close(state);
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bullets(items: &[&str]) -> Block {
        Block::BulletList {
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn numbered(items: &[&str]) -> Block {
        Block::NumberedList {
            items: items
                .iter()
                .enumerate()
                .map(|(i, s)| NumberedItem {
                    index: i + 1,
                    text: s.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn summary_scenario() {
        let blocks = parse("### Summary\n\n• Revenue: 100\n• Profit: 20\n\nNet margin improved.");
        assert_eq!(
            blocks,
            vec![
                Block::heading(3, "Summary"),
                bullets(&["Revenue: 100", "Profit: 20"]),
                Block::paragraph("Net margin improved."),
            ]
        );
    }

    #[test]
    fn plain_lines_become_paragraphs_in_order() {
        let blocks = parse("First line.\nSecond line.\n\n\nThird line.\n");
        assert_eq!(
            blocks,
            vec![
                Block::paragraph("First line."),
                Block::paragraph("Second line."),
                Block::paragraph("Third line."),
            ]
        );
    }

    #[test]
    fn heading_levels() {
        let blocks = parse("# One\n## Two\n### Three\n#### Four");
        assert_eq!(
            blocks,
            vec![
                Block::heading(1, "One"),
                Block::heading(2, "Two"),
                Block::heading(3, "Three"),
                Block::heading(3, "Four"),
            ]
        );
    }

    #[test]
    fn empty_heading_is_kept() {
        assert_eq!(parse("###"), vec![Block::heading(3, "")]);
        assert_eq!(parse("  #  "), vec![Block::heading(1, "")]);
    }

    #[test]
    fn full_bold_line_is_section_heading() {
        assert_eq!(
            parse("**Revenue Growth**"),
            vec![Block::Heading {
                level: 3,
                text: "Revenue Growth".to_string(),
                marker: HeadingMarker::Bold,
            }]
        );
    }

    #[test]
    fn bold_heading_drops_inner_markers() {
        assert_eq!(
            parse("**Revenue** and **Costs**"),
            vec![Block::Heading {
                level: 3,
                text: "Revenue and Costs".to_string(),
                marker: HeadingMarker::Bold,
            }]
        );
    }

    #[test]
    fn short_or_empty_bold_is_not_a_heading() {
        assert_eq!(parse("****"), vec![Block::paragraph("****")]);
        assert_eq!(parse("**   **"), vec![Block::paragraph("**   **")]);
    }

    #[test]
    fn inline_bold_stays_in_paragraph_text() {
        assert_eq!(
            parse("**Note:** figures are unaudited"),
            vec![Block::paragraph("**Note:** figures are unaudited")]
        );
    }

    #[test]
    fn bullet_markers() {
        let blocks = parse("• one\n- two\n* three\n•four");
        assert_eq!(blocks, vec![bullets(&["one", "two", "three", "four"])]);
    }

    #[test]
    fn bullet_keeps_inline_bold() {
        let blocks = parse("• **Net Profit**: USD 1,250 million");
        assert_eq!(blocks, vec![bullets(&["**Net Profit**: USD 1,250 million"])]);
    }

    #[test]
    fn dash_without_space_is_text() {
        assert_eq!(parse("---"), vec![Block::paragraph("---")]);
        assert_eq!(parse("-5% margin"), vec![Block::paragraph("-5% margin")]);
    }

    #[test]
    fn numbered_items_are_renumbered() {
        let blocks = parse("5. Alpha\n7. Beta");
        assert_eq!(blocks, vec![numbered(&["Alpha", "Beta"])]);
    }

    #[test]
    fn numbered_prefix_without_space() {
        assert_eq!(parse("12.Growth"), vec![numbered(&["Growth"])]);
    }

    #[test]
    fn bullet_does_not_continue_numbered_list() {
        let blocks = parse("1. First\n• Aside\n2. Second");
        assert_eq!(
            blocks,
            vec![numbered(&["First"]), bullets(&["Aside"]), numbered(&["Second"])]
        );
    }

    #[test]
    fn blank_line_closes_list() {
        let blocks = parse("- a\n- b\n\n- c");
        assert_eq!(blocks, vec![bullets(&["a", "b"]), bullets(&["c"])]);
    }

    #[test]
    fn text_line_closes_list_and_is_kept() {
        let blocks = parse("- a\nclosing remark\n### Next");
        assert_eq!(
            blocks,
            vec![
                bullets(&["a"]),
                Block::paragraph("closing remark"),
                Block::heading(3, "Next"),
            ]
        );
    }

    #[test]
    fn indented_sub_bullets_join_the_run() {
        let blocks = parse("• **Total Revenue**: USD 4,850 million\n  - Product Sales: USD 3,200 million");
        assert_eq!(
            blocks,
            vec![bullets(&[
                "**Total Revenue**: USD 4,850 million",
                "Product Sales: USD 3,200 million"
            ])]
        );
    }

    #[test]
    fn list_open_at_end_of_input_is_emitted() {
        assert_eq!(parse("1. only"), vec![numbered(&["only"])]);
    }

    #[test]
    fn crlf_input() {
        let blocks = parse("## Title\r\n\r\nBody\r\n");
        assert_eq!(blocks, vec![Block::heading(2, "Title"), Block::paragraph("Body")]);
    }

    #[test]
    fn hash_always_wins() {
        // No escaping: a leading `#` is structural even mid-sentence.
        assert_eq!(parse("#1 priority"), vec![Block::heading(1, "1 priority")]);
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "# A\n1. x\n2. y\n\n• z\n**B**\ntext";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }
}
