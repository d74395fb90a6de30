/// Which source marker produced a heading.
///
/// `###` lines and lines fully wrapped in `**` share level 3 but the markup
/// renderer styles them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingMarker {
    Hash,
    Bold,
}

/// A numbered list entry. `index` is assigned sequentially from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedItem {
    pub index: usize,
    pub text: String,
}

/// Block-level elements parsed from analysis text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
        marker: HeadingMarker,
    },
    Paragraph {
        text: String,
    },
    BulletList {
        items: Vec<String>,
    },
    NumberedList {
        items: Vec<NumberedItem>,
    },
}

impl Block {
    pub(crate) fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
            marker: HeadingMarker::Hash,
        }
    }

    pub(crate) fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }
}
