use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{ReportError, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Immutable report configuration.
///
/// Built once (from the bundled defaults or a user file) and handed to the
/// renderers by reference; nothing in the crate keeps a global style table.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    pub page: PageConfig,
    pub styles: StyleSheet,
    pub email: EmailConfig,
    pub images: ImageConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    pub body_title: String,
    pub footer: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Financial Report Analysis".to_string(),
            body_title: "Analysis Results".to_string(),
            footer: vec![
                "This analysis was generated using AI and should be reviewed by qualified professionals."
                    .to_string(),
                "Generated by Financial Report Analysis AI Tool".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub paper: String,
    pub margin_top: String,
    pub margin_bottom: String,
    pub margin_x: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            paper: "us-letter".to_string(),
            margin_top: "1in".to_string(),
            margin_bottom: "0.75in".to_string(),
            margin_x: "0.75in".to_string(),
        }
    }
}

/// One named text style. Sizes and spacing are in points.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextStyle {
    pub size: f64,
    pub color: String,
    pub space_before: f64,
    pub space_after: f64,
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 11.0,
            color: "#000000".to_string(),
            space_before: 0.0,
            space_after: 10.0,
            bold: false,
        }
    }
}

impl TextStyle {
    fn heading(size: f64, color: &str, space_before: f64, space_after: f64) -> Self {
        Self {
            size,
            color: color.to_string(),
            space_before,
            space_after,
            bold: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParagraphConfig {
    pub justify: bool,
    /// Gap between lines of a paragraph, in points.
    pub line_spacing: f64,
}

impl Default for ParagraphConfig {
    fn default() -> Self {
        Self {
            justify: true,
            line_spacing: 3.0,
        }
    }
}

/// Styles for the print and markup renderers.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleSheet {
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub section: TextStyle,
    pub body: TextStyle,
    pub metadata: TextStyle,
    pub paragraph: ParagraphConfig,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            title: TextStyle::heading(24.0, "#1f4788", 0.0, 30.0),
            subtitle: TextStyle::heading(16.0, "#2c5f99", 12.0, 12.0),
            section: TextStyle::heading(14.0, "#1f4788", 16.0, 8.0),
            body: TextStyle::default(),
            metadata: TextStyle {
                size: 9.0,
                color: "#808080".to_string(),
                space_before: 0.0,
                space_after: 6.0,
                bold: false,
            },
            paragraph: ParagraphConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub sender_name: String,
    /// Sender address. Empty means "use the `APP_EMAIL` environment variable".
    pub from: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            sender_name: "Financial Analysis AI".to_string(),
            from: String::new(),
        }
    }
}

impl EmailConfig {
    /// Resolve the sender address, falling back to `APP_EMAIL`.
    pub fn sender_address(&self) -> Option<String> {
        if !self.from.trim().is_empty() {
            return Some(self.from.trim().to_string());
        }
        std::env::var("APP_EMAIL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    pub formats: Vec<String>,
    pub max_size_mb: u32,
    pub max_dimension: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            formats: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
            max_size_mb: 10,
            max_dimension: 2048,
        }
    }
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn compiled_default() -> Self {
        // build.rs rejects a malformed file, so this only falls back if the
        // bundled keys stop matching the struct layout.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file. Keys missing from the file keep their
    /// default values.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ReportError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ReportError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_file_matches_struct_defaults() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG).expect("bundled config parses");
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn bundled_file_has_every_section() {
        let table: toml::Table = DEFAULT_CONFIG.parse().unwrap();
        for section in ["report", "page", "styles", "email", "images"] {
            assert!(table[section].is_table(), "{section}");
        }
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report]\ntitle = \"Quarterly Review\"\n\n[styles.body]\nsize = 12.0").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.report.title, "Quarterly Review");
        assert_eq!(config.report.body_title, "Analysis Results");
        assert_eq!(config.styles.body.size, 12.0);
        assert_eq!(config.styles.body.space_after, 10.0);
        assert_eq!(config.email.smtp_port, 587);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(Path::new("/nonexistent/finreport.toml")).unwrap_err();
        assert!(matches!(err, ReportError::Config { .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report\ntitle = ").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn explicit_sender_wins_over_environment() {
        let email = EmailConfig {
            from: " reports@example.com ".to_string(),
            ..EmailConfig::default()
        };
        assert_eq!(email.sender_address().as_deref(), Some("reports@example.com"));
    }
}
