//! Composing report emails and handing them to a transport.
//!
//! Talking SMTP is left to whatever implements [`Transport`]. The bundled
//! [`OutboxTransport`] drops messages into a directory instead.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::config::EmailConfig;
use crate::error::{ReportError, Result};
use crate::html::MarkupRenderer;
use crate::parser;
use crate::report::{AnalysisResult, ReportMetadata, report_filename, report_stem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html_body: String,
    pub attachment: Option<Attachment>,
    /// `Financial_Analysis_YYYYMMDD_HHMMSS`, used to name stored copies.
    pub reference: String,
}

/// Delivers composed messages.
pub trait Transport {
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Build the report email: HTML body from the markup renderer and an
/// optional PDF attachment.
pub fn compose(
    recipients: &[String],
    result: &AnalysisResult,
    pdf: Option<Vec<u8>>,
    timestamp: NaiveDateTime,
    email: &EmailConfig,
    renderer: &MarkupRenderer,
) -> Result<EmailMessage> {
    let to: Vec<String> = recipients
        .iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();
    if to.is_empty() {
        return Err(ReportError::Transport("no recipients given".to_string()));
    }

    let address = email.sender_address().ok_or_else(|| {
        ReportError::Transport(
            "sender address not configured; set [email].from or APP_EMAIL".to_string(),
        )
    })?;

    let blocks = parser::parse(result.body());
    let meta = ReportMetadata::new(result, timestamp);
    let html_body = renderer.document(&blocks, &meta);

    let attachment = pdf.map(|data| Attachment {
        filename: report_filename(timestamp, "pdf"),
        content_type: "application/pdf".to_string(),
        data,
    });

    Ok(EmailMessage {
        from: format!("{} <{}>", email.sender_name, address),
        to,
        subject: format!("Financial Report Analysis - {}", timestamp.format("%Y-%m-%d")),
        html_body,
        attachment,
        reference: report_stem(timestamp),
    })
}

/// Writes each message into a directory: `<reference>.html` for the body,
/// `<reference>.json` for the headers and the attachment under its own name.
#[derive(Debug, Clone)]
pub struct OutboxTransport {
    dir: PathBuf,
}

#[derive(Serialize)]
struct Headers<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    attachment: Option<&'a str>,
}

impl OutboxTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, data).map_err(|e| ReportError::io(path, e))
    }
}

impl Transport for OutboxTransport {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| ReportError::io(&self.dir, e))?;

        let headers = Headers {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            attachment: message.attachment.as_ref().map(|a| a.filename.as_str()),
        };
        let json = serde_json::to_vec_pretty(&headers)
            .map_err(|e| ReportError::Transport(e.to_string()))?;

        self.write(&format!("{}.json", message.reference), &json)?;
        self.write(&format!("{}.html", message.reference), message.html_body.as_bytes())?;
        if let Some(attachment) = &message.attachment {
            self.write(&attachment.filename, &attachment.data)?;
        }

        info!(
            "Email queued in {} for {}",
            self.dir.display(),
            message.to.join(", ")
        );
        Ok(())
    }
}
