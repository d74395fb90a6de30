//! End-to-end tests: analysis result -> parse -> PDF / HTML email.

use chrono::{NaiveDate, NaiveDateTime};
use finreport::email::{OutboxTransport, Transport, compose};
use finreport::{
    AnalysisResult, Analyzer, Block, Config, HeadingMarker, MarkupRenderer, MockAnalyzer,
    PrintRenderer, Renderer, ReportMetadata, parse, render_report, report_to_html, report_to_pdf,
    report_to_typst,
};
use pretty_assertions::assert_eq;

fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, 15)
        .unwrap()
        .and_hms_opt(16, 45, 30)
        .unwrap()
}

fn mock_result(role: &str, analysis_type: &str) -> AnalysisResult {
    MockAnalyzer::new(analysis_type)
        .analyze(&[vec![0u8; 16], vec![0u8; 16]], "Analyze.", role)
        .unwrap()
}

#[test]
fn mock_reports_parse_into_structure() {
    for role in ["Investor", "Analyst", "Auditor"] {
        let blocks = parse(&mock_result(role, "Overall Analysis").analysis);
        assert!(matches!(blocks[0], Block::Heading { level: 3, .. }), "{role}");
        assert!(blocks.iter().any(|b| matches!(b, Block::BulletList { .. })), "{role}");
        assert!(blocks.iter().any(|b| matches!(b, Block::NumberedList { .. })), "{role}");
    }
}

#[test]
fn bold_heading_lines_in_mock_text() {
    let blocks = parse(&mock_result("Analyst", "Overall Analysis").analysis);
    assert!(blocks.contains(&Block::Heading {
        level: 3,
        text: "EXECUTIVE SUMMARY".to_string(),
        marker: HeadingMarker::Bold,
    }));
}

#[test]
fn pdf_is_deterministic_for_a_fixed_timestamp() {
    let result = mock_result("Investor", "Risk Analysis");
    let config = Config::compiled_default();

    let first = report_to_pdf(&result, timestamp(), &config).unwrap();
    let second = report_to_pdf(&result, timestamp(), &config).unwrap();

    assert!(first.starts_with(b"%PDF"));
    assert_eq!(first, second);
}

#[test]
fn typst_source_carries_metadata() {
    let result = mock_result("Auditor", "Overall Analysis");
    let markup = report_to_typst(&result, timestamp(), &Config::compiled_default());
    assert!(markup.contains("[MOCK]"));
    assert!(markup.contains("[debug\\-mode]"));
    assert!(markup.contains("[2024\\-10\\-15 16\\:45\\:30]"));
}

#[test]
fn html_document_has_metadata_and_no_stray_markers() {
    let result = mock_result("Investor", "Growth Analysis");
    let html = report_to_html(&result, timestamp(), &Config::compiled_default());

    assert!(html.contains("<strong>AI Provider:</strong> MOCK"));
    assert!(html.contains("<strong>Images Analyzed:</strong> 2"));
    assert!(html.contains("<h3>Growth Analysis of TechCorp Inc. Quarterly Report (Q3 2024)</h3>"));
    assert!(html.contains("<li style=\"margin-bottom: 5px;\"><strong>Net Profit</strong>:"));
    assert!(html.contains("R&amp;D Expenses"));
    assert!(!html.contains("**"));
}

#[test]
fn renderers_share_one_parse() {
    let result = AnalysisResult {
        analysis: "### Summary\n\n• Revenue: 100\n• Profit: 20\n\nNet margin improved.".to_string(),
        provider: "gemini".to_string(),
        model: "gemini-2.5-pro".to_string(),
        role: "Analyst".to_string(),
        image_count: 1,
    };
    let blocks = parse(&result.analysis);
    let meta = ReportMetadata::new(&result, timestamp());

    let fragment = MarkupRenderer::default().render(&blocks, &meta).unwrap();
    assert_eq!(
        fragment,
        [
            "<h3>Summary</h3>",
            "<ul style=\"margin-left: 20px; margin-bottom: 10px;\">",
            "<li style=\"margin-bottom: 5px;\">Revenue: 100</li>",
            "<li style=\"margin-bottom: 5px;\">Profit: 20</li>",
            "</ul>",
            "<p style=\"margin-bottom: 8px;\">Net margin improved.</p>",
        ]
        .join("\n")
    );

    let pdf = PrintRenderer::default().render(&blocks, &meta).unwrap();
    let via_helper = render_report(&PrintRenderer::default(), &result, timestamp()).unwrap();
    assert_eq!(pdf, via_helper);
}

#[test]
fn email_with_pdf_attachment_lands_in_outbox() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::compiled_default();
    config.email.from = "reports@example.com".to_string();

    let result = mock_result("Auditor", "Overall Analysis");
    let pdf = report_to_pdf(&result, timestamp(), &config).unwrap();
    let message = compose(
        &["cfo@example.com".to_string(), "board@example.com".to_string()],
        &result,
        Some(pdf.clone()),
        timestamp(),
        &config.email,
        &MarkupRenderer::new(config.clone()),
    )
    .unwrap();

    let outbox = OutboxTransport::new(dir.path());
    outbox.send(&message).unwrap();

    let stored = std::fs::read(dir.path().join("Financial_Analysis_20241015_164530.pdf")).unwrap();
    assert_eq!(stored, pdf);
    let html =
        std::fs::read_to_string(dir.path().join("Financial_Analysis_20241015_164530.html")).unwrap();
    assert!(html.contains("Audit Review: TechCorp Inc. Q3 2024 Financial Statements"));
}
