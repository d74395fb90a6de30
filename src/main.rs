use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use finreport::email::{OutboxTransport, Transport, compose};
use finreport::images::{resize_if_needed, validate_image};
use finreport::prompts::{DEFAULT_ANALYSIS_TYPE, prompt_for};
use finreport::{
    AnalysisResult, Analyzer, Config, MarkupRenderer, MockAnalyzer, PrintRenderer,
    ReportMetadata, Renderer, analysis, parse, report_filename,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "finreport")]
#[command(about = "Render financial analysis text to PDF reports and HTML emails")]
struct Cli {
    /// Report configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Generation time shown in the report, "YYYY-MM-DD HH:MM:SS" (defaults to now)
    #[arg(long, global = true, value_parser = parse_timestamp)]
    timestamp: Option<NaiveDateTime>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render an analysis result to PDF and/or HTML
    Render {
        /// Analysis result JSON (or raw text with --markdown)
        input: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Output PDF file
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Output HTML email document
        #[arg(long)]
        html: Option<PathBuf>,

        /// Also write the intermediate Typst source
        #[arg(long)]
        typst: Option<PathBuf>,
    },

    /// Produce a canned analysis for the given images and render it
    Mock {
        /// Document images (PNG or JPEG)
        #[arg(required = true)]
        images: Vec<PathBuf>,

        #[arg(long, default_value = "Investor")]
        role: String,

        #[arg(long, default_value = DEFAULT_ANALYSIS_TYPE)]
        analysis_type: String,

        /// Directory for the PDF and HTML output
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Print the prompt sent to the model for a role and analysis type
    Prompt {
        #[arg(long, default_value = "Investor")]
        role: String,

        #[arg(long, default_value = DEFAULT_ANALYSIS_TYPE)]
        analysis_type: String,
    },

    /// Compose the report email and drop it into an outbox directory
    Email {
        /// Analysis result JSON (or raw text with --markdown)
        input: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Recipient address (repeatable)
        #[arg(long = "to", required = true)]
        to: Vec<String>,

        /// Outbox directory
        #[arg(long)]
        outbox: PathBuf,

        /// Attach the PDF report
        #[arg(long)]
        attach_pdf: bool,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Treat INPUT as raw analysis text rather than a JSON result
    #[arg(long)]
    markdown: bool,

    #[arg(long)]
    provider: Option<String>,

    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    role: Option<String>,

    #[arg(long, default_value_t = 0)]
    images: usize,
}

impl SourceArgs {
    fn load(&self, input: &Path) -> Result<AnalysisResult> {
        let content = fs::read_to_string(input)
            .with_context(|| format!("reading {}", input.display()))?;

        if self.markdown {
            return Ok(AnalysisResult {
                analysis: content,
                provider: self.provider.clone().unwrap_or_default(),
                model: self.model.clone().unwrap_or_default(),
                role: self.role.clone().unwrap_or_default(),
                image_count: self.images,
            });
        }

        serde_json::from_str(&content)
            .with_context(|| format!("parsing analysis result {}", input.display()))
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "finreport=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::compiled_default(),
    };
    // Captured once so every artifact of this run carries the same time.
    let timestamp = cli.timestamp.unwrap_or_else(|| Local::now().naive_local());

    match cli.command {
        Command::Render {
            input,
            source,
            pdf,
            html,
            typst,
        } => {
            let result = source.load(&input)?;
            let blocks = parse(result.body());
            let meta = ReportMetadata::new(&result, timestamp);
            let print = PrintRenderer::new(config.clone());

            if let Some(path) = &typst {
                write_output(path, print.markup(&blocks, &meta).as_bytes())?;
            }
            if let Some(path) = &html {
                let document = MarkupRenderer::new(config).document(&blocks, &meta);
                write_output(path, document.as_bytes())?;
            }
            // PDF is the default artifact when nothing else was asked for.
            let pdf = pdf.or_else(|| {
                (html.is_none() && typst.is_none())
                    .then(|| PathBuf::from(report_filename(timestamp, "pdf")))
            });
            if let Some(path) = pdf {
                write_output(&path, &print.render(&blocks, &meta)?)?;
            }
        }

        Command::Mock {
            images,
            role,
            analysis_type,
            out_dir,
        } => {
            let mut loaded = Vec::with_capacity(images.len());
            for path in &images {
                let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
                let name = path.display().to_string();
                validate_image(&name, &bytes, &config.images)?;
                loaded.push(resize_if_needed(&bytes, config.images.max_dimension));
            }

            let prompt = analysis::enhance_prompt(prompt_for(&analysis_type, &role), &role);
            let result = MockAnalyzer::new(analysis_type).analyze(&loaded, &prompt, &role)?;
            info!("Mock analysis ready: {} chars", result.analysis.len());

            fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {}", out_dir.display()))?;
            let blocks = parse(result.body());
            let meta = ReportMetadata::new(&result, timestamp);

            let pdf = PrintRenderer::new(config.clone()).render(&blocks, &meta)?;
            write_output(&out_dir.join(report_filename(timestamp, "pdf")), &pdf)?;

            let html = MarkupRenderer::new(config).document(&blocks, &meta);
            write_output(&out_dir.join(report_filename(timestamp, "html")), html.as_bytes())?;
        }

        Command::Prompt {
            role,
            analysis_type,
        } => {
            println!("{}", analysis::enhance_prompt(prompt_for(&analysis_type, &role), &role));
        }

        Command::Email {
            input,
            source,
            to,
            outbox,
            attach_pdf,
        } => {
            let result = source.load(&input)?;
            let pdf = if attach_pdf {
                Some(finreport::render_report(
                    &PrintRenderer::new(config.clone()),
                    &result,
                    timestamp,
                )?)
            } else {
                None
            };

            let renderer = MarkupRenderer::new(config.clone());
            let message = compose(&to, &result, pdf, timestamp, &config.email, &renderer)?;
            OutboxTransport::new(&outbox).send(&message)?;
            println!(
                "Email for {} written to {}",
                message.to.join(", "),
                outbox.display()
            );
        }
    }

    Ok(())
}
