use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pdfscope::config::{DEFAULT_ENGINE_PROGRAM, DEFAULT_ENGINE_SCRIPT};
use pdfscope::intake::DEFAULT_MAX_SIZE_MB;
use pdfscope::{
    parse_report, AnalysisReport, AnalysisService, IntakePolicy, ParsedReport, ScanConfig,
    UploadedArtifact,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "pdfscope",
    about = "Triage PDF documents for malicious structural indicators",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a PDF with the structural scan engine and report its indicators
    Analyze {
        /// Input PDF file
        input: PathBuf,

        /// Print the JSON report instead of the text view
        #[arg(short, long)]
        json: bool,

        #[command(flatten)]
        engine: EngineArgs,

        /// Largest accepted file, in megabytes
        #[arg(long, default_value_t = DEFAULT_MAX_SIZE_MB)]
        max_size_mb: u64,
    },

    /// Summarize an engine report that was already captured to a file
    Parse {
        /// Text report produced by the scan engine
        report: PathBuf,

        /// Print JSON instead of the text view
        #[arg(short, long)]
        json: bool,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// Structural scan engine executable
    #[arg(long, default_value = DEFAULT_ENGINE_PROGRAM)]
    engine: PathBuf,

    /// Argument placed before the file path (repeatable)
    #[arg(
        long = "engine-arg",
        allow_hyphen_values = true,
        default_value = DEFAULT_ENGINE_SCRIPT
    )]
    engine_args: Vec<String>,

    /// Directory for the staged copy (defaults to the system temp directory)
    #[arg(long)]
    scratch_dir: Option<PathBuf>,

    /// Kill the engine after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl EngineArgs {
    fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::new()
            .with_program(&self.engine)
            .with_args(self.engine_args.iter().cloned())
            .with_timeout(self.timeout_secs.map(Duration::from_secs));

        if let Some(dir) = &self.scratch_dir {
            config = config.with_scratch_dir(dir);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdfscope=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            json,
            engine,
            max_size_mb,
        } => {
            let bytes = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let filename = input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.display().to_string());

            debug!("Analyzing {} ({} bytes)", input.display(), bytes.len());
            IntakePolicy::new()
                .with_max_size_mb(max_size_mb)
                .check(&filename, bytes.len() as u64)?;

            let service = AnalysisService::from_config(&engine.scan_config());
            let report = service
                .analyze(Some(UploadedArtifact::new(filename, bytes)))
                .await
                .map_err(|e| match e.details() {
                    Some(details) => anyhow::anyhow!("{e}\n{details}"),
                    None => anyhow::Error::new(e),
                })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
        }

        Commands::Parse { report, json } => {
            let raw = std::fs::read_to_string(&report)
                .with_context(|| format!("failed to read {}", report.display()))?;
            let parsed = parse_report(&raw);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "summary": parsed.summary,
                        "suspicious": parsed.findings,
                    }))?
                );
            } else {
                print!("{}", render_parsed(&parsed));
            }
        }
    }

    Ok(())
}

fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "PDF Analysis Results: {}", report.filename());
    let _ = writeln!(out, "==========================================");
    let verdict = if report.is_suspicious() {
        "suspicious indicators present"
    } else {
        "no suspicious indicators"
    };
    let _ = writeln!(out, "Verdict: {verdict}");
    let _ = writeln!(out);
    out.push_str(&render_parsed(&ParsedReport {
        summary: report.summary().clone(),
        findings: report.findings().to_vec(),
    }));
    let _ = writeln!(out);
    let _ = writeln!(out, "Raw output:");
    out.push_str(report.raw_output());
    if !report.raw_output().ends_with('\n') {
        out.push('\n');
    }
    out
}

fn render_parsed(parsed: &ParsedReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Summary:");
    if parsed.summary.is_empty() {
        let _ = writeln!(out, "  (no summary data)");
    }
    for (key, value) in parsed.summary.iter() {
        let _ = writeln!(out, "  {key}: {value}");
    }

    let _ = writeln!(out);
    if parsed.findings.is_empty() {
        let _ = writeln!(out, "No suspicious elements detected");
    } else {
        let _ = writeln!(
            out,
            "Suspicious Elements Found ({}):",
            parsed.findings.len()
        );
        for finding in &parsed.findings {
            let _ = writeln!(out, "  ! {finding}");
        }
    }

    out
}
