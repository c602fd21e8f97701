//! # pdfscope
//!
//! Structural risk triage for untrusted PDF documents.
//!
//! A document is staged on disk, an external structural scan engine (pdfid by
//! default) describes it as text, and that text is reduced to a summary of
//! object counts plus the lines that name high-signal attack primitives:
//! embedded JavaScript, automatic open actions, launch actions and embedded
//! files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfscope::{AnalysisService, ScanConfig, UploadedArtifact};
//!
//! # async fn run() -> pdfscope::Result<()> {
//! let service = AnalysisService::from_config(&ScanConfig::default());
//! let bytes = std::fs::read("document.pdf").unwrap_or_default();
//!
//! let report = service
//!     .analyze(Some(UploadedArtifact::new("document.pdf", bytes)))
//!     .await?;
//!
//! for finding in report.findings() {
//!     println!("suspicious: {finding}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`indicators`] - Pure parsing of scan reports into summaries and findings
//! - [`scan`] - Staging uploads and running the scan engine
//! - [`analysis`] - Per-request orchestration and the report type
//! - [`intake`] - Extension and size checks for uploads
//! - [`config`] - Engine configuration

pub mod analysis;
pub mod config;
pub mod error;
pub mod indicators;
pub mod intake;
pub mod scan;

pub use analysis::{AnalysisReport, AnalysisService, UploadedArtifact};
pub use config::ScanConfig;
pub use error::{AnalysisError, Result};
pub use indicators::{parse_report, Finding, ParsedReport, Summary, SummaryValue};
pub use intake::IntakePolicy;
pub use scan::{CommandScanner, RawScanReport, ScanInvoker, ScanOutput, StructuralScanner};

/// Current version of pdfscope
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
