//! Single-request PDF analysis
//!
//! [`AnalysisService::analyze`] validates an upload, scans it and turns the
//! engine's report into an [`AnalysisReport`]. The service keeps no state
//! between calls and can be shared across concurrent requests.

use crate::config::ScanConfig;
use crate::error::{AnalysisError, Result};
use crate::indicators::{parse_report, Finding, ParsedReport, Summary};
use crate::scan::{RawScanReport, ScanInvoker, StructuralScanner};
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

/// A submitted document: declared name plus raw content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedArtifact {
    filename: String,
    bytes: Vec<u8>,
}

impl UploadedArtifact {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Result of one successful analysis.
///
/// Every finding is a trimmed line of [`raw_output`](Self::raw_output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    filename: String,
    summary: Summary,
    findings: Vec<Finding>,
    raw_output: RawScanReport,
}

impl AnalysisReport {
    pub fn new(filename: impl Into<String>, raw_output: RawScanReport) -> Self {
        let ParsedReport { summary, findings } = parse_report(raw_output.as_str());
        Self {
            filename: filename.into(),
            summary,
            findings,
            raw_output,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn raw_output(&self) -> &str {
        self.raw_output.as_str()
    }

    pub fn is_suspicious(&self) -> bool {
        !self.findings.is_empty()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportBody<'a> {
    success: bool,
    filename: &'a str,
    analysis: AnalysisBody<'a>,
    raw_output: &'a str,
}

#[derive(Serialize)]
struct AnalysisBody<'a> {
    summary: &'a Summary,
    /// Reserved; always empty
    objects: &'a [String],
    suspicious: &'a [Finding],
}

impl Serialize for AnalysisReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ReportBody {
            success: true,
            filename: &self.filename,
            analysis: AnalysisBody {
                summary: &self.summary,
                objects: &[],
                suspicious: &self.findings,
            },
            raw_output: self.raw_output.as_str(),
        }
        .serialize(serializer)
    }
}

/// Orchestrates validation, scanning and indicator extraction
#[derive(Debug, Clone)]
pub struct AnalysisService {
    invoker: ScanInvoker,
}

impl AnalysisService {
    pub fn new(scanner: Arc<dyn StructuralScanner>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            invoker: ScanInvoker::new(scanner, scratch_dir),
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            invoker: ScanInvoker::from_config(config),
        }
    }

    /// Analyze one upload. Malformed engine output never fails the request.
    pub async fn analyze(&self, artifact: Option<UploadedArtifact>) -> Result<AnalysisReport> {
        let artifact = artifact.ok_or_else(|| AnalysisError::validation("No file provided"))?;
        self.run(artifact).await
    }

    #[instrument(skip_all, fields(filename = %artifact.filename(), size = artifact.size()))]
    async fn run(&self, artifact: UploadedArtifact) -> Result<AnalysisReport> {
        let raw = self
            .invoker
            .invoke(artifact.bytes(), artifact.filename())
            .await?;

        let report = AnalysisReport::new(artifact.filename, raw);
        info!(
            findings = report.findings().len(),
            "Analysis complete"
        );
        Ok(report)
    }
}
