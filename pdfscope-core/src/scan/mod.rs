//! Scan invocation
//!
//! Stages an uploaded document on disk, hands its path to a
//! [`StructuralScanner`] and returns the engine's text report. The staged
//! copy is removed on every exit path.

mod command;
mod staging;

pub use command::CommandScanner;
pub use staging::StagedArtifact;

use crate::config::ScanConfig;
use crate::error::{AnalysisError, Result};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Captured output of one engine run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    pub stdout: String,
    /// Diagnostics only; never part of the report
    pub stderr: String,
}

/// An engine that inspects the document at `path` and describes its structure as text
#[async_trait]
pub trait StructuralScanner: Send + Sync {
    async fn scan(&self, path: &Path) -> Result<ScanOutput>;
}

/// Unparsed text report produced by the engine for one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawScanReport(String);

impl RawScanReport {
    pub fn new(text: impl Into<String>) -> Self {
        RawScanReport(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RawScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stages documents in a scratch directory and runs a scanner over them.
///
/// Holds no per-request state, so one invoker can serve concurrent scans.
#[derive(Clone)]
pub struct ScanInvoker {
    scanner: Arc<dyn StructuralScanner>,
    scratch_dir: PathBuf,
}

impl ScanInvoker {
    pub fn new(scanner: Arc<dyn StructuralScanner>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scanner,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Invoker backed by a [`CommandScanner`] built from `config`
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(
            Arc::new(CommandScanner::from_config(config)),
            config.scratch_dir.clone(),
        )
    }

    /// Scan one document. A single attempt; nothing is retried.
    pub async fn invoke(&self, bytes: &[u8], declared_name: &str) -> Result<RawScanReport> {
        if bytes.is_empty() {
            return Err(AnalysisError::validation("Uploaded file is empty"));
        }

        let staged = StagedArtifact::stage(&self.scratch_dir, declared_name, bytes).map_err(|e| {
            AnalysisError::scan_execution("failed to stage upload", Some(e.to_string()))
        })?;

        let result = self.scanner.scan(staged.path()).await;
        drop(staged);
        let output = result?;

        if !output.stderr.trim().is_empty() {
            warn!("Scan engine stderr for {declared_name}: {}", output.stderr.trim());
        }

        Ok(RawScanReport::new(output.stdout))
    }
}

impl fmt::Debug for ScanInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanInvoker")
            .field("scratch_dir", &self.scratch_dir)
            .finish_non_exhaustive()
    }
}
