//! Structural scan engine run as an external process

use super::{ScanOutput, StructuralScanner};
use crate::config::ScanConfig;
use crate::error::{AnalysisError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Runs `program args... <path>` and captures its output.
///
/// A launch failure, a non-zero exit or an expired timeout all fail the scan.
/// The child is killed if the scan future is dropped before it exits.
#[derive(Debug, Clone)]
pub struct CommandScanner {
    program: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandScanner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            timeout: config.timeout,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl StructuralScanner for CommandScanner {
    async fn scan(&self, path: &Path) -> Result<ScanOutput> {
        debug!(
            "Running {} {:?} {}",
            self.program.display(),
            self.args,
            path.display()
        );

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let pending = command.output();
        let launched = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, pending).await.map_err(|_| {
                AnalysisError::scan_execution(
                    format!("scan engine timed out after {}s", limit.as_secs_f64()),
                    None,
                )
            })?,
            None => pending.await,
        };

        let output = launched.map_err(|e| {
            AnalysisError::scan_execution(
                format!("failed to launch {}", self.program.display()),
                Some(e.to_string()),
            )
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(AnalysisError::scan_execution(
                format!("scan engine exited with {}", output.status),
                Some(stderr),
            ));
        }

        Ok(ScanOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr,
        })
    }
}
