//! Scan engine configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default interpreter for the bundled pdfid engine
pub const DEFAULT_ENGINE_PROGRAM: &str = "python3";
/// Default engine script, relative to the working directory
pub const DEFAULT_ENGINE_SCRIPT: &str = "tools/pdfid.py";

/// How to run the external structural scan engine and where to stage uploads.
///
/// The engine is invoked as `program args... <staged path>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub scratch_dir: PathBuf,
    /// `None` waits for the engine indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_ENGINE_PROGRAM),
            args: vec![DEFAULT_ENGINE_SCRIPT.to_string()],
            scratch_dir: std::env::temp_dir(),
            timeout: None,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
