//! Upload intake checks applied before a document is staged

use crate::error::{AnalysisError, Result};

pub const DEFAULT_MAX_SIZE_MB: u64 = 10;
const BYTES_PER_MB: u64 = 1024 * 1024;

/// Extension and size limits for submitted documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakePolicy {
    accepted_extensions: Vec<String>,
    max_size_bytes: u64,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            accepted_extensions: vec![".pdf".to_string()],
            max_size_bytes: DEFAULT_MAX_SIZE_MB * BYTES_PER_MB,
        }
    }
}

impl IntakePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_size_mb(mut self, megabytes: u64) -> Self {
        self.max_size_bytes = megabytes.saturating_mul(BYTES_PER_MB);
        self
    }

    /// Replace the accepted extensions. Entries are matched case-insensitively
    /// and may be given with or without the leading dot.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.accepted_extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().to_ascii_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        self
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    pub fn accepted_extensions(&self) -> &[String] {
        &self.accepted_extensions
    }

    pub fn check(&self, filename: &str, size: u64) -> Result<()> {
        if size > self.max_size_bytes {
            return Err(AnalysisError::validation(format!(
                "File size must be less than {}MB",
                self.max_size_bytes / BYTES_PER_MB
            )));
        }

        let extension = filename
            .rfind('.')
            .map(|dot| filename[dot..].to_ascii_lowercase())
            .unwrap_or_default();

        if !self.accepted_extensions.contains(&extension) {
            return Err(AnalysisError::validation(format!(
                "File type not supported. Accepted types: {}",
                self.accepted_extensions.join(", ")
            )));
        }

        Ok(())
    }
}
