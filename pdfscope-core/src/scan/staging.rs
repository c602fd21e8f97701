//! Ephemeral on-disk copies of uploaded documents

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::{debug, warn};

const MAX_NAME_LEN: usize = 64;
const FALLBACK_NAME: &str = "upload.pdf";

/// A staged copy of an upload, removed when dropped.
///
/// Removal failure is logged and swallowed so it can never replace the
/// result of the scan that used the file.
#[derive(Debug)]
pub struct StagedArtifact {
    path: PathBuf,
}

impl StagedArtifact {
    /// Write `bytes` to a fresh, uniquely named file inside `scratch_dir`.
    ///
    /// The file name is `temp_<unix millis>_<random>_<declared name>`, with
    /// the declared name reduced to a safe single path component.
    pub fn stage(scratch_dir: &Path, declared_name: &str, bytes: &[u8]) -> io::Result<Self> {
        let prefix = format!("temp_{}_", chrono::Utc::now().timestamp_millis());
        let suffix = format!("_{}", sanitize_name(declared_name));

        let mut file = Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .rand_bytes(8)
            .tempfile_in(scratch_dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        // Close our handle before the engine opens the path; removal is ours from here
        let path = file.into_temp_path().keep().map_err(|e| e.error)?;
        debug!("Staged {} bytes at {}", bytes.len(), path.display());

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedArtifact {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed staged artifact {}", self.path.display()),
            Err(e) => warn!(
                "Error cleaning up staged artifact {}: {e}",
                self.path.display()
            ),
        }
    }
}

/// Reduce an untrusted upload name to a short, single, portable path component.
pub(crate) fn sanitize_name(declared: &str) -> String {
    let base = declared
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        return FALLBACK_NAME.to_string();
    }

    // Keep the tail so the extension survives truncation
    let skip = cleaned.len().saturating_sub(MAX_NAME_LEN);
    cleaned[skip..].to_string()
}
