//! Server configuration from command-line flags and environment variables

use clap::Parser;
use pdfscope::config::{DEFAULT_ENGINE_PROGRAM, DEFAULT_ENGINE_SCRIPT};
use pdfscope::intake::DEFAULT_MAX_SIZE_MB;
use pdfscope::{IntakePolicy, ScanConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pdfscope-api",
    about = "HTTP service that triages uploaded PDFs for malicious indicators",
    version
)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "PDFSCOPE_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Structural scan engine executable
    #[arg(long, env = "PDFSCOPE_ENGINE", default_value = DEFAULT_ENGINE_PROGRAM)]
    pub engine: PathBuf,

    /// Arguments placed before the staged file path (comma separated in the environment)
    #[arg(
        long = "engine-arg",
        env = "PDFSCOPE_ENGINE_ARGS",
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_value = DEFAULT_ENGINE_SCRIPT
    )]
    pub engine_args: Vec<String>,

    /// Directory for staged uploads (defaults to the system temp directory)
    #[arg(long, env = "PDFSCOPE_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Kill the scan engine after this many seconds
    #[arg(long, env = "PDFSCOPE_SCAN_TIMEOUT_SECS")]
    pub scan_timeout_secs: Option<u64>,

    /// Largest accepted upload, in megabytes
    #[arg(long, env = "PDFSCOPE_MAX_UPLOAD_MB", default_value_t = DEFAULT_MAX_SIZE_MB)]
    pub max_upload_mb: u64,
}

impl ServerConfig {
    pub fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::new()
            .with_program(&self.engine)
            .with_args(self.engine_args.iter().cloned())
            .with_timeout(self.scan_timeout_secs.map(Duration::from_secs));

        if let Some(dir) = &self.scratch_dir {
            config = config.with_scratch_dir(dir);
        }
        config
    }

    pub fn intake_policy(&self) -> IntakePolicy {
        IntakePolicy::new().with_max_size_mb(self.max_upload_mb)
    }
}
