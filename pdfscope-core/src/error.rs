use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No file, an empty file, or a file rejected by the intake policy.
    #[error("{0}")]
    Validation(String),

    /// The structural scan engine could not be launched or exited abnormally.
    #[error("Scan execution failed: {message}")]
    ScanExecution {
        message: String,
        diagnostics: Option<String>,
    },
}

impl AnalysisError {
    pub fn validation(message: impl Into<String>) -> Self {
        AnalysisError::Validation(message.into())
    }

    pub fn scan_execution(message: impl Into<String>, diagnostics: Option<String>) -> Self {
        // Blank stderr carries nothing worth attaching
        let diagnostics = diagnostics
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        AnalysisError::ScanExecution {
            message: message.into(),
            diagnostics,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AnalysisError::Validation(_))
    }

    /// Free-text details suitable for the `details` field of an error response.
    pub fn details(&self) -> Option<String> {
        match self {
            AnalysisError::Validation(_) => None,
            AnalysisError::ScanExecution {
                message,
                diagnostics: Some(diag),
            } => Some(format!("{message}: {diag}")),
            AnalysisError::ScanExecution { message, .. } => Some(message.clone()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
