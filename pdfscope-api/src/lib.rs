//! # pdfscope-api
//!
//! REST API server for pdfscope PDF risk triage
//!

mod api;
pub mod config;

pub use api::{
    analyze_pdf, app, health_check, AppError, AppState, ErrorResponse, FILE_FIELD,
};
pub use config::ServerConfig;
