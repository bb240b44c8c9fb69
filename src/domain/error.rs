//! Domain error types.
//!
//! Each failure class stays distinguishable to the caller: validation errors
//! are fatal for the series they describe, insufficient history is
//! recoverable, and collaborator failures propagate unchanged.

/// Top-level error type for candlebot.
#[derive(Debug, thiserror::Error)]
pub enum CandlebotError {
    #[error("invalid bar series: {reason}")]
    Validation { reason: String },

    #[error("insufficient data for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientData {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("data file not found: {path}")]
    NotFound { path: String },

    #[error("parse error in {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("external call failed: {reason}")]
    External { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CandlebotError> for std::process::ExitCode {
    fn from(err: &CandlebotError) -> Self {
        let code: u8 = match err {
            CandlebotError::Io(_) => 1,
            CandlebotError::ConfigParse { .. }
            | CandlebotError::ConfigMissing { .. }
            | CandlebotError::ConfigInvalid { .. } => 2,
            CandlebotError::Validation { .. }
            | CandlebotError::NotFound { .. }
            | CandlebotError::Parse { .. } => 3,
            CandlebotError::InsufficientData { .. } => 4,
            CandlebotError::External { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
