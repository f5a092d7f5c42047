use calliope_diagnostics::DiagnosticsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("test settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("diagnostics error: {0}")]
    Diagnostics(#[from] DiagnosticsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for synthesis configuration operations
pub type SynthesisResult<T> = Result<T, SynthesisError>;
