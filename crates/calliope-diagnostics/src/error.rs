use thiserror::Error;

/// Non-success status reported by the wrapped logging engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("status {code}: {message}")]
pub struct EngineStatus {
    pub code: u32,
    pub message: String,
}

impl EngineStatus {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DiagnosticsError {
    #[error("logging engine rejected {operation}: {status}")]
    Engine {
        operation: &'static str,
        status: EngineStatus,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DiagnosticsError {
    pub(crate) fn engine(operation: &'static str, status: EngineStatus) -> Self {
        Self::Engine { operation, status }
    }
}

/// Result type for diagnostics operations
pub type DiagnosticsResult<T> = Result<T, DiagnosticsError>;
