//! Logging engine abstraction

use std::fmt;
use std::sync::Arc;

use crate::error::EngineStatus;

/// Trace severity levels understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Verbose,
}

impl LogLevel {
    /// Fixed tag the engine embeds in formatted lines for this level.
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Error => "TRACE_ERROR",
            LogLevel::Warning => "TRACE_WARNING",
            LogLevel::Info => "TRACE_INFO",
            LogLevel::Verbose => "TRACE_VERBOSE",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Callback receiving each formatted log line as the engine emits it.
///
/// The engine may invoke this from its own logging thread; implementations
/// must not assume any particular caller.
pub type LogCallbackFn = dyn Fn(LogLevel, &str) + Send + Sync;

/// Result type for calls into the engine
pub type EngineResult<T> = Result<T, EngineStatus>;

/// Inbound surface of the logging/tracing engine.
///
/// Implementations own the memory-log ring's storage. Line numbers are
/// absolute and monotonically increasing for the engine's lifetime; the
/// range is empty whenever `newest_line_num() < oldest_line_num()`, in
/// particular before memory logging has ever been started.
pub trait LogEngine: Send + Sync {
    /// Register `callback` as the sole recipient of emitted lines, or clear
    /// the registration with `None`.
    fn register_callback(&self, callback: Option<Arc<LogCallbackFn>>) -> EngineResult<()>;

    /// Apply a `;`-delimited filter expression to subsequent lines.
    /// An empty expression means no filtering.
    fn set_filters(&self, filters: &str) -> EngineResult<()>;

    /// Begin retaining emitted lines in the memory-log ring. No-op if
    /// already started.
    fn start_memory_log(&self);

    /// Stop retaining lines. No-op if already stopped. Retained lines and
    /// their indices survive a stop/start cycle.
    fn stop_memory_log(&self);

    /// Absolute index of the oldest retained line.
    fn oldest_line_num(&self) -> i64;

    /// Absolute index of the newest retained line.
    fn newest_line_num(&self) -> i64;

    /// Text of the line at `index`, if still retained.
    fn line(&self, index: i64) -> Option<String>;

    /// Format and emit one trace line through the filter, the ring (when
    /// active), and the registered callback.
    fn trace_string(&self, level: LogLevel, tag: &str, file: &str, line: u32, message: &str);
}
