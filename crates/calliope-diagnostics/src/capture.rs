//! Serialized facade over the logging engine
//!
//! [`LogCapture`] owns the process-facing surface: the single callback
//! registration slot, filter configuration, memory-log control, dumping,
//! and level-tagged trace emission with call-site capture.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::debug;

use crate::engine::{LogCallbackFn, LogEngine, LogLevel};
use crate::error::{DiagnosticsError, DiagnosticsResult};
use crate::memory_engine::MemoryLogEngine;

/// Tag prefixed to dump lines when no file name is available.
pub const DUMP_FALLBACK_TAG: &str = "CALLIOPE";

/// File name substituted when a file dump is requested without a path.
pub const DEFAULT_DUMP_FILE: &str = "calliope-memory.log";

/// Destinations for a memory-log dump.
///
/// With no destination set and no path given, the dump falls back to
/// standard error rather than going nowhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOptions {
    pub to_file: bool,
    pub to_stdout: bool,
    pub to_stderr: bool,
}

impl DumpOptions {
    pub fn file() -> Self {
        Self {
            to_file: true,
            ..Self::default()
        }
    }

    pub fn stdout() -> Self {
        Self {
            to_stdout: true,
            ..Self::default()
        }
    }

    pub fn stderr() -> Self {
        Self {
            to_stderr: true,
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        !(self.to_file || self.to_stdout || self.to_stderr)
    }
}

/// Resolved destinations for one dump call.
#[derive(Debug, PartialEq, Eq)]
struct DumpPlan {
    to_stdout: bool,
    to_stderr: bool,
    console_tag: String,
    file_path: Option<PathBuf>,
}

impl DumpPlan {
    fn resolve(path: Option<&Path>, options: DumpOptions) -> Self {
        let to_stderr = options.to_stderr || (path.is_none() && options.is_empty());
        let file_path = options.to_file.then(|| {
            path.map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DUMP_FILE))
        });
        let console_tag = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| DUMP_FALLBACK_TAG.to_string());
        Self {
            to_stdout: options.to_stdout,
            to_stderr,
            console_tag,
            file_path,
        }
    }
}

/// Serialized interface to a [`LogEngine`].
///
/// The facility holds the one strong reference that keeps the registered
/// callback alive for as long as the engine may invoke it. The slot lock
/// covers only the registration swap, never callback execution, so a
/// callback may call back into the facility without deadlocking.
pub struct LogCapture {
    engine: Arc<dyn LogEngine>,
    callback: Mutex<Option<Arc<LogCallbackFn>>>,
}

impl LogCapture {
    pub fn new(engine: Arc<dyn LogEngine>) -> Self {
        Self {
            engine,
            callback: Mutex::new(None),
        }
    }

    /// Process-wide facility over an in-process [`MemoryLogEngine`].
    ///
    /// Starts with no callback registered; long-lived processes should
    /// clear the callback on shutdown with
    /// `set_log_message_callback(None)`.
    pub fn global() -> &'static LogCapture {
        static GLOBAL: OnceLock<LogCapture> = OnceLock::new();
        GLOBAL.get_or_init(|| LogCapture::new(Arc::new(MemoryLogEngine::new())))
    }

    pub fn engine(&self) -> &Arc<dyn LogEngine> {
        &self.engine
    }

    /// Register `callback` as the sole recipient of engine log lines, or
    /// clear the registration with `None`.
    ///
    /// The previous callback reference is released only after the engine
    /// confirms the new registration; on engine rejection the previous
    /// registration stays in place.
    pub fn set_log_message_callback(
        &self,
        callback: Option<Arc<LogCallbackFn>>,
    ) -> DiagnosticsResult<()> {
        let mut slot = self.callback.lock();
        self.engine
            .register_callback(callback.clone())
            .map_err(|status| DiagnosticsError::engine("register_callback", status))?;
        *slot = callback;
        Ok(())
    }

    /// Apply a `;`-delimited filter expression to all subsequent logging.
    pub fn set_log_message_filter(&self, filters: &str) -> DiagnosticsResult<()> {
        self.engine
            .set_filters(filters)
            .map_err(|status| DiagnosticsError::engine("set_filters", status))
    }

    pub fn start_memory_logging(&self) {
        self.engine.start_memory_log();
    }

    pub fn stop_memory_logging(&self) {
        self.engine.stop_memory_log();
    }

    /// Write the ring's current oldest→newest range, in order, to every
    /// destination `options` implies (see [`DumpOptions`]).
    ///
    /// Console lines are prefixed with the file name (or the fallback tag),
    /// file lines with the fixed tag. The file is opened create/truncate
    /// and its handle is released before this returns, on success and on
    /// error alike; partial console output is never rolled back.
    pub fn dump_memory_log(
        &self,
        path: Option<&Path>,
        options: DumpOptions,
    ) -> DiagnosticsResult<()> {
        let plan = DumpPlan::resolve(path, options);

        // Writer lives in this scope only, so the handle is closed even
        // when a write fails partway through the range.
        let mut writer = match &plan.file_path {
            Some(file_path) => Some(BufWriter::new(File::create(file_path)?)),
            None => None,
        };

        let start = self.engine.oldest_line_num();
        let stop = self.engine.newest_line_num();
        let mut written = 0u64;
        for index in start..=stop {
            let Some(line) = self.engine.line(index) else {
                continue;
            };
            if plan.to_stdout {
                print!("{}: {}", plan.console_tag, line);
            }
            if plan.to_stderr {
                eprint!("{}: {}", plan.console_tag, line);
            }
            if let Some(writer) = writer.as_mut() {
                write!(writer, "{DUMP_FALLBACK_TAG}: {line}")?;
            }
            written += 1;
        }
        if let Some(mut writer) = writer.take() {
            writer.flush()?;
        }

        debug!(lines = written, "memory log dump complete");
        Ok(())
    }

    /// Emit one trace line at `level`, capturing the caller's file and line.
    #[track_caller]
    pub fn trace(&self, level: LogLevel, message: &str) {
        let location = Location::caller();
        self.engine
            .trace_string(level, level.tag(), location.file(), location.line(), message);
    }

    #[track_caller]
    pub fn trace_info(&self, message: &str) {
        self.trace(LogLevel::Info, message);
    }

    #[track_caller]
    pub fn trace_warning(&self, message: &str) {
        self.trace(LogLevel::Warning, message);
    }

    #[track_caller]
    pub fn trace_error(&self, message: &str) {
        self.trace(LogLevel::Error, message);
    }

    #[track_caller]
    pub fn trace_verbose(&self, message: &str) {
        self.trace(LogLevel::Verbose, message);
    }
}
