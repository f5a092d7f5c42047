//! Log capture and diagnostics for the Calliope speech test suite
//!
//! This crate wraps a logging/tracing engine behind a small, serialized
//! facade: a single process-wide log-message callback slot, a `;`-delimited
//! filter expression, start/stop control of an in-memory log ring, and a
//! one-shot dump of the ring to file, stdout, or stderr.
//!
//! The engine is an opaque collaborator modeled by the [`LogEngine`] trait;
//! [`MemoryLogEngine`] is the in-process implementation used by tests and by
//! the process-wide [`LogCapture::global`] instance.

pub mod capture;
pub mod engine;
pub mod error;
pub mod memory_engine;

pub use capture::{DumpOptions, LogCapture, DEFAULT_DUMP_FILE, DUMP_FALLBACK_TAG};
pub use engine::{EngineResult, LogCallbackFn, LogEngine, LogLevel};
pub use error::{DiagnosticsError, DiagnosticsResult, EngineStatus};
pub use memory_engine::MemoryLogEngine;
