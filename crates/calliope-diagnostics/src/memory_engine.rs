//! In-process logging engine backed by a bounded line ring

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Local;
use parking_lot::{Mutex, RwLock};

use crate::engine::{EngineResult, LogCallbackFn, LogEngine, LogLevel};

/// Default number of lines the ring retains before evicting the oldest.
pub const DEFAULT_RING_CAPACITY: usize = 4096;

/// Bounded ring of formatted lines addressed by absolute, monotonically
/// increasing indices. `oldest` is the index of the front line, `next` the
/// index the next stored line will receive; the ring is empty when they are
/// equal.
struct Ring {
    lines: VecDeque<String>,
    oldest: i64,
    next: i64,
    active: bool,
    capacity: usize,
}

impl Ring {
    fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            oldest: 0,
            next: 0,
            active: false,
            capacity: capacity.max(1),
        }
    }

    fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
            self.oldest += 1;
        }
        self.lines.push_back(line);
        self.next += 1;
    }

    fn get(&self, index: i64) -> Option<&String> {
        if index < self.oldest || index >= self.next {
            return None;
        }
        self.lines.get((index - self.oldest) as usize)
    }
}

/// In-process [`LogEngine`] implementation.
///
/// Lines are formatted as `[<HH:MM:SS.mmm>] <tag> <file>:<line> <message>\n`
/// and pass through the filter before reaching either the ring or the
/// registered callback. The callback is invoked outside all engine locks.
pub struct MemoryLogEngine {
    ring: Mutex<Ring>,
    filters: RwLock<Vec<String>>,
    callback: Mutex<Option<Arc<LogCallbackFn>>>,
}

impl MemoryLogEngine {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RING_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: Mutex::new(Ring::new(capacity)),
            filters: RwLock::new(Vec::new()),
            callback: Mutex::new(None),
        }
    }

    fn passes_filters(&self, line: &str) -> bool {
        let filters = self.filters.read();
        filters.is_empty() || filters.iter().any(|token| line.contains(token.as_str()))
    }
}

impl Default for MemoryLogEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEngine for MemoryLogEngine {
    fn register_callback(&self, callback: Option<Arc<LogCallbackFn>>) -> EngineResult<()> {
        *self.callback.lock() = callback;
        Ok(())
    }

    fn set_filters(&self, filters: &str) -> EngineResult<()> {
        let tokens = filters
            .split(';')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(String::from)
            .collect();
        *self.filters.write() = tokens;
        Ok(())
    }

    fn start_memory_log(&self) {
        self.ring.lock().active = true;
    }

    fn stop_memory_log(&self) {
        self.ring.lock().active = false;
    }

    fn oldest_line_num(&self) -> i64 {
        self.ring.lock().oldest
    }

    fn newest_line_num(&self) -> i64 {
        self.ring.lock().next - 1
    }

    fn line(&self, index: i64) -> Option<String> {
        self.ring.lock().get(index).cloned()
    }

    fn trace_string(&self, level: LogLevel, tag: &str, file: &str, line: u32, message: &str) {
        let formatted = format!(
            "[{}] {} {}:{} {}\n",
            Local::now().format("%H:%M:%S%.3f"),
            tag,
            file,
            line,
            message
        );

        if !self.passes_filters(&formatted) {
            return;
        }

        {
            let mut ring = self.ring.lock();
            if ring.active {
                ring.push(formatted.clone());
            }
        }

        // Clone the slot contents so the callback never runs under a lock.
        let callback = self.callback.lock().clone();
        if let Some(callback) = callback {
            callback(level, &formatted);
        }
    }
}
