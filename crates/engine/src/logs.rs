//! Log sink pass-through
//!
//! `emitLog` hands a caller-supplied line to whatever sink the embedder
//! installs. The default sink turns it into a `tracing` event; embedders
//! that ship logs elsewhere implement [`LogSink`] themselves.

use docket_core::DocketResult;
use parking_lot::Mutex;
use tracing::info;

/// Destination for application log lines
pub trait LogSink: Send + Sync {
    /// Record one line
    fn emit(&self, body: &str) -> DocketResult<()>;
}

/// Emits each line as an `info` event under the `docket::log` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn emit(&self, body: &str) -> DocketResult<()> {
        info!(target: "docket::log", "{}", body);
        Ok(())
    }
}

/// Keeps every line in memory
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogSink {
    /// Empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl LogSink for MemoryLogSink {
    fn emit(&self, body: &str) -> DocketResult<()> {
        self.lines.lock().push(body.to_string());
        Ok(())
    }
}
