//! Line-oriented output for log events and exported spans.
//!
//! Browsers have no files to write to, so everything observable ends up as
//! one line per record on a [`LineSink`]: the developer console in the
//! browser, stderr natively, or memory in tests.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// Destination for complete output lines.
pub trait LineSink: Send + Sync {
    /// Writes one line, without its trailing newline.
    fn write_line(&self, line: &str);
}

/// A sink shared between the log layer and the span exporter.
pub type SharedSink = Arc<dyn LineSink>;

/// Browser developer console.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

#[cfg(target_arch = "wasm32")]
impl LineSink for ConsoleSink {
    fn write_line(&self, line: &str) {
        web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
    }
}

/// Standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LineSink for StderrSink {
    fn write_line(&self, line: &str) {
        eprintln!("{line}");
    }
}

/// Collects lines in memory.
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to the subscriber.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LineSink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}

/// Adapts a [`LineSink`] to `tracing_subscriber`'s writer interface.
#[derive(Clone)]
pub struct SinkWriter {
    sink: SharedSink,
}

impl SinkWriter {
    pub fn new(sink: SharedSink) -> Self {
        Self { sink }
    }
}

impl std::fmt::Debug for SinkWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkWriter").finish_non_exhaustive()
    }
}

impl<'a> MakeWriter<'a> for SinkWriter {
    type Writer = LineBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        LineBuffer {
            sink: Arc::clone(&self.sink),
            buf: Vec::new(),
        }
    }
}

/// Buffers one formatted event and hands it to the sink when dropped.
pub struct LineBuffer {
    sink: SharedSink,
    buf: Vec<u8>,
}

impl io::Write for LineBuffer {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineBuffer {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end_matches(|c: char| c == '\n' || c == '\r');
        if !line.is_empty() {
            self.sink.write_line(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn buffer_emits_one_line_on_drop() {
        let memory = MemorySink::new();
        let writer = SinkWriter::new(Arc::new(memory.clone()));

        {
            let mut buffer = writer.make_writer();
            write!(buffer, "hello ").unwrap();
            writeln!(buffer, "world").unwrap();
            assert!(memory.lines().is_empty());
        }

        assert_eq!(memory.lines(), vec!["hello world"]);
    }

    #[test]
    fn empty_buffer_writes_nothing() {
        let memory = MemorySink::new();
        let writer = SinkWriter::new(Arc::new(memory.clone()));

        drop(writer.make_writer());
        assert!(memory.lines().is_empty());
    }
}
