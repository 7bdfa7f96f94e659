//! Output sinks.
//!
//! A sink is where the observer handler writes what it saw. The core never
//! touches stdout or any other global output directly; a sink is injected.

use std::io::{self, Stdout, Write};
use std::sync::{Arc, Mutex};

/// Line-oriented output destination.
pub trait OutputSink: Send + Sync {
    fn write_line(&self, line: &str) -> io::Result<()>;
}

impl<S> OutputSink for Arc<S>
where
    S: OutputSink + ?Sized,
{
    fn write_line(&self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// Writes each line to a `Write` implementation, flushing after every line.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl WriterSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> OutputSink for WriterSink<W>
where
    W: Write + Send,
{
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("output writer poisoned"))?;
        writeln!(writer, "{line}")?;
        writer.flush()
    }
}

/// Keeps every line in memory (tests/dev).
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl OutputSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .map_err(|_| io::Error::other("memory sink poisoned"))?
            .push(line.to_string());
        Ok(())
    }
}

/// Emits each line as an `info` tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        tracing::info!(target: "herald::events", "{line}");
        Ok(())
    }
}
