// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Small public surface for wiring this crate's logging into a host application or a
//! test harness: [`SharedWriter`] lets tests or embedding apps capture formatted log
//! lines instead of writing to stdout/stderr, and [`init_tracing`] is the one-call
//! entry point a binary or test harness reaches for instead of hand-assembling a
//! [`super::TracingConfig`].

use crate::log::{DisplayPreference, TracingConfig, WriterConfig};
use std::{io,
          sync::{Arc, Mutex}};
use tokio::sync::mpsc::Sender;
use tracing_core::LevelFilter;

/// A signal sent on every complete line written through a [`SharedWriter`].
///
/// `Flush` is sent when the writer is flushed with a partial (newline-less) line still
/// buffered, so a receiver waiting on complete lines doesn't block forever on trailing
/// output.
#[derive(Debug, Clone)]
pub enum LineStateControlSignal {
    Line(String),
    Flush,
}

/// An [`io::Write`] implementation that buffers bytes until a newline, then forwards
/// each complete line as a [`LineStateControlSignal::Line`] over a channel.
///
/// This is how tests observe [`tracing`] output without capturing real stdout/stderr:
/// construct one from the receiving end of a [`tokio::sync::mpsc::channel`] and pass it
/// to [`DisplayPreference::SharedWriter`].
#[derive(Clone)]
pub struct SharedWriter {
    buffer: Arc<Mutex<String>>,
    line_sender: Sender<LineStateControlSignal>,
}

impl SharedWriter {
    #[must_use]
    pub fn new(line_sender: Sender<LineStateControlSignal>) -> Self {
        Self { buffer: Arc::new(Mutex::new(String::new())), line_sender }
    }
}

impl PartialEq for SharedWriter {
    fn eq(&self, other: &Self) -> bool { self.line_sender.same_channel(&other.line_sender) }
}

impl io::Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let mut guard = self.buffer.lock().unwrap();
        guard.push_str(&text);

        while let Some(pos) = guard.find('\n') {
            let line: String = guard.drain(..=pos).collect();
            let line = line.trim_end_matches(['\n', '\r']).to_string();
            // Best-effort: a full channel or a dropped receiver just drops the line,
            // it doesn't fail the write.
            let _unused = self.line_sender.try_send(LineStateControlSignal::Line(line));
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self.buffer.lock().unwrap();
        if !guard.is_empty() {
            let remaining = std::mem::take(&mut *guard);
            let _unused =
                self.line_sender.try_send(LineStateControlSignal::Line(remaining));
        }
        let _unused = self.line_sender.try_send(LineStateControlSignal::Flush);
        Ok(())
    }
}

/// Install a global `tracing` subscriber writing to stdout at `level_filter`.
///
/// This mirrors the teacher's convention of a single no-argument-ish bootstrap call
/// from a binary's `main` (or a test harness's setup), rather than requiring every
/// caller to assemble a [`TracingConfig`] by hand.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing(level_filter: LevelFilter) -> miette::Result<()> {
    TracingConfig {
        writer_config: WriterConfig::Display(DisplayPreference::Stdout),
        level_filter,
    }
    .install_global()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shared_writer_splits_on_newline() {
        let (tx, mut rx) = tokio::sync::mpsc::channel(16);
        let mut writer = SharedWriter::new(tx);

        use std::io::Write as _;
        write!(writer, "first\nsecond\nthird").unwrap();
        writer.flush().unwrap();

        let mut lines = Vec::new();
        while let Ok(signal) = rx.try_recv() {
            if let LineStateControlSignal::Line(line) = signal {
                lines.push(line);
            }
        }

        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_shared_writer_eq_same_channel() {
        let (tx, _rx) = tokio::sync::mpsc::channel(1);
        let a = SharedWriter::new(tx.clone());
        let b = SharedWriter::new(tx);
        assert_eq!(a, b);

        let (tx2, _rx2) = tokio::sync::mpsc::channel(1);
        let c = SharedWriter::new(tx2);
        assert_ne!(a, c);
    }
}
