// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The crate-level error enum for the compositor core: character buffer, diff engine,
//! frame orchestrator, VT100 emulator, and PTY backend.
//!
//! Only [`CoreError::PtyUnavailable`] is returned from a public constructor; every
//! other variant is recorded via `tracing` at the failure site and handled in place
//! (see each variant's doc comment for its recovery path) rather than propagated.

use miette::Diagnostic;
use thiserror::Error;

pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// The six failure kinds this core recognizes. Nothing outside this set is expected to
/// happen; anything else is a bug.
#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    /// A write to the physical terminal failed. Best-effort: the frame orchestrator
    /// records the attempt in its metrics and marks every window dirty so the next
    /// frame fully re-syncs, rather than propagating this upward.
    #[error("terminal I/O failed: {0}")]
    TerminalIO(#[source] std::io::Error),

    /// A PTY could not be allocated or the child process could not be spawned. The
    /// only variant surfaced to callers above the core: returned from the PTY backend's
    /// constructor, which leaves nothing partially initialized.
    #[error("failed to allocate a pty or spawn the child process: {0}")]
    PtyUnavailable(String),

    /// The PTY master reported EOF (the child exited or closed its end). The backend
    /// disposes itself and the embedded window is closed exactly once.
    #[error("pty reached end of file")]
    PtyEof,

    /// The VT100 emulator encountered a malformed escape sequence. The offending bytes
    /// are silently dropped and the parser returns to its `Normal` state; this never
    /// propagates past the emulator.
    #[error("invalid escape sequence")]
    InvalidEscapeSequence,

    /// A resize request fell outside the buffer's representable dimensions. Requests
    /// below 1x1 are clamped to 1x1; requests above plausible terminal dimensions are
    /// allowed but may truncate the cursor, which is re-clamped into bounds.
    #[error("resize out of range: requested {requested_cols}x{requested_rows}")]
    ResizeOutOfRange { requested_cols: u16, requested_rows: u16 },

    /// A window's paint callback raised an error. That window is skipped for the
    /// current frame, its region is left as whatever was last painted underneath it,
    /// and the frame orchestrator continues with the remaining windows.
    #[error("paint callback failed: {0}")]
    PaintCallbackFailure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pty_unavailable_message_includes_detail() {
        let err = CoreError::PtyUnavailable("openpty failed".to_string());
        assert_eq!(
            err.to_string(),
            "failed to allocate a pty or spawn the child process: openpty failed"
        );
    }

    #[test]
    fn resize_out_of_range_message_includes_dimensions() {
        let err = CoreError::ResizeOutOfRange { requested_cols: 0, requested_rows: 0 };
        assert_eq!(err.to_string(), "resize out of range: requested 0x0");
    }
}
