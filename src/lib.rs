// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # `vt_compositor`
//!
//! A character-buffer compositor, dirty-diff renderer, VT100/xterm-256color emulator,
//! and PTY-backed terminal embedding, for retained-mode TUI toolkits.
//!
//! The crate is organized around five cooperating components, data flowing top to
//! bottom per frame:
//!
//! 1. **Character buffer** (`core::offscreen_buffer`) — a 2D grid of styled cells;
//!    front/back double-buffering.
//! 2. **Dirty diff engine** (`render::diff_engine`) — compares front and back
//!    buffers, chooses a per-line rendering strategy (cell/line/smart), and emits
//!    cursor-positioned styled-run output.
//! 3. **Frame orchestrator** (`render::frame_orchestrator`) — decides when to
//!    render, walks windows bottom-to-top in z-order, owns the front/back buffer swap.
//! 4. **VT100/xterm-256color emulator** ([`core::pty_mux::ansi_parser`]) — a
//!    byte-oriented state machine that interprets ESC/CSI/OSC sequences and writes
//!    into its own character buffer.
//! 5. **PTY backend** ([`core::pty`]) — opens a pseudo-terminal, spawns a child, and
//!    pumps bytes between a background reader task and the emulator.
//!
//! Dependency order (leaves first): character buffer -> diff engine -> frame
//! orchestrator, and independently character buffer -> VT100 emulator -> PTY backend.
//! A terminal-embedding control plugs the emulator's buffer into the paint path by
//! copying a region of its buffer into the compositor's back buffer.
//!
//! Individual widgets, fluent builder APIs, theme palettes, and layout algorithms
//! beyond "controls paint into an absolute rectangle" are explicitly out of scope;
//! see the crate's design notes for the full boundary.

// Attach.
pub mod core;
pub mod render;

// Re-export.
pub use crate::core::*;
pub use crate::render::*;
