// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! VT100/xterm-256color emulation for `vt_compositor`.
//!
//! This module drives an [`crate::OffscreenBuffer`] from a byte stream using the `vte`
//! crate's `Perform` trait, translating CSI/ESC/OSC sequences into buffer mutations:
//! cursor movement, SGR styling, scroll regions and scrollback, the alternate screen
//! buffer, and DEC private modes. See [`ansi_parser::ansi_parser_public_api`] for the
//! entry point, [`crate::OffscreenBuffer::apply_ansi_bytes`].

pub mod ansi_parser;

pub use ansi_parser::ansi_parser_perform_impl;
