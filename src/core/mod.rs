// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Connect to source file.
pub mod common;
pub mod coordinates;
pub mod decl_macros;
pub mod heap_alloc_types;
pub mod log;
pub mod misc;
pub mod offscreen_buffer;
pub mod osc;
pub mod pty;
pub mod pty_mux;
pub mod stack_alloc_types;
pub mod test_fixtures;
pub mod tui_style;
pub mod tui_styled_text;

// Re-export.
pub use common::*;
pub use coordinates::*;
pub use decl_macros::*;
pub use heap_alloc_types::*;
pub use log::*;
pub use misc::*;
pub use offscreen_buffer::*;
pub use osc::*;
pub use pty::*;
pub use pty_mux::*;
pub use stack_alloc_types::*;
pub use test_fixtures::*;
pub use tui_style::*;
pub use tui_styled_text::*;
