// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod color;
pub mod color_degradation;
pub mod hex_color_parser;
pub mod tui_color;
pub mod tui_style_attribs;
pub mod tui_style_impl;
pub mod tui_style_lite;
pub mod tui_stylesheet;

// Re-export.
pub use color::*;
pub use color_degradation::*;
pub use hex_color_parser::*;
pub use tui_color::*;
pub use tui_style_attribs::*;
pub use tui_style_impl::*;
pub use tui_stylesheet::*;
