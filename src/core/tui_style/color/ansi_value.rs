// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! ANSI 256-color palette representation.
//!
//! This provides a good balance between color precision and terminal compatibility.
//! Each index (0-255) maps to a specific color in the palette.

use super::{RgbValue,
            convert::{ansi_constants::ANSI_COLOR_PALETTE, convert_rgb_into_grayscale}};
use crate::TransformColor;

/// Represents a color in the ANSI 256-color palette format.
///
/// This provides a good balance between color precision and terminal compatibility.
/// Each index (0-255) maps to a specific color in the palette.
#[derive(Clone, PartialEq, Eq, Hash, Copy, Debug)]
pub struct AnsiValue {
    pub index: u8,
}

impl From<u8> for AnsiValue {
    fn from(index: u8) -> Self { Self { index } }
}

impl From<u16> for AnsiValue {
    fn from(value: u16) -> Self {
        debug_assert!(
            value <= 255,
            "AnsiValue must represent a valid 256-color palette index (0-255), got {value}"
        );
        #[allow(clippy::cast_possible_truncation)]
        let index = value as u8;
        Self { index }
    }
}

impl From<i32> for AnsiValue {
    fn from(value: i32) -> Self {
        debug_assert!(
            (0..=255).contains(&value),
            "AnsiValue must represent a valid 256-color palette index (0-255), got {value}"
        );
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = value as u8;
        Self { index }
    }
}

impl TransformColor for AnsiValue {
    fn as_grayscale(&self) -> AnsiValue {
        let index = self.index as usize;
        let rgb = ANSI_COLOR_PALETTE[index];
        let rgb = RgbValue::from(rgb);
        AnsiValue::from(convert_rgb_into_grayscale(rgb))
    }

    fn as_rgb(&self) -> RgbValue {
        let index = self.index as usize;
        ANSI_COLOR_PALETTE[index].into()
    }

    fn as_ansi(&self) -> AnsiValue { *self }
}

impl AnsiValue {
    #[must_use]
    pub const fn new(color: u8) -> Self { Self { index: color } }

    /// Whether this index falls in the 16-color basic palette (0-15), as opposed to
    /// the 256-color extended palette (16-255).
    #[must_use]
    pub const fn is_basic(&self) -> bool { self.index < 16 }
}
