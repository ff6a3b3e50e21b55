// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Builder for SGR (Select Graphic Rendition) escape sequences — the inverse direction
//! of [`super::sgr_ops`], which *parses* these same codes back out of a byte stream.
//! Lets callers construct ANSI-colored text without hand-writing `\x1b[...m` literals.

use std::fmt;

use super::csi_codes::{SGR_BG_BLACK, SGR_BG_BLUE, SGR_BG_BRIGHT_BLACK, SGR_BG_BRIGHT_BLUE,
                        SGR_BG_BRIGHT_CYAN, SGR_BG_BRIGHT_GREEN, SGR_BG_BRIGHT_MAGENTA,
                        SGR_BG_BRIGHT_RED, SGR_BG_BRIGHT_WHITE, SGR_BG_BRIGHT_YELLOW,
                        SGR_BG_CYAN, SGR_BG_GREEN, SGR_BG_MAGENTA, SGR_BG_RED,
                        SGR_BG_WHITE, SGR_BG_YELLOW, SGR_BOLD, SGR_DIM,
                        SGR_FG_BLACK, SGR_FG_BLUE, SGR_FG_BRIGHT_BLACK, SGR_FG_BRIGHT_BLUE,
                        SGR_FG_BRIGHT_CYAN, SGR_FG_BRIGHT_GREEN, SGR_FG_BRIGHT_MAGENTA,
                        SGR_FG_BRIGHT_RED, SGR_FG_BRIGHT_WHITE, SGR_FG_BRIGHT_YELLOW,
                        SGR_FG_CYAN, SGR_FG_GREEN, SGR_FG_MAGENTA, SGR_FG_RED, SGR_FG_WHITE,
                        SGR_HIDDEN, SGR_ITALIC, SGR_RESET, SGR_REVERSE, SGR_SET_GRAPHICS,
                        SGR_STRIKETHROUGH, SGR_UNDERLINE};
use crate::{ANSIBasicColor, BufTextStorage, RgbValue, TuiColor, TuiStyle, WriteToBuf};

fn basic_color_to_fg_code(color: ANSIBasicColor) -> u16 {
    match color {
        ANSIBasicColor::Black => SGR_FG_BLACK,
        ANSIBasicColor::Red => SGR_FG_RED,
        ANSIBasicColor::Green => SGR_FG_GREEN,
        ANSIBasicColor::Yellow => SGR_FG_YELLOW,
        ANSIBasicColor::Blue => SGR_FG_BLUE,
        ANSIBasicColor::Magenta => SGR_FG_MAGENTA,
        ANSIBasicColor::Cyan => SGR_FG_CYAN,
        ANSIBasicColor::White => SGR_FG_WHITE,
        ANSIBasicColor::DarkGray => SGR_FG_BRIGHT_BLACK,
        ANSIBasicColor::DarkRed => SGR_FG_RED,
        ANSIBasicColor::DarkGreen => SGR_FG_GREEN,
        ANSIBasicColor::DarkYellow => SGR_FG_YELLOW,
        ANSIBasicColor::DarkBlue => SGR_FG_BLUE,
        ANSIBasicColor::DarkMagenta => SGR_FG_MAGENTA,
        ANSIBasicColor::DarkCyan => SGR_FG_CYAN,
        ANSIBasicColor::Gray => SGR_FG_BRIGHT_WHITE,
    }
}

fn basic_color_to_bg_code(color: ANSIBasicColor) -> u16 {
    match color {
        ANSIBasicColor::Black => SGR_BG_BLACK,
        ANSIBasicColor::Red => SGR_BG_RED,
        ANSIBasicColor::Green => SGR_BG_GREEN,
        ANSIBasicColor::Yellow => SGR_BG_YELLOW,
        ANSIBasicColor::Blue => SGR_BG_BLUE,
        ANSIBasicColor::Magenta => SGR_BG_MAGENTA,
        ANSIBasicColor::Cyan => SGR_BG_CYAN,
        ANSIBasicColor::White => SGR_BG_WHITE,
        ANSIBasicColor::DarkGray => SGR_BG_BRIGHT_BLACK,
        ANSIBasicColor::DarkRed => SGR_BG_RED,
        ANSIBasicColor::DarkGreen => SGR_BG_GREEN,
        ANSIBasicColor::DarkYellow => SGR_BG_YELLOW,
        ANSIBasicColor::DarkBlue => SGR_BG_BLUE,
        ANSIBasicColor::DarkMagenta => SGR_BG_MAGENTA,
        ANSIBasicColor::DarkCyan => SGR_BG_CYAN,
        ANSIBasicColor::Gray => SGR_BG_BRIGHT_WHITE,
    }
}

// Silence unused-constant warnings for bright variants kept for completeness/parity
// with `ansi_to_tui_color`'s reverse mapping.
#[allow(dead_code)]
const _BRIGHT_BG_TABLE: [u16; 7] = [
    SGR_BG_BRIGHT_RED,
    SGR_BG_BRIGHT_GREEN,
    SGR_BG_BRIGHT_YELLOW,
    SGR_BG_BRIGHT_BLUE,
    SGR_BG_BRIGHT_MAGENTA,
    SGR_BG_BRIGHT_CYAN,
    SGR_BG_BRIGHT_WHITE,
];
#[allow(dead_code)]
const _BRIGHT_FG_TABLE: [u16; 6] = [
    SGR_FG_BRIGHT_RED,
    SGR_FG_BRIGHT_GREEN,
    SGR_FG_BRIGHT_YELLOW,
    SGR_FG_BRIGHT_BLUE,
    SGR_FG_BRIGHT_MAGENTA,
    SGR_FG_BRIGHT_CYAN,
];

/// Builder for SGR sequences (`ESC [ ... m`), the encode-direction counterpart to the
/// parsing done in [`super::sgr_ops`].
///
/// Covers the full color model a [`crate::TuiStyle`] can carry: basic 16-color,
/// 256-color palette indices, and 24-bit RGB, plus the boolean text attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SgrCode {
    Reset,
    Bold,
    Dim,
    Italic,
    Underline,
    Reverse,
    Hidden,
    Strikethrough,
    ForegroundBasic(ANSIBasicColor),
    BackgroundBasic(ANSIBasicColor),
    ForegroundAnsi256(u8),
    BackgroundAnsi256(u8),
    ForegroundRgb(RgbValue),
    BackgroundRgb(RgbValue),
}

impl fmt::Display for SgrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut acc = BufTextStorage::new();
        self.write_to_buf(&mut acc)?;
        self.write_buf_to_fmt(&acc, f)
    }
}

impl WriteToBuf for SgrCode {
    fn write_to_buf(&self, acc: &mut BufTextStorage) -> fmt::Result {
        acc.push_str("\x1b[");
        match self {
            SgrCode::Reset => acc.push_str(&SGR_RESET.to_string()),
            SgrCode::Bold => acc.push_str(&SGR_BOLD.to_string()),
            SgrCode::Dim => acc.push_str(&SGR_DIM.to_string()),
            SgrCode::Italic => acc.push_str(&SGR_ITALIC.to_string()),
            SgrCode::Underline => acc.push_str(&SGR_UNDERLINE.to_string()),
            SgrCode::Reverse => acc.push_str(&SGR_REVERSE.to_string()),
            SgrCode::Hidden => acc.push_str(&SGR_HIDDEN.to_string()),
            SgrCode::Strikethrough => acc.push_str(&SGR_STRIKETHROUGH.to_string()),
            SgrCode::ForegroundBasic(color) => {
                acc.push_str(&basic_color_to_fg_code(*color).to_string());
            }
            SgrCode::BackgroundBasic(color) => {
                acc.push_str(&basic_color_to_bg_code(*color).to_string());
            }
            SgrCode::ForegroundAnsi256(index) => {
                acc.push_str(&format!("38;5;{index}"));
            }
            SgrCode::BackgroundAnsi256(index) => {
                acc.push_str(&format!("48;5;{index}"));
            }
            SgrCode::ForegroundRgb(rgb) => {
                acc.push_str(&format!("38;2;{};{};{}", rgb.red, rgb.green, rgb.blue));
            }
            SgrCode::BackgroundRgb(rgb) => {
                acc.push_str(&format!("48;2;{};{};{}", rgb.red, rgb.green, rgb.blue));
            }
        }
        acc.push(SGR_SET_GRAPHICS);
        Ok(())
    }

    fn write_buf_to_fmt(&self, acc: &BufTextStorage, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(acc)
    }
}

/// Converts a [`TuiColor`] into the `SgrCode` that paints it as a foreground color.
#[must_use]
pub fn fg_sgr_code_for_color(color: TuiColor) -> SgrCode {
    match color {
        TuiColor::Basic(basic) => SgrCode::ForegroundBasic(basic),
        TuiColor::Ansi(ansi) => SgrCode::ForegroundAnsi256(ansi.index),
        TuiColor::Rgb(rgb) => SgrCode::ForegroundRgb(rgb),
    }
}

/// Converts a [`TuiColor`] into the `SgrCode` that paints it as a background color.
#[must_use]
pub fn bg_sgr_code_for_color(color: TuiColor) -> SgrCode {
    match color {
        TuiColor::Basic(basic) => SgrCode::BackgroundBasic(basic),
        TuiColor::Ansi(ansi) => SgrCode::BackgroundAnsi256(ansi.index),
        TuiColor::Rgb(rgb) => SgrCode::BackgroundRgb(rgb),
    }
}

/// Expands a [`TuiStyle`] into the sequence of `SgrCode`s that reproduce it, in a fixed
/// order (attributes, then foreground, then background). Does not emit [`SgrCode::Reset`]
/// — callers that need a clean slate before applying a style emit that separately.
#[must_use]
pub fn sgr_codes_for_style(style: &TuiStyle) -> Vec<SgrCode> {
    let mut codes = Vec::new();
    if style.bold.is_some() {
        codes.push(SgrCode::Bold);
    }
    if style.dim.is_some() {
        codes.push(SgrCode::Dim);
    }
    if style.italic.is_some() {
        codes.push(SgrCode::Italic);
    }
    if style.underline.is_some() {
        codes.push(SgrCode::Underline);
    }
    if style.reverse.is_some() {
        codes.push(SgrCode::Reverse);
    }
    if style.hidden.is_some() {
        codes.push(SgrCode::Hidden);
    }
    if style.strikethrough.is_some() {
        codes.push(SgrCode::Strikethrough);
    }
    if let Some(fg) = style.color_fg {
        codes.push(fg_sgr_code_for_color(fg));
    }
    if let Some(bg) = style.color_bg {
        codes.push(bg_sgr_code_for_color(bg));
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_and_fg() {
        assert_eq!(SgrCode::Reset.to_string(), "\x1b[0m");
        assert_eq!(
            SgrCode::ForegroundBasic(ANSIBasicColor::Red).to_string(),
            "\x1b[31m"
        );
    }

    #[test]
    fn test_256_and_rgb() {
        assert_eq!(SgrCode::ForegroundAnsi256(196).to_string(), "\x1b[38;5;196m");
        assert_eq!(SgrCode::BackgroundAnsi256(22).to_string(), "\x1b[48;5;22m");
        assert_eq!(
            SgrCode::ForegroundRgb(RgbValue { red: 1, green: 2, blue: 3 }).to_string(),
            "\x1b[38;2;1;2;3m"
        );
    }

    #[test]
    fn test_sgr_codes_for_style() {
        let style = TuiStyle {
            bold: Some(crate::tui_style_attrib::Bold),
            color_fg: Some(TuiColor::Rgb(RgbValue { red: 10, green: 20, blue: 30 })),
            ..Default::default()
        };
        let codes = sgr_codes_for_style(&style);
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[0], SgrCode::Bold);
        assert_eq!(
            codes[1],
            SgrCode::ForegroundRgb(RgbValue { red: 10, green: 20, blue: 30 })
        );
    }
}
