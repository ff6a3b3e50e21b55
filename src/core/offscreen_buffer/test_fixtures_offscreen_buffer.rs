// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Test-only assertion helpers for [`super::OffscreenBuffer`] contents, shared by the
//! ANSI parser's own test suite and by anything else that needs to assert on buffer
//! state after feeding it bytes.

use super::{OffscreenBuffer, PixelChar};
use crate::TuiStyle;

/// Assert that `text` appears starting at `(row, col)`, one character per column,
/// regardless of style.
pub fn assert_plain_text_at(ofs_buf: &OffscreenBuffer, row: usize, col: usize, text: &str) {
    for (i, expected_char) in text.chars().enumerate() {
        assert_plain_char_at(ofs_buf, row, col + i, expected_char);
    }
}

/// Assert that the cell at `(row, col)` holds `expected_char`, regardless of style.
pub fn assert_plain_char_at(ofs_buf: &OffscreenBuffer, row: usize, col: usize, expected_char: char) {
    match ofs_buf.get(col, row) {
        Some(PixelChar::PlainText { display_char, .. }) => {
            assert_eq!(
                *display_char, expected_char,
                "expected '{expected_char}' at (row={row}, col={col}), found '{display_char}'"
            );
        }
        other => panic!(
            "expected PlainText('{expected_char}') at (row={row}, col={col}), found {other:?}"
        ),
    }
}

/// Assert that the cell at `(row, col)` holds `expected_char` and that `predicate`
/// returns true for its style. `what` is folded into the panic message on failure.
pub fn assert_styled_char_at(
    ofs_buf: &OffscreenBuffer,
    row: usize,
    col: usize,
    expected_char: char,
    predicate: impl FnOnce(&TuiStyle) -> bool,
    what: &str,
) {
    match ofs_buf.get(col, row) {
        Some(PixelChar::PlainText { display_char, style }) => {
            assert_eq!(
                *display_char, expected_char,
                "expected '{expected_char}' at (row={row}, col={col}), found '{display_char}'"
            );
            assert!(
                predicate(style),
                "style at (row={row}, col={col}) did not satisfy '{what}': {style:?}"
            );
        }
        other => panic!(
            "expected PlainText('{expected_char}') at (row={row}, col={col}), found {other:?}"
        ),
    }
}

/// Assert that the cell at `(row, col)` is an unwritten [`PixelChar::Spacer`].
pub fn assert_empty_at(ofs_buf: &OffscreenBuffer, row: usize, col: usize) {
    match ofs_buf.get(col, row) {
        Some(PixelChar::Spacer) => {}
        other => panic!("expected Spacer at (row={row}, col={col}), found {other:?}"),
    }
}
