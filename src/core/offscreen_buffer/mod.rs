// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The character buffer: a 2D grid of styled cells.
//!
//! [`OffscreenBuffer`] is the dense row-major grid everything else in this crate is
//! built on top of. The compositor keeps a front/back pair of these for the physical
//! terminal; the VT100 emulator keeps one (plus an optional alternate-screen copy) as
//! its screen model. Dense row-major storage gives the diff engine a predictable
//! stride for fast column-wise comparison.

pub mod ansi_parser_support;
#[cfg(test)]
pub mod test_fixtures_offscreen_buffer;

pub use ansi_parser_support::*;

use crate::{Pos, Size, TuiStyle, col, row};

/// A single cell's content. There is no "transparent" variant: every cell is fully
/// specified, and transparency is implemented by paint order, not by the cell itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PixelChar {
    /// An unwritten/cleared cell — renders as a space with no special style.
    Spacer,
    /// A single styled character.
    PlainText { display_char: char, style: TuiStyle },
}

impl Default for PixelChar {
    fn default() -> Self { PixelChar::Spacer }
}

impl PixelChar {
    /// The visible character this cell renders as (`Spacer` is a space).
    #[must_use]
    pub fn display_char(&self) -> char {
        match self {
            PixelChar::Spacer => ' ',
            PixelChar::PlainText { display_char, .. } => *display_char,
        }
    }

    /// The style this cell renders with (`Spacer` carries the default style).
    #[must_use]
    pub fn style(&self) -> TuiStyle {
        match self {
            PixelChar::Spacer => TuiStyle::default(),
            PixelChar::PlainText { style, .. } => *style,
        }
    }
}

/// Which character set a G-set slot holds. Designated into a slot via `ESC ( x` (G0)
/// or `ESC ) x` (G1); `print()` translates through whichever slot is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterSet {
    #[default]
    Ascii,
    DECGraphics,
}

/// Which of the two G-set slots (`G0`/`G1`) incoming bytes are currently translated
/// through. Toggled by SO (`0x0E`, activates G1) / SI (`0x0F`, activates G0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharsetSlot {
    #[default]
    G0,
    G1,
}

/// A rectangular grid of [`PixelChar`] cells, width × height ≥ 1.
///
/// Buffer coordinates are 0-based (see [`crate::core::coordinates`]); the VT100
/// parser boundary is the only place 1-based terminal coordinates appear.
#[derive(Debug, Clone)]
pub struct OffscreenBuffer {
    pub buffer: Vec<Vec<PixelChar>>,
    pub my_pos: Pos,
    pub window_size: Size,
    pub ansi_parser_support: AnsiParserSupport,
}

impl OffscreenBuffer {
    /// Create a buffer of the given size, every cell a [`PixelChar::Spacer`].
    #[must_use]
    pub fn new_empty(window_size: Size) -> Self {
        Self {
            buffer: Self::new_grid(window_size),
            my_pos: Pos::default(),
            window_size,
            ansi_parser_support: AnsiParserSupport::default(),
        }
    }

    /// Alias of [`Self::new_empty`] for call sites that want to make clear the grid's
    /// storage is allocated up front rather than grown lazily (it always is — there is
    /// no lazy/sparse representation in this buffer).
    #[must_use]
    pub fn new_with_capacity_initialized(window_size: Size) -> Self { Self::new_empty(window_size) }

    fn new_grid(window_size: Size) -> Vec<Vec<PixelChar>> {
        vec![vec![PixelChar::Spacer; window_size.col_width.as_usize()]; window_size.row_height.as_usize()]
    }

    /// Reset every cell to [`PixelChar::Spacer`] and the cursor to the origin. Does
    /// not touch scroll region, SGR state, or character-set selection — callers that
    /// want a full reset (`ESC c`) clear those separately.
    pub fn clear(&mut self) {
        for line in &mut self.buffer {
            line.fill(PixelChar::Spacer);
        }
        self.my_pos = Pos::default();
    }

    /// Resize the grid, preserving the top-left `min(W,W') x min(H,H')` overlap and
    /// filling any newly-exposed area with [`PixelChar::Spacer`]. The cursor is
    /// clamped back inside the new bounds if it would otherwise fall outside.
    pub fn resize(&mut self, new_size: Size) {
        let mut new_buffer = Self::new_grid(new_size);

        let overlap_rows = self.window_size.row_height.as_usize().min(new_size.row_height.as_usize());
        let overlap_cols = self.window_size.col_width.as_usize().min(new_size.col_width.as_usize());

        for (y, old_row) in self.buffer.iter().enumerate().take(overlap_rows) {
            new_buffer[y][..overlap_cols].copy_from_slice(&old_row[..overlap_cols]);
        }

        self.buffer = new_buffer;
        self.window_size = new_size;

        let max_col = new_size.col_width.convert_to_col_index();
        let max_row = new_size.row_height.convert_to_row_index();
        if self.my_pos.col_index.as_usize() > max_col.as_usize() {
            self.my_pos.col_index = max_col;
        }
        if self.my_pos.row_index.as_usize() > max_row.as_usize() {
            self.my_pos.row_index = max_row;
        }
    }

    /// Read the cell at `(x,y)`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<&PixelChar> { self.buffer.get(y).and_then(|line| line.get(x)) }

    /// Write a styled character at `(x,y)`. Out-of-bounds writes are silently dropped
    /// (mirrors how the VT100 `print()` path clips to the grid).
    pub fn set(&mut self, x: usize, y: usize, display_char: char, style: TuiStyle) {
        if let Some(cell) = self.buffer.get_mut(y).and_then(|line| line.get_mut(x)) {
            *cell = PixelChar::PlainText { display_char, style };
        }
    }

    /// Copy a rectangular region from `source` into `self`, clipped to both the
    /// source rectangle and this buffer's bounds. Never panics on an out-of-range
    /// rectangle or destination.
    pub fn copy_from(
        &mut self,
        source: &OffscreenBuffer,
        source_rect: (usize, usize, usize, usize), /* (x, y, width, height) */
        dest_x: usize,
        dest_y: usize,
    ) {
        let (src_x, src_y, src_w, src_h) = source_rect;

        let src_rows = source.window_size.row_height.as_usize();
        let src_cols = source.window_size.col_width.as_usize();
        let dst_rows = self.window_size.row_height.as_usize();
        let dst_cols = self.window_size.col_width.as_usize();

        for dy in 0..src_h {
            let sy = src_y + dy;
            let ty = dest_y + dy;
            if sy >= src_rows || ty >= dst_rows {
                break;
            }
            for dx in 0..src_w {
                let sx = src_x + dx;
                let tx = dest_x + dx;
                if sx >= src_cols || tx >= dst_cols {
                    break;
                }
                self.buffer[ty][tx] = source.buffer[sy][sx];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{height, width};

    #[test]
    fn new_empty_is_all_spacers() {
        let buf = OffscreenBuffer::new_empty(height(3) + width(3));
        for line in &buf.buffer {
            for cell in line {
                assert_eq!(*cell, PixelChar::Spacer);
            }
        }
        assert_eq!(buf.my_pos, Pos::default());
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut buf = OffscreenBuffer::new_empty(height(3) + width(3));
        buf.set(1, 1, 'x', TuiStyle::default());
        assert_eq!(
            buf.get(1, 1),
            Some(&PixelChar::PlainText { display_char: 'x', style: TuiStyle::default() })
        );
    }

    #[test]
    fn resize_smaller_preserves_top_left_overlap() {
        let mut buf = OffscreenBuffer::new_empty(height(4) + width(4));
        buf.set(0, 0, 'a', TuiStyle::default());
        buf.set(3, 3, 'z', TuiStyle::default());
        buf.resize(height(2) + width(2));
        assert_eq!(
            buf.get(0, 0),
            Some(&PixelChar::PlainText { display_char: 'a', style: TuiStyle::default() })
        );
        assert_eq!(buf.buffer.len(), 2);
        assert_eq!(buf.buffer[0].len(), 2);
    }

    #[test]
    fn resize_larger_fills_new_area_with_spacers() {
        let mut buf = OffscreenBuffer::new_empty(height(2) + width(2));
        buf.set(0, 0, 'a', TuiStyle::default());
        buf.resize(height(4) + width(4));
        assert_eq!(
            buf.get(0, 0),
            Some(&PixelChar::PlainText { display_char: 'a', style: TuiStyle::default() })
        );
        assert_eq!(buf.get(3, 3), Some(&PixelChar::Spacer));
    }

    #[test]
    fn copy_from_clips_to_both_rectangles() {
        let mut src = OffscreenBuffer::new_empty(height(2) + width(2));
        src.set(0, 0, 'a', TuiStyle::default());
        src.set(1, 1, 'b', TuiStyle::default());

        let mut dst = OffscreenBuffer::new_empty(height(1) + width(1));
        dst.copy_from(&src, (0, 0, 2, 2), 0, 0);

        assert_eq!(
            dst.get(0, 0),
            Some(&PixelChar::PlainText { display_char: 'a', style: TuiStyle::default() })
        );
        assert_eq!(dst.buffer.len(), 1);
    }

    #[test]
    fn clear_resets_cells_and_cursor() {
        let mut buf = OffscreenBuffer::new_empty(height(2) + width(2));
        buf.set(0, 0, 'a', TuiStyle::default());
        buf.my_pos = row(1) + col(1);
        buf.clear();
        assert_eq!(buf.get(0, 0), Some(&PixelChar::Spacer));
        assert_eq!(buf.my_pos, Pos::default());
    }
}
