// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scrolling operations: line feed, reverse index, and the explicit scroll-region
//! CSI commands (SU/SD), plus the line insert/delete operations that shift a subrange
//! of the scroll region the same way.

use vte::Params;

use crate::ansi_parser_perform_impl::param_utils::ParamsExt;

use super::super::super::ansi_parser_public_api::AnsiToBufferProcessor;
use crate::{PixelChar, row};

/// The scroll region as 0-based, inclusive `[top, bottom]` row indices, defaulting to
/// the full buffer height when `DECSTBM` hasn't set a narrower region.
fn effective_scroll_region(processor: &AnsiToBufferProcessor) -> (usize, usize) {
    let support = &processor.ofs_buf.ansi_parser_support;
    let max_row = processor.ofs_buf.window_size.row_height.convert_to_row_index().as_usize();

    let top = support
        .scroll_region_top
        .and_then(crate::TermRow::to_zero_based)
        .map_or(0, |r| r.as_usize());
    let bottom = support
        .scroll_region_bottom
        .and_then(crate::TermRow::to_zero_based)
        .map_or(max_row, |r| r.as_usize());

    (top, usize::min(bottom, max_row))
}

/// Shift rows `[top..=bottom]` up by `n`, discarding the top `n` rows of that range
/// and blanking the bottom `n`. If `capture_scrollback` is set, the discarded rows are
/// pushed into the scrollback ring in oldest-first order before being dropped.
fn shift_rows_up(processor: &mut AnsiToBufferProcessor, top: usize, bottom: usize, n: usize, capture_scrollback: bool) {
    let cols = processor.ofs_buf.window_size.col_width.as_usize();
    if top > bottom || n == 0 {
        return;
    }
    let region_height = bottom - top + 1;
    let n = usize::min(n, region_height);

    if capture_scrollback {
        for y in top..top + n {
            processor.ofs_buf.ansi_parser_support.push_scrollback(processor.ofs_buf.buffer[y].clone());
        }
    }

    processor.ofs_buf.buffer[top..=bottom].rotate_left(n);
    for y in (bottom + 1 - n)..=bottom {
        processor.ofs_buf.buffer[y] = vec![PixelChar::Spacer; cols];
    }
}

/// Shift rows `[top..=bottom]` down by `n`, discarding the bottom `n` rows of that
/// range and blanking the top `n`.
fn shift_rows_down(processor: &mut AnsiToBufferProcessor, top: usize, bottom: usize, n: usize) {
    let cols = processor.ofs_buf.window_size.col_width.as_usize();
    if top > bottom || n == 0 {
        return;
    }
    let region_height = bottom - top + 1;
    let n = usize::min(n, region_height);

    processor.ofs_buf.buffer[top..=bottom].rotate_right(n);
    for y in top..top + n {
        processor.ofs_buf.buffer[y] = vec![PixelChar::Spacer; cols];
    }
}

/// Advance the cursor one row, scrolling the region up (capturing scrollback when the
/// region's top is row 0, i.e. the primary screen scrolling normally) if already at
/// the scroll region's bottom. Shared by `\n` (LF) and `ESC D` (IND) — both have the
/// identical row-movement effect.
pub fn line_feed(processor: &mut AnsiToBufferProcessor) {
    let (top, bottom) = effective_scroll_region(processor);
    let cy = processor.ofs_buf.my_pos.row_index.as_usize();

    if cy >= bottom {
        let capture = top == 0 && processor.ofs_buf.ansi_parser_support.alt_screen.is_none();
        shift_rows_up(processor, top, bottom, 1, capture);
    } else {
        processor.ofs_buf.my_pos.row_index = row(cy + 1);
    }
}

/// `ESC D` (IND): identical to a line feed.
pub fn index_down(processor: &mut AnsiToBufferProcessor) { line_feed(processor); }

/// `ESC M` (RI): move the cursor up one row, scrolling the region down if already at
/// its top.
pub fn reverse_index_up(processor: &mut AnsiToBufferProcessor) {
    let (top, _bottom) = effective_scroll_region(processor);
    let cy = processor.ofs_buf.my_pos.row_index.as_usize();

    if cy <= top {
        shift_rows_down(processor, top, effective_scroll_region(processor).1, 1);
    } else {
        processor.ofs_buf.my_pos.row_index = row(cy - 1);
    }
}

/// CSI S (SU): scroll the region up by `max(1, p1)` lines.
pub fn scroll_up(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let n = params.extract_nth_non_zero(0) as usize;
    let (top, bottom) = effective_scroll_region(processor);
    let capture = top == 0 && processor.ofs_buf.ansi_parser_support.alt_screen.is_none();
    shift_rows_up(processor, top, bottom, n, capture);
}

/// CSI T (SD): scroll the region down by `max(1, p1)` lines.
pub fn scroll_down(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let n = params.extract_nth_non_zero(0) as usize;
    let (top, bottom) = effective_scroll_region(processor);
    shift_rows_down(processor, top, bottom, n);
}

/// CSI L (IL): insert `max(1, p1)` blank lines at the cursor row, pushing the
/// remainder of the scroll region down (rows pushed past its bottom are discarded).
pub fn insert_lines(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let n = params.extract_nth_non_zero(0) as usize;
    let (top, bottom) = effective_scroll_region(processor);
    let cy = processor.ofs_buf.my_pos.row_index.as_usize();
    if cy < top || cy > bottom {
        return;
    }
    shift_rows_down(processor, cy, bottom, n);
}

/// CSI M (DL): delete `max(1, p1)` lines at the cursor row, pulling the remainder of
/// the scroll region up and blanking its bottom.
pub fn delete_lines(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let n = params.extract_nth_non_zero(0) as usize;
    let (top, bottom) = effective_scroll_region(processor);
    let cy = processor.ofs_buf.my_pos.row_index.as_usize();
    if cy < top || cy > bottom {
        return;
    }
    shift_rows_up(processor, cy, bottom, n, false);
}
