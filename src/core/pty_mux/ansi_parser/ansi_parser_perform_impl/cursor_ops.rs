// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Cursor movement and position save/restore operations.

use vte::Params;

use crate::ansi_parser_perform_impl::param_utils::ParamsExt;

use super::super::super::ansi_parser_public_api::AnsiToBufferProcessor;
use crate::{col, row};

/// CSI A: Cursor Up (CUU). Moves up by `max(1, p1)`, clamped to row 0.
pub fn cursor_up(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let n = params.extract_nth_non_zero(0) as usize;
    let cy = processor.ofs_buf.my_pos.row_index.as_usize();
    processor.ofs_buf.my_pos.row_index = row(cy.saturating_sub(n));
}

/// CSI B: Cursor Down (CUD). Moves down by `max(1, p1)`, clamped to the last row.
pub fn cursor_down(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let n = params.extract_nth_non_zero(0) as usize;
    let cy = processor.ofs_buf.my_pos.row_index.as_usize();
    let max_row = processor.ofs_buf.window_size.row_height.convert_to_row_index().as_usize();
    processor.ofs_buf.my_pos.row_index = row(usize::min(cy + n, max_row));
}

/// CSI C: Cursor Forward (CUF). Moves right by `max(1, p1)`, clamped to the last column.
pub fn cursor_forward(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let n = params.extract_nth_non_zero(0) as usize;
    let cx = processor.ofs_buf.my_pos.col_index.as_usize();
    let max_col = processor.ofs_buf.window_size.col_width.convert_to_col_index().as_usize();
    processor.ofs_buf.my_pos.col_index = col(usize::min(cx + n, max_col));
}

/// CSI D: Cursor Backward (CUB). Moves left by `max(1, p1)`, clamped to column 0.
pub fn cursor_backward(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let n = params.extract_nth_non_zero(0) as usize;
    let cx = processor.ofs_buf.my_pos.col_index.as_usize();
    processor.ofs_buf.my_pos.col_index = col(cx.saturating_sub(n));
}

/// CSI E: Cursor Next Line (CNL). Column 0, `max(1, p1)` rows down, clamped.
pub fn cursor_next_line(processor: &mut AnsiToBufferProcessor, params: &Params) {
    processor.ofs_buf.my_pos.col_index = col(0);
    cursor_down(processor, params);
}

/// CSI F: Cursor Previous Line (CPL). Column 0, `max(1, p1)` rows up, clamped.
pub fn cursor_prev_line(processor: &mut AnsiToBufferProcessor, params: &Params) {
    processor.ofs_buf.my_pos.col_index = col(0);
    cursor_up(processor, params);
}

/// CSI G: Cursor Horizontal Absolute (CHA). Column `p1` (default 1), clamped to `[1,W]`.
pub fn cursor_horizontal_absolute(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let p1 = params.extract_nth_non_zero(0) as usize;
    let max_col = processor.ofs_buf.window_size.col_width.as_usize();
    let clamped = usize::min(usize::max(p1, 1), max_col.max(1));
    processor.ofs_buf.my_pos.col_index = col(clamped - 1);
}

/// CSI H / CSI f: Cursor Position (CUP / HVP). Row `p1`, column `p2` (both 1-based,
/// default 1), clamped to the grid.
pub fn cursor_position(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let p1 = params.extract_nth_non_zero(0) as usize;
    let p2 = params.extract_nth_non_zero(1) as usize;

    let max_row = processor.ofs_buf.window_size.row_height.as_usize();
    let max_col = processor.ofs_buf.window_size.col_width.as_usize();

    let clamped_row = usize::min(usize::max(p1, 1), max_row.max(1));
    let clamped_col = usize::min(usize::max(p2, 1), max_col.max(1));

    processor.ofs_buf.my_pos.row_index = row(clamped_row - 1);
    processor.ofs_buf.my_pos.col_index = col(clamped_col - 1);
}

/// CSI d: Vertical Position Absolute (VPA). Row `p1` (default 1), column unchanged.
pub fn cursor_vertical_position_absolute(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let p1 = params.extract_nth_non_zero(0) as usize;
    let max_row = processor.ofs_buf.window_size.row_height.as_usize();
    let clamped = usize::min(usize::max(p1, 1), max_row.max(1));
    processor.ofs_buf.my_pos.row_index = row(clamped - 1);
}

/// CSI s: Save Cursor Position (SCP). Equivalent to `ESC 7` for position (no attribute
/// save).
pub fn save_cursor_position(processor: &mut AnsiToBufferProcessor) {
    processor.ofs_buf.ansi_parser_support.cursor_pos_for_esc_save_and_restore =
        Some(processor.ofs_buf.my_pos);
}

/// CSI u: Restore Cursor Position (RCP). Equivalent to `ESC 8` for position.
pub fn restore_cursor_position(processor: &mut AnsiToBufferProcessor) {
    if let Some(saved_pos) = processor.ofs_buf.ansi_parser_support.cursor_pos_for_esc_save_and_restore {
        processor.ofs_buf.my_pos = saved_pos;
    }
}

#[cfg(test)]
mod tests {
    use crate::{OffscreenBuffer, col, height, row, width};

    #[test]
    fn cursor_up_clamps_at_top() {
        let mut ofs_buf = OffscreenBuffer::new_empty(height(5) + width(5));
        ofs_buf.apply_ansi_bytes("\x1b[10A");
        assert_eq!(ofs_buf.my_pos, row(0) + col(0));
    }

    #[test]
    fn cursor_down_clamps_at_bottom() {
        let mut ofs_buf = OffscreenBuffer::new_empty(height(5) + width(5));
        ofs_buf.apply_ansi_bytes("\x1b[10B");
        assert_eq!(ofs_buf.my_pos, row(4) + col(0));
    }

    #[test]
    fn cursor_position_clamps_out_of_range_params() {
        let mut ofs_buf = OffscreenBuffer::new_empty(height(5) + width(5));
        ofs_buf.apply_ansi_bytes("\x1b[100;100H");
        assert_eq!(ofs_buf.my_pos, row(4) + col(4));
    }

    #[test]
    fn save_and_restore_cursor_round_trip() {
        let mut ofs_buf = OffscreenBuffer::new_empty(height(5) + width(5));
        ofs_buf.apply_ansi_bytes("\x1b[3;4H\x1b[s\x1b[1;1H\x1b[u");
        assert_eq!(ofs_buf.my_pos, row(2) + col(3));
    }

    #[test]
    fn vpa_moves_row_keeps_column() {
        let mut ofs_buf = OffscreenBuffer::new_empty(height(5) + width(5));
        ofs_buf.apply_ansi_bytes("\x1b[1;3H\x1b[4d");
        assert_eq!(ofs_buf.my_pos, row(3) + col(2));
    }
}
