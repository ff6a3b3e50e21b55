// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal state operations.

use vte::Params;

use super::super::super::ansi_parser_public_api::AnsiToBufferProcessor;
use crate::ansi_parser_perform_impl::param_utils::ParamsExt;
use crate::{CharacterSet, CharsetSlot, PixelChar, Pos};

/// Clear all buffer content.
fn clear_buffer(processor: &mut AnsiToBufferProcessor) {
    let max_row = processor.ofs_buf.window_size.row_height.as_usize();
    for row in 0..max_row {
        for col in 0..processor.ofs_buf.window_size.col_width.as_usize() {
            processor.ofs_buf.buffer[row][col] = PixelChar::Spacer;
        }
    }
}

/// Reset all SGR attributes to default state.
fn reset_sgr_attributes(processor: &mut AnsiToBufferProcessor) {
    processor.ofs_buf.ansi_parser_support.current_style = None;
    processor.ofs_buf.ansi_parser_support.attribs.bold = None;
    processor.ofs_buf.ansi_parser_support.attribs.dim = None;
    processor.ofs_buf.ansi_parser_support.attribs.italic = None;
    processor.ofs_buf.ansi_parser_support.attribs.underline = None;
    processor.ofs_buf.ansi_parser_support.attribs.blink = None;
    processor.ofs_buf.ansi_parser_support.attribs.reverse = None;
    processor.ofs_buf.ansi_parser_support.attribs.hidden = None;
    processor.ofs_buf.ansi_parser_support.attribs.strikethrough = None;
    processor.ofs_buf.ansi_parser_support.fg_color = None;
    processor.ofs_buf.ansi_parser_support.bg_color = None;
}

/// Reset terminal to initial state (ESC c).
/// Clears the buffer, resets cursor, and clears saved state.
/// Clears DECSTBM scroll region margins.
pub fn reset_terminal(processor: &mut AnsiToBufferProcessor) {
    clear_buffer(processor);

    // Reset cursor to home position
    processor.ofs_buf.my_pos = Pos::default();

    // Clear saved cursor state
    processor
        .ofs_buf
        .ansi_parser_support
        .cursor_pos_for_esc_save_and_restore = None;

    // Reset both G-set slots to ASCII and reactivate G0.
    processor.ofs_buf.ansi_parser_support.g0_charset = CharacterSet::Ascii;
    processor.ofs_buf.ansi_parser_support.g1_charset = CharacterSet::Ascii;
    processor.ofs_buf.ansi_parser_support.active_charset_slot = CharsetSlot::G0;

    // Clear DECSTBM scroll region margins
    processor.ofs_buf.ansi_parser_support.scroll_region_top = None;
    processor.ofs_buf.ansi_parser_support.scroll_region_bottom = None;

    // Clear any SGR attributes
    reset_sgr_attributes(processor);

    tracing::trace!("ESC c: Terminal reset to initial state");
}

/// CSI J (ED): erase display. Mode 0 (default): cursor to end of screen. Mode 1:
/// start of screen to cursor (inclusive). Mode 2: entire screen. Mode 3: entire
/// screen plus scrollback.
pub fn erase_display(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let mode = params.extract_nth_opt(0).unwrap_or(0);
    let rows = processor.ofs_buf.window_size.row_height.as_usize();
    let cols = processor.ofs_buf.window_size.col_width.as_usize();
    let cy = processor.ofs_buf.my_pos.row_index.as_usize();
    let cx = processor.ofs_buf.my_pos.col_index.as_usize();

    match mode {
        0 => {
            processor.ofs_buf.buffer[cy][cx..].fill(PixelChar::Spacer);
            for row in &mut processor.ofs_buf.buffer[cy + 1..rows] {
                row.fill(PixelChar::Spacer);
            }
        }
        1 => {
            for row in &mut processor.ofs_buf.buffer[..cy] {
                row.fill(PixelChar::Spacer);
            }
            processor.ofs_buf.buffer[cy][..=cx.min(cols.saturating_sub(1))].fill(PixelChar::Spacer);
        }
        2 => clear_buffer(processor),
        3 => {
            clear_buffer(processor);
            processor.ofs_buf.ansi_parser_support.scrollback.clear();
        }
        _ => {}
    }
}

/// CSI K (EL): erase line. Mode 0 (default): cursor to end of line. Mode 1: start of
/// line to cursor (inclusive). Mode 2: entire line.
pub fn erase_line(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let mode = params.extract_nth_opt(0).unwrap_or(0);
    let cols = processor.ofs_buf.window_size.col_width.as_usize();
    let cy = processor.ofs_buf.my_pos.row_index.as_usize();
    let cx = processor.ofs_buf.my_pos.col_index.as_usize();

    let Some(line) = processor.ofs_buf.buffer.get_mut(cy) else { return };
    match mode {
        0 => line[cx.min(cols)..].fill(PixelChar::Spacer),
        1 => line[..=cx.min(cols.saturating_sub(1))].fill(PixelChar::Spacer),
        2 => line.fill(PixelChar::Spacer),
        _ => {}
    }
}

/// CSI P (DCH): delete `max(1, p1)` characters at the cursor, shifting the rest of
/// the line left and filling the vacated tail with spacers.
pub fn delete_chars(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let n = params.extract_nth_non_zero(0) as usize;
    let cols = processor.ofs_buf.window_size.col_width.as_usize();
    let cy = processor.ofs_buf.my_pos.row_index.as_usize();
    let cx = processor.ofs_buf.my_pos.col_index.as_usize();

    let Some(line) = processor.ofs_buf.buffer.get_mut(cy) else { return };
    if cx >= cols {
        return;
    }
    let n = usize::min(n, cols - cx);
    line[cx..cols].rotate_left(n);
    line[cols - n..cols].fill(PixelChar::Spacer);
}

/// CSI @ (ICH): insert `max(1, p1)` blank characters at the cursor, shifting the rest
/// of the line right and discarding anything pushed past the right margin.
pub fn insert_chars(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let n = params.extract_nth_non_zero(0) as usize;
    let cols = processor.ofs_buf.window_size.col_width.as_usize();
    let cy = processor.ofs_buf.my_pos.row_index.as_usize();
    let cx = processor.ofs_buf.my_pos.col_index.as_usize();

    let Some(line) = processor.ofs_buf.buffer.get_mut(cy) else { return };
    if cx >= cols {
        return;
    }
    let n = usize::min(n, cols - cx);
    line[cx..cols].rotate_right(n);
    line[cx..cx + n].fill(PixelChar::Spacer);
}

/// CSI X (ECH): blank `max(1, p1)` characters starting at the cursor, without
/// shifting anything else in the line.
pub fn erase_chars(processor: &mut AnsiToBufferProcessor, params: &Params) {
    let n = params.extract_nth_non_zero(0) as usize;
    let cols = processor.ofs_buf.window_size.col_width.as_usize();
    let cy = processor.ofs_buf.my_pos.row_index.as_usize();
    let cx = processor.ofs_buf.my_pos.col_index.as_usize();

    let Some(line) = processor.ofs_buf.buffer.get_mut(cy) else { return };
    let end = usize::min(cx + n, cols);
    if cx < end {
        line[cx..end].fill(PixelChar::Spacer);
    }
}
