// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mode setting operations (SM/RM), including DEC private modes for cursor-key
//! encoding, cursor visibility, mouse tracking, and the alternate screen buffer.

use vte::Params;

use crate::ansi_parser_perform_impl::param_utils::extract_nth_optional_param;
use crate::{AltScreenState, MouseMode, PixelChar};

use super::super::super::{ansi_parser_public_api::AnsiToBufferProcessor, csi_codes::PrivateModeType};

/// Maps a mouse-tracking private mode to the `MouseMode` it activates, or `None` if
/// `mode` isn't one of the mouse-tracking modes.
fn mode_to_mouse_mode(mode: PrivateModeType) -> Option<MouseMode> {
    match mode {
        PrivateModeType::MouseTrackingNormal => Some(MouseMode::Normal),
        PrivateModeType::MouseTrackingButtonEvent => Some(MouseMode::ButtonEvent),
        PrivateModeType::MouseTrackingAnyEvent => Some(MouseMode::AnyEvent),
        _ => None,
    }
}

/// Swap the visible screen into the alternate-screen buffer, clearing the visible
/// screen. `save_cursor` additionally stashes the cursor position (mode 1049).
fn enter_alt_screen(processor: &mut AnsiToBufferProcessor, save_cursor: bool) {
    if processor.ofs_buf.ansi_parser_support.alt_screen.is_some() {
        return;
    }
    let saved_buffer = processor.ofs_buf.buffer.clone();
    let saved_cursor = save_cursor.then_some(processor.ofs_buf.my_pos);
    processor.ofs_buf.ansi_parser_support.alt_screen = Some(AltScreenState { saved_buffer, saved_cursor });

    for line in &mut processor.ofs_buf.buffer {
        line.fill(PixelChar::Spacer);
    }
}

/// Restore the primary screen (and cursor, if it was saved) from the alternate-screen
/// buffer.
fn exit_alt_screen(processor: &mut AnsiToBufferProcessor) {
    let Some(state) = processor.ofs_buf.ansi_parser_support.alt_screen.take() else { return };
    processor.ofs_buf.buffer = state.saved_buffer;
    if let Some(saved_cursor) = state.saved_cursor {
        processor.ofs_buf.my_pos = saved_cursor;
    }
}

/// Handle Set Mode (CSI h) command.
/// Supports both standard modes and private modes (with ? prefix).
pub fn set_mode(processor: &mut AnsiToBufferProcessor, params: &Params, intermediates: &[u8]) {
    let is_private_mode = intermediates.contains(&b'?');
    if !is_private_mode {
        tracing::debug!("CSI h: Standard mode setting not implemented");
        return;
    }

    let mode_num = extract_nth_optional_param(params, 0).unwrap_or(0);
    let mode = PrivateModeType::from(mode_num);

    if let Some(mouse_mode) = mode_to_mouse_mode(mode) {
        processor.ofs_buf.ansi_parser_support.mouse_mode = mouse_mode;
        tracing::trace!("CSI ?{}h: Enabled mouse tracking mode {:?}", mode.as_u16(), mouse_mode);
        return;
    }

    match mode {
        PrivateModeType::AutoWrap => {
            processor.ofs_buf.ansi_parser_support.auto_wrap_mode = true;
            tracing::trace!("ESC[?7h: Enabled auto-wrap mode (DECAWM)");
        }
        PrivateModeType::ApplicationCursorKeys => {
            processor.ofs_buf.ansi_parser_support.application_cursor_keys = true;
        }
        PrivateModeType::ShowCursor => {
            processor.ofs_buf.ansi_parser_support.cursor_visible = true;
        }
        PrivateModeType::MouseSgrMode => {
            processor.ofs_buf.ansi_parser_support.mouse_sgr_mode = true;
        }
        PrivateModeType::AltScreenBufferLegacy | PrivateModeType::AltScreenBuffer => {
            enter_alt_screen(processor, false);
        }
        PrivateModeType::AltScreenBufferWithCursor => {
            enter_alt_screen(processor, true);
        }
        _ => tracing::debug!("CSI ?{}h: Unhandled private mode", mode.as_u16()),
    }
}

/// Handle Reset Mode (CSI l) command.
/// Supports both standard modes and private modes (with ? prefix).
pub fn reset_mode(processor: &mut AnsiToBufferProcessor, params: &Params, intermediates: &[u8]) {
    let is_private_mode = intermediates.contains(&b'?');
    if !is_private_mode {
        tracing::debug!("CSI l: Standard mode reset not implemented");
        return;
    }

    let mode_num = extract_nth_optional_param(params, 0).unwrap_or(0);
    let mode = PrivateModeType::from(mode_num);

    if let Some(mouse_mode) = mode_to_mouse_mode(mode) {
        // Most-recent-wins: only clear if this is the mode currently in effect.
        if processor.ofs_buf.ansi_parser_support.mouse_mode == mouse_mode {
            processor.ofs_buf.ansi_parser_support.mouse_mode = MouseMode::Off;
        }
        tracing::trace!("CSI ?{}l: Disabled mouse tracking mode {:?}", mode.as_u16(), mouse_mode);
        return;
    }

    match mode {
        PrivateModeType::AutoWrap => {
            processor.ofs_buf.ansi_parser_support.auto_wrap_mode = false;
            tracing::trace!("ESC[?7l: Disabled auto-wrap mode (DECAWM)");
        }
        PrivateModeType::ApplicationCursorKeys => {
            processor.ofs_buf.ansi_parser_support.application_cursor_keys = false;
        }
        PrivateModeType::ShowCursor => {
            processor.ofs_buf.ansi_parser_support.cursor_visible = false;
        }
        PrivateModeType::MouseSgrMode => {
            processor.ofs_buf.ansi_parser_support.mouse_sgr_mode = false;
        }
        PrivateModeType::AltScreenBufferLegacy
        | PrivateModeType::AltScreenBuffer
        | PrivateModeType::AltScreenBufferWithCursor => {
            exit_alt_screen(processor);
        }
        _ => tracing::debug!("CSI ?{}l: Unhandled private mode", mode.as_u16()),
    }
}
