// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Persistent VT100 emulator state that rides along on an [`super::OffscreenBuffer`].
//!
//! Everything here survives across the many short-lived [`crate::AnsiToBufferProcessor`]
//! instances created for each batch of bytes fed through [`super::OffscreenBuffer::apply_ansi_bytes`].

use std::collections::VecDeque;

use crate::{CharacterSet, CharsetSlot, PixelChar, Pos, TermRow, TuiColor, TuiStyle, TuiStyleAttribs,
            core::osc::OscEvent};

/// Fixed capacity of the scrollback ring. Rows scrolled off the top of the primary
/// screen beyond this count are discarded (oldest first).
pub const SCROLLBACK_CAPACITY: usize = 1_000;

/// Mouse reporting mode (`CSI ? 1000/1002/1003 h/l`).
///
/// Only one mode is active at a time. Toggling between 1000/1002/1003 without first
/// disabling is ambiguous in real terminals; this emulator keeps the *most recently
/// set* mode and only clears it on a matching `l` (see the crate's design notes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseMode {
    #[default]
    Off,
    /// Mode 1000: X10/normal mouse tracking (button press/release only).
    Normal,
    /// Mode 1002: button-event tracking (press/release plus motion while a button
    /// is held).
    ButtonEvent,
    /// Mode 1003: any-event tracking (every motion event, button held or not).
    AnyEvent,
}

/// Saved primary-screen state while the alternate screen buffer is active.
#[derive(Debug, Clone)]
pub struct AltScreenState {
    pub saved_buffer: Vec<Vec<PixelChar>>,
    /// Only populated for mode 1049, which additionally saves/restores the cursor.
    pub saved_cursor: Option<Pos>,
}

/// State the VT100 emulator needs beyond the character grid itself: cursor
/// save/restore slot, current SGR style, scroll region, and the handful of DEC
/// private modes this emulator interprets.
#[derive(Debug, Clone)]
pub struct AnsiParserSupport {
    /// What `ESC ( x` has designated into the G0 slot.
    pub g0_charset: CharacterSet,
    /// What `ESC ) x` has designated into the G1 slot.
    pub g1_charset: CharacterSet,
    /// Which slot SO/SI has most recently activated; `print()` translates through
    /// this slot's charset.
    pub active_charset_slot: CharsetSlot,
    pub current_style: Option<TuiStyle>,
    pub attribs: TuiStyleAttribs,
    pub fg_color: Option<TuiColor>,
    pub bg_color: Option<TuiColor>,
    pub cursor_pos_for_esc_save_and_restore: Option<Pos>,
    pub scroll_region_top: Option<TermRow>,
    pub scroll_region_bottom: Option<TermRow>,
    pub auto_wrap_mode: bool,
    pub application_cursor_keys: bool,
    pub cursor_visible: bool,
    pub mouse_mode: MouseMode,
    pub mouse_sgr_mode: bool,
    pub alt_screen: Option<AltScreenState>,
    pub scrollback: VecDeque<Vec<PixelChar>>,
    pub pending_osc_events: Vec<OscEvent>,
}

impl Default for AnsiParserSupport {
    fn default() -> Self {
        Self {
            g0_charset: CharacterSet::default(),
            g1_charset: CharacterSet::default(),
            active_charset_slot: CharsetSlot::default(),
            current_style: None,
            attribs: TuiStyleAttribs::default(),
            fg_color: None,
            bg_color: None,
            cursor_pos_for_esc_save_and_restore: None,
            scroll_region_top: None,
            scroll_region_bottom: None,
            // DECAWM and DECTCEM both default on in a freshly reset terminal.
            auto_wrap_mode: true,
            application_cursor_keys: false,
            cursor_visible: true,
            mouse_mode: MouseMode::default(),
            mouse_sgr_mode: false,
            alt_screen: None,
            scrollback: VecDeque::new(),
            pending_osc_events: Vec::new(),
        }
    }
}

impl AnsiParserSupport {
    /// The charset `print()` should currently translate through: `g1_charset` if SO
    /// has activated G1, `g0_charset` otherwise.
    #[must_use]
    pub fn active_charset(&self) -> CharacterSet {
        match self.active_charset_slot {
            CharsetSlot::G0 => self.g0_charset,
            CharsetSlot::G1 => self.g1_charset,
        }
    }

    /// Push a row that just scrolled off the top of the primary screen into the
    /// scrollback ring, evicting the oldest row once [`SCROLLBACK_CAPACITY`] is
    /// reached.
    pub fn push_scrollback(&mut self, row: Vec<PixelChar>) {
        if self.scrollback.len() >= SCROLLBACK_CAPACITY {
            self.scrollback.pop_front();
        }
        self.scrollback.push_back(row);
    }
}
