// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Host -> PTY mouse event encoding, the xterm wire protocol a child process expects
//! when it has enabled one of the mouse-tracking private modes (1000/1002/1003).
//!
//! Two encodings are supported: the classic 3-byte X10 form (`ESC[Mb+32 c+32 r+32`,
//! suppressed above column/row 222 because a byte can't carry the offset) and the
//! SGR-extended form (`ESC[<b;c;rM` / `m`, unbounded) used when the child has also
//! enabled private mode 1006.

/// Which button a press/drag event is reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    fn base_code(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }
}

/// What happened: a button transition, a drag, bare motion, or a wheel tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press(MouseButton),
    /// Release never identifies which button went up in the wire protocol itself —
    /// xterm always reports it with the "no button" code.
    Release,
    /// Motion while `button` is held down (mode 1002 or 1003).
    Drag(MouseButton),
    /// Motion with no button held (mode 1003 only).
    Motion,
    WheelUp,
    WheelDown,
}

/// A single mouse event ready to encode for the child process. `col`/`row` are
/// 1-based terminal coordinates, matching the rest of the VT100 wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub col: u16,
    pub row: u16,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

/// Largest column/row the classic X10 encoding can carry (a byte holds `n+32`, and
/// byte values above 255 aren't valid single bytes); xterm suppresses the event
/// entirely past this bound rather than emit a corrupt coordinate.
const X10_MAX_COORD: u16 = 222;

impl MouseEvent {
    fn button_code(&self) -> u8 {
        let mut code = match self.kind {
            MouseEventKind::Press(button) | MouseEventKind::Drag(button) => button.base_code(),
            MouseEventKind::Release => 3,
            MouseEventKind::Motion => 3,
            MouseEventKind::WheelUp => 64,
            MouseEventKind::WheelDown => 65,
        };
        if matches!(self.kind, MouseEventKind::Drag(_) | MouseEventKind::Motion) {
            code += 32;
        }
        if self.shift {
            code += 4;
        }
        if self.alt {
            code += 8;
        }
        if self.ctrl {
            code += 16;
        }
        code
    }

    /// `true` for a press/drag/wheel/motion event, `false` for a release — this is
    /// the SGR encoding's trailing `M`/`m`.
    fn is_press(&self) -> bool { !matches!(self.kind, MouseEventKind::Release) }

    /// Encode per the SGR-extended protocol (`CSI < b ; c ; r M`/`m`), used when
    /// private mode 1006 is active. Unlike the X10 form, coordinates aren't bounded.
    #[must_use]
    pub fn encode_sgr(&self) -> Vec<u8> {
        let final_byte = if self.is_press() { 'M' } else { 'm' };
        format!("\x1b[<{};{};{}{}", self.button_code(), self.col, self.row, final_byte).into_bytes()
    }

    /// Encode per the classic 3-byte X10 protocol (`CSI M b+32 c+32 r+32`). Returns
    /// `None` when `col` or `row` exceeds [`X10_MAX_COORD`], matching xterm's
    /// suppression of events it can't represent in a single byte.
    #[must_use]
    pub fn encode_x10(&self) -> Option<Vec<u8>> {
        if self.col > X10_MAX_COORD || self.row > X10_MAX_COORD {
            return None;
        }
        let code = self.button_code();
        Some(vec![0x1b, b'[', b'M', code.wrapping_add(32), (self.col as u8).wrapping_add(32), (self.row as u8).wrapping_add(32)])
    }

    /// Encode using SGR if `sgr_mode` is set, otherwise the classic X10 form (which
    /// may suppress the event past column/row 222).
    #[must_use]
    pub fn encode(&self, sgr_mode: bool) -> Option<Vec<u8>> {
        if sgr_mode { Some(self.encode_sgr()) } else { self.encode_x10() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(col: u16, row: u16) -> MouseEvent {
        MouseEvent { kind: MouseEventKind::Press(MouseButton::Left), col, row, shift: false, alt: false, ctrl: false }
    }

    #[test]
    fn x10_encodes_left_click() {
        let event = click(5, 10);
        assert_eq!(event.encode_x10(), Some(vec![0x1b, b'[', b'M', 32, 37, 42]));
    }

    #[test]
    fn x10_suppresses_events_past_222() {
        let event = click(223, 10);
        assert_eq!(event.encode_x10(), None);
        let event = click(10, 223);
        assert_eq!(event.encode_x10(), None);
    }

    #[test]
    fn sgr_encodes_press_and_release() {
        let press = click(5, 10);
        assert_eq!(press.encode_sgr(), b"\x1b[<0;5;10M".to_vec());

        let release = MouseEvent { kind: MouseEventKind::Release, ..press };
        assert_eq!(release.encode_sgr(), b"\x1b[<3;5;10m".to_vec());
    }

    #[test]
    fn sgr_unbounded_past_222() {
        let event = click(300, 300);
        assert_eq!(event.encode_sgr(), b"\x1b[<0;300;300M".to_vec());
    }

    #[test]
    fn wheel_and_drag_use_xterm_button_codes() {
        let wheel_up = MouseEvent { kind: MouseEventKind::WheelUp, col: 1, row: 1, shift: false, alt: false, ctrl: false };
        assert_eq!(wheel_up.button_code(), 64);

        let drag = MouseEvent { kind: MouseEventKind::Drag(MouseButton::Right), col: 1, row: 1, shift: false, alt: false, ctrl: false };
        assert_eq!(drag.button_code(), 2 + 32);

        let motion = MouseEvent { kind: MouseEventKind::Motion, col: 1, row: 1, shift: false, alt: false, ctrl: false };
        assert_eq!(motion.button_code(), 3 + 32);
    }

    #[test]
    fn modifiers_add_to_button_code() {
        let event = MouseEvent { kind: MouseEventKind::Press(MouseButton::Left), col: 1, row: 1, shift: true, alt: true, ctrl: true };
        assert_eq!(event.button_code(), 0 + 4 + 8 + 16);
    }
}
