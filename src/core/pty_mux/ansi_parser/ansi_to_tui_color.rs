// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! ANSI color code to `TuiColor` conversion utility.

use crate::{ANSIBasicColor, TuiColor};

/// Convert an SGR foreground/background color code to `TuiColor`.
///
/// Supports standard (30-37, 40-47) and bright (90-97, 100-107) colors. Returns `None`
/// for any other parameter, which isn't itself an SGR color-selection code (callers
/// only invoke this on parameters already known to fall in one of the four ranges
/// above, so the `None` arm is unreachable in practice; it exists so this function
/// stays total rather than panicking on a future caller that isn't as careful).
pub(super) fn ansi_to_tui_color(ansi_code: i64) -> Option<TuiColor> {
    match ansi_code {
        // Standard colors (30-37, 40-47).
        30 | 40 => Some(TuiColor::Basic(ANSIBasicColor::Black)),
        31 | 41 => Some(TuiColor::Basic(ANSIBasicColor::DarkRed)),
        32 | 42 => Some(TuiColor::Basic(ANSIBasicColor::DarkGreen)),
        33 | 43 => Some(TuiColor::Basic(ANSIBasicColor::DarkYellow)),
        34 | 44 => Some(TuiColor::Basic(ANSIBasicColor::DarkBlue)),
        35 | 45 => Some(TuiColor::Basic(ANSIBasicColor::DarkMagenta)),
        36 | 46 => Some(TuiColor::Basic(ANSIBasicColor::DarkCyan)),
        37 | 47 => Some(TuiColor::Basic(ANSIBasicColor::Gray)),

        // Bright colors (90-97, 100-107).
        90 | 100 => Some(TuiColor::Basic(ANSIBasicColor::DarkGray)),
        91 | 101 => Some(TuiColor::Basic(ANSIBasicColor::Red)),
        92 | 102 => Some(TuiColor::Basic(ANSIBasicColor::Green)),
        93 | 103 => Some(TuiColor::Basic(ANSIBasicColor::Yellow)),
        94 | 104 => Some(TuiColor::Basic(ANSIBasicColor::Blue)),
        95 | 105 => Some(TuiColor::Basic(ANSIBasicColor::Magenta)),
        96 | 106 => Some(TuiColor::Basic(ANSIBasicColor::Cyan)),
        97 | 107 => Some(TuiColor::Basic(ANSIBasicColor::White)),

        _ => None,
    }
}

/// Convert a 256-color palette index (the `n` in `38;5;n` / `48;5;n`) to `TuiColor`.
pub(super) fn ansi_256_to_tui_color(index: u8) -> TuiColor {
    TuiColor::Ansi(crate::AnsiValue::new(index))
}

/// Convert a 24-bit RGB triple (the `r;g;b` in `38;2;r;g;b` / `48;2;r;g;b`) to
/// `TuiColor`.
pub(super) fn rgb_to_tui_color(red: u8, green: u8, blue: u8) -> TuiColor {
    TuiColor::Rgb(crate::RgbValue::from_u8(red, green, blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::too_many_lines)]
    fn test_ansi_to_tui_color() {
        // Note: Codes 0-7 are SGR attributes (bold, underline, etc), not colors
        // They should not map to colors
        assert_eq!(ansi_to_tui_color(0), None);
        assert_eq!(ansi_to_tui_color(1), None);
        assert_eq!(ansi_to_tui_color(2), None);
        assert_eq!(ansi_to_tui_color(3), None);
        assert_eq!(ansi_to_tui_color(4), None);
        assert_eq!(ansi_to_tui_color(5), None);
        assert_eq!(ansi_to_tui_color(6), None);
        assert_eq!(ansi_to_tui_color(7), None);

        // Standard foreground colors (30-37)
        assert_eq!(
            ansi_to_tui_color(30),
            Some(TuiColor::Basic(ANSIBasicColor::Black))
        );
        assert_eq!(
            ansi_to_tui_color(31),
            Some(TuiColor::Basic(ANSIBasicColor::DarkRed))
        );
        assert_eq!(
            ansi_to_tui_color(32),
            Some(TuiColor::Basic(ANSIBasicColor::DarkGreen))
        );
        assert_eq!(
            ansi_to_tui_color(33),
            Some(TuiColor::Basic(ANSIBasicColor::DarkYellow))
        );
        assert_eq!(
            ansi_to_tui_color(34),
            Some(TuiColor::Basic(ANSIBasicColor::DarkBlue))
        );
        assert_eq!(
            ansi_to_tui_color(35),
            Some(TuiColor::Basic(ANSIBasicColor::DarkMagenta))
        );
        assert_eq!(
            ansi_to_tui_color(36),
            Some(TuiColor::Basic(ANSIBasicColor::DarkCyan))
        );
        assert_eq!(
            ansi_to_tui_color(37),
            Some(TuiColor::Basic(ANSIBasicColor::Gray))
        );

        // Standard background colors (40-47)
        assert_eq!(
            ansi_to_tui_color(40),
            Some(TuiColor::Basic(ANSIBasicColor::Black))
        );
        assert_eq!(
            ansi_to_tui_color(41),
            Some(TuiColor::Basic(ANSIBasicColor::DarkRed))
        );
        assert_eq!(
            ansi_to_tui_color(42),
            Some(TuiColor::Basic(ANSIBasicColor::DarkGreen))
        );
        assert_eq!(
            ansi_to_tui_color(43),
            Some(TuiColor::Basic(ANSIBasicColor::DarkYellow))
        );
        assert_eq!(
            ansi_to_tui_color(44),
            Some(TuiColor::Basic(ANSIBasicColor::DarkBlue))
        );
        assert_eq!(
            ansi_to_tui_color(45),
            Some(TuiColor::Basic(ANSIBasicColor::DarkMagenta))
        );
        assert_eq!(
            ansi_to_tui_color(46),
            Some(TuiColor::Basic(ANSIBasicColor::DarkCyan))
        );
        assert_eq!(
            ansi_to_tui_color(47),
            Some(TuiColor::Basic(ANSIBasicColor::Gray))
        );

        // Bright foreground colors (90-97)
        // Note the proper gradation: Black (30) < DarkGray (90) < Gray (37) < White (97)
        assert_eq!(
            ansi_to_tui_color(90),
            Some(TuiColor::Basic(ANSIBasicColor::DarkGray))
        );
        assert_eq!(
            ansi_to_tui_color(91),
            Some(TuiColor::Basic(ANSIBasicColor::Red))
        );
        assert_eq!(
            ansi_to_tui_color(92),
            Some(TuiColor::Basic(ANSIBasicColor::Green))
        );
        assert_eq!(
            ansi_to_tui_color(93),
            Some(TuiColor::Basic(ANSIBasicColor::Yellow))
        );
        assert_eq!(
            ansi_to_tui_color(94),
            Some(TuiColor::Basic(ANSIBasicColor::Blue))
        );
        assert_eq!(
            ansi_to_tui_color(95),
            Some(TuiColor::Basic(ANSIBasicColor::Magenta))
        );
        assert_eq!(
            ansi_to_tui_color(96),
            Some(TuiColor::Basic(ANSIBasicColor::Cyan))
        );
        assert_eq!(
            ansi_to_tui_color(97),
            Some(TuiColor::Basic(ANSIBasicColor::White))
        );

        // Bright background colors (100-107)
        assert_eq!(
            ansi_to_tui_color(100),
            Some(TuiColor::Basic(ANSIBasicColor::DarkGray))
        );
        assert_eq!(
            ansi_to_tui_color(101),
            Some(TuiColor::Basic(ANSIBasicColor::Red))
        );
        assert_eq!(
            ansi_to_tui_color(102),
            Some(TuiColor::Basic(ANSIBasicColor::Green))
        );
        assert_eq!(
            ansi_to_tui_color(103),
            Some(TuiColor::Basic(ANSIBasicColor::Yellow))
        );
        assert_eq!(
            ansi_to_tui_color(104),
            Some(TuiColor::Basic(ANSIBasicColor::Blue))
        );
        assert_eq!(
            ansi_to_tui_color(105),
            Some(TuiColor::Basic(ANSIBasicColor::Magenta))
        );
        assert_eq!(
            ansi_to_tui_color(106),
            Some(TuiColor::Basic(ANSIBasicColor::Cyan))
        );
        assert_eq!(
            ansi_to_tui_color(107),
            Some(TuiColor::Basic(ANSIBasicColor::White))
        );

        // Edge cases and invalid codes
        assert_eq!(ansi_to_tui_color(-1), None);
        assert_eq!(ansi_to_tui_color(8), None);
        assert_eq!(ansi_to_tui_color(29), None);
        assert_eq!(ansi_to_tui_color(38), None);
        assert_eq!(ansi_to_tui_color(39), None);
        assert_eq!(ansi_to_tui_color(48), None);
        assert_eq!(ansi_to_tui_color(49), None);
        assert_eq!(ansi_to_tui_color(89), None);
        assert_eq!(ansi_to_tui_color(98), None);
        assert_eq!(ansi_to_tui_color(99), None);
        assert_eq!(ansi_to_tui_color(108), None);
        assert_eq!(ansi_to_tui_color(999), None);
    }
}
