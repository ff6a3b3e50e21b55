// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! 1-based terminal coordinates, as used by CSI/ESC sequence parameters (`ESC[5;10H`
//! means row 5, column 10, top-left is `(1, 1)`). Buffer coordinates ([`RowIndex`],
//! [`ColIndex`]) are 0-based; these types exist so the parser boundary can't confuse
//! the two without a type error.

use super::{ColIndex, RowIndex};
use std::fmt::Display;

#[must_use]
pub fn term_row(arg: impl Into<TermRow>) -> TermRow { arg.into() }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermRow(pub u16);

impl TermRow {
    #[must_use]
    pub const fn new(value: u16) -> Self { Self(value) }

    #[must_use]
    pub const fn as_u16(self) -> u16 { self.0 }

    #[must_use]
    pub fn from_zero_based(row: RowIndex) -> Self { Self(row.as_u16() + 1) }

    /// `None` if the value is 0, which is never a valid 1-based terminal coordinate.
    #[must_use]
    pub fn to_zero_based(self) -> Option<RowIndex> {
        self.0.checked_sub(1).map(RowIndex::from)
    }
}

impl Display for TermRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[must_use]
pub fn term_col(arg: impl Into<TermCol>) -> TermCol { arg.into() }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermCol(pub u16);

impl TermCol {
    #[must_use]
    pub const fn new(value: u16) -> Self { Self(value) }

    #[must_use]
    pub const fn as_u16(self) -> u16 { self.0 }

    #[must_use]
    pub fn from_zero_based(col: ColIndex) -> Self { Self(col.as_u16() + 1) }

    #[must_use]
    pub fn to_zero_based(self) -> Option<ColIndex> {
        self.0.checked_sub(1).map(ColIndex::from)
    }
}

impl Display for TermCol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for TermRow {
    fn from(value: i32) -> Self { Self::new(u16::try_from(value.max(0)).unwrap_or(u16::MAX)) }
}

impl From<i32> for TermCol {
    fn from(value: i32) -> Self { Self::new(u16::try_from(value.max(0)).unwrap_or(u16::MAX)) }
}

impl From<u16> for TermRow {
    fn from(value: u16) -> Self { Self::new(value) }
}

impl From<u16> for TermCol {
    fn from(value: u16) -> Self { Self::new(value) }
}

/// `TermRow`/`TermCol` default to 1 (a param of 0 in a CSI sequence means "default",
/// which for cursor-movement sequences is always 1).
impl Default for TermRow {
    fn default() -> Self { Self(1) }
}

impl Default for TermCol {
    fn default() -> Self { Self(1) }
}

impl From<RowIndex> for TermRow {
    fn from(value: RowIndex) -> Self { Self::from_zero_based(value) }
}

impl From<ColIndex> for TermCol {
    fn from(value: ColIndex) -> Self { Self::from_zero_based(value) }
}

/// A cursor address in 1-based terminal coordinates, as sent in a CUP/HVP parameter
/// pair (`ESC[row;colH`). Built the same way as [`super::Pos`]: `term_row(5) +
/// term_col(10)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermPos {
    pub row: TermRow,
    pub col: TermCol,
}

impl std::ops::Add<TermCol> for TermRow {
    type Output = TermPos;
    fn add(self, rhs: TermCol) -> Self::Output { TermPos { row: self, col: rhs } }
}

impl std::ops::Add<TermRow> for TermCol {
    type Output = TermPos;
    fn add(self, rhs: TermRow) -> Self::Output { TermPos { row: rhs, col: self } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinates::{col, row};

    #[test]
    fn round_trips_through_zero_based() {
        let buffer_row = row(4);
        let t = TermRow::from_zero_based(buffer_row);
        assert_eq!(t.as_u16(), 5);
        assert_eq!(t.to_zero_based(), Some(buffer_row));
    }

    #[test]
    fn zero_is_invalid_terminal_coordinate() {
        assert_eq!(term_row(0).to_zero_based(), None);
        assert_eq!(term_col(0).to_zero_based(), None);
    }

    #[test]
    fn param_zero_defaults_to_one() {
        assert_eq!(TermRow::default().as_u16(), 1);
        assert_eq!(TermCol::default(), term_col(1));
    }

    #[test]
    fn col_round_trips() {
        let buffer_col = col(9);
        let t = TermCol::from_zero_based(buffer_col);
        assert_eq!(t.as_u16(), 10);
        assert_eq!(t.to_zero_based(), Some(buffer_col));
    }
}
