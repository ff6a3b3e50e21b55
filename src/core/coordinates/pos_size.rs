// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Buffer-relative position and size types, all 0-based.
//!
//! [`Pos`] is a `(col_index, row_index)` pair built by adding a [`RowIndex`] and a
//! [`ColIndex`] together (`row(3) + col(5)`). [`Size`] is a `(col_width, row_height)`
//! pair built the same way (`width(80) + height(24)`). This mirrors how call sites read:
//! the grid is "3 rows down, 5 columns across", addressed as `row + col`.

use super::{ChUnit, ch};
use std::ops::Add;

macro_rules! newtype_ch_unit {
    ($name:ident, $ctor:ident) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
        pub struct $name(pub ChUnit);

        #[must_use]
        pub fn $ctor(value: impl Into<ChUnit>) -> $name { $name(value.into()) }

        impl $name {
            #[must_use]
            pub fn new(value: impl Into<ChUnit>) -> Self { Self(value.into()) }

            #[must_use]
            pub fn as_usize(&self) -> usize { self.0.as_usize() }

            #[must_use]
            pub fn as_u16(&self) -> u16 { self.0.as_u16() }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self { Self(ChUnit::from(value)) }
        }

        impl From<u16> for $name {
            fn from(value: u16) -> Self { Self(ChUnit::from(value)) }
        }

        impl std::ops::Deref for $name {
            type Target = ChUnit;
            fn deref(&self) -> &Self::Target { &self.0 }
        }
    };
}

newtype_ch_unit!(Index, index);
newtype_ch_unit!(Length, len);
newtype_ch_unit!(ColIndex, col);
newtype_ch_unit!(RowIndex, row);
newtype_ch_unit!(ColWidth, width);
newtype_ch_unit!(RowHeight, height);

impl ColIndex {
    #[must_use]
    pub fn convert_to_index(&self) -> Index { Index(self.0) }

    #[must_use]
    pub fn convert_to_length(&self) -> ColWidth { ColWidth(self.0 + ch(1)) }
}

impl RowIndex {
    #[must_use]
    pub fn convert_to_index(&self) -> Index { Index(self.0) }

    #[must_use]
    pub fn convert_to_length(&self) -> RowHeight { RowHeight(self.0 + ch(1)) }
}

impl ColWidth {
    /// The largest valid [`ColIndex`] for a buffer of this width (`width - 1`).
    #[must_use]
    pub fn convert_to_index(&self) -> ColIndex { ColIndex(if self.0.as_usize() == 0 { self.0 } else { self.0 - ch(1) }) }

    /// Alias of [`Self::convert_to_index`] for call sites that spell out the axis.
    #[must_use]
    pub fn convert_to_col_index(&self) -> ColIndex { self.convert_to_index() }
}

impl RowHeight {
    /// The largest valid [`RowIndex`] for a buffer of this height (`height - 1`).
    #[must_use]
    pub fn convert_to_index(&self) -> RowIndex { RowIndex(if self.0.as_usize() == 0 { self.0 } else { self.0 - ch(1) }) }

    /// Alias of [`Self::convert_to_index`] for call sites that spell out the axis.
    #[must_use]
    pub fn convert_to_row_index(&self) -> RowIndex { self.convert_to_index() }
}

/// Whether a grid coordinate still addresses a valid cell against some extent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BoundsStatus {
    Within,
    Overflowed,
}

/// Checks whether an index has walked past the end of its axis.
pub trait BoundsCheck<Extent> {
    #[must_use]
    fn check_overflows(&self, max: Extent) -> BoundsStatus;
}

impl BoundsCheck<ColWidth> for ColIndex {
    fn check_overflows(&self, max: ColWidth) -> BoundsStatus {
        if self.as_usize() < max.as_usize() { BoundsStatus::Within } else { BoundsStatus::Overflowed }
    }
}

impl BoundsCheck<RowHeight> for RowIndex {
    fn check_overflows(&self, max: RowHeight) -> BoundsStatus {
        if self.as_usize() < max.as_usize() { BoundsStatus::Within } else { BoundsStatus::Overflowed }
    }
}

impl Add<Length> for ColIndex {
    type Output = ColIndex;
    fn add(self, rhs: Length) -> Self::Output { ColIndex(self.0 + rhs.0) }
}

impl std::ops::Sub<Length> for ColIndex {
    type Output = ColIndex;
    fn sub(self, rhs: Length) -> Self::Output { ColIndex(self.0 - rhs.0) }
}

impl Add<ColWidth> for ColIndex {
    type Output = ColIndex;
    fn add(self, rhs: ColWidth) -> Self::Output { ColIndex(self.0 + rhs.0) }
}

impl Add<RowHeight> for RowIndex {
    type Output = RowIndex;
    fn add(self, rhs: RowHeight) -> Self::Output { RowIndex(self.0 + rhs.0) }
}

impl std::ops::Sub<RowHeight> for RowIndex {
    type Output = RowIndex;
    fn sub(self, rhs: RowHeight) -> Self::Output { RowIndex(self.0 - rhs.0) }
}

impl std::ops::Sub for ColIndex {
    type Output = Length;
    fn sub(self, rhs: ColIndex) -> Self::Output { Length(self.0 - rhs.0) }
}

impl std::ops::Sub for RowIndex {
    type Output = Length;
    fn sub(self, rhs: RowIndex) -> Self::Output { Length(self.0 - rhs.0) }
}

/// A cell address on the character grid: `row(3) + col(5)` reads top-to-bottom,
/// left-to-right, matching how a human would describe the position.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct Pos {
    pub col_index: ColIndex,
    pub row_index: RowIndex,
}

impl Add<ColIndex> for RowIndex {
    type Output = Pos;
    fn add(self, rhs: ColIndex) -> Self::Output {
        Pos { col_index: rhs, row_index: self }
    }
}

impl Add<RowIndex> for ColIndex {
    type Output = Pos;
    fn add(self, rhs: RowIndex) -> Self::Output {
        Pos { col_index: self, row_index: rhs }
    }
}

impl Pos {
    #[must_use]
    pub fn new(row_index: RowIndex, col_index: ColIndex) -> Self { Self { row_index, col_index } }
}

/// The extent of a grid: `width(80) + height(24)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct Size {
    pub col_width: ColWidth,
    pub row_height: RowHeight,
}

impl Add<RowHeight> for ColWidth {
    type Output = Size;
    fn add(self, rhs: RowHeight) -> Self::Output {
        Size { col_width: self, row_height: rhs }
    }
}

impl Add<ColWidth> for RowHeight {
    type Output = Size;
    fn add(self, rhs: ColWidth) -> Self::Output {
        Size { col_width: rhs, row_height: self }
    }
}

impl Size {
    #[must_use]
    pub fn new(col_width: ColWidth, row_height: RowHeight) -> Self { Self { col_width, row_height } }

    /// Whether `pos` addresses a cell inside this extent.
    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.col_index.as_usize() < self.col_width.as_usize()
            && pos.row_index.as_usize() < self.row_height.as_usize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_from_row_plus_col() {
        let p = row(3) + col(5);
        assert_eq!(p.row_index, row(3));
        assert_eq!(p.col_index, col(5));
    }

    #[test]
    fn size_from_width_plus_height() {
        let s = width(80) + height(24);
        assert_eq!(s.col_width, width(80));
        assert_eq!(s.row_height, height(24));
    }

    #[test]
    fn size_contains_checks_bounds() {
        let s = width(10) + height(5);
        assert!(s.contains(row(4) + col(9)));
        assert!(!s.contains(row(5) + col(0)));
        assert!(!s.contains(row(0) + col(10)));
    }

    #[test]
    fn width_convert_to_index_is_last_valid_column() {
        assert_eq!(width(80).convert_to_index(), col(79));
    }

    #[test]
    fn check_overflows_detects_walking_off_the_grid() {
        assert_eq!(col(9).check_overflows(width(10)), BoundsStatus::Within);
        assert_eq!(col(10).check_overflows(width(10)), BoundsStatus::Overflowed);
        assert_eq!(row(0).check_overflows(height(5)), BoundsStatus::Within);
        assert_eq!(row(5).check_overflows(height(5)), BoundsStatus::Overflowed);
    }
}
