// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`ChUnit`] is the foundation primitive every coordinate and dimension type in this
//! module is built from: a "character unit", i.e. one terminal cell.

use std::ops::{Add, AddAssign, Deref, DerefMut, Mul, Sub, SubAssign};

/// A single character-cell count or offset. Saturates at 0 on underflow; this crate
/// never needs negative positions, and a bug that would underflow one is better
/// clamped than wrapped to 65535.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct ChUnit(pub u16);

#[must_use]
pub fn ch(arg_value: impl Into<ChUnit>) -> ChUnit { arg_value.into() }

impl ChUnit {
    #[must_use]
    pub fn new(value: u16) -> Self { Self(value) }

    #[must_use]
    pub fn as_usize(&self) -> usize { self.0 as usize }

    #[must_use]
    pub fn as_u16(&self) -> u16 { self.0 }
}

impl Deref for ChUnit {
    type Target = u16;
    fn deref(&self) -> &Self::Target { &self.0 }
}

impl DerefMut for ChUnit {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl From<u16> for ChUnit {
    fn from(value: u16) -> Self { Self(value) }
}

impl From<usize> for ChUnit {
    fn from(value: usize) -> Self { Self(u16::try_from(value).unwrap_or(u16::MAX)) }
}

impl From<i32> for ChUnit {
    fn from(value: i32) -> Self { Self(u16::try_from(value.max(0)).unwrap_or(u16::MAX)) }
}

impl From<ChUnit> for usize {
    fn from(value: ChUnit) -> Self { value.0 as usize }
}

impl From<ChUnit> for u16 {
    fn from(value: ChUnit) -> Self { value.0 }
}

impl Add for ChUnit {
    type Output = ChUnit;
    fn add(self, rhs: Self) -> Self::Output { Self(self.0.saturating_add(rhs.0)) }
}

impl AddAssign for ChUnit {
    fn add_assign(&mut self, rhs: Self) { self.0 = self.0.saturating_add(rhs.0); }
}

impl Sub for ChUnit {
    type Output = ChUnit;
    fn sub(self, rhs: Self) -> Self::Output { Self(self.0.saturating_sub(rhs.0)) }
}

impl SubAssign for ChUnit {
    fn sub_assign(&mut self, rhs: Self) { self.0 = self.0.saturating_sub(rhs.0); }
}

impl Mul for ChUnit {
    type Output = ChUnit;
    fn mul(self, rhs: Self) -> Self::Output { Self(self.0.saturating_mul(rhs.0)) }
}

impl Add<i32> for ChUnit {
    type Output = ChUnit;
    fn add(self, rhs: i32) -> Self::Output {
        if rhs < 0 {
            self - ch((-rhs) as u16)
        } else {
            self + ch(rhs as u16)
        }
    }
}

impl Sub<i32> for ChUnit {
    type Output = ChUnit;
    fn sub(self, rhs: i32) -> Self::Output {
        if rhs < 0 {
            self + ch((-rhs) as u16)
        } else {
            self - ch(rhs as u16)
        }
    }
}
