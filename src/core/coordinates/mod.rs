// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Type-safe coordinate and dimension newtypes for the character grid.
//!
//! Everything here wraps a `u16` (a terminal is never wider or taller than that) in a
//! distinct type, so that a column can't be added to a row by accident and a width
//! can't silently stand in for an index. Two families exist:
//!
//! - Buffer-relative, 0-based: [`ColIndex`]/[`RowIndex`] (position) and
//!   [`ColWidth`]/[`RowHeight`] (extent), combined into [`Pos`] and [`Size`].
//! - Terminal-relative, 1-based: [`TermCol`]/[`TermRow`], used at the VT100 parser
//!   boundary where CUP/HVP parameters are 1-indexed by convention.
//!
//! This is a deliberately small subset of what a full bounds-checked coordinate system
//! looks like: a single [`pos_size::BoundsCheck`] trait for the one overflow check the
//! VT100 emulator actually performs (has the cursor walked off the grid), no
//! `ArrayBoundsCheck`/`RangeBoundsCheck` trait hierarchy, no `NonZeroU16`-backed terminal
//! units.

pub mod ch_unit;
pub mod pos_size;
pub mod term_coords;

pub use ch_unit::*;
pub use pos_size::*;
pub use term_coords::*;
