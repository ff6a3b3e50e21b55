// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Compares a front/back [`OffscreenBuffer`] pair and emits the minimal escape-sequence
//! byte stream that brings the physical terminal in sync with the back buffer.
//!
//! Four passes per [`diff`] call: dirty detection (which cells differ, and how those
//! differences cluster per row), per-row mode decision (emit only the dirty runs, or
//! the whole row), emission (cursor positioning + SGR sub-runs + UTF-8 bytes), and
//! bookkeeping (mark emitted cells clean, accumulate [`FrameMetrics`]).

use crate::{OffscreenBuffer, TuiStyle,
            core::pty_mux::ansi_parser::{CsiSequence, PrivateModeType, SgrCode,
                                          sgr_codes_for_style}};

/// How the diff engine decides which parts of a dirty row to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffMode {
    /// Always emit only the dirty runs: minimum bytes, most cursor-position overhead.
    Cell,
    /// Always emit the full row: predictable, large-change-friendly.
    Line,
    /// Per row: full row if coverage exceeds 60% or the row has more than 5 dirty
    /// segments, runs otherwise. The default.
    #[default]
    Smart,
}

/// Above this fraction of a row's width being dirty, [`DiffMode::Smart`] re-emits the
/// whole row instead of individual runs.
const SMART_COVERAGE_THRESHOLD: f64 = 0.60;

/// Above this many dirty segments in a row, [`DiffMode::Smart`] re-emits the whole row
/// instead of individual runs, regardless of coverage.
const SMART_SEGMENT_THRESHOLD: usize = 5;

/// Per-frame rendering statistics, recorded whether or not anything was dirty.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameMetrics {
    pub dirty_cells_marked: usize,
    pub cells_actually_rendered: usize,
    pub characters_changed: usize,
    pub bytes_written: usize,
    pub efficiency_ratio: f64,
    /// True iff `dirty_cells_marked == 0` — nothing needed to change this frame.
    pub is_static_frame: bool,
}

/// Compares `back` against `front`, returns the escape-sequence bytes that repaint the
/// difference, and mutates `front` so the emitted cells now match `back` (Pass 4's
/// bookkeeping). Cells never compared dirty are left untouched in `front`.
#[must_use]
pub fn diff(front: &mut OffscreenBuffer, back: &OffscreenBuffer, mode: DiffMode) -> (Vec<u8>, FrameMetrics) {
    let width = back.window_size.col_width.as_usize();
    let height = back.window_size.row_height.as_usize();

    // Pass 1: dirty detection.
    let mut dirty_mask = vec![vec![false; width]; height];
    let mut row_dirty = vec![0usize; height];
    let mut row_segments = vec![0usize; height];
    let mut total_dirty = 0usize;

    for y in 0..height {
        let mut in_run = false;
        for x in 0..width {
            let is_dirty = front.get(x, y) != back.get(x, y);
            dirty_mask[y][x] = is_dirty;
            if is_dirty {
                row_dirty[y] += 1;
                total_dirty += 1;
                if !in_run {
                    row_segments[y] += 1;
                }
                in_run = true;
            } else {
                in_run = false;
            }
        }
    }

    if total_dirty == 0 {
        return (Vec::new(), FrameMetrics { is_static_frame: true, ..Default::default() });
    }

    let mut out = String::new();
    out.push_str(&CsiSequence::EnablePrivateMode(PrivateModeType::SynchronizedOutput).to_string());

    let mut cells_actually_rendered = 0usize;
    let mut characters_changed = 0usize;

    for y in 0..height {
        if row_dirty[y] == 0 {
            continue;
        }

        // Pass 2: mode decision per row.
        let emit_full_row = match mode {
            DiffMode::Cell => false,
            DiffMode::Line => true,
            DiffMode::Smart => {
                let coverage = row_dirty[y] as f64 / width as f64;
                coverage > SMART_COVERAGE_THRESHOLD || row_segments[y] > SMART_SEGMENT_THRESHOLD
            }
        };

        // Pass 3: emission.
        if emit_full_row {
            emit_run(&mut out, back, y, 0, width - 1, &mut cells_actually_rendered, &mut characters_changed);
            for x in 0..width {
                mark_clean(front, back, x, y);
            }
        } else {
            let mut x = 0;
            while x < width {
                if !dirty_mask[y][x] {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < width && dirty_mask[y][x] {
                    x += 1;
                }
                let end = x - 1;
                emit_run(&mut out, back, y, start, end, &mut cells_actually_rendered, &mut characters_changed);
                for cx in start..=end {
                    mark_clean(front, back, cx, y);
                }
            }
        }
    }

    out.push_str(&CsiSequence::DisablePrivateMode(PrivateModeType::SynchronizedOutput).to_string());

    let bytes = out.into_bytes();
    let bytes_written = bytes.len();
    // Pass 4: bookkeeping.
    let efficiency_ratio = (total_dirty as f64 / cells_actually_rendered.max(1) as f64).min(1.0);

    let metrics = FrameMetrics {
        dirty_cells_marked: total_dirty,
        cells_actually_rendered,
        characters_changed,
        bytes_written,
        efficiency_ratio,
        is_static_frame: false,
    };

    (bytes, metrics)
}

/// Emits one dirty run `[x0..=x1]` on row `y`: a cursor-position sequence, then the
/// run's cells, starting a new SGR sub-run whenever the style changes.
fn emit_run(
    out: &mut String,
    back: &OffscreenBuffer,
    y: usize,
    x0: usize,
    x1: usize,
    cells_actually_rendered: &mut usize,
    characters_changed: &mut usize,
) {
    out.push_str(&CsiSequence::CursorPosition { row: (y + 1) as u16, col: (x0 + 1) as u16 }.to_string());

    let mut current_style: Option<TuiStyle> = None;
    for x in x0..=x1 {
        let cell = back.get(x, y).copied().unwrap_or_default();
        let style = cell.style();
        if current_style != Some(style) {
            out.push_str(&SgrCode::Reset.to_string());
            for code in sgr_codes_for_style(&style) {
                out.push_str(&code.to_string());
            }
            current_style = Some(style);
        }
        out.push(cell.display_char());
        *cells_actually_rendered += 1;
        *characters_changed += 1;
    }
}

/// Copies `back[x,y]` into `front[x,y]` — the cell was just emitted, so front now
/// matches what the terminal displays.
fn mark_clean(front: &mut OffscreenBuffer, back: &OffscreenBuffer, x: usize, y: usize) {
    let Some(cell) = back.get(x, y).copied() else { return };
    if let Some(target) = front.buffer.get_mut(y).and_then(|row| row.get_mut(x)) {
        *target = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{height, width, TuiColor, ANSIBasicColor};

    fn buf(w: usize, h: usize) -> OffscreenBuffer { OffscreenBuffer::new_empty(width(w as u16) + height(h as u16)) }

    #[test]
    fn identical_buffers_produce_zero_bytes_and_static_frame() {
        let front = buf(10, 5);
        let back = buf(10, 5);
        let mut front = front;
        let (bytes, metrics) = diff(&mut front, &back, DiffMode::Smart);
        assert!(bytes.is_empty());
        assert!(metrics.is_static_frame);
        assert_eq!(metrics.dirty_cells_marked, 0);
    }

    #[test]
    fn single_cell_change_is_emitted_and_marks_front_clean() {
        let mut front = buf(10, 5);
        let mut back = buf(10, 5);
        back.set(3, 2, 'x', TuiStyle::default());

        let (bytes, metrics) = diff(&mut front, &back, DiffMode::Smart);
        assert!(!bytes.is_empty());
        assert_eq!(metrics.dirty_cells_marked, 1);
        assert_eq!(metrics.cells_actually_rendered, 1);
        assert_eq!(front.get(3, 2), back.get(3, 2));

        // A second diff against the now-synced front is static.
        let (bytes2, metrics2) = diff(&mut front, &back, DiffMode::Smart);
        assert!(bytes2.is_empty());
        assert!(metrics2.is_static_frame);
    }

    #[test]
    fn smart_mode_emits_full_row_above_coverage_threshold() {
        let mut front = buf(10, 1);
        let mut back = buf(10, 1);
        // 8 of 10 cells dirty == 80% coverage, single contiguous run.
        for x in 0..8 {
            back.set(x, 0, 'a', TuiStyle::default());
        }
        let (_, metrics) = diff(&mut front, &back, DiffMode::Smart);
        // Full-row emission renders all 10 cells, not just the 8 dirty ones.
        assert_eq!(metrics.cells_actually_rendered, 10);
        assert_eq!(metrics.dirty_cells_marked, 8);
    }

    #[test]
    fn smart_mode_emits_runs_below_coverage_and_segment_thresholds() {
        let mut front = buf(20, 1);
        let mut back = buf(20, 1);
        // 4 isolated single-cell segments: well under 60% coverage and <=5 segments.
        for x in [0usize, 5, 10, 15] {
            back.set(x, 0, 'a', TuiStyle::default());
        }
        let (_, metrics) = diff(&mut front, &back, DiffMode::Smart);
        assert_eq!(metrics.cells_actually_rendered, 4);
        assert_eq!(metrics.dirty_cells_marked, 4);
    }

    #[test]
    fn cell_mode_never_emits_full_row() {
        let mut front = buf(10, 1);
        let mut back = buf(10, 1);
        for x in 0..10 {
            back.set(x, 0, 'a', TuiStyle::default());
        }
        let (_, metrics) = diff(&mut front, &back, DiffMode::Cell);
        assert_eq!(metrics.cells_actually_rendered, 10);
    }

    #[test]
    fn setting_identical_styled_char_does_not_mark_dirty() {
        let style = TuiStyle { color_fg: Some(TuiColor::Basic(ANSIBasicColor::Red)), ..Default::default() };
        let mut front = buf(3, 3);
        front.set(1, 1, 'z', style);
        let mut back = buf(3, 3);
        back.set(1, 1, 'z', style);

        let (bytes, metrics) = diff(&mut front, &back, DiffMode::Smart);
        assert!(bytes.is_empty());
        assert!(metrics.is_static_frame);
    }

    #[test]
    fn efficiency_ratio_is_high_for_small_contiguous_changes() {
        let mut front = buf(20, 3);
        let mut back = buf(20, 3);
        back.set(5, 1, 'a', TuiStyle::default());
        back.set(6, 1, 'b', TuiStyle::default());
        let (_, metrics) = diff(&mut front, &back, DiffMode::Smart);
        assert!(metrics.efficiency_ratio >= 0.5);
    }
}
