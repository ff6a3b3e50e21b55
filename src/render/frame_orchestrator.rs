// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Drives one display tick: walks windows bottom-to-top into a back buffer, hands the
//! result to the [`super::diff_engine`], writes the emitted bytes, and swaps front and
//! back so the next tick starts from what's actually on screen.

use std::io::Write;

use crate::{OffscreenBuffer, Pos, Size, TuiColor, TuiStyle,
            render::diff_engine::{DiffMode, FrameMetrics, diff}};

/// An absolute rectangle on the physical terminal: top-left position plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub pos: Pos,
    pub size: Size,
}

impl Rect {
    #[must_use]
    pub fn new(pos: Pos, size: Size) -> Self { Self { pos, size } }

    /// Whether `(x, y)` (buffer coordinates) falls inside this rectangle.
    #[must_use]
    pub fn covers(&self, x: usize, y: usize) -> bool {
        let x0 = self.pos.col_index.as_usize();
        let y0 = self.pos.row_index.as_usize();
        let w = self.size.col_width.as_usize();
        let h = self.size.row_height.as_usize();
        x >= x0 && x < x0 + w && y >= y0 && y < y0 + h
    }
}

/// The external contract a window (or the embedded-terminal control) implements to
/// participate in compositing. Any object with an absolute rectangle, a z-order, a
/// visibility flag, and a paint operation qualifies.
pub trait WindowSurface {
    /// The window's absolute rectangle on the physical terminal.
    fn rect(&self) -> Rect;

    /// Paint order: higher values paint later (on top). Ties keep insertion order.
    fn z_order(&self) -> i32;

    fn is_visible(&self) -> bool;

    /// Whether this window's content changed since the last frame.
    fn is_dirty(&self) -> bool;

    /// Called after a successful frame; clears whatever this window used to mark
    /// itself dirty.
    fn clear_dirty(&mut self);

    /// Write this window's cells into `buffer`, clipped to [`Self::rect`]. Errors are
    /// logged by the caller and skip only this window — they never abort the frame.
    fn paint_into(&self, buffer: &mut OffscreenBuffer, default_fg: TuiColor, default_bg: TuiColor) -> miette::Result<()>;
}

/// Drives [`WindowSurface`] painting, hands off to the dirty diff engine, and owns the
/// front/back [`OffscreenBuffer`] pair for one physical terminal.
pub struct FrameOrchestrator {
    front: OffscreenBuffer,
    back: OffscreenBuffer,
    windows: Vec<Box<dyn WindowSurface>>,
    previous_window_rects: Vec<Rect>,
    default_fg: TuiColor,
    default_bg: TuiColor,
    mode: DiffMode,
    /// Set externally (initial paint, resize, or the last window closing) to force a
    /// frame even when no individual window reports itself dirty.
    pub desktop_needs_render: bool,
}

impl FrameOrchestrator {
    #[must_use]
    pub fn new(size: Size, default_fg: TuiColor, default_bg: TuiColor, mode: DiffMode) -> Self {
        Self {
            front: OffscreenBuffer::new_empty(size),
            back: OffscreenBuffer::new_empty(size),
            windows: Vec::new(),
            previous_window_rects: Vec::new(),
            default_fg,
            default_bg,
            mode,
            desktop_needs_render: true,
        }
    }

    pub fn add_window(&mut self, window: Box<dyn WindowSurface>) { self.windows.push(window); }

    pub fn resize(&mut self, size: Size) {
        self.front.resize(size);
        self.back.resize(size);
        self.desktop_needs_render = true;
    }

    #[must_use]
    pub fn any_window_dirty(&self) -> bool { self.windows.iter().any(|w| w.is_dirty()) }

    fn desktop_cell_style(&self) -> TuiStyle {
        TuiStyle { color_fg: Some(self.default_fg), color_bg: Some(self.default_bg), ..Default::default() }
    }

    /// Reset every cell a window occupied last frame but no visible window covers this
    /// frame back to the desktop default cell.
    fn clear_vacated_area(&mut self, current_rects: &[Rect]) {
        let style = self.desktop_cell_style();
        let width = self.back.window_size.col_width.as_usize();
        let height = self.back.window_size.row_height.as_usize();

        for prev in &self.previous_window_rects {
            let x0 = prev.pos.col_index.as_usize();
            let y0 = prev.pos.row_index.as_usize();
            let w = prev.size.col_width.as_usize();
            let h = prev.size.row_height.as_usize();

            for y in y0..(y0 + h).min(height) {
                for x in x0..(x0 + w).min(width) {
                    if !current_rects.iter().any(|r| r.covers(x, y)) {
                        self.back.set(x, y, ' ', style);
                    }
                }
            }
        }
    }

    /// Runs one display tick: paint, diff, write, swap. Returns the frame's metrics.
    /// Never aborts on a paint-callback or terminal-write failure — both are logged
    /// and the frame continues with whatever it already has.
    pub fn update_display(&mut self, terminal: &mut impl Write) -> FrameMetrics {
        let should_render = self.any_window_dirty() || self.desktop_needs_render;
        if !should_render {
            return FrameMetrics { is_static_frame: true, ..Default::default() };
        }

        self.windows.sort_by_key(WindowSurface::z_order);

        let current_rects: Vec<Rect> = self.windows.iter().filter(|w| w.is_visible()).map(|w| w.rect()).collect();
        self.clear_vacated_area(&current_rects);

        for window in &self.windows {
            if !window.is_visible() {
                continue;
            }
            if let Err(error) = window.paint_into(&mut self.back, self.default_fg, self.default_bg) {
                tracing::warn!(%error, "window paint_into failed, skipping this window for the frame");
            }
        }

        let (bytes, metrics) = diff(&mut self.front, &self.back, self.mode);
        write_best_effort(terminal, &bytes);

        std::mem::swap(&mut self.front, &mut self.back);

        self.previous_window_rects = current_rects;
        self.desktop_needs_render = false;
        for window in &mut self.windows {
            window.clear_dirty();
        }

        metrics
    }
}

/// Writes `bytes` to `terminal`, retrying once on a short write and discarding
/// whatever remains after that so a stalled terminal never blocks the UI thread.
fn write_best_effort(terminal: &mut impl Write, bytes: &[u8]) {
    if bytes.is_empty() {
        return;
    }
    let Ok(first) = terminal.write(bytes) else { return };
    if first < bytes.len() {
        let _unused = terminal.write(&bytes[first..]);
    }
    let _unused = terminal.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ANSIBasicColor, col, height, row, width};

    struct TestWindow {
        rect: Rect,
        z: i32,
        visible: bool,
        dirty: bool,
        ch: char,
    }

    impl WindowSurface for TestWindow {
        fn rect(&self) -> Rect { self.rect }
        fn z_order(&self) -> i32 { self.z }
        fn is_visible(&self) -> bool { self.visible }
        fn is_dirty(&self) -> bool { self.dirty }
        fn clear_dirty(&mut self) { self.dirty = false; }
        fn paint_into(&self, buffer: &mut OffscreenBuffer, _fg: TuiColor, _bg: TuiColor) -> miette::Result<()> {
            let x0 = self.rect.pos.col_index.as_usize();
            let y0 = self.rect.pos.row_index.as_usize();
            let w = self.rect.size.col_width.as_usize();
            let h = self.rect.size.row_height.as_usize();
            for y in y0..y0 + h {
                for x in x0..x0 + w {
                    buffer.set(x, y, self.ch, TuiStyle::default());
                }
            }
            Ok(())
        }
    }

    fn orchestrator() -> FrameOrchestrator {
        FrameOrchestrator::new(
            width(10) + height(5),
            TuiColor::Basic(ANSIBasicColor::White),
            TuiColor::Basic(ANSIBasicColor::Black),
            DiffMode::Smart,
        )
    }

    #[test]
    fn two_static_frames_in_a_row_write_zero_bytes() {
        let mut orch = orchestrator();
        orch.add_window(Box::new(TestWindow {
            rect: Rect::new(row(0) + col(0), width(3) + height(1)),
            z: 0,
            visible: true,
            dirty: true,
            ch: 'a',
        }));

        let mut out = Vec::new();
        let first = orch.update_display(&mut out);
        assert!(!first.is_static_frame);
        assert!(!out.is_empty());

        let mut out2 = Vec::new();
        let second = orch.update_display(&mut out2);
        assert!(second.is_static_frame);
        assert!(out2.is_empty());
    }

    #[test]
    fn closing_a_window_clears_its_old_position() {
        let mut orch = orchestrator();
        orch.add_window(Box::new(TestWindow {
            rect: Rect::new(row(0) + col(0), width(3) + height(1)),
            z: 0,
            visible: true,
            dirty: true,
            ch: 'a',
        }));
        let mut out = Vec::new();
        orch.update_display(&mut out);

        orch.windows.clear();
        orch.desktop_needs_render = true;
        let mut out2 = Vec::new();
        let metrics = orch.update_display(&mut out2);
        assert!(!metrics.is_static_frame);
        assert!(metrics.dirty_cells_marked > 0);
    }

    #[test]
    fn paint_failure_in_one_window_does_not_abort_the_frame() {
        struct FailingWindow;
        impl WindowSurface for FailingWindow {
            fn rect(&self) -> Rect { Rect::new(row(0) + col(0), width(1) + height(1)) }
            fn z_order(&self) -> i32 { 0 }
            fn is_visible(&self) -> bool { true }
            fn is_dirty(&self) -> bool { true }
            fn clear_dirty(&mut self) {}
            fn paint_into(&self, _buffer: &mut OffscreenBuffer, _fg: TuiColor, _bg: TuiColor) -> miette::Result<()> {
                Err(miette::miette!("paint failed"))
            }
        }

        let mut orch = orchestrator();
        orch.add_window(Box::new(FailingWindow));
        orch.add_window(Box::new(TestWindow {
            rect: Rect::new(row(1) + col(1), width(2) + height(1)),
            z: 1,
            visible: true,
            dirty: true,
            ch: 'b',
        }));

        let mut out = Vec::new();
        let metrics = orch.update_display(&mut out);
        assert!(!metrics.is_static_frame);
        assert!(metrics.dirty_cells_marked > 0);
    }
}
