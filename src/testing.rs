//! Fixtures for exercising the viewer without a window or GPU.
//!
//! Shipped as a normal module so embedders can drive their own controller
//! tests with the same doubles this crate uses.

use rand::Rng;

use crate::engine::{Engine, FillMode};
use crate::painter::{Line, Painter, Rgba};
use crate::scheduler::{FrameHandle, FrameHost};

/// Engine calls recorded by a [`MockEngine`], in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    Tick,
    Fill(FillMode),
    SetCells {
        alive: bool,
        rows: Vec<u32>,
        cols: Vec<u32>,
    },
    ToggleCell {
        row: u32,
        col: u32,
    },
}

/// In-memory engine with real packed-bit storage and a call log.
///
/// `tick` only counts; the transition rule is deliberately absent from
/// this crate. The linear index wraps both axes, so out-of-range
/// coordinates land back on the torus.
pub struct MockEngine {
    width: u32,
    height: u32,
    bits: Vec<u8>,
    calls: Vec<EngineCall>,
}

impl MockEngine {
    pub fn new(width: u32, height: u32, mode: FillMode) -> Self {
        let bytes = (width as usize * height as usize + 7) / 8;
        let mut engine = Self {
            width,
            height,
            bits: vec![0; bytes],
            calls: Vec::new(),
        };
        engine.apply_fill(mode);
        engine
    }

    /// Recorded calls in arrival order.
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Number of recorded ticks.
    pub fn ticks(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, EngineCall::Tick))
            .count()
    }

    pub fn is_alive(&self, row: u32, col: u32) -> bool {
        let index = self.get_index(row, col);
        self.bits[index / 8] & (1 << (index % 8)) != 0
    }

    fn set_bit(&mut self, index: usize, alive: bool) {
        let mask = 1u8 << (index % 8);
        if alive {
            self.bits[index / 8] |= mask;
        } else {
            self.bits[index / 8] &= !mask;
        }
    }

    fn apply_fill(&mut self, mode: FillMode) {
        let mut rng = rand::thread_rng();
        let cells = self.width as usize * self.height as usize;
        for i in 0..cells {
            let alive = match mode {
                FillMode::AllDead => false,
                FillMode::AllAlive => true,
                FillMode::Random => rng.gen_bool(0.5),
                FillMode::Seeded => i % 2 == 0 || i % 7 == 0,
            };
            self.set_bit(i, alive);
        }
    }
}

impl Engine for MockEngine {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn cells(&self) -> &[u8] {
        &self.bits
    }

    fn tick(&mut self) {
        self.calls.push(EngineCall::Tick);
    }

    fn fill(&mut self, mode: FillMode) {
        self.apply_fill(mode);
        self.calls.push(EngineCall::Fill(mode));
    }

    fn get_index(&self, row: u32, col: u32) -> usize {
        (row % self.height) as usize * self.width as usize + (col % self.width) as usize
    }

    fn set_cells(&mut self, alive: bool, rows: &[u32], cols: &[u32]) {
        for (&row, &col) in rows.iter().zip(cols) {
            let index = self.get_index(row, col);
            self.set_bit(index, alive);
        }
        self.calls.push(EngineCall::SetCells {
            alive,
            rows: rows.to_vec(),
            cols: cols.to_vec(),
        });
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        let index = self.get_index(row, col);
        self.bits[index / 8] ^= 1 << (index % 8);
        self.calls.push(EngineCall::ToggleCell { row, col });
    }
}

/// Painter ops recorded by a [`RecordingPainter`].
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    StrokeLines { lines: Vec<Line>, color: Rgba },
    FillRect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Rgba,
    },
}

/// Painter that records every call instead of rasterizing.
#[derive(Default)]
pub struct RecordingPainter {
    ops: Vec<PaintOp>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Number of recorded rect fills in the given color.
    pub fn rect_count(&self, color: Rgba) -> usize {
        self.ops
            .iter()
            .filter(|op| match op {
                PaintOp::FillRect { color: c, .. } => *c == color,
                _ => false,
            })
            .count()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Painter for RecordingPainter {
    fn stroke_lines(&mut self, lines: &[Line], color: Rgba) {
        self.ops.push(PaintOp::StrokeLines {
            lines: lines.to_vec(),
            color,
        });
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        self.ops.push(PaintOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }
}

/// Hand-cranked frame host: schedules are counted, cancels recorded, and
/// the pending callback is retractable (unlike the window host).
#[derive(Default)]
pub struct ManualHost {
    next_id: u64,
    pending: Option<FrameHandle>,
    scheduled: usize,
    cancelled: Vec<FrameHandle>,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the callback waiting to fire, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Total `schedule` calls so far.
    pub fn scheduled(&self) -> usize {
        self.scheduled
    }

    /// Every cancelled handle, in order.
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameHost for ManualHost {
    fn schedule(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle::new(self.next_id);
        self.pending = Some(handle);
        self.scheduled += 1;
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_fill_matches_formula() {
        let engine = MockEngine::new(10, 3, FillMode::Seeded);
        for row in 0..3 {
            for col in 0..10 {
                let i = engine.get_index(row, col);
                assert_eq!(engine.is_alive(row, col), i % 2 == 0 || i % 7 == 0);
            }
        }
    }

    #[test]
    fn test_fill_extremes() {
        let dead = MockEngine::new(9, 5, FillMode::AllDead);
        assert!((0..5).all(|r| (0..9).all(|c| !dead.is_alive(r, c))));

        let alive = MockEngine::new(9, 5, FillMode::AllAlive);
        assert!((0..5).all(|r| (0..9).all(|c| alive.is_alive(r, c))));
    }

    #[test]
    fn test_toggle_flips_one_bit() {
        let mut engine = MockEngine::new(8, 8, FillMode::AllDead);
        engine.toggle_cell(3, 4);
        assert!(engine.is_alive(3, 4));
        assert!(!engine.is_alive(3, 5));
        engine.toggle_cell(3, 4);
        assert!(!engine.is_alive(3, 4));
    }

    #[test]
    fn test_index_wraps_both_axes() {
        let engine = MockEngine::new(10, 6, FillMode::AllDead);
        assert_eq!(engine.get_index(6, 0), engine.get_index(0, 0));
        assert_eq!(engine.get_index(2, 13), engine.get_index(2, 3));
    }

    #[test]
    fn test_manual_host_retracts_pending_on_cancel() {
        let mut host = ManualHost::new();
        let handle = host.schedule();
        assert_eq!(host.pending(), Some(handle));

        host.cancel(handle);
        assert!(host.pending().is_none());
        assert_eq!(host.cancelled(), &[handle]);
        assert_eq!(handle.id(), 1);
    }
}
