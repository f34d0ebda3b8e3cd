//! Grid and cell drawing.

use crate::bitgrid::BitGrid;
use crate::engine::Engine;
use crate::fps::FpsMeter;
use crate::painter::{Line, Painter, Rgba};

/// Draws the cell grid onto a [`Painter`].
///
/// Every frame repaints every cell: two full passes, alive fills first,
/// dead fills second. There is no dirty-region tracking; O(W*H) per frame
/// is a deliberate simplification.
pub struct RenderController {
    cell_size: u32,
    grid_color: Rgba,
    dead_color: Rgba,
    alive_color: Rgba,
}

impl RenderController {
    pub fn new(cell_size: u32, grid_color: Rgba, dead_color: Rgba, alive_color: Rgba) -> Self {
        Self {
            cell_size,
            grid_color,
            dead_color,
            alive_color,
        }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// One logical draw: sample the meter, then grid lines, then cells.
    /// The meter is sampled exactly once regardless of how many shapes get
    /// painted.
    pub fn draw<E: Engine, P: Painter>(&self, engine: &E, fps: &mut FpsMeter, painter: &mut P) {
        fps.render();
        self.draw_grid(engine.width(), engine.height(), painter);
        self.draw_cells(engine, painter);
    }

    /// Grid and cells without an FPS sample; the pointer-click path.
    pub fn repaint<E: Engine, P: Painter>(&self, engine: &E, painter: &mut P) {
        self.draw_grid(engine.width(), engine.height(), painter);
        self.draw_cells(engine, painter);
    }

    /// W+1 vertical and H+1 horizontal lines, spaced one cell pitch apart
    /// with a 1px origin offset, submitted as a single path with a single
    /// stroke color.
    pub fn draw_grid<P: Painter>(&self, width: u32, height: u32, painter: &mut P) {
        let pitch = self.cell_size + 1;
        let mut lines = Vec::with_capacity(width as usize + height as usize + 2);

        for i in 0..=width {
            lines.push(Line {
                x0: i * pitch + 1,
                y0: 0,
                x1: i * pitch + 1,
                y1: pitch * height + 1,
            });
        }
        for j in 0..=height {
            lines.push(Line {
                x0: 0,
                y0: j * pitch + 1,
                x1: pitch * width + 1,
                y1: j * pitch + 1,
            });
        }

        painter.stroke_lines(&lines, self.grid_color);
    }

    /// Two fixed passes over all W*H cells: alive first, dead second.
    pub fn draw_cells<E: Engine, P: Painter>(&self, engine: &E, painter: &mut P) {
        self.fill_pass(engine, painter, true, self.alive_color);
        self.fill_pass(engine, painter, false, self.dead_color);
    }

    fn fill_pass<E: Engine, P: Painter>(
        &self,
        engine: &E,
        painter: &mut P,
        want_alive: bool,
        color: Rgba,
    ) {
        let cells = BitGrid::new(engine.cells());
        let pitch = self.cell_size + 1;

        for row in 0..engine.height() {
            for col in 0..engine.width() {
                let index = engine.get_index(row, col);
                if cells.get(index) != want_alive {
                    continue;
                }
                painter.fill_rect(
                    col * pitch + 1,
                    row * pitch + 1,
                    self.cell_size,
                    self.cell_size,
                    color,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ALIVE_COLOR, DEAD_COLOR, GRID_COLOR};
    use crate::engine::FillMode;
    use crate::testing::{MockEngine, PaintOp, RecordingPainter};

    fn controller() -> RenderController {
        RenderController::new(10, GRID_COLOR, DEAD_COLOR, ALIVE_COLOR)
    }

    #[test]
    fn test_grid_is_one_path_with_all_segments() {
        let mut painter = RecordingPainter::new();
        controller().draw_grid(3, 2, &mut painter);

        assert_eq!(painter.ops().len(), 1, "the grid is a single stroke");
        let PaintOp::StrokeLines { lines, color } = &painter.ops()[0] else {
            panic!("expected a stroke, got {:?}", painter.ops()[0]);
        };
        assert_eq!(*color, GRID_COLOR);
        assert_eq!(lines.len(), (3 + 1) + (2 + 1));

        // First vertical line sits on the 1px origin offset and spans the
        // full canvas height.
        assert_eq!(lines[0], Line { x0: 1, y0: 0, x1: 1, y1: 11 * 2 + 1 });
        // Last horizontal line spans the full canvas width.
        assert_eq!(lines[6], Line { x0: 0, y0: 2 * 11 + 1, x1: 3 * 11 + 1, y1: 2 * 11 + 1 });
    }

    #[test]
    fn test_all_dead_grid_paints_only_dead_rects() {
        let engine = MockEngine::new(6, 4, FillMode::AllDead);
        let mut painter = RecordingPainter::new();
        controller().draw_cells(&engine, &mut painter);

        assert_eq!(painter.rect_count(ALIVE_COLOR), 0);
        assert_eq!(painter.rect_count(DEAD_COLOR), 6 * 4);
    }

    #[test]
    fn test_passes_are_ordered_alive_then_dead() {
        let mut engine = MockEngine::new(3, 3, FillMode::AllDead);
        engine.toggle_cell(1, 1);
        let mut painter = RecordingPainter::new();
        controller().draw_cells(&engine, &mut painter);

        let colors: Vec<Rgba> = painter
            .ops()
            .iter()
            .filter_map(|op| match op {
                PaintOp::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors.len(), 9, "both passes repaint the whole grid");
        assert_eq!(colors[0], ALIVE_COLOR, "alive pass runs first");
        assert!(colors[1..].iter().all(|&c| c == DEAD_COLOR));
    }

    #[test]
    fn test_cell_rect_geometry() {
        let mut engine = MockEngine::new(5, 5, FillMode::AllDead);
        engine.toggle_cell(1, 2);
        let mut painter = RecordingPainter::new();
        controller().draw_cells(&engine, &mut painter);

        assert_eq!(
            painter.ops()[0],
            PaintOp::FillRect {
                x: 2 * 11 + 1,
                y: 11 + 1,
                width: 10,
                height: 10,
                color: ALIVE_COLOR,
            }
        );
    }

    #[test]
    fn test_draw_samples_meter_once_repaint_not_at_all() {
        let engine = MockEngine::new(2, 2, FillMode::AllDead);
        let mut painter = RecordingPainter::new();
        let mut fps = FpsMeter::new();
        let controller = controller();

        controller.draw(&engine, &mut fps, &mut painter);
        assert_eq!(fps.sample_count(), 1);

        controller.repaint(&engine, &mut painter);
        assert_eq!(fps.sample_count(), 1);
    }
}
