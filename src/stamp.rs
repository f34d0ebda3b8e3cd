//! Batch stamping of canonical figures with toroidal wrap correction.

use crate::engine::Engine;
use crate::patterns::Figure;

/// Wraps a possibly negative coordinate back into range:
/// `fix(c, B) = c + max(0, ceil(-c / B) * B)`.
///
/// Only negative underflow is corrected. A coordinate at or beyond `bound`
/// passes through untouched; upper-bound handling belongs to the engine.
pub fn fix_offset(c: i64, bound: u32) -> u32 {
    debug_assert!(bound > 0);
    if c >= 0 {
        return c as u32;
    }
    let b = i64::from(bound);
    let correction = (-c + b - 1) / b * b;
    (c + correction) as u32
}

/// Stamps `figure` anchored at `(row, col)`: every offset is resolved to an
/// absolute coordinate, wrap-corrected independently per point and per
/// axis (rows against the height, columns against the width), and the
/// whole batch is submitted as one set-alive mutation.
///
/// Correction is per point, not one shift for the whole shape, so a figure
/// stamped near an edge may have individual cells wrap to the opposite
/// side.
pub fn stamp_figure<E: Engine>(engine: &mut E, row: u32, col: u32, figure: &Figure) {
    let height = engine.height();
    let width = engine.width();

    let rows: Vec<u32> = figure
        .offsets
        .iter()
        .map(|&(dr, _)| fix_offset(i64::from(row) + i64::from(dr), height))
        .collect();
    let cols: Vec<u32> = figure
        .offsets
        .iter()
        .map(|&(_, dc)| fix_offset(i64::from(col) + i64::from(dc), width))
        .collect();

    log::debug!("stamping {} at ({}, {})", figure.name, row, col);
    engine.set_cells(true, &rows, &cols);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FillMode;
    use crate::patterns::GLIDER;
    use crate::testing::{EngineCall, MockEngine};

    #[test]
    fn test_fix_passes_nonnegative_through() {
        assert_eq!(fix_offset(0, 10), 0);
        assert_eq!(fix_offset(5, 10), 5);
        // Past the upper bound is not this function's problem.
        assert_eq!(fix_offset(12, 10), 12);
    }

    #[test]
    fn test_fix_wraps_negative() {
        assert_eq!(fix_offset(-1, 10), 9);
        assert_eq!(fix_offset(-10, 10), 0);
        assert_eq!(fix_offset(-12, 10), 8);
        assert_eq!(fix_offset(-20, 10), 0);
    }

    #[test]
    fn test_stamp_wraps_per_point() {
        let mut engine = MockEngine::new(500, 64, FillMode::AllDead);
        stamp_figure(&mut engine, 0, 0, &GLIDER);

        // (-1, 0) wraps its row to 63; (1, -1) wraps its col to 499; the
        // rest of the shape stays near the origin.
        assert_eq!(
            engine.calls(),
            &[EngineCall::SetCells {
                alive: true,
                rows: vec![63, 0, 1, 1, 1],
                cols: vec![0, 1, 499, 0, 1],
            }]
        );
    }

    #[test]
    fn test_stamp_away_from_edges_is_plain_translation() {
        let mut engine = MockEngine::new(500, 64, FillMode::AllDead);
        stamp_figure(&mut engine, 10, 20, &GLIDER);

        assert_eq!(
            engine.calls(),
            &[EngineCall::SetCells {
                alive: true,
                rows: vec![9, 10, 11, 11, 11],
                cols: vec![20, 21, 19, 20, 21],
            }]
        );
    }
}
