//! Capability interface of the external automaton engine.

/// Named bulk-fill modes an engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillMode {
    /// Every cell dead.
    AllDead,
    /// Every cell alive.
    AllAlive,
    /// Each cell alive with 50% probability.
    Random,
    /// A fixed seed texture chosen by the engine.
    Seeded,
}

/// State-transition engine for a toroidal bit-state automaton.
///
/// The engine owns the grid memory and the transition rule; the viewer
/// drives it through this surface and treats every call as infallible.
/// Dimensions are fixed for the engine's lifetime.
pub trait Engine {
    /// Grid width in cells.
    fn width(&self) -> u32;

    /// Grid height in cells.
    fn height(&self) -> u32;

    /// Packed cell states: `ceil(width * height / 8)` bytes, one bit per
    /// cell. Bit `get_index(row, col)` is set iff the cell is alive. The
    /// borrow ties the view to this engine instance; callers re-borrow
    /// after every mutation.
    fn cells(&self) -> &[u8];

    /// Advance the automaton by one generation.
    fn tick(&mut self);

    /// Bulk-reset every cell per `mode`.
    fn fill(&mut self, mode: FillMode);

    /// Linear bit index of cell `(row, col)`.
    fn get_index(&self, row: u32, col: u32) -> usize;

    /// Set the `(rows[i], cols[i])` pairs to `alive` in one batch.
    /// Coordinates past the grid bounds are the engine's to resolve.
    fn set_cells(&mut self, alive: bool, rows: &[u32], cols: &[u32]);

    /// Flip a single cell.
    fn toggle_cell(&mut self, row: u32, col: u32);
}
