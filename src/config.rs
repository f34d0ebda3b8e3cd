use crate::painter::Rgba;

/// Cell square side in canvas pixels; the grid adds a 1px line between
/// cells, so the pitch is `DEFAULT_CELL_SIZE + 1`.
pub const DEFAULT_CELL_SIZE: u32 = 10;

/// Grid line color (#CCCCCC).
pub const GRID_COLOR: Rgba = [0xCC, 0xCC, 0xCC, 0xFF];

/// Dead cell fill (#FFFFFF).
pub const DEAD_COLOR: Rgba = [0xFF, 0xFF, 0xFF, 0xFF];

/// Alive cell fill (#000000).
pub const ALIVE_COLOR: Rgba = [0x00, 0x00, 0x00, 0xFF];

/// Speed control range. The scheduler's skip factor is
/// `SPEED_MAX - value + 1`: at `SPEED_MAX` every frame callback ticks, at
/// `SPEED_MIN` only every tenth does.
pub const SPEED_MIN: u32 = 1;
pub const SPEED_MAX: u32 = 10;

/// Number of FPS samples retained for min/avg/max reporting.
pub const FPS_WINDOW_LEN: usize = 100;

/// Default window title; the glue appends FPS and playback state.
pub const DEFAULT_TITLE: &str = "cellview";

/// Embedder-facing configuration. `Default` mirrors the constants above;
/// grid dimensions are not here because the engine owns them.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub title: String,
    pub cell_size: u32,
    pub grid_color: Rgba,
    pub dead_color: Rgba,
    pub alive_color: Rgba,
    pub speed_min: u32,
    pub speed_max: u32,
}

impl ViewerConfig {
    /// Canvas pixel size for a grid of the given dimensions:
    /// `(cell_size + 1) * cells + 1` per axis.
    pub fn canvas_size(&self, grid_width: u32, grid_height: u32) -> (u32, u32) {
        (
            (self.cell_size + 1) * grid_width + 1,
            (self.cell_size + 1) * grid_height + 1,
        )
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            cell_size: DEFAULT_CELL_SIZE,
            grid_color: GRID_COLOR,
            dead_color: DEAD_COLOR,
            alive_color: ALIVE_COLOR,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size() {
        let config = ViewerConfig::default();
        // 10px cells: 11px pitch plus the closing grid line.
        assert_eq!(config.canvas_size(500, 64), (5501, 705));
        assert_eq!(config.canvas_size(1, 1), (12, 12));
    }
}
