//! Named-command dispatch over the viewer's state.

use crate::config::ViewerConfig;
use crate::engine::{Engine, FillMode};
use crate::fps::FpsMeter;
use crate::painter::Painter;
use crate::patterns::{GLIDER, PULSAR};
use crate::render::RenderController;
use crate::scheduler::{FrameHost, Scheduler};
use crate::stamp::stamp_figure;

/// Modifier keys active on a canvas click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    /// Primary modifier (Ctrl): stamp the 5-point figure.
    pub primary: bool,
    /// Secondary modifier (Shift): together with primary, stamp the
    /// 48-point figure.
    pub secondary: bool,
}

/// Every user-visible operation, decoupled from the input that triggered
/// it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advance one generation and redraw.
    Tick,
    /// Reset every cell to dead and redraw.
    Clear,
    /// Refill the grid randomly and redraw.
    Randomize,
    /// Pause when running, resume when paused.
    TogglePlayback,
    /// Set the speed control value; higher is faster. Clamped to the
    /// configured range.
    SetSpeed(u32),
    /// Pointer click in canvas pixel coordinates.
    Click {
        x: f64,
        y: f64,
        modifiers: ClickModifiers,
    },
}

/// The viewer's moving parts behind the dispatch table: engine,
/// scheduler, render controller, FPS meter, and the canvas they paint.
///
/// Single-threaded by construction: every dispatch and frame step runs to
/// completion before the next one starts, so mutations and draws never
/// interleave.
pub struct Session<E: Engine, P: Painter> {
    engine: E,
    painter: P,
    renderer: RenderController,
    scheduler: Scheduler,
    fps: FpsMeter,
    speed_min: u32,
    speed_max: u32,
}

impl<E: Engine, P: Painter> Session<E, P> {
    pub fn new(engine: E, painter: P, config: &ViewerConfig) -> Self {
        Self {
            engine,
            painter,
            renderer: RenderController::new(
                config.cell_size,
                config.grid_color,
                config.dead_color,
                config.alive_color,
            ),
            scheduler: Scheduler::new(),
            fps: FpsMeter::new(),
            speed_min: config.speed_min,
            speed_max: config.speed_max,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    pub fn fps(&self) -> &FpsMeter {
        &self.fps
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    /// Start playback. No-op while already running.
    pub fn play(&mut self, host: &mut dyn FrameHost) {
        self.scheduler.play(host);
    }

    /// Stop playback and cancel the outstanding callback. Idempotent.
    pub fn pause(&mut self, host: &mut dyn FrameHost) {
        self.scheduler.pause(host);
    }

    /// Full draw: FPS sample, grid, cells.
    pub fn draw(&mut self) {
        self.renderer
            .draw(&self.engine, &mut self.fps, &mut self.painter);
    }

    /// One delivered frame callback: tick and draw when the throttle
    /// boundary is crossed, advance the counter, reschedule. Does nothing
    /// while paused.
    pub fn on_frame(&mut self, host: &mut dyn FrameHost) {
        if self.scheduler.on_frame(host) {
            self.tick();
        }
    }

    /// Apply one command. Runs to completion before the next dispatch.
    pub fn dispatch(&mut self, command: Command, host: &mut dyn FrameHost) {
        log::debug!("command: {:?}", command);
        match command {
            Command::Tick => self.tick(),
            Command::Clear => {
                self.engine.fill(FillMode::AllDead);
                self.draw();
            }
            Command::Randomize => {
                self.engine.fill(FillMode::Random);
                self.draw();
            }
            Command::TogglePlayback => {
                if self.scheduler.is_paused() {
                    self.scheduler.play(host);
                } else {
                    self.scheduler.pause(host);
                }
            }
            Command::SetSpeed(value) => {
                let value = value.clamp(self.speed_min, self.speed_max);
                self.scheduler.set_skip_factor(self.speed_max - value + 1);
            }
            Command::Click { x, y, modifiers } => self.click(x, y, modifiers),
        }
    }

    fn tick(&mut self) {
        self.engine.tick();
        self.draw();
    }

    fn click(&mut self, x: f64, y: f64, modifiers: ClickModifiers) {
        let (row, col) = self.cell_at(x, y);
        if modifiers.primary && modifiers.secondary {
            stamp_figure(&mut self.engine, row, col, &PULSAR);
        } else if modifiers.primary {
            stamp_figure(&mut self.engine, row, col, &GLIDER);
        } else {
            self.engine.toggle_cell(row, col);
        }
        // The click path repaints without sampling the meter.
        self.renderer.repaint(&self.engine, &mut self.painter);
    }

    /// Floor-divide canvas coordinates by the cell pitch and clamp into
    /// the grid. The float-to-int cast already floors and saturates at
    /// zero.
    fn cell_at(&self, x: f64, y: f64) -> (u32, u32) {
        let pitch = f64::from(self.renderer.cell_size() + 1);
        let row = ((y / pitch) as u32).min(self.engine.height() - 1);
        let col = ((x / pitch) as u32).min(self.engine.width() - 1);
        (row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EngineCall, ManualHost, MockEngine, RecordingPainter};

    fn session(width: u32, height: u32) -> Session<MockEngine, RecordingPainter> {
        Session::new(
            MockEngine::new(width, height, FillMode::AllDead),
            RecordingPainter::new(),
            &ViewerConfig::default(),
        )
    }

    #[test]
    fn test_plain_click_toggles_floored_cell() {
        let mut session = session(500, 64);
        let mut host = ManualHost::new();

        // 11px pitch: (x=25, y=13) lands in column 2, row 1.
        session.dispatch(
            Command::Click {
                x: 25.0,
                y: 13.0,
                modifiers: ClickModifiers::default(),
            },
            &mut host,
        );

        assert_eq!(
            session.engine().calls(),
            &[EngineCall::ToggleCell { row: 1, col: 2 }]
        );
    }

    #[test]
    fn test_click_clamps_to_grid_edges() {
        let mut session = session(500, 64);
        let mut host = ManualHost::new();

        session.dispatch(
            Command::Click {
                x: 1.0e9,
                y: 1.0e9,
                modifiers: ClickModifiers::default(),
            },
            &mut host,
        );

        assert_eq!(
            session.engine().calls(),
            &[EngineCall::ToggleCell { row: 63, col: 499 }]
        );
    }

    #[test]
    fn test_set_speed_clamps_to_range() {
        let mut session = session(4, 4);
        let mut host = ManualHost::new();

        // Default range is 1..=10; 0 clamps to 1, which is the slowest
        // setting: skip factor 10.
        session.dispatch(Command::SetSpeed(0), &mut host);
        assert_eq!(session.scheduler.skip_factor(), 10);

        session.dispatch(Command::SetSpeed(99), &mut host);
        assert_eq!(session.scheduler.skip_factor(), 1);
    }

    #[test]
    fn test_toggle_playback_round_trip() {
        let mut session = session(4, 4);
        let mut host = ManualHost::new();
        assert!(session.is_paused());

        session.dispatch(Command::TogglePlayback, &mut host);
        assert!(!session.is_paused());

        session.dispatch(Command::TogglePlayback, &mut host);
        assert!(session.is_paused());
        assert_eq!(host.cancelled().len(), 1);
    }
}
