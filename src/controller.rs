use tracing::trace;

use crate::Coord;
use crate::Px;
use crate::engine::GridEngine;
use crate::engine::GridError;
use crate::viewport::Viewport;

/// Generations per second the scheduler aims for, at minimum.
pub const MIN_RATE: u32 = 1;

/// Generations per second the scheduler aims for, at maximum.
pub const MAX_RATE: u32 = 60;

/// How much one rate intent changes the target rate.
const RATE_STEP: u32 = 5;

/// How far one directional pan intent moves the viewport, in pixels.
pub const PAN_STEP: Px = 32;

/// A decoded input gesture, ready to be routed into the engine or the
/// viewport. Producing these from raw platform events is the job of the
/// input layer (see [`crate::io`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Flip the cell under a screen position.
    ToggleAt { x: Px, y: Px },

    /// One sample of a drag-paint stroke at a screen position.
    PaintAt { x: Px, y: Px },

    /// The paint button was released; the stroke is over.
    PaintRelease,

    /// Shift the viewport by pixel deltas.
    Pan { dx: Px, dy: Px },

    /// Grow cells by one pixel, keeping the focus point stationary.
    ZoomIn { focus_x: Px, focus_y: Px },

    /// Shrink cells by one pixel, keeping the focus point stationary.
    ZoomOut { focus_x: Px, focus_y: Px },

    TogglePause,
    RateUp,
    RateDown,

    /// Re-randomize the grid. Forces a pause.
    Reset,

    /// Kill every cell. Forces a pause.
    Clear,

    /// The visible window changed size.
    Resize { width: Px, height: Px },
}

/// Whether and how fast the external scheduler should call
/// [`GridEngine::step`]. Not consulted by the core itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    pub paused: bool,

    /// Target generations per second, within `MIN_RATE..=MAX_RATE`.
    pub target_rate: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            paused: true,
            target_rate: 10,
        }
    }
}

impl RunState {
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn rate_up(&mut self) {
        self.target_rate = (self.target_rate + RATE_STEP).min(MAX_RATE);
    }

    pub fn rate_down(&mut self) {
        self.target_rate = self.target_rate.saturating_sub(RATE_STEP).max(MIN_RATE);
    }

    /// Time budget of one frame at the target rate.
    pub fn frame_time(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.target_rate as f64)
    }
}

/// Routes [`Intent`]s into the engine and the viewport.
///
/// The only state carried across intents is the last grid cell a paint
/// stroke touched: a stroke toggles each cell once when the pointer enters
/// it, rather than on every motion sample, so a pointer lingering inside one
/// cell does not flicker it. [`Intent::PaintRelease`] ends the stroke.
pub struct Controller {
    last_paint: Option<(Coord, Coord)>,

    /// Density used by [`Intent::Reset`].
    density: f64,

    rng: fastrand::Rng,
}

impl Controller {
    pub fn new(density: f64, rng: fastrand::Rng) -> Self {
        Self {
            last_paint: None,
            density,
            rng,
        }
    }

    pub fn apply(
        &mut self,
        intent: Intent,
        engine: &mut GridEngine,
        view: &mut Viewport,
        run: &mut RunState,
    ) -> Result<(), GridError> {
        match intent {
            Intent::ToggleAt { x, y } => {
                let (row, col) = view.screen_to_grid(x, y);
                engine.toggle(row, col);
            }

            Intent::PaintAt { x, y } => {
                let cell = view.screen_to_grid(x, y);

                if self.last_paint != Some(cell) {
                    trace!("paint stroke entered cell {cell:?}");

                    engine.toggle(cell.0, cell.1);
                    self.last_paint = Some(cell);
                }
            }

            Intent::PaintRelease => {
                self.last_paint = None;
            }

            Intent::Pan { dx, dy } => view.pan(dx, dy),

            Intent::ZoomIn { focus_x, focus_y } => {
                view.zoom_at(focus_x, focus_y, view.cell_size() + 1);
            }

            Intent::ZoomOut { focus_x, focus_y } => {
                view.zoom_at(focus_x, focus_y, view.cell_size() - 1);
            }

            Intent::TogglePause => run.toggle_pause(),
            Intent::RateUp => run.rate_up(),
            Intent::RateDown => run.rate_down(),

            Intent::Reset => {
                engine.reset(self.density, &mut self.rng)?;
                run.paused = true;
            }

            Intent::Clear => {
                engine.clear();
                run.paused = true;
            }

            Intent::Resize { width, height } => view.resize(width, height),
        }

        Ok(())
    }
}
