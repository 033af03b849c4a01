use std::io::stdout;
use std::time::Instant;

use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::style;
use crossterm::terminal;
use tracing_subscriber::EnvFilter;

use gridlife::Px;
use gridlife::controller::Controller;
use gridlife::controller::RunState;
use gridlife::engine::GridEngine;
use gridlife::io::InputEvent;
use gridlife::io::TerminalGuard;
use gridlife::io::convert_event;
use gridlife::render;
use gridlife::viewport::Viewport;

const GRID_HEIGHT: usize = 300;
const GRID_WIDTH: usize = 300;
const CELL_SIZE: Px = 2;
const DENSITY: f64 = 0.3;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut rng = fastrand::Rng::new();

    let mut engine = GridEngine::new(GRID_HEIGHT, GRID_WIDTH, DENSITY, &mut rng)?;

    // One terminal cell is one pixel; the bottom row holds the status line
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(
        GRID_HEIGHT,
        GRID_WIDTH,
        CELL_SIZE,
        cols as Px,
        rows.saturating_sub(1) as Px,
    );

    let mut run = RunState::default();
    let mut controller = Controller::new(DENSITY, rng);

    let _guard = TerminalGuard::enter()?;
    let mut out = stdout();

    'main: loop {
        execute!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        let frame = render::render_grid(&engine, &view);
        for line in frame.lines() {
            execute!(out, style::Print(line), cursor::MoveToNextLine(1))?;
        }
        execute!(out, style::Print(render::status_line(&engine, &run)))?;

        // Handle input until the frame's time budget runs out, then step
        let deadline = Instant::now() + run.frame_time();

        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }

            if !event::poll(deadline - now)? {
                continue;
            }

            match convert_event(event::read()?) {
                Some(InputEvent::Quit) => break 'main,
                Some(InputEvent::Intent(intent)) => {
                    controller.apply(intent, &mut engine, &mut view, &mut run)?;
                }
                None => {}
            }
        }

        if !run.paused {
            engine.step();
        }
    }

    Ok(())
}
