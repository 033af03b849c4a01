use gridlife::Coord;
use gridlife::controller::Controller;
use gridlife::controller::Intent;
use gridlife::controller::RunState;
use gridlife::engine::GridEngine;
use gridlife::viewport::Viewport;

fn empty(height: usize, width: usize) -> GridEngine {
    let mut rng = fastrand::Rng::with_seed(0);
    GridEngine::new(height, width, 0.0, &mut rng).unwrap()
}

fn alive_cells(engine: &GridEngine) -> Vec<(Coord, Coord)> {
    let mut cells = Vec::new();

    for row in 0..engine.height() as Coord {
        for col in 0..engine.width() as Coord {
            if engine.is_alive(row, col) {
                cells.push((row, col));
            }
        }
    }

    cells
}

#[test]
fn glider_translates_diagonally() {
    let mut engine = empty(20, 20);

    // southeast-bound glider with its bounding box at (5, 5)
    for (row, col) in [(5, 6), (6, 7), (7, 5), (7, 6), (7, 7)] {
        engine.toggle(row, col);
    }

    for _ in 0..4 {
        engine.step();
    }

    assert_eq!(
        alive_cells(&engine),
        vec![(6, 7), (7, 8), (8, 6), (8, 7), (8, 8)]
    );
    assert_eq!(engine.generation(), 4);

    // four more generations, one more diagonal step
    for _ in 0..4 {
        engine.step();
    }

    assert_eq!(
        alive_cells(&engine),
        vec![(7, 8), (8, 9), (9, 7), (9, 8), (9, 9)]
    );
}

/// Paint a blinker through the full stack (viewport mapping included), run
/// it, and confirm it oscillates and that clearing pauses the run.
#[test]
fn paint_and_run_through_the_controller() {
    let mut rng = fastrand::Rng::with_seed(0);
    let mut engine = GridEngine::new(40, 40, 0.0, &mut rng).unwrap();
    let mut view = Viewport::new(40, 40, 4, 80, 60);
    let mut run = RunState::default();
    let mut controller = Controller::new(0.3, rng);

    let mut apply = |intent,
                     engine: &mut GridEngine,
                     view: &mut Viewport,
                     run: &mut RunState,
                     controller: &mut Controller| {
        controller.apply(intent, engine, view, run).unwrap();
    };

    // pan so cell (0, 0) of the screen is cell (2, 2) of the grid
    apply(
        Intent::Pan { dx: 8, dy: 8 },
        &mut engine,
        &mut view,
        &mut run,
        &mut controller,
    );

    // one drag stroke across three horizontally adjacent cells
    for x in [1, 5, 9] {
        apply(
            Intent::PaintAt { x, y: 1 },
            &mut engine,
            &mut view,
            &mut run,
            &mut controller,
        );
    }
    apply(
        Intent::PaintRelease,
        &mut engine,
        &mut view,
        &mut run,
        &mut controller,
    );

    assert_eq!(alive_cells(&engine), vec![(2, 2), (2, 3), (2, 4)]);

    // the scheduler steps only while running
    apply(
        Intent::TogglePause,
        &mut engine,
        &mut view,
        &mut run,
        &mut controller,
    );
    assert!(!run.paused);

    engine.step();
    assert_eq!(alive_cells(&engine), vec![(1, 3), (2, 3), (3, 3)]);

    engine.step();
    assert_eq!(alive_cells(&engine), vec![(2, 2), (2, 3), (2, 4)]);

    apply(
        Intent::Clear,
        &mut engine,
        &mut view,
        &mut run,
        &mut controller,
    );

    assert!(run.paused);
    assert_eq!(engine.generation(), 0);
    assert!(alive_cells(&engine).is_empty());
}
