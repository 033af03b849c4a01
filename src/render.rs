use crate::controller::RunState;
use crate::engine::GridEngine;
use crate::viewport::Viewport;

const ALIVE_PX: u8 = b'#';
const DEAD_PX: u8 = b'.';

/// Render the visible window of the grid into a text framebuffer, one
/// character per pixel, rows separated by `\n` (no trailing newline).
///
/// Only the cell range intersecting the viewport is visited. At cell sizes
/// above one pixel, each cell is drawn one pixel short of its full extent on
/// the right and bottom so neighboring cells stay visually separated.
pub fn render_grid(engine: &GridEngine, view: &Viewport) -> String {
    let width = view.view_width().max(0) as usize;
    let height = view.view_height().max(0) as usize;

    let mut fb = vec![DEAD_PX; width * height];

    let cell_size = view.cell_size();
    let side = if cell_size > 1 { cell_size - 1 } else { 1 };

    let (rows, cols) = view.visible_cells();

    for row in rows {
        for col in cols.clone() {
            if !engine.is_alive(row, col) {
                continue;
            }

            let (screen_x, screen_y) = view.grid_to_screen(row, col);

            for dy in 0..side {
                for dx in 0..side {
                    let (x, y) = (screen_x + dx, screen_y + dy);

                    if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                        fb[y as usize * width + x as usize] = ALIVE_PX;
                    }
                }
            }
        }
    }

    let mut out = String::with_capacity((width + 1) * height);

    for line in fb.chunks(width.max(1)) {
        if !out.is_empty() {
            out.push('\n');
        }

        // the framebuffer only ever holds ascii
        out.push_str(std::str::from_utf8(line).unwrap());
    }

    out
}

/// The one-line status bar drawn below the grid area.
pub fn status_line(engine: &GridEngine, run: &RunState) -> String {
    let state = if run.paused { "PAUSED" } else { "RUNNING" };

    format!(
        "Gen: {} | {} | Rate: {} | [space] run [r] reset [c] clear [+/-] rate [q] quit",
        engine.generation(),
        state,
        run.target_rate,
    )
}
