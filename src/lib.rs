pub mod controller;
pub mod engine;
pub mod io;
pub mod render;
pub mod viewport;

/// Screen-space pixel coordinate or offset.
pub type Px = i32;

/// Grid cell coordinate as produced by the viewport mapping. May fall outside
/// the grid on either side; callers range-check before touching cells.
pub type Coord = i32;
