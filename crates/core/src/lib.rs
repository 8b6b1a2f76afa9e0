//! Hexgrid is a hexagonal-grid toolkit: cube/axial cell coordinates, a
//! world-to-cell layout transform, a cell collection with shape generation and
//! spatial queries, and a generic best-first pathfinding engine with a grid
//! navigation adapter. Rendering, scene management and persistence are
//! presentation concerns implemented elsewhere; this crate only hands out
//! the geometry (cell centers, polygon corners, paths) they consume.
//!
//! ```
//! use hexgrid::{GridConfig, Hex, HexGrid, Navigator};
//!
//! let mut grid = HexGrid::new(GridConfig::default()).unwrap();
//! grid.generate_hexagon(3);
//!
//! let mut navigator = Navigator::new(&grid);
//! navigator.block(Hex::new(0, 0));
//! let path = navigator.find_path(Hex::new(-3, 0), Hex::new(3, 0));
//! assert!(!path.is_empty());
//! // From here you can walk/render the path however you like.
//! ```
//!
//! See [GridConfig] for details on how the grid geometry can be customized.

mod config;
mod grid;
mod hex;
mod layout;
mod path;
mod util;

pub use crate::{
    config::GridConfig,
    grid::HexGrid,
    hex::{Direction, FractionalHex, Hex, HexSet, HexVector},
    layout::{HexOrientation, Layout, Point2, Point3, WorldPlane},
    path::{find_path, Heuristic, Navigator, PathGraph},
};
