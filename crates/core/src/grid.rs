//! The grid collection: the set of cells that exist, plus the spatial
//! queries that can be answered against it and its layout.

use crate::{
    config::GridConfig,
    hex::{Hex, HexSet},
    layout::{Layout, Point3},
    util,
};
use log::info;
use std::{collections::hash_set, iter::Copied};

/// A collection of hex cells, paired with the one [Layout] used for all
/// coordinate conversions of its members. The collection is the sole owner
/// of which cells exist: spatial queries like [HexGrid::neighbors] and
/// [HexGrid::in_range] only ever report cells that are actually present.
///
/// Membership is plain set semantics with cell identity as the key (no
/// ordering guarantee). A grid is populated either wholesale by one of the
/// `generate_*` shape methods (which replace all prior contents) or
/// incrementally via [HexGrid::insert] / [HexGrid::remove].
#[derive(Clone, Debug)]
pub struct HexGrid {
    layout: Layout,
    cells: HexSet,
}

impl HexGrid {
    /// Create an empty grid with the given geometry. Returns an error if the
    /// config is invalid; see [GridConfig].
    pub fn new(config: GridConfig) -> anyhow::Result<Self> {
        let layout = Layout::new(&config)?;
        Ok(Self {
            layout,
            cells: HexSet::default(),
        })
    }

    /// The layout used for all conversions between this grid's cells and
    /// world space
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Add a cell to the grid. Returns whether the cell was newly added.
    pub fn insert(&mut self, hex: Hex) -> bool {
        self.cells.insert(hex)
    }

    /// Remove a cell from the grid. Returns whether the cell was present.
    pub fn remove(&mut self, hex: Hex) -> bool {
        self.cells.remove(&hex)
    }

    /// Is the given cell part of this grid?
    pub fn contains(&self, hex: Hex) -> bool {
        self.cells.contains(&hex)
    }

    /// Remove all cells. The layout is untouched; geometry is fixed for the
    /// grid's lifetime.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// The number of cells in the grid
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all cells in the grid, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells.iter().copied()
    }

    /// Get the cells adjacent to the given cell **that are members of this
    /// grid**, in direction-index order. Yields at most 6 cells; membership
    /// of the queried cell itself is not required.
    pub fn neighbors(&self, hex: Hex) -> impl Iterator<Item = Hex> + '_ {
        hex.neighbors().filter(move |neighbor| self.contains(*neighbor))
    }

    /// Get all member cells within the given cube distance of a center cell.
    /// A negative radius yields an empty vec (degenerate input, not an
    /// error), matching [Hex::range].
    pub fn in_range(&self, center: Hex, radius: i32) -> Vec<Hex> {
        Hex::range(center, radius)
            .into_iter()
            .filter(|hex| self.contains(*hex))
            .collect()
    }

    /// Compute the straight line of cells from `a` to `b`. The result is
    /// **not** filtered by membership; callers filter if they need to.
    pub fn line(&self, a: Hex, b: Hex) -> Vec<Hex> {
        a.line_to(b)
    }

    /// Replace the grid's contents with a full hexagon of the given radius
    /// around the origin cell.
    pub fn generate_hexagon(&mut self, radius: i32) {
        info!("Generating hexagonal grid with radius {}", radius);
        self.cells.clear();
        self.cells.extend(Hex::range(Hex::ORIGIN, radius));
        debug_assert_eq!(self.cells.len(), util::hexagon_len(radius));
    }

    /// Replace the grid's contents with a `width`×`height` rectangle in
    /// offset coordinates. Columns are sheared back into cube space by
    /// shifting `r` down by `q / 2` per column. This is the "odd-q" convention,
    /// one of several standard offset mappings, kept for compatibility with
    /// grids generated elsewhere.
    pub fn generate_rectangle(&mut self, width: i32, height: i32) {
        info!("Generating rectangular grid, {}x{}", width, height);
        self.cells.clear();
        for q in 0..width {
            let q_offset = q >> 1;
            for r in -q_offset..(height - q_offset) {
                self.cells.insert(Hex::new(q, r));
            }
        }
    }

    /// Replace the grid's contents with a parallelogram spanning `0..=width`
    /// in `q` and `0..=height` in `r`.
    pub fn generate_parallelogram(&mut self, width: i32, height: i32) {
        info!("Generating parallelogram grid, {}x{}", width, height);
        self.cells.clear();
        for q in 0..=width {
            for r in 0..=height {
                self.cells.insert(Hex::new(q, r));
            }
        }
    }

    /// Replace the grid's contents with a triangle of the given size:
    /// all cells with `q` in `0..=size` and `r` in `0..=(size - q)`.
    pub fn generate_triangle(&mut self, size: i32) {
        info!("Generating triangular grid with size {}", size);
        self.cells.clear();
        for q in 0..=size {
            for r in 0..=(size - q) {
                self.cells.insert(Hex::new(q, r));
            }
        }
    }

    /// Convenience pass-through to [Layout::hex_to_pixel]
    pub fn hex_to_pixel(&self, hex: Hex) -> Point3 {
        self.layout.hex_to_pixel(hex)
    }

    /// Convenience pass-through to [Layout::pixel_to_hex]
    pub fn pixel_to_hex(&self, point: Point3) -> Hex {
        self.layout.pixel_to_hex(point)
    }

    /// Convenience pass-through to [Layout::polygon_corners]
    pub fn polygon_corners(&self, hex: Hex) -> [Point3; 6] {
        self.layout.polygon_corners(hex)
    }
}

impl Extend<Hex> for HexGrid {
    fn extend<T: IntoIterator<Item = Hex>>(&mut self, iter: T) {
        self.cells.extend(iter);
    }
}

impl<'a> IntoIterator for &'a HexGrid {
    type Item = Hex;
    type IntoIter = Copied<hash_set::Iter<'a, Hex>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexSet;

    fn grid() -> HexGrid {
        HexGrid::new(GridConfig::default()).unwrap()
    }

    #[test]
    fn test_set_semantics() {
        let mut grid = grid();
        assert!(grid.is_empty());

        assert!(grid.insert(Hex::new(1, 2)));
        // Same cell again, by value
        assert!(!grid.insert(Hex::new(1, 2)));
        assert_eq!(grid.len(), 1);
        assert!(grid.contains(Hex::new(1, 2)));

        assert!(grid.remove(Hex::new(1, 2)));
        assert!(!grid.remove(Hex::new(1, 2)));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_shape_counts() {
        let mut grid = grid();

        grid.generate_hexagon(3);
        assert_eq!(grid.len(), 37);

        grid.generate_parallelogram(4, 4);
        assert_eq!(grid.len(), 25);

        grid.generate_triangle(4);
        assert_eq!(grid.len(), 15);

        grid.generate_rectangle(5, 4);
        assert_eq!(grid.len(), 20);
    }

    #[test]
    fn test_shapes_are_destructive() {
        let mut grid = grid();
        grid.insert(Hex::new(100, 100));
        grid.generate_hexagon(1);
        assert_eq!(grid.len(), 7);
        assert!(!grid.contains(Hex::new(100, 100)));
    }

    #[test]
    fn test_shape_determinism() {
        let mut a = grid();
        let mut b = grid();
        a.generate_hexagon(3);
        b.generate_hexagon(3);
        let a_cells: HexSet = a.iter().collect();
        let b_cells: HexSet = b.iter().collect();
        assert_eq!(a_cells, b_cells);
    }

    #[test]
    fn test_rectangle_shear() {
        let mut grid = grid();
        grid.generate_rectangle(3, 2);
        // Each column's r values shift down by floor(q / 2)
        let expected = [
            (0, 0),
            (0, 1),
            (1, 0),
            (1, 1),
            (2, -1),
            (2, 0),
        ];
        assert_eq!(grid.len(), expected.len());
        for (q, r) in expected {
            assert!(grid.contains(Hex::new(q, r)), "({q}, {r})");
        }
    }

    #[test]
    fn test_neighbors_filtered_by_membership() {
        let mut grid = grid();
        grid.generate_parallelogram(2, 2);

        // An interior cell has all 6 neighbors
        assert_eq!(grid.neighbors(Hex::new(1, 1)).count(), 6);

        // A corner cell only has the members, in direction-index order
        let corner: Vec<Hex> = grid.neighbors(Hex::new(0, 0)).collect();
        assert_eq!(corner, vec![Hex::new(1, 0), Hex::new(0, 1)]);
    }

    #[test]
    fn test_in_range() {
        let mut grid = grid();
        grid.generate_hexagon(2);

        // Fully inside the grid: the whole radius-1 neighborhood
        assert_eq!(grid.in_range(Hex::ORIGIN, 1).len(), 7);

        // At the edge, part of the neighborhood falls off the grid
        assert_eq!(grid.in_range(Hex::new(2, 0), 1).len(), 4);

        // Degenerate radius is an empty result, not an error
        assert!(grid.in_range(Hex::ORIGIN, -1).is_empty());
    }

    #[test]
    fn test_line_not_filtered() {
        let mut grid = grid();
        grid.generate_hexagon(1);
        // Both endpoints well outside the grid; the line is still computed
        let line = grid.line(Hex::new(-5, 0), Hex::new(5, 0));
        assert_eq!(line.len(), 11);
    }

    #[test]
    fn test_conversion_pass_through() {
        let mut grid = grid();
        grid.generate_hexagon(2);
        for hex in &grid {
            assert_eq!(grid.pixel_to_hex(grid.hex_to_pixel(hex)), hex);
        }
    }

    #[test]
    fn test_extend() {
        let mut grid = grid();
        grid.extend(Hex::range(Hex::ORIGIN, 1));
        assert_eq!(grid.len(), 7);
    }
}
