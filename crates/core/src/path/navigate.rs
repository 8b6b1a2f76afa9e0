use crate::{
    grid::HexGrid,
    hex::{Hex, HexSet},
    layout::Point3,
    path::{find_path, PathGraph},
    timed,
};
use serde::{Deserialize, Serialize};

/// The heuristic used to steer a grid path query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Estimate nothing. The search degrades to uniform-cost (Dijkstra)
    /// behavior: correct, just slower. This is the default.
    Zero,
    /// Estimate with cube distance to the goal. On a unit-cost hex grid this
    /// never overstates the true remaining cost, so it converges faster
    /// without changing the length of the returned path.
    CubeDistance,
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::Zero
    }
}

/// Binds a [HexGrid] to the pathfinding engine for one navigation session.
///
/// The navigator owns the set of blocked (impassable) cells, which is
/// entirely independent of the grid's own membership: a blocked cell still
/// exists, it just refuses traversal. The host rebuilds the blocked set
/// (e.g. from [Navigator::block_segment] calls over its obstacle geometry)
/// whenever obstacles change; nothing is cached across rebuilds, so a query
/// issued after a rebuild always sees the current obstacles.
pub struct Navigator<'a> {
    grid: &'a HexGrid,
    blocked: HexSet,
    heuristic: Heuristic,
}

impl<'a> Navigator<'a> {
    /// Create a navigator over the given grid with no blocked cells and the
    /// default heuristic
    pub fn new(grid: &'a HexGrid) -> Self {
        Self::with_heuristic(grid, Heuristic::default())
    }

    /// Create a navigator that steers its queries with the given heuristic
    pub fn with_heuristic(grid: &'a HexGrid, heuristic: Heuristic) -> Self {
        Self {
            grid,
            blocked: HexSet::default(),
            heuristic,
        }
    }

    /// Mark a single cell impassable. Returns whether it was newly blocked.
    pub fn block(&mut self, hex: Hex) -> bool {
        self.blocked.insert(hex)
    }

    /// Make a single cell passable again. Returns whether it was blocked.
    pub fn unblock(&mut self, hex: Hex) -> bool {
        self.blocked.remove(&hex)
    }

    /// Is the given cell currently impassable?
    pub fn is_blocked(&self, hex: Hex) -> bool {
        self.blocked.contains(&hex)
    }

    /// Make every cell passable again
    pub fn clear_blocked(&mut self) {
        self.blocked.clear();
    }

    /// Mark every cell that a world-space obstacle segment passes through as
    /// impassable. The segment endpoints are converted to cells through the
    /// grid's layout and the cells along the connecting line are blocked,
    /// whether or not they are grid members.
    pub fn block_segment(&mut self, a: Point3, b: Point3) {
        let a = self.grid.pixel_to_hex(a);
        let b = self.grid.pixel_to_hex(b);
        self.blocked.extend(a.line_to(b));
    }

    /// Compute a shortest path between two cells, avoiding blocked cells.
    /// Returns the cells from start to goal inclusive, freshly allocated, or
    /// an empty vec when the goal is unreachable: a valid outcome that
    /// callers detect by checking emptiness, not an error.
    pub fn find_path(&self, start: Hex, goal: Hex) -> Vec<Hex> {
        timed!("Path query", find_path(self, start, goal))
    }

    /// Compute a shortest path between the cells containing two world-space
    /// positions. See [Navigator::find_path].
    pub fn find_path_world(&self, start: Point3, goal: Point3) -> Vec<Hex> {
        self.find_path(
            self.grid.pixel_to_hex(start),
            self.grid.pixel_to_hex(goal),
        )
    }
}

impl PathGraph for Navigator<'_> {
    type Node = Hex;

    /// Grid adjacency minus the blocked set
    fn neighbors(&self, node: Hex) -> Vec<Hex> {
        self.grid
            .neighbors(node)
            .filter(|hex| !self.is_blocked(*hex))
            .collect()
    }

    fn heuristic(&self, from: Hex, to: Hex) -> f64 {
        match self.heuristic {
            Heuristic::Zero => 0.0,
            Heuristic::CubeDistance => f64::from(from.distance_to(to)),
        }
    }
}
