//! This sub-module contains the basic units of the hex coordinate system:
//! cells, fractional cells, directions and translation vectors. See the
//! parent module documentation for a description of the coordinate system.

use crate::util;
use anyhow::anyhow;
use derive_more::{Add, AddAssign, Display, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use std::ops;
use strum::{EnumIter, IntoEnumIterator};

/// A single cell in a hexagonal grid, in cube coordinates.
///
/// See the module-level documentation for a description of the coordinate
/// system. Two hexes refer to the same cell iff their `(q, r)` pairs match.
///
/// ## Implementation
///
/// By definition of the coordinate system, every cell satisfies
/// `q + r + s = 0`. As such, this struct only stores `q` and `r` and derives
/// `s` as needed. That makes the invariant unbreakable: there is no way to
/// construct or mutate a `Hex` into an invalid triple, so equality and
/// hashing by `(q, r)` are exactly cell identity.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "({}, {}, {})", q, r, "self.s()")]
pub struct Hex {
    q: i32,
    r: i32,
}

impl Hex {
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Construct a new cell with the given q and r. Since q+r+s=0 for all
    /// cells, s is derived from q & r.
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Construct a new cell from a full cube triple. Returns an error if the
    /// triple doesn't satisfy `q + r + s = 0`, i.e. it doesn't name any cell
    /// in the grid.
    pub fn from_cube(q: i32, r: i32, s: i32) -> anyhow::Result<Self> {
        if q + r + s != 0 {
            Err(anyhow!(
                "invalid cube coordinate ({}, {}, {}); \
                 components must sum to zero",
                q,
                r,
                s
            ))
        } else {
            Ok(Self::new(q, r))
        }
    }

    /// The `q` component of the coordinate
    pub const fn q(self) -> i32 {
        self.q
    }

    /// The `r` component of the coordinate
    pub const fn r(self) -> i32 {
        self.r
    }

    /// The `s` component of the coordinate, derived from the other two
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Get the adjacent cell in the given direction.
    pub fn neighbor(self, direction: Direction) -> Self {
        self + direction.to_vector()
    }

    /// Get an iterator of the six cell coordinates directly adjacent to this
    /// one, in direction-index order. The iterator always contains exactly 6
    /// values; whether those cells exist in any particular grid is not this
    /// type's concern.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        Direction::iter().map(move |direction| self.neighbor(direction))
    }

    /// Calculate the cube distance between two cells: the number of neighbor
    /// hops it takes to get from one to the other. 0 if the cells are equal,
    /// 1 if they are adjacent, etc.
    pub fn distance_to(self, other: Self) -> u32 {
        // https://www.redblobgames.com/grids/hexagons/#distances
        let delta = self - other;
        delta
            .q
            .unsigned_abs()
            .max(delta.r.unsigned_abs())
            .max(delta.s.unsigned_abs())
    }

    /// Enumerate every cell coordinate within the given cube distance of a
    /// center cell, in deterministic scan order. A negative radius holds no
    /// cells, so it yields an empty vec (degenerate input, not an error).
    pub fn range(center: Self, radius: i32) -> Vec<Self> {
        if radius < 0 {
            return Vec::new();
        }
        let mut cells = Vec::with_capacity(util::hexagon_len(radius));
        for q in -radius..=radius {
            // Bound r so that s = -q-r stays within the radius too
            for r in (-radius).max(-q - radius)..=radius.min(-q + radius) {
                cells.push(Self::new(center.q + q, center.r + r));
            }
        }
        cells
    }

    /// Compute the sequence of cells that a straight line from this cell to
    /// the other passes through. The line is sampled at `distance + 1` evenly
    /// spaced points in cube space (both endpoints included) and each sample
    /// is rounded to its cell, so consecutive entries are always adjacent or
    /// identical.
    pub fn line_to(self, other: Self) -> Vec<Self> {
        let n = self.distance_to(other);
        // Nudge both endpoints off the lattice so that no sample lands
        // exactly on a cell boundary, where rounding is ambiguous. The nudge
        // itself sums to zero, keeping the invariant intact.
        let a = FractionalHex::nudged(self);
        let b = FractionalHex::nudged(other);
        let step = 1.0 / f64::from(n.max(1));
        (0..=n)
            .map(|i| FractionalHex::lerp(a, b, step * f64::from(i)).round())
            .collect()
    }
}

// Translating a cell by a vector re-derives s from the translated q & r, so
// the result is always a valid cell
impl ops::Add<HexVector> for Hex {
    type Output = Self;

    fn add(self, rhs: HexVector) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl ops::Sub for Hex {
    type Output = HexVector;

    fn sub(self, rhs: Self) -> HexVector {
        HexVector::new(self.q - rhs.q, self.r - rhs.r, self.s() - rhs.s())
    }
}

/// A cell coordinate with floating-point components. This is the
/// intermediate form used while converting world-space positions to cells
/// and while interpolating lines; the cube invariant only holds
/// approximately (accumulated float error is tolerated). A fractional hex is
/// always converted back to a [Hex] with [FractionalHex::round] before being
/// stored or compared, and is never persisted.
#[derive(Copy, Clone, Debug, PartialEq, Display)]
#[display(fmt = "({}, {}, {})", q, r, s)]
pub struct FractionalHex {
    q: f64,
    r: f64,
    s: f64,
}

impl FractionalHex {
    pub fn new(q: f64, r: f64, s: f64) -> Self {
        Self { q, r, s }
    }

    /// Convert a cell to fractional form, nudged off the integer lattice by
    /// a tiny deterministic epsilon. Used for line interpolation; see
    /// [Hex::line_to].
    fn nudged(hex: Hex) -> Self {
        Self::new(
            f64::from(hex.q()) + 1e-6,
            f64::from(hex.r()) + 1e-6,
            f64::from(hex.s()) - 2e-6,
        )
    }

    /// Round this fractional coordinate to the nearest cell such that the
    /// cube invariant holds exactly.
    ///
    /// Each component is rounded to the nearest integer independently, which
    /// can leave the triple summing to ±1. The component whose rounding
    /// introduced the largest error is then recomputed as the negated sum of
    /// the other two, which restores the invariant. On equal error the first
    /// axis in canonical q, r, s order wins.
    pub fn round(self) -> Hex {
        let q = self.q.round();
        let r = self.r.round();
        let s = self.s.round();
        let q_diff = (q - self.q).abs();
        let r_diff = (r - self.r).abs();
        let s_diff = (s - self.s).abs();
        if q_diff >= r_diff && q_diff >= s_diff {
            Hex::new((-r - s) as i32, r as i32)
        } else if r_diff >= s_diff {
            Hex::new(q as i32, (-q - s) as i32)
        } else {
            // s absorbed the error; since cells derive s, the rounded q & r
            // stand as-is
            Hex::new(q as i32, r as i32)
        }
    }

    /// Linearly interpolate between two fractional coordinates.
    /// `t = 0` yields `a`, `t = 1` yields `b`.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self::new(
            a.q + (b.q - a.q) * t,
            a.r + (b.r - a.r) * t,
            a.s + (b.s - a.s) * t,
        )
    }
}

/// The 6 directions in which hex cells line up side-to-side, indexed 0..6
/// counter-clockwise starting due east. The compass names assume a frame
/// where `+r` points south (the usual screen-space convention); in any other
/// frame the names rotate but the cube offsets do not.
#[derive(
    Copy, Clone, Debug, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// East
    E,
    /// Northeast
    NE,
    /// Northwest
    NW,
    /// West
    W,
    /// Southwest
    SW,
    /// Southeast
    SE,
}

impl Direction {
    /// All directions, in index order. The ordering is a fixed convention:
    /// every direction's opposite sits exactly 3 positions away.
    pub const ALL: [Self; 6] =
        [Self::E, Self::NE, Self::NW, Self::W, Self::SW, Self::SE];

    /// The index of this direction within [Self::ALL]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Look a direction up by its index. Returns an error for any index
    /// outside `0..6`.
    pub fn from_index(index: u8) -> anyhow::Result<Self> {
        Self::ALL.get(index as usize).copied().ok_or_else(|| {
            anyhow!("invalid direction index {}; must be in 0..6", index)
        })
    }

    /// Get the direction directly opposite this one.
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() as usize + 3) % Self::ALL.len()]
    }

    /// Convert this direction into the unit offset vector that moves a cell
    /// one step in this direction. Each component is one of `0`, `1` or `-1`
    /// and the three always sum to zero.
    pub const fn to_vector(self) -> HexVector {
        match self {
            Self::E => HexVector::new(1, 0, -1),
            Self::NE => HexVector::new(1, -1, 0),
            Self::NW => HexVector::new(0, -1, 1),
            Self::W => HexVector::new(-1, 0, 1),
            Self::SW => HexVector::new(-1, 1, 0),
            Self::SE => HexVector::new(0, 1, -1),
        }
    }
}

/// A translation in cube space. This is an `(q, r, s)` kind of vector, not a
/// list vector.
///
/// ## Validation
///
/// Unlike cells, hex vectors **cannot be validated**: an arbitrary vector
/// may or may not preserve the cube invariant when applied. Applying a
/// vector to a [Hex] therefore re-derives `s` from the translated `q` and
/// `r`; the unit vectors produced by [Direction::to_vector] always sum to
/// zero, so for those the full triple is preserved.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Add,
    Sub,
    Neg,
    Mul,
    AddAssign,
    SubAssign,
)]
#[display(fmt = "({}, {}, {})", q, r, s)]
pub struct HexVector {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl HexVector {
    pub const fn new(q: i32, r: i32, s: i32) -> Self {
        Self { q, r, s }
    }
}
