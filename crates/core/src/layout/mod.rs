//! Conversion between hex cells and world-space positions. A [Layout] is an
//! immutable bundle of the four pieces of geometry configuration (embedding
//! plane, orientation, per-axis cell size, origin offset) and exposes the
//! affine transforms between the two spaces. It holds no mutable state; a
//! grid owns exactly one and shares it read-only.

mod unit;

pub use self::unit::*;

use crate::{
    config::GridConfig,
    hex::{FractionalHex, Hex},
};
use anyhow::{anyhow, Context};
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64;
use validator::Validate;

/// Which two of the three world axes host the 2D hex layout. The plane only
/// determines where in world space the 2D math lands; it has no effect on
/// hex-space results.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldPlane {
    /// The grid spans the x and y axes; z is always zero
    XY,
    /// The grid spans the x and z axes; y is always zero
    XZ,
}

impl WorldPlane {
    /// Place a 2D point into world space, with the inactive axis set to zero
    pub fn embed(self, x: f64, y: f64) -> Point3 {
        match self {
            Self::XY => Point3::new(x, y, 0.0),
            Self::XZ => Point3::new(x, 0.0, y),
        }
    }

    /// Project a world-space point onto the two active axes, dropping the
    /// inactive one
    pub fn project(self, point: Point3) -> (f64, f64) {
        match self {
            Self::XY => (point.x, point.y),
            Self::XZ => (point.x, point.z),
        }
    }
}

/// The two supported hex tilings. This is the config-level selector; the
/// matching transform coefficients live in [Orientation].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexOrientation {
    /// Cells have a vertex at the top; rows of cells share an `r` value
    Pointy,
    /// Cells have a flat edge at the top; columns of cells share a `q` value
    Flat,
}

impl HexOrientation {
    /// Get the transform coefficients for this tiling
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Pointy => Orientation::pointy(),
            Self::Flat => Orientation::flat(),
        }
    }
}

/// The transform coefficients of one hex tiling: a forward matrix (axial to
/// unit world), its inverse, and the angle of the first polygon corner in
/// sixths of a full turn. Fixed to one of two presets; never mutated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Orientation {
    forward: Matrix2<f64>,
    inverse: Matrix2<f64>,
    start_angle: f64,
}

impl Orientation {
    /// Coefficients for the pointy-top tiling
    fn pointy() -> Self {
        let sqrt_3 = 3.0_f64.sqrt();
        Self {
            forward: Matrix2::new(sqrt_3, sqrt_3 / 2.0, 0.0, 3.0 / 2.0),
            inverse: Matrix2::new(sqrt_3 / 3.0, -1.0 / 3.0, 0.0, 2.0 / 3.0),
            start_angle: 0.5,
        }
    }

    /// Coefficients for the flat-top tiling
    fn flat() -> Self {
        let sqrt_3 = 3.0_f64.sqrt();
        Self {
            forward: Matrix2::new(3.0 / 2.0, 0.0, sqrt_3 / 2.0, sqrt_3),
            inverse: Matrix2::new(2.0 / 3.0, 0.0, -1.0 / 3.0, sqrt_3 / 3.0),
            start_angle: 0.0,
        }
    }
}

/// A stateless holder of the cell-to-world transform functions. Constructed
/// from a validated [GridConfig], so by the time a layout exists its
/// conversions are total: a degenerate cell size (which would divide by
/// zero in [Layout::pixel_to_hex]) is rejected up front rather than left to
/// produce NaN coordinates downstream.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    plane: WorldPlane,
    orientation: Orientation,
    size: Vector2<f64>,
    origin: Vector2<f64>,
}

impl Layout {
    /// Build a layout from the given config. Returns an error if the config
    /// is invalid (zero or non-finite cell size, non-finite origin).
    pub fn new(config: &GridConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid grid config")?;
        Ok(Self {
            plane: config.plane,
            orientation: config.orientation.orientation(),
            size: Vector2::new(config.cell_size.x, config.cell_size.y),
            origin: Vector2::new(config.origin.x, config.origin.y),
        })
    }

    /// The embedding plane this layout places cells into
    pub fn plane(&self) -> WorldPlane {
        self.plane
    }

    /// Convert a cell to the world-space position of its center.
    pub fn hex_to_pixel(&self, hex: Hex) -> Point3 {
        let axial = Vector2::new(f64::from(hex.q()), f64::from(hex.r()));
        let scaled = (self.orientation.forward * axial)
            .component_mul(&self.size)
            + self.origin;
        self.plane.embed(scaled.x, scaled.y)
    }

    /// Convert a world-space position to the cell containing it. The exact
    /// left-inverse of [Layout::hex_to_pixel] for any cell center, and the
    /// nearest cell for every other position.
    pub fn pixel_to_hex(&self, point: Point3) -> Hex {
        let (x, y) = self.plane.project(point);
        let normalized =
            (Vector2::new(x, y) - self.origin).component_div(&self.size);
        let axial = self.orientation.inverse * normalized;
        FractionalHex::new(axial.x, axial.y, -axial.x - axial.y).round()
    }

    /// Compute the offset of one hexagon vertex relative to the cell center.
    /// Returns an error for any corner index outside `0..6`.
    pub fn corner_offset(&self, corner: u8) -> anyhow::Result<Point3> {
        if usize::from(corner) >= POLYGON_CORNERS {
            Err(anyhow!(
                "invalid corner index {}; must be in 0..{}",
                corner,
                POLYGON_CORNERS
            ))
        } else {
            Ok(self.corner_offset_unchecked(corner))
        }
    }

    fn corner_offset_unchecked(&self, corner: u8) -> Point3 {
        let angle = 2.0 * f64::consts::PI
            * (self.orientation.start_angle - f64::from(corner))
            / POLYGON_CORNERS as f64;
        self.plane
            .embed(self.size.x * angle.cos(), self.size.y * angle.sin())
    }

    /// Compute the world-space positions of all six vertices of a cell, in
    /// fixed rotational order. Pure function of the cell and this layout.
    pub fn polygon_corners(&self, hex: Hex) -> [Point3; 6] {
        let center = self.hex_to_pixel(hex);
        let mut corners = [Point3::default(); POLYGON_CORNERS];
        for (corner, out) in corners.iter_mut().enumerate() {
            *out = center + self.corner_offset_unchecked(corner as u8);
        }
        corners
    }
}

const POLYGON_CORNERS: usize = 6;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use assert_approx_eq::assert_approx_eq;

    fn make_layout(plane: WorldPlane, orientation: HexOrientation) -> Layout {
        // Deliberately lopsided size and a shifted origin, so any transform
        // asymmetry would show up in the round trip
        Layout::new(&GridConfig {
            plane,
            orientation,
            cell_size: Point2::new(10.0, 7.5),
            origin: Point2::new(-3.0, 12.0),
        })
        .unwrap()
    }

    #[test]
    fn test_pixel_round_trip() {
        for plane in [WorldPlane::XY, WorldPlane::XZ] {
            for orientation in [HexOrientation::Pointy, HexOrientation::Flat]
            {
                let layout = make_layout(plane, orientation);
                for hex in Hex::range(Hex::ORIGIN, 5) {
                    assert_eq!(
                        layout.pixel_to_hex(layout.hex_to_pixel(hex)),
                        hex,
                        "{plane:?}/{orientation:?} at {hex}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_inactive_axis_is_zero() {
        let xy = make_layout(WorldPlane::XY, HexOrientation::Pointy);
        let xz = make_layout(WorldPlane::XZ, HexOrientation::Pointy);
        let hex = Hex::new(3, -2);
        assert_eq!(xy.hex_to_pixel(hex).z, 0.0);
        assert_eq!(xz.hex_to_pixel(hex).y, 0.0);
        for corner in xz.polygon_corners(hex) {
            assert_eq!(corner.y, 0.0);
        }
    }

    #[test]
    fn test_plane_has_no_hex_space_effect() {
        // The same 2D math lands in different world axes, but projecting
        // back out gives identical active-axis values
        let xy = make_layout(WorldPlane::XY, HexOrientation::Flat);
        let xz = make_layout(WorldPlane::XZ, HexOrientation::Flat);
        let hex = Hex::new(-1, 4);
        let (ax, ay) = WorldPlane::XY.project(xy.hex_to_pixel(hex));
        let (bx, by) = WorldPlane::XZ.project(xz.hex_to_pixel(hex));
        assert_approx_eq!(ax, bx);
        assert_approx_eq!(ay, by);
    }

    #[test]
    fn test_corner_offsets() {
        let layout = make_layout(WorldPlane::XY, HexOrientation::Pointy);
        // Pointy tiling starts half a step around the circle: the first
        // corner sits at 30 degrees
        let corner = layout.corner_offset(0).unwrap();
        assert_approx_eq!(corner.x, 10.0 * (3.0_f64.sqrt() / 2.0));
        assert_approx_eq!(corner.y, 7.5 * 0.5);

        let layout = make_layout(WorldPlane::XY, HexOrientation::Flat);
        // Flat tiling starts at 0 degrees
        let corner = layout.corner_offset(0).unwrap();
        assert_approx_eq!(corner.x, 10.0);
        assert_approx_eq!(corner.y, 0.0);
    }

    #[test]
    fn test_corner_index_bounds() {
        let layout = make_layout(WorldPlane::XY, HexOrientation::Pointy);
        for corner in 0..6 {
            assert!(layout.corner_offset(corner).is_ok());
        }
        assert!(layout.corner_offset(6).is_err());
    }

    #[test]
    fn test_polygon_corners_centered() {
        let layout = make_layout(WorldPlane::XY, HexOrientation::Flat);
        let hex = Hex::new(2, 2);
        let center = layout.hex_to_pixel(hex);
        let corners = layout.polygon_corners(hex);
        assert_eq!(corners.len(), 6);
        // Opposite corners average back to the center
        for i in 0..3 {
            let mid = (corners[i] + corners[i + 3]) / 2.0;
            assert_approx_eq!(mid.x, center.x);
            assert_approx_eq!(mid.y, center.y);
        }
    }

    #[test]
    fn test_degenerate_size_rejected() {
        let config = GridConfig {
            cell_size: Point2::new(0.0, 1.0),
            ..GridConfig::default()
        };
        assert!(Layout::new(&config).is_err());

        let config = GridConfig {
            cell_size: Point2::new(1.0, f64::NAN),
            ..GridConfig::default()
        };
        assert!(Layout::new(&config).is_err());
    }
}
