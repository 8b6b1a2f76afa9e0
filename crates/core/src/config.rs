use crate::layout::{HexOrientation, Point2, WorldPlane};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Configuration that defines the geometry of a hex grid. This is a
/// construction-time surface only: once a grid exists, its geometry never
/// changes. Two grids built from the same config always agree on every
/// cell-to-world conversion.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_geometry"))]
pub struct GridConfig {
    /// Which two world axes the grid occupies. Purely an embedding choice;
    /// see [WorldPlane].
    pub plane: WorldPlane,

    /// Pointy-top or flat-top tiling. See [HexOrientation].
    pub orientation: HexOrientation,

    /// Cell radius along each of the two active axes (center to vertex).
    /// The two components may differ, which stretches cells. Neither may be
    /// zero or non-finite; that would make the world-to-cell conversion
    /// divide by zero, so it's rejected when the layout is built.
    pub cell_size: Point2,

    /// World-space offset of the cell `(0, 0, 0)` center, expressed in the
    /// two active axes.
    pub origin: Point2,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            plane: WorldPlane::XY,
            orientation: HexOrientation::Pointy,
            cell_size: Point2::new(1.0, 1.0),
            origin: Point2::new(0.0, 0.0),
        }
    }
}

/// Struct-level check for geometry that individual field validators can't
/// express: sizes must be finite and non-zero, the origin finite.
fn validate_geometry(config: &GridConfig) -> Result<(), ValidationError> {
    if !config.cell_size.x.is_finite()
        || !config.cell_size.y.is_finite()
        || config.cell_size.x == 0.0
        || config.cell_size.y == 0.0
    {
        return Err(ValidationError::new("degenerate_cell_size"));
    }
    if !config.origin.x.is_finite() || !config.origin.y.is_finite() {
        return Err(ValidationError::new("non_finite_origin"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn test_degenerate_sizes_rejected() {
        for cell_size in [
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(f64::NAN, 1.0),
            Point2::new(1.0, f64::INFINITY),
        ] {
            let config = GridConfig {
                cell_size,
                ..GridConfig::default()
            };
            assert!(config.validate().is_err(), "{cell_size}");
        }
    }

    #[test]
    fn test_non_finite_origin_rejected() {
        let config = GridConfig {
            origin: Point2::new(f64::NAN, 0.0),
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
