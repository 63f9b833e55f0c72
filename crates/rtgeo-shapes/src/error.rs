//! Error types for primitive construction.

use thiserror::Error;

/// Rejection of malformed primitive input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Polygon with fewer vertices than its type requires.
    #[error("{shape} requires at least {required} points, got {actual}")]
    TooFewPoints {
        /// Type name of the rejected primitive.
        shape: &'static str,
        /// Minimum vertex count.
        required: usize,
        /// Vertex count supplied.
        actual: usize,
    },

    /// Curve control points not of the form `3n + 1` with `n >= 1`.
    #[error("curve requires 3n + 1 control points (n >= 1), got {0}")]
    InvalidControlPointCount(usize),

    /// Polygon vertex farther than tolerance from the polygon plane.
    #[error("polygon vertex {index} lies {distance} off the polygon plane")]
    NonPlanar {
        /// Index of the offending vertex.
        index: usize,
        /// Its distance from the plane.
        distance: f64,
    },

    /// Vertices span no area, so no normal exists.
    #[error("{0} is degenerate (zero area)")]
    Degenerate(&'static str),
}
