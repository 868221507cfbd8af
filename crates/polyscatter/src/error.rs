//! Error type shared by triangulation, sampling, and batch jitter.

use std::fmt;

use thiserror::Error;

/// Errors raised by this crate. Nothing is recovered internally; every failure
/// propagates to the caller with the polygon index when one is known.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum JitterError {
    /// The decomposition produced nothing usable (empty or degenerate polygon).
    #[error("geometry failure{}: {reason}", At(.polygon))]
    Geometry {
        polygon: Option<usize>,
        reason: String,
    },
    /// A produced triangle has non-positive or non-finite area.
    #[error("invalid geometry{}: {reason}", At(.polygon))]
    InvalidGeometry {
        polygon: Option<usize>,
        reason: String,
    },
    #[error("cannot sample from an empty triangulation")]
    EmptyTriangulation,
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    #[error("points CRS `{points}` does not match polygons CRS `{polygons}`")]
    CrsMismatch { points: String, polygons: String },
}

impl JitterError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::Geometry {
            polygon: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            polygon: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Attach the index of the polygon that caused the failure.
    pub fn at_polygon(self, idx: usize) -> Self {
        match self {
            Self::Geometry { reason, .. } => Self::Geometry {
                polygon: Some(idx),
                reason,
            },
            Self::InvalidGeometry { reason, .. } => Self::InvalidGeometry {
                polygon: Some(idx),
                reason,
            },
            other => other,
        }
    }

    /// Index of the offending polygon, if attached.
    pub fn polygon(&self) -> Option<usize> {
        match self {
            Self::Geometry { polygon, .. } | Self::InvalidGeometry { polygon, .. } => *polygon,
            _ => None,
        }
    }
}

struct At<'a>(&'a Option<usize>);

impl fmt::Display for At<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(idx) => write!(f, " (polygon {idx})"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_polygon_index() {
        let e = JitterError::geometry("triangulation produced no triangles").at_polygon(3);
        assert_eq!(e.polygon(), Some(3));
        assert_eq!(
            e.to_string(),
            "geometry failure (polygon 3): triangulation produced no triangles"
        );
        let bare = JitterError::invalid_geometry("degenerate triangle");
        assert_eq!(bare.to_string(), "invalid geometry: degenerate triangle");
    }

    #[test]
    fn at_polygon_leaves_other_variants_alone() {
        let e = JitterError::EmptyTriangulation.at_polygon(1);
        assert_eq!(e, JitterError::EmptyTriangulation);
        assert_eq!(e.polygon(), None);
    }
}
