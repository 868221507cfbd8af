//! Polygon decomposition into area-weighted triangles.
//!
//! Purpose
//! - Decompose each polygon once into non-overlapping triangles (ear clipping
//!   via `geo`, which handles concave rings and holes).
//! - Attach the selection probability `area_i / Σ area_j` to every triangle and
//!   prebuild the weighted-index sampler used by `crate::sample`.
//!
//! Degenerate pieces are a hard failure: dropping a zero-area or non-finite
//! triangle would skew the distribution over the remaining area.

use geo::TriangulateEarcut;
use rand::distributions::WeightedIndex;

use crate::error::JitterError;
use crate::geom::{Polygon, Triangle};

/// Tolerance for `Σ prob_i == 1`.
pub const PROB_SUM_EPS: f64 = 1e-9;

/// Triangles of one polygon plus their selection probabilities.
///
/// Invariants:
/// - `triangles` is non-empty and `probs.len() == triangles.len()`.
/// - Every probability is strictly positive and they sum to 1 within `PROB_SUM_EPS`.
#[derive(Clone, Debug)]
pub struct Triangulation {
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) probs: Vec<f64>,
    pub(crate) picker: WeightedIndex<f64>,
    pub(crate) area: f64,
}

impl Triangulation {
    /// Weight an existing decomposition by triangle area.
    ///
    /// Errors
    /// - `Geometry` if `triangles` is empty.
    /// - `InvalidGeometry` if any triangle has non-positive or non-finite area.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Result<Self, JitterError> {
        if triangles.is_empty() {
            return Err(JitterError::geometry("triangulation produced no triangles"));
        }
        let mut areas = Vec::with_capacity(triangles.len());
        for (k, t) in triangles.iter().enumerate() {
            let a = t.area();
            if !(a.is_finite() && a > 0.0) {
                return Err(JitterError::invalid_geometry(format!(
                    "degenerate triangle {k} (area {a})"
                )));
            }
            areas.push(a);
        }
        let total: f64 = areas.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(JitterError::invalid_geometry(format!(
                "total triangle area is not usable ({total})"
            )));
        }
        let probs: Vec<f64> = areas.iter().map(|a| a / total).collect();
        let picker = WeightedIndex::new(&probs)
            .map_err(|e| JitterError::invalid_geometry(format!("triangle weights: {e}")))?;
        Ok(Self {
            triangles,
            probs,
            picker,
            area: total,
        })
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Selection probability per triangle, parallel to `triangles()`.
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Sum of triangle areas (equals the polygon area up to rounding).
    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Triangulate one polygon and weight its triangles by area.
pub fn triangulate(polygon: &Polygon) -> Result<Triangulation, JitterError> {
    let triangles: Vec<Triangle> = polygon
        .as_geo()
        .earcut_triangles_iter()
        .map(Triangle::from)
        .collect();
    Triangulation::from_triangles(triangles)
}

/// Triangulate every polygon in order; index `i` of the result belongs to polygon `i`.
///
/// Fails on the first polygon that cannot be triangulated, tagging the error
/// with that polygon's index.
pub fn triangulate_all(polygons: &[Polygon]) -> Result<Vec<Triangulation>, JitterError> {
    let out = polygons
        .iter()
        .enumerate()
        .map(|(i, p)| triangulate(p).map_err(|e| e.at_polygon(i)))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(
        polygons = out.len(),
        triangles = out.iter().map(Triangulation::len).sum::<usize>(),
        "triangulated polygons"
    );
    Ok(out)
}
