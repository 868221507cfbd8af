//! Batch jitter: move every point to a uniform random location inside its
//! enclosing polygon.
//!
//! Flow
//! - Assign each point to the first polygon whose interior contains it.
//! - Triangulate every polygon once into an arena indexed like the input.
//! - Walk the points in input order with one seeded `StdRng`, drawing one
//!   sample per assigned point. Unassigned or missing points stay `None`.
//!
//! Sampling order is part of the reproducibility contract; do not parallelize
//! the sampling loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::JitterError;
use crate::geom::{Polygon, Vec2};
use crate::sample::sample_uniform_point;
use crate::triangulate::{triangulate_all, Triangulation};

/// Batch configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JitterCfg {
    /// Seed for the shared generator; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl JitterCfg {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// The generator for one batch.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Points plus an optional CRS tag. `None` entries are missing geometries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointLayer {
    pub crs: Option<String>,
    pub points: Vec<Option<Vec2>>,
}

/// Candidate polygons plus their (required) CRS tag.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonLayer {
    pub crs: String,
    pub polygons: Vec<Polygon>,
}

/// Index of the first polygon whose interior contains each point.
///
/// Boundary points and missing points map to `None`.
pub fn assign_points(points: &[Option<Vec2>], polygons: &[Polygon]) -> Vec<Option<usize>> {
    points
        .iter()
        .map(|p| p.and_then(|p| polygons.iter().position(|poly| poly.contains(p))))
        .collect()
}

/// Draw one point per assigned entry, in input order, from the shared `rng`.
///
/// Errors
/// - `InvalidInput` if an assignment points past `triangulations`.
/// - Any sampler error, unchanged apart from the polygon index.
pub fn jitter_assigned<R: Rng + ?Sized>(
    assignments: &[Option<usize>],
    triangulations: &[Triangulation],
    rng: &mut R,
) -> Result<Vec<Option<Vec2>>, JitterError> {
    let mut out = Vec::with_capacity(assignments.len());
    for assigned in assignments {
        let Some(idx) = *assigned else {
            out.push(None);
            continue;
        };
        let tri = triangulations.get(idx).ok_or_else(|| {
            JitterError::invalid_input(format!(
                "polygon index {idx} out of range ({} triangulations)",
                triangulations.len()
            ))
        })?;
        let p = sample_uniform_point(tri, rng).map_err(|e| e.at_polygon(idx))?;
        out.push(Some(p));
    }
    Ok(out)
}

/// Jitter `points` within `polygons`. Output is parallel to `points`.
pub fn jitter_points(
    points: &[Option<Vec2>],
    polygons: &[Polygon],
    cfg: &JitterCfg,
) -> Result<Vec<Option<Vec2>>, JitterError> {
    let assignments = assign_points(points, polygons);
    let triangulations = triangulate_all(polygons)?;
    let mut rng = cfg.rng();
    let out = jitter_assigned(&assignments, &triangulations, &mut rng)?;
    let assigned = assignments.iter().filter(|a| a.is_some()).count();
    tracing::debug!(
        points = points.len(),
        assigned,
        unresolved = points.len() - assigned,
        seed = ?cfg.seed,
        "jittered points"
    );
    Ok(out)
}

/// Layer-level entry point: checks CRS alignment, then jitters.
///
/// Errors
/// - `InvalidInput` if the polygon CRS is blank.
/// - `CrsMismatch` if the points carry a CRS different from the polygons'.
pub fn jitter_layers(
    points: &PointLayer,
    polygons: &PolygonLayer,
    cfg: &JitterCfg,
) -> Result<PointLayer, JitterError> {
    if polygons.crs.trim().is_empty() {
        return Err(JitterError::invalid_input("polygons must have a CRS"));
    }
    if let Some(crs) = &points.crs {
        if crs != &polygons.crs {
            return Err(JitterError::CrsMismatch {
                points: crs.clone(),
                polygons: polygons.crs.clone(),
            });
        }
    }
    let jittered = jitter_points(&points.points, &polygons.polygons, cfg)?;
    Ok(PointLayer {
        crs: Some(polygons.crs.clone()),
        points: jittered,
    })
}
