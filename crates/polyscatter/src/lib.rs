//! Area-uniform point jitter inside polygons.
//!
//! Points assigned to a region are replaced by random points drawn uniformly
//! from that region's area, hiding exact locations while keeping regional
//! membership.
//!
//! Layout
//! - `geom`: validated `Polygon`, `Triangle`, `Vec2`.
//! - `triangulate`: decomposition plus area weights (`Triangulation`).
//! - `sample`: weighted triangle pick and square-root barycentric placement.
//! - `jitter`: assignment, CRS check, and seeded batch orchestration.

pub mod error;
pub mod geom;
pub mod jitter;
pub mod sample;
pub mod triangulate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::JitterError;
pub use geom::{Polygon, Triangle, Vec2};
pub use jitter::{
    assign_points, jitter_assigned, jitter_layers, jitter_points, JitterCfg, PointLayer,
    PolygonLayer,
};
pub use sample::{barycentric_weights, sample_in_triangle, sample_uniform_point};
pub use triangulate::{triangulate, triangulate_all, Triangulation};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::JitterError;
    pub use crate::geom::{Polygon, Triangle, Vec2};
    pub use crate::jitter::{jitter_layers, jitter_points, JitterCfg, PointLayer, PolygonLayer};
    pub use crate::sample::sample_uniform_point;
    pub use crate::triangulate::{triangulate, triangulate_all, Triangulation};
}
