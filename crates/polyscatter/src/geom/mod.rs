//! Plane geometry consumed by the triangulator and the sampler.
//!
//! Purpose
//! - Provide an explicit, validated `Polygon` (exterior ring plus optional
//!   holes) instead of accepting any polygon-like value.
//! - Keep triangles as plain vertex triples over `Vec2`; area and containment
//!   are delegated to `geo` where it already has the predicate.
//!
//! Code cross-refs: `crate::triangulate::Triangulation`, `crate::sample`.

mod types;
mod util;

pub use types::{Polygon, Triangle, Vec2};
pub use util::cross;
