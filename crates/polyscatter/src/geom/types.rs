//! Point, triangle, and polygon types.
//!
//! - `Vec2`: a 2D coordinate (input location or jittered output).
//! - `Triangle`: three vertices in fixed order; the unit of decomposition.
//! - `Polygon`: validated exterior ring plus holes, backed by `geo::Polygon`.

use geo::{Area, Contains};
use nalgebra::Vector2;

use super::util::{checked_ring, cross, open_ring};
use crate::error::JitterError;

/// 2D point/vector.
pub type Vec2 = Vector2<f64>;

/// Triangle `(a, b, c)`. Vertex order is kept as produced by the decomposition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    #[inline]
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Unsigned area. NaN if any vertex is non-finite.
    #[inline]
    pub fn area(&self) -> f64 {
        0.5 * cross(self.a, self.b, self.c).abs()
    }

    /// Point with barycentric weights `w` over `(a, b, c)`.
    #[inline]
    pub fn at_barycentric(&self, w: [f64; 3]) -> Vec2 {
        self.a * w[0] + self.b * w[1] + self.c * w[2]
    }

    /// Closed containment with slack `eps` on the edge tests (either orientation).
    pub fn contains_eps(&self, p: Vec2, eps: f64) -> bool {
        let d1 = cross(self.a, self.b, p);
        let d2 = cross(self.b, self.c, p);
        let d3 = cross(self.c, self.a, p);
        let has_neg = d1 < -eps || d2 < -eps || d3 < -eps;
        let has_pos = d1 > eps || d2 > eps || d3 > eps;
        !(has_neg && has_pos)
    }
}

impl From<geo::Triangle<f64>> for Triangle {
    fn from(t: geo::Triangle<f64>) -> Self {
        let [a, b, c] = t.to_array();
        Self::new(Vec2::new(a.x, a.y), Vec2::new(b.x, b.y), Vec2::new(c.x, c.y))
    }
}

/// Simple (possibly concave) polygon with optional holes.
///
/// Invariants:
/// - Every ring has at least 3 distinct vertices and finite coordinates.
/// - Rings are stored closed (as `geo` does); accessors return them open.
///
/// Self-intersection is not checked here; a non-simple ring surfaces as a
/// triangulation failure or a biased decomposition.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    inner: geo::Polygon<f64>,
}

impl Polygon {
    /// Polygon from an exterior ring and hole rings (closing vertex optional).
    pub fn new(exterior: &[Vec2], interiors: &[Vec<Vec2>]) -> Result<Self, JitterError> {
        let ext = checked_ring(exterior, "exterior")?;
        let holes = interiors
            .iter()
            .enumerate()
            .map(|(k, ring)| checked_ring(ring, &format!("interior {k}")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            inner: geo::Polygon::new(ext, holes),
        })
    }

    /// Polygon without holes.
    pub fn from_ring(exterior: &[Vec2]) -> Result<Self, JitterError> {
        Self::new(exterior, &[])
    }

    /// Exterior ring without the closing vertex.
    pub fn exterior(&self) -> Vec<Vec2> {
        open_ring(self.inner.exterior())
    }

    /// Hole rings without closing vertices.
    pub fn interiors(&self) -> Vec<Vec<Vec2>> {
        self.inner.interiors().iter().map(open_ring).collect()
    }

    /// Unsigned area (holes subtracted).
    pub fn area(&self) -> f64 {
        self.inner.unsigned_area()
    }

    /// Strict interior containment; boundary points are outside.
    pub fn contains(&self, p: Vec2) -> bool {
        self.inner.contains(&geo::Point::new(p.x, p.y))
    }

    pub fn as_geo(&self) -> &geo::Polygon<f64> {
        &self.inner
    }
}

impl TryFrom<geo::Polygon<f64>> for Polygon {
    type Error = JitterError;

    fn try_from(poly: geo::Polygon<f64>) -> Result<Self, Self::Error> {
        let holes: Vec<Vec<Vec2>> = poly.interiors().iter().map(open_ring).collect();
        Self::new(&open_ring(poly.exterior()), &holes)
    }
}
