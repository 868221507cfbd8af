use geo::LineString;

use super::types::Vec2;
use crate::error::JitterError;

/// Twice the signed area of triangle `abc`. Positive for counterclockwise order.
#[inline]
pub fn cross(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Validate one boundary ring and convert it to a `geo` line string.
///
/// The closing vertex is optional. Consecutive duplicates are collapsed before
/// counting vertices.
pub(crate) fn checked_ring(verts: &[Vec2], what: &str) -> Result<LineString<f64>, JitterError> {
    if verts.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(JitterError::invalid_input(format!(
            "{what} ring has non-finite coordinates"
        )));
    }
    let mut pts: Vec<Vec2> = verts.to_vec();
    pts.dedup();
    if pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    if pts.len() < 3 {
        return Err(JitterError::invalid_input(format!(
            "{what} ring needs at least 3 distinct vertices, got {}",
            pts.len()
        )));
    }
    Ok(pts.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>().into())
}

/// Ring coordinates without the closing vertex.
pub(crate) fn open_ring(ring: &LineString<f64>) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = ring.coords().map(|c| Vec2::new(c.x, c.y)).collect();
    if out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}
