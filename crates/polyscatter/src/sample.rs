//! Uniform point sampling over a triangulated polygon.
//!
//! Model
//! - Pick triangle `i` with probability `probs[i]` (one weighted categorical draw).
//! - Place the point with two unit draws `r1, r2` and the square-root transform
//!   `(1 - √r1)·A + √r1·(1 - r2)·B + √r1·r2·C`.
//!
//! Draw order per call is fixed (categorical, then `r1`, then `r2`), so a
//! seeded generator replays a whole batch exactly.

use rand::distributions::Distribution;
use rand::Rng;

use crate::error::JitterError;
use crate::geom::{Triangle, Vec2};
use crate::triangulate::Triangulation;

/// Barycentric weights over `(A, B, C)` for unit draws `r1, r2`.
///
/// Uniform over the triangle when `r1, r2` are uniform on `[0, 1)`; without
/// the square root the samples would crowd vertex `A`.
#[inline]
pub fn barycentric_weights(r1: f64, r2: f64) -> [f64; 3] {
    let s = r1.sqrt();
    [1.0 - s, s * (1.0 - r2), s * r2]
}

/// Uniform point inside `tri`. Consumes exactly two `f64` draws.
pub fn sample_in_triangle<R: Rng + ?Sized>(tri: &Triangle, rng: &mut R) -> Vec2 {
    let r1: f64 = rng.gen();
    let r2: f64 = rng.gen();
    tri.at_barycentric(barycentric_weights(r1, r2))
}

/// Uniform point inside the polygon that `tri` decomposes.
///
/// Errors
/// - `EmptyTriangulation` if there is nothing to sample from.
pub fn sample_uniform_point<R: Rng + ?Sized>(
    tri: &Triangulation,
    rng: &mut R,
) -> Result<Vec2, JitterError> {
    if tri.triangles.is_empty() {
        return Err(JitterError::EmptyTriangulation);
    }
    let idx = tri.picker.sample(rng);
    Ok(sample_in_triangle(&tri.triangles[idx], rng))
}

impl Triangulation {
    /// Method form of [`sample_uniform_point`].
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec2, JitterError> {
        sample_uniform_point(self, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Polygon;
    use crate::triangulate::triangulate;
    use nalgebra::vector;
    use proptest::prelude::*;
    use rand::distributions::WeightedIndex;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn poly(pts: &[(f64, f64)]) -> Polygon {
        let ring: Vec<Vec2> = pts.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
        Polygon::from_ring(&ring).unwrap()
    }

    fn l_shape() -> Polygon {
        poly(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ])
    }

    #[test]
    fn weights_sum_to_one_and_hit_corners() {
        for &(r1, r2) in &[(0.0, 0.0), (0.25, 0.5), (0.999, 0.001), (0.5, 0.999)] {
            let w = barycentric_weights(r1, r2);
            assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
            assert!(w.iter().all(|&x| x >= 0.0));
        }
        assert_eq!(barycentric_weights(0.0, 0.7), [1.0, 0.0, 0.0]);
        assert_eq!(barycentric_weights(1.0, 0.0), [0.0, 1.0, 0.0]);
        assert_eq!(barycentric_weights(1.0, 1.0), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn samples_stay_inside_concave_polygon() {
        let p = l_shape();
        let t = triangulate(&p).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..2000 {
            let x = sample_uniform_point(&t, &mut rng).unwrap();
            assert!(p.contains(x), "{x:?} escaped the L-shape");
        }
    }

    #[test]
    fn samples_are_uniform_over_area() {
        // Each unit cell of the L-shape holds a third of the area.
        let t = triangulate(&l_shape()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let n = 30_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            let x = t.sample(&mut rng).unwrap();
            let cell = match (x.x < 1.0, x.y < 1.0) {
                (true, true) => 0,
                (false, true) => 1,
                (true, false) => 2,
                (false, false) => panic!("sample in the missing cell: {x:?}"),
            };
            counts[cell] += 1;
        }
        for c in counts {
            let frac = c as f64 / n as f64;
            assert!((frac - 1.0 / 3.0).abs() < 0.02, "cell fraction {frac}");
        }
    }

    #[test]
    fn triangle_sampling_is_not_vertex_biased() {
        // For a uniform triangle the mean is the centroid.
        let tri = Triangle::new(vector![0.0, 0.0], vector![3.0, 0.0], vector![0.0, 3.0]);
        let mut rng = StdRng::seed_from_u64(99);
        let n = 20_000;
        let mut acc = Vec2::zeros();
        for _ in 0..n {
            acc += sample_in_triangle(&tri, &mut rng);
        }
        let mean = acc / n as f64;
        assert!((mean - vector![1.0, 1.0]).norm() < 0.05, "mean {mean:?}");
    }

    #[test]
    fn same_seed_replays_exactly() {
        let t = triangulate(&l_shape()).unwrap();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| sample_uniform_point(&t, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(1), draw(1));
        assert_ne!(draw(1), draw(2));
    }

    #[test]
    fn draw_order_is_categorical_then_two_unit_draws() {
        let t = triangulate(&l_shape()).unwrap();
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        let got = sample_uniform_point(&t, &mut a).unwrap();
        let idx = t.picker.sample(&mut b);
        let want = sample_in_triangle(&t.triangles()[idx], &mut b);
        assert_eq!(got, want);
        // Both streams must be at the same position afterwards.
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn empty_triangulation_is_rejected() {
        let t = Triangulation {
            triangles: Vec::new(),
            probs: Vec::new(),
            picker: WeightedIndex::new([1.0]).unwrap(),
            area: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            sample_uniform_point(&t, &mut rng),
            Err(JitterError::EmptyTriangulation)
        );
    }

    proptest! {
        #[test]
        fn random_triangles_contain_their_samples(
            ax in -50.0f64..50.0, ay in -50.0f64..50.0,
            bx in -50.0f64..50.0, by in -50.0f64..50.0,
            cx in -50.0f64..50.0, cy in -50.0f64..50.0,
            seed in any::<u64>(),
        ) {
            let tri = Triangle::new(vector![ax, ay], vector![bx, by], vector![cx, cy]);
            prop_assume!(tri.area() > 1e-3);
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..20 {
                let p = sample_in_triangle(&tri, &mut rng);
                prop_assert!(tri.contains_eps(p, 1e-9));
            }
        }
    }
}
