//! Jitter a few points inside a concave region and print per-cell counts.
//!
//! Usage:
//!   cargo run -p polyscatter --example concave_jitter -- [seed]
//!
//! The region is an L-shape of three unit cells; with a uniform sampler each
//! cell receives about a third of the points.

use nalgebra::Vector2;
use polyscatter::{jitter_points, JitterCfg, Polygon};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2025);
    let l_shape = Polygon::from_ring(&[
        Vector2::new(0.0, 0.0),
        Vector2::new(2.0, 0.0),
        Vector2::new(2.0, 1.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(1.0, 2.0),
        Vector2::new(0.0, 2.0),
    ])
    .expect("valid ring");
    let points = vec![Some(Vector2::new(0.5, 0.5)); 3000];
    let out = match jitter_points(&points, &[l_shape], &JitterCfg::seeded(seed)) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("jitter failed: {e}");
            return;
        }
    };
    let mut cells = [0usize; 3];
    for p in out.into_iter().flatten() {
        let k = match (p.x < 1.0, p.y < 1.0) {
            (true, true) => 0,
            (false, _) => 1,
            (true, false) => 2,
        };
        cells[k] += 1;
    }
    println!("seed={seed} cells(lower-left, lower-right, upper-left)={cells:?}");
}
