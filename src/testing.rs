// This module contains strategies and helpers for:
//  * star shaped rings
//  * clip rectangles
//  * rings cut into shuffled fragments
// A Strategy is a way to generate a shrinkable value.
use crate::data::{ClipRect, Path, Point};

use proptest::collection::vec;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

///////////////////////////////////////////////////////////////////////////////
// Rings

/// Simple counter-clockwise ring with one vertex per radius, spread evenly by
/// angle around `center`.
pub fn star_ring(center: Point<f64>, radii: &[f64]) -> Path {
  let n = radii.len();
  let points = radii
    .iter()
    .enumerate()
    .map(|(i, r)| {
      let angle = TAU * i as f64 / n as f64;
      Point::new([
        center.x_coord() + r * angle.cos(),
        center.y_coord() + r * angle.sin(),
      ])
    })
    .collect();
  Path::ring(points)
}

pub fn any_star_ring() -> impl Strategy<Value = Path> {
  (-5.0..5.0f64, -5.0..5.0f64, vec(0.5..6.0f64, 3..24))
    .prop_map(|(x, y, radii)| star_ring(Point::new([x, y]), &radii))
}

///////////////////////////////////////////////////////////////////////////////
// Rectangles

pub fn any_rect() -> impl Strategy<Value = ClipRect> {
  (-6.0..6.0f64, -6.0..6.0f64, 0.25..8.0f64, 0.25..8.0f64).prop_map(|(x, y, w, h)| {
    ClipRect::new(x, x + w, y, y + h).expect("positive extent")
  })
}

///////////////////////////////////////////////////////////////////////////////
// Fragments

/// Cuts a ring into `pieces` open fragments and shuffles them. Neighboring
/// fragments share their cut point, and some fragments are reversed.
pub fn fragments(ring: &Path, pieces: usize, seed: u64) -> Vec<Path> {
  let mut rng = SmallRng::seed_from_u64(seed);
  let pts = ring.points();
  let n = pts.len();
  let pieces = pieces.clamp(1, n);

  let mut cuts: Vec<usize> = (0..n).collect();
  cuts.shuffle(&mut rng);
  cuts.truncate(pieces);
  cuts.sort_unstable();

  let mut out = Vec::with_capacity(pieces);
  for (k, &from) in cuts.iter().enumerate() {
    let to = cuts[(k + 1) % pieces];
    let mut run: Vec<Point<f64>> = Vec::new();
    let mut i = from;
    loop {
      run.push(pts[i]);
      if run.len() > 1 && i == to {
        break;
      }
      i = (i + 1) % n;
    }
    if rng.gen_bool(0.5) {
      run.reverse();
    }
    out.push(Path::open(run));
  }
  out.shuffle(&mut rng);
  out
}

pub fn any_fragmented_ring() -> impl Strategy<Value = (Path, Vec<Path>)> {
  (any_star_ring(), 1..8usize, any::<u64>()).prop_map(|(ring, pieces, seed)| {
    let parts = fragments(&ring, pieces, seed);
    (ring, parts)
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fragments_cover_the_ring() {
    let ring = star_ring(Point::new([0.0, 0.0]), &[1.0; 10]);
    let parts = fragments(&ring, 4, 7);
    assert_eq!(parts.len(), 4);
    let total: usize = parts.iter().map(Path::len).sum();
    assert_eq!(total, 10 + 4);
  }

  #[test]
  fn single_fragment_wraps_around() {
    let ring = star_ring(Point::new([0.0, 0.0]), &[1.0, 2.0, 3.0]);
    let parts = fragments(&ring, 1, 0);
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].len(), 4);
    assert_eq!(parts[0].first(), parts[0].last());
  }

  #[test]
  fn star_rings_are_counter_clockwise() {
    let ring = star_ring(Point::new([1.0, 1.0]), &[1.0, 2.0, 1.0, 2.0]);
    assert!(ring.signed_area_2x() > 0.0);
  }
}
