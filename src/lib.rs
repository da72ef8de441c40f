// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]
//! Polygon topology for map rendering.
//!
//! Three components cooperate on plain point sequences ([`Path`]):
//!
//! * [`RectClipper`] cuts lines and rings down to a viewing rectangle and
//!   routes synthesized border segments around the rectangle so that clipped
//!   rings stay fillable.
//! * [`RingAssembler`] stitches fragmentary traces (digitized coastlines split
//!   across many files) back together by repeatedly merging the closest pair
//!   of endpoints, and can force closure against a frame curve.
//! * [`InclusionForest`] nests the resulting rings and labels them
//!   alternately as elevation and depression.
//!
//! ```rust
//! # use maptopo::data::{ClipRect, Path, Point};
//! # use maptopo::algorithms::clipping::RectClipper;
//! let rect = ClipRect::new(0.0, 1.0, 0.0, 1.0).unwrap();
//! let ring = Path::ring(vec![
//!   Point::new([-1.0, -1.0]),
//!   Point::new([2.0, -1.0]),
//!   Point::new([2.0, 2.0]),
//!   Point::new([-1.0, 2.0]),
//! ]);
//! let clipped = RectClipper::new(rect).clip_ring(&ring).unwrap();
//! assert_eq!(clipped.len(), 4);
//! ```

pub mod algorithms;
pub mod config;
pub mod data;
mod intersection;
mod orientation;
pub mod progress;
pub mod projection;
mod utils;

#[cfg(test)]
pub mod testing;

pub use config::Config;
pub use intersection::Intersects;
pub use orientation::Orientation;
pub use progress::{NoProgress, Progress};
pub use projection::{Affine, Identity, Projection};

#[doc(inline)]
pub use algorithms::assembly::RingAssembler;
#[doc(inline)]
pub use algorithms::clipping::{Clipped, RectClipper};
#[doc(inline)]
pub use algorithms::inclusion::{classify, InclusionForest};
#[doc(inline)]
pub use data::{Path, PathId};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error("Insufficient vertices")]
  InsufficientVertices,
  #[error("Invalid clip rectangle [{xmin}, {xmax}] x [{ymin}, {ymax}]")]
  InvalidRectangle {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
  },
  /// The projection is undefined at this location.
  #[error("Projection undefined at ({x}, {y})")]
  Projection { x: f64, y: f64 },
  /// Points of a closed path can no longer change.
  #[error("Path is closed")]
  FrozenPath,
  #[error("Path is not closed")]
  OpenPath,
  #[error("Path {0:?} is missing")]
  MissingPath(PathId),
  #[error("Odd number of frame crossings: {0}")]
  UnbalancedCrossings(usize),
  #[error("Border tracing ended in the middle of a border")]
  UnterminatedBorder,
  #[error("Cancelled")]
  Cancelled,
}

impl Error {
  /// Errors that signal a broken internal invariant rather than bad input.
  /// The operation that produced one was aborted and its partial work must
  /// not be used.
  pub fn is_invariant_violation(&self) -> bool {
    matches!(
      self,
      Error::FrozenPath
        | Error::MissingPath(_)
        | Error::UnbalancedCrossings(_)
        | Error::UnterminatedBorder
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn invariant_violations() {
    assert!(Error::UnterminatedBorder.is_invariant_violation());
    assert!(Error::UnbalancedCrossings(3).is_invariant_violation());
    assert!(Error::MissingPath(PathId(4)).is_invariant_violation());
    assert!(!Error::Projection { x: 0.0, y: 1.0 }.is_invariant_violation());
    assert!(!Error::Cancelled.is_invariant_violation());
  }

  #[test]
  fn messages() {
    assert_eq!(
      Error::Projection { x: 1.5, y: -2.0 }.to_string(),
      "Projection undefined at (1.5, -2)"
    );
    assert_eq!(Error::UnbalancedCrossings(5).to_string(), "Odd number of frame crossings: 5");
  }
}
