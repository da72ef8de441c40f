use std::cmp::Ordering;

use super::{BorderPosition, End, PathId, Point};

/// Where the extension of a path end meets the frame curve.
#[derive(Debug, Clone, Copy)]
pub struct BorderPoint {
  pub point: Point<f64>,
  pub position: BorderPosition,
  pub owner: PathId,
  pub end: End,
  /// Squared distance between `point` and the path end it was derived from.
  pub min_distance_sq: f64,
}

impl BorderPoint {
  fn key(&self) -> (BorderPosition, PathId, End) {
    (self.position, self.owner, self.end)
  }
}

// Ordered by position around the frame. Owner and end only break ties.
impl PartialEq for BorderPoint {
  fn eq(&self, other: &BorderPoint) -> bool {
    self.key() == other.key()
  }
}

impl Eq for BorderPoint {}

impl PartialOrd for BorderPoint {
  fn partial_cmp(&self, other: &BorderPoint) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for BorderPoint {
  fn cmp(&self, other: &BorderPoint) -> Ordering {
    self.key().cmp(&other.key())
  }
}

/// Drops the least confident crossing when the count is odd.
///
/// Only one point is ever removed; the count is clamped to its low bit, so
/// the count is even afterwards. Callers still treat an odd count after
/// balancing as [`Error::UnbalancedCrossings`](crate::Error), since pairing
/// an odd list would leave a border half traced.
/// Returns the removed point.
pub fn balance_crossings(crossings: &mut Vec<BorderPoint>) -> Option<BorderPoint> {
  if crossings.len() & 1 == 0 {
    return None;
  }
  let (worst, _) = crossings
    .iter()
    .enumerate()
    .max_by(|(_, a), (_, b)| a.min_distance_sq.total_cmp(&b.min_distance_sq))?;
  Some(crossings.remove(worst))
}
