/// Tolerances shared by the clipping and assembly algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
  /// Merges at or below this squared distance drop one of the two
  /// coincident endpoints.
  pub overlap_distance_sq: f64,
  /// Slack when deciding whether a computed hit lies on the clip border.
  pub border_epsilon: f64,
  /// Paths shorter than this are never offered their own ends as a
  /// closing candidate.
  pub min_ring_points: usize,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      overlap_distance_sq: 0.0,
      border_epsilon: 1e-9,
      min_ring_points: 3,
    }
  }
}

impl Config {
  pub fn with_overlap_distance_sq(mut self, distance_sq: f64) -> Config {
    self.overlap_distance_sq = distance_sq;
    self
  }

  pub fn with_border_epsilon(mut self, epsilon: f64) -> Config {
    self.border_epsilon = epsilon;
    self
  }

  pub fn with_min_ring_points(mut self, points: usize) -> Config {
    self.min_ring_points = points;
    self
  }
}
