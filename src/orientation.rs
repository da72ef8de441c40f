use crate::data::Point;

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone)]
pub enum Orientation {
  CounterClockWise,
  ClockWise,
  CoLinear,
}
use Orientation::*;

impl Orientation {
  /// Determine the direction you have to turn if you walk from `p1`
  /// to `p2` to `p3`.
  ///
  /// Uses the adaptive predicates of `geometry_predicates`, so the sign is
  /// exact for the given floating point inputs.
  ///
  /// # Examples
  ///
  /// ```rust
  /// # use maptopo::data::Point;
  /// # use maptopo::Orientation;
  /// let p1 = Point::new([ 0.0, 0.0 ]);
  /// let p2 = Point::new([ 0.0, 1.0 ]); // One unit above p1.
  /// // (0,0) -> (0,1) -> (0,2) == Orientation::CoLinear
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ 0.0, 2.0 ])).is_colinear());
  /// // (0,0) -> (0,1) -> (-1,2) == Orientation::CounterClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ -1.0, 2.0 ])).is_ccw());
  /// // (0,0) -> (0,1) -> (1,2) == Orientation::ClockWise
  /// assert!(Orientation::new(&p1, &p2, &Point::new([ 1.0, 2.0 ])).is_cw());
  /// ```
  pub fn new(p1: &Point<f64>, p2: &Point<f64>, p3: &Point<f64>) -> Orientation {
    let orient = geometry_predicates::predicates::orient2d(p1.array, p2.array, p3.array);
    if orient > 0.0 {
      CounterClockWise
    } else if orient < 0.0 {
      ClockWise
    } else {
      CoLinear
    }
  }

  pub fn is_colinear(self) -> bool {
    matches!(self, CoLinear)
  }

  pub fn is_ccw(self) -> bool {
    matches!(self, CounterClockWise)
  }

  pub fn is_cw(self) -> bool {
    matches!(self, ClockWise)
  }

  #[must_use]
  pub fn reverse(self) -> Orientation {
    match self {
      CounterClockWise => ClockWise,
      ClockWise => CounterClockWise,
      CoLinear => CoLinear,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use test_strategy::proptest;

  fn pt(x: f64, y: f64) -> Point<f64> {
    Point::new([x, y])
  }

  #[test]
  fn turns() {
    assert_eq!(Orientation::new(&pt(0., 0.), &pt(1., 1.), &pt(2., 2.)), CoLinear);
    assert_eq!(Orientation::new(&pt(0., 0.), &pt(0., 1.), &pt(2., 2.)), ClockWise);
    assert_eq!(Orientation::new(&pt(0., 0.), &pt(0., 1.), &pt(-2., 2.)), CounterClockWise);
    assert_eq!(Orientation::new(&pt(0., 0.), &pt(0., 0.), &pt(0., 0.)), CoLinear);
  }

  #[proptest]
  fn swapping_reverses(pts: [i16; 6]) {
    let [a, b, c] = [
      pt(f64::from(pts[0]), f64::from(pts[1])),
      pt(f64::from(pts[2]), f64::from(pts[3])),
      pt(f64::from(pts[4]), f64::from(pts[5])),
    ];
    assert_eq!(Orientation::new(&a, &b, &c), Orientation::new(&a, &c, &b).reverse());
  }
}
