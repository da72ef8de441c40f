use super::Point;
use crate::{Intersects, Orientation};

/// Straight segment from `src` to `dst`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
  pub src: Point<f64>,
  pub dst: Point<f64>,
}

impl Segment {
  pub fn new(src: Point<f64>, dst: Point<f64>) -> Segment {
    Segment { src, dst }
  }

  pub fn squared_length(&self) -> f64 {
    self.src.squared_euclidean_distance(&self.dst)
  }

  pub fn length(&self) -> f64 {
    self.squared_length().sqrt()
  }

  /// Parameter in `[0, 1]` of the point on the segment nearest to `pt`.
  pub fn project(&self, pt: &Point<f64>) -> f64 {
    let dx = self.dst.x_coord() - self.src.x_coord();
    let dy = self.dst.y_coord() - self.src.y_coord();
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
      return 0.0;
    }
    let t = ((pt.x_coord() - self.src.x_coord()) * dx + (pt.y_coord() - self.src.y_coord()) * dy)
      / len_sq;
    t.clamp(0.0, 1.0)
  }

  pub fn contains(&self, pt: &Point<f64>) -> bool {
    Orientation::new(&self.src, &self.dst, pt).is_colinear()
      && within(*pt.x_coord(), *self.src.x_coord(), *self.dst.x_coord())
      && within(*pt.y_coord(), *self.src.y_coord(), *self.dst.y_coord())
  }

  /// True if the two segments cross at a single point interior to both.
  /// Touching endpoints and colinear overlaps do not count.
  pub fn crosses(&self, other: &Segment) -> bool {
    let o1 = Orientation::new(&self.src, &self.dst, &other.src);
    let o2 = Orientation::new(&self.src, &self.dst, &other.dst);
    let o3 = Orientation::new(&other.src, &other.dst, &self.src);
    let o4 = Orientation::new(&other.src, &other.dst, &self.dst);
    opposite(o1, o2) && opposite(o3, o4)
  }
}

fn opposite(a: Orientation, b: Orientation) -> bool {
  (a.is_ccw() && b.is_cw()) || (a.is_cw() && b.is_ccw())
}

fn within(v: f64, a: f64, b: f64) -> bool {
  a.min(b) <= v && v <= a.max(b)
}

/// Infinite line through `origin` and `through`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
  pub origin: Point<f64>,
  pub through: Point<f64>,
}

impl Line {
  pub fn new(origin: Point<f64>, through: Point<f64>) -> Line {
    Line { origin, through }
  }
}

/// Where a line meets a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCrossing {
  pub point: Point<f64>,
  /// Position along the line, `0` at `origin` and `1` at `through`.
  pub along_line: f64,
  /// Position along the segment, in `[0, 1]`.
  pub along_segment: f64,
}

impl<'a> Intersects<&'a Segment> for &'a Line {
  type Result = LineCrossing;
  fn intersect(self, segment: &'a Segment) -> Option<LineCrossing> {
    let (ox, oy) = (*self.origin.x_coord(), *self.origin.y_coord());
    let dx = self.through.x_coord() - ox;
    let dy = self.through.y_coord() - oy;
    let (sx, sy) = (*segment.src.x_coord(), *segment.src.y_coord());
    let ex = segment.dst.x_coord() - sx;
    let ey = segment.dst.y_coord() - sy;
    let denom = dx * ey - dy * ex;
    if denom == 0.0 {
      return None;
    }
    let along_line = ((sx - ox) * ey - (sy - oy) * ex) / denom;
    let along_segment = ((sx - ox) * dy - (sy - oy) * dx) / denom;
    if !(0.0..=1.0).contains(&along_segment) {
      return None;
    }
    Some(LineCrossing {
      point: segment.src.lerp(&segment.dst, along_segment),
      along_line,
      along_segment,
    })
  }
}

impl<'a> Intersects<&'a Segment> for &'a Segment {
  type Result = Point<f64>;
  fn intersect(self, other: &'a Segment) -> Option<Point<f64>> {
    if self.crosses(other) {
      let line = Line::new(self.src, self.dst);
      return (&line).intersect(other).map(|crossing| crossing.point);
    }
    [other.src, other.dst]
      .into_iter()
      .find(|pt| self.contains(pt))
      .or_else(|| [self.src, self.dst].into_iter().find(|pt| other.contains(pt)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use claims::{assert_none, assert_some};

  fn seg(a: (f64, f64), b: (f64, f64)) -> Segment {
    Segment::new(Point::from(a), Point::from(b))
  }

  #[test]
  fn line_crossing() {
    assert!(seg((0., 0.), (2., 2.)).crosses(&seg((0., 2.), (2., 0.))));
  }

  #[test]
  fn line_not_crossing() {
    assert!(!seg((0., 0.), (1., 1.)).crosses(&seg((2., 0.), (3., 5.))));
  }

  #[test]
  fn endpoints_touch_do_not_cross() {
    assert!(!seg((0., 0.), (1., 0.)).crosses(&seg((1., 0.), (1., 1.))));
  }

  #[test]
  fn colinear_overlap_does_not_cross() {
    assert!(!seg((0., 0.), (2., 0.)).crosses(&seg((1., 0.), (3., 0.))));
  }

  #[test]
  fn segment_intersection_point() {
    let pt = assert_some!((&seg((0., 0.), (2., 2.))).intersect(&seg((0., 2.), (2., 0.))));
    assert!((pt.x_coord() - 1.0).abs() < 1e-12);
    assert!((pt.y_coord() - 1.0).abs() < 1e-12);
    let touch = assert_some!((&seg((0., 0.), (1., 0.))).intersect(&seg((1., 0.), (1., 1.))));
    assert_eq!(touch, Point::new([1., 0.]));
    assert_none!((&seg((0., 0.), (1., 0.))).intersect(&seg((0., 1.), (1., 1.))));
  }

  #[test]
  fn line_hits_segment_beyond_origin() {
    let line = Line::new(Point::new([0., 0.]), Point::new([1., 0.]));
    let crossing = assert_some!((&line).intersect(&seg((5., -1.), (5., 1.))));
    assert_eq!(crossing.point, Point::new([5., 0.]));
    assert_eq!(crossing.along_line, 5.0);
    assert_eq!(crossing.along_segment, 0.5);
    let behind = assert_some!((&line).intersect(&seg((-3., -1.), (-3., 1.))));
    assert_eq!(behind.along_line, -3.0);
  }

  #[test]
  fn parallel_line_misses() {
    let line = Line::new(Point::new([0., 0.]), Point::new([1., 0.]));
    assert_none!((&line).intersect(&seg((0., 1.), (4., 1.))));
    assert_none!((&line).intersect(&seg((2., 1.), (2., 3.))));
  }

  #[test]
  fn projection_clamps() {
    let s = seg((0., 0.), (10., 0.));
    assert_eq!(s.project(&Point::new([5., 3.])), 0.5);
    assert_eq!(s.project(&Point::new([-5., 3.])), 0.0);
    assert_eq!(s.project(&Point::new([15., 3.])), 1.0);
  }
}
