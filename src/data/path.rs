use std::cell::Cell;
use std::ops::Range;
use std::rc::Rc;

use super::frame::Frame;
use super::{BoundingBox, End, Point, PointLocation, Segment};
use crate::Error;

/// Identifies a path inside a collection owned by one of the algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PathId(pub usize);

/// What the inside of a closed ring represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interior {
  Unclassified,
  Elevation,
  Depression,
}

impl Interior {
  /// Label for a ring nested `depth` levels deep. Outermost rings are
  /// elevations.
  pub fn at_depth(depth: usize) -> Interior {
    if depth % 2 == 0 {
      Interior::Elevation
    } else {
      Interior::Depression
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Closure {
  /// A line. Never gets closed by clipping.
  Open,
  /// The boundary of an area that has not been frozen yet.
  Unclosed,
  /// A frozen ring.
  Closed(Interior),
}

/// Ordered sequence of points with copy-on-write storage.
///
/// Cloning a path or taking a [`subrange`](Path::subrange) shares the
/// underlying points; the first mutation of a shared path makes a private
/// copy. Rings do not repeat their first point at the end.
///
/// Once a path is closed its points are frozen and only its
/// [`Interior`] classification can change.
#[derive(Debug, Clone)]
pub struct Path {
  storage: Rc<Vec<Point<f64>>>,
  range: Range<usize>,
  closure: Closure,
  bbox: Cell<Option<BoundingBox>>,
}

impl Path {
  pub fn new(points: Vec<Point<f64>>, closure: Closure) -> Path {
    let len = points.len();
    Path {
      storage: Rc::new(points),
      range: 0..len,
      closure,
      bbox: Cell::new(None),
    }
  }

  pub fn open(points: Vec<Point<f64>>) -> Path {
    Path::new(points, Closure::Open)
  }

  pub fn ring(points: Vec<Point<f64>>) -> Path {
    Path::new(points, Closure::Unclosed)
  }

  pub fn closure(&self) -> Closure {
    self.closure
  }

  pub fn interior(&self) -> Option<Interior> {
    match self.closure {
      Closure::Closed(interior) => Some(interior),
      _ => None,
    }
  }

  pub fn is_closed(&self) -> bool {
    matches!(self.closure, Closure::Closed(_))
  }

  /// Rings and unfinished area boundaries, as opposed to lines.
  pub fn is_area(&self) -> bool {
    !matches!(self.closure, Closure::Open)
  }

  pub fn len(&self) -> usize {
    self.range.len()
  }

  pub fn is_empty(&self) -> bool {
    self.range.is_empty()
  }

  pub fn points(&self) -> &[Point<f64>] {
    &self.storage[self.range.clone()]
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Point<f64>> {
    self.points().iter()
  }

  pub fn first(&self) -> Option<&Point<f64>> {
    self.points().first()
  }

  pub fn last(&self) -> Option<&Point<f64>> {
    self.points().last()
  }

  pub fn end_point(&self, end: End) -> Option<Point<f64>> {
    match end {
      End::Leading => self.first().copied(),
      End::Trailing => self.last().copied(),
    }
  }

  /// The point next to `end`, walking into the path.
  pub fn neighbor(&self, end: End) -> Option<Point<f64>> {
    let pts = self.points();
    if pts.len() < 2 {
      return None;
    }
    match end {
      End::Leading => Some(pts[1]),
      End::Trailing => Some(pts[pts.len() - 2]),
    }
  }

  /// Open view of the points in `lower..upper`, sharing storage with `self`.
  pub fn subrange(&self, lower: usize, upper: usize) -> Option<Path> {
    if lower >= upper || upper > self.len() {
      return None;
    }
    Some(Path {
      storage: Rc::clone(&self.storage),
      range: self.range.start + lower..self.range.start + upper,
      closure: Closure::Open,
      bbox: Cell::new(None),
    })
  }

  pub fn append(&mut self, points: &[Point<f64>]) -> Result<(), Error> {
    self.mutate(|pts| pts.extend_from_slice(points))
  }

  pub fn prepend(&mut self, points: &[Point<f64>]) -> Result<(), Error> {
    self.mutate(|pts| {
      pts.splice(0..0, points.iter().copied());
    })
  }

  pub fn pop(&mut self) -> Result<Option<Point<f64>>, Error> {
    self.mutate(|pts| pts.pop())
  }

  pub fn reverse(&mut self) -> Result<(), Error> {
    self.mutate(|pts| pts.reverse())
  }

  /// Freezes the points and stamps the interior classification.
  pub fn close(&mut self, interior: Interior) -> Result<(), Error> {
    if self.is_closed() {
      return Err(Error::FrozenPath);
    }
    self.closure = Closure::Closed(interior);
    Ok(())
  }

  pub fn set_interior(&mut self, interior: Interior) -> Result<(), Error> {
    match self.closure {
      Closure::Closed(_) => {
        self.closure = Closure::Closed(interior);
        Ok(())
      }
      _ => Err(Error::OpenPath),
    }
  }

  pub fn bounding_box(&self) -> Option<BoundingBox> {
    if let Some(bbox) = self.bbox.get() {
      return Some(bbox);
    }
    let bbox = BoundingBox::from_points(self.points())?;
    self.bbox.set(Some(bbox));
    Some(bbox)
  }

  /// Segments between consecutive points. Areas include the closing segment
  /// from the last point back to the first.
  pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
    let pts = self.points();
    let n = pts.len();
    let count = if self.is_area() && n > 1 { n } else { n.saturating_sub(1) };
    (0..count).map(move |i| Segment::new(pts[i], pts[(i + 1) % n]))
  }

  /// Twice the signed area enclosed by the ring. Positive for
  /// counter-clockwise rings.
  pub fn signed_area_2x(&self) -> f64 {
    let pts = self.points();
    let n = pts.len();
    (0..n)
      .map(|i| {
        let p = &pts[i];
        let q = &pts[(i + 1) % n];
        p.x_coord() * q.y_coord() - q.x_coord() * p.y_coord()
      })
      .sum()
  }

  /// Even-odd location of `pt` relative to the ring formed by the points.
  pub fn locate(&self, pt: &Point<f64>) -> PointLocation {
    let pts = self.points();
    let n = pts.len();
    if n < 3 {
      return PointLocation::Outside;
    }
    let (px, py) = (*pt.x_coord(), *pt.y_coord());
    let mut inside = false;
    for i in 0..n {
      let a = &pts[i];
      let b = &pts[(i + 1) % n];
      if Segment::new(*a, *b).contains(pt) {
        return PointLocation::OnBoundary;
      }
      let (ax, ay) = (*a.x_coord(), *a.y_coord());
      let (bx, by) = (*b.x_coord(), *b.y_coord());
      if (ay > py) != (by > py) && px < (bx - ax) * (py - ay) / (by - ay) + ax {
        inside = !inside;
      }
    }
    if inside {
      PointLocation::Inside
    } else {
      PointLocation::Outside
    }
  }

  // Detaches shared storage before handing out the points.
  fn mutate<R>(&mut self, f: impl FnOnce(&mut Vec<Point<f64>>) -> R) -> Result<R, Error> {
    if self.is_closed() {
      return Err(Error::FrozenPath);
    }
    if self.range != (0..self.storage.len()) {
      self.storage = Rc::new(self.points().to_vec());
    }
    let points = Rc::make_mut(&mut self.storage);
    let ret = f(points);
    self.range = 0..points.len();
    self.bbox.set(None);
    Ok(ret)
  }
}

impl PartialEq for Path {
  fn eq(&self, other: &Path) -> bool {
    self.closure == other.closure && self.points() == other.points()
  }
}

impl std::ops::Index<usize> for Path {
  type Output = Point<f64>;
  fn index(&self, index: usize) -> &Point<f64> {
    &self.points()[index]
  }
}

/// A ring used as a frame. Each point is a frame vertex.
impl Frame for Path {
  fn edge_count(&self) -> usize {
    self.len()
  }

  fn vertex(&self, index: usize) -> Point<f64> {
    self.points()[index % self.len()]
  }
}
