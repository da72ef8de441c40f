//! Clipping of lines and rings to an axis aligned rectangle.
//!
//! Rings are walked segment by segment. Whenever the ring leaves the
//! rectangle the exit point is remembered, and when it comes back the gap is
//! bridged with a piece of the rectangle border. The direction of that piece
//! is chosen by how far the outside run turned around the rectangle, so the
//! bridge hugs the same side the ring went around and never cuts through its
//! interior.
use std::f64::consts::TAU;

use crate::data::frame::{self, Direction};
use crate::data::{BorderPosition, ClipRect, Closure, Path, Point, PointLocation};
use crate::{Config, Projection};

// Angular slack when deciding that an outside run went all the way around.
const LAP_SLACK: f64 = 1e-6;

/// Result of [`RectClipper::clip`].
#[derive(Debug, Clone, PartialEq)]
pub enum Clipped {
  /// Rings always come back as a single ring.
  Ring(Path),
  /// A line falls apart into the pieces that run inside the rectangle.
  Lines(Vec<Path>),
}

#[derive(Debug, Clone, Copy)]
struct Crossing {
  point: Point<f64>,
  position: BorderPosition,
}

/// Clips paths against a fixed rectangle.
///
/// The clipper owns its scratch buffers, so reusing one instance for many
/// paths avoids reallocating them.
#[derive(Debug, Clone)]
pub struct RectClipper {
  rect: ClipRect,
  config: Config,
  coords: Vec<Point<f64>>,
  hits: Vec<(f64, Point<f64>)>,
}

impl RectClipper {
  pub fn new(rect: ClipRect) -> RectClipper {
    RectClipper {
      rect,
      config: Config::default(),
      coords: Vec::new(),
      hits: Vec::with_capacity(4),
    }
  }

  /// Clipper for a rectangle given in view space. If the rectangle cannot be
  /// brought into the local space of the data, everything is clipped away.
  pub fn for_view<P>(view: &ClipRect, projection: &P) -> RectClipper
  where
    P: Projection + ?Sized,
  {
    RectClipper::new(ClipRect::project(view, projection))
  }

  pub fn with_config(mut self, config: Config) -> RectClipper {
    self.config = config;
    self
  }

  pub fn rect(&self) -> &ClipRect {
    &self.rect
  }

  pub fn clip(&mut self, path: &Path) -> Option<Clipped> {
    match path.closure() {
      Closure::Open => self.clip_line(path).map(Clipped::Lines),
      Closure::Unclosed | Closure::Closed(_) => self.clip_ring(path).map(Clipped::Ring),
    }
  }

  /// Clips `path` as the boundary of an area.
  ///
  /// Returns a clone of `path` when it lies inside the rectangle and `None`
  /// when it misses the rectangle. A ring that surrounds the rectangle without
  /// touching it yields the rectangle itself. The result carries the closure
  /// of the input.
  pub fn clip_ring(&mut self, path: &Path) -> Option<Path> {
    if self.rect.is_degenerate() {
      return None;
    }
    let bbox = path.bounding_box()?;
    if self.rect.contains_box(&bbox) {
      return Some(path.clone());
    }
    if !self.rect.intersects_box(&bbox) {
      return None;
    }

    let center = self.rect.center();
    let pts = path.points();
    let n = pts.len();
    self.coords.clear();

    let mut inside = self.rect.contains(&pts[0]);
    if inside {
      self.coords.push(pts[0]);
    }
    // Angle turned around the center since the last exit, or since the start
    // while no entry has been seen yet.
    let mut sweep = 0.0;
    let mut pending: Option<Crossing> = None;
    let mut initial: Option<(Crossing, f64)> = None;

    for i in 0..n {
      let a = pts[i];
      let b = pts[(i + 1) % n];
      let closing = i + 1 == n;
      let b_inside = self.rect.contains(&b);
      match (inside, b_inside) {
        (true, true) => {
          if !closing {
            push_distinct(&mut self.coords, b);
          }
        }
        (true, false) => {
          self.find_crossings(&a, &b);
          let exit = self.exit_crossing(&a)?;
          push_distinct(&mut self.coords, exit.point);
          sweep = exit.point.sweep_around(&b, &center);
          pending = Some(exit);
        }
        (false, true) => {
          self.find_crossings(&a, &b);
          let entry = self.entry_crossing(&b)?;
          sweep += a.sweep_around(&entry.point, &center);
          self.enter(entry, sweep, &mut pending, &mut initial);
          if !closing {
            push_distinct(&mut self.coords, b);
          }
        }
        (false, false) if self.rect.misses_segment(&a, &b) => {
          sweep += a.sweep_around(&b, &center);
        }
        (false, false) => {
          self.find_crossings(&a, &b);
          match self.through_crossings() {
            Some((entry, exit)) => {
              sweep += a.sweep_around(&entry.point, &center);
              self.enter(entry, sweep, &mut pending, &mut initial);
              push_distinct(&mut self.coords, exit.point);
              sweep = exit.point.sweep_around(&b, &center);
              pending = Some(exit);
            }
            None => sweep += a.sweep_around(&b, &center),
          }
        }
      }
      inside = b_inside;
    }

    // Wrap around from the last exit to the very first entry.
    if let (Some(exit), Some((entry, lead))) = (pending, initial) {
      self.route(&exit, &entry, sweep + lead);
    }
    while self.coords.len() > 1 && self.coords.first() == self.coords.last() {
      self.coords.pop();
    }

    if self.coords.len() < 3 {
      return match path.locate(&center) {
        PointLocation::Inside => {
          log::trace!("ring of {} points engulfs the clip rectangle", n);
          Some(self.rect.to_path(path))
        }
        _ => None,
      };
    }
    log::trace!("clipped ring of {} points down to {}", n, self.coords.len());
    Some(Path::new(self.coords.clone(), path.closure()))
  }

  /// Clips `path` as a line. Each run through the rectangle becomes its own
  /// open path; no border is added.
  pub fn clip_line(&mut self, path: &Path) -> Option<Vec<Path>> {
    if self.rect.is_degenerate() {
      return None;
    }
    let bbox = path.bounding_box()?;
    if self.rect.contains_box(&bbox) {
      return Some(vec![path.clone()]);
    }
    if !self.rect.intersects_box(&bbox) {
      return None;
    }

    let pts = path.points();
    let mut pieces = Vec::new();
    self.coords.clear();
    let mut inside = self.rect.contains(&pts[0]);
    if inside {
      self.coords.push(pts[0]);
    }
    for w in pts.windows(2) {
      let (a, b) = (w[0], w[1]);
      let b_inside = self.rect.contains(&b);
      match (inside, b_inside) {
        (true, true) => push_distinct(&mut self.coords, b),
        (true, false) => {
          self.find_crossings(&a, &b);
          let exit = self.exit_crossing(&a)?;
          push_distinct(&mut self.coords, exit.point);
          self.cut(&mut pieces);
        }
        (false, true) => {
          self.find_crossings(&a, &b);
          let entry = self.entry_crossing(&b)?;
          push_distinct(&mut self.coords, entry.point);
          push_distinct(&mut self.coords, b);
        }
        (false, false) if self.rect.misses_segment(&a, &b) => {}
        (false, false) => {
          self.find_crossings(&a, &b);
          if let Some((entry, exit)) = self.through_crossings() {
            push_distinct(&mut self.coords, entry.point);
            push_distinct(&mut self.coords, exit.point);
            self.cut(&mut pieces);
          }
        }
      }
      inside = b_inside;
    }
    self.cut(&mut pieces);
    log::trace!("clipped line of {} points into {} pieces", pts.len(), pieces.len());
    if pieces.is_empty() {
      None
    } else {
      Some(pieces)
    }
  }

  fn cut(&mut self, pieces: &mut Vec<Path>) {
    if self.coords.len() >= 2 {
      pieces.push(Path::open(self.coords.drain(..).collect()));
    }
    self.coords.clear();
  }

  fn enter(
    &mut self,
    entry: Crossing,
    sweep: f64,
    pending: &mut Option<Crossing>,
    initial: &mut Option<(Crossing, f64)>,
  ) {
    match pending.take() {
      Some(exit) => self.route(&exit, &entry, sweep),
      None => {
        if initial.is_none() {
          *initial = Some((entry, sweep));
        }
      }
    }
    push_distinct(&mut self.coords, entry.point);
  }

  // Pushes the rectangle corners between an exit and the following entry. The
  // border turns the same way, and by the same number of laps, as the outside
  // run it replaces.
  fn route(&mut self, exit: &Crossing, entry: &Crossing, sweep: f64) {
    let center = self.rect.center();
    let angle = |pt: &Point<f64>| (pt.y_coord() - center.y_coord()).atan2(pt.x_coord() - center.x_coord());
    let theta_ccw = (angle(&entry.point) - angle(&exit.point)).rem_euclid(TAU);
    let laps = ((sweep - theta_ccw) / TAU).round();
    let target = theta_ccw + TAU * laps;
    let direction = if target >= 0.0 {
      Direction::Forward
    } else {
      Direction::Backward
    };
    let lap = target.abs() >= TAU - LAP_SLACK;
    frame::walk(
      &self.rect,
      &exit.position,
      &entry.position,
      direction,
      lap,
      &mut self.coords,
    );
  }

  // Collects the hits of segment `a -> b` with the four border lines, sorted
  // by distance from `a`. Hits are snapped onto the border.
  fn find_crossings(&mut self, a: &Point<f64>, b: &Point<f64>) {
    self.hits.clear();
    let eps = self.config.border_epsilon;
    let r = self.rect;
    let (ax, ay) = (*a.x_coord(), *a.y_coord());
    let (dx, dy) = (b.x_coord() - ax, b.y_coord() - ay);
    if dy != 0.0 {
      for y in [r.ymin(), r.ymax()] {
        let t = (y - ay) / dy;
        let x = ax + dx * t;
        if (0.0..=1.0).contains(&t) && x >= r.xmin() - eps && x <= r.xmax() + eps {
          self.insert_hit(t, Point::new([x.clamp(r.xmin(), r.xmax()), y]));
        }
      }
    }
    if dx != 0.0 {
      for x in [r.xmin(), r.xmax()] {
        let t = (x - ax) / dx;
        let y = ay + dy * t;
        if (0.0..=1.0).contains(&t) && y >= r.ymin() - eps && y <= r.ymax() + eps {
          self.insert_hit(t, Point::new([x, y.clamp(r.ymin(), r.ymax())]));
        }
      }
    }
  }

  // Insertion sort. A segment meets the border lines at most four times.
  fn insert_hit(&mut self, t: f64, pt: Point<f64>) {
    let eps_sq = self.config.border_epsilon * self.config.border_epsilon;
    if self
      .hits
      .iter()
      .any(|(_, other)| other.squared_euclidean_distance(&pt) <= eps_sq)
    {
      return;
    }
    let mut idx = self.hits.len();
    while idx > 0 && self.hits[idx - 1].0 > t {
      idx -= 1;
    }
    self.hits.insert(idx, (t, pt));
  }

  // Border crossing at a hit, or at the border point nearest to `pt` when
  // `pt` is not a hit. The point is kept inside the closed rectangle.
  fn crossing_at(&self, pt: &Point<f64>, is_hit: bool) -> Option<Crossing> {
    let (position, foot, _) = frame::nearest_position(&self.rect, pt)?;
    let r = &self.rect;
    let pt = if is_hit { pt } else { &foot };
    Some(Crossing {
      point: Point::new([
        pt.x_coord().clamp(r.xmin(), r.xmax()),
        pt.y_coord().clamp(r.ymin(), r.ymax()),
      ]),
      position,
    })
  }

  // The last hit. Falls back to the border point nearest to the inside end
  // when rounding lost the hit.
  fn exit_crossing(&self, inside_end: &Point<f64>) -> Option<Crossing> {
    match self.hits.last() {
      Some((_, pt)) => self.crossing_at(pt, true),
      None => self.crossing_at(inside_end, false),
    }
  }

  fn entry_crossing(&self, inside_end: &Point<f64>) -> Option<Crossing> {
    match self.hits.first() {
      Some((_, pt)) => self.crossing_at(pt, true),
      None => self.crossing_at(inside_end, false),
    }
  }

  // Entry and exit of a segment that passes through the rectangle with both
  // ends outside. A segment that only touches the border has no such pair.
  fn through_crossings(&self) -> Option<(Crossing, Crossing)> {
    if self.hits.len() < 2 {
      return None;
    }
    let (_, first) = self.hits.first()?;
    let (_, last) = self.hits.last()?;
    Some((self.crossing_at(first, true)?, self.crossing_at(last, true)?))
  }
}

fn push_distinct(out: &mut Vec<Point<f64>>, pt: Point<f64>) {
  if out.last() != Some(&pt) {
    out.push(pt);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::Interior;
  use crate::testing::*;
  use crate::{Affine, Identity};
  use claims::{assert_none, assert_some};
  use proptest::prelude::*;
  use test_strategy::proptest;

  fn pts(coords: &[(f64, f64)]) -> Vec<Point<f64>> {
    coords.iter().map(|&(x, y)| Point::new([x, y])).collect()
  }

  fn unit() -> RectClipper {
    RectClipper::new(ClipRect::new(0.0, 1.0, 0.0, 1.0).unwrap())
  }

  #[test]
  fn larger_square_clips_to_rectangle() {
    let ring = Path::ring(pts(&[(-1.0, -1.0), (2.0, -1.0), (2.0, 2.0), (-1.0, 2.0)]));
    let clipped = assert_some!(unit().clip_ring(&ring));
    assert_eq!(
      clipped.points(),
      &pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])[..]
    );
  }

  #[test]
  fn inside_is_unchanged() {
    let ring = Path::ring(pts(&[(0.25, 0.25), (0.75, 0.25), (0.5, 0.75)]));
    let clipped = assert_some!(unit().clip_ring(&ring));
    assert_eq!(clipped, ring);
  }

  #[test]
  fn disjoint_is_none() {
    let ring = Path::ring(pts(&[(2.0, 2.0), (3.0, 2.0), (3.0, 3.0)]));
    assert_none!(unit().clip_ring(&ring));
    let line = Path::open(pts(&[(2.0, 2.0), (3.0, 2.0)]));
    assert_none!(unit().clip(&line));
  }

  #[test]
  fn degenerate_rectangle_clips_everything() {
    let mut clipper = RectClipper::new(ClipRect::new(0.0, 1.0, 0.5, 0.5).unwrap());
    let ring = Path::ring(pts(&[(-1.0, -1.0), (2.0, -1.0), (2.0, 2.0), (-1.0, 2.0)]));
    assert_none!(clipper.clip_ring(&ring));
  }

  #[test]
  fn overlap_on_one_side() {
    let ring = Path::ring(pts(&[(-1.0, 0.25), (0.5, 0.25), (0.5, 0.75), (-1.0, 0.75)]));
    let clipped = assert_some!(unit().clip_ring(&ring));
    assert_eq!(
      clipped.points(),
      &pts(&[(0.0, 0.25), (0.5, 0.25), (0.5, 0.75), (0.0, 0.75)])[..]
    );
  }

  #[test]
  fn band_through_rectangle() {
    let ring = Path::ring(pts(&[(-1.0, 0.25), (2.0, 0.25), (2.0, 0.75), (-1.0, 0.75)]));
    let clipped = assert_some!(unit().clip_ring(&ring));
    assert_eq!(
      clipped.points(),
      &pts(&[(0.0, 0.25), (1.0, 0.25), (1.0, 0.75), (0.0, 0.75)])[..]
    );
  }

  #[test]
  fn border_routes_around_the_corner() {
    let ccw = Path::ring(pts(&[(0.5, 0.5), (2.0, 0.5), (2.0, 2.0), (0.5, 2.0)]));
    let clipped = assert_some!(unit().clip_ring(&ccw));
    assert_eq!(
      clipped.points(),
      &pts(&[(0.5, 0.5), (1.0, 0.5), (1.0, 1.0), (0.5, 1.0)])[..]
    );

    let cw = Path::ring(pts(&[(0.5, 0.5), (0.5, 2.0), (2.0, 2.0), (2.0, 0.5)]));
    let clipped = assert_some!(unit().clip_ring(&cw));
    assert_eq!(
      clipped.points(),
      &pts(&[(0.5, 0.5), (0.5, 1.0), (1.0, 1.0), (1.0, 0.5)])[..]
    );
  }

  #[test]
  fn engulfed_rectangle_keeps_winding() {
    let ccw = Path::ring(pts(&[(-1.0, -1.0), (2.0, -1.0), (2.0, 2.0), (-1.0, 2.0)]));
    let clipped = assert_some!(unit().clip_ring(&ccw));
    assert_eq!(clipped.signed_area_2x(), 2.0);

    let cw = Path::ring(pts(&[(-1.0, -1.0), (-1.0, 2.5), (2.0, 2.0), (2.0, -1.0)]));
    let clipped = assert_some!(unit().clip_ring(&cw));
    assert_eq!(clipped.len(), 4);
    assert_eq!(clipped.signed_area_2x(), -2.0);

    // A clockwise ring that does enter keeps its winding too.
    let partial = Path::ring(pts(&[(0.5, 0.5), (0.5, 2.0), (2.0, 2.0), (2.0, 0.5)]));
    assert!(assert_some!(unit().clip_ring(&partial)).signed_area_2x() < 0.0);
  }

  #[test]
  fn long_way_around() {
    // A "C" that wraps around the right side of the rectangle and comes back
    // in through the top, so three corners are needed.
    let ring = Path::ring(pts(&[
      (0.5, 0.2),
      (-0.5, 0.2),
      (-0.5, -0.5),
      (1.5, -0.5),
      (1.5, 1.5),
      (0.8, 1.5),
      (0.8, 0.8),
    ]));
    let clipped = assert_some!(unit().clip_ring(&ring));
    assert_eq!(
      clipped.points(),
      &pts(&[
        (0.5, 0.2),
        (0.0, 0.2),
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (0.8, 1.0),
        (0.8, 0.8)
      ])[..]
    );
    assert!(clipped.signed_area_2x() > 0.0);
  }

  #[test]
  fn ring_around_the_rectangle_without_engulfing() {
    // A thin frame with a hole that contains the rectangle: the ring
    // surrounds the rectangle but the rectangle lies in the hole.
    let ring = Path::ring(pts(&[
      (-2.0, -2.0),
      (3.0, -2.0),
      (3.0, 3.0),
      (-2.0, 3.0),
      (-2.0, -1.0),
      (-1.0, -1.0),
      (-1.0, 2.0),
      (2.0, 2.0),
      (2.0, -1.0),
      (-2.0, -1.0),
    ]));
    assert_none!(unit().clip_ring(&ring));
  }

  #[test]
  fn keeps_closure() {
    let mut ring = Path::ring(pts(&[(-1.0, -1.0), (2.0, -1.0), (2.0, 2.0), (-1.0, 2.0)]));
    ring.close(Interior::Depression).unwrap();
    let clipped = assert_some!(unit().clip(&ring));
    match clipped {
      Clipped::Ring(r) => assert_eq!(r.closure(), Closure::Closed(Interior::Depression)),
      Clipped::Lines(_) => panic!("ring clipped into lines"),
    }
  }

  #[test]
  fn line_falls_apart() {
    let line = Path::open(pts(&[
      (-1.0, 0.5),
      (0.5, 0.5),
      (0.5, 2.0),
      (0.8, 2.0),
      (0.8, 0.2),
      (2.0, 0.2),
    ]));
    let pieces = match assert_some!(unit().clip(&line)) {
      Clipped::Lines(pieces) => pieces,
      Clipped::Ring(_) => panic!("line clipped into a ring"),
    };
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].points(), &pts(&[(0.0, 0.5), (0.5, 0.5), (0.5, 1.0)])[..]);
    assert_eq!(
      pieces[1].points(),
      &pts(&[(0.8, 1.0), (0.8, 0.2), (1.0, 0.2)])[..]
    );
    assert!(pieces.iter().all(|p| p.closure() == Closure::Open));
  }

  #[test]
  fn line_passing_straight_through() {
    let line = Path::open(pts(&[(-1.0, -1.0), (2.0, 2.0)]));
    let pieces = assert_some!(unit().clip_line(&line));
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].points(), &pts(&[(0.0, 0.0), (1.0, 1.0)])[..]);
  }

  #[test]
  fn view_through_projection() {
    let view = ClipRect::new(0.0, 10.0, 0.0, 10.0).unwrap();
    let clipper = RectClipper::for_view(&view, &Affine::uniform_scale(10.0));
    assert_eq!(clipper.rect(), &ClipRect::new(0.0, 1.0, 0.0, 1.0).unwrap());
    let mut broken = RectClipper::for_view(&view, &Affine::scale([0.0, 2.0]));
    let ring = Path::ring(pts(&[(-1.0, -1.0), (2.0, -1.0), (2.0, 2.0)]));
    assert_none!(broken.clip_ring(&ring));
    let same = RectClipper::for_view(&view, &Identity);
    assert_eq!(same.rect(), &view);
  }

  fn within(rect: &ClipRect, pt: &Point<f64>) -> bool {
    let eps = 1e-9;
    *pt.x_coord() >= rect.xmin() - eps
      && *pt.x_coord() <= rect.xmax() + eps
      && *pt.y_coord() >= rect.ymin() - eps
      && *pt.y_coord() <= rect.ymax() + eps
  }

  fn strictly_inside(rect: &ClipRect, pt: &Point<f64>) -> bool {
    *pt.x_coord() > rect.xmin()
      && *pt.x_coord() < rect.xmax()
      && *pt.y_coord() > rect.ymin()
      && *pt.y_coord() < rect.ymax()
  }

  #[proptest]
  fn clipped_points_stay_in_rectangle(
    #[strategy(any_star_ring())] ring: Path,
    #[strategy(any_rect())] rect: ClipRect,
  ) {
    let mut clipper = RectClipper::new(rect);
    if let Some(clipped) = clipper.clip_ring(&ring) {
      prop_assert!(clipped.iter().all(|pt| within(&rect, pt)));
    }
  }

  #[proptest]
  fn inside_points_survive(
    #[strategy(any_star_ring())] ring: Path,
    #[strategy(any_rect())] rect: ClipRect,
  ) {
    let mut clipper = RectClipper::new(rect);
    let clipped = clipper.clip_ring(&ring);
    for pt in ring.iter().filter(|pt| strictly_inside(&rect, pt)) {
      let clipped = clipped.as_ref().unwrap();
      prop_assert!(clipped.points().contains(pt));
    }
  }

  #[proptest]
  fn clipping_is_idempotent(
    #[strategy(any_star_ring())] ring: Path,
    #[strategy(any_rect())] rect: ClipRect,
  ) {
    let mut clipper = RectClipper::new(rect);
    let once = clipper.clip_ring(&ring);
    let twice = once.as_ref().and_then(|p| clipper.clip_ring(p));
    prop_assert_eq!(once, twice);
  }

  #[proptest]
  fn lines_stay_in_rectangle(
    #[strategy(any_star_ring())] ring: Path,
    #[strategy(any_rect())] rect: ClipRect,
  ) {
    let line = Path::open(ring.points().to_vec());
    let mut clipper = RectClipper::new(rect);
    for piece in clipper.clip_line(&line).unwrap_or_default() {
      prop_assert!(piece.len() >= 2);
      prop_assert!(piece.iter().all(|pt| within(&rect, pt)));
    }
  }
}
