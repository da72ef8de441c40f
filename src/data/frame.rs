//! Closed curves that open paths can be routed along.
//!
//! Positions on a frame are ordered first by edge index and then by the
//! distance from the start of the edge, which gives a consistent traversal
//! order around the frame no matter its shape.
use ordered_float::OrderedFloat;

use super::{Line, Point, Segment};
use crate::Intersects;

/// A simple closed curve made of straight edges. Edge `i` runs from
/// `vertex(i)` to `vertex(i + 1)`, wrapping around after the last vertex.
pub trait Frame {
  fn edge_count(&self) -> usize;

  fn vertex(&self, index: usize) -> Point<f64>;

  fn edge(&self, index: usize) -> Segment {
    let n = self.edge_count();
    Segment::new(self.vertex(index % n), self.vertex((index + 1) % n))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BorderPosition {
  pub edge: usize,
  /// Distance from the start of the edge.
  pub offset: OrderedFloat<f64>,
}

impl BorderPosition {
  pub fn new(edge: usize, offset: f64) -> BorderPosition {
    BorderPosition {
      edge,
      offset: OrderedFloat(offset),
    }
  }

  /// Position at parameter `t` of edge `edge`. The end of an edge is
  /// reported as the start of the next one so that each point has a single
  /// position.
  pub fn on_edge<F>(frame: &F, edge: usize, t: f64) -> BorderPosition
  where
    F: Frame + ?Sized,
  {
    let n = frame.edge_count();
    if t >= 1.0 {
      BorderPosition::new((edge + 1) % n, 0.0)
    } else {
      BorderPosition::new(edge, t.max(0.0) * frame.edge(edge).length())
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  /// Increasing edge index.
  Forward,
  Backward,
}

/// Nearest point of the frame to `pt`, with its position and squared
/// distance.
pub fn nearest_position<F>(frame: &F, pt: &Point<f64>) -> Option<(BorderPosition, Point<f64>, f64)>
where
  F: Frame + ?Sized,
{
  let mut best: Option<(BorderPosition, Point<f64>, f64)> = None;
  for i in 0..frame.edge_count() {
    let edge = frame.edge(i);
    let t = edge.project(pt);
    let foot = edge.src.lerp(&edge.dst, t);
    let dist = foot.squared_euclidean_distance(pt);
    if best.map_or(true, |(_, _, d)| dist < d) {
      best = Some((BorderPosition::on_edge(frame, i, t), foot, dist));
    }
  }
  best
}

/// Crossing of the infinite `line` with the frame that lies closest to
/// `anchor`, with its position and squared distance to `anchor`.
pub fn line_crossing<F>(
  frame: &F,
  line: &Line,
  anchor: &Point<f64>,
) -> Option<(BorderPosition, Point<f64>, f64)>
where
  F: Frame + ?Sized,
{
  let mut best: Option<(BorderPosition, Point<f64>, f64)> = None;
  for i in 0..frame.edge_count() {
    let edge = frame.edge(i);
    if let Some(crossing) = line.intersect(&edge) {
      let dist = crossing.point.squared_euclidean_distance(anchor);
      if best.map_or(true, |(_, _, d)| dist < d) {
        best = Some((
          BorderPosition::on_edge(frame, i, crossing.along_segment),
          crossing.point,
          dist,
        ));
      }
    }
  }
  best
}

/// Pushes the frame vertices that lie strictly between `from` and `to` when
/// walking the frame in `direction`.
///
/// Two positions on the same edge that are already in walking order are
/// joined directly unless `lap` is set, in which case the walk goes once
/// around the whole frame.
pub fn walk<F>(
  frame: &F,
  from: &BorderPosition,
  to: &BorderPosition,
  direction: Direction,
  lap: bool,
  out: &mut Vec<Point<f64>>,
) where
  F: Frame + ?Sized,
{
  let n = frame.edge_count();
  if n == 0 {
    return;
  }
  let in_order = from.edge == to.edge
    && match direction {
      Direction::Forward => to.offset >= from.offset,
      Direction::Backward => to.offset <= from.offset,
    };
  if in_order && !lap {
    return;
  }
  let mut edge = from.edge % n;
  match direction {
    Direction::Forward => loop {
      edge = (edge + 1) % n;
      out.push(frame.vertex(edge));
      if edge == to.edge % n {
        break;
      }
    },
    Direction::Backward => loop {
      out.push(frame.vertex(edge));
      edge = (edge + n - 1) % n;
      if edge == to.edge % n {
        break;
      }
    },
  }
}
