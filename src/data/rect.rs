use super::frame::Frame;
use super::{Path, Point};
use crate::{Error, Projection};

/// Axis aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
  pub min: Point<f64>,
  pub max: Point<f64>,
}

impl BoundingBox {
  pub fn from_points<'a, I>(points: I) -> Option<BoundingBox>
  where
    I: IntoIterator<Item = &'a Point<f64>>,
  {
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    let mut bbox = BoundingBox {
      min: first,
      max: first,
    };
    for pt in iter {
      bbox.min.array[0] = bbox.min.array[0].min(pt.array[0]);
      bbox.min.array[1] = bbox.min.array[1].min(pt.array[1]);
      bbox.max.array[0] = bbox.max.array[0].max(pt.array[0]);
      bbox.max.array[1] = bbox.max.array[1].max(pt.array[1]);
    }
    Some(bbox)
  }

  pub fn width(&self) -> f64 {
    self.max.x_coord() - self.min.x_coord()
  }

  pub fn height(&self) -> f64 {
    self.max.y_coord() - self.min.y_coord()
  }

  pub fn center(&self) -> Point<f64> {
    self.min.lerp(&self.max, 0.5)
  }

  pub fn contains_point(&self, pt: &Point<f64>) -> bool {
    self.min.x_coord() <= pt.x_coord()
      && pt.x_coord() <= self.max.x_coord()
      && self.min.y_coord() <= pt.y_coord()
      && pt.y_coord() <= self.max.y_coord()
  }

  pub fn contains(&self, other: &BoundingBox) -> bool {
    self.contains_point(&other.min) && self.contains_point(&other.max)
  }

  pub fn intersects(&self, other: &BoundingBox) -> bool {
    self.min.x_coord() <= other.max.x_coord()
      && other.min.x_coord() <= self.max.x_coord()
      && self.min.y_coord() <= other.max.y_coord()
      && other.min.y_coord() <= self.max.y_coord()
  }
}

/// Cohen-Sutherland region code of a point relative to a [`ClipRect`].
pub type Outcode = u8;

pub const INSIDE: Outcode = 0b0000;
pub const LEFT: Outcode = 0b0001;
pub const RIGHT: Outcode = 0b0010;
pub const BOTTOM: Outcode = 0b0100;
pub const TOP: Outcode = 0b1000;

/// Clip rectangle in the local coordinate space of the paths it clips.
///
/// As a [`Frame`] its edges run counter-clockwise starting at the
/// `(xmin, ymin)` corner: bottom, right, top, left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
  xmin: f64,
  xmax: f64,
  ymin: f64,
  ymax: f64,
}

impl ClipRect {
  pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<ClipRect, Error> {
    // Written so that NaN bounds are rejected too.
    if !(xmin <= xmax && ymin <= ymax) {
      return Err(Error::InvalidRectangle {
        xmin,
        xmax,
        ymin,
        ymax,
      });
    }
    Ok(ClipRect {
      xmin,
      xmax,
      ymin,
      ymax,
    })
  }

  /// Zero area rectangle. Clips everything away.
  pub fn empty() -> ClipRect {
    ClipRect {
      xmin: 0.0,
      xmax: 0.0,
      ymin: 0.0,
      ymax: 0.0,
    }
  }

  /// Maps a rectangle given in view space into the local space of the data
  /// by running every corner through `projection.inverse`.
  ///
  /// A corner outside the domain of the projection is an expected situation
  /// (a view that reaches past the edge of the world) and yields
  /// [`ClipRect::empty`].
  pub fn project<P>(view: &ClipRect, projection: &P) -> ClipRect
  where
    P: Projection + ?Sized,
  {
    let mut corners = Vec::with_capacity(4);
    for corner in view.corners().iter() {
      match projection.inverse(corner) {
        Ok(local) if local.is_finite() => corners.push(local),
        Ok(local) => {
          log::debug!("view corner {:?} projects to {:?}, clipping to nothing", corner, local);
          return ClipRect::empty();
        }
        Err(err) => {
          log::debug!("view corner {:?}: {}, clipping to nothing", corner, err);
          return ClipRect::empty();
        }
      }
    }
    match BoundingBox::from_points(corners.iter()) {
      Some(bbox) => ClipRect {
        xmin: *bbox.min.x_coord(),
        xmax: *bbox.max.x_coord(),
        ymin: *bbox.min.y_coord(),
        ymax: *bbox.max.y_coord(),
      },
      None => ClipRect::empty(),
    }
  }

  pub fn xmin(&self) -> f64 {
    self.xmin
  }

  pub fn xmax(&self) -> f64 {
    self.xmax
  }

  pub fn ymin(&self) -> f64 {
    self.ymin
  }

  pub fn ymax(&self) -> f64 {
    self.ymax
  }

  pub fn width(&self) -> f64 {
    self.xmax - self.xmin
  }

  pub fn height(&self) -> f64 {
    self.ymax - self.ymin
  }

  pub fn is_degenerate(&self) -> bool {
    self.width() <= 0.0 || self.height() <= 0.0
  }

  pub fn center(&self) -> Point<f64> {
    Point::new([
      self.xmin + self.width() / 2.0,
      self.ymin + self.height() / 2.0,
    ])
  }

  /// Corners in counter-clockwise order, starting at `(xmin, ymin)`.
  pub fn corners(&self) -> [Point<f64>; 4] {
    [
      Point::new([self.xmin, self.ymin]),
      Point::new([self.xmax, self.ymin]),
      Point::new([self.xmax, self.ymax]),
      Point::new([self.xmin, self.ymax]),
    ]
  }

  pub fn outcode(&self, pt: &Point<f64>) -> Outcode {
    let mut code = INSIDE;
    if *pt.x_coord() < self.xmin {
      code |= LEFT;
    }
    if *pt.x_coord() > self.xmax {
      code |= RIGHT;
    }
    if *pt.y_coord() < self.ymin {
      code |= BOTTOM;
    }
    if *pt.y_coord() > self.ymax {
      code |= TOP;
    }
    code
  }

  /// Closed containment: points on the border are inside.
  pub fn contains(&self, pt: &Point<f64>) -> bool {
    self.outcode(pt) == INSIDE
  }

  pub fn contains_box(&self, bbox: &BoundingBox) -> bool {
    self.contains(&bbox.min) && self.contains(&bbox.max)
  }

  pub fn intersects_box(&self, bbox: &BoundingBox) -> bool {
    self.as_box().intersects(bbox)
  }

  pub fn as_box(&self) -> BoundingBox {
    BoundingBox {
      min: Point::new([self.xmin, self.ymin]),
      max: Point::new([self.xmax, self.ymax]),
    }
  }

  /// The rectangle itself as a four point path, wound like `like`.
  pub fn to_path(&self, like: &Path) -> Path {
    let mut corners = self.corners().to_vec();
    if like.signed_area_2x() < 0.0 {
      corners.reverse();
    }
    Path::new(corners, like.closure())
  }

  /// True when the segment from `a` to `b` lies entirely beyond one side of
  /// the rectangle and cannot touch it.
  pub fn misses_segment(&self, a: &Point<f64>, b: &Point<f64>) -> bool {
    self.outcode(a) & self.outcode(b) != INSIDE
  }
}

impl Frame for ClipRect {
  fn edge_count(&self) -> usize {
    4
  }

  fn vertex(&self, index: usize) -> Point<f64> {
    self.corners()[index % 4]
  }
}
