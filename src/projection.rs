use array_init::array_init;
use std::ops::Mul;

use crate::data::Point;
use crate::Error;

/// Maps points between the local space of the data and a view space.
///
/// Both directions are fallible: a projection can be undefined at some
/// locations (past the edge of the world).
pub trait Projection {
  fn forward(&self, pt: &Point<f64>) -> Result<Point<f64>, Error>;
  fn inverse(&self, pt: &Point<f64>) -> Result<Point<f64>, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Identity;

impl Projection for Identity {
  fn forward(&self, pt: &Point<f64>) -> Result<Point<f64>, Error> {
    Ok(*pt)
  }

  fn inverse(&self, pt: &Point<f64>) -> Result<Point<f64>, Error> {
    Ok(*pt)
  }
}

/// Per-axis scale followed by a translation: `forward(p) = p * scale + shift`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
  scale: [f64; 2],
  shift: [f64; 2],
}

impl Default for Affine {
  fn default() -> Self {
    Affine {
      scale: [1.0, 1.0],
      shift: [0.0, 0.0],
    }
  }
}

impl Affine {
  pub fn translate(shift: [f64; 2]) -> Affine {
    Affine {
      shift,
      ..Affine::default()
    }
  }

  pub fn scale(scale: [f64; 2]) -> Affine {
    Affine {
      scale,
      ..Affine::default()
    }
  }

  pub fn uniform_scale(v: f64) -> Affine {
    Affine::scale([v, v])
  }
}

fn checked(pt: Point<f64>, at: &Point<f64>) -> Result<Point<f64>, Error> {
  if pt.is_finite() {
    Ok(pt)
  } else {
    Err(Error::Projection {
      x: *at.x_coord(),
      y: *at.y_coord(),
    })
  }
}

impl Projection for Affine {
  fn forward(&self, pt: &Point<f64>) -> Result<Point<f64>, Error> {
    let out = Point::new(array_init(|i| pt.array[i] * self.scale[i] + self.shift[i]));
    checked(out, pt)
  }

  fn inverse(&self, pt: &Point<f64>) -> Result<Point<f64>, Error> {
    if self.scale.iter().any(|&s| s == 0.0) {
      return Err(Error::Projection {
        x: *pt.x_coord(),
        y: *pt.y_coord(),
      });
    }
    let out = Point::new(array_init(|i| (pt.array[i] - self.shift[i]) / self.scale[i]));
    checked(out, pt)
  }
}

// (a * b).forward(p) == a.forward(b.forward(p))
impl Mul for Affine {
  type Output = Affine;
  fn mul(self, other: Affine) -> Affine {
    &self * &other
  }
}

impl Mul<&Affine> for &Affine {
  type Output = Affine;
  fn mul(self, other: &Affine) -> Affine {
    Affine {
      scale: [self.scale[0] * other.scale[0], self.scale[1] * other.scale[1]],
      shift: [
        other.shift[0] * self.scale[0] + self.shift[0],
        other.shift[1] * self.scale[1] + self.shift[1],
      ],
    }
  }
}
