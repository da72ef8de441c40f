use num_traits::Float;
use std::ops::Index;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Point<T, const N: usize = 2> {
  pub array: [T; N],
}

// Methods on N-dimensional points.
impl<T, const N: usize> Point<T, N> {
  pub const fn new(array: [T; N]) -> Point<T, N> {
    Point { array }
  }

  pub fn squared_euclidean_distance(&self, rhs: &Point<T, N>) -> T
  where
    T: Float,
  {
    self
      .array
      .iter()
      .zip(rhs.array.iter())
      .fold(T::zero(), |acc, (&a, &b)| {
        let diff = a - b;
        acc + diff * diff
      })
  }

  pub fn is_finite(&self) -> bool
  where
    T: Float,
  {
    self.array.iter().all(|c| c.is_finite())
  }
}

impl<T, const N: usize> Index<usize> for Point<T, N> {
  type Output = T;
  fn index(&self, key: usize) -> &T {
    self.array.index(key)
  }
}

impl<T> From<(T, T)> for Point<T, 2> {
  fn from(point: (T, T)) -> Point<T, 2> {
    Point {
      array: [point.0, point.1],
    }
  }
}

// Methods on two-dimensional points.
impl<T> Point<T, 2> {
  pub fn x_coord(&self) -> &T {
    &self.array[0]
  }

  pub fn y_coord(&self) -> &T {
    &self.array[1]
  }
}

impl<T: Float> Point<T, 2> {
  /// Point at parameter `t` on the segment from `self` to `other`.
  pub fn lerp(&self, other: &Point<T, 2>, t: T) -> Point<T, 2> {
    Point::new([
      self.array[0] + (other.array[0] - self.array[0]) * t,
      self.array[1] + (other.array[1] - self.array[1]) * t,
    ])
  }

  /// Signed angle in radians swept by the ray from `center` when it turns
  /// from `self` to `other`. Positive is counter-clockwise. Lies in `[-pi, pi]`.
  pub fn sweep_around(&self, other: &Point<T, 2>, center: &Point<T, 2>) -> T {
    let (ux, uy) = (self.array[0] - center.array[0], self.array[1] - center.array[1]);
    let (vx, vy) = (other.array[0] - center.array[0], other.array[1] - center.array[1]);
    (ux * vy - uy * vx).atan2(ux * vx + uy * vy)
  }
}
