use std::fmt::{Display, Formatter, Result};

use algebra::{Vector, VectorOps};

/// Represents a ray:
///
///   origin + lambda * direction
///
/// where lambda is positive. The direction is not required to be unit-length;
/// intersection code solves for lambda in whatever scale the direction
/// carries, and shading normalizes where the lighting math demands it.
#[derive(Debug, Clone)]
pub struct Ray {
    pub origin: Vector,
    pub dir: Vector,
}

impl Ray {
    pub fn new(origin: Vector, dir: Vector) -> Self {
        Ray { origin, dir }
    }

    /// The point `origin + lambda * dir`.
    pub fn position_at(&self, lambda: f64) -> algebra::Result<Vector> {
        self.origin.added(&self.dir.scaled(lambda)?)
    }
}

impl Display for Ray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let precision = f.precision().unwrap_or(2);
        write!(
            f,
            "{:.precision$} + t{:.precision$}",
            self.origin,
            self.dir,
            precision = precision
        )
    }
}
