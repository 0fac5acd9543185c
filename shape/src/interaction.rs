use algebra::Vector;

use crate::Shape;

/// One recorded ray-surface crossing.
pub struct Hit<'s> {
    pub shape: &'s dyn Shape,
    pub lambda: f64,
    pub point: Vector,
    /// True when the ray meets the surface from its front side.
    pub front: bool,
}

/// Running nearest-hit record for one ray. Starts empty; shapes offer their
/// crossings through `record`, which keeps only the closest one. A tie keeps
/// the earlier shape.
pub struct Intersection<'s> {
    hit: Option<Hit<'s>>,
}

impl<'s> Intersection<'s> {
    pub fn none() -> Intersection<'s> {
        Intersection { hit: None }
    }

    /// Replaces the stored hit iff `lambda` is strictly smaller than the
    /// current one (or nothing is stored yet).
    pub fn record(&mut self, shape: &'s dyn Shape, lambda: f64, point: Vector, front: bool) {
        let closer = match &self.hit {
            None => true,
            Some(hit) => lambda < hit.lambda,
        };
        if closer {
            self.hit = Some(Hit {
                shape,
                lambda,
                point,
                front,
            });
        }
    }

    pub fn hit(&self) -> Option<&Hit<'s>> {
        self.hit.as_ref()
    }

    pub fn is_none(&self) -> bool {
        self.hit.is_none()
    }
}
