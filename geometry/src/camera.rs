use algebra::{AlgebraError, Result, Vector, VectorOps, VectorOpsMut};

use crate::ray::Ray;

/// Viewing parameters of a scene plus the constants derived from them.
///
/// The raw fields come straight from the scene description: eye point, view
/// direction, up hint, image-plane distance `h` and the two half-angles in
/// degrees. Construction derives the orthonormal camera axes and the viewport
/// half-extents exactly once; they are never recomputed.
pub struct Camera {
    pub eye: Vector,
    view: Vector,
    x_axis: Vector,
    y_axis: Vector,
    h: f64,
    l: f64,
    r: f64,
    b: f64,
    t: f64,
}

impl Camera {
    pub fn new(
        eye: Vector,
        view: Vector,
        view_up: Vector,
        h: f64,
        x_angle: f64,
        y_angle: f64,
    ) -> Result<Camera> {
        let back = view.scaled(-1.0)?;
        let x_axis = view_up.cross(&back)?;
        if x_axis.norm()? == 0.0 {
            return Err(AlgebraError::InvalidOperation(
                "view direction and up hint are parallel",
            ));
        }
        let x_axis = x_axis.normalized()?;
        let y_axis = back.cross(&x_axis)?.normalized()?;

        let r = h * (x_angle * std::f64::consts::PI / 360.0).tan();
        let t = h * (y_angle * std::f64::consts::PI / 360.0).tan();

        Ok(Camera {
            eye,
            view,
            x_axis,
            y_axis,
            h,
            l: r,
            r,
            b: t,
            t,
        })
    }

    /// Viewport half-extents (l, r, b, t) on the image plane.
    pub fn extents(&self) -> (f64, f64, f64, f64) {
        (self.l, self.r, self.b, self.t)
    }

    /// Builds the primary ray through pixel (`col`, `row`) of a `width` x
    /// `height` raster. Row 0 is the bottom scanline; the pixel sink flips
    /// rows if its surface grows downward. The returned direction is not
    /// normalized.
    pub fn primary_ray(&self, col: usize, row: usize, width: usize, height: usize) -> Result<Ray> {
        let x_step = (self.l + self.r) / (width - 1) as f64;
        let y_step = (self.t + self.b) / (height - 1) as f64;

        let mut dir = self.view.normalized()?.scaled(self.h)?;
        dir.add(&self.x_axis.scaled(col as f64 * x_step - self.l)?)?;
        dir.add(&self.y_axis.scaled(row as f64 * y_step - self.b)?)?;

        Ok(Ray::new(self.eye.clone(), dir))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use algebra::VectorRead;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn straight_camera() -> Camera {
        Camera::new(
            Vector::from3(0.0, 0.0, 0.0),
            Vector::from3(0.0, 0.0, -1.0),
            Vector::from3(0.0, 1.0, 0.0),
            1.0,
            90.0,
            90.0,
        )
        .unwrap()
    }

    #[test]
    fn derived_extents_from_half_angles() {
        let cam = straight_camera();
        let (l, r, b, t) = cam.extents();
        // tan(45 degrees) = 1 at h = 1.
        assert!(close(l, 1.0) && close(r, 1.0) && close(b, 1.0) && close(t, 1.0));
    }

    #[test]
    fn derived_axes_are_orthonormal() {
        let cam = straight_camera();
        assert!(close(cam.x_axis.norm().unwrap(), 1.0));
        assert!(close(cam.y_axis.norm().unwrap(), 1.0));
        assert!(close(cam.x_axis.dot(&cam.y_axis).unwrap(), 0.0));
        assert!(close(cam.x_axis.dot(&cam.view).unwrap(), 0.0));
        // Looking down -z with +y up leaves +x pointing right.
        assert!(close(cam.x_axis.get(0).unwrap(), 1.0));
        assert!(close(cam.y_axis.get(1).unwrap(), 1.0));
    }

    #[test]
    fn center_pixel_looks_along_view() {
        let cam = straight_camera();
        let ray = cam.primary_ray(50, 50, 101, 101).unwrap();
        assert!(close(ray.dir.get(0).unwrap(), 0.0));
        assert!(close(ray.dir.get(1).unwrap(), 0.0));
        assert!(close(ray.dir.get(2).unwrap(), -1.0));
    }

    #[test]
    fn corner_pixels_span_the_viewport() {
        let cam = straight_camera();
        let bottom_left = cam.primary_ray(0, 0, 101, 101).unwrap();
        // x axis is +x, y axis is +y: the (0, 0) pixel sits at (-l, -b).
        assert!(close(bottom_left.dir.get(0).unwrap(), -1.0));
        assert!(close(bottom_left.dir.get(1).unwrap(), -1.0));
        let top_right = cam.primary_ray(100, 100, 101, 101).unwrap();
        assert!(close(top_right.dir.get(0).unwrap(), 1.0));
        assert!(close(top_right.dir.get(1).unwrap(), 1.0));
    }

    #[test]
    fn parallel_view_and_up_is_rejected() {
        let result = Camera::new(
            Vector::from3(0.0, 0.0, 0.0),
            Vector::from3(0.0, 1.0, 0.0),
            Vector::from3(0.0, 1.0, 0.0),
            1.0,
            45.0,
            45.0,
        );
        assert!(result.is_err());
    }
}
