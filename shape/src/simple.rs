use algebra::{Matrix, MatrixOps, Result, Vector, VectorOps, VectorRead};
use geometry::ray::Ray;

use crate::{Intersection, Material, Shape};

pub struct Sphere {
    center: Vector,
    radius: f64,
    front: Material,
    back: Material,
}

impl Sphere {
    /// Both faces of a sphere carry the same coefficient set.
    pub fn new(center: Vector, radius: f64, material: Material) -> Sphere {
        Sphere {
            center,
            radius,
            front: material,
            back: material,
        }
    }
}

impl Shape for Sphere {
    fn update_intersection<'s>(&'s self, isect: &mut Intersection<'s>, ray: &Ray) -> Result<()> {
        let oc = ray.origin.subbed(&self.center)?;
        let a = ray.dir.dot(&ray.dir)?;
        let b = 2.0 * ray.dir.dot(&oc)?;
        let c = oc.dot(&oc)? - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return Ok(());
        }
        let sqrt_d = discriminant.sqrt();
        // Nearer root first; a root at or behind the origin is no hit.
        let mut lambda = (-b - sqrt_d) / (2.0 * a);
        if lambda <= 0.0 {
            lambda = (-b + sqrt_d) / (2.0 * a);
        }
        if lambda <= 0.0 {
            return Ok(());
        }

        let point = ray.position_at(lambda)?;
        let front = oc.norm()? >= self.radius;
        isect.record(self, lambda, point, front);
        Ok(())
    }

    fn normal_at(&self, point: &Vector) -> Result<Vector> {
        point.subbed(&self.center)?.normalized()
    }

    fn front_material(&self) -> &Material {
        &self.front
    }
    fn back_material(&self) -> &Material {
        &self.back
    }
}

/// Rectangular piece of a plane: a center point, two in-plane basis vectors
/// stored as given, and the half-extents along them. The in-plane hit
/// coordinates s and t come out in the basis vectors' own scale, so a
/// non-unit basis stretches the accepted extent with it.
pub struct Patch {
    center: Vector,
    v1: Vector,
    v2: Vector,
    normal: Vector,
    half_width: f64,
    half_height: f64,
    front: Material,
    back: Material,
}

impl Patch {
    pub fn new(
        center: Vector,
        v1: Vector,
        v2: Vector,
        half_width: f64,
        half_height: f64,
        front: Material,
        back: Material,
    ) -> Result<Patch> {
        let normal = v1.cross(&v2)?.normalized()?;
        Ok(Patch {
            center,
            v1,
            v2,
            normal,
            half_width,
            half_height,
            front,
            back,
        })
    }
}

impl Shape for Patch {
    fn update_intersection<'s>(&'s self, isect: &mut Intersection<'s>, ray: &Ray) -> Result<()> {
        let denom = ray.dir.dot(&self.normal)?;
        if denom == 0.0 {
            return Ok(());
        }

        // center + s*v1 + t*v2 = origin + lambda*d, solved as
        // [v1 | v2 | -d] * [s, t, lambda]^t = origin - center.
        let basis = Matrix::from_rows(vec![
            vec![self.v1.get(0)?, self.v2.get(0)?, -ray.dir.get(0)?],
            vec![self.v1.get(1)?, self.v2.get(1)?, -ray.dir.get(1)?],
            vec![self.v1.get(2)?, self.v2.get(2)?, -ray.dir.get(2)?],
        ])?;
        let diff = ray.origin.subbed(&self.center)?;
        let solved = basis.inverted()?.matmul(&diff.as_column_matrix())?;
        let stl = solved.as_vector_view()?;

        let (s, t, lambda) = (stl.get(0)?, stl.get(1)?, stl.get(2)?);
        if lambda < 0.0 || s.abs() > self.half_width || t.abs() > self.half_height {
            return Ok(());
        }

        let point = ray.position_at(lambda)?;
        isect.record(self, lambda, point, denom < 0.0);
        Ok(())
    }

    fn normal_at(&self, _point: &Vector) -> Result<Vector> {
        Ok(self.normal.clone())
    }

    fn front_material(&self) -> &Material {
        &self.front
    }
    fn back_material(&self) -> &Material {
        &self.back
    }
}
