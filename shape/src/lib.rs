mod interaction;
mod material;
mod simple;

use algebra::{Result, Vector};
use geometry::ray::Ray;

pub use interaction::{Hit, Intersection};
pub use material::Material;
pub use simple::{Patch, Sphere};

/// Represents the characteristics of a renderable object: it can refine a
/// running nearest-hit record, report a surface normal, and expose its two
/// material coefficient sets.
/// - See `simple.rs` for the implementations: `Sphere` and `Patch`.
pub trait Shape: Send + Sync {
    /// Intersects `ray` with the shape and records the hit into `isect` if it
    /// is closer than whatever `isect` already holds.
    fn update_intersection<'s>(&'s self, isect: &mut Intersection<'s>, ray: &Ray) -> Result<()>;
    /// Geometric (front-facing) unit normal at a surface point.
    fn normal_at(&self, point: &Vector) -> Result<Vector>;
    fn front_material(&self) -> &Material;
    fn back_material(&self) -> &Material;
}
