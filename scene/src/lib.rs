//! Scene model for the ray tracer: camera, ambient term, point lights and the
//! object list, together with the text-description loader (`loader`).

pub mod loader;

use algebra::{Result, Vector};
use geometry::{Camera, Ray};
use radiometry::Color;
use shape::{Intersection, Shape};

pub use loader::LoadError;

pub struct Light {
    pub position: Vector,
    pub intensity: Color,
}

/// Immutable after loading; safe to share across render workers.
pub struct Scene {
    pub camera: Camera,
    pub ambient: Color,
    pub lights: Vec<Light>,
    pub objects: Vec<Box<dyn Shape>>,
}

impl Scene {
    /// Reads and parses a scene description file.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> std::result::Result<Scene, LoadError> {
        loader::load(path)
    }

    /// Finds the nearest crossing of `ray` with any object, by testing every
    /// object against a fresh record.
    pub fn intersect(&self, ray: &Ray) -> Result<Intersection<'_>> {
        let mut isect = Intersection::none();
        for object in &self.objects {
            object.update_intersection(&mut isect, ray)?;
        }
        Ok(isect)
    }
}
