/// Defines the `Ray` type: origin plus parametric direction.
pub mod ray;

/// Defines the `Camera`: raw eye/view/up parameters with the orthonormal
/// basis and viewport extents derived once at construction, and per-pixel
/// primary-ray generation.
pub mod camera;

pub use camera::Camera;
pub use ray::Ray;
