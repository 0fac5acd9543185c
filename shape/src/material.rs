use radiometry::Color;

/// Phong coefficient set of one face of a surface.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f32,
    pub reflectivity: f32,
}

impl Material {
    pub fn new(
        ambient: Color,
        diffuse: Color,
        specular: Color,
        shininess: f32,
        reflectivity: f32,
    ) -> Material {
        Material {
            ambient,
            diffuse,
            specular,
            shininess,
            reflectivity,
        }
    }

    /// A dull gray surface, handy as a test fixture.
    pub fn matte(gray: f32) -> Material {
        Material::new(
            Color::gray(gray),
            Color::gray(gray),
            Color::black(),
            1.0,
            0.0,
        )
    }
}
