use algebra::{AlgebraError, Vector, VectorOps};
use geometry::Ray;
use radiometry::Color;
use scene::Scene;

/// Offset applied to shadow and mirror ray origins along their direction, so
/// a ray leaving a surface never re-hits it at lambda ~ 0.
const EPSILON: f64 = 1e-4;

/// Evaluates the light arriving backwards along the ray `origin + t*dir`.
///
/// Local Phong shading plus a mirror bounce, recursing until `depth` runs
/// out. Contributions are summed without clamping: a light behind the
/// surface's tangent plane subtracts light, and a negative specular base
/// raised to a fractional exponent goes NaN. The sink conversion is the only
/// place where values are forced into displayable range.
pub fn trace(scene: &Scene, origin: &Vector, dir: &Vector, depth: i32) -> Result<Color, AlgebraError> {
    if depth < 0 {
        return Ok(Color::black());
    }

    let ray = Ray::new(origin.clone(), dir.clone());
    let isect = scene.intersect(&ray)?;
    let hit = match isect.hit() {
        None => return Ok(Color::black()),
        Some(hit) => hit,
    };

    // Shading reads the front coefficient set and the outward geometric
    // normal, whichever side the ray arrived from.
    let material = hit.shape.front_material();
    let normal = hit.shape.normal_at(&hit.point)?;
    let incoming = dir.normalized()?;

    let mut color = material.ambient * scene.ambient;

    for light in &scene.lights {
        let to_light = light.position.subbed(&hit.point)?;
        let distance = to_light.norm()?;
        let light_dir = to_light.normalized()?;

        let shadow_origin = hit.point.added(&light_dir.scaled(EPSILON)?)?;
        let shadow_ray = Ray::new(shadow_origin, light_dir.clone());
        if occluded(scene, &shadow_ray, distance)? {
            continue;
        }

        let n_dot_l = normal.dot(&light_dir)?;
        color += material.diffuse * light.intensity * n_dot_l as f32;

        // Phong lobe: the light direction mirrored about the normal, against
        // the direction back towards the ray origin.
        let reflected = normal.scaled(2.0 * n_dot_l)?.subbed(&light_dir)?;
        let toward_eye = incoming.scaled(-1.0)?;
        let base = reflected.dot(&toward_eye)?;
        color += material.specular * light.intensity * base.powf(material.shininess as f64) as f32;
    }

    let mirror = incoming.subbed(&normal.scaled(2.0 * incoming.dot(&normal)?)?)?;
    let mirror_origin = hit.point.added(&mirror.scaled(EPSILON)?)?;
    let bounced = trace(scene, &mirror_origin, &mirror, depth - 1)?;
    color += bounced * material.reflectivity;

    Ok(color)
}

/// True when anything sits between the shadow ray's origin and the light,
/// `distance` units down the (unit-length) ray.
fn occluded(scene: &Scene, shadow_ray: &Ray, distance: f64) -> Result<bool, AlgebraError> {
    let isect = scene.intersect(shadow_ray)?;
    Ok(match isect.hit() {
        Some(hit) => hit.lambda <= distance,
        None => false,
    })
}
