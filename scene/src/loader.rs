//! Line-oriented scene description parser.
//!
//! One directive per line, tokens separated by whitespace; `#`-prefixed and
//! blank lines are skipped. Any missing or malformed token aborts the load
//! with the offending line number; no partial scene is ever returned.

use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

use algebra::{AlgebraError, Vector};
use geometry::Camera;
use log::info;
use radiometry::Color;
use shape::{Material, Patch, Shape, Sphere};
use thiserror::Error;

use crate::{Light, Scene};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("line {line}: {message}")]
    ParseFailure { line: usize, message: String },
    #[error("scene description never defines `{0}`")]
    Incomplete(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene, LoadError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

pub fn parse(text: &str) -> Result<Scene, LoadError> {
    let mut eye = None;
    let mut view = None;
    let mut view_up = None;
    let mut h = None;
    let mut x_angle = None;
    let mut y_angle = None;
    let mut ambient = Color::black();
    let mut lights = Vec::new();
    let mut objects: Vec<Box<dyn Shape>> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut fields = Fields::new(index + 1, trimmed);
        match fields.next_token()? {
            "e" => eye = Some(fields.locked_vector3()?),
            "v" => view = Some(fields.vector3()?),
            "vu" => view_up = Some(fields.vector3()?),
            "h" => h = Some(fields.next_f64()?),
            "xa" => x_angle = Some(fields.next_f64()?),
            "ya" => y_angle = Some(fields.next_f64()?),
            "ga" => ambient = fields.color()?,
            "i" => lights.push(Light {
                position: fields.locked_vector3()?,
                intensity: fields.color()?,
            }),
            "o" => match fields.next_token()? {
                "s" => {
                    let center = fields.locked_vector3()?;
                    let radius = fields.next_f64()?;
                    // A sphere reads one coefficient set for both faces.
                    let material = fields.material()?;
                    objects.push(Box::new(Sphere::new(center, radius, material)));
                }
                "p" => {
                    let center = fields.locked_vector3()?;
                    let v1 = fields.vector3()?;
                    let v2 = fields.vector3()?;
                    let half_width = fields.next_f64()?;
                    let half_height = fields.next_f64()?;
                    let front = fields.material()?;
                    let back = fields.material()?;
                    objects.push(Box::new(Patch::new(
                        center,
                        v1,
                        v2,
                        half_width,
                        half_height,
                        front,
                        back,
                    )?));
                }
                other => return Err(fields.fail(format!("unknown object kind `{}`", other))),
            },
            other => return Err(fields.fail(format!("unknown directive `{}`", other))),
        }
    }

    let camera = Camera::new(
        eye.ok_or(LoadError::Incomplete("e"))?,
        view.ok_or(LoadError::Incomplete("v"))?,
        view_up.ok_or(LoadError::Incomplete("vu"))?,
        h.ok_or(LoadError::Incomplete("h"))?,
        x_angle.ok_or(LoadError::Incomplete("xa"))?,
        y_angle.ok_or(LoadError::Incomplete("ya"))?,
    )?;

    info!(
        "scene loaded: {} object(s), {} light(s)",
        objects.len(),
        lights.len()
    );
    Ok(Scene {
        camera,
        ambient,
        lights,
        objects,
    })
}

/// Token cursor over one directive line.
struct Fields<'a> {
    line: usize,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(line: usize, text: &'a str) -> Fields<'a> {
        Fields {
            line,
            tokens: text.split_whitespace(),
        }
    }

    fn fail(&self, message: String) -> LoadError {
        LoadError::ParseFailure {
            line: self.line,
            message,
        }
    }

    fn next_token(&mut self) -> Result<&'a str, LoadError> {
        let line = self.line;
        self.tokens.next().ok_or(LoadError::ParseFailure {
            line,
            message: "missing token".to_string(),
        })
    }

    fn next_f64(&mut self) -> Result<f64, LoadError> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| self.fail(format!("expected a number, got `{}`", token)))
    }

    fn next_f32(&mut self) -> Result<f32, LoadError> {
        Ok(self.next_f64()? as f32)
    }

    fn vector3(&mut self) -> Result<Vector, LoadError> {
        Ok(Vector::from3(
            self.next_f64()?,
            self.next_f64()?,
            self.next_f64()?,
        ))
    }

    /// Positions read from the file are locked against mutation.
    fn locked_vector3(&mut self) -> Result<Vector, LoadError> {
        let elems = vec![self.next_f64()?, self.next_f64()?, self.next_f64()?];
        Ok(Vector::locked(elems)?)
    }

    fn color(&mut self) -> Result<Color, LoadError> {
        Ok(Color::new(
            self.next_f32()?,
            self.next_f32()?,
            self.next_f32()?,
        ))
    }

    fn material(&mut self) -> Result<Material, LoadError> {
        Ok(Material::new(
            self.color()?,
            self.color()?,
            self.color()?,
            self.next_f32()?,
            self.next_f32()?,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "\
# one sphere over a floor patch
e 0 0 5
v 0 0 -1
vu 0 1 0
h 1
xa 90
ya 90

ga 0.1 0.1 0.1
i 0 10 0 1 1 1
o s 0 0 0 1 0.2 0.2 0.2 0.6 0.6 0.6 0.3 0.3 0.3 10 0.5
o p 0 -2 0 1 0 0 0 0 1 4 4 0.2 0.2 0.2 0.6 0.6 0.6 0.3 0.3 0.3 10 0 0.1 0.1 0.1 0.1 0.1 0.1 0.1 0.1 0.1 5 0
";

    #[test]
    fn parses_a_complete_scene() {
        let scene = parse(SAMPLE).unwrap();
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.lights.len(), 1);
        assert!((scene.ambient.r - 0.1).abs() < 1e-6);
        assert!((scene.lights[0].intensity.g - 1.0).abs() < 1e-6);
    }

    #[test]
    fn file_positions_are_locked() {
        let scene = parse(SAMPLE).unwrap();
        assert!(scene.lights[0].position.is_locked());
        assert!(scene.camera.eye.is_locked());
    }

    #[test]
    fn patch_reads_distinct_back_coefficients() {
        let scene = parse(SAMPLE).unwrap();
        let patch = &scene.objects[1];
        assert!((patch.front_material().shininess - 10.0).abs() < 1e-6);
        assert!((patch.back_material().shininess - 5.0).abs() < 1e-6);
    }

    #[test]
    fn malformed_number_reports_its_line() {
        let broken = SAMPLE.replace("xa 90", "xa ninety");
        match parse(&broken) {
            Err(LoadError::ParseFailure { line, message }) => {
                assert_eq!(line, 6);
                assert!(message.contains("ninety"));
            }
            other => panic!("expected a parse failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn truncated_directive_fails() {
        assert!(matches!(
            parse("o s 0 0 0"),
            Err(LoadError::ParseFailure { .. })
        ));
    }

    #[test]
    fn unknown_directive_fails() {
        assert!(matches!(
            parse("q 1 2 3"),
            Err(LoadError::ParseFailure { .. })
        ));
    }

    #[test]
    fn missing_camera_directive_fails() {
        let no_eye: String = SAMPLE
            .lines()
            .filter(|l| !l.starts_with("e "))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(matches!(parse(&no_eye), Err(LoadError::Incomplete("e"))));
    }
}
