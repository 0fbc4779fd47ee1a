//! Reader for the whitespace separated scene description format.
//!
//! ```text
//! out.ppm
//! 640 480
//! 0 0 5    0 0 0    0 1 0    0.8          eye, look-at, up, fovy (radians)
//! 2                                       light count, the first one is ambient
//! 0 0 0    0.3 0.3 0.3    1 0 0           position, color, attenuation
//! 5 5 5    1 1 1          1 0 0
//! 1                                       pigment count
//! solid 1 0 0
//! 1                                       texture count
//! 0.2 0.6 0.4 20 0.3                      ambient diffuse specular shininess reflectivity
//! 1                                       sphere count
//! 0 0 sphere    0 0 0    1                pigment, texture, kind, center, radius
//! ```
//!
//! Line breaks carry no meaning; they are only tracked for error messages.

use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::vec::IntoIter;

use glam::dvec3;

use crate::camera::Camera;
use crate::error::{RenderError, Result};
use crate::math::Vec3;
use crate::scene::{Light, Pigment, Scene, Texture};
use crate::sphere::Sphere;

/// A parsed scene together with the image name it asks to be written to.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFile {
    pub output: PathBuf,
    pub scene: Scene,
}

pub fn load_scene(path: &Path) -> Result<SceneFile> {
    let text = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_scene(&text)
}

pub fn parse_scene(text: &str) -> Result<SceneFile> {
    let mut tokens = Tokens::new(text);

    let output = PathBuf::from(tokens.word("output image name")?);

    let width: u32 = tokens.parse("image width")?;
    let height: u32 = tokens.parse("image height")?;

    let eye = tokens.vec3("eye position")?;
    let look_at = tokens.vec3("look-at point")?;
    let up = tokens.vec3("up direction")?;
    let fovy: f64 = tokens.parse("vertical field of view")?;

    let aspect_ratio = width as f64 / height as f64;
    let camera = Camera::new(eye, look_at, up, fovy, aspect_ratio);

    let light_count: usize = tokens.parse("light count")?;
    let mut lights = Vec::with_capacity(tokens.capacity_for(light_count, 9));
    for _ in 0..light_count {
        let position = tokens.vec3("light position")?;
        let color = tokens.vec3("light color")?;
        let attenuation = tokens.vec3("light attenuation")?;
        lights.push(Light::new(position, color, attenuation));
    }

    let pigment_count: usize = tokens.parse("pigment count")?;
    let mut pigments = Vec::with_capacity(tokens.capacity_for(pigment_count, 4));
    for _ in 0..pigment_count {
        // only solid pigments exist, the kind is informational
        tokens.word("pigment kind")?;
        pigments.push(Pigment::solid(tokens.vec3("pigment color")?));
    }

    let texture_count: usize = tokens.parse("texture count")?;
    let mut textures = Vec::with_capacity(tokens.capacity_for(texture_count, 5));
    for _ in 0..texture_count {
        textures.push(Texture {
            ambient: tokens.parse("ambient coefficient")?,
            diffuse: tokens.parse("diffuse coefficient")?,
            specular: tokens.parse("specular coefficient")?,
            shininess: tokens.parse("shininess")?,
            reflectivity: tokens.parse("reflectivity")?,
        });
    }

    let sphere_count: usize = tokens.parse("sphere count")?;
    let mut spheres = Vec::with_capacity(tokens.capacity_for(sphere_count, 7));
    for _ in 0..sphere_count {
        let pigment_index: usize = tokens.parse("sphere pigment index")?;
        let texture_index: usize = tokens.parse("sphere texture index")?;
        tokens.word("object kind")?;
        let center = tokens.vec3("sphere center")?;
        let radius: f64 = tokens.parse("sphere radius")?;
        spheres.push(Sphere::new(center, radius, pigment_index, texture_index));
    }

    if let Some((line, token)) = tokens.peek() {
        log::warn!("ignoring trailing scene data starting at line {line}: `{token}`");
    }

    let scene = Scene::new(camera, width, height, lights, pigments, textures, spheres)?;

    Ok(SceneFile { output, scene })
}

struct Tokens<'a> {
    tokens: Peekable<IntoIter<(usize, &'a str)>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Tokens<'a> {
        let tokens: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .flat_map(|(index, line)| line.split_whitespace().map(move |token| (index + 1, token)))
            .collect();

        Tokens {
            tokens: tokens.into_iter().peekable(),
        }
    }

    /// Room for `count` items of `tokens_per_item` tokens, capped by what is left to read.
    fn capacity_for(&self, count: usize, tokens_per_item: usize) -> usize {
        count.min(self.tokens.len() / tokens_per_item)
    }

    fn peek(&mut self) -> Option<(usize, &'a str)> {
        self.tokens.peek().copied()
    }

    fn word(&mut self, expected: &'static str) -> Result<&'a str> {
        self.tokens
            .next()
            .map(|(_, token)| token)
            .ok_or(RenderError::UnexpectedEof { expected })
    }

    fn parse<T: FromStr>(&mut self, expected: &'static str) -> Result<T> {
        let (line, token) = self
            .tokens
            .next()
            .ok_or(RenderError::UnexpectedEof { expected })?;

        token.parse().map_err(|_| RenderError::InvalidToken {
            line,
            token: token.to_string(),
            expected,
        })
    }

    fn vec3(&mut self, expected: &'static str) -> Result<Vec3> {
        Ok(dvec3(
            self.parse(expected)?,
            self.parse(expected)?,
            self.parse(expected)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = "
        out.ppm
        4 2
        0 0 5   0 0 0   0 1 0   0.8
        2
        0 0 0   0.3 0.3 0.3   1 0 0
        5 5 5   1 1 1         1 0.1 0.01
        2
        solid 1 0 0
        solid 0 0 1
        1
        0.2 0.6 0.4 20 0.3
        2
        0 0 sphere   0 0 0    1
        1 0 sphere   2 0 -1   0.5
    ";

    #[test]
    fn parses_every_section() {
        let SceneFile { output, scene } = parse_scene(SCENE).unwrap();

        assert_eq!(output, PathBuf::from("out.ppm"));
        assert_eq!((scene.width, scene.height), (4, 2));

        assert_eq!(scene.lights.len(), 2);
        assert_eq!(scene.lights[1].attenuation, dvec3(1.0, 0.1, 0.01));

        assert_eq!(scene.pigments[1].color, dvec3(0.0, 0.0, 1.0));

        assert_eq!(
            scene.textures[0],
            Texture {
                ambient: 0.2,
                diffuse: 0.6,
                specular: 0.4,
                shininess: 20.0,
                reflectivity: 0.3,
            }
        );

        assert_eq!(scene.spheres[1], Sphere::new(dvec3(2.0, 0.0, -1.0), 0.5, 1, 0));
    }

    #[test]
    fn derives_camera_at_load_time() {
        let scene = parse_scene(SCENE).unwrap().scene;
        let camera = scene.camera;

        assert_eq!(camera.forward, dvec3(0.0, 0.0, -1.0));
        assert_eq!(camera.center, dvec3(0.0, 0.0, 4.0));
        assert!((camera.half_width - 2.0 * camera.half_height).abs() < 1e-12);
    }

    #[test]
    fn truncated_file_reports_what_is_missing() {
        let truncated = "out.ppm 4 2 0 0 5 0 0 0 0 1 0 0.8 1";
        let error = parse_scene(truncated).unwrap_err();

        assert!(matches!(
            error,
            RenderError::UnexpectedEof {
                expected: "light position"
            }
        ));
    }

    #[test]
    fn huge_count_runs_out_of_tokens() {
        let oversized = "out.ppm 4 4 0 0 5 0 0 0 0 1 0 0.8 1000000000000000 0 0 0";
        let error = parse_scene(oversized).unwrap_err();

        assert!(matches!(
            error,
            RenderError::UnexpectedEof {
                expected: "light color"
            }
        ));
    }

    #[test]
    fn huge_sphere_count_runs_out_of_tokens() {
        let oversized = SCENE.replace("\n        2\n        0 0 sphere", "\n        4000000000\n        0 0 sphere");
        assert_ne!(oversized, SCENE);

        assert!(matches!(
            parse_scene(&oversized),
            Err(RenderError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn bad_number_reports_line() {
        let broken = "out.ppm\n4 two\n";
        let error = parse_scene(broken).unwrap_err();

        match error {
            RenderError::InvalidToken { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, "two");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let scene = SCENE.replace("1 0 sphere", "7 0 sphere");
        assert!(matches!(
            parse_scene(&scene),
            Err(RenderError::InvalidScene(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("whitted_missing_scene.txt");
        assert!(matches!(
            load_scene(&path),
            Err(RenderError::Io { .. })
        ));
    }
}
