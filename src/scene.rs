use crate::camera::Camera;
use crate::error::{RenderError, Result};
use crate::math::Vec3;
use crate::sphere::Sphere;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    /// constant, linear and quadratic falloff coefficients
    pub attenuation: Vec3,
}

impl Light {
    pub fn new(position: Vec3, color: Vec3, attenuation: Vec3) -> Light {
        Light {
            position,
            color,
            attenuation,
        }
    }

    /// Radiance reaching a point `distance` away.
    pub fn intensity(&self, distance: f64) -> Vec3 {
        let falloff = self.attenuation.x
            + distance * self.attenuation.y
            + distance * distance * self.attenuation.z;
        self.color / falloff
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pigment {
    pub color: Vec3,
}

impl Pigment {
    pub fn solid(color: Vec3) -> Pigment {
        Pigment { color }
    }
}

/// Shading coefficients of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub reflectivity: f64,
}

/// Immutable scene description.
///
/// The light at index 0 is the ambient light; it only seeds the ambient term and is never
/// shadow tested. Every sphere's pigment and texture index is guaranteed to be in range.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub width: u32,
    pub height: u32,
    pub lights: Vec<Light>,
    pub pigments: Vec<Pigment>,
    pub textures: Vec<Texture>,
    pub spheres: Vec<Sphere>,
}

impl Scene {
    pub fn new(
        camera: Camera,
        width: u32,
        height: u32,
        lights: Vec<Light>,
        pigments: Vec<Pigment>,
        textures: Vec<Texture>,
        spheres: Vec<Sphere>,
    ) -> Result<Scene> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidScene(format!(
                "image size {width}x{height} has no pixels"
            )));
        }

        if lights.is_empty() {
            return Err(RenderError::InvalidScene(
                "at least one (ambient) light is required".to_string(),
            ));
        }

        for (index, sphere) in spheres.iter().enumerate() {
            if sphere.pigment_index >= pigments.len() {
                return Err(RenderError::InvalidScene(format!(
                    "sphere {index} uses pigment {} but only {} are defined",
                    sphere.pigment_index,
                    pigments.len()
                )));
            }
            if sphere.texture_index >= textures.len() {
                return Err(RenderError::InvalidScene(format!(
                    "sphere {index} uses texture {} but only {} are defined",
                    sphere.texture_index,
                    textures.len()
                )));
            }
        }

        Ok(Scene {
            camera,
            width,
            height,
            lights,
            pigments,
            textures,
            spheres,
        })
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn ambient_light(&self) -> &Light {
        &self.lights[0]
    }

    /// Every light except the ambient one.
    pub fn point_lights(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter().skip(1)
    }

    pub fn pigment(&self, sphere_index: usize) -> Vec3 {
        self.pigments[self.spheres[sphere_index].pigment_index].color
    }

    pub fn texture(&self, sphere_index: usize) -> &Texture {
        &self.textures[self.spheres[sphere_index].texture_index]
    }
}
