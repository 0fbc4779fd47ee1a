use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use rayon::prelude::*;

use crate::camera::Ray;
use crate::frame::{pixel_count, FrameBuffer};
use crate::math::{compare, normalize, reflect, Vec3, EPSILON};
use crate::scene::Scene;

/// Color of rays that leave the scene without hitting anything.
pub const BACKGROUND_COLOR: Vec3 = Vec3::new(0.5, 0.5, 0.5);

pub const DEFAULT_MAX_DEPTH: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub primary_rays: u64,
    pub shadow_rays: u64,
    pub reflection_rays: u64,
}

#[derive(Debug, Default)]
struct RayCounters {
    primary: AtomicU64,
    shadow: AtomicU64,
    reflection: AtomicU64,
}

/// Whitted style tracer over a borrowed, read-only scene.
#[derive(Debug)]
pub struct Renderer<'a> {
    scene: &'a Scene,
    max_depth: u32,
    counters: RayCounters,
}

impl<'a> Renderer<'a> {
    pub fn new(scene: &'a Scene, max_depth: u32) -> Renderer<'a> {
        Renderer {
            scene,
            max_depth,
            counters: RayCounters::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn stats(&self) -> RenderStats {
        RenderStats {
            primary_rays: self.counters.primary.load(AtomicOrdering::Relaxed),
            shadow_rays: self.counters.shadow.load(AtomicOrdering::Relaxed),
            reflection_rays: self.counters.reflection.load(AtomicOrdering::Relaxed),
        }
    }

    /// Traces every pixel in raster order.
    pub fn render(&self) -> FrameBuffer {
        let (width, height) = (self.scene.width, self.scene.height);
        let mut frame = FrameBuffer::new(width, height);

        for y in 0..height {
            for x in 0..width {
                frame.set(x, y, self.per_pixel(x, y));
            }
        }

        frame
    }

    /// Same image as [`Renderer::render`], with pixels spread over the rayon pool.
    pub fn render_parallel(&self) -> FrameBuffer {
        let (width, height) = (self.scene.width, self.scene.height);

        let row = width as usize;

        let pixels: Vec<Vec3> = (0..pixel_count(width, height))
            .into_par_iter()
            .map(|index| self.per_pixel((index % row) as u32, (index / row) as u32))
            .collect();

        FrameBuffer::from_pixels(width, height, pixels)
    }

    fn per_pixel(&self, x: u32, y: u32) -> Vec3 {
        let scene = self.scene;
        let ray = scene
            .camera
            .ray_for_pixel(x, y, scene.width, scene.height);

        self.counters.primary.fetch_add(1, AtomicOrdering::Relaxed);
        let color = self.trace_ray(&ray, self.max_depth);
        log::trace!("pixel ({x}, {y}) -> {color}");

        color
    }

    /// Radiance seen along `ray` with `depth` reflective bounces left.
    pub fn trace_ray(&self, ray: &Ray, depth: u32) -> Vec3 {
        match self.closest_hit(ray) {
            None => BACKGROUND_COLOR,
            Some((sphere_index, hit_distance)) => self.shade(ray, sphere_index, hit_distance, depth),
        }
    }

    /// Nearest sphere along `ray`; ties go to the lower index.
    pub fn closest_hit(&self, ray: &Ray) -> Option<(usize, f64)> {
        let mut hit_distance = f64::INFINITY;
        let mut closest_sphere_index = None;

        for (sphere_index, sphere) in self.scene.spheres.iter().enumerate() {
            let t = sphere.intersect(ray);

            if compare(t, hit_distance) == Ordering::Less {
                hit_distance = t;
                closest_sphere_index = Some(sphere_index);
            }
        }

        closest_sphere_index.map(|index| (index, hit_distance))
    }

    /// Whether any sphere blocks `ray` before it has travelled `distance`.
    fn is_occluded(&self, ray: &Ray, distance: f64) -> bool {
        self.counters.shadow.fetch_add(1, AtomicOrdering::Relaxed);

        let mut nearest = f64::INFINITY;
        for sphere in &self.scene.spheres {
            let t = sphere.intersect(ray);

            if compare(t, nearest) == Ordering::Less && compare(t, distance) == Ordering::Less {
                nearest = t;
            }
        }

        compare(nearest, f64::INFINITY) == Ordering::Less
    }

    fn shade(&self, ray: &Ray, sphere_index: usize, hit_distance: f64, depth: u32) -> Vec3 {
        let scene = self.scene;
        let sphere = &scene.spheres[sphere_index];
        let pigment = scene.pigment(sphere_index);
        let texture = scene.texture(sphere_index);

        // pull the hit point back along the ray so secondary rays start outside the surface
        let point = ray.at(hit_distance - EPSILON);

        let mut normal = normalize(point - sphere.center);
        if sphere.contains(ray.origin) {
            normal = -normal;
        }

        let mut color = pigment * texture.ambient * scene.ambient_light().color;

        for light in scene.point_lights() {
            let to_light = light.position - point;
            let distance = to_light.length();
            let light_ray = Ray::new(point, normalize(to_light));

            if self.is_occluded(&light_ray, distance) {
                continue;
            }

            let diffuse = pigment * texture.diffuse * normal.dot(light_ray.direction).max(0.0);

            let view_direction = normalize(ray.origin - point);
            let reflect_direction = reflect(light_ray.direction, normal);
            let specular = texture.specular
                * view_direction
                    .dot(reflect_direction)
                    .max(0.0)
                    .powf(texture.shininess);

            color += light.intensity(distance) * (diffuse + Vec3::splat(specular));
        }

        let reflectivity = texture.reflectivity;

        if compare(0.0, reflectivity) != Ordering::Less {
            return color;
        }

        if depth == 0 {
            return (1.0 - reflectivity) * color;
        }

        self.counters.reflection.fetch_add(1, AtomicOrdering::Relaxed);
        let reflected = Ray::new(point, reflect(ray.direction, normal));

        (1.0 - reflectivity) * color + reflectivity * self.trace_ray(&reflected, depth - 1)
    }
}
