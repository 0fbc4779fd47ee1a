use std::cmp::Ordering;

use crate::camera::Ray;
use crate::math::{compare, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    pub pigment_index: usize,
    pub texture_index: usize,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64, pigment_index: usize, texture_index: usize) -> Sphere {
        Sphere {
            center,
            radius,
            pigment_index,
            texture_index,
        }
    }

    /// Smallest positive hit distance along `ray`, or `f64::INFINITY` on a miss.
    pub fn intersect(&self, ray: &Ray) -> f64 {
        // |o + t*d - c|^2 = r^2
        // (d.d)t^2 + 2(d.(o-c))t + (o-c).(o-c) - r^2 = 0
        let origin = ray.origin - self.center;

        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(origin);
        let c = origin.dot(origin) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;

        match compare(discriminant, 0.0) {
            Ordering::Less => f64::INFINITY,
            Ordering::Equal => {
                // tangent ray, single root
                let t = -b / (2.0 * a);
                if is_ahead(t) {
                    t
                } else {
                    f64::INFINITY
                }
            }
            Ordering::Greater => {
                let s = discriminant.sqrt();
                let t0 = (-b - s) / (2.0 * a);
                let t1 = (-b + s) / (2.0 * a);

                if is_ahead(t0) {
                    t0
                } else if is_ahead(t1) {
                    t1
                } else {
                    f64::INFINITY
                }
            }
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.center).length() < self.radius
    }
}

fn is_ahead(t: f64) -> bool {
    compare(0.0, t) == Ordering::Less && compare(t, f64::INFINITY) == Ordering::Less
}
