use crate::math::{normalize, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Ray {
        Ray { origin, direction }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Camera with its basis derived once from eye / look-at / up / fovy.
///
/// `center` is the middle of the view plane, one unit in front of the eye.
/// `half_height` and `half_width` are the view-plane extents used when mapping pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub forward: Vec3,
    pub left: Vec3,
    pub up: Vec3,
    pub fovy: f64,
    pub half_height: f64,
    pub half_width: f64,
}

impl Camera {
    pub fn new(eye: Vec3, look_at: Vec3, up: Vec3, fovy: f64, aspect_ratio: f64) -> Camera {
        let up = normalize(up);
        let forward = normalize(look_at - eye);
        let left = normalize(up.cross(forward));
        // re-orthogonalize up against the new forward/left pair
        let up = normalize(forward.cross(left));

        let half_height = 2.0 * (fovy / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        Camera {
            eye,
            center: eye + forward,
            forward,
            left,
            up,
            fovy,
            half_height,
            half_width,
        }
    }

    /// Ray through pixel `(x, y)` of a `width` x `height` raster; row 0 is the top row.
    ///
    /// The ray starts on the view plane rather than at the eye.
    pub fn ray_for_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let w = self.half_width;
        let h = self.half_height;

        let plane_x = w * x as f64 / width as f64 - w / 2.0;
        let plane_y = h * y as f64 / height as f64 - h / 2.0;

        let viewpoint = self.center - self.left * plane_x - self.up * plane_y;
        let direction = normalize(viewpoint - self.eye);

        Ray::new(viewpoint, direction)
    }
}
