use std::cmp::Ordering;

use glam::DVec3;

/// Points, directions and linear colors all share the same double precision vector.
pub type Vec3 = DVec3;

/// Tolerance used by [`compare`], 2^-10.
pub const EPSILON: f64 = 0.0009765625;

/// Three-way comparison that treats values closer than [`EPSILON`] as equal.
///
/// Infinities compare as expected against finite values (`x - inf` is `-inf`),
/// while `inf` against `inf` is `NaN` and therefore lands on `Equal`.
pub fn compare(a: f64, b: f64) -> Ordering {
    let d = a - b;

    if d < -EPSILON {
        Ordering::Less
    } else if d > EPSILON {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Unit vector in the direction of `v`, or the zero vector when `v` has no length.
pub fn normalize(v: Vec3) -> Vec3 {
    let length = v.length();
    if length == 0.0 {
        return Vec3::ZERO;
    }
    v / length
}

// r = d - 2(d . n)n
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - normal * (2.0 * direction.dot(normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn normalize_gives_unit_length() {
        let vectors = [
            dvec3(3.0, 4.0, 0.0),
            dvec3(-1.0, 2.0, -7.5),
            dvec3(1e-6, 0.0, 0.0),
            dvec3(1e6, -1e6, 1e6),
        ];

        for v in vectors {
            let length = normalize(v).length();
            assert_eq!(compare(length, 1.0), Ordering::Equal, "{v:?} -> {length}");
        }
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(normalize(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn reflect_flips_normal_component() {
        let normal = dvec3(0.0, 1.0, 0.0);
        let reflected = reflect(dvec3(1.0, -1.0, 0.0), normal);
        assert_eq!(reflected, dvec3(1.0, 1.0, 0.0));

        // tangent directions pass through untouched
        assert_eq!(reflect(dvec3(0.0, 0.0, 2.0), normal), dvec3(0.0, 0.0, 2.0));
    }

    #[test]
    fn cross_product_is_right_handed() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
    }

    #[test]
    fn compare_uses_tolerance() {
        assert_eq!(compare(1.0, 1.0 + EPSILON / 2.0), Ordering::Equal);
        assert_eq!(compare(1.0, 1.0 + 2.0 * EPSILON), Ordering::Less);
        assert_eq!(compare(1.0 + 2.0 * EPSILON, 1.0), Ordering::Greater);
    }

    #[test]
    fn compare_with_infinity() {
        assert_eq!(compare(5.0, f64::INFINITY), Ordering::Less);
        assert_eq!(compare(f64::INFINITY, 5.0), Ordering::Greater);
        assert_eq!(compare(f64::INFINITY, f64::INFINITY), Ordering::Equal);
    }
}
