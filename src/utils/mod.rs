mod rays;

use nalgebra::{clamp, Vector3};
use num_traits::Float;

pub use rays::mirror;

pub fn to_rgb_u8(rgb: Vector3<f64>) -> [u8; 3] {
    let rgb = rgb.map(|c| clamp(c, 0.0, 1.0) * 255.0);
    [rgb.x as u8, rgb.y as u8, rgb.z as u8]
}

pub fn remap_value<F: Float>(num: F, domain: (F, F), range: (F, F)) -> F {
    assert!(domain.0 < domain.1, "domain values must be of the form (min, max) - range values can be swapped for this behavior");

    (num - domain.0) * (range.1 - range.0) / (domain.1 - domain.0) + range.0
}

pub fn quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    if a == 0.0 {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        None
    } else if discriminant == 0.0 {
        Some((-0.5 * b / a, -0.5 * b / a))
    } else {
        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        let r0 = q / a;
        let r1 = c / q;
        Some((r0.min(r1), r0.max(r1)))
    }
}

/// Smallest strictly positive root of `a t² + b t + c = 0`.
pub fn nearest_positive_root(a: f64, b: f64, c: f64) -> Option<f64> {
    let (t0, t1) = quadratic(a, b, c)?;
    if t0 > 0.0 {
        Some(t0)
    } else if t1 > 0.0 {
        Some(t1)
    } else {
        None
    }
}
