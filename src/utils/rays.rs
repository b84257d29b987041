use nalgebra::{Unit, Vector3};

pub fn reflect(incident: &Vector3<f64>, normal: &Vector3<f64>) -> Unit<Vector3<f64>> {
    Unit::new_normalize(incident - 2.0 * incident.dot(normal) * normal)
}

/// Phong mirror direction `2N(N·L) - L` of the unit vector `light_dir` (pointing from the
/// surface toward the light) about `normal`.
pub fn mirror(light_dir: &Vector3<f64>, normal: &Vector3<f64>) -> Unit<Vector3<f64>> {
    reflect(&-light_dir, normal)
}
