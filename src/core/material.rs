use nalgebra::{Unit, Vector3};
use num_traits::identities::Zero;

use crate::utils;

/// Local illumination parameters of a surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhongMaterial {
    pub diffuse: Vector3<f64>,
    pub specular: Vector3<f64>,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            diffuse: Vector3::zero(),
            specular: Vector3::zero(),
        }
    }
}

impl PhongMaterial {
    pub fn new(diffuse: Vector3<f64>, specular: Vector3<f64>) -> Self {
        Self { diffuse, specular }
    }

    /// Diffuse plus specular response to a single unattenuated light.
    ///
    /// `light_dir` points from the surface to the light and `view_dir` from the surface
    /// back toward the eye. Both terms vanish when the light is behind the surface.
    pub fn shade(
        &self,
        normal: &Unit<Vector3<f64>>,
        light_dir: &Unit<Vector3<f64>>,
        view_dir: &Unit<Vector3<f64>>,
        light_color: &Vector3<f64>,
        shininess: f64,
    ) -> Vector3<f64> {
        let n_dot_l = normal.dot(light_dir);
        if n_dot_l <= 0.0 {
            return Vector3::zero();
        }

        let diffuse = self.diffuse.component_mul(light_color) * n_dot_l;

        let reflected = utils::mirror(light_dir, normal);
        let r_dot_v = reflected.dot(view_dir);
        let specular = if r_dot_v > 0.0 {
            self.specular.component_mul(light_color) * r_dot_v.powf(shininess)
        } else {
            Vector3::zero()
        };

        diffuse + specular
    }
}
