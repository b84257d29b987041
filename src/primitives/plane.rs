use crate::core::PhongMaterial;
use crate::ray_intersection::{Intersectable, Ray};
use nalgebra::{Point3, Unit, Vector3};
use num_traits::identities::Zero;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Plane {
    position: Point3<f64>,
    normal: Vector3<f64>,
    diffuse_color: Vector3<f64>,
    specular_color: Vector3<f64>,

    #[serde(skip)]
    pub(crate) record: usize,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            normal: Vector3::zero(),
            diffuse_color: Vector3::zero(),
            specular_color: Vector3::zero(),

            record: 0,
        }
    }
}

impl Plane {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>, material: PhongMaterial) -> Self {
        Self {
            position,
            normal,
            diffuse_color: material.diffuse,
            specular_color: material.specular,
            ..Plane::default()
        }
    }

    pub fn has_normal(&self) -> bool {
        !self.normal.is_zero()
    }

    pub fn get_material(&self) -> PhongMaterial {
        PhongMaterial::new(self.diffuse_color, self.specular_color)
    }

    pub fn surface_normal(&self) -> Unit<Vector3<f64>> {
        Unit::new_normalize(self.normal)
    }
}

impl Intersectable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denominator = ray.direction.dot(&self.normal);
        // Parallel rays never meet the plane (or lie in it), so either way they miss
        if denominator == 0.0 {
            return None;
        }

        let distance = (self.position - ray.origin).dot(&self.normal) / denominator;
        if distance > 0.0 {
            return Some(distance);
        }

        None
    }
}
