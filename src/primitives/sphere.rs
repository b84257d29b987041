use crate::core::PhongMaterial;
use crate::ray_intersection::{Intersectable, Ray};
use crate::utils;
use nalgebra::{Point3, Unit, Vector3};
use num_traits::identities::Zero;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Sphere {
    position: Point3<f64>,
    radius: f64,
    diffuse_color: Vector3<f64>,
    specular_color: Vector3<f64>,

    #[serde(skip)]
    pub(crate) record: usize,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            radius: 0.0,
            diffuse_color: Vector3::zero(),
            specular_color: Vector3::zero(),

            record: 0,
        }
    }
}

impl Sphere {
    pub fn new(position: Point3<f64>, radius: f64, material: PhongMaterial) -> Self {
        Self {
            position,
            radius,
            diffuse_color: material.diffuse,
            specular_color: material.specular,
            ..Sphere::default()
        }
    }

    pub fn get_radius(&self) -> f64 {
        self.radius
    }

    pub fn get_material(&self) -> PhongMaterial {
        PhongMaterial::new(self.diffuse_color, self.specular_color)
    }

    pub fn surface_normal(&self, hit_point: &Point3<f64>) -> Unit<Vector3<f64>> {
        Unit::new_normalize(hit_point - self.position)
    }
}

impl Intersectable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let hypot = ray.origin - self.position;
        let a = ray.direction.magnitude_squared();
        let b = 2.0 * ray.direction.dot(&hypot);
        let c = hypot.magnitude_squared() - self.radius * self.radius;

        utils::nearest_positive_root(a, b, c)
    }
}
