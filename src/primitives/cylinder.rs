use crate::core::PhongMaterial;
use crate::ray_intersection::{Intersectable, Ray};
use crate::utils;
use nalgebra::{Point3, Unit, Vector3};
use num_traits::identities::Zero;
use serde::Deserialize;

/// An infinitely tall cylinder whose axis runs parallel to y through `position`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Cylinder {
    position: Point3<f64>,
    radius: f64,
    // Accepted for scene compatibility; the cylinder is unbounded
    #[allow(dead_code)]
    height: f64,
    #[allow(dead_code)]
    width: f64,
    diffuse_color: Vector3<f64>,
    specular_color: Vector3<f64>,

    #[serde(skip)]
    pub(crate) record: usize,
}

impl Default for Cylinder {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            radius: 0.0,
            height: 0.0,
            width: 0.0,
            diffuse_color: Vector3::zero(),
            specular_color: Vector3::zero(),

            record: 0,
        }
    }
}

impl Cylinder {
    pub fn new(position: Point3<f64>, radius: f64, material: PhongMaterial) -> Self {
        Self {
            position,
            radius,
            diffuse_color: material.diffuse,
            specular_color: material.specular,
            ..Cylinder::default()
        }
    }

    pub fn get_radius(&self) -> f64 {
        self.radius
    }

    pub fn get_material(&self) -> PhongMaterial {
        PhongMaterial::new(self.diffuse_color, self.specular_color)
    }

    /// Points away from the axis, perpendicular to it.
    pub fn surface_normal(&self, hit_point: &Point3<f64>) -> Unit<Vector3<f64>> {
        let radial = hit_point - self.position;
        Unit::new_normalize(Vector3::new(radial.x, 0.0, radial.z))
    }
}

impl Intersectable for Cylinder {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let (o, d) = (&ray.origin, &ray.direction);
        let (rel_x, rel_z) = (o.x - self.position.x, o.z - self.position.z);

        let a = d.x * d.x + d.z * d.z;
        let b = 2.0 * (d.x * rel_x + d.z * rel_z);
        let c = rel_x * rel_x + rel_z * rel_z - self.radius * self.radius;

        // a == 0 for rays parallel to the axis, which the solver reports as a miss
        utils::nearest_positive_root(a, b, c)
    }
}
