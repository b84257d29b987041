mod cylinder;
mod plane;
mod sphere;

use crate::core::PhongMaterial;
use crate::ray_intersection::{Intersectable, Ray};
use nalgebra::{Point3, Unit, Vector3};

pub use cylinder::*;
pub use plane::*;
pub use sphere::*;

/// Anything a ray can hit.
#[derive(Clone, Debug)]
pub enum Surface {
    Sphere(Sphere),
    Cylinder(Cylinder),
    Plane(Plane),
}

impl Surface {
    pub fn kind(&self) -> &'static str {
        match self {
            Surface::Sphere(_) => "sphere",
            Surface::Cylinder(_) => "cylinder",
            Surface::Plane(_) => "plane",
        }
    }

    /// Index of the scene record this surface was read from.
    pub fn get_record(&self) -> usize {
        match self {
            Surface::Sphere(sphere) => sphere.record,
            Surface::Cylinder(cylinder) => cylinder.record,
            Surface::Plane(plane) => plane.record,
        }
    }

    pub(crate) fn set_record(&mut self, record: usize) {
        match self {
            Surface::Sphere(sphere) => sphere.record = record,
            Surface::Cylinder(cylinder) => cylinder.record = record,
            Surface::Plane(plane) => plane.record = record,
        }
    }

    pub fn get_material(&self) -> PhongMaterial {
        match self {
            Surface::Sphere(sphere) => sphere.get_material(),
            Surface::Cylinder(cylinder) => cylinder.get_material(),
            Surface::Plane(plane) => plane.get_material(),
        }
    }

    pub fn surface_normal(&self, hit_point: &Point3<f64>) -> Unit<Vector3<f64>> {
        match self {
            Surface::Sphere(sphere) => sphere.surface_normal(hit_point),
            Surface::Cylinder(cylinder) => cylinder.surface_normal(hit_point),
            Surface::Plane(plane) => plane.surface_normal(),
        }
    }
}

impl Intersectable for Surface {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Surface::Sphere(sphere) => sphere.intersect(ray),
            Surface::Cylinder(cylinder) => cylinder.intersect(ray),
            Surface::Plane(plane) => plane.intersect(ray),
        }
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

impl From<Cylinder> for Surface {
    fn from(cylinder: Cylinder) -> Self {
        Surface::Cylinder(cylinder)
    }
}

impl From<Plane> for Surface {
    fn from(plane: Plane) -> Self {
        Surface::Plane(plane)
    }
}
