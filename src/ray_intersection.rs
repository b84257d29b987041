use crate::primitives::Surface;
use nalgebra::{Point3, Vector3};

pub trait Intersectable {
    /// Parametric distance along `ray.direction` to the nearest hit in front of the
    /// ray origin, if any.
    fn intersect(&self, ray: &Ray) -> Option<f64>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RayType {
    Primary,
    Shadow,
}

#[derive(Debug)]
pub struct Ray {
    pub ray_type: RayType,
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(ray_type: RayType, origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            ray_type,
            origin,
            direction,
        }
    }

    pub fn at(&self, distance: f64) -> Point3<f64> {
        self.origin + self.direction * distance
    }
}

#[derive(Debug)]
pub struct Intersection<'a> {
    pub surface: &'a Surface,
    /// Position of the surface in the scene's surface list.
    pub index: usize,
    /// Measured in multiples of the ray's direction vector.
    pub distance: f64,
}

impl<'a> Intersection<'a> {
    pub fn new(surface: &'a Surface, index: usize, distance: f64) -> Self {
        Self {
            surface,
            index,
            distance,
        }
    }

    pub fn hit_point(&self, ray: &Ray) -> Point3<f64> {
        ray.at(self.distance)
    }
}
