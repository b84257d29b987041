mod attenuation;

use crate::error::RenderError;
use nalgebra::{Point3, Unit, Vector3};
use num_traits::identities::Zero;
use serde::Deserialize;

pub use attenuation::{fang, frad, RadialFalloff};

/// A point light, or a spotlight when it has a non-zero `direction`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Light {
    position: Point3<f64>,
    color: Vector3<f64>,
    direction: Vector3<f64>,
    #[serde(rename = "radial-a0")]
    radial_a0: f64,
    #[serde(rename = "radial-a1")]
    radial_a1: f64,
    #[serde(rename = "radial-a2")]
    radial_a2: f64,
    #[serde(rename = "angular-a0")]
    angular_a0: f64,
    theta: f64,

    #[serde(skip)]
    pub(crate) record: usize,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            color: Vector3::zero(),
            direction: Vector3::zero(),
            radial_a0: 0.0,
            radial_a1: 0.0,
            radial_a2: 0.0,
            angular_a0: 0.0,
            theta: 0.0,

            record: 0,
        }
    }
}

impl Light {
    /// `radial` holds the constant, linear and quadratic attenuation coefficients.
    pub fn new(position: Point3<f64>, color: Vector3<f64>, radial: [f64; 3]) -> Self {
        Self {
            position,
            color,
            radial_a0: radial[0],
            radial_a1: radial[1],
            radial_a2: radial[2],
            ..Light::default()
        }
    }

    #[must_use]
    pub fn with_spot(mut self, direction: Vector3<f64>, theta: f64, angular_a0: f64) -> Self {
        self.direction = direction;
        self.theta = theta;
        self.angular_a0 = angular_a0;
        self
    }

    pub fn get_position(&self) -> Point3<f64> {
        self.position
    }

    pub fn get_color(&self) -> Vector3<f64> {
        self.color
    }

    pub fn get_record(&self) -> usize {
        self.record
    }

    pub fn is_spotlight(&self) -> bool {
        !self.direction.is_zero()
    }

    pub(crate) fn has_radial_attenuation(&self) -> bool {
        self.radial_a0 != 0.0 || self.radial_a1 != 0.0 || self.radial_a2 != 0.0
    }

    pub fn radial_attenuation(
        &self,
        distance: f64,
        falloff: RadialFalloff,
    ) -> Result<f64, RenderError> {
        frad(
            self.radial_a2,
            self.radial_a1,
            self.radial_a0,
            distance,
            falloff,
        )
        .ok_or(RenderError::ZeroAttenuation {
            light: self.record,
            distance,
        })
    }

    /// Always 1 for omnidirectional lights.
    pub fn angular_attenuation(&self, point: &Point3<f64>) -> f64 {
        if !self.is_spotlight() {
            return 1.0;
        }

        // The cone is measured against the direction from the light to the point, not the
        // point's position vector
        match Unit::try_new(point - self.position, 0.0) {
            Some(to_point) => fang(
                self.theta,
                &Unit::new_normalize(self.direction),
                &to_point,
                self.angular_a0,
            ),
            None => 1.0,
        }
    }

    /// Combined radial and angular attenuation of this light at `point`, `distance` away.
    pub fn attenuation(
        &self,
        point: &Point3<f64>,
        distance: f64,
        falloff: RadialFalloff,
    ) -> Result<f64, RenderError> {
        Ok(self.radial_attenuation(distance, falloff)? * self.angular_attenuation(point))
    }
}
