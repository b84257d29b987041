use nalgebra::{Unit, Vector3};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How the radial attenuation coefficients combine with distance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadialFalloff {
    /// `a2·d + a1·d + a0`: both the quadratic and the linear coefficient scale the plain
    /// distance. This is the behavior existing scene files were tuned against.
    Linear,
    /// `a2·d² + a1·d + a0`
    Quadratic,
}

impl Default for RadialFalloff {
    fn default() -> Self {
        RadialFalloff::Linear
    }
}

impl FromStr for RadialFalloff {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(RadialFalloff::Linear),
            "quadratic" => Ok(RadialFalloff::Quadratic),
            _ => Err(format!("unknown radial falloff \"{}\"", s)),
        }
    }
}

impl fmt::Display for RadialFalloff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadialFalloff::Linear => write!(f, "linear"),
            RadialFalloff::Quadratic => write!(f, "quadratic"),
        }
    }
}

/// Radial attenuation `1 / denominator`, or `None` when the denominator is zero.
pub fn frad(a2: f64, a1: f64, a0: f64, distance: f64, falloff: RadialFalloff) -> Option<f64> {
    let denominator = match falloff {
        RadialFalloff::Linear => a2 * distance + a1 * distance + a0,
        RadialFalloff::Quadratic => a2 * distance * distance + a1 * distance + a0,
    };

    if denominator == 0.0 {
        None
    } else {
        Some(1.0 / denominator)
    }
}

/// Angular attenuation of a spotlight with half-angle `theta` (in degrees).
///
/// `light_direction` is the spotlight's aim and `to_point` the direction from the light
/// to the lit point.
pub fn fang(
    theta: f64,
    light_direction: &Unit<Vector3<f64>>,
    to_point: &Unit<Vector3<f64>>,
    angular_a0: f64,
) -> f64 {
    let cos_theta = theta.to_radians().cos();
    let cos_alpha = light_direction.dot(to_point);
    if cos_alpha < cos_theta {
        return 0.0;
    }

    // Cones wider than a hemisphere admit negative cosines
    cos_alpha.max(0.0).powf(angular_a0)
}
