mod output;
mod raytracing_scene;
mod scene;

use crate::error::SceneError;
use crate::lights::RadialFalloff;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub use output::write_image;
pub use raytracing_scene::RaytracingScene;
pub use scene::{Scene, SceneRecord};

/// Distance from the eye to the view plane along +z.
const VIEW_PLANE_DISTANCE: f64 = 1.0;
/// Factor applied to the accumulated color when a light is blocked in [`ShadowMode::Dim`].
const SHADOW_DIMMING: f64 = 0.2;
const DEFAULT_SHININESS: f64 = 7.0;

/// Pinhole camera at the origin looking down +z. `width` and `height` are the extent of
/// the view plane one unit in front of the eye.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Camera {
    pub width: f64,
    pub height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Camera {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn validate(&self) -> Result<(), SceneError> {
        let valid = |extent: f64| extent > 0.0 && extent.is_finite();
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(SceneError::InvalidCamera {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// What a blocked light does to the pixel being shaded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowMode {
    /// Scale everything accumulated so far down to a fifth.
    Dim,
    /// Skip the blocked light's contribution and leave the rest untouched.
    Exclude,
}

impl Default for ShadowMode {
    fn default() -> Self {
        ShadowMode::Dim
    }
}

impl FromStr for ShadowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dim" => Ok(ShadowMode::Dim),
            "exclude" => Ok(ShadowMode::Exclude),
            _ => Err(format!("unknown shadow mode \"{}\"", s)),
        }
    }
}

impl fmt::Display for ShadowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadowMode::Dim => write!(f, "dim"),
            ShadowMode::Exclude => write!(f, "exclude"),
        }
    }
}

/// How far along a shadow ray an occluder is measured before comparing it with the
/// distance to the light.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowDistance {
    /// The raw parameter along the unnormalized shadow ray. Occluders somewhat past the
    /// light still cast shadows; existing scene files were tuned against this.
    Parametric,
    /// The parameter scaled by the shadow ray's length, so only occluders between the
    /// surface and the light count.
    Euclidean,
}

impl Default for ShadowDistance {
    fn default() -> Self {
        ShadowDistance::Parametric
    }
}

impl FromStr for ShadowDistance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parametric" => Ok(ShadowDistance::Parametric),
            "euclidean" => Ok(ShadowDistance::Euclidean),
            _ => Err(format!("unknown shadow distance \"{}\"", s)),
        }
    }
}

impl fmt::Display for ShadowDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadowDistance::Parametric => write!(f, "parametric"),
            ShadowDistance::Euclidean => write!(f, "euclidean"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub shadow_mode: ShadowMode,
    pub shadow_distance: ShadowDistance,
    pub radial_falloff: RadialFalloff,
    pub shininess: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            shadow_mode: ShadowMode::default(),
            shadow_distance: ShadowDistance::default(),
            radial_falloff: RadialFalloff::default(),
            shininess: DEFAULT_SHININESS,
        }
    }
}
