#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::too_many_lines,
    clippy::wildcard_imports
)]

mod core;
mod error;
mod lights;
mod primitives;
mod ray_intersection;
mod render;
mod utils;

pub use crate::core::PhongMaterial;
pub use crate::error::{OutputError, RenderError, SceneError};
pub use crate::lights::{fang, frad, Light, RadialFalloff};
pub use crate::primitives::{Cylinder, Plane, Sphere, Surface};
pub use crate::ray_intersection::{Intersectable, Ray, RayType};
pub use crate::render::{
    write_image, Camera, RaytracingScene, RenderOptions, Scene, SceneRecord, ShadowDistance,
    ShadowMode,
};
