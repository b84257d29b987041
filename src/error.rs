use std::io;
use std::path::PathBuf;

/// Problems with a scene description, found while reading or validating it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SceneError {
    #[error("could not read scene file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed scene description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("scene contains no records")]
    Empty,

    #[error("the camera must be the first record in the scene, found a {found} instead")]
    CameraNotFirst { found: &'static str },

    #[error("record {index} is a second camera; a scene has exactly one")]
    DuplicateCamera { index: usize },

    #[error("camera view plane must have a positive width and height, got {width}x{height}")]
    InvalidCamera { width: f64, height: f64 },

    #[error("{kind} at record {index} has invalid radius {radius}")]
    InvalidRadius {
        index: usize,
        kind: &'static str,
        radius: f64,
    },

    #[error("plane at record {index} has a zero-length normal")]
    DegenerateNormal { index: usize },

    #[error("light at record {index} has all radial attenuation coefficients set to zero")]
    ZeroAttenuation { index: usize },

    #[error("scene contains no lights")]
    NoLights,
}

/// Failures while tracing a validated scene or writing out the result.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("radial attenuation of light at record {light} divides by zero at distance {distance}")]
    ZeroAttenuation { light: usize, distance: f64 },

    #[error("light at record {light} coincides with a visible surface point")]
    DegenerateShadowRay { light: usize },

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("could not write image to {path}")]
    Output {
        path: PathBuf,
        #[source]
        source: OutputError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("raster holds {actual} pixels but {width}x{height} were declared")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
}
