use super::raytracing_scene::RaytracingScene;
use super::{Camera, RenderOptions};
use crate::error::{RenderError, SceneError};
use crate::lights::Light;
use crate::primitives::{Cylinder, Plane, Sphere, Surface};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One entry of a scene description, tagged by its `"type"` key.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneRecord {
    Camera(Camera),
    Sphere(Sphere),
    Cylinder(Cylinder),
    Plane(Plane),
    Light(Light),
}

impl SceneRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            SceneRecord::Camera(_) => "camera",
            SceneRecord::Sphere(_) => "sphere",
            SceneRecord::Cylinder(_) => "cylinder",
            SceneRecord::Plane(_) => "plane",
            SceneRecord::Light(_) => "light",
        }
    }
}

fn check_radius(index: usize, kind: &'static str, radius: f64) -> Result<(), SceneError> {
    if radius > 0.0 && radius.is_finite() {
        Ok(())
    } else {
        Err(SceneError::InvalidRadius {
            index,
            kind,
            radius,
        })
    }
}

/// A validated scene: exactly one camera, at least one light, and well-formed surfaces.
#[derive(Debug)]
pub struct Scene {
    camera: Camera,
    surfaces: Vec<Surface>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let file = File::open(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<SceneRecord> = serde_json::from_reader(BufReader::new(file))?;

        Self::from_records(records)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        let records: Vec<SceneRecord> = serde_json::from_str(json)?;

        Self::from_records(records)
    }

    pub fn from_records(records: Vec<SceneRecord>) -> Result<Self, SceneError> {
        let mut records = records.into_iter().enumerate();

        let camera = match records.next() {
            None => return Err(SceneError::Empty),
            Some((_, SceneRecord::Camera(camera))) => camera,
            Some((_, record)) => {
                return Err(SceneError::CameraNotFirst {
                    found: record.kind(),
                })
            }
        };
        camera.validate()?;

        let mut surfaces = Vec::new();
        let mut lights = Vec::new();
        for (index, record) in records {
            let mut surface: Surface = match record {
                SceneRecord::Camera(_) => return Err(SceneError::DuplicateCamera { index }),
                SceneRecord::Light(mut light) => {
                    if !light.has_radial_attenuation() {
                        return Err(SceneError::ZeroAttenuation { index });
                    }
                    light.record = index;
                    lights.push(light);
                    continue;
                }
                SceneRecord::Sphere(sphere) => {
                    check_radius(index, "sphere", sphere.get_radius())?;
                    sphere.into()
                }
                SceneRecord::Cylinder(cylinder) => {
                    check_radius(index, "cylinder", cylinder.get_radius())?;
                    cylinder.into()
                }
                SceneRecord::Plane(plane) => {
                    if !plane.has_normal() {
                        return Err(SceneError::DegenerateNormal { index });
                    }
                    plane.into()
                }
            };
            surface.set_record(index);
            surfaces.push(surface);
        }

        if lights.is_empty() {
            return Err(SceneError::NoLights);
        }

        log::debug!(
            "scene has {} surfaces and {} lights",
            surfaces.len(),
            lights.len()
        );

        Ok(Self {
            camera,
            surfaces,
            lights,
        })
    }

    pub fn get_camera(&self) -> &Camera {
        &self.camera
    }

    pub fn get_surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn get_lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn build_raytracing_scene(
        self,
        render_options: RenderOptions,
    ) -> Result<RaytracingScene, RenderError> {
        RaytracingScene::new(render_options, self.camera, self.surfaces, self.lights)
    }
}
