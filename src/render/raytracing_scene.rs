use super::{
    Camera, RenderOptions, ShadowDistance, ShadowMode, SHADOW_DIMMING, VIEW_PLANE_DISTANCE,
};
use crate::error::RenderError;
use crate::lights::Light;
use crate::primitives::Surface;
use crate::ray_intersection::{Intersectable, Intersection, Ray, RayType};
use crate::utils;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use nalgebra::{clamp, Point3, Unit, Vector3};
use num_traits::identities::Zero;
use rayon::prelude::*;
use std::cmp::Ordering::Equal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RaytracingScene {
    pub render_options: RenderOptions,
    camera: Camera,
    surfaces: Vec<Surface>,
    lights: Vec<Light>,
}

impl RaytracingScene {
    pub fn new(
        render_options: RenderOptions,
        camera: Camera,
        surfaces: Vec<Surface>,
        lights: Vec<Light>,
    ) -> Result<Self, RenderError> {
        if render_options.width == 0 || render_options.height == 0 {
            return Err(RenderError::InvalidImageSize {
                width: render_options.width,
                height: render_options.height,
            });
        }

        Ok(Self {
            render_options,
            camera,
            surfaces,
            lights,
        })
    }

    pub fn get_width(&self) -> u32 {
        self.render_options.width
    }

    pub fn get_height(&self) -> u32 {
        self.render_options.height
    }

    pub fn get_num_objects(&self) -> usize {
        self.surfaces.len()
    }

    /// Nearest surface hit by `ray`, never considering the surface at index `skip`.
    fn raycast(&self, ray: &Ray, skip: Option<usize>) -> Option<Intersection<'_>> {
        self.surfaces
            .iter()
            .enumerate()
            .filter(|&(index, _)| Some(index) != skip)
            .filter_map(|(index, surface)| {
                surface
                    .intersect(ray)
                    .map(|distance| Intersection::new(surface, index, distance))
            })
            .min_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Equal))
    }

    /// Whether anything other than the surface at `skip` lies less than `max_distance`
    /// along the ray, measured as configured by [`ShadowDistance`]. The ray direction
    /// need not be normalized.
    fn shadow_cast(&self, ray: &Ray, max_distance: f64, skip: usize) -> bool {
        let scale = match self.render_options.shadow_distance {
            ShadowDistance::Parametric => 1.0,
            ShadowDistance::Euclidean => ray.direction.magnitude(),
        };
        self.raycast(ray, Some(skip))
            .map_or(false, |occluder| occluder.distance * scale < max_distance)
    }

    fn get_color_phong(
        &self,
        ray: &Ray,
        intersection: &Intersection,
    ) -> Result<(Vector3<f64>, u64), RenderError> {
        let mut ray_count = 0;
        let hit_point = intersection.hit_point(ray);

        let surface = intersection.surface;
        let normal = surface.surface_normal(&hit_point);
        let material = surface.get_material();
        let view_dir = Unit::new_normalize(-ray.direction);
        let options = &self.render_options;

        let mut color = Vector3::zero();
        for light in &self.lights {
            let light_dir = light.get_position() - hit_point;
            let light_distance = light_dir.magnitude();
            if light_distance == 0.0 {
                return Err(RenderError::DegenerateShadowRay {
                    light: light.get_record(),
                });
            }

            let shadow_ray = Ray::new(RayType::Shadow, hit_point, light_dir);
            ray_count += 1;
            if self.shadow_cast(&shadow_ray, light_distance, intersection.index) {
                if options.shadow_mode == ShadowMode::Dim {
                    color *= SHADOW_DIMMING;
                }
                continue;
            }

            let light_dir = Unit::new_normalize(light_dir);
            let attenuation = light.attenuation(&hit_point, light_distance, options.radial_falloff)?;
            let light_color = light.get_color();
            color += attenuation
                * material.shade(&normal, &light_dir, &view_dir, &light_color, options.shininess);
        }

        Ok((color, ray_count))
    }

    fn get_color(&self, ray: &Ray) -> Result<(Vector3<f64>, u64), RenderError> {
        if let Some(intersection) = self.raycast(ray, None) {
            let (color, ray_count) = self.get_color_phong(ray, &intersection)?;
            Ok((color.map(|c| clamp(c, 0.0, 1.0)), ray_count + 1))
        } else {
            Ok((Vector3::zero(), 1))
        }
    }

    fn build_camera_ray(&self, x: u32, y: u32) -> Ray {
        assert!(x < self.get_width() && y < self.get_height());

        let (x, y) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
        let (width, height) = (f64::from(self.get_width()), f64::from(self.get_height()));
        let (half_width, half_height) = (self.camera.width / 2.0, self.camera.height / 2.0);

        // Row 0 is the top of the view plane
        let direction = Vector3::new(
            utils::remap_value(x, (0.0, width), (-half_width, half_width)),
            utils::remap_value(y, (0.0, height), (half_height, -half_height)),
            VIEW_PLANE_DISTANCE,
        );

        Ray::new(RayType::Primary, Point3::origin(), direction.normalize())
    }

    /// Color of the pixel in column `x` and row `y`, with each channel in [0, 1], and the
    /// number of rays cast to find it.
    pub fn screen_raycast(&self, x: u32, y: u32) -> Result<(Vector3<f64>, u64), RenderError> {
        let ray = self.build_camera_ray(x, y);
        self.get_color(&ray)
    }

    fn build_progress_bar(&self) -> ProgressBar {
        let width = self.get_width();
        let height = self.get_height();

        let progress = ProgressBar::new(u64::from(width) * u64::from(height));
        progress.set_draw_delta((u64::from(width) * u64::from(height) / 200).max(1));
        progress.set_style(
            ProgressStyle::default_bar().template(
                format!(
                    "{} {} {}",
                    "[{elapsed_precise} elapsed] [{eta_precise} left]",
                    "{bar:40}",
                    "{pos}/{len} pixels, {msg} rays",
                )
                .as_str(),
            ),
        );

        progress
    }

    /// Traces every pixel, top row first, returning the row-major raster, the time spent
    /// and the total number of rays cast.
    pub fn raytrace_to_raster(
        &self,
        use_progress: bool,
    ) -> Result<(Vec<[u8; 3]>, Duration, u64), RenderError> {
        let width = self.get_width() as usize;
        let height = self.get_height() as usize;
        let total_ray_count = AtomicU64::new(0);

        let process_pixel = |index: usize| -> Result<[u8; 3], RenderError> {
            let (color, ray_count) =
                self.screen_raycast((index % width) as u32, (index / width) as u32)?;
            total_ray_count.fetch_add(ray_count, Ordering::Relaxed);
            Ok(utils::to_rgb_u8(color))
        };

        let start = Instant::now();
        let raster: Result<Vec<[u8; 3]>, RenderError> = if use_progress {
            let progress = self.build_progress_bar();

            let raster = (0..width * height)
                .into_par_iter()
                .progress_with(progress.clone())
                .inspect(|_| {
                    progress.set_message(total_ray_count.load(Ordering::Relaxed).to_string())
                })
                .map(process_pixel)
                .collect();

            progress.finish_with_message(total_ray_count.load(Ordering::Relaxed).to_string());
            raster
        } else {
            (0..width * height)
                .into_par_iter()
                .map(process_pixel)
                .collect()
        };
        let raster = raster?;
        let duration = start.elapsed();

        log::debug!(
            "traced {} pixels against {} surfaces",
            raster.len(),
            self.get_num_objects()
        );

        Ok((raster, duration, total_ray_count.load(Ordering::Relaxed)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::PhongMaterial;
    use crate::lights::RadialFalloff;
    use crate::primitives::{Cylinder, Plane, Sphere};
    use crate::render::{Scene, SceneRecord};
    use more_asserts::{assert_gt, assert_lt};
    use serde_json::json;

    fn white() -> PhongMaterial {
        PhongMaterial::new(Vector3::repeat(1.0), Vector3::repeat(1.0))
    }

    fn diffuse_white() -> PhongMaterial {
        PhongMaterial::new(Vector3::repeat(1.0), Vector3::zero())
    }

    fn build(records: Vec<SceneRecord>, render_options: RenderOptions) -> RaytracingScene {
        Scene::from_records(records)
            .expect("failed to build scene")
            .build_raytracing_scene(render_options)
            .expect("failed to build raytracing scene")
    }

    fn options(width: u32, height: u32) -> RenderOptions {
        RenderOptions {
            width,
            height,
            ..RenderOptions::default()
        }
    }

    fn sphere_scene(render_options: RenderOptions) -> RaytracingScene {
        build(
            vec![
                SceneRecord::Camera(Camera::new(2.0, 2.0)),
                SceneRecord::Sphere(Sphere::new(Point3::new(0.0, 0.0, 5.0), 1.0, white())),
                SceneRecord::Light(Light::new(
                    Point3::new(0.0, 10.0, 0.0),
                    Vector3::repeat(1.0),
                    [1.0, 0.0, 0.0],
                )),
            ],
            render_options,
        )
    }

    /// A white floor at y = -1 lit from straight above, seen through a single pixel
    /// looking straight ahead and slightly down.
    fn floor_records(light_height: f64) -> Vec<SceneRecord> {
        vec![
            SceneRecord::Camera(Camera::new(0.01, 0.01)),
            SceneRecord::Plane(Plane::new(
                Point3::new(0.0, -1.0, 0.0),
                Vector3::y(),
                diffuse_white(),
            )),
            SceneRecord::Light(Light::new(
                Point3::new(0.0, light_height, 10.0),
                Vector3::repeat(1.0),
                [0.0, 0.0, 1.0],
            )),
        ]
    }

    fn floor_camera_ray() -> Ray {
        Ray::new(
            RayType::Primary,
            Point3::origin(),
            Vector3::new(0.0, -0.1, 1.0).normalize(),
        )
    }

    #[test]
    fn it_rejects_empty_images() {
        let scene = Scene::from_records(vec![
            SceneRecord::Camera(Camera::new(1.0, 1.0)),
            SceneRecord::Light(Light::new(Point3::origin(), Vector3::zero(), [1.0, 0.0, 0.0])),
        ])
        .unwrap();
        assert!(matches!(
            scene.build_raytracing_scene(options(0, 10)),
            Err(RenderError::InvalidImageSize { .. })
        ));
    }

    #[test]
    fn it_casts_rays_through_pixel_centers() {
        let scene = sphere_scene(options(10, 10));

        let ray = scene.build_camera_ray(0, 0);
        let expected = Vector3::new(-0.9, 0.9, 1.0).normalize();
        assert!((ray.direction - expected).magnitude() < 1e-12);
        assert_eq!(ray.origin, Point3::origin());

        let ray = scene.build_camera_ray(9, 9);
        let expected = Vector3::new(0.9, -0.9, 1.0).normalize();
        assert!((ray.direction - expected).magnitude() < 1e-12);
    }

    #[test]
    fn it_hits_a_sphere_ahead_at_axis_distance_minus_radius() {
        let scene = sphere_scene(options(1, 1));
        let ray = scene.build_camera_ray(0, 0);
        assert_eq!(ray.direction, Vector3::z());

        let intersection = scene.raycast(&ray, None).expect("sphere was missed");
        assert!((intersection.distance - 4.0).abs() < 1e-12);
        assert_eq!(intersection.index, 0);
    }

    #[test]
    fn it_picks_the_nearest_surface() {
        let scene = build(
            vec![
                SceneRecord::Camera(Camera::new(1.0, 1.0)),
                SceneRecord::Sphere(Sphere::new(Point3::new(0.0, 0.0, 10.0), 1.0, white())),
                SceneRecord::Light(Light::new(Point3::origin(), Vector3::zero(), [1.0, 0.0, 0.0])),
                SceneRecord::Cylinder(Cylinder::new(Point3::new(0.0, 0.0, 5.0), 1.0, white())),
                SceneRecord::Plane(Plane::new(Point3::new(0.0, 0.0, 20.0), Vector3::z(), white())),
            ],
            options(1, 1),
        );

        let ray = scene.build_camera_ray(0, 0);
        let intersection = scene.raycast(&ray, None).expect("nothing was hit");
        assert_eq!(intersection.surface.kind(), "cylinder");
        assert!((intersection.distance - 4.0).abs() < 1e-12);

        let behind_cylinder = scene.raycast(&ray, Some(intersection.index)).unwrap();
        assert_eq!(behind_cylinder.surface.kind(), "sphere");
    }

    #[test]
    fn it_renders_black_where_nothing_is_hit() {
        let scene = sphere_scene(options(10, 10));
        let ray = Ray::new(RayType::Primary, Point3::origin(), -Vector3::z());
        let (color, ray_count) = scene.get_color(&ray).unwrap();
        assert_eq!(color, Vector3::zero());
        assert_eq!(ray_count, 1);
    }

    #[test]
    fn it_renders_a_lit_sphere_with_black_corners() {
        let scene = sphere_scene(options(10, 10));
        let (raster, _, ray_count) = scene.raytrace_to_raster(false).unwrap();
        assert_eq!(raster.len(), 100);

        for &(x, y) in &[(0, 0), (9, 0), (0, 9), (9, 9)] {
            assert_eq!(raster[y * 10 + x], [0, 0, 0], "corner ({}, {}) was lit", x, y);
        }
        // the upper half of the sphere faces the light
        for &(x, y) in &[(4, 4), (5, 4)] {
            assert_ne!(raster[y * 10 + x], [0, 0, 0], "center ({}, {}) was dark", x, y);
        }

        // one primary ray per pixel plus a shadow ray for each pixel on the sphere
        assert_gt!(ray_count, 100);
        assert_lt!(ray_count, 200);
    }

    #[test]
    fn it_lights_the_top_of_the_sphere_more_than_the_bottom() {
        let scene = sphere_scene(options(10, 10));
        let (top, _) = scene.screen_raycast(4, 4).unwrap();
        let (bottom, _) = scene.screen_raycast(4, 5).unwrap();
        assert_gt!(top.x, bottom.x);
    }

    #[test]
    fn it_scales_diffuse_light_by_the_incidence_angle() {
        let scene = build(floor_records(9.0), options(1, 1));
        let ray = floor_camera_ray();
        let intersection = scene.raycast(&ray, None).unwrap();
        let hit_point = intersection.hit_point(&ray);
        assert!((hit_point - Point3::new(0.0, -1.0, 10.0)).magnitude() < 1e-9);

        // light straight above: N·L = 1 and the view ray never lines up with the mirror
        let (color, _) = scene.get_color(&ray).unwrap();
        assert!((color - Vector3::repeat(0.1)).magnitude() < 1e-9);
    }

    #[test]
    fn it_halves_intensity_when_light_distance_doubles() {
        let near = build(floor_records(1.0), options(1, 1));
        let far = build(floor_records(3.0), options(1, 1));
        let ray = floor_camera_ray();

        let (near_color, _) = near.get_color(&ray).unwrap();
        let (far_color, _) = far.get_color(&ray).unwrap();
        assert!((near_color.x / far_color.x - 2.0).abs() < 1e-9);
    }

    #[test]
    fn it_squares_distance_with_quadratic_falloff() {
        let near = build(
            floor_records(1.0),
            RenderOptions {
                radial_falloff: RadialFalloff::Quadratic,
                ..options(1, 1)
            },
        );
        let far = build(
            floor_records(3.0),
            RenderOptions {
                radial_falloff: RadialFalloff::Quadratic,
                ..options(1, 1)
            },
        );
        let ray = floor_camera_ray();

        let (near_color, _) = near.get_color(&ray).unwrap();
        let (far_color, _) = far.get_color(&ray).unwrap();
        assert!((near_color.x / far_color.x - 4.0).abs() < 1e-9);
    }

    #[test]
    fn it_adds_nothing_for_points_outside_a_spotlight_cone() {
        let spotlight = |theta: f64| {
            Light::new(Point3::new(0.0, 9.0, 0.0), Vector3::repeat(1.0), [1.0, 0.0, 0.0])
                .with_spot(Vector3::new(0.0, -1.0, 0.0), theta, 1.0)
        };
        let scene = |light: Light| {
            let mut records = floor_records(9.0);
            records.push(SceneRecord::Light(light));
            build(records, options(1, 1))
        };
        let ray = floor_camera_ray();

        let (without_cone, _) = build(floor_records(9.0), options(1, 1))
            .get_color(&ray)
            .unwrap();
        // the floor point is 10 units along z from a light aimed straight down
        let (narrow, _) = scene(spotlight(30.0)).get_color(&ray).unwrap();
        let (wide, _) = scene(spotlight(60.0)).get_color(&ray).unwrap();

        assert_eq!(narrow, without_cone);
        assert_gt!(wide.x, without_cone.x);
    }

    fn occluded_floor(shadow_mode: ShadowMode, with_occluder: bool) -> RaytracingScene {
        let mut records = vec![
            SceneRecord::Camera(Camera::new(0.01, 0.01)),
            SceneRecord::Plane(Plane::new(
                Point3::new(0.0, -1.0, 0.0),
                Vector3::y(),
                diffuse_white(),
            )),
            SceneRecord::Light(Light::new(
                Point3::new(0.0, 9.0, 10.0),
                Vector3::repeat(1.0),
                [0.0, 0.0, 1.0],
            )),
            SceneRecord::Light(Light::new(
                Point3::new(3.0, 3.0, 10.0),
                Vector3::repeat(1.0),
                [0.0, 0.0, 1.0],
            )),
        ];
        if with_occluder {
            // sits between the floor point and the second light only
            records.push(SceneRecord::Sphere(Sphere::new(
                Point3::new(1.5, 1.0, 10.0),
                0.5,
                white(),
            )));
        }

        build(
            records,
            RenderOptions {
                shadow_mode,
                ..options(1, 1)
            },
        )
    }

    #[test]
    fn it_dims_the_accumulated_color_when_a_light_is_blocked() {
        let ray = floor_camera_ray();
        let (lit, _) = occluded_floor(ShadowMode::Dim, false).get_color(&ray).unwrap();
        let (shadowed, _) = occluded_floor(ShadowMode::Dim, true).get_color(&ray).unwrap();

        // first light contributes 1/10, second 0.8/5; the blocked second light dims the first
        assert!((lit - Vector3::repeat(0.26)).magnitude() < 1e-9);
        assert!((shadowed - Vector3::repeat(0.1 * SHADOW_DIMMING)).magnitude() < 1e-9);
    }

    #[test]
    fn it_excludes_blocked_lights() {
        let ray = floor_camera_ray();
        let (shadowed, _) = occluded_floor(ShadowMode::Exclude, true)
            .get_color(&ray)
            .unwrap();

        assert!((shadowed - Vector3::repeat(0.1)).magnitude() < 1e-9);
    }

    fn occluder_past_the_light(shadow_distance: ShadowDistance) -> RaytracingScene {
        // the light is 5 units above the floor point, the sphere 3 units past it
        let mut records = floor_records(4.0);
        records.push(SceneRecord::Sphere(Sphere::new(
            Point3::new(0.0, 8.0, 10.0),
            1.0,
            white(),
        )));

        build(
            records,
            RenderOptions {
                shadow_distance,
                ..options(1, 1)
            },
        )
    }

    #[test]
    fn it_measures_occluders_along_the_unnormalized_shadow_ray_by_default() {
        // the sphere is hit at t = 1.6 along a shadow ray of length 5, and 1.6 < 5
        let scene = occluder_past_the_light(ShadowDistance::default());
        let (color, _) = scene.get_color(&floor_camera_ray()).unwrap();

        assert_eq!(color, Vector3::zero());
    }

    #[test]
    fn it_ignores_occluders_beyond_the_light_with_euclidean_distance() {
        let scene = occluder_past_the_light(ShadowDistance::Euclidean);
        let (color, _) = scene.get_color(&floor_camera_ray()).unwrap();

        assert!((color - Vector3::repeat(0.2)).magnitude() < 1e-9);
    }

    #[test]
    fn it_shades_the_side_of_a_cylinder_facing_the_light() {
        let scene = build(
            vec![
                SceneRecord::Camera(Camera::new(2.0, 2.0)),
                SceneRecord::Cylinder(Cylinder::new(Point3::new(0.0, 0.0, 5.0), 1.0, white())),
                SceneRecord::Light(Light::new(
                    Point3::new(-10.0, 0.0, 0.0),
                    Vector3::repeat(1.0),
                    [1.0, 0.0, 0.0],
                )),
            ],
            options(10, 10),
        );

        let ray = scene.build_camera_ray(4, 4);
        assert_eq!(scene.raycast(&ray, None).unwrap().surface.kind(), "cylinder");

        let (raster, _, _) = scene.raytrace_to_raster(false).unwrap();
        let (left, right) = (raster[4 * 10 + 4], raster[4 * 10 + 5]);
        assert_ne!(left, [0, 0, 0]);
        // the right of the near wall faces away from a light off to the left
        assert_eq!(right, [0, 0, 0]);
        // the cylinder is unbounded along y, so every row sees it
        assert_ne!(raster[4], [0, 0, 0]);
    }

    #[test]
    fn it_reports_falloff_that_divides_by_zero() {
        // a0 + a1·d vanishes exactly 5 units from the light
        let scene = build(
            vec![
                SceneRecord::Camera(Camera::new(0.01, 0.01)),
                SceneRecord::Sphere(Sphere::new(Point3::new(0.0, 0.0, 5.0), 1.0, white())),
                SceneRecord::Light(Light::new(
                    Point3::new(0.0, 0.0, -1.0),
                    Vector3::repeat(1.0),
                    [-5.0, 1.0, 0.0],
                )),
            ],
            options(1, 1),
        );

        match scene.raytrace_to_raster(false) {
            Err(RenderError::ZeroAttenuation { light, distance }) => {
                assert_eq!(light, 2);
                assert!((distance - 5.0).abs() < 1e-12);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn it_renders_a_scene_json() {
        let scene = Scene::from_json_str(
            &json!([
                { "type": "camera", "width": 2, "height": 2 },
                {
                    "type": "sphere",
                    "radius": 1,
                    "position": [0, 0, 5],
                    "diffuse_color": [1, 0, 0],
                    "specular_color": [0, 0, 0]
                },
                {
                    "type": "light",
                    "color": [1, 1, 1],
                    "radial-a0": 1,
                    "position": [0, 10, 0]
                }
            ])
            .to_string(),
        )
        .unwrap()
        .build_raytracing_scene(options(10, 10))
        .unwrap();

        let (raster, _, _) = scene.raytrace_to_raster(false).unwrap();
        let center = raster[4 * 10 + 4];
        assert_gt!(center[0], 0);
        assert_eq!(center[1], 0);
        assert_eq!(center[2], 0);
    }
}
