#![deny(clippy::all)]

use anyhow::Context;
use phongcast::{write_image, RenderOptions, Scene};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn main() -> Result<(), anyhow::Error> {
    let scenes = ["scenes/simple.json", "scenes/spotlight.json", "scenes/shadows.json"];
    let output_dir = "renders";
    let iterations = 3;

    fs::create_dir_all(output_dir).context("could not create output directory")?;

    for scene in &scenes {
        let scene_path = Path::new(scene);

        let mut output_filename = PathBuf::from(output_dir);
        output_filename.push(scene_path.file_stem().unwrap_or_default());
        output_filename.set_extension("png");

        let render_options = RenderOptions {
            width: 400,
            height: 400,
            ..RenderOptions::default()
        };
        let (width, height) = (render_options.width, render_options.height);
        let scene = Scene::load(scene_path)
            .with_context(|| format!("failed to load scene {}", scene_path.display()))?
            .build_raytracing_scene(render_options)?;

        let mut duration_sum = Duration::new(0, 0);
        let mut ray_count_sum = 0;

        println!("Raytracing {}...", scene_path.display());
        for i in 0..iterations {
            print!("└ Iteration {}: tracing...", i + 1);
            io::stdout().flush()?;

            let (raster, duration, ray_count) = scene.raytrace_to_raster(false)?;
            duration_sum += duration;
            ray_count_sum += ray_count;

            println!(
                "\r│ Iteration {}: rendered in {:.3?} ({} rays)",
                i + 1,
                duration,
                ray_count
            );

            if i == iterations - 1 {
                println!(
                    "│ Avg time: {:.3?} (avg {} rays)",
                    duration_sum / iterations,
                    ray_count_sum / u64::from(iterations)
                );
                write_image(&output_filename, width, height, &raster)?;
                println!("└ Wrote rendered image to {}", output_filename.display());
            }
        }
        println!();
    }

    Ok(())
}
