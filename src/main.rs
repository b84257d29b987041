#![deny(clippy::all)]

use anyhow::{anyhow, Context};
use clap::{App, Arg, ArgMatches};
use phongcast::{write_image, RadialFalloff, RenderOptions, Scene, ShadowDistance, ShadowMode};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

fn parse_arg<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>, anyhow::Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    matches
        .value_of(name)
        .map(|value| {
            value
                .parse()
                .map_err(|e| anyhow!("invalid value \"{}\" for {}: {}", value, name, e))
        })
        .transpose()
}

fn load_render_options(matches: &ArgMatches) -> Result<RenderOptions, anyhow::Error> {
    let mut render_options = match matches.value_of("options") {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("could not open render options {}", path))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("malformed render options in {}", path))?
        }
        None => RenderOptions::default(),
    };

    if let Some(width) = parse_arg(matches, "width")? {
        render_options.width = width;
    }
    if let Some(height) = parse_arg(matches, "height")? {
        render_options.height = height;
    }
    if let Some(shadow_mode) = parse_arg::<ShadowMode>(matches, "shadows")? {
        render_options.shadow_mode = shadow_mode;
    }
    if let Some(shadow_distance) = parse_arg::<ShadowDistance>(matches, "shadow-distance")? {
        render_options.shadow_distance = shadow_distance;
    }
    if let Some(radial_falloff) = parse_arg::<RadialFalloff>(matches, "falloff")? {
        render_options.radial_falloff = radial_falloff;
    }
    if let Some(shininess) = parse_arg(matches, "shininess")? {
        render_options.shininess = shininess;
    }

    Ok(render_options)
}

fn main() -> Result<(), anyhow::Error> {
    let matches = App::new("phongcast")
        .about("Renders sphere, cylinder and plane scenes with Phong shading")
        .arg(
            Arg::with_name("width")
                .index(1)
                .required(true)
                .help("image width in pixels"),
        )
        .arg(
            Arg::with_name("height")
                .index(2)
                .required(true)
                .help("image height in pixels"),
        )
        .arg(
            Arg::with_name("scene")
                .index(3)
                .required(true)
                .help("input scene as a json file"),
        )
        .arg(
            Arg::with_name("output")
                .index(4)
                .required(true)
                .help(
                    "Output image file\n\
                     .png and .jpg are encoded accordingly, anything else is written as PPM",
                ),
        )
        .arg(
            Arg::with_name("noprogress")
                .long("no-progress")
                .help("Hide progress bar"),
        )
        .arg(
            Arg::with_name("threads")
                .short("t")
                .long("threads")
                .takes_value(true)
                .help("Number of worker threads, defaults to one per core"),
        )
        .arg(
            Arg::with_name("shadows")
                .long("shadows")
                .takes_value(true)
                .possible_values(&["dim", "exclude"])
                .help("What a blocked light does to a pixel"),
        )
        .arg(
            Arg::with_name("shadow-distance")
                .long("shadow-distance")
                .takes_value(true)
                .possible_values(&["parametric", "euclidean"])
                .help("How occluders are measured against the distance to a light"),
        )
        .arg(
            Arg::with_name("falloff")
                .long("falloff")
                .takes_value(true)
                .possible_values(&["linear", "quadratic"])
                .help("How radial attenuation grows with distance"),
        )
        .arg(
            Arg::with_name("shininess")
                .long("shininess")
                .takes_value(true)
                .help("Specular exponent"),
        )
        .arg(
            Arg::with_name("options")
                .long("options")
                .takes_value(true)
                .help("Render options as a json file, overridden by other flags"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log scene details"),
        )
        .get_matches();

    use simplelog::LevelFilter::{Debug, Info, Off};
    simplelog::TermLogger::init(
        if matches.is_present("verbose") { Debug } else { Info },
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let render_options = load_render_options(&matches)?;
    let use_progress = !matches.is_present("noprogress");

    if let Some(threads) = parse_arg::<usize>(&matches, "threads")? {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("could not configure worker threads")?;
    }

    let scene_path = Path::new(matches.value_of("scene").unwrap_or_default());
    let output_path = Path::new(matches.value_of("output").unwrap_or_default());

    let now = Instant::now();
    let scene = Scene::load(scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?;
    log::info!(
        "Took {:?} to load {} surfaces and {} lights.",
        now.elapsed(),
        scene.get_surfaces().len(),
        scene.get_lights().len()
    );

    let (width, height) = (render_options.width, render_options.height);
    let scene = scene.build_raytracing_scene(render_options)?;
    let (raster, duration, ray_count) = scene.raytrace_to_raster(use_progress)?;
    log::info!(
        "Rendered {}x{} in {:.3?} ({} rays)",
        width,
        height,
        duration,
        ray_count
    );

    write_image(output_path, width, height, &raster)?;
    log::info!("Output written to {}", output_path.display());

    Ok(())
}
