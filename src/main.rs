use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tessera::gfx::rendering::{FrameUniforms, GpuContext};
use tessera::gfx::scene::Command;
use tessera::{Flow, ViewerApp, ViewerConfig};

/// Loads a model, applies a list of viewer commands and reports the frame
#[derive(Parser, Debug)]
#[command(name = "tessera", version)]
struct CliArgs {
    /// Model directory; `<dir>/<dir name>.obj` is loaded
    model_dir: PathBuf,
    /// Keep the model in file coordinates
    #[arg(long)]
    no_normalize: bool,
    /// Skybox texture
    #[arg(long, value_name = "PNG")]
    skybox: Option<PathBuf>,
    /// Directory with the WGSL shaders
    #[arg(long, value_name = "DIR")]
    shaders: Option<PathBuf>,
    /// Create a GPU device and upload buffers
    #[arg(long)]
    gpu: bool,
    /// Command to apply, e.g. "move point left 0.2"; may be repeated
    #[arg(short = 'c', long = "command", value_name = "CMD")]
    commands: Vec<String>,
    /// Output debug info
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    run(args)
}

fn run(args: CliArgs) -> Result<()> {
    let commands = args
        .commands
        .iter()
        .map(|text| {
            text.parse::<Command>()
                .with_context(|| format!("Invalid command `{}`", text))
        })
        .collect::<Result<Vec<_>>>()?;

    let config = ViewerConfig {
        normalize: !args.no_normalize,
        shader_dir: args.shaders,
        ..ViewerConfig::default()
    };

    let gpu = if args.gpu {
        Some(GpuContext::new_headless_blocking().context("Failed to create GPU context")?)
    } else {
        None
    };

    let mut app = ViewerApp::new(config, gpu);
    app.load_model(&args.model_dir)
        .with_context(|| format!("Failed to load model {}", args.model_dir.display()))?;
    if let Some(skybox) = &args.skybox {
        app.load_skybox(skybox)
            .with_context(|| format!("Failed to load skybox {}", skybox.display()))?;
    }

    for command in commands {
        match app.dispatch(command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => {
                log::info!("Quit");
                return Ok(());
            }
            Err(err) => log::error!("`{}` failed: {}", command, err),
        }
    }

    if let Some(frame) = app.frame() {
        report(&app, &frame);
    }
    app.release_resources();
    Ok(())
}

fn report(app: &ViewerApp, frame: &FrameUniforms) {
    let phong = &frame.phong;
    println!("lighting mode:     {}", app.lighting_mode().name());
    println!("polygon mode:      {:?}", app.polygon_mode());
    println!("directional light: {:?}", phong.dir_light_direction);
    println!("point light:       {:?}", phong.point_light_position);
    println!("spot light:        {:?}", phong.spot_light_position);
    for draw in &frame.submeshes {
        println!(
            "submesh {:>3}: {:>6} indices, kd {:?}, textured: {}",
            draw.submesh,
            draw.index_count,
            draw.material.kd,
            draw.texture_unit.is_some()
        );
    }
    if let Some(skybox) = &frame.skybox {
        println!("skybox world:      {:?}", skybox.world);
    }
}
