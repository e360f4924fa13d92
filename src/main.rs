use clap::{Parser, Subcommand};
use hyperfocal::config::{self, ShootConfig};
use hyperfocal::optics::{CameraInput, LensInput};
use hyperfocal::output::{self, DofSummary};
use hyperfocal::plan::ShootReport;
use hyperfocal::recommend::{self, SceneInput};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "hyperfocal")]
#[command(about = "Depth of field, flash range and exposure mode calculator")]
#[command(long_about = "\
Depth of field, flash range and exposure mode calculator

Computes the hyperfocal distance, the near and far limits of acceptable
sharpness and the total depth of field for a camera, lens and subject.

Circle of confusion (first available wins):
  --sensor Canon_APS-C | Nikon_APS-C   fixed CoC of 0.018 / 0.019 mm
  --coc <mm>                           explicit value
  --viewing-distance --resolution --enlargement
                                       derived from print viewing conditions

Shoot files describe a whole shoot (camera, lens, distance, flash, scene).
Run 'hyperfocal gen-config' to print a documented example.")]
#[command(version = version_string())]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Camera, lens and distance flags. Each overrides the matching shoot file key.
#[derive(clap::Args, Clone)]
struct DofArgs {
    /// Shoot file to start from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sensor type with a known CoC (Canon_APS-C, Nikon_APS-C)
    #[arg(long)]
    sensor: Option<String>,

    /// Circle of confusion in mm
    #[arg(long)]
    coc: Option<f64>,

    /// Print viewing distance in meters
    #[arg(long)]
    viewing_distance: Option<f64>,

    /// Desired print resolution in lp/mm at 25 cm
    #[arg(long)]
    resolution: Option<f64>,

    /// Enlargement from sensor to print
    #[arg(long)]
    enlargement: Option<f64>,

    /// Focal length in mm
    #[arg(long)]
    focal_length: Option<f64>,

    /// Aperture as an f-number, e.g. 2.8
    #[arg(long)]
    aperture: Option<f64>,

    /// Subject distance in meters
    #[arg(long)]
    distance: Option<f64>,
}

impl DofArgs {
    /// Sparse shoot config holding only the flags that were given.
    fn overlay(&self) -> ShootConfig {
        let camera = CameraInput {
            sensor_type: self.sensor.clone(),
            coc: self.coc,
            viewing_distance: self.viewing_distance,
            resolution: self.resolution,
            enlargement: self.enlargement,
        };
        let lens = LensInput {
            focal_length: self.focal_length,
            aperture: self.aperture,
        };
        ShootConfig {
            distance: self.distance,
            camera: (camera != CameraInput::default()).then_some(camera),
            lens: (lens != LensInput::default()).then_some(lens),
            ..ShootConfig::default()
        }
    }
}

/// Scene flags for the exposure recommendation.
#[derive(clap::Args, Clone)]
struct SceneArgs {
    /// portrait, subject_focus, landscape, group, panning
    #[arg(long, alias = "type-wanted")]
    subject: Option<String>,

    /// objects_in_high_speed, objects_in_medium_speed, objects_in_low_speed, no_movement_level
    #[arg(long)]
    movement: Option<String>,

    /// daylight_outside, dark_outside, flash_outside, flash_inside, no_flash_inside
    #[arg(long)]
    light: Option<String>,

    /// max, mid, min
    #[arg(long)]
    bokeh: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Compute depth of field from flags and/or a shoot file
    Dof(DofArgs),
    /// Flash working distance for a guide number and aperture
    Flash {
        /// Flash guide number
        #[arg(long)]
        guide_number: f64,
        /// Aperture as an f-number
        #[arg(long)]
        aperture: f64,
    },
    /// Recommend an exposure mode and setting for a scene
    Recommend(SceneArgs),
    /// Evaluate a shoot file: depth of field, flash and exposure
    Plan {
        /// Shoot file (TOML)
        file: PathBuf,
    },
    /// Run the built-in demonstration shoot
    Demo,
    /// Print a documented shoot file
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Dof(args) => {
            let base = match &args.config {
                Some(path) => config::load_raw_config(path)?,
                None => config::empty_value(),
            };
            let shoot = config::resolve_config(base, Some(args.overlay().to_value()?))?;
            let dof = shoot.depth_of_field()?;
            if cli.json {
                let json = serde_json::json!({
                    "depth_of_field": dof,
                    "summary": DofSummary::from(&dof),
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                output::print_lines(&output::format_dof(&dof));
            }
        }
        Command::Flash {
            guide_number,
            aperture,
        } => {
            let distance = match recommend::distance_with_flash(*guide_number, *aperture) {
                Ok(distance) => distance,
                Err(e) => {
                    eprintln!("error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            };
            if cli.json {
                let json = serde_json::json!({
                    "guide_number": guide_number,
                    "aperture": aperture,
                    "distance": distance,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                println!(
                    "{}",
                    output::format_flash(*guide_number, *aperture, &Ok(distance))
                );
            }
        }
        Command::Recommend(args) => {
            let scene = SceneInput {
                type_wanted: args.subject.clone(),
                movement_level: args.movement.clone(),
                light: args.light.clone(),
                bokeh_level: args.bokeh.clone(),
            };
            let rec = scene.recommend();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rec)?);
            } else {
                println!("{}", output::format_recommendation(&rec));
            }
        }
        Command::Plan { file } => {
            let shoot = config::load_config(file)?;
            print_report(&ShootReport::evaluate(&shoot)?, cli.json)?;
        }
        Command::Demo => {
            let shoot = config::demo_config()?;
            print_report(&ShootReport::evaluate(&shoot)?, cli.json)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &ShootReport, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        output::print_report(report);
    }
    Ok(())
}
