mod commands;
mod error;


use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use canvas::camera::Point;
use canvas::consts::{CHILD_SCALE, EXIT_ANIMATION_MS, IMAGE_SIZE, ORBIT_SPACING, POSTIT_SIZE};
use canvas::doc::MandalaSnapshot;
use canvas::settings::LayoutSettings;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "mandala-cli", about = "Offline mandala layout tooling")]
struct Cli {
    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Command,
}

/// Element sizes, overridable per run or through the environment.
#[derive(Args, Debug)]
struct LayoutArgs {
    #[arg(long, env = "MANDALA_POSTIT_WIDTH", default_value_t = POSTIT_SIZE, global = true)]
    postit_width: f64,

    #[arg(long, env = "MANDALA_POSTIT_HEIGHT", default_value_t = POSTIT_SIZE, global = true)]
    postit_height: f64,

    #[arg(long, env = "MANDALA_IMAGE_WIDTH", default_value_t = IMAGE_SIZE, global = true)]
    image_width: f64,

    #[arg(long, env = "MANDALA_IMAGE_HEIGHT", default_value_t = IMAGE_SIZE, global = true)]
    image_height: f64,

    #[arg(long, env = "MANDALA_CHILD_SCALE", default_value_t = CHILD_SCALE, global = true)]
    child_scale: f64,

    #[arg(long, env = "MANDALA_ORBIT_SPACING", default_value_t = ORBIT_SPACING, global = true)]
    orbit_spacing: f64,
}

impl LayoutArgs {
    fn settings(&self) -> LayoutSettings {
        LayoutSettings {
            postit_w: self.postit_width,
            postit_h: self.postit_height,
            image_w: self.image_width,
            image_h: self.image_height,
            child_scale: self.child_scale,
            orbit_spacing: self.orbit_spacing,
            exit_animation_ms: EXIT_ANIMATION_MS,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dimension and scale under a logical point.
    Classify {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, default_value = "-", help = "Snapshot file path, or - for stdin")]
        snapshot: String,
    },
    /// Clamp an absolute element center into the mandala circle.
    Clamp {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long)]
        radius: f64,
        #[arg(long, default_value_t = 0.0)]
        width: f64,
        #[arg(long, default_value_t = 0.0)]
        height: f64,
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },
    /// Print orbit positions for the children of a post-it.
    Orbit {
        parent: Uuid,
        #[arg(long, default_value = "-", help = "Snapshot file path, or - for stdin")]
        snapshot: String,
    },
    /// Re-clamp and re-classify every entity, printing the updated snapshot.
    Place {
        #[arg(long, default_value = "-", help = "Snapshot file path, or - for stdin")]
        snapshot: String,
        #[arg(long, help = "Write the result here instead of stdout")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let result = execute(Cli::parse());
    if let Err(err) = &result {
        tracing::error!(code = err.error_code(), "{err}");
    }
    result
}

/// Check the layout flags, then run the subcommand with them.
fn execute(cli: Cli) -> Result<(), CliError> {
    let settings = cli.layout.settings();
    commands::validate_settings(&settings)?;
    run(cli.command, &settings)
}

fn run(command: Command, settings: &LayoutSettings) -> Result<(), CliError> {
    match command {
        Command::Classify { x, y, snapshot } => {
            let snapshot = read_snapshot(&snapshot)?;
            let placement = commands::classify(&snapshot, Point::new(x, y));
            print_json(&placement)
        }
        Command::Clamp { x, y, radius, width, height, scale } => {
            print_json(&commands::clamp(Point::new(x, y), radius, width, height, scale))
        }
        Command::Orbit { parent, snapshot } => {
            let snapshot = read_snapshot(&snapshot)?;
            let slots = commands::orbit(&snapshot, parent, settings)?;
            print_json(&slots)
        }
        Command::Place { snapshot, output } => {
            let mut snapshot = read_snapshot(&snapshot)?;
            let report = commands::place(&mut snapshot)?;
            tracing::info!(
                mandala = %snapshot.mandala.id,
                clamped = report.clamped,
                relabeled = report.relabeled,
                "placed snapshot"
            );
            let rendered = serde_json::to_string_pretty(&snapshot)?;
            match output {
                Some(path) => fs::write(&path, rendered + "\n").map_err(|source| CliError::Write {
                    path: path.display().to_string(),
                    source,
                }),
                None => {
                    println!("{rendered}");
                    Ok(())
                }
            }
        }
    }
}

fn read_snapshot(path: &str) -> Result<MandalaSnapshot, CliError> {
    let raw = if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read { path: "<stdin>".to_owned(), source })?;
        buf
    } else {
        fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })?
    };
    let snapshot: MandalaSnapshot = serde_json::from_str(&raw)?;
    tracing::debug!(
        mandala = %snapshot.mandala.id,
        postits = snapshot.postits.len(),
        images = snapshot.images.len(),
        "read snapshot"
    );
    Ok(snapshot)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
