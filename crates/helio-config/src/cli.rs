//! Command-line argument parsing for the Helio viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Helio command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "helio", about = "Globe/plane sun-position viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in globe mode.
    #[arg(long, conflicts_with = "plane")]
    pub sphere: bool,

    /// Start in flat-map mode.
    #[arg(long)]
    pub plane: bool,

    /// Initial latitude in degrees.
    #[arg(long)]
    pub lat: Option<f32>,

    /// Initial longitude in degrees.
    #[arg(long)]
    pub lon: Option<f32>,

    /// Initial zoom in [0, 1].
    #[arg(long)]
    pub zoom: Option<f32>,

    /// Time-lapse speed multiplier.
    #[arg(long)]
    pub speed: Option<f64>,

    /// Start time at a Unix millisecond timestamp (combine with
    /// --speed 0 to freeze it).
    #[arg(long)]
    pub moment: Option<i64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if args.sphere {
            self.controls.sphere_mode = true;
        }
        if args.plane {
            self.controls.sphere_mode = false;
        }
        if let Some(lat) = args.lat {
            self.controls.latitude_deg = lat;
        }
        if let Some(lon) = args.lon {
            self.controls.longitude_deg = lon;
        }
        if let Some(zoom) = args.zoom {
            self.controls.zoom = zoom;
        }
        if let Some(speed) = args.speed {
            self.time.speed = speed;
        }
        if let Some(moment) = args.moment {
            self.time.start_unix_ms = Some(moment);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
