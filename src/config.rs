//! Command line configuration.

use crate::input::PathSelector;
use clap::Parser;
use std::path::PathBuf;
use touch_core::{OutputRange, SyncPolicy};

/// Command line interface.
#[derive(Debug, Parser)]
#[command(
    name = "touch-inject",
    about = "Forward a USB touch digitizer as an absolute pointer"
)]
pub struct Cli {
    /// Device to read: a hidraw node, a capture file, or `-` for stdin.
    /// Found by VID/PID through udev when omitted.
    #[arg(short, long)]
    pub device: Option<PathBuf>,

    /// Calibration file, created with defaults if missing
    #[arg(short, long, default_value = "calibration.txt")]
    pub calibration: PathBuf,

    /// Horizontal output range
    #[arg(long, default_value_t = 65535, value_parser = clap::value_parser!(u32).range(1..))]
    pub x_scale: u32,

    /// Vertical output range
    #[arg(long, default_value_t = 65535, value_parser = clap::value_parser!(u32).range(1..))]
    pub y_scale: u32,

    /// Skip stray bytes until a valid tag instead of dropping the rest of the transfer
    #[arg(long)]
    pub resync: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub device: Option<PathBuf>,
    pub calibration: PathBuf,
    pub output_range: OutputRange,
    pub sync_policy: SyncPolicy,
    pub verbose: bool,
}

impl Config {
    /// Parse the process arguments, exiting with usage on error.
    #[must_use]
    pub fn parse() -> Self {
        Cli::parse().into()
    }

    /// Device selector for the configured device.
    #[must_use]
    pub fn selector(&self) -> PathSelector {
        match &self.device {
            Some(path) => PathSelector::fixed(path),
            None => PathSelector::discover(),
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            device: cli.device,
            calibration: cli.calibration,
            output_range: OutputRange::new(cli.x_scale, cli.y_scale),
            sync_policy: if cli.resync {
                SyncPolicy::Resync
            } else {
                SyncPolicy::StopTheLine
            },
            verbose: cli.verbose,
        }
    }
}
