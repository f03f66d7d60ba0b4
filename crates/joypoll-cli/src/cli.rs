use std::path::PathBuf;

use clap::Parser;

/// Live view of a Linux joystick device that survives unplugging.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Path to the joystick device
    #[arg(short, long, conflicts_with = "index")]
    pub device: Option<String>,

    /// Joystick index (0-9), opens /dev/input/jsN
    #[arg(short, long)]
    pub index: Option<u8>,

    /// Path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Delay between reconnection attempts in milliseconds
    #[arg(long)]
    pub retry_ms: Option<u64>,

    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
