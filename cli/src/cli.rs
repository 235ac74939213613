use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the simulated platform answers overlay permission checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PermissionMode {
    /// Permission is already granted; attach succeeds immediately
    Granted,
    /// Permission is definitively denied; attach fails fast
    Denied,
    /// Permission is unknown; attach suspends into a prompt answered with
    /// the `grant`/`deny` menu commands
    Prompt,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "FloatView",
    version = floatview_core::version(),
    about = "FloatView - manual test harness for the overlay lifecycle manager",
)]
pub struct Args {
    /// Specify custom configuration file path
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Specify custom configuration file path"
    )]
    pub config_path: Option<PathBuf>,

    /// How the simulated platform answers permission checks
    #[arg(
        long = "permission",
        value_enum,
        default_value = "granted",
        help = "How the simulated platform answers overlay permission checks"
    )]
    pub permission: PermissionMode,

    /// Only log info and above
    #[arg(short, long, help = "Only log info and above")]
    pub quiet: bool,

    /// Log everything including trace
    #[arg(short, long, help = "Log everything including trace")]
    pub verbose: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}
