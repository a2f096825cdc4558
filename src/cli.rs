//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

use crate::icon::Policy;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_FAILURE: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
    pub const IO_FAILURE: i32 = 3;
    pub const INVALID_INPUT: i32 = 4;
}

/// Generate placeholder PNG application icons.
///
/// With no arguments, writes public/icon-192.png and public/icon-512.png.
#[derive(Parser, Debug)]
#[command(name = "icongen", version, about, long_about = None)]
pub struct Cli {
    /// TOML config file (defaults to ./icongen.toml when present)
    #[arg(short, long, env = "ICONGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// How the foreground mark is drawn
    #[arg(short, long, value_enum)]
    pub policy: Option<Policy>,

    /// Directory the icons are written to; must already exist
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Icon size in pixels; repeat for several icons
    #[arg(short, long = "size", value_parser = clap::value_parser!(u32).range(1..))]
    pub sizes: Vec<u32>,

    /// Font file for the text policy
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Letter drawn by the text policy
    #[arg(long)]
    pub letter: Option<char>,

    /// Do not scan system fonts
    #[arg(long)]
    pub no_system_fonts: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_output: bool,
}
