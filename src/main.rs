//! icongen - placeholder application icon generator
//!
//! Writes square PNG icons (192 and 512 pixels by default) with a simple
//! centered mark:
//! - Geometric: a dark plate with a blocky letter, transparent background
//! - Text: a single letter rendered from a font, white on black
//! - Placeholder: the canvas tiled with an embedded pixel

mod cli;
mod config;
mod icon;
mod logging;

use clap::Parser;
use cli::{exit_codes, Cli};
use config::IconConfig;
use icon::{FontKind, GeneratedIcon, IconError};

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.json_output) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    let config = match IconConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return exit_codes::CONFIG_ERROR;
        }
    };

    if cli.print_config {
        return match config.to_toml() {
            Ok(text) => {
                print!("{}", text);
                exit_codes::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {:#}", e);
                exit_codes::UNEXPECTED_FAILURE
            }
        };
    }

    let targets = config.targets();
    tracing::debug!(policy = ?config.policy, count = targets.len(), "Generating icons");

    match icon::generate_all(&targets, &config.render_options()) {
        Ok(icons) => {
            for icon in &icons {
                log_font(icon);
            }
            println!("Icons created successfully!");
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            categorize_error(&e)
        }
    }
}

fn log_font(icon: &GeneratedIcon) {
    let path = icon.path.display();
    match &icon.font {
        Some(FontKind::Scalable { family }) => {
            tracing::info!(%path, size = icon.size, %family, "Rendered with scalable font");
        }
        Some(FontKind::BuiltIn) => {
            tracing::info!(%path, size = icon.size, "Rendered with built-in bitmap font");
        }
        None => {}
    }
}

/// Map a generation failure to its exit code
fn categorize_error(e: &IconError) -> i32 {
    match e {
        IconError::Io { .. } => exit_codes::IO_FAILURE,
        IconError::InvalidSize(_) | IconError::NotPng(_) => exit_codes::INVALID_INPUT,
        _ => exit_codes::UNEXPECTED_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_categorize_error() {
        let io = IconError::Io {
            path: PathBuf::from("public/icon-192.png"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(categorize_error(&io), exit_codes::IO_FAILURE);
        assert_eq!(
            categorize_error(&IconError::InvalidSize(0)),
            exit_codes::INVALID_INPUT
        );
        assert_eq!(
            categorize_error(&IconError::NotPng(PathBuf::from("icon.jpg"))),
            exit_codes::INVALID_INPUT
        );
        assert_eq!(
            categorize_error(&IconError::Canvas(u32::MAX)),
            exit_codes::UNEXPECTED_FAILURE
        );
    }

    #[test]
    fn test_io_error_message_names_path() {
        let err = IconError::Io {
            path: PathBuf::from("public/icon-192.png"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("Cannot write public/icon-192.png: "));
    }
}
