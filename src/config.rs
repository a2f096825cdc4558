//! Run configuration
//!
//! Built-in defaults, optionally replaced by a TOML file, then overridden by
//! command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::icon::{FontOptions, IconTarget, Policy, RenderOptions};

/// File picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "icongen.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconConfig {
    pub policy: Policy,
    /// Directory the icons are written into
    pub output_dir: PathBuf,
    /// One icon per entry, named `icon-<size>.png`
    pub sizes: Vec<u32>,
    pub letter: char,
    pub font: FontOptions,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Geometric,
            output_dir: PathBuf::from("public"),
            sizes: vec![192, 512],
            letter: 'J',
            font: FontOptions::default(),
        }
    }
}

impl IconConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid config")?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("In {}", path.display()))
    }

    /// Effective configuration for a run
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        Self::resolve_with_default(cli, Path::new(DEFAULT_CONFIG_FILE))
    }

    fn resolve_with_default(cli: &Cli, default_file: &Path) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None if default_file.is_file() => {
                tracing::debug!(path = %default_file.display(), "Using config file");
                Self::load(default_file)?
            }
            None => Self::default(),
        };

        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    /// Command-line flags win over file values
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(policy) = cli.policy {
            self.policy = policy;
        }
        if let Some(dir) = &cli.out_dir {
            self.output_dir = dir.clone();
        }
        if !cli.sizes.is_empty() {
            self.sizes = cli.sizes.clone();
        }
        if let Some(font) = &cli.font {
            self.font.path = Some(font.clone());
        }
        if let Some(letter) = cli.letter {
            self.letter = letter;
        }
        if cli.no_system_fonts {
            self.font.system_fonts = false;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.sizes.is_empty(), "At least one icon size is required");
        ensure!(
            self.sizes.iter().all(|&size| size > 0),
            "Icon sizes must be positive integers, got {:?}",
            self.sizes
        );
        Ok(())
    }

    pub fn targets(&self) -> Vec<IconTarget> {
        self.sizes
            .iter()
            .map(|&size| IconTarget {
                size,
                path: self.output_dir.join(format!("icon-{size}.png")),
            })
            .collect()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            policy: self.policy,
            letter: self.letter,
            font: self.font.clone(),
        }
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("icongen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_target_public_dir() {
        let config = IconConfig::default();
        assert_eq!(
            config.targets(),
            vec![
                IconTarget {
                    size: 192,
                    path: PathBuf::from("public/icon-192.png"),
                },
                IconTarget {
                    size: 512,
                    path: PathBuf::from("public/icon-512.png"),
                },
            ]
        );
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn test_parse_full_file() {
        let config = IconConfig::from_toml(
            r#"
policy = "text"
output_dir = "."
sizes = [48, 96]
letter = "Q"

[font]
path = "/System/Library/Fonts/Arial.ttf"
family = "Helvetica"
system_fonts = false
"#,
        )
        .unwrap();

        assert_eq!(config.policy, Policy::Text);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.sizes, vec![48, 96]);
        assert_eq!(config.letter, 'Q');
        assert_eq!(
            config.font.path,
            Some(PathBuf::from("/System/Library/Fonts/Arial.ttf"))
        );
        assert_eq!(config.font.family, "Helvetica");
        assert!(!config.font.system_fonts);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = IconConfig::from_toml(
            r#"
policy = "placeholder"

[font]
family = "DejaVu Sans"
"#,
        )
        .unwrap();

        assert_eq!(config.policy, Policy::Placeholder);
        assert_eq!(config.sizes, vec![192, 512]);
        assert_eq!(config.font.family, "DejaVu Sans");
        assert!(config.font.system_fonts);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(IconConfig::from_toml(r#"policy = "svg""#).is_err());
        assert!(IconConfig::from_toml(r#"letter = "JK""#).is_err());
        assert!(IconConfig::from_toml(r#"sizes = [-1]"#).is_err());
        assert!(IconConfig::from_toml(r#"colour = "red""#).is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = IconConfig::default();
        assert!(config.validate().is_ok());

        config.sizes = vec![];
        assert!(config.validate().is_err());

        config.sizes = vec![192, 0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = IconConfig::default();
        config.apply_overrides(&cli(&[
            "-p",
            "text",
            "-o",
            "assets",
            "-s",
            "32",
            "--font",
            "Inter.ttf",
            "--letter",
            "z",
            "--no-system-fonts",
        ]));

        assert_eq!(config.policy, Policy::Text);
        assert_eq!(
            config.targets(),
            vec![IconTarget {
                size: 32,
                path: PathBuf::from("assets/icon-32.png"),
            }]
        );
        assert_eq!(config.font.path, Some(PathBuf::from("Inter.ttf")));
        assert_eq!(config.letter, 'z');
        assert!(!config.font.system_fonts);
    }

    #[test]
    fn test_resolve_prefers_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let fallback = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&explicit, "sizes = [64]").unwrap();
        std::fs::write(&fallback, "sizes = [128]").unwrap();

        let args = cli(&["--config", explicit.to_str().unwrap()]);
        let config = IconConfig::resolve_with_default(&args, &fallback).unwrap();
        assert_eq!(config.sizes, vec![64]);

        let config = IconConfig::resolve_with_default(&cli(&[]), &fallback).unwrap();
        assert_eq!(config.sizes, vec![128]);
    }

    #[test]
    fn test_resolve_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(DEFAULT_CONFIG_FILE);

        let config = IconConfig::resolve_with_default(&cli(&["-s", "16"]), &missing).unwrap();
        assert_eq!(config.sizes, vec![16]);
        assert_eq!(config.policy, Policy::Geometric);
    }

    #[test]
    fn test_resolve_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let args = cli(&["--config", missing.to_str().unwrap()]);

        let err = IconConfig::resolve_with_default(&args, &missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = IconConfig {
            policy: Policy::Text,
            letter: 'A',
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains("policy = \"text\""));
        assert_eq!(IconConfig::from_toml(&text).unwrap(), config);
    }
}
