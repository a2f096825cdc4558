//! Icon generation
//!
//! One operation, [`generate`], with three interchangeable policies for the
//! foreground mark:
//! - Geometric: dark inset plate with a blocky white "J" (RGBA, transparent)
//! - Text: a letter rendered from a font, white on black (RGB)
//! - Placeholder: canvas tiled with an embedded 1x1 PNG pixel (RGBA)

pub mod bitmap_font;
pub mod canvas;
pub mod geometric;
pub mod layout;
pub mod placeholder;
pub mod text;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use canvas::{Canvas, PixelMode};
pub use text::{FontFaces, FontKind, FontOptions};

/// Errors that can occur while generating an icon
#[derive(Debug, Error)]
pub enum IconError {
    #[error("Icon size must be a positive integer, got {0}")]
    InvalidSize(u32),

    #[error("Output path must have a .png extension: {0}")]
    NotPng(PathBuf),

    #[error("Cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Font could not be used; absorbed by the bitmap fallback
    #[error("Font unavailable: {0}")]
    Resource(String),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Cannot allocate a {0}x{0} canvas")]
    Canvas(u32),

    #[error("Invalid embedded placeholder image: {0}")]
    Placeholder(String),
}

/// Strategy for drawing the foreground mark
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    #[default]
    Geometric,
    Text,
    Placeholder,
}

impl Policy {
    pub fn pixel_mode(&self) -> PixelMode {
        match self {
            Policy::Geometric | Policy::Placeholder => PixelMode::Rgba,
            Policy::Text => PixelMode::Rgb,
        }
    }
}

/// Everything that shapes the image apart from its size
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub policy: Policy,
    /// Letter drawn by the text policy
    pub letter: char,
    pub font: FontOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            letter: 'J',
            font: FontOptions::default(),
        }
    }
}

/// One icon to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTarget {
    pub size: u32,
    pub path: PathBuf,
}

/// Result of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub path: PathBuf,
    pub size: u32,
    /// Font used by the text policy; `None` for the other policies
    pub font: Option<FontKind>,
}

/// Fonts the text policy draws with; the other policies need none
pub fn load_faces(options: &RenderOptions) -> Option<FontFaces> {
    match options.policy {
        Policy::Text => FontFaces::load(&options.font),
        Policy::Geometric | Policy::Placeholder => None,
    }
}

/// Draw an icon in memory
pub fn render(
    size: u32,
    options: &RenderOptions,
    faces: Option<&FontFaces>,
) -> Result<(Canvas, Option<FontKind>), IconError> {
    if size == 0 {
        return Err(IconError::InvalidSize(size));
    }

    let mut canvas = Canvas::new(size, options.policy.pixel_mode())?;
    let font = match options.policy {
        Policy::Geometric => {
            geometric::draw(&mut canvas);
            None
        }
        Policy::Text => Some(text::draw(&mut canvas, options.letter, faces)),
        Policy::Placeholder => {
            placeholder::draw(&mut canvas)?;
            None
        }
    };

    Ok((canvas, font))
}

/// Render a `size` x `size` icon and save it as PNG at `output_path`.
///
/// The target directory must already exist. Prints a confirmation line on
/// success.
pub fn generate(
    size: u32,
    output_path: &Path,
    options: &RenderOptions,
) -> Result<GeneratedIcon, IconError> {
    generate_with(size, output_path, options, load_faces(options).as_ref())
}

fn generate_with(
    size: u32,
    output_path: &Path,
    options: &RenderOptions,
    faces: Option<&FontFaces>,
) -> Result<GeneratedIcon, IconError> {
    let is_png = output_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        return Err(IconError::NotPng(output_path.to_path_buf()));
    }

    tracing::debug!(size, path = %output_path.display(), policy = ?options.policy, "Generating icon");
    let (canvas, font) = render(size, options, faces)?;
    canvas.save_png(output_path)?;

    tracing::info!(size, path = %output_path.display(), "Icon written");
    println!("Created {} ({}x{})", output_path.display(), size, size);

    Ok(GeneratedIcon {
        path: output_path.to_path_buf(),
        size,
        font,
    })
}

/// Generate every target in order, stopping at the first failure.
///
/// Fonts are loaded once and shared by all targets.
pub fn generate_all(
    targets: &[IconTarget],
    options: &RenderOptions,
) -> Result<Vec<GeneratedIcon>, IconError> {
    let faces = load_faces(options);
    targets
        .iter()
        .map(|target| generate_with(target.size, &target.path, options, faces.as_ref()))
        .collect()
}
