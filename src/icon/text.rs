//! Text mark: a single letter rendered from a font
//!
//! Scalable fonts go through usvg/resvg: the letter is laid out as an SVG
//! `<text>` node and measured by the pixels its outline covers. When no
//! scalable font can be loaded, or the font has no outline for the letter,
//! the built-in bitmap font is used instead. That fallback is never an error
//! for the caller.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tiny_skia::Transform;
use usvg::fontdb;

use super::bitmap_font::{self, Glyph};
use super::canvas::{Canvas, Rgba, WHITE};
use super::layout::Bounds;
use super::IconError;

/// Where to look for a scalable font
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOptions {
    /// Font file tried before anything else
    pub path: Option<PathBuf>,
    /// Preferred family among system fonts
    pub family: String,
    /// Whether to scan the system font directories
    pub system_fonts: bool,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            path: None,
            family: "Arial".to_string(),
            system_fonts: true,
        }
    }
}

/// Which kind of font ended up drawing the letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontKind {
    Scalable { family: String },
    BuiltIn,
}

/// A loaded font, ready for measuring
pub enum Font {
    Scalable {
        db: Arc<fontdb::Database>,
        family: String,
        px: f32,
    },
    /// Fixed-size bitmap font; ignores the requested pixel size
    BuiltIn,
}

impl Font {
    pub fn kind(&self) -> FontKind {
        match self {
            Font::Scalable { family, .. } => FontKind::Scalable {
                family: family.clone(),
            },
            Font::BuiltIn => FontKind::BuiltIn,
        }
    }
}

/// Bounding box of the rendered glyph, in the layout's own coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A measured letter that can be drawn at any origin
pub struct TextLayout {
    pub bounds: TextBounds,
    shape: Shape,
}

enum Shape {
    Outline(usvg::Tree),
    Bitmap { glyph: &'static Glyph, color: Rgba },
}

/// Scalable faces loaded once and shared by every icon size of a run
pub struct FontFaces {
    db: Arc<fontdb::Database>,
    family: String,
}

impl FontFaces {
    /// Scan the font file and system fonts. `None` leaves only the built-in
    /// bitmap font.
    pub fn load(options: &FontOptions) -> Option<Self> {
        match load_scalable(options) {
            Ok(faces) => {
                tracing::debug!(family = %faces.family(), faces = faces.db.len(), "Loaded scalable fonts");
                Some(faces)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Using built-in bitmap font");
                None
            }
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// The loaded family at `px` pixels
    pub fn font(&self, px: f32) -> Font {
        Font::Scalable {
            db: Arc::clone(&self.db),
            family: self.family.clone(),
            px,
        }
    }
}

/// Load a scalable font at `px` pixels, falling back to the built-in font.
pub fn load_font(faces: Option<&FontFaces>, px: f32) -> Font {
    faces.map_or(Font::BuiltIn, |faces| faces.font(px))
}

fn load_scalable(options: &FontOptions) -> Result<FontFaces, IconError> {
    let mut db = fontdb::Database::new();

    if let Some(path) = &options.path {
        match db.load_font_file(path) {
            Ok(()) => {
                if let Some(family) = first_family(&db) {
                    return Ok(FontFaces {
                        db: Arc::new(db),
                        family,
                    });
                }
                tracing::warn!(path = %path.display(), "Font file has no usable faces");
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Failed to load font file");
            }
        }
    }

    if options.system_fonts {
        db.load_system_fonts();
        if let Some(family) = pick_family(&db, &options.family) {
            return Ok(FontFaces {
                db: Arc::new(db),
                family,
            });
        }
    }

    Err(IconError::Resource("no scalable font available".to_string()))
}

fn first_family(db: &fontdb::Database) -> Option<String> {
    db.faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
}

/// The preferred family if installed, otherwise whatever comes first
fn pick_family(db: &fontdb::Database, preferred: &str) -> Option<String> {
    let families = [fontdb::Family::Name(preferred)];
    let query = fontdb::Query {
        families: &families,
        ..Default::default()
    };
    if db.query(&query).is_some() {
        return Some(preferred.to_string());
    }
    first_family(db)
}

/// Lay out `letter` and measure its bounding box
pub fn measure_text(letter: char, font: &Font, color: Rgba) -> Result<TextLayout, IconError> {
    match font {
        Font::Scalable { db, family, px } => measure_outline(letter, db, family, *px, color),
        Font::BuiltIn => Ok(measure_bitmap(letter, color)),
    }
}

fn measure_outline(
    letter: char,
    db: &Arc<fontdb::Database>,
    family: &str,
    px: f32,
    color: Rgba,
) -> Result<TextLayout, IconError> {
    let extent = px * 2.0;
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{extent}" height="{extent}"><text x="0" y="{px}" font-family="{family}" font-size="{px}" fill="#{r:02x}{g:02x}{b:02x}" fill-opacity="{a}">{text}</text></svg>"##,
        family = escape_xml(family),
        r = color[0],
        g = color[1],
        b = color[2],
        a = color[3] as f32 / 255.0,
        text = escape_xml(&letter.to_string()),
    );

    let opt = usvg::Options {
        fontdb: Arc::clone(db),
        font_family: family.to_string(),
        ..Default::default()
    };

    let tree = usvg::Tree::from_str(&svg, &opt).map_err(|e| IconError::Resource(e.to_string()))?;
    if !tree.root().has_children() {
        return Err(IconError::Resource(format!(
            "font {family:?} has no outline for {letter:?}"
        )));
    }

    let no_ink = || IconError::Resource(format!("font {family:?} rendered {letter:?} with no ink"));
    let outline = outline_bounds(tree.root()).ok_or_else(no_ink)?;
    if outline.width() <= 0.0 || outline.height() <= 0.0 {
        return Err(no_ink());
    }
    let bounds = raster_bounds(&tree, outline).ok_or_else(no_ink)?;

    Ok(TextLayout {
        bounds,
        shape: Shape::Outline(tree),
    })
}

/// Union of the glyph outlines under `group`.
///
/// A text node's own box is its layout box (advance width, ascent and
/// descent); the flattened paths give the ink.
fn outline_bounds(group: &usvg::Group) -> Option<tiny_skia::Rect> {
    let mut bounds: Option<tiny_skia::Rect> = None;
    for node in group.children() {
        let rect = match node {
            usvg::Node::Text(text) => outline_bounds(text.flattened()),
            usvg::Node::Path(path) => Some(path.abs_bounding_box()),
            usvg::Node::Group(group) => outline_bounds(group),
            usvg::Node::Image(_) => None,
        };
        bounds = match (bounds, rect) {
            (Some(a), Some(b)) => tiny_skia::Rect::from_ltrb(
                a.left().min(b.left()),
                a.top().min(b.top()),
                a.right().max(b.right()),
                a.bottom().max(b.bottom()),
            ),
            (a, b) => a.or(b),
        };
    }
    bounds
}

/// Pixel box of the rasterized glyph, in tree coordinates.
///
/// The glyph is rendered once into a scratch pixmap at a whole-pixel offset.
/// [`draw_text`] also moves it by whole pixels, so the same pixels light up
/// and the box matches the drawn ink exactly.
fn raster_bounds(tree: &usvg::Tree, outline: tiny_skia::Rect) -> Option<TextBounds> {
    const PAD: f32 = 2.0;

    let tx = (PAD - outline.left()).ceil();
    let ty = (PAD - outline.top()).ceil();
    let width = (outline.right() + tx + PAD).ceil() as u32;
    let height = (outline.bottom() + ty + PAD).ceil() as u32;

    let mut scratch = tiny_skia::Pixmap::new(width, height)?;
    resvg::render(tree, Transform::from_translate(tx, ty), &mut scratch.as_mut());

    let ink = scratch
        .pixels()
        .iter()
        .enumerate()
        .filter(|(_, pixel)| pixel.alpha() > 0)
        .fold(Bounds::new(0, 0, 0, 0), |ink, (i, _)| {
            let i = i as u32;
            ink.union(&Bounds::new(i % width, i / width, 1, 1))
        });
    if ink.is_empty() {
        return None;
    }

    Some(TextBounds {
        x: ink.x as f32 - tx,
        y: ink.y as f32 - ty,
        width: ink.width as f32,
        height: ink.height as f32,
    })
}

fn measure_bitmap(letter: char, color: Rgba) -> TextLayout {
    let glyph = bitmap_font::glyph(letter);
    let ink = glyph.ink_bounds();
    TextLayout {
        bounds: TextBounds {
            x: ink.x as f32,
            y: ink.y as f32,
            width: ink.width as f32,
            height: ink.height as f32,
        },
        shape: Shape::Bitmap { glyph, color },
    }
}

/// Draw so the layout's bounding box starts at `origin`
pub fn draw_text(canvas: &mut Canvas, origin: (f32, f32), layout: &TextLayout) {
    let dx = origin.0 - layout.bounds.x;
    let dy = origin.1 - layout.bounds.y;

    match &layout.shape {
        Shape::Outline(tree) => {
            resvg::render(tree, Transform::from_translate(dx, dy), &mut canvas.pixmap_mut());
        }
        Shape::Bitmap { glyph, color } => {
            glyph.draw(canvas, dx.max(0.0) as u32, dy.max(0.0) as u32, *color);
        }
    }
}

/// Top-left origin that centers `bounds` on a `size` x `size` canvas
pub fn centered_origin(size: u32, bounds: &TextBounds) -> (f32, f32) {
    let size = size as f32;
    (
        ((size - bounds.width) / 2.0).floor(),
        ((size - bounds.height) / 2.0).floor(),
    )
}

/// Draw `letter` centered at a third of the canvas size
pub fn draw(canvas: &mut Canvas, letter: char, faces: Option<&FontFaces>) -> FontKind {
    let px = (canvas.size() / 3).max(1) as f32;
    let font = load_font(faces, px);

    let (layout, kind) = match measure_text(letter, &font, WHITE) {
        Ok(layout) => (layout, font.kind()),
        Err(err) => {
            tracing::warn!(error = %err, "Falling back to built-in bitmap font");
            (measure_bitmap(letter, WHITE), FontKind::BuiltIn)
        }
    };

    let origin = centered_origin(canvas.size(), &layout.bounds);
    tracing::debug!(?letter, bounds = ?layout.bounds, ?origin, ?kind, "Drawing text mark");
    draw_text(canvas, origin, &layout);
    kind
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
