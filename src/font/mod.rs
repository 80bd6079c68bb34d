pub mod builtin;
pub mod lookup;

use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::pixelops::interpolate;
use tracing::debug;

use builtin::BuiltinFont;

/// Ink bounding box of a piece of text, in pixels relative to the pen origin.
///
/// `max_x`/`max_y` are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl TextBounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    fn union(self, other: TextBounds) -> TextBounds {
        TextBounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Pen origin that centers `bounds` on a `side` × `side` canvas, lifted
/// upward by `lift` pixels.
pub fn centered_origin(bounds: TextBounds, side: u32, lift: f32) -> (f32, f32) {
    let half = side as f32 / 2.0;
    let (cx, cy) = bounds.center();
    (half - cx, half - lift - cy)
}

/// Font used to render the icon label.
pub enum LabelFont {
    /// A TrueType/OpenType font loaded from disk.
    Outline { font: FontVec, scale: PxScale },
    /// The dot-matrix fallback.
    Builtin(BuiltinFont),
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { scale, .. } => write!(f, "Outline({}px)", scale.y),
            Self::Builtin(b) => write!(f, "Builtin(dot={})", b.dot()),
        }
    }
}

impl LabelFont {
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    pub fn measure(&self, text: &str) -> TextBounds {
        match self {
            Self::Outline { font, scale } => layout(font, *scale, text, (0.0, 0.0))
                .into_iter()
                .filter_map(|g| font.outline_glyph(g))
                .map(|og| {
                    let r = og.px_bounds();
                    TextBounds {
                        min_x: r.min.x,
                        min_y: r.min.y,
                        max_x: r.max.x,
                        max_y: r.max.y,
                    }
                })
                .reduce(TextBounds::union)
                .unwrap_or_default(),
            Self::Builtin(b) => b.measure(text),
        }
    }

    /// Draw `text` with its pen at `origin`. Pixels outside the canvas are dropped.
    pub fn draw(&self, canvas: &mut RgbImage, text: &str, origin: (f32, f32), color: Rgb<u8>) {
        match self {
            Self::Outline { font, scale } => {
                let (w, h) = canvas.dimensions();
                for g in layout(font, *scale, text, origin) {
                    let Some(og) = font.outline_glyph(g) else {
                        continue;
                    };
                    let r = og.px_bounds();
                    og.draw(|x, y, coverage| {
                        let px = r.min.x as i64 + x as i64;
                        let py = r.min.y as i64 + y as i64;
                        if px < 0 || py < 0 || px >= w as i64 || py >= h as i64 {
                            return;
                        }
                        let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                        *pixel = interpolate(color, *pixel, coverage.clamp(0.0, 1.0));
                    });
                }
            }
            Self::Builtin(b) => b.draw(canvas, text, origin, color),
        }
    }
}

/// Lay out a single line of glyphs with kerning, pen at `origin` (top-left).
fn layout(font: &FontVec, scale: PxScale, text: &str, origin: (f32, f32)) -> Vec<Glyph> {
    let scaled = font.as_scaled(scale);
    let mut caret = origin.0;
    let mut last: Option<GlyphId> = None;
    let mut glyphs = Vec::with_capacity(text.len());

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = last {
            caret += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, origin.1 + scaled.ascent())));
        caret += scaled.h_advance(id);
        last = Some(id);
    }

    glyphs
}

/// `size` is pixels per em, so the ab_glyph height scale is derived from the em box.
fn px_scale(font: &FontVec, size: f32) -> PxScale {
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(size * font.height_unscaled() / upem),
        _ => PxScale::from(size),
    }
}

/// Resolve the label font by name. Never fails: anything that goes wrong
/// degrades to the built-in font.
pub fn resolve_font(name: &str, size: f32) -> LabelFont {
    resolve_font_in(name, size, &lookup::font_search_dirs())
}

pub fn resolve_font_in(name: &str, size: f32, search: &[std::path::PathBuf]) -> LabelFont {
    let Some(path) = lookup::find_font_file(name, search) else {
        debug!("Font '{}' not found, using built-in font", name);
        return LabelFont::Builtin(BuiltinFont::for_size(size));
    };

    let loaded = std::fs::read(&path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| FontVec::try_from_vec(bytes).map_err(|e| e.to_string()));

    match loaded {
        Ok(font) => {
            debug!("Loaded font {}", path.display());
            let scale = px_scale(&font, size);
            LabelFont::Outline { font, scale }
        }
        Err(e) => {
            debug!("Failed to load font {}: {}, using built-in font", path.display(), e);
            LabelFont::Builtin(BuiltinFont::for_size(size))
        }
    }
}
