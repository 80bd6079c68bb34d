use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use tracing::debug;

use crate::canvas::{Canvas, CANVAS_SIDE};
use crate::error::IconError;

/// Build the icon from the logo at `path`, centered on a white canvas.
pub fn compose_from_file(path: &Path) -> Result<Canvas, IconError> {
    if !path.is_file() {
        return Err(IconError::MissingAsset {
            path: path.to_path_buf(),
        });
    }

    let logo = image::open(path)?;
    debug!(
        "Loaded logo {} ({}x{}, {:?})",
        path.display(),
        logo.width(),
        logo.height(),
        logo.color()
    );
    Ok(compose(&fit(logo, CANVAS_SIDE)))
}

/// Shrink `img` to fit inside `bound` × `bound`. Smaller images pass through untouched.
pub fn fit(img: DynamicImage, bound: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    let (nw, nh) = fit_within(w, h, bound);
    if (nw, nh) == (w, h) {
        return img;
    }
    debug!("Resizing logo {}x{} -> {}x{}", w, h, nw, nh);
    img.resize_exact(nw, nh, FilterType::Lanczos3)
}

/// Dimensions of `w` × `h` scaled down to fit within `bound`, keeping the
/// aspect ratio. Never enlarges.
pub fn fit_within(w: u32, h: u32, bound: u32) -> (u32, u32) {
    if w <= bound && h <= bound {
        return (w, h);
    }
    let ratio = (bound as f64 / w as f64).min(bound as f64 / h as f64);
    let scale = |d: u32| ((d as f64 * ratio).round() as u32).clamp(1, bound);
    (scale(w), scale(h))
}

/// Offset that centers a `dim`-sized span on a `side`-sized canvas.
pub fn centered_offset(side: u32, dim: u32) -> u32 {
    side.saturating_sub(dim) / 2
}

/// Paste `logo` centered on an opaque white canvas. Logos with an alpha
/// channel are blended through it, opaque ones overwrite.
pub fn compose(logo: &DynamicImage) -> Canvas {
    let side = CANVAS_SIDE;
    let mut canvas = RgbaImage::from_pixel(side, side, Rgba([255, 255, 255, 255]));
    let x = centered_offset(side, logo.width()) as i64;
    let y = centered_offset(side, logo.height()) as i64;
    let rgba = logo.to_rgba8();

    if logo.color().has_alpha() {
        imageops::overlay(&mut canvas, &rgba, x, y);
    } else {
        imageops::replace(&mut canvas, &rgba, x, y);
    }

    Canvas::new(DynamicImage::ImageRgba8(canvas))
}
