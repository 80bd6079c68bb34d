use image::{DynamicImage, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use tracing::debug;

use crate::canvas::{parse_color, Canvas, CANVAS_SIDE};
use crate::config::ProceduralStyle;
use crate::error::IconError;
use crate::font::{centered_origin, resolve_font, LabelFont};

/// Draw the icon: base fill, outlined circle, centered label.
pub fn draw(style: &ProceduralStyle) -> Result<Canvas, IconError> {
    let font = resolve_font(&style.font, style.font_size);
    if font.is_builtin() {
        debug!("Drawing label with the built-in font");
    } else {
        debug!("Label font: {:?}", font);
    }
    draw_with_font(style, &font)
}

pub fn draw_with_font(style: &ProceduralStyle, font: &LabelFont) -> Result<Canvas, IconError> {
    if style.label.trim().is_empty() {
        return Err(IconError::EmptyLabel);
    }
    let background = parse_color(&style.background)?;
    let fill = parse_color(&style.circle_fill)?;
    let outline = parse_color(&style.circle_outline)?;
    let label_color = parse_color(&style.label_color)?;

    let side = CANVAS_SIDE;
    let mut img = RgbImage::from_pixel(side, side, background);

    // The stroke sits inside the circle: paint the outline disc, then the
    // fill disc shrunk by the stroke width.
    let center = (side as i32 / 2, side as i32 / 2);
    let radius = (side.saturating_sub(style.circle_margin.saturating_mul(2)) / 2) as i32;
    if radius > 0 {
        draw_filled_circle_mut(&mut img, center, radius, outline);
        let stroke = i32::try_from(style.outline_width).unwrap_or(i32::MAX);
        let inner = radius.saturating_sub(stroke);
        if inner > 0 {
            draw_filled_circle_mut(&mut img, center, inner, fill);
        }
    }

    let bounds = font.measure(&style.label);
    let origin = centered_origin(bounds, side, style.label_lift);
    debug!(
        "Label '{}' {}x{} at ({:.1}, {:.1})",
        style.label,
        bounds.width(),
        bounds.height(),
        origin.0,
        origin.1
    );
    font.draw(&mut img, &style.label, origin, label_color);

    Ok(Canvas::new(DynamicImage::ImageRgb8(img)))
}
