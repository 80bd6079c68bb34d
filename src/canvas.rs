use image::{DynamicImage, Rgb};

use crate::error::IconError;

/// Side length of the square canvas, in pixels.
pub const CANVAS_SIDE: u32 = 512;

/// A finished icon canvas, ready for export.
///
/// The procedural strategy produces opaque RGB, the logo strategy RGBA.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub image: DynamicImage,
}

impl Canvas {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn side(&self) -> u32 {
        self.image.width()
    }
}

/// Parse a color as `#rrggbb`, `#rgb` or one of a few CSS names.
pub fn parse_color(value: &str) -> Result<Rgb<u8>, IconError> {
    let invalid = || IconError::InvalidColor(value.to_string());
    let v = value.trim();

    match v.to_ascii_lowercase().as_str() {
        "white" => return Ok(Rgb([255, 255, 255])),
        "black" => return Ok(Rgb([0, 0, 0])),
        "red" => return Ok(Rgb([255, 0, 0])),
        "blue" => return Ok(Rgb([0, 0, 255])),
        _ => {}
    }

    let hex = v.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
        }
        3 => {
            // #abc expands to #aabbcc
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 1], 16)
                    .map(|n| n * 17)
                    .map_err(|_| invalid())
            };
            Ok(Rgb([channel(0)?, channel(1)?, channel(2)?]))
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(parse_color("#1e40af").unwrap(), Rgb([0x1e, 0x40, 0xaf]));
        assert_eq!(parse_color("#3B82F6").unwrap(), Rgb([0x3b, 0x82, 0xf6]));
    }

    #[test]
    fn test_parse_short_hex_and_names() {
        assert_eq!(parse_color("#fff").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_color("White").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_color(" black ").unwrap(), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_color("1e40af").is_err());
        assert!(parse_color("#1e40a").is_err());
        assert!(parse_color("#gg0000").is_err());
        assert!(parse_color("#é0000").is_err());
        assert!(parse_color("").is_err());
    }
}
