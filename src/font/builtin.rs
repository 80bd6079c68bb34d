use image::{Rgb, RgbImage};

use super::TextBounds;

/// Glyph cell width in dots.
const CELL_W: u32 = 5;
/// Glyph cell height in dots.
const CELL_H: u32 = 7;
/// Horizontal advance per character (cell + one dot of spacing).
const ADVANCE: u32 = CELL_W + 1;

/// Drawn for characters missing from the table.
const HOLLOW_BOX: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

/// Minimal 5x7 dot-matrix font compiled into the binary.
///
/// Each glyph row is 5 bits, bit 4 being the leftmost dot. Every dot is
/// painted as a `dot` × `dot` pixel square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFont {
    dot: u32,
}

impl BuiltinFont {
    /// Derive the dot size from a nominal font size in pixels per em.
    pub fn for_size(size: f32) -> Self {
        let dot = (size / 12.0).floor().max(1.0) as u32;
        Self { dot }
    }

    pub fn dot(&self) -> u32 {
        self.dot
    }

    /// Ink bounding box with the pen at (0, 0).
    pub fn measure(&self, text: &str) -> TextBounds {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (col, row) in self.dots(text) {
            bounds = Some(match bounds {
                None => (col, row, col + 1, row + 1),
                Some((x0, y0, x1, y1)) => (x0.min(col), y0.min(row), x1.max(col + 1), y1.max(row + 1)),
            });
        }
        let d = self.dot as f32;
        match bounds {
            Some((x0, y0, x1, y1)) => TextBounds {
                min_x: x0 as f32 * d,
                min_y: y0 as f32 * d,
                max_x: x1 as f32 * d,
                max_y: y1 as f32 * d,
            },
            None => TextBounds::default(),
        }
    }

    pub fn draw(&self, canvas: &mut RgbImage, text: &str, origin: (f32, f32), color: Rgb<u8>) {
        let ox = origin.0.round() as i64;
        let oy = origin.1.round() as i64;
        let (w, h) = (canvas.width() as i64, canvas.height() as i64);
        let d = self.dot as i64;

        for (col, row) in self.dots(text) {
            let x0 = ox + col as i64 * d;
            let y0 = oy + row as i64 * d;
            for y in y0.max(0)..(y0 + d).min(h) {
                for x in x0.max(0)..(x0 + d).min(w) {
                    canvas.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    /// All lit dots of `text`, as (column, row) in dot units.
    fn dots<'a>(&self, text: &'a str) -> impl Iterator<Item = (u32, u32)> + 'a {
        text.chars().enumerate().flat_map(|(i, c)| {
            let rows = glyph(c);
            let base = i as u32 * ADVANCE;
            (0..CELL_H).flat_map(move |row| {
                (0..CELL_W).filter_map(move |col| {
                    let lit = rows[row as usize] & (0x10 >> col) != 0;
                    lit.then_some((base + col, row))
                })
            })
        })
    }
}

fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ' ' => [0x00; 7],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        _ => HOLLOW_BOX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_size_from_font_size() {
        assert_eq!(BuiltinFont::for_size(180.0).dot(), 15);
        assert_eq!(BuiltinFont::for_size(5.0).dot(), 1);
        assert_eq!(BuiltinFont::for_size(0.0).dot(), 1);
    }

    #[test]
    fn test_measure_label() {
        let font = BuiltinFont::for_size(12.0);
        // C and M fill their cells, '+' spans columns 12..17 and rows 1..6
        let b = font.measure("CM+");
        assert_eq!(b.min_x, 0.0);
        assert_eq!(b.max_x, 17.0);
        assert_eq!(b.min_y, 0.0);
        assert_eq!(b.max_y, 7.0);
    }

    #[test]
    fn test_measure_uses_ink_not_cell() {
        let font = BuiltinFont::for_size(24.0);
        let b = font.measure("-");
        assert_eq!((b.min_x, b.max_x), (0.0, 10.0));
        assert_eq!((b.min_y, b.max_y), (6.0, 8.0));
    }

    #[test]
    fn test_blank_text_has_empty_bounds() {
        let font = BuiltinFont::for_size(12.0);
        assert_eq!(font.measure("   "), TextBounds::default());
        assert_eq!(font.measure(""), TextBounds::default());
    }

    #[test]
    fn test_unknown_char_draws_box() {
        assert_eq!(glyph('~'), HOLLOW_BOX);
        assert_eq!(glyph('m'), glyph('M'));
    }

    #[test]
    fn test_draw_paints_only_lit_dots() {
        let font = BuiltinFont::for_size(24.0); // dot = 2
        let mut img = RgbImage::new(20, 20);
        font.draw(&mut img, "-", (1.0, 1.0), Rgb([9, 9, 9]));

        // Row 3 of '-' is lit: y = 1 + 3*2 .. 1 + 4*2
        assert_eq!(*img.get_pixel(1, 7), Rgb([9, 9, 9]));
        assert_eq!(*img.get_pixel(10, 8), Rgb([9, 9, 9]));
        assert_eq!(*img.get_pixel(1, 6), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(11, 7), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_draw_clips_at_canvas_edge() {
        let font = BuiltinFont::for_size(120.0);
        let mut img = RgbImage::new(8, 8);
        font.draw(&mut img, "H", (-30.0, -30.0), Rgb([1, 1, 1]));
        font.draw(&mut img, "H", (500.0, 500.0), Rgb([1, 1, 1]));
    }
}
