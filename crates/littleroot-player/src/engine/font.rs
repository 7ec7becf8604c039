//! 5×7 bitmap font and simple rectangle drawing on the ARGB framebuffer.
//!
//! Lower-case letters render as upper case; characters without a glyph
//! render as '?'.

use super::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const GLYPH_WIDTH: i32 = 5;
pub const GLYPH_HEIGHT: i32 = 7;
/// Horizontal distance between glyph origins at scale 1
pub const ADVANCE: i32 = GLYPH_WIDTH + 1;

/// Rows of a glyph, top to bottom; bit 4 is the leftmost column
fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
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
        ' ' => [0; 7],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '"' => [0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        _ => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
    }
}

fn put_pixel(fb: &mut [u32], x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 || x >= SCREEN_WIDTH as i32 || y >= SCREEN_HEIGHT as i32 {
        return;
    }
    fb[y as usize * SCREEN_WIDTH + x as usize] = color;
}

/// Pixel width of `text` at `scale`
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        0
    } else {
        (n * ADVANCE - 1) * scale
    }
}

/// Draw `text` with its top-left corner at (x, y)
pub fn draw_text(fb: &mut [u32], x: i32, y: i32, text: &str, scale: i32, color: u32) {
    let mut cx = x;
    for ch in text.chars() {
        let rows = glyph(ch);
        for (gy, bits) in rows.iter().enumerate() {
            for gx in 0..GLYPH_WIDTH {
                if bits & (0x10 >> gx) == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        put_pixel(fb, cx + gx * scale + sx, y + gy as i32 * scale + sy, color);
                    }
                }
            }
        }
        cx += ADVANCE * scale;
    }
}

/// Filled rectangle
pub fn draw_rect(fb: &mut [u32], x: i32, y: i32, w: i32, h: i32, color: u32) {
    for py in y..y + h {
        for px in x..x + w {
            put_pixel(fb, px, py, color);
        }
    }
}

/// Rectangle outline `thickness` pixels wide, drawn inside the bounds
pub fn draw_rect_outline(fb: &mut [u32], x: i32, y: i32, w: i32, h: i32, thickness: i32, color: u32) {
    let t = thickness.min(w / 2).min(h / 2).max(1);
    draw_rect(fb, x, y, w, t, color);
    draw_rect(fb, x, y + h - t, w, t, color);
    draw_rect(fb, x, y, t, h, color);
    draw_rect(fb, x + w - t, y, t, h, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Vec<u32> {
        vec![0; SCREEN_WIDTH * SCREEN_HEIGHT]
    }

    fn at(fb: &[u32], x: usize, y: usize) -> u32 {
        fb[y * SCREEN_WIDTH + x]
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 1), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("AB", 2), 22);
    }

    #[test]
    fn test_lowercase_renders_as_uppercase() {
        assert_eq!(glyph('m'), glyph('M'));
    }

    #[test]
    fn test_draw_letter_t() {
        let mut fb = blank();
        draw_text(&mut fb, 10, 10, "T", 1, 0xFFFFFFFF);
        // top bar spans the glyph, stem is the middle column
        assert_eq!(at(&fb, 10, 10), 0xFFFFFFFF);
        assert_eq!(at(&fb, 14, 10), 0xFFFFFFFF);
        assert_eq!(at(&fb, 12, 16), 0xFFFFFFFF);
        assert_eq!(at(&fb, 10, 16), 0);
    }

    #[test]
    fn test_drawing_is_clipped() {
        let mut fb = blank();
        draw_text(&mut fb, -3, -3, "HELLO", 2, 0xFF00FF00);
        draw_rect(&mut fb, 470, 470, 50, 50, 0xFF0000FF);
        assert_eq!(at(&fb, 479, 479), 0xFF0000FF);
    }

    #[test]
    fn test_outline_leaves_inside_empty() {
        let mut fb = blank();
        draw_rect_outline(&mut fb, 0, 0, 20, 20, 3, 0xFF000001);
        assert_eq!(at(&fb, 2, 10), 0xFF000001);
        assert_eq!(at(&fb, 10, 10), 0);
    }
}
