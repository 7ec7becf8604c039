//! BMP decoder for the game's artwork
//!
//! Supports uncompressed Windows bitmaps:
//! - 24-bit BGR (magenta 0xFF00FF is the transparent key)
//! - 32-bit BGRA (alpha taken from the file)
//!
//! Rows may be stored bottom-up (positive height) or top-down (negative).

use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;

/// Decoded bitmap in RGBA format, ready for rendering
#[derive(Debug, Clone)]
pub struct DecodedBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
}

impl DecodedBitmap {
    /// RGBA of one pixel, or None outside the image
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[derive(Error, Debug)]
pub enum BitmapError {
    #[error("Not a BMP file (missing BM signature)")]
    Signature,

    #[error("Unsupported BMP: {0}")]
    Unsupported(String),

    #[error("Truncated BMP data: {0}")]
    Truncated(#[from] std::io::Error),
}

/// Key colour for 24-bit images
const TRANSPARENT_KEY: [u8; 3] = [0xFF, 0x00, 0xFF];

/// Largest width or height accepted from a header
pub const MAX_DIMENSION: u32 = 8192;

// ============================================================================
// Decode
// ============================================================================

pub fn decode_bmp(data: &[u8]) -> Result<DecodedBitmap, BitmapError> {
    let mut r = Cursor::new(data);

    let mut magic = [0u8; 2];
    r.read_exact(&mut magic)?;
    if &magic != b"BM" {
        return Err(BitmapError::Signature);
    }
    let _file_size = r.read_u32::<LittleEndian>()?;
    let _reserved = r.read_u32::<LittleEndian>()?;
    let pixel_offset = r.read_u32::<LittleEndian>()?;

    // BITMAPINFOHEADER (or a larger header sharing its first fields)
    let header_size = r.read_u32::<LittleEndian>()?;
    if header_size < 40 {
        return Err(BitmapError::Unsupported(format!("header size {}", header_size)));
    }
    let width = r.read_i32::<LittleEndian>()?;
    let raw_height = r.read_i32::<LittleEndian>()?;
    let _planes = r.read_u16::<LittleEndian>()?;
    let bpp = r.read_u16::<LittleEndian>()?;
    let compression = r.read_u32::<LittleEndian>()?;

    // BI_RGB = 0, BI_BITFIELDS = 3 (accepted for 32-bit with default masks)
    if compression != 0 && !(compression == 3 && bpp == 32) {
        return Err(BitmapError::Unsupported(format!("compression {}", compression)));
    }
    if bpp != 24 && bpp != 32 {
        return Err(BitmapError::Unsupported(format!("{} bits per pixel", bpp)));
    }
    if width <= 0 || raw_height == 0 {
        return Err(BitmapError::Unsupported(format!("size {}x{}", width, raw_height)));
    }

    let top_down = raw_height < 0;
    let w = width as u32;
    let h = raw_height.unsigned_abs();
    if w > MAX_DIMENSION || h > MAX_DIMENSION {
        return Err(BitmapError::Unsupported(format!("size {}x{}", w, h)));
    }
    let bytes_pp = (bpp / 8) as usize;
    // Rows are padded to 4 bytes
    let row_bytes = (w as usize * bytes_pp + 3) & !3;

    r.seek(SeekFrom::Start(pixel_offset as u64))?;
    let mut row = vec![0u8; row_bytes];
    let mut pixels = vec![0u8; w as usize * h as usize * 4];

    for file_row in 0..h as usize {
        r.read_exact(&mut row)?;
        let y = if top_down { file_row } else { h as usize - 1 - file_row };
        for x in 0..w as usize {
            let s = x * bytes_pp;
            let (b, g, rr) = (row[s], row[s + 1], row[s + 2]);
            let a = if bytes_pp == 4 {
                row[s + 3]
            } else if [rr, g, b] == TRANSPARENT_KEY {
                0
            } else {
                255
            };
            let px = (y * w as usize + x) * 4;
            pixels[px..px + 4].copy_from_slice(&[rr, g, b, a]);
        }
    }

    Ok(DecodedBitmap {
        width: w,
        height: h,
        pixels,
    })
}

// ============================================================================
// Placeholder
// ============================================================================

/// Stand-in for missing artwork: a checkerboard of `rgb` and a darker shade,
/// with a one-pixel frame so the image bounds are visible.
pub fn placeholder(width: u32, height: u32, rgb: [u8; 3]) -> DecodedBitmap {
    const CELL: u32 = 16;
    let dark = rgb.map(|c| c / 2);
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let edge = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            let c = if edge || ((x / CELL) + (y / CELL)) % 2 == 1 { dark } else { rgb };
            pixels.extend_from_slice(&[c[0], c[1], c[2], 255]);
        }
    }
    DecodedBitmap {
        width,
        height,
        pixels,
    }
}
