//! Game engine: minifb window, key mapping, drawing and the game loop.
//!
//! Uses a 480×480 pixel framebuffer with 32-bit ARGB pixels; minifb scales
//! it to the window.

pub mod font;
pub mod sound_engine;

use std::time::Instant;

use anyhow::Result;
use littleroot_world::{
    names, Direction, DrawRequest, GameSession, Intent, Point, Rect, SCREEN_HEIGHT as CORE_HEIGHT,
    SCREEN_WIDTH as CORE_WIDTH,
};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::assets::bitmap::DecodedBitmap;
use crate::assets::AssetStore;
use sound_engine::SoundEngine;

pub const SCREEN_WIDTH: usize = CORE_WIDTH as usize;
pub const SCREEN_HEIGHT: usize = CORE_HEIGHT as usize;

const BLACK: u32 = 0xFF000000;
const WHITE: u32 = 0xFFFFFFFF;

/// Frame pacing after a stall (window drag, breakpoint) is capped
const MAX_FRAME_MS: u32 = 250;

/// Runtime settings taken from the config and command line
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub scale: usize,
    pub fps: usize,
    pub audio: bool,
    /// Playback gain, 0.0 to 1.0
    pub volume: f32,
}

/// Run the game until the window is closed or Escape is pressed
pub fn run(mut session: GameSession, assets: AssetStore, settings: EngineSettings) -> Result<()> {
    let mut sound = if settings.audio { SoundEngine::new() } else { None };
    if let Some(s) = &mut sound {
        s.set_volume(settings.volume);
    }

    let options = WindowOptions {
        resize: true,
        scale_mode: minifb::ScaleMode::AspectRatioStretch,
        ..Default::default()
    };
    let mut window = Window::new(
        "Littleroot",
        SCREEN_WIDTH * settings.scale,
        SCREEN_HEIGHT * settings.scale,
        options,
    )
    .map_err(|e| anyhow::anyhow!("Window creation failed: {}", e))?;
    window.set_target_fps(settings.fps);

    tracing::info!("Engine initialized, entering game loop");
    tracing::info!("Controls: arrows=move | Space=talk | I=inventory | X=close | PgUp/PgDn=volume | Esc=quit");

    let mut framebuffer = vec![BLACK; SCREEN_WIDTH * SCREEN_HEIGHT];
    let mut last = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt_ms = (now.duration_since(last).as_millis() as u32).min(MAX_FRAME_MS);
        last = now;

        for key in window.get_keys_pressed(KeyRepeat::No) {
            if let Some(s) = &mut sound {
                match key {
                    Key::PageUp => s.set_volume(s.volume() + 0.1),
                    Key::PageDown => s.set_volume(s.volume() - 0.1),
                    _ => {}
                }
            }
            for intent in key_intents(key) {
                session.key_down(intent);
            }
        }
        for key in window.get_keys_released() {
            for intent in key_intents(key) {
                session.key_up(intent);
            }
        }

        let frame = session.tick(dt_ms);

        framebuffer.fill(BLACK);
        for request in &frame.draws {
            draw_request(&mut framebuffer, request, &assets);
        }

        if let Some(s) = &mut sound {
            for cue in &frame.audio {
                s.play_cue(cue, &assets);
            }
            s.gc();
        }

        window
            .update_with_buffer(&framebuffer, SCREEN_WIDTH, SCREEN_HEIGHT)
            .map_err(|e| anyhow::anyhow!("Display error: {}", e))?;
    }

    if let Some(s) = &mut sound {
        s.stop_all();
    }
    tracing::info!("Engine shutdown");
    Ok(())
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Intents produced by one key. Letter keys always also type their
/// character so name entry sees every letter.
fn key_intents(key: Key) -> Vec<Intent> {
    let command = match key {
        Key::Up => Some(Intent::Move(Direction::Up)),
        Key::Down => Some(Intent::Move(Direction::Down)),
        Key::Left => Some(Intent::Move(Direction::Left)),
        Key::Right => Some(Intent::Move(Direction::Right)),
        Key::Space | Key::Enter => Some(Intent::Confirm),
        Key::Backspace => Some(Intent::Erase),
        Key::I => Some(Intent::Inventory),
        Key::X => Some(Intent::Close),
        _ => None,
    };
    key_to_char(key)
        .map(Intent::Char)
        .into_iter()
        .chain(command)
        .collect()
}

/// Convert minifb Key to ASCII char for name entry
fn key_to_char(key: Key) -> Option<char> {
    let ch = match key {
        Key::A => 'a', Key::B => 'b', Key::C => 'c', Key::D => 'd',
        Key::E => 'e', Key::F => 'f', Key::G => 'g', Key::H => 'h',
        Key::I => 'i', Key::J => 'j', Key::K => 'k', Key::L => 'l',
        Key::M => 'm', Key::N => 'n', Key::O => 'o', Key::P => 'p',
        Key::Q => 'q', Key::R => 'r', Key::S => 's', Key::T => 't',
        Key::U => 'u', Key::V => 'v', Key::W => 'w', Key::X => 'x',
        Key::Y => 'y', Key::Z => 'z',
        Key::Key0 | Key::NumPad0 => '0',
        Key::Key1 | Key::NumPad1 => '1',
        Key::Key2 | Key::NumPad2 => '2',
        Key::Key3 | Key::NumPad3 => '3',
        Key::Key4 | Key::NumPad4 => '4',
        Key::Key5 | Key::NumPad5 => '5',
        Key::Key6 | Key::NumPad6 => '6',
        Key::Key7 | Key::NumPad7 => '7',
        Key::Key8 | Key::NumPad8 => '8',
        Key::Key9 | Key::NumPad9 => '9',
        _ => return None,
    };
    Some(ch)
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Dialogue box centre and text rows
const TEXTBOX_CENTER: Point = Point::new(240, 400);
const TEXT_X: i32 = 30;
const TEXT_ROWS: [i32; 2] = [383, 408];

/// Side panel used by the inventory and the shop
const PANEL: Rect = Rect::new(300, 20, 160, 440);
const PANEL_BORDER: i32 = 6;
const PANEL_ROW_HEIGHT: i32 = 20;
const PANEL_FIRST_ROW: i32 = 63;

fn draw_request(fb: &mut [u32], request: &DrawRequest, assets: &AssetStore) {
    match request {
        DrawRequest::Image { image, src, dst } => match assets.image(image) {
            Some(bmp) => blit_scaled(fb, bmp, *src, *dst),
            None => tracing::trace!("Image '{}' not loaded", image),
        },
        DrawRequest::DialogueBox { lines } => {
            if let Some(bmp) = assets.image(names::TEXTBOX) {
                let dst = Rect::centered(TEXTBOX_CENTER, bmp.width as i32, bmp.height as i32);
                let src = Rect::new(0, 0, dst.width, dst.height);
                blit_scaled(fb, bmp, src, dst);
            }
            for (line, y) in lines.iter().zip(TEXT_ROWS) {
                if let Some(text) = line {
                    font::draw_text(fb, TEXT_X, y, text, 1, BLACK);
                }
            }
        }
        DrawRequest::NameEntry { text } => {
            font::draw_text(fb, TEXT_X, TEXT_ROWS[0], text, 1, BLACK);
        }
        DrawRequest::Inventory { rows } => {
            draw_panel(fb, "INVENTORY:", rows, 430);
        }
        DrawRequest::Shop { rows, cursor } => {
            draw_panel(fb, "MART:", rows, 415);
            let y = PANEL_FIRST_ROW - 8 + *cursor as i32 * PANEL_ROW_HEIGHT;
            font::draw_rect_outline(fb, PANEL.x + 10, y, 140, PANEL_ROW_HEIGHT, 2, BLACK);
        }
        DrawRequest::Hud { text, at } => {
            font::draw_text(fb, at.x, at.y - font::GLYPH_HEIGHT, text, 1, WHITE);
        }
    }
}

fn draw_panel(fb: &mut [u32], title: &str, rows: &[(String, u32)], value_x: i32) {
    font::draw_rect(fb, PANEL.x, PANEL.y, PANEL.width, PANEL.height, WHITE);
    font::draw_rect_outline(fb, PANEL.x, PANEL.y, PANEL.width, PANEL.height, PANEL_BORDER, BLACK);
    font::draw_text(fb, PANEL.x + 10, PANEL.y + 14, title, 2, BLACK);
    for (i, (name, value)) in rows.iter().enumerate() {
        let y = PANEL_FIRST_ROW + i as i32 * PANEL_ROW_HEIGHT;
        font::draw_text(fb, PANEL.x + 14, y, name, 1, BLACK);
        font::draw_text(fb, value_x, y, &value.to_string(), 1, BLACK);
    }
}

/// Blit `src` of an RGBA bitmap into `dst` on the framebuffer, scaling
/// with nearest-neighbour sampling and alpha blending.
fn blit_scaled(fb: &mut [u32], bmp: &DecodedBitmap, src: Rect, dst: Rect) {
    if dst.width <= 0 || dst.height <= 0 || src.width <= 0 || src.height <= 0 {
        return;
    }

    let x0 = dst.x.max(0);
    let y0 = dst.y.max(0);
    let x1 = (dst.x + dst.width).min(SCREEN_WIDTH as i32);
    let y1 = (dst.y + dst.height).min(SCREEN_HEIGHT as i32);

    for dy in y0..y1 {
        let sy = src.y + (dy - dst.y) * src.height / dst.height;
        for dx in x0..x1 {
            let sx = src.x + (dx - dst.x) * src.width / dst.width;
            let Some([r, g, b, a]) = bmp.pixel(sx, sy) else {
                continue;
            };
            if a == 0 {
                continue; // Fully transparent
            }
            let (r, g, b, a) = (r as u32, g as u32, b as u32, a as u32);
            let dst_idx = dy as usize * SCREEN_WIDTH + dx as usize;

            if a >= 255 {
                fb[dst_idx] = 0xFF000000 | (r << 16) | (g << 8) | b;
            } else {
                let d = fb[dst_idx];
                let inv_a = 255 - a;
                let out_r = (r * a + ((d >> 16) & 0xFF) * inv_a) / 255;
                let out_g = (g * a + ((d >> 8) & 0xFF) * inv_a) / 255;
                let out_b = (b * a + (d & 0xFF) * inv_a) / 255;
                fb[dst_idx] = 0xFF000000 | (out_r << 16) | (out_g << 8) | out_b;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::bitmap::placeholder;

    #[test]
    fn test_letter_keys_type_and_command() {
        assert_eq!(key_intents(Key::I), vec![Intent::Char('i'), Intent::Inventory]);
        assert_eq!(key_intents(Key::M), vec![Intent::Char('m')]);
        assert_eq!(key_intents(Key::Left), vec![Intent::Move(Direction::Left)]);
        assert_eq!(key_intents(Key::Space), vec![Intent::Confirm]);
        assert!(key_intents(Key::F5).is_empty());
    }

    #[test]
    fn test_blit_scales_and_clips() {
        let mut fb = vec![BLACK; SCREEN_WIDTH * SCREEN_HEIGHT];
        let bmp = placeholder(64, 64, [200, 0, 0]);
        // 64x64 source drawn at 2/3 size, partly off the left edge
        blit_scaled(&mut fb, &bmp, Rect::new(0, 0, 64, 64), Rect::new(-10, 0, 42, 42));
        assert_ne!(fb[0], BLACK);
        assert_ne!(fb[41 * SCREEN_WIDTH + 31], BLACK);
        assert_eq!(fb[42 * SCREEN_WIDTH], BLACK);
        assert_eq!(fb[32], BLACK);
    }

    #[test]
    fn test_transparent_pixels_skipped() {
        let mut fb = vec![WHITE; SCREEN_WIDTH * SCREEN_HEIGHT];
        let bmp = DecodedBitmap {
            width: 1,
            height: 1,
            pixels: vec![0, 0, 0, 0],
        };
        blit_scaled(&mut fb, &bmp, Rect::new(0, 0, 1, 1), Rect::new(5, 5, 3, 3));
        assert!(fb.iter().all(|&p| p == WHITE));
    }
}
