use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::Result;
use crate::models::{ActivityState, Color, Palette};

pub const GRID_LINE: Color = Color::rgb(0xd0, 0xd0, 0xd0);
pub const INK: Color = Color::rgb(0x33, 0x33, 0x33);

/// Fills a rectangle, clipped to the image.
pub fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Color) {
    let (img_w, img_h) = img.dimensions();
    let pixel = color.to_rgba();
    for py in y..(y + h).min(img_h) {
        for px in x..(x + w).min(img_w) {
            img.put_pixel(px, py, pixel);
        }
    }
}

/// One-pixel outline, clipped to the image.
pub fn stroke_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Color) {
    if w == 0 || h == 0 {
        return;
    }
    fill_rect(img, x, y, w, 1, color);
    fill_rect(img, x, y + h - 1, w, 1, color);
    fill_rect(img, x, y, 1, h, color);
    fill_rect(img, x + w - 1, y, 1, h, color);
}

/// Row of bordered swatches, one per state in legend order. Returns the
/// height used.
pub fn draw_legend(img: &mut RgbaImage, x: u32, y: u32, swatch: u32, palette: &Palette) -> u32 {
    let gap = swatch / 2;
    for (i, state) in ActivityState::ALL.iter().enumerate() {
        let sx = x + i as u32 * (swatch + gap);
        fill_rect(img, sx, y, swatch, swatch, palette.color(*state));
        stroke_rect(img, sx, y, swatch, swatch, INK);
    }
    swatch
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
