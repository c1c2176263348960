//! Tiny 3×5 bitmap font for overlay text
//!
//! Covers digits, hex letters and the handful of capitals the status line
//! needs. Lowercase input is drawn as uppercase; anything else is blank.

use image::imageops;
use image::{Rgba, RgbaImage};

/// Glyph width in font pixels
pub const GLYPH_WIDTH: u32 = 3;
/// Glyph height in font pixels
pub const GLYPH_HEIGHT: u32 = 5;
/// Horizontal advance per character in font pixels
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Rows of a glyph, top to bottom; bit 2 is the leftmost column
pub fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => [0; 5],
    }
}

/// Pixel size of `text` drawn at `scale`
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return (0, 0);
    }
    ((chars * GLYPH_ADVANCE - 1) * scale, GLYPH_HEIGHT * scale)
}

/// Draw `text` with its top-left corner at `(x, y)` over a translucent backdrop
///
/// Pixels falling outside the frame are clipped.
pub fn draw_text(
    frame: &mut RgbaImage,
    text: &str,
    x: i64,
    y: i64,
    scale: u32,
    color: Rgba<u8>,
    backdrop: Rgba<u8>,
) {
    let scale = scale.max(1);
    let (width, height) = text_size(text, scale);
    if width == 0 {
        return;
    }

    let pad = scale;
    let shade = RgbaImage::from_pixel(width + 2 * pad, height + 2 * pad, backdrop);
    imageops::overlay(frame, &shade, x, y);

    let origin_x = x + i64::from(pad);
    let origin_y = y + i64::from(pad);
    for (index, c) in text.chars().enumerate() {
        let left = origin_x + i64::from(index as u32 * GLYPH_ADVANCE * scale);
        for (row, bits) in glyph(c).iter().enumerate() {
            for column in 0..GLYPH_WIDTH {
                if bits & (0b100 >> column) == 0 {
                    continue;
                }
                let px = left + i64::from(column * scale);
                let py = origin_y + i64::from(row as u32 * scale);
                fill_block(frame, px, py, scale, color);
            }
        }
    }
}

fn fill_block(frame: &mut RgbaImage, x: i64, y: i64, size: u32, color: Rgba<u8>) {
    for dy in 0..i64::from(size) {
        for dx in 0..i64::from(size) {
            let (Ok(px), Ok(py)) = (u32::try_from(x + dx), u32::try_from(y + dy)) else {
                continue;
            };
            if let Some(pixel) = frame.get_pixel_mut_checked(px, py) {
                *pixel = color;
            }
        }
    }
}
