//! Procedural renderer for the application icon: a circular badge holding a
//! stylized checklist and an "add" button. The same raster is used for the
//! window icon at startup and written to `todoapp.png` by the `create_icon`
//! binary.

use image::{Rgba, RgbaImage};
use std::path::Path;

pub const ICON_SIZE: u32 = 128;
pub const OUTPUT_NAME: &str = "todoapp.png";

pub const BADGE_FILL: Rgba<u8> = Rgba([0x4A, 0x90, 0xE2, 0xFF]);
const BADGE_OUTLINE: Rgba<u8> = Rgba([0x2E, 0x5C, 0x8A, 0xFF]);
const PAPER_OUTLINE: Rgba<u8> = Rgba([0xE0, 0xE0, 0xE0, 0xFF]);
pub const INK: Rgba<u8> = Rgba([0x33, 0x33, 0x33, 0xFF]);
const CHECKED_FILL: Rgba<u8> = Rgba([0x4C, 0xAF, 0x50, 0xFF]);
const CHECKED_OUTLINE: Rgba<u8> = Rgba([0x2E, 0x7D, 0x32, 0xFF]);
const UNCHECKED_OUTLINE: Rgba<u8> = Rgba([0x66, 0x66, 0x66, 0xFF]);
const ADD_FILL: Rgba<u8> = Rgba([0xFF, 0x57, 0x22, 0xFF]);
const ADD_OUTLINE: Rgba<u8> = Rgba([0xD3, 0x2F, 0x2F, 0xFF]);
pub const WHITE: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);

/// Renders the 128x128 RGBA icon on a fully transparent canvas. Every shape
/// uses literal coordinates, so two calls produce identical rasters.
pub fn render_icon() -> RgbaImage {
    let mut image = RgbaImage::new(ICON_SIZE, ICON_SIZE);

    // Background badge
    ellipse(&mut image, (4, 4, 124, 124), Some(BADGE_FILL), Some((BADGE_OUTLINE, 4)));

    // Checklist paper
    rect(&mut image, (28, 24, 100, 96), Some(WHITE), Some((PAPER_OUTLINE, 2)));

    // Header rule
    line(&mut image, (36, 36), (92, 36), INK, 3);

    // First row: completed item with a checkmark
    rect(&mut image, (36, 46, 44, 54), Some(CHECKED_FILL), Some((CHECKED_OUTLINE, 1)));
    line(&mut image, (38, 50), (40, 52), WHITE, 2);
    line(&mut image, (40, 52), (42, 48), WHITE, 2);
    line(&mut image, (48, 50), (84, 50), INK, 2);

    // Second row
    rect(&mut image, (36, 60, 44, 68), Some(WHITE), Some((UNCHECKED_OUTLINE, 1)));
    line(&mut image, (48, 64), (84, 64), INK, 2);

    // Third row
    rect(&mut image, (36, 74, 44, 82), Some(WHITE), Some((UNCHECKED_OUTLINE, 1)));
    line(&mut image, (48, 78), (80, 78), INK, 2);

    // Add button with a plus sign
    ellipse(&mut image, (74, 82, 86, 94), Some(ADD_FILL), Some((ADD_OUTLINE, 1)));
    line(&mut image, (77, 88), (83, 88), WHITE, 2);
    line(&mut image, (80, 85), (80, 91), WHITE, 2);

    image
}

/// Renders the icon and writes it as a PNG to `path`. Overwrites silently.
pub fn save_icon(path: &Path) -> Result<(), image::ImageError> {
    render_icon().save(path)
}

// The shape helpers below take inclusive bounding boxes. The outline is drawn
// inward from the boundary, the fill covers everything inside it.

fn ellipse(
    image: &mut RgbaImage,
    (x0, y0, x1, y1): (u32, u32, u32, u32),
    fill: Option<Rgba<u8>>,
    outline: Option<(Rgba<u8>, u32)>,
) {
    let cx = (x0 + x1) as f32 / 2.0;
    let cy = (y0 + y1) as f32 / 2.0;
    let a = (x1 - x0) as f32 / 2.0;
    let b = (y1 - y0) as f32 / 2.0;

    for y in y0..=y1.min(image.height() - 1) {
        for x in x0..=x1.min(image.width() - 1) {
            let dx = (x as f32 - cx) / a;
            let dy = (y as f32 - cy) / b;
            let t = (dx * dx + dy * dy).sqrt();
            if t > 1.0 {
                continue;
            }
            match outline {
                Some((color, width)) if t > 1.0 - width as f32 / a.min(b) => {
                    image.put_pixel(x, y, color);
                }
                _ => {
                    if let Some(color) = fill {
                        image.put_pixel(x, y, color);
                    }
                }
            }
        }
    }
}

fn rect(
    image: &mut RgbaImage,
    (x0, y0, x1, y1): (u32, u32, u32, u32),
    fill: Option<Rgba<u8>>,
    outline: Option<(Rgba<u8>, u32)>,
) {
    for y in y0..=y1.min(image.height() - 1) {
        for x in x0..=x1.min(image.width() - 1) {
            match outline {
                Some((color, width))
                    if x < x0 + width || x > x1 - width || y < y0 + width || y > y1 - width =>
                {
                    image.put_pixel(x, y, color);
                }
                _ => {
                    if let Some(color) = fill {
                        image.put_pixel(x, y, color);
                    }
                }
            }
        }
    }
}

fn line(image: &mut RgbaImage, (x0, y0): (u32, u32), (x1, y1): (u32, u32), color: Rgba<u8>, width: u32) {
    let (ax, ay) = (x0 as f32, y0 as f32);
    let (bx, by) = (x1 as f32, y1 as f32);
    let half = width as f32 / 2.0;
    let pad = width; // scan a box around the segment wide enough for the stroke

    let min_x = x0.min(x1).saturating_sub(pad);
    let max_x = (x0.max(x1) + pad).min(image.width() - 1);
    let min_y = y0.min(y1).saturating_sub(pad);
    let max_y = (y0.max(y1) + pad).min(image.height() - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if segment_distance(x as f32, y as f32, ax, ay, bx, by) <= half {
                image.put_pixel(x, y, color);
            }
        }
    }
}

// Distance from (px, py) to the segment (ax, ay)-(bx, by).
fn segment_distance(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (nx, ny) = (ax + t * dx - px, ay + t * dy - py);
    (nx * nx + ny * ny).sqrt()
}
