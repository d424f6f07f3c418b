extern crate embed_resource;
extern crate ico;
extern crate image;

use ico::{IconDir, IconImage};
use image::{ImageBuffer, Rgba};
use std::fs::File;
use std::io::BufWriter;

// Renders a flat 64x64 variant of the checklist badge and embeds it as the
// Windows executable icon. The full-detail 128x128 icon lives in src/icon.rs.
fn main() {
    let mut image = ImageBuffer::new(64, 64);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f32 - 32.0;
        let dy = y as f32 - 32.0;
        let distance_from_center = (dx * dx + dy * dy).sqrt();

        *pixel = Rgba([0, 0, 0, 0]);

        if distance_from_center < 28.0 {
            let on_paper = x >= 18 && x <= 46 && y >= 14 && y <= 50;
            let on_rule = x >= 22 && x <= 42 && ((y >= 22 && y < 25) || (y >= 31 && y < 34) || (y >= 40 && y < 43));
            if on_paper {
                if on_rule {
                    *pixel = Rgba([0x33, 0x33, 0x33, 255]);
                } else {
                    *pixel = Rgba([255, 255, 255, 255]);
                }
            } else {
                *pixel = Rgba([0x4A, 0x90, 0xE2, 255]);
            }
        }

        if distance_from_center >= 26.0 && distance_from_center < 28.0 {
            *pixel = Rgba([0x2E, 0x5C, 0x8A, 255]);
        }
    }

    let icon_image = IconImage::from_rgba_data(64, 64, image.into_raw());
    let mut icon_dir = IconDir::new(ico::ResourceType::Icon);
    icon_dir.add_entry(ico::IconDirEntry::encode(&icon_image).unwrap());
    let file = BufWriter::new(File::create("icon.ico").unwrap());
    icon_dir.write(file).unwrap();

    let _ = embed_resource::compile("todoapp.rc", std::iter::empty::<&str>());
}
