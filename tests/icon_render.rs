use std::fs;
use std::path::PathBuf;
use todoapp::icon::{self, BADGE_FILL, ICON_SIZE, INK, WHITE};

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("todoapp-icon-{}-{name}", std::process::id()))
}

#[test]
fn canvas_has_the_fixed_dimensions() {
    let image = icon::render_icon();
    assert_eq!(image.width(), ICON_SIZE);
    assert_eq!(image.height(), ICON_SIZE);
}

#[test]
fn background_stays_transparent_outside_the_badge() {
    let image = icon::render_icon();
    for (x, y) in [(0, 0), (127, 0), (0, 127), (127, 127)] {
        assert_eq!(image.get_pixel(x, y).0[3], 0, "corner ({x}, {y}) should be transparent");
    }
}

#[test]
fn badge_fill_covers_the_inside_of_the_rim() {
    let image = icon::render_icon();
    // Left of the paper and above it, well inside the outline.
    assert_eq!(*image.get_pixel(14, 64), BADGE_FILL);
    assert_eq!(*image.get_pixel(64, 14), BADGE_FILL);
}

#[test]
fn center_lands_on_the_checklist() {
    let image = icon::render_icon();
    // The second row's text rule runs through (64, 64); the paper shows
    // just above it.
    let center = *image.get_pixel(64, 64);
    assert_eq!(center.0[3], 255, "center must be opaque");
    assert_eq!(center, INK);
    assert_eq!(*image.get_pixel(64, 58), WHITE);
}

#[test]
fn rendering_is_deterministic() {
    let first = icon::render_icon();
    let second = icon::render_icon();
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn saved_png_decodes_back_to_the_same_raster() {
    let path = temp_file("roundtrip.png");
    icon::save_icon(&path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (ICON_SIZE, ICON_SIZE));
    assert_eq!(decoded.as_raw(), icon::render_icon().as_raw());

    fs::remove_file(&path).ok();
}
