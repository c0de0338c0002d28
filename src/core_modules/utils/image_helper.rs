// THEORY:
// The `image_helper` is the pipeline's only contact with image files. It
// keeps the `image` crate usage in one place: decoding an input into the
// capped square RGBA buffer the extractor expects, and encoding raw RGBA
// bytes back out as PNG for the pattern and group-map artifacts. Everything
// else in the crate works on plain byte vectors.

use crate::core_modules::pixel_buffer::MAX_DIMENSION;
use image::ImageEncoder;
use image::imageops::FilterType;
use std::fs::File;
use std::path::Path;

/// Decodes an image and stretches it onto a square of side
/// min(max(width, height), MAX_DIMENSION) with nearest-neighbor filtering,
/// the resize contract the pipeline's callers are responsible for. Returns
/// the square's dimensions plus the raw RGBA bytes.
pub fn load_rgba_capped(path: &Path) -> Result<(u32, u32, Vec<u8>), image::ImageError> {
    let rgba = image::open(path)?.to_rgba8();
    let (source_width, source_height) = rgba.dimensions();
    let side = source_width.max(source_height).min(MAX_DIMENSION);
    // Nearest keeps pixel-art edges hard; smoothing would invent colors the
    // clusterer has to chase.
    let resized = image::imageops::resize(&rgba, side, side, FilterType::Nearest);
    Ok((side, side, resized.into_raw()))
}

/// Encodes a raw RGBA buffer as a PNG file.
pub fn save_rgba(
    path: &Path,
    width: u32,
    height: u32,
    buffer: &[u8],
) -> Result<(), image::ImageError> {
    let output = File::create(path)?;
    let encoder = image::codecs::png::PngEncoder::new(output);
    encoder.write_image(buffer, width, height, image::ExtendedColorType::Rgba8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn save_then_load_round_trips_a_small_buffer() {
        let path = temp_path("pixel_forge_roundtrip.png");
        let width = 2u32;
        let height = 2u32;
        let buffer = vec![
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            0, 0, 0, 0,
        ];

        save_rgba(&path, width, height, &buffer).expect("error saving file");
        let (w, h, loaded) = load_rgba_capped(&path).expect("error loading file");
        assert_eq!((w, h), (2, 2));
        assert_eq!(loaded, buffer);
    }

    #[test]
    fn oversized_images_are_squashed_to_the_cap() {
        let path = temp_path("pixel_forge_oversized.png");
        let side = MAX_DIMENSION * 2;
        let buffer = vec![128u8; (side * side * 4) as usize];

        save_rgba(&path, side, side, &buffer).expect("error saving file");
        let (w, h, loaded) = load_rgba_capped(&path).expect("error loading file");
        assert_eq!((w, h), (MAX_DIMENSION, MAX_DIMENSION));
        assert_eq!(loaded.len(), (MAX_DIMENSION * MAX_DIMENSION * 4) as usize);
    }

    #[test]
    fn non_square_images_are_stretched_onto_a_square() {
        let path = temp_path("pixel_forge_stretch.png");
        let buffer = vec![10u8; 4 * 2 * 4];

        save_rgba(&path, 4, 2, &buffer).expect("error saving file");
        let (w, h, _) = load_rgba_capped(&path).expect("error loading file");
        assert_eq!((w, h), (4, 4));
    }
}
