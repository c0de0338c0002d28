// THEORY:
// The `color_map` module renders a diagnostic view of the clustering result:
// each group's pixels are painted in a synthetic hue derived from the
// group's rank, so neighboring ranks land far apart on the hue wheel and
// merged regions are easy to spot by eye. The golden-angle stride is what
// keeps consecutive indices visually distinct no matter how many groups
// exist.

use crate::core_modules::color_group::ColorGroup;
use crate::core_modules::pixel_buffer::CHANNELS;

const GOLDEN_ANGLE_DEGREES: f64 = 137.5;
const MAP_SATURATION: f64 = 0.8;
const MAP_LIGHTNESS: f64 = 0.6;

/// The synthetic RGB color assigned to a group rank.
pub fn group_color(index: usize) -> [u8; 3] {
    let hue = (index as f64 * GOLDEN_ANGLE_DEGREES) % 360.0;
    hsl_to_rgb(hue / 360.0, MAP_SATURATION, MAP_LIGHTNESS)
}

/// Paints every group's pixels in its rank color over a transparent canvas
/// of the given dimensions. Pixels belonging to no group (transparent in the
/// source) stay fully transparent.
pub fn render_group_map(groups: &[ColorGroup], width: u32, height: u32) -> Vec<u8> {
    let mut out = vec![0u8; width as usize * height as usize * CHANNELS];
    for (index, group) in groups.iter().enumerate() {
        let color = group_color(index);
        for point in &group.pixels {
            let offset = (point.y * width + point.x) as usize * CHANNELS;
            out[offset] = color[0];
            out[offset + 1] = color[1];
            out[offset + 2] = color[2];
            out[offset + 3] = 255;
        }
    }
    out
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return [v, v, v];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> u8 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    let value = if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    };
    (value * 255.0).round() as u8
}
