// THEORY:
// The `pattern` module renders the silhouette texture the generated model
// samples from: every visible pixel becomes opaque white and everything else
// stays fully transparent. Because each element's faces tint the texture by
// group, a plain white texel is exactly what lets the tint come through
// unchanged.

use crate::core_modules::pixel_buffer::{CHANNELS, PixelBuffer};

const WHITE: [u8; CHANNELS] = [255, 255, 255, 255];

/// Produces an RGBA byte vector of the buffer's dimensions with opaque white
/// wherever the source has nonzero alpha and full transparency elsewhere.
pub fn render_pattern(buffer: &PixelBuffer) -> Vec<u8> {
    let mut out = vec![0u8; buffer.data().len()];
    for (source, target) in buffer
        .data()
        .chunks_exact(CHANNELS)
        .zip(out.chunks_exact_mut(CHANNELS))
    {
        if source[3] > 0 {
            target.copy_from_slice(&WHITE);
        }
    }
    out
}
