// THEORY:
// The `color_extractor` is the first stage of the conversion pipeline. It
// transforms the raw RGBA buffer into the pipeline's working representation:
// an ordered collection of exact-color buckets, each carrying every visible
// pixel of that color.
//
// Key architectural principles:
// 1.  **Row-Major, First-Seen Order**: The buffer is scanned row by row and
//     a bucket is created the first time its color appears. That ordering is
//     load-bearing: the clusterer is greedy and order-dependent, so the
//     extractor's output order is part of the observable contract.
// 2.  **Binary Visibility**: A pixel participates iff its alpha channel is
//     nonzero. Any nonzero alpha counts as fully opaque; there is no
//     blending or partial-transparency handling anywhere downstream.
// 3.  **Stateless Utility**: A pure function of the buffer. All state lives
//     in the returned collection.

use crate::core_modules::color::Color;
use crate::core_modules::pixel_buffer::{CHANNELS, PixelBuffer, Point};
use std::collections::HashMap;

/// One exact color and every visible pixel that carries it, in scan order.
#[derive(Debug, Clone)]
pub struct ColorBucket {
    pub color: Color,
    pub pixels: Vec<Point>,
}

/// Scans the buffer in row-major order and buckets visible pixels by exact
/// color. Bucket order is first-occurrence order; an all-transparent buffer
/// yields an empty collection.
pub fn extract_colors(buffer: &PixelBuffer) -> Vec<ColorBucket> {
    let width = buffer.width();
    let mut buckets: Vec<ColorBucket> = Vec::new();
    let mut slots: HashMap<Color, usize> = HashMap::new();

    for (index, sample) in buffer.data().chunks_exact(CHANNELS).enumerate() {
        let alpha = sample[3];
        if alpha == 0 {
            continue;
        }

        let color = Color::new(sample[0], sample[1], sample[2]);
        let point = Point {
            x: index as u32 % width,
            y: index as u32 / width,
        };

        match slots.get(&color) {
            Some(&slot) => buckets[slot].pixels.push(point),
            None => {
                slots.insert(color, buckets.len());
                buckets.push(ColorBucket {
                    color,
                    pixels: vec![point],
                });
            }
        }
    }

    buckets
}
