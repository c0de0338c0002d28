// THEORY:
// A `ColorGroup` is the unit of currency between the clustering stages and
// the document builders. Much like the extractor's buckets, it is a "dumb"
// data container: a base color plus the ordered pixels assigned to it.
//
// Key architectural principles:
// 1.  **Founding Color as Identity**: `base_color` is fixed when the group is
//     created (the first color that founded it) and is never recomputed from
//     members. It is not a centroid; recomputing it would change every
//     downstream grouping decision.
// 2.  **Partition Member**: Across a full pipeline run, every visible pixel
//     of the source buffer appears in exactly one group.

use crate::core_modules::color::Color;
use crate::core_modules::pixel_buffer::Point;

/// One cluster of visible pixels, represented by the color that founded it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGroup {
    /// The founding color. Fixed at creation; never averaged.
    pub base_color: Color,
    /// Every pixel assigned to this group, in assignment order.
    pub pixels: Vec<Point>,
}

impl ColorGroup {
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}
