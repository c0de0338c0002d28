// THEORY:
// The `group_ranker` assigns each group its final position, and therefore
// its tint index, by sorting on pixel count, descending. The sort must be
// stable: groups with equal counts keep their clusterer order, so the whole
// run stays reproducible. Dominant colors ending up at low indices is a
// human-inspection nicety (the override table reads best that way) and has
// no correctness impact.

use crate::core_modules::color_group::ColorGroup;

/// Sorts groups by pixel count, descending. Ties keep their incoming order.
pub fn rank_groups(mut groups: Vec<ColorGroup>) -> Vec<ColorGroup> {
    // Vec::sort_by is stable, which is exactly the tie-break we need.
    groups.sort_by(|a, b| b.pixels.len().cmp(&a.pixels.len()));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::Color;
    use crate::core_modules::pixel_buffer::Point;

    fn group(r: u8, count: usize) -> ColorGroup {
        ColorGroup {
            base_color: Color::new(r, 0, 0),
            pixels: (0..count).map(|i| Point { x: i as u32, y: 0 }).collect(),
        }
    }

    #[test]
    fn sorts_by_descending_pixel_count() {
        let ranked = rank_groups(vec![group(1, 2), group(2, 5), group(3, 3)]);
        let counts: Vec<usize> = ranked.iter().map(ColorGroup::pixel_count).collect();
        assert_eq!(counts, vec![5, 3, 2]);
    }

    #[test]
    fn equal_counts_keep_their_incoming_order() {
        let ranked = rank_groups(vec![group(1, 2), group(2, 2), group(3, 4), group(4, 2)]);
        let reds: Vec<u8> = ranked.iter().map(|g| g.base_color.red).collect();
        assert_eq!(reds, vec![3, 1, 2, 4]);
    }
}
