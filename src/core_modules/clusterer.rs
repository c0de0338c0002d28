// THEORY:
// The `clusterer` merges exact-color buckets into tolerance-based groups.
// It is a greedy, order-dependent pass rather than a metric clustering:
// there is no reassignment and no centroid recomputation, and
// the result depends on the extractor's scan order. That approximation is an
// accepted part of the observable contract; substituting a "more correct"
// algorithm (k-means and friends) would change group counts and ordering.
//
// Key architectural principles:
// 1.  **First Qualifying Group Wins**: Each bucket is tested against the
//     base colors of already-created groups in creation order, and joins the
//     first one within tolerance. Ties always resolve to the earliest group.
// 2.  **Founding Colors Only**: Distance is always measured against the
//     group's founding color, never against an average of its members, so a
//     group's identity is stable from the moment it is created.
// 3.  **Linear Scan**: O(G) per bucket with no spatial index. G stays small
//     for palette-like input, which is the only input this tool targets.

use crate::core_modules::color_extractor::ColorBucket;
use crate::core_modules::color_group::ColorGroup;

/// A non-negative grouping tolerance, compared in squared-distance space.
pub type Tolerance = u32;

/// Coerces an externally supplied tolerance into its valid domain.
/// Negative values fall back to 0 rather than being rejected.
pub fn coerce_tolerance(raw: i64) -> Tolerance {
    raw.clamp(0, i64::from(Tolerance::MAX)) as Tolerance
}

/// Merges exact-color buckets into groups whose base colors are at most
/// `tolerance` apart (Euclidean, compared squared). Bucket order is
/// preserved into group-creation order, which makes the output exactly
/// reproducible for a fixed input order and tolerance.
pub fn cluster_colors(buckets: Vec<ColorBucket>, tolerance: Tolerance) -> Vec<ColorGroup> {
    if tolerance == 0 {
        // Fast path: a zero distance only ever matches an identical color,
        // and the extractor has already merged identical colors, so every
        // bucket founds its own group.
        return buckets
            .into_iter()
            .map(|bucket| ColorGroup {
                base_color: bucket.color,
                pixels: bucket.pixels,
            })
            .collect();
    }

    let tolerance_sq = u64::from(tolerance) * u64::from(tolerance);
    let mut groups: Vec<ColorGroup> = Vec::new();

    for bucket in buckets {
        let qualifying = groups
            .iter_mut()
            .find(|group| group.base_color.distance_squared(&bucket.color) <= tolerance_sq);

        match qualifying {
            Some(group) => group.pixels.extend(bucket.pixels),
            None => groups.push(ColorGroup {
                base_color: bucket.color,
                pixels: bucket.pixels,
            }),
        }
    }

    groups
}
