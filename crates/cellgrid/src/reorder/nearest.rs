//! Nearest-area searches over a grid.
//!
//! Two flavours are used by the reorder search: a pixel-space search that
//! anchors a region under the pointer, and a cell-space search that relocates
//! a displaced item (or block of items) close to where it started.

use crate::{
    geom::{CellRect, Point},
    item::CellAndSpan,
    layout::GridLayout,
    occupancy::GridOccupancy,
};

use super::direction::Direction;

/// Region of up to `span_x` × `span_y` (and at least `min_span_x` ×
/// `min_span_y`) whose anchor cell lies closest to `pixel`.
///
/// With `occupied` set, only vacant regions qualify and each candidate grows
/// towards the requested span, alternating X then Y, until it hits an occupied
/// cell or the grid edge. A candidate lying inside an earlier one is skipped,
/// and a candidate that covers the current best replaces it outright.
///
/// Without `occupancy` every anchor qualifies at the full span; ties go to the
/// later candidate in row-major order.
pub fn find_nearest_area(
    layout: &GridLayout,
    occupied: Option<&GridOccupancy>,
    pixel: Point,
    min_span_x: i32,
    min_span_y: i32,
    span_x: i32,
    span_y: i32,
) -> Option<CellAndSpan> {
    if min_span_x <= 0 || min_span_y <= 0 || span_x < min_span_x || span_y < min_span_y {
        return None;
    }
    // Without occupancy the region never grows, so search at the full span.
    let (min_span_x, min_span_y) = match occupied {
        Some(_) => (min_span_x, min_span_y),
        None => (span_x, span_y),
    };

    // The pointer marks the centre of the dragged region; compare against the
    // centre of its top-left cell instead. The offset assumes the region has no
    // zero-width seam column inside it. Regions that do can never be placed, so
    // only their rank among tied anchors is affected.
    let m = layout.metrics();
    let rel_x = (pixel.x as f32 - (m.stride_x() * (span_x - 1)) as f32 / 2.0) as i32;
    let rel_y = (pixel.y as f32 - (m.stride_y() * (span_y - 1)) as f32 / 2.0) as i32;

    let count_x = layout.count_x();
    let count_y = layout.count_y();
    let mut best: Option<CellAndSpan> = None;
    let mut best_distance = f64::MAX;
    let mut best_rect = CellRect::from_span(-1, -1, 0, 0);
    let mut valid_regions: Vec<CellRect> = Vec::new();

    for y in 0..count_y - (min_span_y - 1) {
        'anchor: for x in 0..count_x - (min_span_x - 1) {
            let (x_size, y_size) = match occupied {
                Some(occ) => {
                    for i in 0..min_span_x {
                        for j in 0..min_span_y {
                            if occ.is_occupied(x + i, y + j) {
                                continue 'anchor;
                            }
                        }
                    }
                    grow_region(occ, x, y, min_span_x, min_span_y, span_x, span_y)
                }
                None => (span_x, span_y),
            };

            let center = layout.cell_center(x, y);
            let current = CellRect::from_span(x, y, x_size, y_size);
            let contained =
                occupied.is_some() && valid_regions.iter().any(|r| r.contains(&current));
            if occupied.is_some() {
                valid_regions.push(current);
            }
            let distance = f64::hypot(f64::from(center.x - rel_x), f64::from(center.y - rel_y));
            let covers_best = occupied.is_some() && current.contains(&best_rect);

            if (distance <= best_distance && !contained) || covers_best {
                best_distance = distance;
                best = Some(CellAndSpan::new(x, y, x_size, y_size));
                best_rect = current;
            }
        }
    }
    best
}

/// Grow a vacant `min` region anchored at (`x`, `y`) towards `span`, one column
/// or row at a time.
fn grow_region(
    occ: &GridOccupancy,
    x: i32,
    y: i32,
    min_span_x: i32,
    min_span_y: i32,
    span_x: i32,
    span_y: i32,
) -> (i32, i32) {
    let count_x = occ.count_x();
    let count_y = occ.count_y();
    let mut x_size = min_span_x;
    let mut y_size = min_span_y;
    let mut inc_x = true;
    let mut hit_max_x = x_size >= span_x;
    let mut hit_max_y = y_size >= span_y;
    while !(hit_max_x && hit_max_y) {
        if inc_x && !hit_max_x {
            let col = x + x_size;
            if col > count_x - 1 || (0..y_size).any(|j| occ.is_occupied(col, y + j)) {
                hit_max_x = true;
            } else {
                x_size += 1;
            }
        } else if !hit_max_y {
            let row = y + y_size;
            if row > count_y - 1 || (0..x_size).any(|i| occ.is_occupied(x + i, row)) {
                hit_max_y = true;
            } else {
                y_size += 1;
            }
        }
        hit_max_x |= x_size >= span_x;
        hit_max_y |= y_size >= span_y;
        inc_x = !inc_x;
    }
    (x_size, y_size)
}

/// Anchor cell of the `span_x` × `span_y` region nearest to `pixel`,
/// regardless of occupancy.
#[inline]
pub fn find_nearest_area_ignore_occupied(
    layout: &GridLayout,
    pixel: Point,
    span_x: i32,
    span_y: i32,
) -> Option<CellAndSpan> {
    find_nearest_area(layout, None, pixel, span_x, span_y, span_x, span_y)
}

/// Vacant anchor for a `span_x` × `span_y` region closest (in cells) to
/// (`cell_x`, `cell_y`).
///
/// Equal distances are broken by how well the offset agrees with `direction`.
/// When `block` is given, only the cells it marks need to be vacant: this lets
/// a non-rectangular group of items move as one.
pub(super) fn nearest_free_area(
    occupied: &GridOccupancy,
    cell_x: i32,
    cell_y: i32,
    span_x: i32,
    span_y: i32,
    direction: Direction,
    block: Option<&GridOccupancy>,
) -> Option<(i32, i32)> {
    let mut best = None;
    let mut best_distance = f64::MAX;
    let mut best_score = i32::MIN;

    for y in 0..occupied.count_y() - (span_y - 1) {
        'anchor: for x in 0..occupied.count_x() - (span_x - 1) {
            for i in 0..span_x {
                for j in 0..span_y {
                    if occupied.is_occupied(x + i, y + j)
                        && block.is_none_or(|b| b.is_occupied(i, j))
                    {
                        continue 'anchor;
                    }
                }
            }
            let dx = x - cell_x;
            let dy = y - cell_y;
            let distance = f64::hypot(f64::from(dx), f64::from(dy));
            let score = direction.dot(Direction::from_delta(f64::from(dx), f64::from(dy)));
            if distance < best_distance || (distance == best_distance && score > best_score) {
                best = Some((x, y));
                best_distance = distance;
                best_score = score;
            }
        }
    }
    best
}
