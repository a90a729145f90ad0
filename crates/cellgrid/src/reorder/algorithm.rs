//! Single-grid reorder search.

use std::collections::BTreeMap;

use cellgrid_ids::ItemId;
use tracing::{debug, trace};

use crate::{
    geom::CellRect,
    item::CellAndSpan,
    layout::GridLayout,
    occupancy::GridOccupancy,
    solution::ItemConfiguration,
};

use super::{
    Reorder, ReorderParameters,
    cluster::{Edge, ItemCluster},
    direction::Direction,
    nearest::{find_nearest_area, find_nearest_area_ignore_occupied, nearest_free_area},
    state::Arrangement,
};

/// Reorder search over a single grid.
///
/// Stateless: every call builds its own scratch occupancy and working
/// arrangement from the layout it is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReorderAlgorithm;

impl ReorderAlgorithm {
    /// Construct the algorithm.
    pub const fn new() -> Self {
        Self
    }
}

impl Reorder for ReorderAlgorithm {
    fn drop_in_place_solution(
        &self,
        layout: &GridLayout,
        params: &ReorderParameters,
    ) -> ItemConfiguration {
        let Some(target) =
            find_nearest_area_ignore_occupied(layout, params.pixel, params.span_x, params.span_y)
        else {
            return ItemConfiguration::no_solution();
        };
        if layout.region_has_items(&target.rect(), params.dragged) {
            trace!(?target, "drop in place blocked");
            return ItemConfiguration::no_solution();
        }
        ItemConfiguration::placed(target)
    }

    fn closest_empty_space_reorder(
        &self,
        layout: &GridLayout,
        params: &ReorderParameters,
    ) -> ItemConfiguration {
        let occupied = layout.occupancy_without(params.dragged);
        find_nearest_area(
            layout,
            Some(&occupied),
            params.pixel,
            params.min_span_x,
            params.min_span_y,
            params.span_x,
            params.span_y,
        )
        .map_or_else(ItemConfiguration::no_solution, ItemConfiguration::placed)
    }

    fn find_reorder_solution(
        &self,
        layout: &GridLayout,
        params: &ReorderParameters,
        direction: Direction,
        dec_x: bool,
    ) -> ItemConfiguration {
        let mut span_x = params.span_x;
        let mut span_y = params.span_y;
        let mut dec_x = dec_x;
        loop {
            let anchor = find_nearest_area_ignore_occupied(layout, params.pixel, span_x, span_y)
                .map_or((-1, -1), |c| (c.cell_x, c.cell_y));
            let target = CellAndSpan::new(anchor.0, anchor.1, span_x, span_y);
            let mut search = Search::new(layout, params.dragged);
            if search.rearrangement_exists(target, direction) && search.is_consistent(&target) {
                let solution = search.into_configuration(target);
                debug!(
                    x = target.cell_x,
                    y = target.cell_y,
                    span_x,
                    span_y,
                    moves = solution.moves.len(),
                    "reorder solution found"
                );
                return solution;
            }
            // Shrink alternately in X then Y towards the minimum span.
            if span_x > params.min_span_x && (params.min_span_y == span_y || dec_x) {
                span_x -= 1;
                dec_x = false;
            } else if span_y > params.min_span_y {
                span_y -= 1;
                dec_x = true;
            } else {
                trace!("no reorder solution");
                return ItemConfiguration::no_solution();
            }
            trace!(span_x, span_y, "shrinking dragged item");
        }
    }

    fn direction_for_drop(&self, layout: &GridLayout, params: &ReorderParameters) -> Direction {
        let Some(target) =
            find_nearest_area_ignore_occupied(layout, params.pixel, params.span_x, params.span_y)
        else {
            return Direction::RIGHT;
        };
        let region = target.rect();
        let drop = layout
            .intersecting_bounds(&region, params.dragged)
            .map_or(region, |bounds| bounds.union(&region));

        let px = layout.cell_to_rect(drop.left, drop.top, drop.width(), drop.height());
        let mut dx = (px.cx() - params.pixel.x) / params.span_x;
        let mut dy = (px.cy() - params.pixel.y) / params.span_y;
        if drop.width() == layout.count_x() || params.span_x == layout.count_x() {
            dx = 0;
        }
        if drop.height() == layout.count_y() || params.span_y == layout.count_y() {
            dy = 0;
        }
        if dx == 0 && dy == 0 {
            Direction::RIGHT
        } else {
            Direction::from_delta(f64::from(dx), f64::from(dy))
        }
    }
}

/// Scratch state of one placement attempt.
struct Search<'a> {
    /// Committed layout the attempt starts from.
    layout: &'a GridLayout,
    /// Item being dragged, if already on the grid.
    dragged: Option<ItemId>,
    /// Working occupancy. The dragged item never occupies it.
    tmp: GridOccupancy,
    /// Tentative item positions.
    state: Arrangement,
    /// Items overlapping the drop region.
    intersecting: Vec<ItemId>,
}

impl<'a> Search<'a> {
    /// Fresh scratch state over `layout`.
    fn new(layout: &'a GridLayout, dragged: Option<ItemId>) -> Self {
        Self {
            layout,
            dragged,
            tmp: layout.occupancy_without(dragged),
            state: Arrangement::snapshot(layout),
            intersecting: Vec::new(),
        }
    }

    /// Whether a search may displace `id`.
    fn is_reorderable(&self, id: ItemId) -> bool {
        self.layout.item(id).is_some_and(|item| item.reorderable)
    }

    /// Final configuration, reporting only items whose position changed.
    fn into_configuration(self, target: CellAndSpan) -> ItemConfiguration {
        let moves: BTreeMap<ItemId, CellAndSpan> = self
            .state
            .iter()
            .filter(|(id, cell)| {
                Some(*id) != self.dragged
                    && self
                        .layout
                        .item(*id)
                        .is_some_and(|item| item.cell() != *cell)
            })
            .collect();
        ItemConfiguration {
            moves,
            intersecting: self.intersecting,
            ..ItemConfiguration::placed(target)
        }
    }

    /// True when every item fits the grid, no two items overlap and nothing
    /// covers `target`.
    fn is_consistent(&self, target: &CellAndSpan) -> bool {
        let count_x = self.layout.count_x();
        let count_y = self.layout.count_y();
        let mut occupied = GridOccupancy::new(count_x, count_y);
        occupied.mark(target, true);
        for (id, cell) in self.state.iter() {
            if Some(id) == self.dragged {
                continue;
            }
            if !cell.fits(count_x, count_y)
                || !occupied.is_region_vacant(cell.cell_x, cell.cell_y, cell.span_x, cell.span_y)
            {
                trace!(%id, "rearrangement overlaps");
                return false;
            }
            occupied.mark(&cell, true);
        }
        true
    }

    /// Try to clear `target` by pushing, then block-moving, then individually
    /// relocating the items it overlaps.
    fn rearrangement_exists(&mut self, target: CellAndSpan, direction: Direction) -> bool {
        if target.cell_x < 0 || target.cell_y < 0 {
            return false;
        }
        let drop = target.rect();
        if let Some(id) = self.dragged {
            let moved = self.state.get(id).at(target.cell_x, target.cell_y);
            self.state.set(id, moved);
        }

        // Visit items by their committed column then row so results do not
        // depend on id order.
        let mut order: Vec<ItemId> = self.state.iter().map(|(id, _)| id).collect();
        order.sort_by_key(|id| {
            self.layout
                .item(*id)
                .map(|item| (item.cell().cell_x, item.cell().cell_y))
        });

        let mut intersecting = Vec::new();
        for id in order {
            if Some(id) == self.dragged {
                continue;
            }
            if self.state.get(id).rect().intersects(&drop) {
                if !self.is_reorderable(id) {
                    trace!(%id, "drop region covers a fixed item");
                    return false;
                }
                intersecting.push(id);
            }
        }
        self.intersecting.clone_from(&intersecting);

        if self.attempt_push_in_direction(&intersecting, &drop, direction) {
            return true;
        }
        if self.add_items_to_temp_location(&intersecting, &drop, direction) {
            return true;
        }
        intersecting
            .iter()
            .all(|id| self.add_item_to_temp_location(*id, &drop, direction))
    }

    /// Push along the requested axis first, then its reverse, then the other
    /// axis. A diagonal direction is tried one component at a time.
    fn attempt_push_in_direction(
        &mut self,
        items: &[ItemId],
        drop: &CellRect,
        direction: Direction,
    ) -> bool {
        let mut dir = direction;
        if dir.component_count() > 1 {
            for _ in 0..2 {
                for axis in [1, 0] {
                    let single = dir.with_component(axis, 0);
                    if self.push_items_to_temp_location(items, drop, single) {
                        return true;
                    }
                }
                dir = dir.reversed();
            }
        } else {
            for _ in 0..2 {
                for _ in 0..2 {
                    if self.push_items_to_temp_location(items, drop, dir) {
                        return true;
                    }
                    dir = dir.reversed();
                }
                dir = dir.swapped();
            }
        }
        false
    }

    /// Shove `items` out of `drop` as a cluster, absorbing every item the
    /// leading edge runs into.
    fn push_items_to_temp_location(
        &mut self,
        items: &[ItemId],
        drop: &CellRect,
        direction: Direction,
    ) -> bool {
        let count_x = self.layout.count_x();
        let count_y = self.layout.count_y();
        let mut cluster = ItemCluster::new(items, count_x, count_y);
        let bounds = cluster.bounding_rect(&self.state);
        let (edge, mut distance) = if direction.x < 0 {
            (Edge::Left, bounds.right - drop.left)
        } else if direction.x > 0 {
            (Edge::Right, drop.right - bounds.left)
        } else if direction.y < 0 {
            (Edge::Top, bounds.bottom - drop.top)
        } else {
            (Edge::Bottom, drop.bottom - bounds.top)
        };
        if distance <= 0 {
            return false;
        }

        for id in items {
            self.tmp.mark(&self.state.get(*id), false);
        }
        self.state.save();
        ItemCluster::sort_for_edge_push(edge, &mut self.state);

        let mut fail = false;
        while distance > 0 && !fail {
            let order = self.state.sorted.clone();
            for id in order {
                if cluster.contains(id) || Some(id) == self.dragged {
                    continue;
                }
                let cell = self.state.get(id);
                if cluster.is_touching_edge(&cell, edge, &self.state) {
                    if !self.is_reorderable(id) {
                        fail = true;
                        break;
                    }
                    cluster.add(id);
                    self.tmp.mark(&cell, false);
                }
            }
            distance -= 1;
            cluster.shift(edge, 1, &mut self.state);
        }

        let r = cluster.bounding_rect(&self.state);
        let found = !fail && r.left >= 0 && r.right <= count_x && r.top >= 0 && r.bottom <= count_y;
        if !found {
            self.state.restore();
        }
        for id in cluster.items() {
            self.tmp.mark(&self.state.get(*id), true);
        }
        trace!(?edge, found, "push attempt");
        found
    }

    /// Relocate `items` together, keeping their relative positions, to the
    /// nearest area where every covered cell is free.
    fn add_items_to_temp_location(
        &mut self,
        items: &[ItemId],
        drop: &CellRect,
        direction: Direction,
    ) -> bool {
        if items.is_empty() {
            return true;
        }
        let bounds = self.state.bounding_rect(items);
        for id in items {
            self.tmp.mark(&self.state.get(*id), false);
        }
        let mut block = GridOccupancy::new(bounds.width(), bounds.height());
        for id in items {
            let c = self.state.get(*id);
            block.mark_cells(
                c.cell_x - bounds.left,
                c.cell_y - bounds.top,
                c.span_x,
                c.span_y,
                true,
            );
        }
        self.tmp.mark_rect(drop, true);

        let found = nearest_free_area(
            &self.tmp,
            bounds.left,
            bounds.top,
            bounds.width(),
            bounds.height(),
            direction,
            Some(&block),
        );
        if let Some((x, y)) = found {
            let dx = x - bounds.left;
            let dy = y - bounds.top;
            for id in items {
                self.state.offset(*id, dx, dy);
            }
        }
        for id in items {
            self.tmp.mark(&self.state.get(*id), true);
        }
        found.is_some()
    }

    /// Relocate a single item to the nearest free area outside `drop`.
    fn add_item_to_temp_location(
        &mut self,
        id: ItemId,
        drop: &CellRect,
        direction: Direction,
    ) -> bool {
        let mut c = self.state.get(id);
        self.tmp.mark(&c, false);
        self.tmp.mark_rect(drop, true);
        let found = nearest_free_area(
            &self.tmp,
            c.cell_x,
            c.cell_y,
            c.span_x,
            c.span_y,
            direction,
            None,
        );
        if let Some((x, y)) = found {
            c = c.at(x, y);
            self.state.set(id, c);
        }
        self.tmp.mark(&c, true);
        found.is_some()
    }
}
