//! A group of items pushed together as one rigid block.

use std::mem;

use cellgrid_ids::ItemId;

use crate::{geom::CellRect, item::CellAndSpan};

use super::state::Arrangement;

/// Side of a cluster that leads a push.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Edge {
    /// Pushing towards column 0.
    Left,
    /// Pushing towards row 0.
    Top,
    /// Pushing towards the last column.
    Right,
    /// Pushing towards the last row.
    Bottom,
}

impl Edge {
    /// Dirty-flag bit for this edge.
    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Top => 1 << 1,
            Self::Right => 1 << 2,
            Self::Bottom => 1 << 3,
        }
    }
}

/// Every edge needs recomputing.
const ALL_EDGES: u8 = 0b1111;

/// Items moving together, with cached per-row and per-column extremes of the
/// group so neighbours touching the leading edge can be found quickly.
///
/// Positions live in the [`Arrangement`]; every call that reads them takes it
/// as an argument.
#[derive(Debug)]
pub(super) struct ItemCluster {
    /// Members.
    items: Vec<ItemId>,
    /// Left-most covered column for each row, or -1.
    left_edge: Vec<i32>,
    /// One past the right-most covered column for each row, or -1.
    right_edge: Vec<i32>,
    /// Top-most covered row for each column, or -1.
    top_edge: Vec<i32>,
    /// One past the bottom-most covered row for each column, or -1.
    bottom_edge: Vec<i32>,
    /// Edges whose cache is stale.
    dirty: u8,
}

impl ItemCluster {
    /// A cluster of `items` on a `count_x` × `count_y` grid.
    pub(super) fn new(items: &[ItemId], count_x: i32, count_y: i32) -> Self {
        let rows = count_y.max(0) as usize;
        let cols = count_x.max(0) as usize;
        Self {
            items: items.to_vec(),
            left_edge: vec![-1; rows],
            right_edge: vec![-1; rows],
            top_edge: vec![-1; cols],
            bottom_edge: vec![-1; cols],
            dirty: ALL_EDGES,
        }
    }

    /// Members of the cluster, in insertion order.
    #[inline]
    pub(super) fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// True when `id` is a member.
    #[inline]
    pub(super) fn contains(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }

    /// Add an item to the cluster.
    pub(super) fn add(&mut self, id: ItemId) {
        self.items.push(id);
        self.reset_edges();
    }

    /// Invalidate every cached edge.
    fn reset_edges(&mut self) {
        for edge in [
            &mut self.left_edge,
            &mut self.right_edge,
            &mut self.top_edge,
            &mut self.bottom_edge,
        ] {
            edge.fill(-1);
        }
        self.dirty = ALL_EDGES;
    }

    /// Rebuild the cache for one edge.
    fn compute_edge(&mut self, edge: Edge, state: &Arrangement) {
        for id in &self.items {
            let cs = state.get(*id);
            match edge {
                Edge::Left => {
                    for slot in slots(&mut self.left_edge, cs.cell_y, cs.span_y) {
                        if cs.cell_x < *slot || *slot < 0 {
                            *slot = cs.cell_x;
                        }
                    }
                }
                Edge::Right => {
                    let right = cs.cell_x + cs.span_x;
                    for slot in slots(&mut self.right_edge, cs.cell_y, cs.span_y) {
                        if right > *slot {
                            *slot = right;
                        }
                    }
                }
                Edge::Top => {
                    for slot in slots(&mut self.top_edge, cs.cell_x, cs.span_x) {
                        if cs.cell_y < *slot || *slot < 0 {
                            *slot = cs.cell_y;
                        }
                    }
                }
                Edge::Bottom => {
                    let bottom = cs.cell_y + cs.span_y;
                    for slot in slots(&mut self.bottom_edge, cs.cell_x, cs.span_x) {
                        if bottom > *slot {
                            *slot = bottom;
                        }
                    }
                }
            }
        }
    }

    /// True when `cs` sits flush against the cluster on the given side.
    pub(super) fn is_touching_edge(
        &mut self,
        cs: &CellAndSpan,
        edge: Edge,
        state: &Arrangement,
    ) -> bool {
        if self.dirty & edge.bit() != 0 {
            self.compute_edge(edge, state);
            self.dirty &= !edge.bit();
        }
        let (edges, start, span, target) = match edge {
            Edge::Left => (&self.left_edge, cs.cell_y, cs.span_y, cs.cell_x + cs.span_x),
            Edge::Right => (&self.right_edge, cs.cell_y, cs.span_y, cs.cell_x),
            Edge::Top => (&self.top_edge, cs.cell_x, cs.span_x, cs.cell_y + cs.span_y),
            Edge::Bottom => (&self.bottom_edge, cs.cell_x, cs.span_x, cs.cell_y),
        };
        (start..start + span)
            .filter_map(|i| usize::try_from(i).ok().and_then(|i| edges.get(i)))
            .any(|e| *e == target)
    }

    /// Move every member `delta` cells towards `edge`.
    pub(super) fn shift(&mut self, edge: Edge, delta: i32, state: &mut Arrangement) {
        let (dx, dy) = match edge {
            Edge::Left => (-delta, 0),
            Edge::Right => (delta, 0),
            Edge::Top => (0, -delta),
            Edge::Bottom => (0, delta),
        };
        for id in &self.items {
            state.offset(*id, dx, dy);
        }
        self.reset_edges();
    }

    /// Bounding rectangle of all members.
    pub(super) fn bounding_rect(&self, state: &Arrangement) -> CellRect {
        state.bounding_rect(&self.items)
    }

    /// Order the arrangement's item list so that items nearest to the leading
    /// edge come first. The sort is stable.
    pub(super) fn sort_for_edge_push(edge: Edge, state: &mut Arrangement) {
        let mut sorted = mem::take(&mut state.sorted);
        sorted.sort_by_key(|id| {
            let c = state.get(*id);
            match edge {
                Edge::Left => -(c.cell_x + c.span_x),
                Edge::Right => c.cell_x,
                Edge::Top => -(c.cell_y + c.span_y),
                Edge::Bottom => c.cell_y,
            }
        });
        state.sorted = sorted;
    }
}

/// In-range slots of `edge` for indices `start..start + span`.
fn slots(edge: &mut [i32], start: i32, span: i32) -> impl Iterator<Item = &mut i32> {
    let lo = start.max(0) as usize;
    let hi = (start + span).max(0) as usize;
    edge.iter_mut().take(hi).skip(lo)
}
