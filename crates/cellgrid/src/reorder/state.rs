//! Working positions of every item during a single reorder attempt.

use std::collections::BTreeMap;

use cellgrid_ids::ItemId;

use crate::{geom::CellRect, item::CellAndSpan, layout::GridLayout};

/// Tentative item positions with a one-level undo.
///
/// `sorted` is the iteration order used when pushing clusters; it is re-sorted
/// before every push and persists between pushes of the same attempt.
#[derive(Clone, Debug)]
pub(super) struct Arrangement {
    /// Tentative positions.
    cells: BTreeMap<ItemId, CellAndSpan>,
    /// Positions at the last save.
    saved: BTreeMap<ItemId, CellAndSpan>,
    /// Push iteration order.
    pub(super) sorted: Vec<ItemId>,
}

impl Arrangement {
    /// Snapshot every item of `layout`, the dragged one included.
    pub(super) fn snapshot(layout: &GridLayout) -> Self {
        let cells: BTreeMap<ItemId, CellAndSpan> =
            layout.items().map(|item| (item.id, item.cell())).collect();
        let sorted = cells.keys().copied().collect();
        Self {
            saved: cells.clone(),
            cells,
            sorted,
        }
    }

    /// Current tentative position of `id`.
    #[inline]
    pub(super) fn get(&self, id: ItemId) -> CellAndSpan {
        self.cells.get(&id).copied().unwrap_or_default()
    }

    /// Replace the tentative position of `id`.
    #[inline]
    pub(super) fn set(&mut self, id: ItemId, cell: CellAndSpan) {
        if let Some(slot) = self.cells.get_mut(&id) {
            *slot = cell;
        }
    }

    /// Offset the tentative position of `id`.
    #[inline]
    pub(super) fn offset(&mut self, id: ItemId, dx: i32, dy: i32) {
        if let Some(slot) = self.cells.get_mut(&id) {
            slot.cell_x += dx;
            slot.cell_y += dy;
        }
    }

    /// Remember the current positions.
    pub(super) fn save(&mut self) {
        self.saved.clone_from(&self.cells);
    }

    /// Return to the last saved positions.
    pub(super) fn restore(&mut self) {
        self.cells.clone_from(&self.saved);
    }

    /// Bounding rectangle of a group of items. Empty for an empty group.
    pub(super) fn bounding_rect(&self, ids: &[ItemId]) -> CellRect {
        ids.iter()
            .map(|id| self.get(*id).rect())
            .reduce(|acc, r| acc.union(&r))
            .unwrap_or_default()
    }

    /// All tentative positions.
    pub(super) fn iter(&self) -> impl Iterator<Item = (ItemId, CellAndSpan)> + '_ {
        self.cells.iter().map(|(id, cell)| (*id, *cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::CellMetrics, item::GridItem};

    #[test]
    fn save_and_restore() {
        let mut l = GridLayout::new(4, 4, CellMetrics::default());
        l.add_item(GridItem::icon(ItemId::new(1), 0, 0)).unwrap();
        l.add_item(GridItem::icon(ItemId::new(2), 3, 3)).unwrap();
        let mut a = Arrangement::snapshot(&l);
        a.save();
        a.offset(ItemId::new(1), 1, 2);
        assert_eq!(a.get(ItemId::new(1)), CellAndSpan::new(1, 2, 1, 1));
        assert_eq!(
            a.bounding_rect(&[ItemId::new(1), ItemId::new(2)]),
            CellRect::from_span(1, 2, 3, 2)
        );
        a.restore();
        assert_eq!(a.get(ItemId::new(1)), CellAndSpan::new(0, 0, 1, 1));
        assert_eq!(a.bounding_rect(&[]), CellRect::default());
    }
}
