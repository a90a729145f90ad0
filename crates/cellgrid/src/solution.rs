//! The placement decision returned by every reorder entry point.

use std::collections::BTreeMap;

use cellgrid_ids::ItemId;

use crate::item::CellAndSpan;

/// Outcome of a reorder search.
///
/// When `is_solution` is true the dragged item lands at
/// (`cell_x`, `cell_y`) with the given span, and every entry of `moves` is an
/// item that must move to make room. Committing the configuration never
/// produces overlapping items.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ItemConfiguration {
    /// Whether a valid placement was found.
    pub is_solution: bool,
    /// Resulting anchor column of the dragged item.
    pub cell_x: i32,
    /// Resulting anchor row of the dragged item.
    pub cell_y: i32,
    /// Resulting horizontal span of the dragged item.
    pub span_x: i32,
    /// Resulting vertical span of the dragged item.
    pub span_y: i32,
    /// New positions of displaced items. Never contains the dragged item.
    pub moves: BTreeMap<ItemId, CellAndSpan>,
    /// Items the drop region overlapped before they were displaced.
    pub intersecting: Vec<ItemId>,
}

impl ItemConfiguration {
    /// A configuration reporting that no placement exists.
    pub fn no_solution() -> Self {
        Self::default()
    }

    /// A placement that displaces nothing.
    pub fn placed(cell: CellAndSpan) -> Self {
        Self {
            is_solution: true,
            cell_x: cell.cell_x,
            cell_y: cell.cell_y,
            span_x: cell.span_x,
            span_y: cell.span_y,
            ..Self::default()
        }
    }

    /// Cells covered by the dragged item. Zero for a failed search.
    #[inline]
    pub fn area(&self) -> i32 {
        self.span_x * self.span_y
    }

    /// Anchor and extent of the dragged item, if a placement was found.
    pub fn placement(&self) -> Option<CellAndSpan> {
        self.is_solution.then(|| {
            CellAndSpan::new(self.cell_x, self.cell_y, self.span_x, self.span_y)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_configuration_has_no_area() {
        let c = ItemConfiguration::no_solution();
        assert!(!c.is_solution);
        assert_eq!(c.area(), 0);
        assert_eq!(c.placement(), None);
    }

    #[test]
    fn placed_configuration() {
        let c = ItemConfiguration::placed(CellAndSpan::new(1, 2, 2, 3));
        assert_eq!(c.area(), 6);
        assert_eq!(c.placement(), Some(CellAndSpan::new(1, 2, 2, 3)));
        assert!(c.moves.is_empty());
    }
}
