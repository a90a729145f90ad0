//! Item positions, spans and the items placed on a grid.

use cellgrid_ids::ItemId;

use crate::{
    error::{Error, Result},
    geom::CellRect,
};

/// Anchor cell plus extent of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CellAndSpan {
    /// Left-most covered column.
    pub cell_x: i32,
    /// Top-most covered row.
    pub cell_y: i32,
    /// Number of covered columns.
    pub span_x: i32,
    /// Number of covered rows.
    pub span_y: i32,
}

impl CellAndSpan {
    /// Construct a cell region.
    #[inline]
    pub const fn new(cell_x: i32, cell_y: i32, span_x: i32, span_y: i32) -> Self {
        Self {
            cell_x,
            cell_y,
            span_x,
            span_y,
        }
    }

    /// Covered rectangle.
    #[inline]
    pub const fn rect(&self) -> CellRect {
        CellRect::from_span(self.cell_x, self.cell_y, self.span_x, self.span_y)
    }

    /// Number of covered cells.
    #[inline]
    pub const fn area(&self) -> i32 {
        self.span_x * self.span_y
    }

    /// True when the region lies within a `count_x` × `count_y` grid.
    #[inline]
    pub const fn fits(&self, count_x: i32, count_y: i32) -> bool {
        self.cell_x >= 0
            && self.cell_y >= 0
            && self.span_x >= 1
            && self.span_y >= 1
            && self.cell_x + self.span_x <= count_x
            && self.cell_y + self.span_y <= count_y
    }

    /// Same extent anchored at a different cell.
    #[inline]
    pub const fn at(self, cell_x: i32, cell_y: i32) -> Self {
        Self {
            cell_x,
            cell_y,
            ..self
        }
    }
}

/// Placement of an item together with the smallest span it may shrink to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemSpan {
    /// Current anchor and extent.
    pub cell: CellAndSpan,
    /// Smallest horizontal span the item accepts.
    pub min_span_x: i32,
    /// Smallest vertical span the item accepts.
    pub min_span_y: i32,
}

impl ItemSpan {
    /// A fixed-size item: its minimum span equals its span.
    pub fn new(cell_x: i32, cell_y: i32, span_x: i32, span_y: i32) -> Result<Self> {
        Self::resizable(cell_x, cell_y, span_x, span_y, span_x, span_y)
    }

    /// A resizable item that may shrink down to `min_span_x` × `min_span_y`.
    pub fn resizable(
        cell_x: i32,
        cell_y: i32,
        span_x: i32,
        span_y: i32,
        min_span_x: i32,
        min_span_y: i32,
    ) -> Result<Self> {
        if min_span_x < 1 || min_span_y < 1 || span_x < min_span_x || span_y < min_span_y {
            return Err(Error::InvalidSpan {
                span_x,
                span_y,
                min_span_x,
                min_span_y,
                count_x: 0,
                count_y: 0,
            });
        }
        Ok(Self {
            cell: CellAndSpan::new(cell_x, cell_y, span_x, span_y),
            min_span_x,
            min_span_y,
        })
    }

    /// True when the item may shrink on either axis.
    pub const fn is_resizable(&self) -> bool {
        self.min_span_x < self.cell.span_x || self.min_span_y < self.cell.span_y
    }
}

/// The kind of content an item holds. Only used for reporting; the search
/// treats every kind the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A single-cell application shortcut.
    Icon,
    /// A single-cell folder.
    Folder,
    /// A widget spanning one or more cells.
    Widget,
    /// A cell-filling placeholder that never moves.
    Fixed,
}

/// An item placed on a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridItem {
    /// Item identifier.
    pub id: ItemId,
    /// Placement and minimum span.
    pub span: ItemSpan,
    /// Content kind.
    pub kind: ItemKind,
    /// Whether a search may displace this item.
    pub reorderable: bool,
}

impl GridItem {
    /// A reorderable 1×1 icon.
    pub fn icon(id: ItemId, cell_x: i32, cell_y: i32) -> Self {
        Self {
            id,
            span: ItemSpan {
                cell: CellAndSpan::new(cell_x, cell_y, 1, 1),
                min_span_x: 1,
                min_span_y: 1,
            },
            kind: ItemKind::Icon,
            reorderable: true,
        }
    }

    /// A reorderable widget.
    pub fn widget(id: ItemId, span: ItemSpan) -> Self {
        Self {
            id,
            span,
            kind: ItemKind::Widget,
            reorderable: true,
        }
    }

    /// Builder-style kind override.
    #[must_use]
    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder-style override of the reorderable flag.
    #[must_use]
    pub fn with_reorderable(mut self, reorderable: bool) -> Self {
        self.reorderable = reorderable;
        self
    }

    /// Current anchor and extent.
    #[inline]
    pub fn cell(&self) -> CellAndSpan {
        self.span.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_validate_minimums() {
        assert!(ItemSpan::new(0, 0, 2, 2).is_ok());
        assert!(ItemSpan::resizable(0, 0, 3, 2, 1, 2).is_ok());
        assert!(matches!(
            ItemSpan::resizable(0, 0, 2, 2, 3, 1),
            Err(Error::InvalidSpan { .. })
        ));
        assert!(ItemSpan::new(0, 0, 0, 1).is_err());
    }

    #[test]
    fn resizable_flag() {
        assert!(!ItemSpan::new(0, 0, 2, 2).unwrap().is_resizable());
        let span = ItemSpan::resizable(0, 0, 2, 2, 1, 2).unwrap();
        assert!(span.is_resizable());
    }

    #[test]
    fn fits_checks_every_edge() {
        assert!(CellAndSpan::new(2, 3, 2, 1).fits(4, 4));
        assert!(!CellAndSpan::new(3, 0, 2, 1).fits(4, 4));
        assert!(!CellAndSpan::new(-1, 0, 1, 1).fits(4, 4));
        assert!(!CellAndSpan::new(0, 0, 0, 1).fits(4, 4));
    }
}
