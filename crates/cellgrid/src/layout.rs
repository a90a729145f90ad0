//! The authoritative grid container: items, their spans and derived occupancy.

use std::collections::BTreeMap;

use cellgrid_ids::ItemId;
use tracing::trace;

use crate::{
    error::{Error, Result},
    geom::{CellMetrics, CellRect, PixelRect, Point},
    item::{CellAndSpan, GridItem, ItemKind, ItemSpan},
    occupancy::GridOccupancy,
    solution::ItemConfiguration,
};

/// A fixed-size grid of cells and the items placed on it.
///
/// The occupancy matrix is a derived index over the item spans and is kept in
/// sync by every mutating operation. Searches never mutate a layout; they work
/// on scratch copies of its occupancy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    /// Width in cells, including the seam column when present.
    count_x: i32,
    /// Height in cells.
    count_y: i32,
    /// Pixel geometry used to map pointer positions onto cells.
    metrics: CellMetrics,
    /// Placed items keyed by id.
    items: BTreeMap<ItemId, GridItem>,
    /// Cells covered by `items`.
    occupied: GridOccupancy,
    /// Column of the virtual seam, when simulating a two-panel grid.
    seam: Option<i32>,
}

impl GridLayout {
    /// An empty grid.
    pub fn new(count_x: i32, count_y: i32, metrics: CellMetrics) -> Self {
        Self {
            count_x,
            count_y,
            metrics,
            items: BTreeMap::new(),
            occupied: GridOccupancy::new(count_x, count_y),
            seam: None,
        }
    }

    /// Width in cells.
    #[inline]
    pub fn count_x(&self) -> i32 {
        self.count_x
    }

    /// Height in cells.
    #[inline]
    pub fn count_y(&self) -> i32 {
        self.count_y
    }

    /// Pixel geometry of the grid.
    #[inline]
    pub fn metrics(&self) -> &CellMetrics {
        &self.metrics
    }

    /// Column of the virtual seam, if this layout is a seam simulation.
    #[inline]
    pub fn seam_column(&self) -> Option<i32> {
        self.seam
    }

    /// Look up an item.
    pub fn item(&self, id: ItemId) -> Option<&GridItem> {
        self.items.get(&id)
    }

    /// All items in id order.
    pub fn items(&self) -> impl Iterator<Item = &GridItem> {
        self.items.values()
    }

    /// Number of placed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no item is placed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Authoritative occupancy.
    #[inline]
    pub fn occupancy(&self) -> &GridOccupancy {
        &self.occupied
    }

    /// Occupancy with the cells of `ignore` vacated. This is the scratch
    /// snapshot a search starts from: the dragged item never blocks itself.
    pub fn occupancy_without(&self, ignore: Option<ItemId>) -> GridOccupancy {
        let mut occupied = self.occupied.clone();
        if let Some(item) = ignore.and_then(|id| self.items.get(&id)) {
            occupied.mark(&item.cell(), false);
        }
        occupied
    }

    /// Place a new item.
    pub fn add_item(&mut self, item: GridItem) -> Result<()> {
        if item.id.is_seam() {
            return Err(Error::ReservedId(item.id));
        }
        if self.items.contains_key(&item.id) {
            return Err(Error::DuplicateId(item.id));
        }
        self.check_placement(item.id, &item.cell())?;
        self.occupied.mark(&item.cell(), true);
        self.items.insert(item.id, item);
        Ok(())
    }

    /// Remove an item, returning it.
    pub fn remove_item(&mut self, id: ItemId) -> Result<GridItem> {
        let item = self.items.remove(&id).ok_or(Error::UnknownItem(id))?;
        self.occupied.mark(&item.cell(), false);
        Ok(item)
    }

    /// Move (and optionally resize) an existing item.
    pub fn move_item(&mut self, id: ItemId, cell: CellAndSpan) -> Result<()> {
        let item = *self.items.get(&id).ok_or(Error::UnknownItem(id))?;
        if cell.span_x < item.span.min_span_x || cell.span_y < item.span.min_span_y {
            return Err(Error::InvalidSpan {
                span_x: cell.span_x,
                span_y: cell.span_y,
                min_span_x: item.span.min_span_x,
                min_span_y: item.span.min_span_y,
                count_x: self.count_x,
                count_y: self.count_y,
            });
        }
        self.check_placement(id, &cell)?;
        self.occupied.mark(&item.cell(), false);
        self.occupied.mark(&cell, true);
        if let Some(stored) = self.items.get_mut(&id) {
            stored.span.cell = cell;
        }
        Ok(())
    }

    /// Ensure `cell` fits the grid and overlaps no item other than `id`.
    fn check_placement(&self, id: ItemId, cell: &CellAndSpan) -> Result<()> {
        if !cell.fits(self.count_x, self.count_y) {
            return Err(Error::OutOfBounds {
                id,
                cell: *cell,
                count_x: self.count_x,
                count_y: self.count_y,
            });
        }
        let rect = cell.rect();
        match self
            .items
            .values()
            .find(|other| other.id != id && other.cell().rect().intersects(&rect))
        {
            Some(other) => Err(Error::Overlap {
                id,
                other: other.id,
            }),
            None => Ok(()),
        }
    }

    /// True when any item other than `ignore` overlaps `region`.
    pub fn region_has_items(&self, region: &CellRect, ignore: Option<ItemId>) -> bool {
        self.items
            .values()
            .any(|item| Some(item.id) != ignore && item.cell().rect().intersects(region))
    }

    /// Bounding rectangle of the items (other than `ignore`) overlapping `region`.
    pub fn intersecting_bounds(
        &self,
        region: &CellRect,
        ignore: Option<ItemId>,
    ) -> Option<CellRect> {
        self.items
            .values()
            .filter(|item| Some(item.id) != ignore)
            .map(|item| item.cell().rect())
            .filter(|r| r.intersects(region))
            .reduce(|acc, r| acc.union(&r))
    }

    /// Pixel rectangle of a cell region, honouring the seam.
    #[inline]
    pub fn cell_to_rect(&self, cell_x: i32, cell_y: i32, span_x: i32, span_y: i32) -> PixelRect {
        self.metrics
            .cell_to_rect(cell_x, cell_y, span_x, span_y, self.seam)
    }

    /// Pixel centre of a cell region, honouring the seam.
    #[inline]
    pub fn region_center(&self, cell_x: i32, cell_y: i32, span_x: i32, span_y: i32) -> Point {
        self.metrics
            .region_center(cell_x, cell_y, span_x, span_y, self.seam)
    }

    /// Pixel centre of a single cell.
    #[inline]
    pub fn cell_center(&self, cell_x: i32, cell_y: i32) -> Point {
        self.metrics.cell_center(cell_x, cell_y, self.seam)
    }

    /// The cell under `p`, clamped into the grid. Ignores the seam.
    #[inline]
    pub fn point_to_cell_exact(&self, p: Point) -> (i32, i32) {
        self.metrics
            .point_to_cell_exact(p, self.count_x, self.count_y)
    }

    /// Commit a solution: move every displaced item and, when `dragged` is
    /// given, the dragged item itself.
    ///
    /// The layout is left untouched if the result would overlap. A dragged
    /// item that is not yet on the grid is placed by the caller with
    /// [`Self::add_item`] after applying the displacements.
    pub fn apply(&mut self, solution: &ItemConfiguration, dragged: Option<ItemId>) -> Result<()> {
        let Some(placement) = solution.placement() else {
            return Ok(());
        };
        let mut next = self.items.clone();
        for (id, cell) in &solution.moves {
            let item = next.get_mut(id).ok_or(Error::UnknownItem(*id))?;
            item.span.cell = *cell;
        }
        if let Some(id) = dragged {
            let item = next.get_mut(&id).ok_or(Error::UnknownItem(id))?;
            item.span.cell = placement;
        } else {
            let rect = placement.rect();
            if let Some(other) = next
                .values()
                .find(|item| item.cell().rect().intersects(&rect))
            {
                return Err(Error::Blocked(other.id));
            }
        }
        let occupied = build_occupancy(self.count_x, self.count_y, next.values())?;
        trace!(moves = solution.moves.len(), "applied solution");
        self.items = next;
        self.occupied = occupied;
        Ok(())
    }

    /// A copy of this layout widened by a non-reorderable seam column at the
    /// midline. Items at or past the midline shift one column to the right.
    ///
    /// Calling this on a layout that already has a seam returns a plain copy.
    pub fn with_seam(&self) -> Self {
        if self.seam.is_some() {
            return self.clone();
        }
        let seam = self.count_x / 2;
        let count_x = self.count_x + 1;
        let mut items: BTreeMap<ItemId, GridItem> = self
            .items
            .values()
            .map(|item| {
                let mut shifted = *item;
                if shifted.span.cell.cell_x >= seam {
                    shifted.span.cell.cell_x += 1;
                }
                (shifted.id, shifted)
            })
            .collect();
        let seam_item = GridItem {
            id: ItemId::SEAM,
            span: ItemSpan {
                cell: CellAndSpan::new(seam, 0, 1, self.count_y),
                min_span_x: 1,
                min_span_y: self.count_y,
            },
            kind: ItemKind::Fixed,
            reorderable: false,
        };
        items.insert(ItemId::SEAM, seam_item);
        let mut occupied = GridOccupancy::new(count_x, self.count_y);
        for item in items.values() {
            occupied.mark(&item.cell(), true);
        }
        Self {
            count_x,
            count_y: self.count_y,
            metrics: self.metrics,
            items,
            occupied,
            seam: Some(seam),
        }
    }
}

/// Occupancy for a set of items, failing on the first overlap.
fn build_occupancy<'a>(
    count_x: i32,
    count_y: i32,
    items: impl Iterator<Item = &'a GridItem>,
) -> Result<GridOccupancy> {
    let mut owners: Vec<Option<ItemId>> = vec![None; (count_x * count_y).max(0) as usize];
    let mut occupied = GridOccupancy::new(count_x, count_y);
    for item in items {
        let cell = item.cell();
        if !cell.fits(count_x, count_y) {
            return Err(Error::OutOfBounds {
                id: item.id,
                cell,
                count_x,
                count_y,
            });
        }
        for y in cell.cell_y..cell.cell_y + cell.span_y {
            for x in cell.cell_x..cell.cell_x + cell.span_x {
                let slot = &mut owners[(y * count_x + x) as usize];
                if let Some(other) = *slot {
                    return Err(Error::Overlap { id: item.id, other });
                }
                *slot = Some(item.id);
            }
        }
        occupied.mark(&cell, true);
    }
    Ok(occupied)
}
