//! Reorder search: where does a dragged item land, and what moves out of its way.
//!
//! Three strategies are evaluated for every pointer position:
//!
//! - drop in place: the cell under the pointer is already vacant,
//! - closest empty space: the nearest vacancy, possibly shrunk towards the
//!   item's minimum span,
//! - reorder: displace overlapped items by pushing them as a cluster,
//!   moving them as a block, or relocating them one by one, shrinking the
//!   dragged item if needed.
//!
//! [`Reorder::calculate_reorder`] picks between them. Every search works on
//! scratch copies; the [`GridLayout`] passed in is never modified.

mod algorithm;
mod cluster;
mod direction;
mod multicell;
mod nearest;
mod state;


use cellgrid_ids::ItemId;
use tracing::{debug, trace};

pub use algorithm::ReorderAlgorithm;
pub use direction::Direction;
pub use multicell::{MulticellReorderAlgorithm, remove_seam_from_solution};
pub use nearest::{find_nearest_area, find_nearest_area_ignore_occupied};

use crate::{
    error::{Error, Result},
    geom::Point,
    item::CellAndSpan,
    layout::GridLayout,
    solution::ItemConfiguration,
};

/// Inputs of a reorder search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReorderParameters {
    /// Pointer position, relative to the grid's top-left corner.
    pub pixel: Point,
    /// Requested horizontal span.
    pub span_x: i32,
    /// Requested vertical span.
    pub span_y: i32,
    /// Smallest horizontal span the item may shrink to.
    pub min_span_x: i32,
    /// Smallest vertical span the item may shrink to.
    pub min_span_y: i32,
    /// Item being dragged, if it is already on the grid. It never blocks its
    /// own placement and is never listed in `moves`.
    pub dragged: Option<ItemId>,
}

impl ReorderParameters {
    /// Validated parameters for a search over `layout`.
    pub fn new(
        layout: &GridLayout,
        pixel: Point,
        span_x: i32,
        span_y: i32,
        min_span_x: i32,
        min_span_y: i32,
        dragged: Option<ItemId>,
    ) -> Result<Self> {
        let params = Self {
            pixel,
            span_x,
            span_y,
            min_span_x,
            min_span_y,
            dragged,
        };
        params.validate(layout)?;
        Ok(params)
    }

    /// Check the spans against `layout`.
    pub fn validate(&self, layout: &GridLayout) -> Result<()> {
        let bad = self.min_span_x < 1
            || self.min_span_y < 1
            || self.span_x < self.min_span_x
            || self.span_y < self.min_span_y
            || self.span_x > layout.count_x()
            || self.span_y > layout.count_y();
        if bad {
            return Err(Error::InvalidSpan {
                span_x: self.span_x,
                span_y: self.span_y,
                min_span_x: self.min_span_x,
                min_span_y: self.min_span_y,
                count_x: layout.count_x(),
                count_y: layout.count_y(),
            });
        }
        if let Some(id) = self.dragged.filter(|id| layout.item(*id).is_none()) {
            return Err(Error::UnknownItem(id));
        }
        Ok(())
    }
}

/// A reorder strategy over a grid.
///
/// Implementations must not mutate the layout. Each method returns a fresh
/// [`ItemConfiguration`]; a failed search has `is_solution == false`.
pub trait Reorder {
    /// Place the item at the cell nearest the pointer if that region is
    /// already vacant.
    fn drop_in_place_solution(
        &self,
        layout: &GridLayout,
        params: &ReorderParameters,
    ) -> ItemConfiguration;

    /// Place the item in the nearest vacant region, possibly smaller than the
    /// requested span but never below the minimum span.
    fn closest_empty_space_reorder(
        &self,
        layout: &GridLayout,
        params: &ReorderParameters,
    ) -> ItemConfiguration;

    /// Place the item under the pointer, displacing what overlaps it. On
    /// failure the dragged item shrinks, starting with X when `dec_x` is set,
    /// until a solution is found or the minimum span is reached.
    fn find_reorder_solution(
        &self,
        layout: &GridLayout,
        params: &ReorderParameters,
        direction: Direction,
        dec_x: bool,
    ) -> ItemConfiguration;

    /// Direction in which overlapped items should be pushed for this drop.
    fn direction_for_drop(&self, layout: &GridLayout, params: &ReorderParameters) -> Direction;

    /// Grow or shrink `dragged` to exactly `cell`, pushing whatever it now
    /// overlaps in `direction`. The span is never reduced to make room.
    fn create_area_for_resize(
        &self,
        layout: &GridLayout,
        cell: CellAndSpan,
        dragged: ItemId,
        direction: Direction,
    ) -> Result<ItemConfiguration> {
        if !cell.fits(layout.count_x(), layout.count_y()) {
            return Err(Error::OutOfBounds {
                id: dragged,
                cell,
                count_x: layout.count_x(),
                count_y: layout.count_y(),
            });
        }
        let pixel = layout.region_center(cell.cell_x, cell.cell_y, cell.span_x, cell.span_y);
        let params = ReorderParameters::new(
            layout,
            pixel,
            cell.span_x,
            cell.span_y,
            cell.span_x,
            cell.span_y,
            Some(dragged),
        )?;
        let solution = self.find_reorder_solution(layout, &params, direction, true);
        debug!(
            id = %dragged,
            found = solution.is_solution,
            moves = solution.moves.len(),
            "resize"
        );
        Ok(solution)
    }

    /// Whether a new item of this span could be placed somewhere on the grid,
    /// displacing others if needed.
    ///
    /// A search is anchored at the top-left corner of every cell in turn,
    /// after a quick check for an existing vacancy. Spans that can never fit
    /// the grid have no solution.
    fn has_reorder_solution(
        &self,
        layout: &GridLayout,
        span_x: i32,
        span_y: i32,
        min_span_x: i32,
        min_span_y: i32,
    ) -> bool {
        let Ok(mut params) = ReorderParameters::new(
            layout,
            Point::default(),
            span_x,
            span_y,
            min_span_x,
            min_span_y,
            None,
        ) else {
            return false;
        };
        // Any vacancy of the minimum span is a solution without displacement.
        if let Some((x, y)) = layout.occupancy().find_vacant_cell(min_span_x, min_span_y) {
            trace!(x, y, "vacant region exists");
            return true;
        }
        for x in 0..layout.count_x() {
            for y in 0..layout.count_y() {
                let corner = layout.cell_to_rect(x, y, 1, 1);
                params.pixel = Point::new(corner.x, corner.y);
                let direction = self.direction_for_drop(layout, &params);
                if self
                    .find_reorder_solution(layout, &params, direction, true)
                    .is_solution
                {
                    trace!(x, y, "reorder solution exists");
                    return true;
                }
            }
        }
        false
    }

    /// Evaluate every strategy and pick one.
    ///
    /// The displacement solution wins when it keeps at least as much area as
    /// the nearest vacancy; otherwise the vacancy, then the drop-in-place
    /// solution. `None` when nothing works.
    fn calculate_reorder(
        &self,
        layout: &GridLayout,
        params: &ReorderParameters,
    ) -> Option<ItemConfiguration> {
        let direction = self.direction_for_drop(layout, params);
        let drop_in_place = self.drop_in_place_solution(layout, params);
        let swap = self.find_reorder_solution(layout, params, direction, true);
        let closest = self.closest_empty_space_reorder(layout, params);

        if swap.is_solution && swap.area() >= closest.area() {
            debug!(?direction, moves = swap.moves.len(), "using reorder solution");
            Some(swap)
        } else if closest.is_solution {
            let (x, y) = (closest.cell_x, closest.cell_y);
            debug!(x, y, "using closest empty space");
            Some(closest)
        } else if drop_in_place.is_solution {
            debug!("using drop in place");
            Some(drop_in_place)
        } else {
            debug!("no placement");
            None
        }
    }
}

/// The strategy for a grid shown as `panel_count` side-by-side panels.
pub fn reorder_for_panels(panel_count: u32) -> Box<dyn Reorder> {
    if panel_count > 1 {
        Box::new(MulticellReorderAlgorithm::new(ReorderAlgorithm::new()))
    } else {
        Box::new(ReorderAlgorithm::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geom::CellMetrics,
        item::{CellAndSpan, GridItem, ItemSpan},
    };

    #[test]
    fn parameters_validate_spans() {
        let l = GridLayout::new(4, 4, CellMetrics::default());
        let p = Point::new(0, 0);
        assert!(ReorderParameters::new(&l, p, 2, 2, 1, 1, None).is_ok());
        assert!(matches!(
            ReorderParameters::new(&l, p, 1, 1, 2, 1, None),
            Err(Error::InvalidSpan { .. })
        ));
        assert!(ReorderParameters::new(&l, p, 5, 1, 1, 1, None).is_err());
        assert!(ReorderParameters::new(&l, p, 1, 1, 0, 1, None).is_err());
        assert!(matches!(
            ReorderParameters::new(&l, p, 1, 1, 1, 1, Some(ItemId::new(9))),
            Err(Error::UnknownItem(_))
        ));
    }

    #[test]
    fn displacement_is_preferred_over_smaller_vacancy() {
        let mut l = GridLayout::new(4, 4, CellMetrics::default());
        // A 2x2 widget in the top-left leaves plenty of room for a 2x2 drop.
        l.add_item(GridItem::widget(ItemId::new(1), ItemSpan::new(0, 0, 2, 2).unwrap()))
            .unwrap();
        let params = ReorderParameters::new(&l, Point::new(100, 100), 2, 2, 2, 2, None).unwrap();
        let s = ReorderAlgorithm.calculate_reorder(&l, &params).unwrap();
        assert_eq!(s.placement(), Some(CellAndSpan::new(0, 0, 2, 2)));
        assert_eq!(s.moves.len(), 1);
    }

    #[test]
    fn no_placement_on_a_full_fixed_grid() {
        let mut l = GridLayout::new(2, 1, CellMetrics::default());
        for x in 0..2 {
            l.add_item(GridItem::icon(ItemId::new(x as u32 + 1), x, 0).with_reorderable(false))
                .unwrap();
        }
        let params = ReorderParameters::new(&l, Point::new(50, 50), 1, 1, 1, 1, None).unwrap();
        assert_eq!(ReorderAlgorithm.calculate_reorder(&l, &params), None);
    }

    #[test]
    fn panel_count_selects_strategy() {
        let mut l = GridLayout::new(4, 2, CellMetrics::default());
        l.add_item(GridItem::widget(ItemId::new(1), ItemSpan::new(0, 0, 2, 1).unwrap()))
            .unwrap();
        let params = ReorderParameters::new(&l, Point::new(200, 50), 2, 1, 2, 1, None).unwrap();
        // A single panel lets the drop straddle the midline.
        let single = reorder_for_panels(1)
            .calculate_reorder(&l, &params)
            .unwrap();
        assert!(single.is_solution);
        let paired = reorder_for_panels(2)
            .calculate_reorder(&l, &params)
            .unwrap();
        let c = paired.placement().unwrap();
        assert!(!(c.cell_x < 2 && c.cell_x + c.span_x > 2));
    }
}
