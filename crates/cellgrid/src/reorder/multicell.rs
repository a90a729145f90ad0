//! Reorder over two side-by-side panels that share one logical grid.
//!
//! The panels are searched as a single grid with a virtual, non-reorderable
//! column inserted at the midline. Since nothing may cover that column, no
//! placement or displacement can straddle the two panels. Results are then
//! translated back to coordinates without the seam.

use tracing::debug;

use cellgrid_ids::ItemId;

use crate::{layout::GridLayout, solution::ItemConfiguration};

use super::{Reorder, ReorderParameters, direction::Direction};

/// Decorates another [`Reorder`] with seam simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct MulticellReorderAlgorithm<R> {
    /// The wrapped single-grid strategy.
    inner: R,
}

impl<R: Reorder> MulticellReorderAlgorithm<R> {
    /// Wrap `inner`.
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Run `f` against a seamed copy of `layout`, returning its result and the
    /// seam column inserted for this call. A layout that already carries a seam
    /// is passed through unchanged and no column is reported.
    fn simulate_seam<T>(
        &self,
        layout: &GridLayout,
        f: impl FnOnce(&R, &GridLayout) -> T,
    ) -> (T, Option<i32>) {
        if layout.seam_column().is_some() {
            return (f(&self.inner, layout), None);
        }
        let seamed = layout.with_seam();
        let seam = seamed.seam_column();
        debug!(seam, count_x = seamed.count_x(), "simulating seam");
        (f(&self.inner, &seamed), seam)
    }

    /// As [`Self::simulate_seam`], stripping the seam from the returned
    /// configuration.
    fn seamed(
        &self,
        layout: &GridLayout,
        f: impl FnOnce(&R, &GridLayout) -> ItemConfiguration,
    ) -> ItemConfiguration {
        match self.simulate_seam(layout, f) {
            (solution, Some(seam)) => remove_seam_from_solution(solution, seam),
            (solution, None) => solution,
        }
    }
}

impl<R: Reorder> Reorder for MulticellReorderAlgorithm<R> {
    fn drop_in_place_solution(
        &self,
        layout: &GridLayout,
        params: &ReorderParameters,
    ) -> ItemConfiguration {
        self.seamed(layout, |inner, l| inner.drop_in_place_solution(l, params))
    }

    fn closest_empty_space_reorder(
        &self,
        layout: &GridLayout,
        params: &ReorderParameters,
    ) -> ItemConfiguration {
        self.seamed(layout, |inner, l| {
            inner.closest_empty_space_reorder(l, params)
        })
    }

    fn find_reorder_solution(
        &self,
        layout: &GridLayout,
        params: &ReorderParameters,
        direction: Direction,
        dec_x: bool,
    ) -> ItemConfiguration {
        self.seamed(layout, |inner, l| {
            inner.find_reorder_solution(l, params, direction, dec_x)
        })
    }

    fn direction_for_drop(&self, layout: &GridLayout, params: &ReorderParameters) -> Direction {
        self.simulate_seam(layout, |inner, l| inner.direction_for_drop(l, params))
            .0
    }

    fn has_reorder_solution(
        &self,
        layout: &GridLayout,
        span_x: i32,
        span_y: i32,
        min_span_x: i32,
        min_span_y: i32,
    ) -> bool {
        self.simulate_seam(layout, |inner, l| {
            inner.has_reorder_solution(l, span_x, span_y, min_span_x, min_span_y)
        })
        .0
    }

    fn calculate_reorder(
        &self,
        layout: &GridLayout,
        params: &ReorderParameters,
    ) -> Option<ItemConfiguration> {
        match self.simulate_seam(layout, |inner, l| inner.calculate_reorder(l, params)) {
            (solution, Some(seam)) => solution.map(|s| remove_seam_from_solution(s, seam)),
            (solution, None) => solution,
        }
    }
}

/// Translate a configuration computed on a seamed grid back to the real grid:
/// the seam item is dropped and every column right of `seam` shifts left.
pub fn remove_seam_from_solution(mut solution: ItemConfiguration, seam: i32) -> ItemConfiguration {
    solution.moves.remove(&ItemId::SEAM);
    for cell in solution.moves.values_mut() {
        if cell.cell_x > seam {
            cell.cell_x -= 1;
        }
    }
    solution.intersecting.retain(|id| !id.is_seam());
    if solution.is_solution && solution.cell_x > seam {
        solution.cell_x -= 1;
    }
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geom::{CellMetrics, Point},
        item::{CellAndSpan, GridItem, ItemSpan},
        reorder::ReorderAlgorithm,
    };

    fn two_panel() -> GridLayout {
        GridLayout::new(4, 2, CellMetrics::default())
    }

    #[test]
    fn strip_shifts_right_panel_and_drops_seam() {
        let mut s = ItemConfiguration::placed(CellAndSpan::new(3, 0, 2, 1));
        s.moves.insert(ItemId::new(1), CellAndSpan::new(4, 1, 1, 1));
        s.moves.insert(ItemId::new(2), CellAndSpan::new(0, 1, 1, 1));
        s.moves.insert(ItemId::SEAM, CellAndSpan::new(2, 0, 1, 2));
        s.intersecting = vec![ItemId::SEAM, ItemId::new(1)];
        let s = remove_seam_from_solution(s, 2);
        assert_eq!(s.cell_x, 2);
        assert_eq!(
            s.moves.get(&ItemId::new(1)),
            Some(&CellAndSpan::new(3, 1, 1, 1))
        );
        assert_eq!(
            s.moves.get(&ItemId::new(2)),
            Some(&CellAndSpan::new(0, 1, 1, 1))
        );
        assert!(!s.moves.contains_key(&ItemId::SEAM));
        assert_eq!(s.intersecting, vec![ItemId::new(1)]);
    }

    #[test]
    fn placement_never_straddles_the_midline() {
        let l = two_panel();
        let alg = MulticellReorderAlgorithm::new(ReorderAlgorithm::new());
        // Pointer exactly on the midline of an empty grid.
        let params = ReorderParameters::new(&l, Point::new(200, 50), 2, 1, 2, 1, None).unwrap();
        let s = alg.calculate_reorder(&l, &params).unwrap();
        let c = s.placement().unwrap();
        assert!(c.cell_x + c.span_x <= 2 || c.cell_x >= 2);
        assert!(c.fits(4, 2));
    }

    #[test]
    fn right_panel_coordinates_round_trip() {
        let mut l = two_panel();
        l.add_item(GridItem::icon(ItemId::new(1), 3, 0)).unwrap();
        let alg = MulticellReorderAlgorithm::new(ReorderAlgorithm::new());
        let params = ReorderParameters::new(&l, Point::new(350, 50), 1, 1, 1, 1, None).unwrap();
        let s = alg.find_reorder_solution(&l, &params, Direction::LEFT, true);
        assert_eq!(s.placement(), Some(CellAndSpan::new(3, 0, 1, 1)));
        assert_eq!(
            s.moves.get(&ItemId::new(1)),
            Some(&CellAndSpan::new(2, 0, 1, 1))
        );
        let mut committed = l.clone();
        committed.apply(&s, None).unwrap();
    }

    #[test]
    fn seamed_layouts_are_not_seamed_twice() {
        let l = two_panel().with_seam();
        let alg = MulticellReorderAlgorithm::new(ReorderAlgorithm::new());
        let params = ReorderParameters::new(&l, Point::new(50, 50), 1, 1, 1, 1, None).unwrap();
        let s = alg.drop_in_place_solution(&l, &params);
        assert_eq!(s.placement(), Some(CellAndSpan::new(0, 0, 1, 1)));
        assert_eq!(l.count_x(), 5);
    }

    #[test]
    fn widgets_do_not_cross_when_pushed() {
        let mut l = two_panel();
        l.add_item(GridItem::widget(ItemId::new(1), ItemSpan::new(0, 0, 2, 1).unwrap()))
            .unwrap();
        let alg = MulticellReorderAlgorithm::new(ReorderAlgorithm::new());
        let params = ReorderParameters::new(&l, Point::new(100, 50), 2, 1, 2, 1, None).unwrap();
        let s = alg.find_reorder_solution(&l, &params, Direction::RIGHT, true);
        assert!(s.is_solution);
        for cell in s.moves.values() {
            assert!(cell.cell_x + cell.span_x <= 2 || cell.cell_x >= 2);
        }
    }
}
