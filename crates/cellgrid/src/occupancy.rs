//! Boolean occupancy matrix over the cells of a grid.

use crate::{geom::CellRect, item::CellAndSpan};

/// Which cells of a `count_x` × `count_y` grid are covered by an item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridOccupancy {
    /// Grid width in cells.
    count_x: i32,
    /// Grid height in cells.
    count_y: i32,
    /// Row-major cell states.
    cells: Vec<bool>,
}

impl GridOccupancy {
    /// An all-vacant grid.
    pub fn new(count_x: i32, count_y: i32) -> Self {
        let count_x = count_x.max(0);
        let count_y = count_y.max(0);
        Self {
            count_x,
            count_y,
            cells: vec![false; (count_x * count_y) as usize],
        }
    }

    /// Grid width in cells.
    #[inline]
    pub fn count_x(&self) -> i32 {
        self.count_x
    }

    /// Grid height in cells.
    #[inline]
    pub fn count_y(&self) -> i32 {
        self.count_y
    }

    /// Index of an in-range cell.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.count_x || y >= self.count_y {
            None
        } else {
            Some((y * self.count_x + x) as usize)
        }
    }

    /// Whether a cell is covered. Cells outside the grid read as vacant.
    #[inline]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Set the state of a cell region.
    ///
    /// A negative anchor leaves the grid untouched; extents past the far edges
    /// are clipped.
    pub fn mark_cells(&mut self, cell_x: i32, cell_y: i32, span_x: i32, span_y: i32, value: bool) {
        if cell_x < 0 || cell_y < 0 {
            return;
        }
        let x_end = (cell_x + span_x).min(self.count_x);
        let y_end = (cell_y + span_y).min(self.count_y);
        for y in cell_y..y_end {
            for x in cell_x..x_end {
                let i = (y * self.count_x + x) as usize;
                self.cells[i] = value;
            }
        }
    }

    /// Set the state of the cells covered by `c`.
    #[inline]
    pub fn mark(&mut self, c: &CellAndSpan, value: bool) {
        self.mark_cells(c.cell_x, c.cell_y, c.span_x, c.span_y, value);
    }

    /// Set the state of the cells covered by `r`.
    #[inline]
    pub fn mark_rect(&mut self, r: &CellRect, value: bool) {
        self.mark_cells(r.left, r.top, r.width(), r.height(), value);
    }

    /// Copy this grid's state into `dest`, resizing it if needed.
    pub fn copy_to(&self, dest: &mut Self) {
        dest.count_x = self.count_x;
        dest.count_y = self.count_y;
        dest.cells.clone_from(&self.cells);
    }

    /// True when every cell of the region is inside the grid and vacant.
    pub fn is_region_vacant(&self, cell_x: i32, cell_y: i32, span_x: i32, span_y: i32) -> bool {
        if cell_x < 0
            || cell_y < 0
            || cell_x + span_x > self.count_x
            || cell_y + span_y > self.count_y
        {
            return false;
        }
        (cell_y..cell_y + span_y)
            .all(|y| (cell_x..cell_x + span_x).all(|x| !self.is_occupied(x, y)))
    }

    /// First vacant region of the given span, scanning rows top to bottom.
    pub fn find_vacant_cell(&self, span_x: i32, span_y: i32) -> Option<(i32, i32)> {
        for y in 0..=(self.count_y - span_y) {
            for x in 0..=(self.count_x - span_x) {
                if self.is_region_vacant(x, y, span_x, span_y) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Number of covered cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_query() {
        let mut g = GridOccupancy::new(4, 3);
        g.mark_cells(1, 1, 2, 2, true);
        assert!(g.is_occupied(1, 1));
        assert!(g.is_occupied(2, 2));
        assert!(!g.is_occupied(0, 0));
        assert!(!g.is_occupied(3, 1));
        assert_eq!(g.occupied_count(), 4);
        g.mark(&CellAndSpan::new(1, 1, 1, 1), false);
        assert_eq!(g.occupied_count(), 3);
    }

    #[test]
    fn marking_clips_and_ignores_negative_anchor() {
        let mut g = GridOccupancy::new(3, 3);
        g.mark_cells(2, 2, 5, 5, true);
        assert_eq!(g.occupied_count(), 1);
        g.mark_cells(-1, 0, 3, 3, true);
        assert_eq!(g.occupied_count(), 1);
        assert!(!g.is_occupied(-1, 0));
        assert!(!g.is_occupied(3, 3));
    }

    #[test]
    fn copy_to_resizes_destination() {
        let mut a = GridOccupancy::new(2, 2);
        a.mark_cells(0, 0, 1, 1, true);
        let mut b = GridOccupancy::new(5, 5);
        a.copy_to(&mut b);
        assert_eq!(a, b);
        b.mark_cells(1, 1, 1, 1, true);
        assert_eq!(b.occupied_count(), 2);
        assert_eq!(a.occupied_count(), 1);
    }

    #[test]
    fn vacancy_search() {
        let mut g = GridOccupancy::new(4, 4);
        g.mark_cells(0, 0, 3, 1, true);
        assert_eq!(g.find_vacant_cell(1, 1), Some((3, 0)));
        assert_eq!(g.find_vacant_cell(2, 2), Some((0, 1)));
        assert!(!g.is_region_vacant(3, 0, 2, 1));
        g.mark_cells(0, 0, 4, 4, true);
        assert_eq!(g.find_vacant_cell(1, 1), None);
    }
}
