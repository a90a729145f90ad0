//! Cell-space rectangles and the pixel metrics used to map pointer positions onto cells.

use serde::{Deserialize, Serialize};

/// Rectangle in cell units. `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CellRect {
    /// First covered column.
    pub left: i32,
    /// First covered row.
    pub top: i32,
    /// One past the last covered column.
    pub right: i32,
    /// One past the last covered row.
    pub bottom: i32,
}

impl CellRect {
    /// Build a rectangle from an anchor cell and a span.
    #[inline]
    pub const fn from_span(cell_x: i32, cell_y: i32, span_x: i32, span_y: i32) -> Self {
        Self {
            left: cell_x,
            top: cell_y,
            right: cell_x + span_x,
            bottom: cell_y + span_y,
        }
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height in cells.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when the rectangle covers no cell.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// True when both rectangles cover at least one common cell.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// True when `other` lies entirely inside this rectangle. An empty
    /// rectangle contains nothing.
    #[inline]
    pub const fn contains(&self, other: &Self) -> bool {
        !self.is_empty()
            && self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }

    /// Smallest rectangle covering both.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Pixel position relative to the grid's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal pixel offset.
    pub x: i32,
    /// Vertical pixel offset.
    pub y: i32,
}

impl Point {
    /// Construct a point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel rectangle returned by [`CellMetrics::cell_to_rect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl PixelRect {
    /// Horizontal centre, rounded down like integer view coordinates.
    #[inline]
    pub const fn cx(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Vertical centre.
    #[inline]
    pub const fn cy(&self) -> i32 {
        self.y + self.h / 2
    }
}

/// Pixel geometry of a grid: cell size, spacing between cells and padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CellMetrics {
    /// Width of a single cell.
    pub cell_width: i32,
    /// Height of a single cell.
    pub cell_height: i32,
    /// Horizontal gap between neighbouring cells.
    pub border_x: i32,
    /// Vertical gap between neighbouring cells.
    pub border_y: i32,
    /// Padding before the first column.
    pub padding_left: i32,
    /// Padding above the first row.
    pub padding_top: i32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 100,
            cell_height: 100,
            border_x: 0,
            border_y: 0,
            padding_left: 0,
            padding_top: 0,
        }
    }
}

impl CellMetrics {
    /// Distance between the left edges of neighbouring columns.
    #[inline]
    pub const fn stride_x(&self) -> i32 {
        self.cell_width + self.border_x
    }

    /// Distance between the top edges of neighbouring rows.
    #[inline]
    pub const fn stride_y(&self) -> i32 {
        self.cell_height + self.border_y
    }

    /// Pixel rectangle covered by a cell region.
    ///
    /// `seam` is the column index of a virtual seam, if one is present. The seam
    /// has no pixel width: it shares its pixels with the column that follows
    /// it, and every column after it is drawn one stride to the left.
    pub fn cell_to_rect(
        &self,
        cell_x: i32,
        cell_y: i32,
        span_x: i32,
        span_y: i32,
        seam: Option<i32>,
    ) -> PixelRect {
        let first = visual_column(cell_x, seam);
        let last = visual_column(cell_x + span_x - 1, seam).max(first);
        let x = self.padding_left + first * self.stride_x();
        let y = self.padding_top + cell_y * self.stride_y();
        let cols = last - first + 1;
        PixelRect {
            x,
            y,
            w: cols * self.cell_width + (cols - 1) * self.border_x,
            h: span_y * self.cell_height + (span_y - 1) * self.border_y,
        }
    }

    /// Centre point of a cell region.
    #[inline]
    pub fn region_center(
        &self,
        cell_x: i32,
        cell_y: i32,
        span_x: i32,
        span_y: i32,
        seam: Option<i32>,
    ) -> Point {
        let r = self.cell_to_rect(cell_x, cell_y, span_x, span_y, seam);
        Point::new(r.cx(), r.cy())
    }

    /// Centre point of a single cell.
    #[inline]
    pub fn cell_center(&self, cell_x: i32, cell_y: i32, seam: Option<i32>) -> Point {
        self.region_center(cell_x, cell_y, 1, 1, seam)
    }

    /// The cell that strictly encloses `p`, clamped into a `count_x` × `count_y` grid.
    pub fn point_to_cell_exact(&self, p: Point, count_x: i32, count_y: i32) -> (i32, i32) {
        let x = (p.x - self.padding_left).div_euclid(self.stride_x().max(1));
        let y = (p.y - self.padding_top).div_euclid(self.stride_y().max(1));
        (
            x.clamp(0, (count_x - 1).max(0)),
            y.clamp(0, (count_y - 1).max(0)),
        )
    }
}

/// Column index as drawn on screen, skipping a zero-width seam.
#[inline]
fn visual_column(col: i32, seam: Option<i32>) -> i32 {
    match seam {
        Some(s) if col > s => col - 1,
        _ => col,
    }
}
