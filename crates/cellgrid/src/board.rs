//! Text boards: a compact picture of a grid, used by tests and the tester.
//!
//! One text row per grid row:
//!
//! - `-` an empty cell
//! - `i` an icon
//! - `A`–`Z` a folder
//! - `x` a fixed cell that can never be displaced
//! - `m` the main widget, the one being dragged
//! - any other lowercase letter: a widget covering the rectangle of
//!   connected cells with that letter
//!
//! Two-panel grids put both panels on one line separated by `|`:
//!
//! ```text
//! aa--|-ii-
//! aa--|----
//! ```

use std::{
    collections::{BTreeMap, VecDeque},
    fmt,
};

use cellgrid_ids::ItemId;

use crate::{
    error::{Error, Result},
    geom::CellMetrics,
    item::{CellAndSpan, GridItem, ItemKind, ItemSpan},
    layout::GridLayout,
    solution::ItemConfiguration,
};

/// Empty cell.
const EMPTY: char = '-';
/// Icon cell.
const ICON: char = 'i';
/// Fixed, non-reorderable cell.
const FIXED: char = 'x';
/// Main (dragged) widget.
const MAIN: char = 'm';

/// A parsed text board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Width of one panel.
    panel_width: usize,
    /// Number of panels side by side.
    panels: usize,
    /// Rows of cells, panels concatenated.
    rows: Vec<Vec<char>>,
}

/// A layout built from a board, with the letter of every item.
#[derive(Clone, Debug)]
pub struct BoardLayout {
    /// The grid.
    pub layout: GridLayout,
    /// Id of the `m` widget, if the board has one.
    pub main: Option<ItemId>,
    /// Board letter of every item.
    pub labels: BTreeMap<ItemId, char>,
    /// Width of one panel.
    panel_width: usize,
    /// Number of panels.
    panels: usize,
}

impl Board {
    /// Parse a board. Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        let mut shape: Option<(usize, usize)> = None;
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = rows.len();
            let segments: Vec<&str> = line.split('|').collect();
            let width = segments[0].chars().count();
            if width == 0 || segments.iter().any(|s| s.chars().count() != width) {
                return Err(Error::board(row, 0, "panels must be non-empty and equally wide"));
            }
            match shape {
                None => shape = Some((width, segments.len())),
                Some(s) if s != (width, segments.len()) => {
                    return Err(Error::board(row, 0, "row shape differs from the first row"));
                }
                Some(_) => {}
            }
            let cells: Vec<char> = segments.concat().chars().collect();
            if let Some(col) = cells
                .iter()
                .position(|c| *c != EMPTY && !c.is_ascii_alphabetic())
            {
                return Err(Error::board(
                    row,
                    col,
                    format!("unexpected character {:?}", cells[col]),
                ));
            }
            rows.push(cells);
        }
        let Some((panel_width, panels)) = shape else {
            return Err(Error::board(0, 0, "empty board"));
        };
        Ok(Self {
            panel_width,
            panels,
            rows,
        })
    }

    /// Grid width in cells, all panels included.
    pub fn width(&self) -> usize {
        self.panel_width * self.panels
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of side-by-side panels.
    pub fn panel_count(&self) -> usize {
        self.panels
    }

    /// Letter at a cell.
    pub fn at(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y).and_then(|r| r.get(x)).copied()
    }

    /// Build a layout holding every item on the board. Ids are assigned from 1
    /// in row-major order of each item's top-left cell.
    pub fn to_layout(&self, metrics: CellMetrics) -> Result<BoardLayout> {
        let mut layout = GridLayout::new(self.width() as i32, self.height() as i32, metrics);
        let mut labels = BTreeMap::new();
        let mut main = None;
        let mut seen = vec![vec![false; self.width()]; self.height()];
        let mut next_id = 1u32;

        for y in 0..self.height() {
            for x in 0..self.width() {
                let c = self.rows[y][x];
                if c == EMPTY || seen[y][x] {
                    continue;
                }
                let id = ItemId::new(next_id);
                next_id += 1;
                let item = match c {
                    ICON => {
                        seen[y][x] = true;
                        GridItem::icon(id, x as i32, y as i32)
                    }
                    FIXED => {
                        seen[y][x] = true;
                        GridItem::icon(id, x as i32, y as i32)
                            .with_kind(ItemKind::Fixed)
                            .with_reorderable(false)
                    }
                    c if c.is_ascii_uppercase() => {
                        seen[y][x] = true;
                        GridItem::icon(id, x as i32, y as i32).with_kind(ItemKind::Folder)
                    }
                    c => {
                        let cell = self.widget_rect(x, y, &mut seen)?;
                        if c == MAIN {
                            if main.is_some() {
                                return Err(Error::board(y, x, "more than one main widget"));
                            }
                            main = Some(id);
                        }
                        GridItem::widget(
                            id,
                            ItemSpan::new(cell.cell_x, cell.cell_y, cell.span_x, cell.span_y)?,
                        )
                    }
                };
                layout.add_item(item)?;
                labels.insert(id, c);
            }
        }
        Ok(BoardLayout {
            layout,
            main,
            labels,
            panel_width: self.panel_width,
            panels: self.panels,
        })
    }

    /// Flood-fill the widget whose cell is at (`x`, `y`), requiring its cells
    /// to form a rectangle inside one panel.
    fn widget_rect(&self, x: usize, y: usize, seen: &mut [Vec<bool>]) -> Result<CellAndSpan> {
        let c = self.rows[y][x];
        let panel = x / self.panel_width;
        let (mut left, mut top, mut right, mut bottom) = (x, y, x, y);
        let mut count = 0usize;
        let mut queue = VecDeque::from([(x, y)]);
        seen[y][x] = true;
        while let Some((cx, cy)) = queue.pop_front() {
            count += 1;
            left = left.min(cx);
            right = right.max(cx);
            top = top.min(cy);
            bottom = bottom.max(cy);
            let neighbours = [
                cx.checked_sub(1).map(|nx| (nx, cy)),
                cy.checked_sub(1).map(|ny| (cx, ny)),
                Some((cx + 1, cy)),
                Some((cx, cy + 1)),
            ];
            for (nx, ny) in neighbours.into_iter().flatten() {
                if nx / self.panel_width != panel || self.at(nx, ny) != Some(c) || seen[ny][nx] {
                    continue;
                }
                seen[ny][nx] = true;
                queue.push_back((nx, ny));
            }
        }
        let span_x = right - left + 1;
        let span_y = bottom - top + 1;
        if count != span_x * span_y {
            return Err(Error::board(y, x, format!("widget {c:?} is not a rectangle")));
        }
        Ok(CellAndSpan::new(
            left as i32,
            top as i32,
            span_x as i32,
            span_y as i32,
        ))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (x, c) in row.iter().enumerate() {
                if x > 0 && x % self.panel_width == 0 {
                    f.write_str("|")?;
                }
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl BoardLayout {
    /// Picture of the current layout.
    pub fn board(&self) -> Board {
        self.render(&self.layout, None)
    }

    /// Picture of the layout after committing `solution`. The dragged item is
    /// drawn as `m`; when the board had no main widget a new one is drawn at
    /// the solution's placement.
    pub fn board_after(&self, solution: &ItemConfiguration) -> Result<Board> {
        let mut next = self.layout.clone();
        next.apply(solution, self.main)?;
        let extra = match self.main {
            Some(_) => None,
            None => solution.placement(),
        };
        Ok(self.render(&next, extra))
    }

    /// Draw `layout` using the board's letters.
    fn render(&self, layout: &GridLayout, extra: Option<CellAndSpan>) -> Board {
        let width = layout.count_x().max(0) as usize;
        let height = layout.count_y().max(0) as usize;
        let mut rows = vec![vec![EMPTY; width]; height];
        let mut paint = |cell: CellAndSpan, c: char| {
            for y in cell.cell_y..cell.cell_y + cell.span_y {
                for x in cell.cell_x..cell.cell_x + cell.span_x {
                    if let Some(slot) = rows
                        .get_mut(y as usize)
                        .and_then(|r| r.get_mut(x as usize))
                    {
                        *slot = c;
                    }
                }
            }
        };
        for item in layout.items() {
            let c = self.labels.get(&item.id).copied().unwrap_or(match item.kind {
                ItemKind::Icon => ICON,
                ItemKind::Folder => 'A',
                ItemKind::Widget => 'w',
                ItemKind::Fixed => FIXED,
            });
            paint(item.cell(), c);
        }
        if let Some(cell) = extra {
            paint(cell, MAIN);
        }
        Board {
            panel_width: self.panel_width,
            panels: self.panels,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_and_main_widget() {
        let board = Board::parse(
            "
            aa-i
            aaBm
            x--m
            ",
        )
        .unwrap();
        assert_eq!((board.width(), board.height()), (4, 3));
        let b = board.to_layout(CellMetrics::default()).unwrap();
        assert_eq!(b.layout.len(), 5);
        let main = b.main.unwrap();
        assert_eq!(
            b.layout.item(main).unwrap().cell(),
            CellAndSpan::new(3, 1, 1, 2)
        );
        let a = b.layout.item(ItemId::new(1)).unwrap();
        assert_eq!(a.cell(), CellAndSpan::new(0, 0, 2, 2));
        assert_eq!(a.kind, ItemKind::Widget);
        let fixed = b
            .layout
            .items()
            .find(|i| i.kind == ItemKind::Fixed)
            .unwrap();
        assert!(!fixed.reorderable);
        assert_eq!(b.board(), board);
    }

    #[test]
    fn same_letter_regions_are_separate_widgets() {
        let b = Board::parse("a-a\na-a")
            .unwrap()
            .to_layout(CellMetrics::default())
            .unwrap();
        assert_eq!(b.layout.len(), 2);
    }

    #[test]
    fn rejects_malformed_boards() {
        for text in ["", "ab\na", "a?", "aa\na-", "mm-\n--m", "a-|-\n--|--"] {
            let parsed = Board::parse(text).and_then(|b| b.to_layout(CellMetrics::default()));
            assert!(parsed.is_err(), "{text:?}");
        }
    }

    #[test]
    fn two_panel_boards_keep_widgets_inside_their_panel() {
        let board = Board::parse("-a|a-\n-a|a-").unwrap();
        assert_eq!(board.panel_count(), 2);
        assert_eq!(board.width(), 4);
        let b = board.to_layout(CellMetrics::default()).unwrap();
        assert_eq!(b.layout.len(), 2);
        assert_eq!(b.board().to_string(), "-a|a-\n-a|a-");
    }

    #[test]
    fn renders_solutions() {
        let b = Board::parse("ii--")
            .unwrap()
            .to_layout(CellMetrics::default())
            .unwrap();
        let mut s = ItemConfiguration::placed(CellAndSpan::new(0, 0, 1, 1));
        s.moves.insert(ItemId::new(1), CellAndSpan::new(2, 0, 1, 1));
        assert_eq!(b.board_after(&s).unwrap().to_string(), "mii-");
    }
}
