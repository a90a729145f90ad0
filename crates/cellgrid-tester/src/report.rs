//! Printable and JSON-serialisable results of tester commands.

use std::fmt;

use cellgrid::{BoardLayout, CellAndSpan, CellPos, ItemConfiguration, Point};
use serde::Serialize;

/// A cell region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellReport {
    /// Anchor column.
    pub x: i32,
    /// Anchor row.
    pub y: i32,
    /// Columns covered.
    pub span_x: i32,
    /// Rows covered.
    pub span_y: i32,
}

impl From<CellAndSpan> for CellReport {
    fn from(c: CellAndSpan) -> Self {
        Self {
            x: c.cell_x,
            y: c.cell_y,
            span_x: c.span_x,
            span_y: c.span_y,
        }
    }
}

/// One displaced item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    /// Item id assigned by the board.
    pub id: u32,
    /// Board letter of the item.
    pub label: Option<char>,
    /// Where the item ends up.
    pub to: CellReport,
}

/// Result of a `reorder` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderReport {
    /// Pointer position the search used.
    pub pixel: (i32, i32),
    /// Cell directly under the pointer.
    pub pointer_cell: (i32, i32),
    /// Final region of the dragged item, if it could be placed.
    pub placed: Option<CellReport>,
    /// Items that move to make room.
    pub moves: Vec<MoveReport>,
    /// Board rows after the drop, or the unchanged board when nothing fits.
    pub board: Vec<String>,
}

impl ReorderReport {
    /// Describe `solution` over `grid`; `after` is the committed board.
    pub fn new(
        grid: &BoardLayout,
        pixel: Point,
        solution: Option<&ItemConfiguration>,
        after: Option<String>,
    ) -> Self {
        let moves = solution
            .map(|s| {
                s.moves
                    .iter()
                    .map(|(id, cell)| MoveReport {
                        id: id.get(),
                        label: grid.labels.get(id).copied(),
                        to: (*cell).into(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let board = after.unwrap_or_else(|| grid.board().to_string());
        Self {
            pixel: (pixel.x, pixel.y),
            pointer_cell: grid.layout.point_to_cell_exact(pixel),
            placed: solution
                .and_then(ItemConfiguration::placement)
                .map(Into::into),
            moves,
            board: board.lines().map(str::to_string).collect(),
        }
    }
}

impl fmt::Display for ReorderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.placed {
            Some(c) => writeln!(
                f,
                "placed at ({}, {}) span {}x{}",
                c.x, c.y, c.span_x, c.span_y
            )?,
            None => writeln!(f, "no placement")?,
        }
        let (x, y) = self.pointer_cell;
        writeln!(f, "pointer over ({x}, {y})")?;
        for m in &self.moves {
            let label = m.label.map_or_else(|| "?".to_string(), String::from);
            writeln!(f, "moved {label} (id {}) to ({}, {})", m.id, m.to.x, m.to.y)?;
        }
        write!(f, "{}", self.board.join("\n"))
    }
}

/// A position and the screen it is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PosReport {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Screen id.
    pub screen: i32,
}

impl From<CellPos> for PosReport {
    fn from(p: CellPos) -> Self {
        Self {
            x: p.cell_x,
            y: p.cell_y,
            screen: p.screen_id.get(),
        }
    }
}

/// Result of a `map` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapReport {
    /// Container of the position.
    pub container: String,
    /// `model` or `presenter`: the space of `from`.
    pub from_space: &'static str,
    /// Input position.
    pub from: PosReport,
    /// Converted position.
    pub to: PosReport,
}

impl fmt::Display for MapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {}) on screen {} -> ({}, {}) on screen {}",
            self.container,
            self.from_space,
            self.from.x,
            self.from.y,
            self.from.screen,
            self.to.x,
            self.to.y,
            self.to.screen
        )
    }
}
