//! Placement and reorder engine for launcher-style cell grids.
//!
//! A [`GridLayout`] holds items on a fixed grid of cells. When an item is
//! dragged across the grid, a [`Reorder`] strategy decides where it lands and
//! which items move out of its way, returning an [`ItemConfiguration`] that
//! the caller commits with [`GridLayout::apply`] once the drop completes.
//!
//! Two-panel grids are handled by [`MulticellReorderAlgorithm`], which keeps
//! items from straddling the two panels, together with a [`CellPosMapper`]
//! that converts between stored and on-screen positions.

mod board;
mod error;
mod geom;
mod item;
mod layout;
mod mapper;
mod occupancy;
mod profile;
pub mod reorder;
mod solution;

pub use board::{Board, BoardLayout};
pub use cellgrid_ids::{ItemId, ScreenId};
pub use error::{Error, Result};
pub use geom::{CellMetrics, CellRect, PixelRect, Point};
pub use item::{CellAndSpan, GridItem, ItemKind, ItemSpan};
pub use layout::GridLayout;
pub use mapper::{
    CellPos, CellPosMapper, Container, ItemPos, StandardCellPosMapper, TwoPanelCellPosMapper,
    mapper_for,
};
pub use occupancy::GridOccupancy;
pub use profile::{GridProfile, HotseatProfile};
pub use reorder::{
    Direction, MulticellReorderAlgorithm, Reorder, ReorderAlgorithm, ReorderParameters,
    reorder_for_panels,
};
pub use solution::ItemConfiguration;
