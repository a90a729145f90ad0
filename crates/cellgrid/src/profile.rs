//! Grid profiles: the device-dependent shape of a grid, loaded from RON.
//!
//! ```ron
//! (
//!     columns: 4,
//!     rows: 5,
//!     panel_count: 2,
//!     cell: (cell_width: 120, cell_height: 140, border_x: 8),
//!     hotseat: (slots: 5, vertical: false),
//! )
//! ```
//!
//! Every field is optional and falls back to [`GridProfile::default`].

use std::{fs, path::Path};

use ron::{Options, extensions::Extensions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    geom::CellMetrics,
    layout::GridLayout,
};

/// Hotseat (dock) shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HotseatProfile {
    /// Number of slots.
    pub slots: i32,
    /// Whether the slots run top to bottom.
    pub vertical: bool,
}

impl Default for HotseatProfile {
    fn default() -> Self {
        Self {
            slots: 4,
            vertical: false,
        }
    }
}

/// Shape of a desktop grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridProfile {
    /// Columns of a single panel.
    pub columns: i32,
    /// Rows of the grid.
    pub rows: i32,
    /// 1 for a single screen, 2 for two side-by-side panels.
    pub panel_count: u32,
    /// Pixel geometry of one cell.
    pub cell: CellMetrics,
    /// Dock shape.
    pub hotseat: HotseatProfile,
}

impl Default for GridProfile {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 5,
            panel_count: 1,
            cell: CellMetrics::default(),
            hotseat: HotseatProfile::default(),
        }
    }
}

impl GridProfile {
    /// Parse and validate a profile.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let options = Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        let profile: Self = options
            .from_str(text)
            .map_err(|e| Error::config(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read, parse and validate a profile file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let profile = Self::from_ron_str(&text).map_err(|e| match e {
            Error::Config { message, .. } => Error::Config {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })?;
        debug!(
            path = %path.display(),
            columns = profile.columns,
            rows = profile.rows,
            "loaded grid profile"
        );
        Ok(profile)
    }

    /// Check that every dimension is usable.
    pub fn validate(&self) -> Result<()> {
        if self.columns < 1 || self.rows < 1 {
            return Err(Error::config(format!(
                "grid must have at least one cell, got {}x{}",
                self.columns, self.rows
            )));
        }
        if !(1..=2).contains(&self.panel_count) {
            return Err(Error::config(format!(
                "panel_count must be 1 or 2, got {}",
                self.panel_count
            )));
        }
        if self.hotseat.slots < 1 {
            return Err(Error::config("hotseat needs at least one slot"));
        }
        let c = &self.cell;
        if c.cell_width < 1 || c.cell_height < 1 {
            return Err(Error::config("cell size must be positive"));
        }
        if c.border_x < 0 || c.border_y < 0 || c.padding_left < 0 || c.padding_top < 0 {
            return Err(Error::config("cell spacing must not be negative"));
        }
        Ok(())
    }

    /// Pixel geometry of the grid.
    #[inline]
    pub fn metrics(&self) -> CellMetrics {
        self.cell
    }

    /// Columns of the grid as presented: both panels side by side.
    #[inline]
    pub fn presenter_columns(&self) -> i32 {
        self.columns * self.panel_count as i32
    }

    /// An empty layout with this profile's dimensions.
    pub fn empty_layout(&self) -> GridLayout {
        GridLayout::new(self.presenter_columns(), self.rows, self.metrics())
    }
}
