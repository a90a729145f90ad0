//! Shared identifiers for items and screens placed on a cell grid.
#![warn(missing_docs)]

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Identifier for an item (icon, folder or widget) placed on a grid.
///
/// Identifiers are ordered so that maps keyed by them iterate deterministically.
/// The largest value is reserved for the virtual seam column inserted while
/// simulating a two-panel grid and is never handed out to real items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u32);

impl ItemId {
    /// Identifier reserved for the virtual seam column.
    pub const SEAM: Self = Self(u32::MAX);

    /// Construct a new identifier from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// True for the identifier reserved for the seam column.
    #[must_use]
    pub const fn is_seam(self) -> bool {
        self.0 == u32::MAX
    }
}

impl From<u32> for ItemId {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_seam() {
            write!(f, "seam")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Identifier of a logical screen (page) of the desktop.
///
/// On a two-panel desktop screens come in pairs: the even id is the left panel
/// and the following odd id is the right panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ScreenId(i32);

impl ScreenId {
    /// The first desktop screen.
    pub const FIRST: Self = Self(0);

    /// Construct a screen id from its raw value.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// True for left-panel (even) screens.
    #[must_use]
    pub const fn is_even(self) -> bool {
        self.0 % 2 == 0
    }

    /// The left-panel screen this screen is paired with.
    #[must_use]
    pub const fn pair_left(self) -> Self {
        if self.is_even() {
            self
        } else {
            Self(self.0 - 1)
        }
    }

    /// The right-panel screen following this one.
    #[must_use]
    pub const fn pair_right(self) -> Self {
        if self.is_even() {
            Self(self.0 + 1)
        } else {
            self
        }
    }
}

impl From<i32> for ScreenId {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl Display for ScreenId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
