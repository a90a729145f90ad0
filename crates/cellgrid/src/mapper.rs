//! Translation between stored (model) cell positions and the positions shown
//! on screen (presenter).
//!
//! In two-panel mode an odd model screen is drawn as the right half of the
//! even screen before it, so the presenter sees one grid twice as wide.

use std::fmt;

use cellgrid_ids::{ItemId, ScreenId};

use crate::profile::GridProfile;

/// Where an item lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// A home screen page.
    Desktop,
    /// The dock row or column.
    Hotseat,
    /// Inside a folder.
    Folder(ItemId),
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Desktop => f.write_str("desktop"),
            Self::Hotseat => f.write_str("hotseat"),
            Self::Folder(id) => write!(f, "folder {id}"),
        }
    }
}

/// A cell on a screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CellPos {
    /// Column.
    pub cell_x: i32,
    /// Row.
    pub cell_y: i32,
    /// Screen. For hotseat items this is the slot index.
    pub screen_id: ScreenId,
}

impl CellPos {
    /// Construct a cell position.
    pub const fn new(cell_x: i32, cell_y: i32, screen_id: ScreenId) -> Self {
        Self {
            cell_x,
            cell_y,
            screen_id,
        }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) on screen {}",
            self.cell_x, self.cell_y, self.screen_id
        )
    }
}

/// A stored item position together with its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemPos {
    /// Owning container.
    pub container: Container,
    /// Model-space position.
    pub pos: CellPos,
}

/// Converts positions between model and presenter space.
pub trait CellPosMapper {
    /// Presenter position of a stored item.
    fn map_model_to_presenter(&self, item: &ItemPos) -> CellPos;

    /// Model position of a cell the user dropped onto.
    fn map_presenter_to_model(
        &self,
        presenter_x: i32,
        presenter_y: i32,
        presenter_screen: ScreenId,
        container: Container,
    ) -> CellPos;
}

/// Identity mapping, plus hotseat slot derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardCellPosMapper {
    /// Whether the hotseat is laid out as a column.
    pub vertical_hotseat: bool,
    /// Number of hotseat slots.
    pub hotseat_slots: i32,
}

impl StandardCellPosMapper {
    /// A mapper for the given hotseat shape.
    pub const fn new(vertical_hotseat: bool, hotseat_slots: i32) -> Self {
        Self {
            vertical_hotseat,
            hotseat_slots,
        }
    }
}

impl Default for StandardCellPosMapper {
    fn default() -> Self {
        Self::new(false, 4)
    }
}

impl CellPosMapper for StandardCellPosMapper {
    fn map_model_to_presenter(&self, item: &ItemPos) -> CellPos {
        item.pos
    }

    fn map_presenter_to_model(
        &self,
        presenter_x: i32,
        presenter_y: i32,
        presenter_screen: ScreenId,
        container: Container,
    ) -> CellPos {
        let screen_id = match container {
            // Vertical hotseats store slots bottom-up.
            Container::Hotseat if self.vertical_hotseat => {
                ScreenId::new(self.hotseat_slots - presenter_y - 1)
            }
            Container::Hotseat => ScreenId::new(presenter_x),
            _ => presenter_screen,
        };
        CellPos::new(presenter_x, presenter_y, screen_id)
    }
}

/// Presents each pair of model screens (even, odd) as one double-width screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TwoPanelCellPosMapper {
    /// Columns of a single panel.
    pub column_count: i32,
    /// Fallback for everything that is not a paired desktop cell.
    pub base: StandardCellPosMapper,
}

impl TwoPanelCellPosMapper {
    /// A two-panel mapper for panels `column_count` wide.
    pub const fn new(column_count: i32, base: StandardCellPosMapper) -> Self {
        Self { column_count, base }
    }
}

impl CellPosMapper for TwoPanelCellPosMapper {
    fn map_model_to_presenter(&self, item: &ItemPos) -> CellPos {
        if item.container != Container::Desktop || item.pos.screen_id.is_even() {
            return self.base.map_model_to_presenter(item);
        }
        CellPos::new(
            item.pos.cell_x + self.column_count,
            item.pos.cell_y,
            item.pos.screen_id.pair_left(),
        )
    }

    fn map_presenter_to_model(
        &self,
        presenter_x: i32,
        presenter_y: i32,
        presenter_screen: ScreenId,
        container: Container,
    ) -> CellPos {
        if container == Container::Desktop
            && presenter_screen.is_even()
            && presenter_x >= self.column_count
        {
            return CellPos::new(
                presenter_x - self.column_count,
                presenter_y,
                presenter_screen.pair_right(),
            );
        }
        self.base
            .map_presenter_to_model(presenter_x, presenter_y, presenter_screen, container)
    }
}

/// The mapper matching a profile's panel layout.
pub fn mapper_for(profile: &GridProfile) -> Box<dyn CellPosMapper> {
    let base = StandardCellPosMapper::new(profile.hotseat.vertical, profile.hotseat.slots);
    if profile.panel_count > 1 {
        Box::new(TwoPanelCellPosMapper::new(profile.columns, base))
    } else {
        Box::new(base)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn desktop(x: i32, y: i32, screen: i32) -> ItemPos {
        ItemPos {
            container: Container::Desktop,
            pos: CellPos::new(x, y, ScreenId::new(screen)),
        }
    }

    #[test]
    fn odd_screens_join_the_even_screen_before_them() {
        let m = TwoPanelCellPosMapper::new(8, StandardCellPosMapper::default());
        let p = m.map_model_to_presenter(&desktop(1, 2, 1));
        assert_eq!(p, CellPos::new(9, 2, ScreenId::new(0)));
        let back = m.map_presenter_to_model(9, 2, ScreenId::new(0), Container::Desktop);
        assert_eq!(back, CellPos::new(1, 2, ScreenId::new(1)));
    }

    #[test]
    fn even_screens_and_other_containers_pass_through() {
        let m = TwoPanelCellPosMapper::new(4, StandardCellPosMapper::default());
        assert_eq!(
            m.map_model_to_presenter(&desktop(3, 1, 2)),
            CellPos::new(3, 1, ScreenId::new(2))
        );
        let folder = ItemPos {
            container: Container::Folder(ItemId::new(5)),
            pos: CellPos::new(2, 0, ScreenId::new(3)),
        };
        assert_eq!(m.map_model_to_presenter(&folder), folder.pos);
        assert_eq!(
            m.map_presenter_to_model(2, 0, ScreenId::new(3), folder.container),
            folder.pos
        );
    }

    #[test]
    fn hotseat_slots_follow_orientation() {
        let horizontal = StandardCellPosMapper::new(false, 5);
        assert_eq!(
            horizontal.map_presenter_to_model(3, 0, ScreenId::new(0), Container::Hotseat),
            CellPos::new(3, 0, ScreenId::new(3))
        );
        let vertical = StandardCellPosMapper::new(true, 5);
        assert_eq!(
            vertical.map_presenter_to_model(0, 1, ScreenId::new(0), Container::Hotseat),
            CellPos::new(0, 1, ScreenId::new(3))
        );
    }

    #[test]
    fn profile_selects_mapper() {
        let mut profile = GridProfile::default();
        let single = mapper_for(&profile);
        assert_eq!(
            single.map_model_to_presenter(&desktop(1, 1, 1)),
            CellPos::new(1, 1, ScreenId::new(1))
        );
        profile.panel_count = 2;
        let paired = mapper_for(&profile);
        assert_eq!(
            paired.map_model_to_presenter(&desktop(1, 1, 1)),
            CellPos::new(1 + profile.columns, 1, ScreenId::new(0))
        );
    }

    fn base_strategy() -> impl Strategy<Value = StandardCellPosMapper> {
        (any::<bool>(), 1i32..8).prop_map(|(v, n)| StandardCellPosMapper::new(v, n))
    }

    fn item_strategy(
        base: StandardCellPosMapper,
        columns: i32,
        rows: i32,
    ) -> impl Strategy<Value = ItemPos> {
        let slots = base.hotseat_slots;
        (
            0..columns,
            0..rows,
            0i32..8,
            0..slots,
            prop_oneof![Just(Container::Desktop), Just(Container::Hotseat)],
        )
            .prop_map(move |(x, y, screen, slot, container)| match container {
                // Hotseat items are stored with their slot as the screen; a
                // vertical hotseat counts slots from the bottom.
                Container::Hotseat if base.vertical_hotseat => ItemPos {
                    container,
                    pos: CellPos::new(0, slot, ScreenId::new(slots - slot - 1)),
                },
                Container::Hotseat => ItemPos {
                    container,
                    pos: CellPos::new(slot, 0, ScreenId::new(slot)),
                },
                _ => ItemPos {
                    container,
                    pos: CellPos::new(x, y, ScreenId::new(screen)),
                },
            })
    }

    proptest! {
        #[test]
        fn presenter_round_trip(
            (base, item) in base_strategy()
                .prop_flat_map(|base| (Just(base), item_strategy(base, 4, 5))),
            two_panel in any::<bool>(),
        ) {
            let mapper: Box<dyn CellPosMapper> = if two_panel {
                Box::new(TwoPanelCellPosMapper::new(4, base))
            } else {
                Box::new(base)
            };
            let p = mapper.map_model_to_presenter(&item);
            let back =
                mapper.map_presenter_to_model(p.cell_x, p.cell_y, p.screen_id, item.container);
            prop_assert_eq!(back, item.pos);
        }
    }
}
