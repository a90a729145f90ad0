use cellgrid::{
    CellPos, Container, GridProfile, ItemPos, Point, ReorderParameters, ScreenId, mapper_for,
    reorder_for_panels,
};

fn desktop(x: i32, y: i32, screen: i32) -> ItemPos {
    ItemPos {
        container: Container::Desktop,
        pos: CellPos::new(x, y, ScreenId::new(screen)),
    }
}

#[test]
fn right_panel_items_present_on_the_even_screen() {
    let profile = GridProfile::from_ron_str("(columns: 8, panel_count: 2)").expect("profile");
    let mapper = mapper_for(&profile);
    let shown = mapper.map_model_to_presenter(&desktop(1, 3, 1));
    assert_eq!(shown, CellPos::new(9, 3, ScreenId::new(0)));
    let stored = mapper.map_presenter_to_model(9, 3, ScreenId::new(0), Container::Desktop);
    assert_eq!(stored, CellPos::new(1, 3, ScreenId::new(1)));
}

#[test]
fn left_panel_and_single_screen_positions_are_unchanged() {
    let paired =
        mapper_for(&GridProfile::from_ron_str("(columns: 8, panel_count: 2)").expect("profile"));
    assert_eq!(
        paired.map_model_to_presenter(&desktop(7, 0, 2)),
        CellPos::new(7, 0, ScreenId::new(2))
    );
    let single = mapper_for(&GridProfile::default());
    assert_eq!(
        single.map_model_to_presenter(&desktop(1, 3, 1)),
        CellPos::new(1, 3, ScreenId::new(1))
    );
    assert_eq!(
        single.map_presenter_to_model(9, 3, ScreenId::new(0), Container::Desktop),
        CellPos::new(9, 3, ScreenId::new(0))
    );
}

#[test]
fn hotseat_drops_store_the_slot_as_screen() {
    let profile =
        GridProfile::from_ron_str("(hotseat: (slots: 5, vertical: true))").expect("profile");
    let mapper = mapper_for(&profile);
    let stored = mapper.map_presenter_to_model(0, 1, ScreenId::new(0), Container::Hotseat);
    assert_eq!(stored.screen_id, ScreenId::new(3));
}

#[test]
fn profile_drives_a_two_panel_drop_end_to_end() {
    let profile =
        GridProfile::from_ron_str("(columns: 2, rows: 2, panel_count: 2)").expect("profile");
    let layout = profile.empty_layout();
    assert_eq!(layout.count_x(), 4);
    let params = ReorderParameters::new(&layout, Point::new(350, 150), 1, 1, 1, 1, None)
        .expect("parameters");
    let s = reorder_for_panels(profile.panel_count)
        .calculate_reorder(&layout, &params)
        .expect("solution");
    let cell = s.placement().expect("placement");
    assert_eq!((cell.cell_x, cell.cell_y), (3, 1));

    // The presenter cell maps back to the right-hand model screen.
    let stored = mapper_for(&profile).map_presenter_to_model(
        cell.cell_x,
        cell.cell_y,
        ScreenId::new(0),
        Container::Desktop,
    );
    assert_eq!(stored, CellPos::new(1, 1, ScreenId::new(1)));
}
