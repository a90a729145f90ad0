use cellgrid::{
    Board, BoardLayout, CellAndSpan, CellMetrics, Direction, Error, ItemConfiguration, Point,
    Reorder, ReorderAlgorithm, ReorderParameters, reorder_for_panels,
};

fn load(text: &str) -> BoardLayout {
    Board::parse(text)
        .and_then(|b| b.to_layout(CellMetrics::default()))
        .expect("board")
}

fn drop_at(
    board: &BoardLayout,
    x: i32,
    y: i32,
    span: (i32, i32),
    min: (i32, i32),
) -> ReorderParameters {
    ReorderParameters::new(
        &board.layout,
        Point::new(x, y),
        span.0,
        span.1,
        min.0,
        min.1,
        board.main,
    )
    .expect("parameters")
}

fn after(board: &BoardLayout, solution: &ItemConfiguration) -> String {
    board.board_after(solution).expect("commit").to_string()
}

fn assert_no_straddle(cell: &CellAndSpan, midline: i32) {
    assert!(
        cell.cell_x + cell.span_x <= midline || cell.cell_x >= midline,
        "{cell:?} crosses column {midline}"
    );
}

#[test]
fn icon_lands_under_the_pointer_on_an_empty_grid() {
    let board = load("----\n----\n----\n----");
    let params = drop_at(&board, 250, 250, (1, 1), (1, 1));
    let s = ReorderAlgorithm::new()
        .calculate_reorder(&board.layout, &params)
        .expect("solution");
    assert_eq!(s.placement(), Some(CellAndSpan::new(2, 2, 1, 1)));
    assert!(s.moves.is_empty());
    assert_eq!(after(&board, &s), "----\n----\n--m-\n----");
}

#[test]
fn vacancy_under_the_pointer_moves_nothing() {
    let board = load(
        "
        i---
        ----
        ----
        ----
        ",
    );
    let params = drop_at(&board, 250, 250, (1, 1), (1, 1));
    let alg = ReorderAlgorithm::new();
    let in_place = alg.drop_in_place_solution(&board.layout, &params);
    assert_eq!(in_place.placement(), Some(CellAndSpan::new(2, 2, 1, 1)));
    let s = alg
        .calculate_reorder(&board.layout, &params)
        .expect("solution");
    assert_eq!(s.placement(), Some(CellAndSpan::new(2, 2, 1, 1)));
    assert!(s.moves.is_empty());
    assert_eq!(after(&board, &s), "i---\n----\n--m-\n----");
}

#[test]
fn widget_pushes_overlapped_widget_aside() {
    let board = load(
        "
        aa--
        aa--
        ----
        ----
        ",
    );
    let params = drop_at(&board, 100, 100, (2, 2), (2, 2));
    let alg = ReorderAlgorithm::new();
    let in_place = alg.drop_in_place_solution(&board.layout, &params);
    assert!(!in_place.is_solution);
    let s = alg
        .calculate_reorder(&board.layout, &params)
        .expect("solution");
    assert_eq!(s.placement(), Some(CellAndSpan::new(0, 0, 2, 2)));
    assert_eq!(s.intersecting.len(), 1);
    assert_eq!(after(&board, &s), "mmaa\nmmaa\n----\n----");
}

#[test]
fn row_of_icons_shifts_together() {
    let board = load("-ii-");
    let params = drop_at(&board, 150, 50, (1, 1), (1, 1));
    let s = ReorderAlgorithm::new()
        .calculate_reorder(&board.layout, &params)
        .expect("solution");
    assert_eq!(s.moves.len(), 2);
    assert_eq!(after(&board, &s), "-mii");
}

#[test]
fn fixed_cells_send_the_drop_to_a_vacancy() {
    let board = load("-x--");
    let params = drop_at(&board, 150, 50, (1, 1), (1, 1));
    let alg = ReorderAlgorithm::new();
    let in_place = alg.drop_in_place_solution(&board.layout, &params);
    assert!(!in_place.is_solution);
    let s = alg
        .calculate_reorder(&board.layout, &params)
        .expect("solution");
    assert!(s.moves.is_empty());
    let cell = s.placement().expect("placement");
    assert_ne!(cell.cell_x, 1);
    assert_eq!(board.board_after(&s).expect("commit").at(1, 0), Some('x'));
}

#[test]
fn resizable_widget_shrinks_to_fit() {
    let board = load(
        "
        -x--
        -x--
        -x--
        -x--
        ",
    );
    let params = drop_at(&board, 300, 200, (3, 2), (2, 1));
    let s = ReorderAlgorithm::new()
        .calculate_reorder(&board.layout, &params)
        .expect("solution");
    assert_eq!(s.placement(), Some(CellAndSpan::new(2, 1, 2, 2)));
    assert!(s.moves.is_empty());
    assert_eq!(after(&board, &s), "-x--\n-xmm\n-xmm\n-x--");
}

#[test]
fn dragged_widget_moves_over_its_own_cells() {
    let board = load(
        "
        mm--
        mm--
        ----
        ----
        ",
    );
    let params = drop_at(&board, 150, 150, (2, 2), (2, 2));
    let s = ReorderAlgorithm::new()
        .calculate_reorder(&board.layout, &params)
        .expect("solution");
    assert_eq!(s.placement(), Some(CellAndSpan::new(1, 1, 2, 2)));
    assert!(s.moves.is_empty());
    assert_eq!(after(&board, &s), "----\n-mm-\n-mm-\n----");
}

#[test]
fn committed_board_matches_input_when_nothing_moves() {
    let board = load("ab-\nab-\nii-");
    assert_eq!(board.board().to_string(), "ab-\nab-\nii-");
    assert_eq!(board.layout.len(), 4);
}

#[test]
fn two_panel_drops_stay_inside_one_panel() {
    let board = load(
        "
        aa|--
        --|--
        ",
    );
    let alg = reorder_for_panels(2);
    for x in (0..400).step_by(50) {
        let params = drop_at(&board, x, 50, (2, 1), (2, 1));
        let Some(s) = alg.calculate_reorder(&board.layout, &params) else {
            continue;
        };
        assert_no_straddle(&s.placement().expect("placement"), 2);
        for cell in s.moves.values() {
            assert_no_straddle(cell, 2);
        }
        let committed = board.board_after(&s).expect("commit");
        assert_eq!(committed.panel_count(), 2);
    }
}

#[test]
fn single_panel_drops_may_use_the_midline() {
    let board = load("----\n----");
    let params = drop_at(&board, 200, 50, (2, 1), (2, 1));
    let single = reorder_for_panels(1)
        .calculate_reorder(&board.layout, &params)
        .expect("solution");
    assert_eq!(single.placement(), Some(CellAndSpan::new(1, 0, 2, 1)));
    let paired = reorder_for_panels(2)
        .calculate_reorder(&board.layout, &params)
        .expect("solution");
    assert_no_straddle(&paired.placement().expect("placement"), 2);
}

#[test]
fn resize_pushes_the_neighbour_aside() {
    let board = load("mi--\n----");
    let main = board.main.expect("main");
    let s = ReorderAlgorithm::new()
        .create_area_for_resize(
            &board.layout,
            CellAndSpan::new(0, 0, 2, 1),
            main,
            Direction::RIGHT,
        )
        .expect("resize");
    assert_eq!(s.placement(), Some(CellAndSpan::new(0, 0, 2, 1)));
    assert_eq!(s.moves.len(), 1);
    assert_eq!(after(&board, &s), "mmi-\n----");
}

#[test]
fn resize_into_a_fixed_cell_fails_without_shrinking() {
    let board = load("mx--\n----");
    let main = board.main.expect("main");
    let alg = ReorderAlgorithm::new();
    let s = alg
        .create_area_for_resize(
            &board.layout,
            CellAndSpan::new(0, 0, 2, 1),
            main,
            Direction::RIGHT,
        )
        .expect("resize");
    assert!(!s.is_solution);
    let outside = alg.create_area_for_resize(
        &board.layout,
        CellAndSpan::new(3, 0, 2, 1),
        main,
        Direction::RIGHT,
    );
    assert!(matches!(outside, Err(Error::OutOfBounds { .. })));
}

#[test]
fn reorder_solution_exists_only_when_items_can_make_room() {
    let alg = ReorderAlgorithm::new();
    let full = load("ii\nii");
    assert!(!alg.has_reorder_solution(&full.layout, 1, 1, 1, 1));

    // No vacant 2x1 region, but the top-left icon can step down.
    let gappy = load("i-i\n-i-");
    assert!(alg.has_reorder_solution(&gappy.layout, 2, 1, 2, 1));
    assert!(!alg.has_reorder_solution(&gappy.layout, 4, 1, 4, 1));
}

#[test]
fn two_panel_grids_have_no_room_for_a_straddling_span() {
    let board = load("----");
    let (single, paired) = (reorder_for_panels(1), reorder_for_panels(2));
    assert!(single.has_reorder_solution(&board.layout, 3, 1, 3, 1));
    assert!(!paired.has_reorder_solution(&board.layout, 3, 1, 3, 1));
    assert!(paired.has_reorder_solution(&board.layout, 3, 1, 2, 1));
}
