//! Implementation of the `reorder` subcommand.

use std::fs;

use cellgrid::{Board, GridProfile, Point, ReorderParameters, reorder_for_panels};
use tracing::{debug, info};

use crate::{
    cli::{ReorderArgs, Strategy},
    error::{Error, Result},
    load_profile,
    report::ReorderReport,
};

/// Run the reorder command and print its report.
pub fn run(args: &ReorderArgs) -> Result<()> {
    let text = fs::read_to_string(&args.board)?;
    let profile = load_profile(args.profile.as_deref())?;
    let report = plan(&text, &profile, args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

/// Parse `text` as a board and run the selected strategy over it.
pub fn plan(text: &str, profile: &GridProfile, args: &ReorderArgs) -> Result<ReorderReport> {
    let board = Board::parse(text)?;
    let grid = board.to_layout(profile.metrics())?;
    let layout = &grid.layout;
    let main = grid
        .main
        .and_then(|id| layout.item(id))
        .map(|item| item.cell());

    let (span_x, span_y) = args
        .span
        .or_else(|| main.map(|c| (c.span_x, c.span_y)))
        .unwrap_or((1, 1));
    let (min_span_x, min_span_y) = args.min_span.unwrap_or((span_x, span_y));
    let pixel = match (args.pixel, args.cell) {
        (Some((x, y)), _) => Point::new(x, y),
        (None, Some((x, y))) => layout.region_center(x, y, span_x, span_y),
        (None, None) => return Err(Error::arguments("pass --cell or --pixel")),
    };
    let params = ReorderParameters::new(
        layout, pixel, span_x, span_y, min_span_x, min_span_y, grid.main,
    )?;

    let panels = board.panel_count().max(profile.panel_count as usize) as u32;
    let reorder = reorder_for_panels(panels);
    info!(
        width = layout.count_x(),
        height = layout.count_y(),
        panels,
        x = pixel.x,
        y = pixel.y,
        span_x,
        span_y,
        strategy = ?args.strategy,
        "running reorder"
    );

    let solution = match args.strategy {
        Strategy::Auto => reorder.calculate_reorder(layout, &params),
        Strategy::Push => {
            let direction = reorder.direction_for_drop(layout, &params);
            debug!(?direction, "push direction");
            Some(reorder.find_reorder_solution(layout, &params, direction, true))
        }
        Strategy::Closest => Some(reorder.closest_empty_space_reorder(layout, &params)),
        Strategy::InPlace => Some(reorder.drop_in_place_solution(layout, &params)),
    }
    .filter(|s| s.is_solution);

    let after = solution
        .as_ref()
        .map(|s| grid.board_after(s).map(|b| b.to_string()))
        .transpose()?;
    Ok(ReorderReport::new(&grid, pixel, solution.as_ref(), after))
}
