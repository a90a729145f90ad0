//! Implementation of the `map` subcommand.

use cellgrid::{CellPos, Container, GridProfile, ItemPos, ScreenId, mapper_for};
use tracing::debug;

use crate::{
    cli::{ContainerArg, MapArgs},
    error::Result,
    load_profile,
    report::MapReport,
};

/// Run the map command and print its report.
pub fn run(args: &MapArgs) -> Result<()> {
    let profile = load_profile(args.profile.as_deref())?;
    let report = map(&profile, args);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

/// Convert the requested position with the mapper for `profile`.
pub fn map(profile: &GridProfile, args: &MapArgs) -> MapReport {
    let mapper = mapper_for(profile);
    let container = match args.container {
        ContainerArg::Desktop => Container::Desktop,
        ContainerArg::Hotseat => Container::Hotseat,
    };
    let (x, y) = args.cell;
    let screen = ScreenId::new(args.screen);
    let from = CellPos::new(x, y, screen);
    let (from_space, to) = if args.to_model {
        (
            "presenter",
            mapper.map_presenter_to_model(x, y, screen, container),
        )
    } else {
        (
            "model",
            mapper.map_model_to_presenter(&ItemPos {
                container,
                pos: from,
            }),
        )
    };
    debug!(%container, %from, %to, "mapped position");
    MapReport {
        container: container.to_string(),
        from_space,
        from: from.into(),
        to: to.into(),
    }
}
