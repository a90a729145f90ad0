//! Command-line interface definitions for cellgrid-tester.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use logging::LogArgs;

/// Command-line interface for the `cellgrid-tester` binary.
#[derive(Parser, Debug)]
#[command(
    name = "cellgrid-tester",
    about = "Run reorder searches and position mappings against text boards",
    version
)]
pub struct Cli {
    /// Logging controls shared across cellgrid binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Which operation to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level tester commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drop an item onto a board and show where it lands.
    Reorder(ReorderArgs),
    /// Convert a cell position between model and presenter space.
    Map(MapArgs),
}

/// Which placement strategy the `reorder` command runs.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Evaluate every strategy and pick one.
    #[default]
    Auto,
    /// Displace overlapped items only.
    Push,
    /// Nearest vacant region only.
    Closest,
    /// The cell under the pointer, only if vacant.
    InPlace,
}

/// Arguments for the `reorder` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ReorderArgs {
    /// Text board describing the grid; `m` marks the widget being dragged.
    #[arg(long, value_name = "PATH")]
    pub board: PathBuf,

    /// Optional grid profile (RON) supplying the cell metrics.
    #[arg(long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Drop the item centred over this cell region.
    #[arg(
        long,
        value_name = "X,Y",
        value_parser = parse_pair,
        conflicts_with = "pixel"
    )]
    pub cell: Option<(i32, i32)>,

    /// Drop the item with its centre at this pixel.
    #[arg(long, value_name = "X,Y", value_parser = parse_pair)]
    pub pixel: Option<(i32, i32)>,

    /// Span of the dragged item; defaults to the main widget's span, or 1x1.
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub span: Option<(i32, i32)>,

    /// Smallest span the dragged item may shrink to; defaults to its span.
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub min_span: Option<(i32, i32)>,

    /// Placement strategy to run.
    #[arg(long, value_enum, default_value_t = Strategy::Auto)]
    pub strategy: Strategy,

    /// Emit a JSON report instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Container of a mapped position.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerArg {
    /// A desktop screen.
    #[default]
    Desktop,
    /// The dock.
    Hotseat,
}

/// Arguments for the `map` subcommand.
#[derive(Args, Debug, Clone)]
pub struct MapArgs {
    /// Cell to convert.
    #[arg(long, value_name = "X,Y", value_parser = parse_pair)]
    pub cell: (i32, i32),

    /// Screen the cell is on.
    #[arg(long, default_value_t = 0)]
    pub screen: i32,

    /// Container the cell belongs to.
    #[arg(long, value_enum, default_value_t = ContainerArg::Desktop)]
    pub container: ContainerArg,

    /// Optional grid profile (RON); defaults to a single 4x5 panel.
    #[arg(long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Treat the cell as a presenter position and convert it to the model.
    #[arg(long)]
    pub to_model: bool,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Parse `X,Y`.
fn parse_pair(s: &str) -> Result<(i32, i32), String> {
    split_numbers(s, ',')
}

/// Parse `WxH`, both at least 1.
fn parse_size(s: &str) -> Result<(i32, i32), String> {
    let (w, h) = split_numbers(&s.to_ascii_lowercase(), 'x')?;
    if w < 1 || h < 1 {
        return Err(format!("span must be at least 1x1, got {s}"));
    }
    Ok((w, h))
}

/// Two integers separated by `sep`.
fn split_numbers(s: &str, sep: char) -> Result<(i32, i32), String> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| format!("expected two numbers separated by '{sep}', got {s:?}"))?;
    let parse = |v: &str| v.trim().parse::<i32>().map_err(|e| format!("{v:?}: {e}"));
    Ok((parse(a)?, parse(b)?))
}
