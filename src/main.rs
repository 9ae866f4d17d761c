//! # Aurorax-search CLI
//!
//! Command-line interface for the aurorax-search library.
//! Builds a conjunction search request from flags and prints its JSON body.

use anyhow::Context;
use aurorax_search::{
    CriteriaBlockSet, DistanceValue, EpochPrecision, MaxDistances, SearchOptions, SearchRequest,
    TimeRange,
};
use clap::Parser;
use log::{debug, error, LevelFilter};
use serde_json::Value;

mod cli;

/// Command-line interface for aurorax-search
#[derive(Parser)]
#[command(name = "aurorax-search")]
#[command(about = "Validated request builder for the AuroraX conjunction search API")]
#[command(long_about = "Builds the JSON body of a conjunction search and prints it to stdout:
  aurorax-search --start 2020-01-01T00:00:00 --end 2020-01-01T23:59:59 \\
      --ground '{\"programs\":[\"themis-asi\"]}' \\
      --space '{\"programs\":[\"swarm\"]}' --space '{\"programs\":[\"themis\"]}'

Distances (kilometers):
  --distance 500                         # Default for every pair (300 if omitted)
  --max-distance ground1-space2=1000     # Override a single pair
  --max-distance space1-space2=none      # No limit for this pair

Pair keys are 1-indexed: groundI-spaceJ and spaceI-spaceJ with I < J.
Ground-ground distances are fixed by the API and cannot be set.")]
#[command(version = env!("AURORAX_SEARCH_VERSION"))]
struct Cli {
    /// Start of the search window (YYYY-MM-DDTHH:MM:SS, UTC)
    #[arg(long)]
    start: String,

    /// End of the search window (YYYY-MM-DDTHH:MM:SS, UTC)
    #[arg(long)]
    end: String,

    /// Ground criteria block as a JSON object (repeatable, in order)
    #[arg(long = "ground", value_parser = cli::parse_block)]
    ground: Vec<Value>,

    /// Space criteria block as a JSON object (repeatable, in order)
    #[arg(long = "space", value_parser = cli::parse_block)]
    space: Vec<Value>,

    /// Default maximum distance in kilometers for every pair
    #[arg(long)]
    distance: Option<f64>,

    /// Per-pair maximum distance: <pair>=<km|none> (repeatable)
    #[arg(long = "max-distance", value_parser = cli::parse_max_distance)]
    max_distances: Vec<(String, DistanceValue)>,

    /// Epoch search precision in seconds (30 or 60)
    #[arg(long, default_value_t = 60)]
    precision: i64,

    /// Conjunction type: nbtrace or sbtrace (repeatable, default nbtrace)
    #[arg(long = "conjunction-type", value_parser = cli::parse_conjunction_type)]
    conjunction_types: Vec<aurorax_search::ConjunctionType>,

    /// Pretty-print the request JSON
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let mut logger = env_logger::Builder::from_default_env();
    logger.target(env_logger::Target::Stderr);
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(cli) {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    debug!("🌌 aurorax-search v{} starting...", env!("AURORAX_SEARCH_VERSION"));

    let request = build_request(&cli)?;

    let body = if cli.pretty {
        request.to_json_pretty()
    } else {
        request.to_json()
    }
    .context("encoding search request")?;

    println!("{body}");
    Ok(())
}

/// Validate CLI arguments and assemble the request
fn build_request(cli: &Cli) -> anyhow::Result<SearchRequest> {
    let time_range = TimeRange::parse(&cli.start, &cli.end).context("invalid search window")?;

    let blocks = CriteriaBlockSet::from_values(cli.ground.clone(), cli.space.clone())
        .context("invalid criteria blocks")?;

    let epoch_search_precision =
        EpochPrecision::try_from(cli.precision).context("invalid --precision")?;

    let options = SearchOptions {
        default_distance: cli.distance,
        max_distances: collect_max_distances(&cli.max_distances),
        epoch_search_precision,
        conjunction_types: cli.conjunction_types.clone(),
    };

    Ok(SearchRequest::new(time_range, blocks, &options)?)
}

/// Later occurrences of the same pair replace earlier ones
fn collect_max_distances(pairs: &[(String, DistanceValue)]) -> Option<MaxDistances> {
    if pairs.is_empty() {
        return None;
    }
    Some(pairs.iter().cloned().collect())
}
