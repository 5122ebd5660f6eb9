//! Geocode Batch - CSV batch driver for the Mapbox geocoding client
//!
//! Reads free-text addresses from a CSV file, geocodes them one at a time,
//! and writes the normalized address components to an output CSV. Also
//! supports a single-query mode that prints the raw provider response.

mod batch;
mod error;

use clap::{Parser, Subcommand};
use mapbox_geocoding::{
    MapboxGeocoder, GEOCODING_ENDPOINT_PERMANENT, GEOCODING_ENDPOINT_TEMPORARY,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

#[derive(Parser)]
#[command(name = "geocode-batch", about = "Batch geocoding of free-text addresses via Mapbox")]
struct Cli {
    /// Use the permanent geocoding endpoint instead of the temporary one
    #[arg(long)]
    permanent: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Geocode every address in a CSV file
    Run {
        /// Input CSV: first row is a header, one address per row in column 0
        #[arg(long)]
        input: String,

        /// Output CSV of normalized address components
        #[arg(long)]
        output: String,
    },
    /// Geocode a single query and print the raw response body
    Query {
        /// Free-text address to geocode
        text: String,
    },
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("geocode_batch=info".parse()?)
        .add_directive("mapbox_geocoding=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let endpoint = if cli.permanent {
        GEOCODING_ENDPOINT_PERMANENT
    } else {
        GEOCODING_ENDPOINT_TEMPORARY
    };

    // Fails before any request when the token env var is unset
    let geocoder = MapboxGeocoder::from_env_with_endpoint(endpoint)?;

    match cli.command {
        Command::Run { input, output } => {
            let input = batch::expand_home(&input);
            let output = batch::expand_home(&output);

            let queries = batch::read_addresses(&input)?;
            info!(count = queries.len(), input = %input.display(), "read addresses");

            let results = batch::run_batch(&queries, |query| geocoder.get_clean_address(query));

            batch::write_results(&results, &output)?;
            info!(count = results.len(), output = %output.display(), "wrote results");
        }
        Command::Query { text } => {
            let response = geocoder.geocode(&text)?;
            println!("{}", response.body);
        }
    }

    Ok(())
}
