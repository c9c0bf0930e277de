use anyhow::Result;
use bls_rs::api::{DEFAULT_BASE_URL, FetchError};
use bls_rs::models::{DEFAULT_END_YEAR, DEFAULT_SERIES_ID, DEFAULT_START_YEAR};
use bls_rs::{Client, Response, TimeseriesQuery, print};
use clap::Parser;
use std::io::Write;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "bls",
    version,
    about = "Fetch and print US Bureau of Labor Statistics time series"
)]
struct Cli {
    /// BLS API registration key
    registration_key: Option<String>,
    /// Endpoint root for both requests.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Series id; repeat for several. The GET request uses the first one.
    #[arg(long = "series", value_name = "SERIES_ID", default_value = DEFAULT_SERIES_ID)]
    series: Vec<String>,
    /// First year of the POST query.
    #[arg(long, default_value = DEFAULT_START_YEAR)]
    start_year: String,
    /// Last year of the POST query.
    #[arg(long, default_value = DEFAULT_END_YEAR)]
    end_year: String,
    /// Ask for series catalog data.
    #[arg(long, default_value_t = false)]
    catalog: bool,
    /// Ask for net and percent change calculations.
    #[arg(long, default_value_t = false)]
    calculations: bool,
    /// Ask for annual averages.
    #[arg(long, default_value_t = false)]
    annual_average: bool,
    /// Ask for series aspects.
    #[arg(long, default_value_t = false)]
    aspects: bool,
    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,
    /// Exit with an error status if either request fails.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

impl Cli {
    fn query(&self, registration_key: &str) -> TimeseriesQuery {
        TimeseriesQuery {
            catalog: self.catalog,
            calculations: self.calculations,
            annualaverage: self.annual_average,
            aspects: self.aspects,
            ..TimeseriesQuery::new(
                self.series.clone(),
                &self.start_year,
                &self.end_year,
                registration_key,
            )
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let Some(key) = cli.registration_key.as_deref() else {
        println!("No arguments provided");
        return Ok(());
    };

    let client = Client::new(&cli.base_url, Duration::from_secs(cli.timeout))?;
    let series_id = cli
        .series
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_SERIES_ID);

    let mut failed = 0;
    failed += report(&mut std::io::stdout(), client.fetch_series(series_id, key));
    failed += report(&mut std::io::stdout(), client.fetch_query(&cli.query(key)));

    if cli.strict && failed > 0 {
        anyhow::bail!("{} of 2 requests failed", failed);
    }
    Ok(())
}

/// Print a successful response or a diagnostic; returns the number of failures (0 or 1).
///
/// A response that cannot be written out counts as a failure but never stops the next call.
fn report<W: Write>(out: &mut W, outcome: Result<Response, FetchError>) -> u32 {
    let resp = match outcome {
        Ok(resp) => resp,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };
    let written = print::print_response(&mut *out, &resp).and_then(|()| out.flush());
    match written {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error writing response: {}", e);
            1
        }
    }
}
