//! bls_rs
//!
//! A small Rust library for querying the US Bureau of Labor Statistics (BLS) public
//! timeseries API. Pairs with the `bls` CLI.
//!
//! ### Features
//! - Fetch a single series by id (GET) or several series over a year range (POST)
//! - Typed response model that tolerates missing or `null` fields
//! - Observation values kept exactly as the API sends them (text)
//! - Plain-text printing of status, series ids and observations
//!
//! ### Example
//! ```no_run
//! use bls_rs::{Client, TimeseriesQuery};
//!
//! let client = Client::default();
//! let resp = client.fetch_query(&TimeseriesQuery::new(
//!     vec!["CUUR0000SA0".into(), "LNS14000000".into()],
//!     "2022",
//!     "2024",
//!     "my-registration-key",
//! ))?;
//! bls_rs::print::print_response(&mut std::io::stdout().lock(), &resp)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod models;
pub mod print;

pub use api::{Client, FetchError};
pub use models::{DataPoint, Response, Series, TimeseriesQuery};
