//! Basket Example
//!
//! Finds the cheapest way to buy a fixture grocery list from at most N stores.
//!
//! Use `-f` to load a fixture set by name
//! Use `-m` to override the fixture's store limit
//! Use `-t` to search on a number of worker threads
//! Use `-d` to give up after a number of milliseconds
//! Use `--json` to print the wire response instead of a receipt
//!
//! Set `RUST_LOG=trolley=debug` to follow the search.

use std::{io, time::Instant};

use anyhow::Result;

use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing_subscriber::EnvFilter;
use trolley::{fixtures::Fixture, receipt::Receipt, utils::ExampleBasketArgs};

/// Basket Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = ExampleBasketArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let request = fixture.request(args.max_stores)?;
    let prepared = request.prepare()?;

    let start = Instant::now();
    let outcome = prepared.optimize(&args.search_options())?;
    let elapsed = start.elapsed();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&prepared.response(&outcome))?
        );

        return Ok(());
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::colored().write_outcome(&mut handle, &outcome)?;

    for rejected in prepared.rejected() {
        println!(" Skipped quote: {rejected}");
    }

    println!("\nSolution: {}", elapsed.human(Truncate::Nano));

    Ok(())
}
