//! Utils

use std::time::Duration;

use clap::Parser;

use crate::optimizer::{SearchOptions, SearchStrategy};

/// Arguments for the basket examples
#[derive(Debug, Parser)]
pub struct ExampleBasketArgs {
    /// Fixture set to load the grocery list & quotes from
    #[clap(short, long, default_value = "weekly")]
    pub fixture: String,

    /// Maximum number of stores to shop at (defaults to the fixture's limit)
    #[clap(short, long)]
    pub max_stores: Option<i64>,

    /// Search on this many worker threads instead of sequentially
    #[clap(short, long)]
    pub threads: Option<usize>,

    /// Give up on the search after this many milliseconds
    #[clap(short, long)]
    pub deadline_ms: Option<u64>,

    /// Disable branch-and-bound pruning
    #[clap(long)]
    pub no_pruning: bool,

    /// Print the JSON response instead of a receipt
    #[clap(long)]
    pub json: bool,
}

impl ExampleBasketArgs {
    /// Search options described by the arguments.
    pub fn search_options(&self) -> SearchOptions {
        let mut options = SearchOptions::default().with_pruning(!self.no_pruning);

        if let Some(threads) = self.threads {
            options = options.with_strategy(SearchStrategy::Parallel {
                threads: Some(threads),
            });
        }

        if let Some(deadline_ms) = self.deadline_ms {
            options = options.with_deadline(Duration::from_millis(deadline_ms));
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_to_sequential_pruned_search() -> TestResult {
        let args = ExampleBasketArgs::try_parse_from(["basket"])?;

        assert_eq!(args.fixture, "weekly");
        assert_eq!(args.search_options(), SearchOptions::default());

        Ok(())
    }

    #[test]
    fn flags_map_onto_search_options() -> TestResult {
        let args = ExampleBasketArgs::try_parse_from([
            "basket",
            "--fixture",
            "pantry",
            "--max-stores",
            "3",
            "--threads",
            "4",
            "--deadline-ms",
            "250",
            "--no-pruning",
        ])?;

        assert_eq!(args.max_stores, Some(3));
        assert_eq!(
            args.search_options(),
            SearchOptions {
                strategy: SearchStrategy::Parallel { threads: Some(4) },
                pruning: false,
                deadline: Some(Duration::from_millis(250)),
            }
        );

        Ok(())
    }
}
