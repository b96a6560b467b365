//! Property checks over generated grocery lists and price feeds

use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use trolley::{
    items::GroceryItem,
    optimizer::{SearchOptions, SearchStrategy, optimize},
    quotes::PriceQuote,
    solvers::{BasketOutcome, Deadline, ExhaustiveSolver, SearchProblem, SingleStoreSolver, Solver},
};

const RETAILERS: [&str; 6] = ["Aldi", "Budgens", "Co-op", "Dunnes", "Esso", "Fresh"];
const SEEDS: std::ops::Range<u64> = 0..40;

/// Random list of 1-6 items with 0-6 quotes each. Half the prices are whole
/// multiples of 50 cents so exact ties are common; the rest carry fractions of
/// a cent.
fn generate(seed: u64) -> TestResult<(Vec<GroceryItem>, Vec<PriceQuote>)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let item_count = rng.gen_range(1..=6);

    let items = (0..item_count)
        .map(|idx| GroceryItem::new(format!("{idx}"), format!("item-{idx}"), rng.gen_range(1..=4)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut quotes = Vec::new();

    for (item_idx, item) in items.iter().enumerate() {
        for retailer in RETAILERS {
            if rng.gen_bool(0.6) {
                let price = if rng.gen_bool(0.5) {
                    Decimal::new(rng.gen_range(1..=5) * 50, 2)
                } else {
                    Decimal::new(rng.gen_range(500..=2_500), 3)
                };

                quotes.push(PriceQuote::new(
                    quotes.len(),
                    retailer,
                    item_idx,
                    item,
                    Money::from_decimal(price, USD),
                )?);
            }
        }
    }

    Ok((items, quotes))
}

/// Cheapest cover using any subset of at most `max_stores` retailers.
fn brute_force(
    items: &[GroceryItem],
    quotes: &[PriceQuote],
    max_stores: usize,
) -> Option<Decimal> {
    let mut best: Option<Decimal> = None;

    for mask in 1_u32..(1 << RETAILERS.len()) {
        if mask.count_ones() as usize > max_stores {
            continue;
        }

        let allowed = |retailer: &str| {
            RETAILERS
                .iter()
                .position(|candidate| *candidate == retailer)
                .is_some_and(|bit| mask & (1 << bit) != 0)
        };

        let total: Option<Decimal> = (0..items.len())
            .map(|item_idx| {
                quotes
                    .iter()
                    .filter(|quote| quote.item_idx() == item_idx && allowed(quote.retailer()))
                    .map(|quote| *quote.line_cost().amount())
                    .min()
            })
            .sum();

        if let Some(total) = total {
            best = Some(best.map_or(total, |best| best.min(total)));
        }
    }

    best
}

#[test]
fn total_equals_sum_of_line_costs() -> TestResult {
    for seed in SEEDS {
        let (items, quotes) = generate(seed)?;

        for max_stores in 1..=3 {
            if let BasketOutcome::Found(basket) =
                optimize(&items, &quotes, max_stores, USD, &SearchOptions::default())?
            {
                let sum: Decimal = basket
                    .iter()
                    .map(|assignment| *assignment.line_cost().amount())
                    .sum();

                assert_eq!(basket.total(), Money::from_decimal(sum, USD), "seed {seed}");
            }
        }
    }

    Ok(())
}

#[test]
fn every_item_is_assigned_exactly_once_in_list_order() -> TestResult {
    for seed in SEEDS {
        let (items, quotes) = generate(seed)?;

        for max_stores in 1..=3 {
            if let BasketOutcome::Found(basket) =
                optimize(&items, &quotes, max_stores, USD, &SearchOptions::default())?
            {
                let assigned: Vec<&str> =
                    basket.iter().map(|assignment| assignment.item().id()).collect();
                let listed: Vec<&str> = items.iter().map(GroceryItem::id).collect();

                assert_eq!(assigned, listed, "seed {seed}");
                assert!(basket.stores().len() <= max_stores, "seed {seed}");
            }
        }
    }

    Ok(())
}

#[test]
fn matches_brute_force_over_store_subsets() -> TestResult {
    for seed in SEEDS {
        let (items, quotes) = generate(seed)?;

        for max_stores in 1..=4 {
            let outcome = optimize(&items, &quotes, max_stores, USD, &SearchOptions::default())?;
            let total = outcome.basket().map(|basket| *basket.total().amount());

            assert_eq!(
                total,
                brute_force(&items, &quotes, max_stores),
                "seed {seed}, max_stores {max_stores}"
            );
        }
    }

    Ok(())
}

#[test]
fn identical_input_gives_identical_basket() -> TestResult {
    let parallel = SearchOptions::default().with_strategy(SearchStrategy::Parallel {
        threads: Some(4),
    });

    for seed in SEEDS {
        let (items, quotes) = generate(seed)?;
        let (items_again, quotes_again) = generate(seed)?;

        for max_stores in 1..=3 {
            let first = optimize(&items, &quotes, max_stores, USD, &SearchOptions::default())?;
            let second = optimize(
                &items_again,
                &quotes_again,
                max_stores,
                USD,
                &SearchOptions::default(),
            )?;
            let threaded = optimize(&items, &quotes, max_stores, USD, &parallel)?;

            assert_eq!(first, second, "seed {seed}");
            assert_eq!(first, threaded, "seed {seed}");
        }
    }

    Ok(())
}

#[test]
fn total_is_non_increasing_in_store_limit() -> TestResult {
    for seed in SEEDS {
        let (items, quotes) = generate(seed)?;
        let mut previous: Option<Decimal> = None;

        for max_stores in 1..=RETAILERS.len() {
            let outcome = optimize(&items, &quotes, max_stores, USD, &SearchOptions::default())?;
            let total = outcome.basket().map(|basket| *basket.total().amount());

            if let Some(previous) = previous {
                let total = total.ok_or("a larger store limit lost a feasible basket")?;

                assert!(total <= previous, "seed {seed}, max_stores {max_stores}");
            }

            previous = total.or(previous);
        }
    }

    Ok(())
}

#[test]
fn single_store_path_matches_generic_path() -> TestResult {
    for seed in SEEDS {
        let (items, quotes) = generate(seed)?;
        let problem = SearchProblem::new(&items, &quotes, USD);

        for pruning in [true, false] {
            let direct = SingleStoreSolver::new()
                .with_pruning(pruning)
                .solve(&problem, Deadline::none())?;
            let generic = ExhaustiveSolver::new(1)
                .with_pruning(pruning)
                .solve(&problem, Deadline::none())?;

            assert_eq!(direct, generic, "seed {seed}");
        }
    }

    Ok(())
}
