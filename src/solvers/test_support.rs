use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use crate::{items::GroceryItem, quotes::PriceQuote};

pub(crate) type Priced = (Vec<GroceryItem>, Vec<PriceQuote>);

/// Build items from `(name, quantity)` pairs and USD quotes from
/// `(retailer, item name, unit price in cents)` triples.
pub(crate) fn priced(items: &[(&str, u32)], quotes: &[(&str, &str, i64)]) -> TestResult<Priced> {
    let quotes: Vec<(&str, &str, Decimal)> = quotes
        .iter()
        .map(|(retailer, name, cents)| (*retailer, *name, Decimal::new(*cents, 2)))
        .collect();

    priced_exact(items, &quotes)
}

/// Like [`priced`], with unit prices given as exact dollar amounts.
pub(crate) fn priced_exact(
    items: &[(&str, u32)],
    quotes: &[(&str, &str, Decimal)],
) -> TestResult<Priced> {
    let items = items
        .iter()
        .enumerate()
        .map(|(idx, (name, quantity))| GroceryItem::new((idx + 1).to_string(), *name, *quantity))
        .collect::<Result<Vec<_>, _>>()?;

    let mut priced_quotes = Vec::with_capacity(quotes.len());

    for (source_idx, (retailer, name, price)) in quotes.iter().enumerate() {
        let (item_idx, item) = items
            .iter()
            .enumerate()
            .find(|(_, item)| item.name() == *name)
            .ok_or("quote for unknown item")?;

        let unit_price = Money::from_decimal(*price, USD);

        priced_quotes.push(PriceQuote::new(source_idx, *retailer, item_idx, item, unit_price)?);
    }

    Ok((items, priced_quotes))
}

/// Milk and bread at two stores: A is cheap for bread, B is cheap for milk.
pub(crate) fn two_item_fixture() -> TestResult<Priced> {
    priced(
        &[("milk", 1), ("bread", 1)],
        &[
            ("A", "milk", 200),
            ("B", "milk", 100),
            ("A", "bread", 100),
            ("B", "bread", 300),
        ],
    )
}

/// Four items over four stores where the best pair beats every single store
/// and the best triple beats every pair.
pub(crate) fn four_store_fixture() -> TestResult<Priced> {
    priced(
        &[("milk", 2), ("bread", 1), ("eggs", 1), ("apples", 3)],
        &[
            ("A", "milk", 120),
            ("A", "bread", 250),
            ("A", "eggs", 300),
            ("A", "apples", 60),
            ("B", "milk", 90),
            ("B", "bread", 200),
            ("B", "eggs", 320),
            ("C", "bread", 150),
            ("C", "eggs", 280),
            ("C", "apples", 50),
            ("D", "milk", 95),
            ("D", "eggs", 200),
            ("D", "apples", 80),
        ],
    )
}
