//! Store Universe

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::quotes::PriceQuote;

/// The distinct retailers present in a quote list, in first-seen order.
///
/// Order is stable for identical input so combination enumeration is
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreUniverse<'a> {
    stores: Vec<&'a str>,
}

impl<'a> StoreUniverse<'a> {
    /// Collects the distinct retailers from the given quotes.
    pub fn from_quotes(quotes: &'a [PriceQuote]) -> Self {
        let mut seen = FxHashSet::default();

        let stores = quotes
            .iter()
            .map(PriceQuote::retailer)
            .filter(|retailer| seen.insert(*retailer))
            .collect();

        Self { stores }
    }

    /// Retailers in canonical order.
    pub fn stores(&self) -> &[&'a str] {
        &self.stores
    }

    /// Position of a retailer in the canonical order.
    pub fn position(&self, retailer: &str) -> Option<usize> {
        self.stores.iter().position(|store| *store == retailer)
    }

    /// Number of distinct retailers.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether there are no retailers at all.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

/// A duplicate-free set of retailers a basket may be bought from.
///
/// Members keep the relative order of the store universe, which makes each
/// subset's representation canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCombination<'a> {
    stores: SmallVec<[&'a str; 4]>,
}

impl<'a> StoreCombination<'a> {
    /// Wraps an ordered, duplicate-free list of retailers.
    pub fn new(stores: impl IntoIterator<Item = &'a str>) -> Self {
        let mut combination = SmallVec::new();

        for store in stores {
            if !combination.contains(&store) {
                combination.push(store);
            }
        }

        Self {
            stores: combination,
        }
    }

    /// A combination containing a single retailer.
    pub fn single(store: &'a str) -> Self {
        let mut stores = SmallVec::new();
        stores.push(store);

        Self { stores }
    }

    /// Whether quotes from `retailer` may be used.
    pub fn contains(&self, retailer: &str) -> bool {
        self.stores.iter().any(|store| *store == retailer)
    }

    /// Member retailers.
    pub fn stores(&self) -> &[&'a str] {
        &self.stores
    }

    /// Number of member retailers.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether the combination has no members.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::items::GroceryItem;

    use super::*;

    #[test]
    fn universe_is_distinct_in_first_seen_order() -> TestResult {
        let milk = GroceryItem::new("1", "milk", 1)?;
        let quotes = ["B", "A", "B", "C", "A"]
            .iter()
            .enumerate()
            .map(|(idx, store)| {
                PriceQuote::new(idx, *store, 0, &milk, Money::from_minor(100, USD))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let universe = StoreUniverse::from_quotes(&quotes);

        assert_eq!(universe.stores(), &["B", "A", "C"]);
        assert_eq!(universe.position("C"), Some(2));
        assert_eq!(universe.position("D"), None);

        Ok(())
    }

    #[test]
    fn empty_quotes_give_empty_universe() {
        let universe = StoreUniverse::from_quotes(&[]);

        assert!(universe.is_empty());
    }

    #[test]
    fn combination_drops_duplicates() {
        let combination = StoreCombination::new(["A", "B", "A"]);

        assert_eq!(combination.stores(), &["A", "B"]);
        assert!(combination.contains("B"));
        assert!(!combination.contains("C"));
    }
}
