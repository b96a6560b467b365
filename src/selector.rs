//! Best Basket Selector
//!
//! Folds evaluated baskets down to the cheapest one. Candidates are ordered by
//! `(total cost, generation index)`, where the generation index is the
//! position of the combination in canonical enumeration order. Comparing on
//! that pair makes the result independent of the order candidates are offered
//! in, so a parallel search picks the same basket as a sequential one.

use rust_decimal::Decimal;

use crate::{basket::Basket, solvers::BasketOutcome};

#[derive(Debug, Clone)]
struct Candidate<'a> {
    cost: Decimal,
    generation: usize,
    basket: Basket<'a>,
}

impl Candidate<'_> {
    fn key(&self) -> (Decimal, usize) {
        (self.cost, self.generation)
    }
}

/// Running minimum over evaluated baskets.
#[derive(Debug, Clone, Default)]
pub struct BestBasket<'a> {
    best: Option<Candidate<'a>>,
}

impl<'a> BestBasket<'a> {
    /// An empty fold.
    pub fn new() -> Self {
        Self { best: None }
    }

    /// Offer the basket built from combination number `generation`.
    ///
    /// Returns `true` if it became the new best.
    pub fn offer(&mut self, generation: usize, basket: Basket<'a>) -> bool {
        let candidate = Candidate {
            cost: *basket.total().amount(),
            generation,
            basket,
        };

        self.offer_candidate(candidate)
    }

    fn offer_candidate(&mut self, candidate: Candidate<'a>) -> bool {
        let replaces = self
            .best
            .as_ref()
            .is_none_or(|best| candidate.key() < best.key());

        if replaces {
            self.best = Some(candidate);
        }

        replaces
    }

    /// Combine two partial folds.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        if let Some(candidate) = other.best {
            self.offer_candidate(candidate);
        }

        self
    }

    /// Exact cost of the current best.
    pub fn bound(&self) -> Option<Decimal> {
        self.best.as_ref().map(|best| best.cost)
    }

    /// Generation index of the current best.
    pub fn generation(&self) -> Option<usize> {
        self.best.as_ref().map(|best| best.generation)
    }

    /// The current best basket.
    pub fn basket(&self) -> Option<&Basket<'a>> {
        self.best.as_ref().map(|best| &best.basket)
    }

    /// Finish the fold.
    pub fn into_outcome(self) -> BasketOutcome<'a> {
        match self.best {
            Some(best) => BasketOutcome::Found(best.basket),
            None => BasketOutcome::Infeasible,
        }
    }
}
