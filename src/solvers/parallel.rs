//! Parallel combination search
//!
//! Combinations are generated lazily on the calling thread and evaluated on a
//! rayon pool. Each worker folds into its own [`BestBasket`] and the partial
//! folds are merged on `(total cost, generation index)`, so the chosen basket
//! does not depend on scheduling.
//!
//! Once the deadline passes the generator stops handing out combinations, so
//! the pool drains whatever is already in flight and returns.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

use rayon::{ThreadPoolBuilder, prelude::*};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use tracing::debug;

use crate::{
    combinations::{Combinations, combination_count},
    selector::BestBasket,
    solvers::{
        Assignment, BasketOutcome, Deadline, SearchProblem, Solver, SolverError, assign::assign,
    },
    stores::StoreCombination,
};

/// Multi-threaded solver over all combinations of `store_count` stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelSolver {
    store_count: usize,
    threads: Option<usize>,
    pruning: bool,
}

impl ParallelSolver {
    /// Search combinations of exactly `store_count` stores using rayon's default thread count.
    pub fn new(store_count: usize) -> Self {
        Self {
            store_count,
            threads: None,
            pruning: true,
        }
    }

    /// Use a fixed number of worker threads.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Enable or disable branch-and-bound pruning.
    ///
    /// Workers share the best cost seen so far. A combination is only dropped
    /// once its running cost is strictly above that cost, so a cheaper or
    /// earlier-generation tie is never lost.
    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }
}

impl Solver for ParallelSolver {
    fn solve<'a>(
        &self,
        problem: &SearchProblem<'a>,
        deadline: Deadline,
    ) -> Result<BasketOutcome<'a>, SolverError> {
        let stores = problem.universe().stores();
        let total = combination_count(stores.len(), self.store_count);
        let combinations = Combinations::new(stores, self.store_count)?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.threads.unwrap_or(0))
            .build()?;

        let shared_bound = SharedBound::new(problem.currency().exponent);
        let evaluated = AtomicU64::new(0);
        let timed_out = AtomicBool::new(false);

        let expired = || {
            if timed_out.load(Ordering::Relaxed) {
                return true;
            }

            if deadline.expired() {
                timed_out.store(true, Ordering::Relaxed);
                return true;
            }

            false
        };

        let best = pool.install(|| {
            combinations
                .enumerate()
                .take_while(|_| !expired())
                .par_bridge()
                .try_fold(BestBasket::new, |mut best, (generation, members)| {
                    if expired() {
                        return Ok(best);
                    }

                    let combination = StoreCombination::new(members.into_iter().copied());
                    let bound = if self.pruning { shared_bound.get() } else { None };

                    if let Assignment::Feasible(basket) = assign(problem, &combination, bound)? {
                        shared_bound.lower(*basket.total().amount());
                        best.offer(generation, basket);
                    }

                    evaluated.fetch_add(1, Ordering::Relaxed);

                    Ok::<_, SolverError>(best)
                })
                .try_reduce(BestBasket::new, |left, right| Ok(left.merge(right)))
        })?;

        let evaluated = evaluated.into_inner();

        if timed_out.into_inner() {
            debug!(evaluated, ?total, "parallel search deadline expired");

            return Ok(BasketOutcome::PartialTimeout { evaluated, total });
        }

        debug!(
            store_count = self.store_count,
            evaluated,
            best = ?best.bound(),
            "parallel search finished"
        );

        Ok(best.into_outcome())
    }
}

/// Best cost seen by any worker, rounded up to whole minor units.
///
/// Rounding up keeps the bound at or above the exact best, so pruning against
/// it never drops a combination that could still win.
#[derive(Debug)]
struct SharedBound {
    minor_units: AtomicI64,
    exponent: u32,
}

impl SharedBound {
    fn new(exponent: u32) -> Self {
        Self {
            minor_units: AtomicI64::new(i64::MAX),
            exponent,
        }
    }

    fn get(&self) -> Option<Decimal> {
        match self.minor_units.load(Ordering::Relaxed) {
            i64::MAX => None,
            minor_units => Some(Decimal::new(minor_units, self.exponent)),
        }
    }

    fn lower(&self, cost: Decimal) {
        let minor_units = Decimal::from(10_i64.pow(self.exponent))
            .checked_mul(cost)
            .and_then(|scaled| scaled.ceil().to_i64())
            .unwrap_or(i64::MAX);

        self.minor_units.fetch_min(minor_units, Ordering::Relaxed);
    }
}
