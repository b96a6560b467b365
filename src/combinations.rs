//! Combinations
//!
//! Lazy enumeration of every `k`-sized subset of a pool. Each subset is
//! yielded once, as a subsequence of the pool in its own order, and
//! subsets come out in the same order as the recursive definition: the
//! element at index `i` prefixed onto every `(k - 1)`-subset of the suffix
//! after `i`, for `i` from `0` to `n - k`.

use std::iter::FusedIterator;

use smallvec::SmallVec;
use thiserror::Error;

/// Errors from combination enumeration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CombinationError {
    /// More elements were requested per subset than the pool holds.
    #[error("cannot choose {requested} stores from {available}")]
    InvalidStoreCount {
        /// Subset size requested
        requested: usize,
        /// Pool size
        available: usize,
    },
}

/// Iterator over all `k`-subsets of a slice.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    pool: &'a [T],
    indices: SmallVec<[usize; 8]>,
    started: bool,
    done: bool,
}

impl<'a, T> Combinations<'a, T> {
    /// Enumerate the `k`-subsets of `pool`.
    ///
    /// `k == 0` yields nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CombinationError::InvalidStoreCount`] if `k` exceeds the pool size.
    pub fn new(pool: &'a [T], k: usize) -> Result<Self, CombinationError> {
        if k > pool.len() {
            return Err(CombinationError::InvalidStoreCount {
                requested: k,
                available: pool.len(),
            });
        }

        Ok(Self {
            pool,
            indices: (0..k).collect(),
            started: false,
            done: k == 0,
        })
    }

    fn advance(&mut self) -> bool {
        let n = self.pool.len();
        let k = self.indices.len();

        let Some(pivot) = self
            .indices
            .iter()
            .enumerate()
            .rposition(|(pos, &idx)| idx != pos + n - k)
        else {
            return false;
        };

        let Some(mut next) = self.indices.get(pivot).map(|idx| idx + 1) else {
            return false;
        };

        for slot in self.indices.iter_mut().skip(pivot) {
            *slot = next;
            next += 1;
        }

        true
    }
}

impl<'a, T> Iterator for Combinations<'a, T> {
    type Item = SmallVec<[&'a T; 8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.started {
            if !self.advance() {
                self.done = true;
                return None;
            }
        } else {
            self.started = true;
        }

        let pool = self.pool;

        Some(
            self.indices
                .iter()
                .filter_map(|&idx| pool.get(idx))
                .collect(),
        )
    }
}

impl<T> FusedIterator for Combinations<'_, T> {}

/// Number of `k`-subsets of an `n`-element pool, or `None` if it does not fit in a `u64`.
pub fn combination_count(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }

    let k = k.min(n - k);
    let mut count: u128 = 1;

    for step in 0..k {
        let numerator = u128::try_from(n - step).ok()?;
        let denominator = u128::try_from(step + 1).ok()?;

        count = count.checked_mul(numerator)? / denominator;
    }

    u64::try_from(count).ok()
}
