//! Trolley
//!
//! Trolley is a basket optimisation engine: given a grocery list and price
//! quotes from many retailers, it finds the cheapest way to buy the whole
//! list while shopping at no more than a given number of stores.
//!
//! The engine is a pure function of its inputs. Start from
//! [`request::BasketRequest`] for loosely typed JSON input, or call
//! [`optimizer::optimize`] directly with validated items and quotes.

pub mod basket;
pub mod combinations;
pub mod fixtures;
pub mod items;
pub mod optimizer;
pub mod prelude;
pub mod quotes;
pub mod raw;
pub mod receipt;
pub mod request;
pub mod selector;
pub mod solvers;
pub mod stores;
pub mod utils;
