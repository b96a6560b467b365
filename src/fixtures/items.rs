//! Items Fixtures

use serde::Deserialize;

use crate::items::RawGroceryItem;

/// Wrapper for items in YAML
#[derive(Debug, Deserialize)]
pub struct ItemsFixture {
    /// ISO currency code shared by the set's quotes
    #[serde(default)]
    pub currency: Option<String>,

    /// Default store limit for the set
    #[serde(default)]
    pub max_stores: Option<i64>,

    /// Grocery list entries, in list order
    pub items: Vec<RawGroceryItem>,
}
