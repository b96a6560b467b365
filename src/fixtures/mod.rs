//! Fixtures

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::{
    fixtures::{items::ItemsFixture, quotes::QuotesFixture},
    items::RawGroceryItem,
    quotes::RawPriceQuote,
    request::BasketRequest,
};

pub mod items;
pub mod quotes;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Neither the fixture nor the caller supplied a store limit
    #[error("Fixture has no max_stores and none was given")]
    NoStoreLimit,
}

/// A grocery list and the quotes offered for it, loaded from YAML.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    items: Vec<RawGroceryItem>,
    quotes: Vec<RawPriceQuote>,
    currency: Option<String>,
    max_stores: Option<i64>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Load a grocery list from `items/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_items(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("items").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ItemsFixture = serde_norway::from_str(&contents)?;

        self.items.extend(fixture.items);

        if fixture.currency.is_some() {
            self.currency = fixture.currency;
        }

        if fixture.max_stores.is_some() {
            self.max_stores = fixture.max_stores;
        }

        Ok(self)
    }

    /// Load price quotes from `quotes/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_quotes(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("quotes").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: QuotesFixture = serde_norway::from_str(&contents)?;

        self.quotes.extend(fixture.into_quotes());

        Ok(self)
    }

    /// Load a complete fixture set (items and quotes with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_items(name)?.load_quotes(name)?;

        Ok(fixture)
    }

    /// Build a request from the loaded records.
    ///
    /// `max_stores` overrides the limit stored in the fixture.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoStoreLimit`] if neither supplies a limit.
    pub fn request(&self, max_stores: Option<i64>) -> Result<BasketRequest, FixtureError> {
        let max_stores = max_stores
            .or(self.max_stores)
            .ok_or(FixtureError::NoStoreLimit)?;

        Ok(BasketRequest {
            items: self.items.clone(),
            quotes: self.quotes.clone(),
            max_stores,
            currency: self.currency.clone(),
        })
    }

    /// Get all raw items
    pub fn items(&self) -> &[RawGroceryItem] {
        &self.items
    }

    /// Get all raw quotes
    pub fn quotes(&self) -> &[RawPriceQuote] {
        &self.quotes
    }

    /// Store limit stored with the items, if any
    pub fn max_stores(&self) -> Option<i64> {
        self.max_stores
    }
}
