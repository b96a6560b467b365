//! Grocery Items

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raw::Scalar;

/// Errors raised while validating the grocery list.
///
/// Every item on the list has to be covered by the basket, so a bad item
/// rejects the whole request rather than being dropped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    /// The item has no usable identifier.
    #[error("item {index} has no id")]
    MissingId {
        /// Position in the input list
        index: usize,
    },

    /// The item has no usable name.
    #[error("item {index} ({id}) has no name")]
    MissingName {
        /// Position in the input list
        index: usize,
        /// Item id
        id: String,
    },

    /// The requested quantity is missing, not a whole number, or below one.
    #[error("item {index} ({id}) has invalid quantity {quantity}")]
    InvalidQuantity {
        /// Position in the input list
        index: usize,
        /// Item id
        id: String,
        /// Quantity as supplied
        quantity: String,
    },

    /// Two items share the same id.
    #[error("item id {id} is used by items {first} and {second}")]
    DuplicateId {
        /// Item id
        id: String,
        /// Position of the first item with this id
        first: usize,
        /// Position of the repeated item
        second: usize,
    },
}

/// A grocery list entry as supplied by the list source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroceryItem {
    /// Item identifier
    pub id: Option<Scalar>,

    /// Display name
    pub name: Option<String>,

    /// Requested quantity
    #[serde(alias = "qty")]
    pub quantity: Option<Scalar>,

    /// Size descriptor, e.g. "1L"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// List category, e.g. "dairy"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A validated grocery list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryItem {
    id: String,
    name: String,
    quantity: u32,
    size: Option<String>,
    category: Option<String>,
}

impl GroceryItem {
    /// Creates a new item.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] if the id or name is blank or the quantity is zero.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
    ) -> Result<Self, ItemError> {
        let id = id.into().trim().to_string();
        let name = name.into().trim().to_string();

        if id.is_empty() {
            return Err(ItemError::MissingId { index: 0 });
        }

        if name.is_empty() {
            return Err(ItemError::MissingName { index: 0, id });
        }

        if quantity == 0 {
            return Err(ItemError::InvalidQuantity {
                index: 0,
                id,
                quantity: quantity.to_string(),
            });
        }

        Ok(Self {
            id,
            name,
            quantity,
            size: None,
            category: None,
        })
    }

    /// Sets the size descriptor.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Item identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Requested quantity (always at least one)
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Size descriptor
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Category
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl RawGroceryItem {
    /// Validates a raw record at the given list position.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] describing the first defect found.
    pub fn validate(&self, index: usize) -> Result<GroceryItem, ItemError> {
        let id = self
            .id
            .as_ref()
            .map(Scalar::to_ident)
            .filter(|id| !id.is_empty())
            .ok_or(ItemError::MissingId { index })?;

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ItemError::MissingName {
                index,
                id: id.clone(),
            })?
            .to_string();

        let quantity = self
            .quantity
            .as_ref()
            .and_then(Scalar::to_integer)
            .and_then(|quantity| u32::try_from(quantity).ok())
            .filter(|quantity| *quantity > 0)
            .ok_or_else(|| ItemError::InvalidQuantity {
                index,
                id: id.clone(),
                quantity: self
                    .quantity
                    .as_ref()
                    .map_or_else(|| "<missing>".to_string(), ToString::to_string),
            })?;

        Ok(GroceryItem {
            id,
            name,
            quantity,
            size: clean_optional(self.size.as_deref()),
            category: clean_optional(self.category.as_deref()),
        })
    }
}

fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Validates a whole grocery list, preserving input order.
///
/// # Errors
///
/// Returns the first [`ItemError`] encountered, including duplicate ids.
pub fn validate_items(raw: &[RawGroceryItem]) -> Result<Vec<GroceryItem>, ItemError> {
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();
    let mut items = Vec::with_capacity(raw.len());

    for (index, record) in raw.iter().enumerate() {
        let item = record.validate(index)?;

        if let Some(&first) = seen.get(item.id()) {
            return Err(ItemError::DuplicateId {
                id: item.id,
                first,
                second: index,
            });
        }

        seen.insert(item.id.clone(), index);
        items.push(item);
    }

    Ok(items)
}
