#![forbid(unsafe_code)]

//! Item identity and the item-source contract.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable item key supplied by the item source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Anything that carries an [`ItemId`]. The rest of the payload is opaque.
pub trait Keyed {
    fn item_id(&self) -> &ItemId;
}

impl Keyed for ItemId {
    fn item_id(&self) -> &ItemId {
        self
    }
}

/// The external collection of items, in the source's order.
pub trait ItemSource {
    type Item: Keyed;

    /// Current items, ordered as the source knows them.
    fn items(&self) -> Vec<Self::Item>;

    /// Current ids, ordered as the source knows them.
    fn item_ids(&self) -> Vec<ItemId> {
        self.items().iter().map(|item| item.item_id().clone()).collect()
    }
}

impl<T: Keyed + Clone> ItemSource for Vec<T> {
    type Item = T;

    fn items(&self) -> Vec<T> {
        self.clone()
    }

    fn item_ids(&self) -> Vec<ItemId> {
        self.iter().map(|item| item.item_id().clone()).collect()
    }
}
