//! # Domain Model: Items
//!
//! An [`Item`] is one tracked product in the freezer. The ledger stores a
//! sequence of items, so the model only has to guarantee the properties that
//! hold for a single entry:
//!
//! - **Identity**: `id` is the scanned code, or a generated token for manual
//!   entries without a code.
//! - **Display name**: whatever the user typed, or the placeholder
//!   `"Product <id>"` when nothing was supplied (scans never carry a name).
//! - **Quantity**: always `>= 1`. An item that runs out is removed from the
//!   ledger, it is never stored at zero.
//!
//! ## Wire Format
//!
//! Items serialize to plain JSON objects:
//!
//! ```text
//! {"id":"5701234567890","name":"Product 5701234567890","qty":2}
//! ```
//!
//! Deserialization enforces the quantity rule. A stored `qty` of `0` is
//! rejected instead of being silently accepted, so a damaged snapshot is
//! detected at load time rather than showing up as a ghost entry.

use serde::{Deserialize, Serialize};

/// Prefix of the placeholder name given to items added without a name.
pub const PLACEHOLDER_PREFIX: &str = "Product";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub qty: u32,
}

impl Item {
    /// Creates a fresh item with a quantity of one.
    ///
    /// An empty `name` falls back to [`placeholder_name`]. Any other name,
    /// whitespace included, is kept as given.
    pub fn new(id: impl Into<String>, name: &str) -> Self {
        let id = id.into();
        let name = if name.is_empty() {
            placeholder_name(&id)
        } else {
            name.to_string()
        };
        Self { id, name, qty: 1 }
    }
}

/// Display name used when an item arrives without one.
pub fn placeholder_name(id: &str) -> String {
    format!("{} {}", PLACEHOLDER_PREFIX, id)
}

// Quantity is validated on the way in. Missing or zero quantities mean the
// snapshot was not written by us.
impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = ItemHelper::deserialize(deserializer)?;

        if helper.qty == 0 {
            return Err(serde::de::Error::custom(format!(
                "item '{}' has quantity 0",
                helper.id
            )));
        }

        Ok(Item {
            id: helper.id,
            name: helper.name,
            qty: helper.qty,
        })
    }
}

#[derive(Deserialize)]
struct ItemHelper {
    id: String,
    name: String,
    qty: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_starts_at_one() {
        let item = Item::new("111", "Peas");
        assert_eq!(item.id, "111");
        assert_eq!(item.name, "Peas");
        assert_eq!(item.qty, 1);
    }

    #[test]
    fn empty_name_gets_placeholder() {
        assert_eq!(Item::new("111", "").name, "Product 111");
    }

    #[test]
    fn whitespace_name_is_kept() {
        assert_eq!(Item::new("111", "   ").name, "   ");
    }

    #[test]
    fn serializes_to_flat_record() {
        let item = Item::new("111", "Peas");
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"id":"111","name":"Peas","qty":1}"#);
    }

    #[test]
    fn rejects_zero_quantity() {
        let err = serde_json::from_str::<Item>(r#"{"id":"1","name":"x","qty":0}"#).unwrap_err();
        assert!(err.to_string().contains("quantity 0"));
    }

    #[test]
    fn rejects_negative_quantity() {
        assert!(serde_json::from_str::<Item>(r#"{"id":"1","name":"x","qty":-3}"#).is_err());
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(serde_json::from_str::<Item>(r#"{"id":"1","qty":2}"#).is_err());
    }
}
