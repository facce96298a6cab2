//! Item entity model.
//!
//! Freshness is never stored on the row. It is derived from
//! `expiry_date` and the current time whenever it is needed.

use chrono::{DateTime, Utc};
use freshguard_core::types::{ItemId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A perishable item tracked for a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier.
    pub id: ItemId,
    /// Owning user.
    pub user_id: UserId,
    /// Item name shown in reminders.
    pub name: String,
    /// Free-form category (e.g. "dairy").
    pub category: String,
    /// When the item was bought.
    pub purchase_date: DateTime<Utc>,
    /// When the item expires.
    pub expiry_date: DateTime<Utc>,
    /// Storage location (e.g. "fridge").
    pub location: String,
    /// Amount on hand.
    pub quantity: i32,
    /// Unit for `quantity`.
    pub unit: String,
    /// Optional notes.
    pub notes: Option<String>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewItem {
    /// Item name.
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    /// Category.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub category: String,
    /// Purchase date.
    pub purchase_date: DateTime<Utc>,
    /// Expiry date.
    pub expiry_date: DateTime<Utc>,
    /// Storage location.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub location: String,
    /// Amount on hand.
    #[validate(range(min = 0, message = "must not be negative"))]
    pub quantity: i32,
    /// Unit for `quantity`.
    #[validate(length(max = 32, message = "must be at most 32 characters"))]
    pub unit: String,
    /// Optional notes.
    pub notes: Option<String>,
}

/// An item eligible for a reminder, joined with its owner's address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ReminderCandidate {
    /// Item identifier.
    pub item_id: ItemId,
    /// Owning user.
    pub user_id: UserId,
    /// Item name.
    pub name: String,
    /// Expiry timestamp.
    pub expiry_date: DateTime<Utc>,
    /// Owner's email address.
    pub owner_email: String,
    /// Owner's display name.
    pub owner_name: String,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn new_item() -> NewItem {
        let now = Utc::now();
        NewItem {
            name: "Milk".into(),
            category: "dairy".into(),
            purchase_date: now,
            expiry_date: now + Duration::days(2),
            location: "fridge".into(),
            quantity: 1,
            unit: "l".into(),
            notes: None,
        }
    }

    #[test]
    fn test_valid_item_passes() {
        assert!(new_item().validate().is_ok());
    }

    #[test]
    fn test_empty_name_and_negative_quantity_fail() {
        let mut item = new_item();
        item.name = String::new();
        item.quantity = -1;
        let errors = item.validate().expect_err("should fail");
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("quantity"));
    }
}
