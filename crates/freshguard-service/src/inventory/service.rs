//! Registers users and their items after validating input.

use std::sync::Arc;

use tracing::info;
use validator::{Validate, ValidationErrors};

use freshguard_core::error::AppError;
use freshguard_core::traits::Clock;
use freshguard_core::types::ItemId;
use freshguard_database::store::{ItemStore, UserStore};
use freshguard_entity::item::{Item, NewItem};
use freshguard_entity::user::{NewUser, User};

use crate::context::RequestContext;

/// Creates users and items. Input is validated before anything is written.
#[derive(Debug, Clone)]
pub struct InventoryService {
    users: Arc<dyn UserStore>,
    items: Arc<dyn ItemStore>,
    clock: Arc<dyn Clock>,
}

impl InventoryService {
    /// Creates a new inventory service.
    pub fn new(users: Arc<dyn UserStore>, items: Arc<dyn ItemStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            items,
            clock,
        }
    }

    /// Registers a user. Fails with `Conflict` when the email is taken.
    pub async fn register_user(&self, new: &NewUser) -> Result<User, AppError> {
        new.validate().map_err(validation_error)?;
        let user = self.users.create_user(new, self.clock.now()).await?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Adds an item to the caller's inventory.
    pub async fn add_item(&self, ctx: &RequestContext, new: &NewItem) -> Result<Item, AppError> {
        new.validate().map_err(validation_error)?;
        if new.expiry_date < new.purchase_date {
            return Err(AppError::validation(
                "expiry_date: must not be before purchase_date",
            ));
        }
        let item = self
            .items
            .create_item(ctx.user_id, new, self.clock.now())
            .await?;
        info!(user_id = %ctx.user_id, item_id = %item.id, "Item added");
        Ok(item)
    }

    /// Removes one of the caller's items along with its reminder marks.
    /// Notifications about it stay in the inbox, unlinked.
    pub async fn remove_item(&self, ctx: &RequestContext, id: ItemId) -> Result<(), AppError> {
        if !self.items.delete_item(id, ctx.user_id).await? {
            return Err(AppError::not_found(format!("Item {id} not found")));
        }
        info!(user_id = %ctx.user_id, item_id = %id, "Item removed");
        Ok(())
    }

    /// Looks up a user by id or email address.
    pub async fn find_user(&self, key: &str) -> Result<User, AppError> {
        let user = match key.parse() {
            Ok(id) => self.users.find_user(id).await?,
            Err(_) => self.users.find_user_by_email(key).await?,
        };
        user.ok_or_else(|| AppError::not_found(format!("User '{key}' not found")))
    }
}

/// Flattens field errors into one message, e.g. `name: must be 1-200 characters`.
fn validation_error(errors: ValidationErrors) -> AppError {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let reason = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {reason}")
            })
        })
        .collect();
    parts.sort();
    AppError::validation(parts.join("; "))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use freshguard_core::error::ErrorKind;
    use freshguard_core::traits::ManualClock;
    use freshguard_database::MemoryStore;

    use super::*;

    fn service() -> (InventoryService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap(),
        ));
        (
            InventoryService::new(store.clone(), store.clone(), clock),
            store,
        )
    }

    fn new_item(name: &str) -> NewItem {
        let purchased = Utc.with_ymd_and_hms(2025, 3, 30, 8, 0, 0).unwrap();
        NewItem {
            name: name.to_string(),
            category: "Dairy".to_string(),
            purchase_date: purchased,
            expiry_date: purchased + Duration::days(7),
            location: "Fridge".to_string(),
            quantity: 1,
            unit: "l".to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_register_and_find_user() {
        let (service, _) = service();
        let user = service
            .register_user(&NewUser {
                email: "ana@example.com".into(),
                name: "Ana".into(),
            })
            .await
            .unwrap();

        assert_eq!(service.find_user("ana@example.com").await.unwrap().id, user.id);
        assert_eq!(service.find_user(&user.id.to_string()).await.unwrap().id, user.id);

        let err = service.find_user("nobody@example.com").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_invalid_user_is_rejected() {
        let (service, _) = service();
        let err = service
            .register_user(&NewUser {
                email: "not-an-email".into(),
                name: "Ana".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.starts_with("email"));
    }

    #[tokio::test]
    async fn test_invalid_item_writes_nothing() {
        let (service, store) = service();
        let user = service
            .register_user(&NewUser {
                email: "ana@example.com".into(),
                name: "Ana".into(),
            })
            .await
            .unwrap();
        let ctx = RequestContext::new(user.id, user.email.clone(), Utc::now());

        let err = service.add_item(&ctx, &new_item("")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut backwards = new_item("Milk");
        backwards.expiry_date = backwards.purchase_date - Duration::days(1);
        let err = service.add_item(&ctx, &backwards).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        assert!(store.find_items_by_user(user.id).await.unwrap().is_empty());

        let item = service.add_item(&ctx, &new_item("Milk")).await.unwrap();
        assert_eq!(item.user_id, user.id);
    }

    #[tokio::test]
    async fn test_remove_item_only_for_owner() {
        let (service, store) = service();
        let ana = service
            .register_user(&NewUser {
                email: "ana@example.com".into(),
                name: "Ana".into(),
            })
            .await
            .unwrap();
        let bob = service
            .register_user(&NewUser {
                email: "bob@example.com".into(),
                name: "Bob".into(),
            })
            .await
            .unwrap();
        let ana_ctx = RequestContext::new(ana.id, ana.email.clone(), Utc::now());
        let bob_ctx = RequestContext::new(bob.id, bob.email.clone(), Utc::now());
        let milk = service.add_item(&ana_ctx, &new_item("Milk")).await.unwrap();

        let err = service.remove_item(&bob_ctx, milk.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(store.find_items_by_user(ana.id).await.unwrap().len(), 1);

        service.remove_item(&ana_ctx, milk.id).await.unwrap();
        assert!(store.find_items_by_user(ana.id).await.unwrap().is_empty());

        let err = service.remove_item(&ana_ctx, milk.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
