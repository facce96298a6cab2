//! In-memory implementation of every store trait using dashmap.
//!
//! Uniqueness rules mirror the PostgreSQL schema: one user per email and
//! one notification per (user, item, kind, UTC day) while the item link is
//! present. Deleting an item cascades its reminder marks and clears the
//! item link on its notifications.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use freshguard_core::error::AppError;
use freshguard_core::result::AppResult;
use freshguard_core::types::{ItemId, NotificationId, UserId};
use freshguard_entity::item::{Item, NewItem, ReminderCandidate};
use freshguard_entity::notification::{NewNotification, Notification, NotificationKind};
use freshguard_entity::reminder::ReminderChannel;
use freshguard_entity::user::{NewUser, User};

use crate::store::{ItemStore, NotificationStore, ReminderMarkStore, UserStore};

type MarkKey = (ItemId, ReminderChannel, NotificationKind);
type DedupKey = (UserId, ItemId, NotificationKind, NaiveDate);

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<UserId, User>,
    emails: DashMap<String, UserId>,
    items: DashMap<ItemId, Item>,
    marks: DashMap<MarkKey, DateTime<Utc>>,
    notifications: DashMap<NotificationId, Notification>,
    dedup_index: DashMap<DedupKey, NotificationId>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notifications across all users.
    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, new: &NewUser, now: DateTime<Utc>) -> AppResult<User> {
        let user = User {
            id: UserId::new(),
            email: new.email.clone(),
            name: new.name.clone(),
            created_at: now,
        };
        match self.emails.entry(new.email.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "User with email '{}' already exists",
                    new.email
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let id = self.emails.get(email).map(|id| *id);
        Ok(id.and_then(|id| self.users.get(&id).map(|u| u.clone())))
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn create_item(
        &self,
        user_id: UserId,
        new: &NewItem,
        now: DateTime<Utc>,
    ) -> AppResult<Item> {
        if !self.users.contains_key(&user_id) {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        let item = Item {
            id: ItemId::new(),
            user_id,
            name: new.name.clone(),
            category: new.category.clone(),
            purchase_date: new.purchase_date,
            expiry_date: new.expiry_date,
            location: new.location.clone(),
            quantity: new.quantity,
            unit: new.unit.clone(),
            notes: new.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_items_by_user(&self, user_id: UserId) -> AppResult<Vec<Item>> {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| {
            a.expiry_date
                .cmp(&b.expiry_date)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        Ok(items)
    }

    async fn find_candidates(
        &self,
        scope: Option<UserId>,
        horizon: DateTime<Utc>,
    ) -> AppResult<Vec<ReminderCandidate>> {
        let selected: Vec<Item> = self
            .items
            .iter()
            .filter(|entry| entry.expiry_date <= horizon)
            .filter(|entry| scope.is_none_or(|user| entry.user_id == user))
            .map(|entry| entry.value().clone())
            .collect();

        let mut candidates: Vec<ReminderCandidate> = selected
            .into_iter()
            .filter_map(|item| {
                let owner = self.users.get(&item.user_id)?;
                Some(ReminderCandidate {
                    item_id: item.id,
                    user_id: item.user_id,
                    name: item.name,
                    expiry_date: item.expiry_date,
                    owner_email: owner.email.clone(),
                    owner_name: owner.name.clone(),
                })
            })
            .collect();
        candidates.sort_by(|a, b| {
            a.expiry_date
                .cmp(&b.expiry_date)
                .then_with(|| a.item_id.0.cmp(&b.item_id.0))
        });
        Ok(candidates)
    }

    async fn delete_item(&self, id: ItemId, user_id: UserId) -> AppResult<bool> {
        let removed = self
            .items
            .remove_if(&id, |_, item| item.user_id == user_id)
            .is_some();
        if !removed {
            return Ok(false);
        }

        self.marks.retain(|(item_id, _, _), _| *item_id != id);
        self.dedup_index.retain(|(_, item_id, _, _), _| *item_id != id);
        for mut entry in self.notifications.iter_mut() {
            if entry.item_id == Some(id) {
                entry.item_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl ReminderMarkStore for MemoryStore {
    async fn last_notified(
        &self,
        item_id: ItemId,
        channel: ReminderChannel,
        kind: NotificationKind,
    ) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self.marks.get(&(item_id, channel, kind)).map(|at| *at))
    }

    async fn record_mark(
        &self,
        item_id: ItemId,
        channel: ReminderChannel,
        kind: NotificationKind,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        if !self.items.contains_key(&item_id) {
            return Err(AppError::database(format!(
                "Cannot record reminder mark: item {item_id} does not exist"
            )));
        }
        self.marks.insert((item_id, channel, kind), at);
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn create_notification(&self, new: NewNotification) -> AppResult<Notification> {
        let row = new.into_notification();
        if let Some(item_id) = row.item_id {
            let key = (row.user_id, item_id, row.kind, row.dedup_day);
            match self.dedup_index.entry(key) {
                Entry::Occupied(_) => {
                    return Err(AppError::conflict(format!(
                        "Notification for item {item_id} ({}) already exists for {}",
                        row.kind, row.dedup_day
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(row.id);
                }
            }
        }
        self.notifications.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_notifications_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        let mut rows: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        Ok(rows)
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<i64> {
        let count = self
            .notifications
            .iter()
            .filter(|entry| entry.user_id == user_id && !entry.is_read)
            .count();
        Ok(count as i64)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        let Some(mut row) = self.notifications.get_mut(&id) else {
            return Ok(None);
        };
        if row.user_id != user_id {
            return Ok(None);
        }
        row.is_read = true;
        row.read_at.get_or_insert(at);
        Ok(Some(row.clone()))
    }

    async fn delete_notification(&self, id: NotificationId, user_id: UserId) -> AppResult<bool> {
        let Some((_, row)) = self
            .notifications
            .remove_if(&id, |_, row| row.user_id == user_id)
        else {
            return Ok(false);
        };
        if let Some(item_id) = row.item_id {
            self.dedup_index
                .remove(&(row.user_id, item_id, row.kind, row.dedup_day));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 10, 9, 0, 0).unwrap()
    }

    async fn seed(store: &MemoryStore, email: &str) -> User {
        store
            .create_user(
                &NewUser {
                    email: email.into(),
                    name: "Tester".into(),
                },
                now(),
            )
            .await
            .expect("create user")
    }

    async fn item(store: &MemoryStore, user: UserId, name: &str, expires_in: Duration) -> Item {
        store
            .create_item(
                user,
                &NewItem {
                    name: name.into(),
                    category: "dairy".into(),
                    purchase_date: now() - Duration::days(3),
                    expiry_date: now() + expires_in,
                    location: "fridge".into(),
                    quantity: 1,
                    unit: "pc".into(),
                    notes: None,
                },
                now(),
            )
            .await
            .expect("create item")
    }

    fn warning(user: UserId, item: ItemId, at: DateTime<Utc>) -> NewNotification {
        NewNotification {
            user_id: user,
            item_id: Some(item),
            kind: NotificationKind::ExpiryWarning,
            title: "Milk expiring soon".into(),
            message: "Milk expires in 2 days. Plan to use it soon.".into(),
            created_at: at,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = MemoryStore::new();
        seed(&store, "a@example.com").await;
        let err = store
            .create_user(
                &NewUser {
                    email: "a@example.com".into(),
                    name: "Other".into(),
                },
                now(),
            )
            .await
            .expect_err("duplicate");
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_candidates_are_scoped_and_sorted() {
        let store = MemoryStore::new();
        let alice = seed(&store, "alice@example.com").await;
        let bob = seed(&store, "bob@example.com").await;
        let later = item(&store, alice.id, "Yogurt", Duration::days(2)).await;
        let sooner = item(&store, alice.id, "Milk", Duration::hours(-30)).await;
        item(&store, alice.id, "Rice", Duration::days(200)).await;
        item(&store, bob.id, "Eggs", Duration::days(1)).await;

        let horizon = now() + Duration::days(3);
        let mine = store
            .find_candidates(Some(alice.id), horizon)
            .await
            .expect("candidates");
        let ids: Vec<ItemId> = mine.iter().map(|c| c.item_id).collect();
        assert_eq!(ids, vec![sooner.id, later.id]);
        assert_eq!(mine[0].owner_email, "alice@example.com");

        let all = store.find_candidates(None, horizon).await.expect("all");
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_notification_unique_per_item_kind_and_day() {
        let store = MemoryStore::new();
        let user = seed(&store, "u@example.com").await;
        let milk = item(&store, user.id, "Milk", Duration::days(2)).await;

        store
            .create_notification(warning(user.id, milk.id, now()))
            .await
            .expect("first");
        let err = store
            .create_notification(warning(user.id, milk.id, now() + Duration::hours(3)))
            .await
            .expect_err("same day");
        assert!(err.is_conflict());

        store
            .create_notification(warning(user.id, milk.id, now() + Duration::days(1)))
            .await
            .expect("next day");
        assert_eq!(store.notification_count(), 2);
    }

    #[tokio::test]
    async fn test_mark_read_keeps_first_read_at_and_hides_foreign_rows() {
        let store = MemoryStore::new();
        let owner = seed(&store, "o@example.com").await;
        let other = seed(&store, "x@example.com").await;
        let milk = item(&store, owner.id, "Milk", Duration::days(2)).await;
        let row = store
            .create_notification(warning(owner.id, milk.id, now()))
            .await
            .expect("create");

        assert!(
            store
                .mark_read(row.id, other.id, now())
                .await
                .expect("foreign")
                .is_none()
        );

        let first = store
            .mark_read(row.id, owner.id, now() + Duration::minutes(1))
            .await
            .expect("mark")
            .expect("found");
        let second = store
            .mark_read(row.id, owner.id, now() + Duration::minutes(9))
            .await
            .expect("mark again")
            .expect("found");
        assert_eq!(first.read_at, second.read_at);
        assert!(second.is_read);
        assert_eq!(store.count_unread(owner.id).await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_delete_item_cascades_marks_and_unlinks_notifications() {
        let store = MemoryStore::new();
        let user = seed(&store, "d@example.com").await;
        let milk = item(&store, user.id, "Milk", Duration::days(2)).await;
        let row = store
            .create_notification(warning(user.id, milk.id, now()))
            .await
            .expect("create");
        store
            .record_mark(
                milk.id,
                ReminderChannel::InApp,
                NotificationKind::ExpiryWarning,
                now(),
            )
            .await
            .expect("mark");

        assert!(store.delete_item(milk.id, user.id).await.expect("delete"));
        assert_eq!(
            store
                .last_notified(
                    milk.id,
                    ReminderChannel::InApp,
                    NotificationKind::ExpiryWarning
                )
                .await
                .expect("read"),
            None
        );
        let rows = store
            .find_notifications_by_user(user.id)
            .await
            .expect("list");
        assert_eq!(rows[0].id, row.id);
        assert_eq!(rows[0].item_id, None);
    }

    #[tokio::test]
    async fn test_delete_notification_is_owner_scoped() {
        let store = MemoryStore::new();
        let owner = seed(&store, "own@example.com").await;
        let other = seed(&store, "oth@example.com").await;
        let milk = item(&store, owner.id, "Milk", Duration::days(2)).await;
        let row = store
            .create_notification(warning(owner.id, milk.id, now()))
            .await
            .expect("create");

        assert!(!store.delete_notification(row.id, other.id).await.expect("foreign"));
        assert!(store.delete_notification(row.id, owner.id).await.expect("own"));
        assert!(!store.delete_notification(row.id, owner.id).await.expect("again"));
    }
}
