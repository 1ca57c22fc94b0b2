use std::sync::RwLock;

use labstock_alerts::Notification;
use labstock_auth::UserAccount;
use labstock_inventory::{Component, StockTransaction};

use crate::entity_store::{EntityKind, EntityStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Collections {
    components: Vec<Component>,
    transactions: Vec<StockTransaction>,
    notifications: Vec<Notification>,
    users: Vec<UserAccount>,
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(
        &self,
        kind: EntityKind,
        f: impl FnOnce(&Collections) -> Vec<T>,
    ) -> StoreResult<Vec<T>> {
        let guard = self
            .inner
            .read()
            .map_err(|_| StoreError::Read(kind, "lock poisoned".to_string()))?;
        Ok(f(&guard))
    }

    fn write(
        &self,
        kind: EntityKind,
        f: impl FnOnce(&mut Collections),
    ) -> StoreResult<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| StoreError::Write(kind, "lock poisoned".to_string()))?;
        f(&mut guard);
        Ok(())
    }
}

impl EntityStore for MemoryStore {
    fn load_components(&self) -> StoreResult<Vec<Component>> {
        self.read(EntityKind::Components, |c| c.components.clone())
    }

    fn save_components(&self, components: &[Component]) -> StoreResult<()> {
        self.write(EntityKind::Components, |c| {
            c.components = components.to_vec();
        })
    }

    fn load_transactions(&self) -> StoreResult<Vec<StockTransaction>> {
        self.read(EntityKind::Transactions, |c| c.transactions.clone())
    }

    fn save_transactions(&self, transactions: &[StockTransaction]) -> StoreResult<()> {
        self.write(EntityKind::Transactions, |c| {
            c.transactions = transactions.to_vec();
        })
    }

    fn load_notifications(&self) -> StoreResult<Vec<Notification>> {
        self.read(EntityKind::Notifications, |c| c.notifications.clone())
    }

    fn save_notifications(&self, notifications: &[Notification]) -> StoreResult<()> {
        self.write(EntityKind::Notifications, |c| {
            c.notifications = notifications.to_vec();
        })
    }

    fn load_users(&self) -> StoreResult<Vec<UserAccount>> {
        self.read(EntityKind::Users, |c| c.users.clone())
    }

    fn save_users(&self, users: &[UserAccount]) -> StoreResult<()> {
        self.write(EntityKind::Users, |c| {
            c.users = users.to_vec();
        })
    }
}
