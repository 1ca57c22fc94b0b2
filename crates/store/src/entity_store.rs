use std::sync::Arc;

use thiserror::Error;

use labstock_alerts::Notification;
use labstock_auth::UserAccount;
use labstock_core::StockError;
use labstock_inventory::{Component, StockTransaction};

/// The four durable entity collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Components,
    Transactions,
    Notifications,
    Users,
}

impl EntityKind {
    /// Stable collection key (document name, map key, ...).
    pub fn key(&self) -> &'static str {
        match self {
            EntityKind::Components => "components",
            EntityKind::Transactions => "transactions",
            EntityKind::Notifications => "notifications",
            EntityKind::Users => "users",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

/// Store-level failure.
///
/// Converts into [`StockError::PersistenceUnavailable`] at the service
/// boundary; the store never retries internally.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store: {0}")]
    Open(String),

    #[error("failed to read {0}: {1}")]
    Read(EntityKind, String),

    #[error("failed to write {0}: {1}")]
    Write(EntityKind, String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for StockError {
    fn from(err: StoreError) -> Self {
        StockError::persistence(err.to_string())
    }
}

/// Durable whole-collection storage per entity kind.
///
/// Each `save_*` replaces the entire collection in one operation; readers see
/// either the previous collection or the new one, never a partial write.
pub trait EntityStore: Send + Sync {
    fn load_components(&self) -> StoreResult<Vec<Component>>;
    fn save_components(&self, components: &[Component]) -> StoreResult<()>;

    fn load_transactions(&self) -> StoreResult<Vec<StockTransaction>>;
    fn save_transactions(&self, transactions: &[StockTransaction]) -> StoreResult<()>;

    fn load_notifications(&self) -> StoreResult<Vec<Notification>>;
    fn save_notifications(&self, notifications: &[Notification]) -> StoreResult<()>;

    fn load_users(&self) -> StoreResult<Vec<UserAccount>>;
    fn save_users(&self, users: &[UserAccount]) -> StoreResult<()>;
}

impl<S> EntityStore for Arc<S>
where
    S: EntityStore + ?Sized,
{
    fn load_components(&self) -> StoreResult<Vec<Component>> {
        (**self).load_components()
    }

    fn save_components(&self, components: &[Component]) -> StoreResult<()> {
        (**self).save_components(components)
    }

    fn load_transactions(&self) -> StoreResult<Vec<StockTransaction>> {
        (**self).load_transactions()
    }

    fn save_transactions(&self, transactions: &[StockTransaction]) -> StoreResult<()> {
        (**self).save_transactions(transactions)
    }

    fn load_notifications(&self) -> StoreResult<Vec<Notification>> {
        (**self).load_notifications()
    }

    fn save_notifications(&self, notifications: &[Notification]) -> StoreResult<()> {
        (**self).save_notifications(notifications)
    }

    fn load_users(&self) -> StoreResult<Vec<UserAccount>> {
        (**self).load_users()
    }

    fn save_users(&self, users: &[UserAccount]) -> StoreResult<()> {
        (**self).save_users(users)
    }
}
