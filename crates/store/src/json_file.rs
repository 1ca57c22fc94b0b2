use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use labstock_alerts::Notification;
use labstock_auth::UserAccount;
use labstock_inventory::{Component, StockTransaction};

use crate::entity_store::{EntityKind, EntityStore, StoreError, StoreResult};

/// Directory-backed store: one JSON document per entity kind.
///
/// A missing document reads as the empty collection. Writes go to a sibling
/// temp file first and are renamed into place, so readers see either the old
/// document or the new one.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating the directory if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Open(e.to_string()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, kind: EntityKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.key()))
    }

    fn load<T: DeserializeOwned>(&self, kind: EntityKind) -> StoreResult<Vec<T>> {
        let path = self.path(kind);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path).map_err(|e| StoreError::Read(kind, e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| StoreError::Read(kind, e.to_string()))
    }

    fn save<T: Serialize>(&self, kind: EntityKind, records: &[T]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Write(kind, e.to_string()))?;

        let path = self.path(kind);
        let tmp = self.dir.join(format!("{}.json.tmp", kind.key()));
        fs::write(&tmp, json).map_err(|e| StoreError::Write(kind, e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::Write(kind, e.to_string()))?;
        Ok(())
    }
}

impl EntityStore for JsonFileStore {
    fn load_components(&self) -> StoreResult<Vec<Component>> {
        self.load(EntityKind::Components)
    }

    fn save_components(&self, components: &[Component]) -> StoreResult<()> {
        self.save(EntityKind::Components, components)
    }

    fn load_transactions(&self) -> StoreResult<Vec<StockTransaction>> {
        self.load(EntityKind::Transactions)
    }

    fn save_transactions(&self, transactions: &[StockTransaction]) -> StoreResult<()> {
        self.save(EntityKind::Transactions, transactions)
    }

    fn load_notifications(&self) -> StoreResult<Vec<Notification>> {
        self.load(EntityKind::Notifications)
    }

    fn save_notifications(&self, notifications: &[Notification]) -> StoreResult<()> {
        self.save(EntityKind::Notifications, notifications)
    }

    fn load_users(&self) -> StoreResult<Vec<UserAccount>> {
        self.load(EntityKind::Users)
    }

    fn save_users(&self, users: &[UserAccount]) -> StoreResult<()> {
        self.save(EntityKind::Users, users)
    }
}
