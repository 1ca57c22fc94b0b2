use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};

use labstock_alerts::{self as alerts, Notification};
use labstock_auth::{
    Capability, NewUser, UserAccount, UserPatch, authenticate, capabilities_for, require,
};
use labstock_core::{ComponentId, NotificationId, StockError, StockResult, TransactionId, UserId};
use labstock_inventory::{
    Component, ComponentFilter, ComponentPatch, MovementOutcome, MovementRequest, NewComponent,
    StockTransaction, apply_movement,
};
use labstock_reports::{DashboardSummary, dashboard};
use labstock_store::EntityStore;

/// Application façade over an injected entity store.
///
/// Every operation is a single logical pass: load the collections it needs,
/// decide through the pure domain functions, persist the result. No state is
/// retained across calls beyond the per-component movement locks.
pub struct InventoryService<S: EntityStore> {
    store: S,
    /// Serializes the read-compute-write sequence per component so concurrent
    /// movements against the same component cannot lose updates. Everything
    /// else stays last-write-wins.
    movement_locks: Mutex<HashMap<ComponentId, Arc<Mutex<()>>>>,
}

impl<S: EntityStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            movement_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn movement_lock(&self, id: ComponentId) -> Arc<Mutex<()>> {
        let mut map = self
            .movement_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        map.entry(id).or_default().clone()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Authentication / authorization
    // ─────────────────────────────────────────────────────────────────────

    /// Match a submitted username/secret pair against the stored accounts.
    pub fn authenticate(&self, username: &str, secret: &str) -> StockResult<UserAccount> {
        let users = self.store.load_users()?;
        authenticate(&users, username, secret).cloned()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Component catalog
    // ─────────────────────────────────────────────────────────────────────

    pub fn components(&self) -> StockResult<Vec<Component>> {
        Ok(self.store.load_components()?)
    }

    pub fn component(&self, id: ComponentId) -> StockResult<Component> {
        self.store
            .load_components()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(StockError::ComponentNotFound)
    }

    pub fn search_components(&self, filter: &ComponentFilter) -> StockResult<Vec<Component>> {
        let components = self.store.load_components()?;
        Ok(filter.apply(&components).into_iter().cloned().collect())
    }

    /// Create a component with its initial quantity. Gated on AddComponents.
    pub fn create_component(
        &self,
        actor: &UserAccount,
        new: NewComponent,
    ) -> StockResult<Component> {
        require(actor.role, Capability::AddComponents)?;

        let mut components = self.store.load_components()?;
        let component = Component::create(ComponentId::new(), new, Utc::now())?;
        components.push(component.clone());
        self.store.save_components(&components)?;

        tracing::info!(component = %component.id, name = %component.name, "component created");
        Ok(component)
    }

    /// Edit descriptive fields only. Gated on EditComponents; quantity is
    /// unreachable from here.
    pub fn update_component_metadata(
        &self,
        actor: &UserAccount,
        id: ComponentId,
        patch: &ComponentPatch,
    ) -> StockResult<Component> {
        require(actor.role, Capability::EditComponents)?;

        let mut components = self.store.load_components()?;
        let component = components
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StockError::ComponentNotFound)?;
        patch.apply_to(component)?;
        let updated = component.clone();
        self.store.save_components(&components)?;
        Ok(updated)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Ledger
    // ─────────────────────────────────────────────────────────────────────

    /// Apply a stock movement and append its transaction record.
    ///
    /// Open to any authenticated actor. The component write and the
    /// transaction append are observably atomic: the transaction save failing
    /// rolls the component write back, so a reader never sees a quantity
    /// without its transaction or vice versa.
    pub fn apply_movement(
        &self,
        actor: &UserAccount,
        request: &MovementRequest,
    ) -> StockResult<MovementOutcome> {
        let lock = self.movement_lock(request.component_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut components = self.store.load_components()?;
        let index = components
            .iter()
            .position(|c| c.id == request.component_id)
            .ok_or(StockError::ComponentNotFound)?;

        let outcome = apply_movement(
            &components[index],
            request,
            TransactionId::new(),
            actor.id,
            &actor.username,
            Utc::now(),
        )?;

        let previous = std::mem::replace(&mut components[index], outcome.component.clone());
        self.store.save_components(&components)?;

        let mut transactions = self.store.load_transactions()?;
        transactions.push(outcome.transaction.clone());
        if let Err(err) = self.store.save_transactions(&transactions) {
            // Roll back the component write; without its transaction the new
            // quantity must not be observable.
            components[index] = previous;
            if let Err(rollback) = self.store.save_components(&components) {
                tracing::error!(%rollback, "component rollback failed after transaction append failure");
            }
            return Err(err.into());
        }

        tracing::info!(
            component = %request.component_id,
            direction = %request.direction,
            quantity = request.quantity,
            user = %actor.username,
            "stock movement applied"
        );
        Ok(outcome)
    }

    /// Transaction history: the full log for holders of ViewAllTransactions,
    /// otherwise only the actor's own movements. Newest first.
    pub fn transactions_for(&self, actor: &UserAccount) -> StockResult<Vec<StockTransaction>> {
        let mut transactions = self.store.load_transactions()?;
        if !capabilities_for(actor.role).can_view_all_transactions {
            transactions.retain(|t| t.user_id == actor.id);
        }
        transactions.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(transactions)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────

    /// Re-derive alerts from the current snapshot and append the missing
    /// ones. Must be called before displaying the notification list or the
    /// dashboard counts; the engine never runs implicitly.
    pub fn refresh_notifications(&self, now: DateTime<Utc>) -> StockResult<Vec<Notification>> {
        let components = self.store.load_components()?;
        let mut stored = self.store.load_notifications()?;

        let fresh = alerts::scan(&components, &stored, now);
        if !fresh.is_empty() {
            stored.extend(fresh.iter().cloned());
            self.store.save_notifications(&stored)?;
            tracing::info!(count = fresh.len(), "notifications generated");
        }
        Ok(fresh)
    }

    /// Stored notifications, newest first.
    pub fn notifications(&self) -> StockResult<Vec<Notification>> {
        let mut notifications = self.store.load_notifications()?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    pub fn unread_notifications(&self) -> StockResult<usize> {
        Ok(alerts::unread_count(&self.store.load_notifications()?))
    }

    pub fn mark_notification_read(&self, id: NotificationId) -> StockResult<()> {
        let mut notifications = self.store.load_notifications()?;
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StockError::NotificationNotFound)?;
        notification.read = true;
        Ok(self.store.save_notifications(&notifications)?)
    }

    pub fn mark_all_notifications_read(&self) -> StockResult<()> {
        let mut notifications = self.store.load_notifications()?;
        for notification in &mut notifications {
            notification.read = true;
        }
        Ok(self.store.save_notifications(&notifications)?)
    }

    /// Delete a notification. This is the only way an alert clears; the next
    /// refresh regenerates it if its condition still holds.
    pub fn delete_notification(&self, id: NotificationId) -> StockResult<()> {
        let mut notifications = self.store.load_notifications()?;
        let before = notifications.len();
        notifications.retain(|n| n.id != id);
        if notifications.len() == before {
            return Err(StockError::NotificationNotFound);
        }
        Ok(self.store.save_notifications(&notifications)?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // User management (all gated on ManageUsers)
    // ─────────────────────────────────────────────────────────────────────

    pub fn list_users(&self, actor: &UserAccount) -> StockResult<Vec<UserAccount>> {
        require(actor.role, Capability::ManageUsers)?;
        Ok(self.store.load_users()?)
    }

    pub fn create_user(&self, actor: &UserAccount, new: NewUser) -> StockResult<UserAccount> {
        require(actor.role, Capability::ManageUsers)?;

        let mut users = self.store.load_users()?;
        if users.iter().any(|u| u.username == new.username.trim()) {
            return Err(StockError::validation("username already taken"));
        }
        let user = UserAccount::create(UserId::new(), new, Utc::now())?;
        users.push(user.clone());
        self.store.save_users(&users)?;

        tracing::info!(user = %user.username, role = %user.role, "user created");
        Ok(user)
    }

    pub fn update_user(
        &self,
        actor: &UserAccount,
        id: UserId,
        patch: &UserPatch,
    ) -> StockResult<UserAccount> {
        require(actor.role, Capability::ManageUsers)?;

        let mut users = self.store.load_users()?;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StockError::UserNotFound)?;
        patch.apply_to(user)?;
        let updated = user.clone();
        self.store.save_users(&users)?;
        Ok(updated)
    }

    pub fn delete_user(&self, actor: &UserAccount, id: UserId) -> StockResult<()> {
        require(actor.role, Capability::ManageUsers)?;

        let mut users = self.store.load_users()?;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(StockError::UserNotFound);
        }
        Ok(self.store.save_users(&users)?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────────────────

    /// Read-only rollup for the dashboard. Callers wanting fresh low/old
    /// counts in the notification badge should run
    /// [`refresh_notifications`](Self::refresh_notifications) first.
    pub fn dashboard(&self, now: DateTime<Utc>) -> StockResult<DashboardSummary> {
        let components = self.store.load_components()?;
        let transactions = self.store.load_transactions()?;
        let notifications = self.store.load_notifications()?;
        Ok(dashboard(&components, &transactions, &notifications, now))
    }
}
