//! End-to-end flows through the service façade over an in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Days, Utc};
use rust_decimal_macros::dec;

use labstock_alerts::{Notification, NotificationKind};
use labstock_auth::{NewUser, Role, UserAccount, UserPatch};
use labstock_core::{StockError, UserId};
use labstock_inventory::{
    Category, Component, ComponentPatch, MovementDirection, MovementRequest, NewComponent,
    StockTransaction, net_quantity,
};
use labstock_service::InventoryService;
use labstock_store::{EntityStore, MemoryStore, StoreError, StoreResult, seed_if_empty};

fn account(username: &str, role: Role) -> UserAccount {
    UserAccount::create(
        UserId::new(),
        NewUser {
            username: username.to_string(),
            email: format!("{username}@lab.com"),
            role,
            password: "pw".to_string(),
        },
        Utc::now(),
    )
    .unwrap()
}

fn new_component(name: &str, quantity: u32, threshold: u32) -> NewComponent {
    NewComponent {
        name: name.to_string(),
        manufacturer: "Generic".to_string(),
        part_number: name.to_string(),
        description: String::new(),
        quantity,
        location: "Shelf-A1".to_string(),
        unit_price: dec!(1.50),
        datasheet_link: String::new(),
        category: Category::Resistors,
        critical_low_threshold: threshold,
    }
}

fn movement(
    component: &Component,
    direction: MovementDirection,
    quantity: u32,
) -> MovementRequest {
    MovementRequest {
        component_id: component.id,
        direction,
        quantity,
        reason: "test".to_string(),
        project: None,
    }
}

fn service_with_admin() -> (InventoryService<Arc<MemoryStore>>, UserAccount) {
    let store = Arc::new(MemoryStore::new());
    let admin = account("admin", Role::Administrator);
    store.save_users(std::slice::from_ref(&admin)).unwrap();
    (InventoryService::new(store), admin)
}

#[test]
fn movement_then_refresh_raises_one_low_stock_notification() {
    let (service, admin) = service_with_admin();
    let component = service
        .create_component(&admin, new_component("MOSFET (IRF540N)", 100, 10))
        .unwrap();

    let outcome = service
        .apply_movement(&admin, &movement(&component, MovementDirection::Outward, 95))
        .unwrap();
    assert_eq!(outcome.component.quantity, 5);

    let fresh = service.refresh_notifications(Utc::now()).unwrap();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].kind, NotificationKind::LowStock);
    assert_eq!(fresh[0].component_id, component.id);
    assert!(fresh[0].message.contains('5') && fresh[0].message.contains("10"));
}

#[test]
fn outward_exceeding_stock_fails_and_changes_nothing() {
    let (service, admin) = service_with_admin();
    let component = service
        .create_component(&admin, new_component("Zener Diode", 5, 2))
        .unwrap();

    let err = service
        .apply_movement(&admin, &movement(&component, MovementDirection::Outward, 10))
        .unwrap_err();
    assert!(matches!(err, StockError::InsufficientStock { requested: 10, available: 5 }));

    assert_eq!(service.component(component.id).unwrap().quantity, 5);
    assert!(service.transactions_for(&admin).unwrap().is_empty());
}

#[test]
fn refresh_is_idempotent_and_delete_triggers_regeneration() {
    let (service, admin) = service_with_admin();
    service
        .create_component(&admin, new_component("LM358 Op-Amp", 5, 25))
        .unwrap();

    let first = service.refresh_notifications(Utc::now()).unwrap();
    assert_eq!(first.len(), 1);

    let second = service.refresh_notifications(Utc::now()).unwrap();
    assert!(second.is_empty());

    service.delete_notification(first[0].id).unwrap();
    let regenerated = service.refresh_notifications(Utc::now()).unwrap();
    assert_eq!(regenerated.len(), 1);
    assert_eq!(regenerated[0].kind, NotificationKind::LowStock);
    assert_eq!(service.notifications().unwrap().len(), 1);
}

#[test]
fn old_stock_notification_is_not_duplicated_after_movement_resets_the_clock() {
    let (service, admin) = service_with_admin();
    let component = service
        .create_component(&admin, new_component("Hook-up Wire", 50, 5))
        .unwrap();

    // Age the component: created 100 days ago, never moved.
    let mut components = service.store().load_components().unwrap();
    components[0].created_at = Utc::now().checked_sub_days(Days::new(100)).unwrap();
    service.store().save_components(&components).unwrap();

    let fresh = service.refresh_notifications(Utc::now()).unwrap();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].kind, NotificationKind::OldStock);

    // An outward movement stamps last_outward_at with "now"; the predicate is
    // false again, but the stored notification stays and is not duplicated.
    service
        .apply_movement(&admin, &movement(&component, MovementDirection::Outward, 1))
        .unwrap();
    let after = service.refresh_notifications(Utc::now()).unwrap();
    assert!(after.is_empty());

    let stored = service.notifications().unwrap();
    let old_stock: Vec<&Notification> = stored
        .iter()
        .filter(|n| n.kind == NotificationKind::OldStock)
        .collect();
    assert_eq!(old_stock.len(), 1);
}

#[test]
fn mark_read_flows() {
    let (service, admin) = service_with_admin();
    service
        .create_component(&admin, new_component("DHT11", 1, 5))
        .unwrap();

    let fresh = service.refresh_notifications(Utc::now()).unwrap();
    assert_eq!(service.unread_notifications().unwrap(), 1);

    service.mark_notification_read(fresh[0].id).unwrap();
    assert_eq!(service.unread_notifications().unwrap(), 0);

    // Unknown ids are reported, not ignored.
    let err = service.delete_notification(fresh[0].id).and_then(|_| {
        service.mark_notification_read(fresh[0].id)
    });
    assert_eq!(err, Err(StockError::NotificationNotFound));

    service
        .create_component(&admin, new_component("LDR", 1, 5))
        .unwrap();
    service.refresh_notifications(Utc::now()).unwrap();
    service.mark_all_notifications_read().unwrap();
    assert_eq!(service.unread_notifications().unwrap(), 0);
}

#[test]
fn gated_mutations_reject_missing_capabilities_without_state_change() {
    let (service, admin) = service_with_admin();
    let researcher = account("researcher", Role::Researcher);
    let lab_tech = account("lab_tech", Role::LabTechnician);

    // Researcher: no catalog mutations at all.
    let err = service
        .create_component(&researcher, new_component("R1", 10, 2))
        .unwrap_err();
    assert_eq!(err, StockError::Unauthorized);
    assert!(service.components().unwrap().is_empty());

    // Lab technician: may add, may not edit.
    let component = service
        .create_component(&lab_tech, new_component("R1", 10, 2))
        .unwrap();
    let patch = ComponentPatch {
        location: Some("Shelf-B2".to_string()),
        ..ComponentPatch::default()
    };
    assert_eq!(
        service.update_component_metadata(&lab_tech, component.id, &patch),
        Err(StockError::Unauthorized)
    );
    assert_eq!(service.component(component.id).unwrap().location, "Shelf-A1");

    // Admin may edit; quantity is untouched by the metadata path.
    let updated = service
        .update_component_metadata(&admin, component.id, &patch)
        .unwrap();
    assert_eq!(updated.location, "Shelf-B2");
    assert_eq!(updated.quantity, 10);

    // User management is admin-only.
    assert_eq!(
        service.list_users(&lab_tech),
        Err(StockError::Unauthorized)
    );
    let err = service
        .create_user(
            &lab_tech,
            NewUser {
                username: "intruder".to_string(),
                email: "intruder@lab.com".to_string(),
                role: Role::Administrator,
                password: "pw".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err, StockError::Unauthorized);
    assert_eq!(service.list_users(&admin).unwrap().len(), 1);
}

#[test]
fn user_management_crud() {
    let (service, admin) = service_with_admin();

    let created = service
        .create_user(
            &admin,
            NewUser {
                username: "carol".to_string(),
                email: "Carol@Lab.com".to_string(),
                role: Role::StandardUser,
                password: "pw".to_string(),
            },
        )
        .unwrap();
    assert_eq!(created.email, "carol@lab.com");

    // Duplicate usernames would break login resolution.
    let dup = service.create_user(
        &admin,
        NewUser {
            username: "carol".to_string(),
            email: "other@lab.com".to_string(),
            role: Role::StandardUser,
            password: "pw".to_string(),
        },
    );
    assert!(matches!(dup, Err(StockError::Validation(_))));

    let patch = UserPatch {
        role: Some(Role::LabTechnician),
        ..UserPatch::default()
    };
    let updated = service.update_user(&admin, created.id, &patch).unwrap();
    assert_eq!(updated.role, Role::LabTechnician);

    let authed = service.authenticate("carol", "pw").unwrap();
    assert_eq!(authed.role, Role::LabTechnician);
    assert_eq!(
        service.authenticate("carol", "wrong"),
        Err(StockError::AuthenticationFailed)
    );

    service.delete_user(&admin, created.id).unwrap();
    assert_eq!(
        service.delete_user(&admin, created.id),
        Err(StockError::UserNotFound)
    );
}

#[test]
fn transaction_visibility_follows_the_capability() {
    let (service, admin) = service_with_admin();
    let mfg = account("mfg_engineer", Role::ManufacturingEngineer);
    let user = account("user", Role::StandardUser);

    let component = service
        .create_component(&admin, new_component("R1", 100, 2))
        .unwrap();

    service
        .apply_movement(&admin, &movement(&component, MovementDirection::Outward, 5))
        .unwrap();
    service
        .apply_movement(&user, &movement(&component, MovementDirection::Inward, 3))
        .unwrap();

    // ViewAllTransactions sees the full log (mfg engineer made no movements).
    assert_eq!(service.transactions_for(&mfg).unwrap().len(), 2);
    // A standard user sees only their own rows.
    let own = service.transactions_for(&user).unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].user_id, user.id);
}

#[test]
fn quantity_always_equals_initial_plus_net_of_log() {
    let (service, admin) = service_with_admin();
    let component = service
        .create_component(&admin, new_component("R1", 200, 10))
        .unwrap();

    let steps = [
        (MovementDirection::Outward, 50),
        (MovementDirection::Inward, 30),
        (MovementDirection::Outward, 180), // current stock 180, succeeds
        (MovementDirection::Outward, 5),   // insufficient: stock is 0
        (MovementDirection::Inward, 12),
    ];
    for (direction, quantity) in steps {
        let _ = service.apply_movement(&admin, &movement(&component, direction, quantity));
    }

    let log: Vec<StockTransaction> = service.transactions_for(&admin).unwrap();
    let current = service.component(component.id).unwrap();
    assert_eq!(
        i64::from(current.quantity),
        200 + net_quantity(component.id, &log)
    );
    assert_eq!(current.quantity, 12);
}

#[test]
fn seeded_store_authenticates_the_default_accounts() {
    let store = Arc::new(MemoryStore::new());
    seed_if_empty(&store, Utc::now()).unwrap();
    let service = InventoryService::new(store);

    let admin = service.authenticate("admin", "admin123").unwrap();
    assert_eq!(admin.role, Role::Administrator);
    let tech = service.authenticate("lab_tech", "tech123").unwrap();
    assert_eq!(tech.role, Role::LabTechnician);
}

// ─────────────────────────────────────────────────────────────────────────
// Movement atomicity
// ─────────────────────────────────────────────────────────────────────────

/// Store wrapper whose transaction writes can be made to fail, for exercising
/// the movement rollback path.
struct FlakyStore {
    inner: MemoryStore,
    fail_transaction_writes: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_transaction_writes: AtomicBool::new(false),
        }
    }
}

impl EntityStore for FlakyStore {
    fn load_components(&self) -> StoreResult<Vec<Component>> {
        self.inner.load_components()
    }

    fn save_components(&self, components: &[Component]) -> StoreResult<()> {
        self.inner.save_components(components)
    }

    fn load_transactions(&self) -> StoreResult<Vec<StockTransaction>> {
        self.inner.load_transactions()
    }

    fn save_transactions(&self, transactions: &[StockTransaction]) -> StoreResult<()> {
        if self.fail_transaction_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write(
                labstock_store::EntityKind::Transactions,
                "disk full".to_string(),
            ));
        }
        self.inner.save_transactions(transactions)
    }

    fn load_notifications(&self) -> StoreResult<Vec<Notification>> {
        self.inner.load_notifications()
    }

    fn save_notifications(&self, notifications: &[Notification]) -> StoreResult<()> {
        self.inner.save_notifications(notifications)
    }

    fn load_users(&self) -> StoreResult<Vec<UserAccount>> {
        self.inner.load_users()
    }

    fn save_users(&self, users: &[UserAccount]) -> StoreResult<()> {
        self.inner.save_users(users)
    }
}

#[test]
fn failed_transaction_append_rolls_back_the_component_write() {
    let store = Arc::new(FlakyStore::new());
    let admin = account("admin", Role::Administrator);
    store.save_users(std::slice::from_ref(&admin)).unwrap();
    let service = InventoryService::new(store.clone());

    let component = service
        .create_component(&admin, new_component("R1", 100, 10))
        .unwrap();

    store.fail_transaction_writes.store(true, Ordering::SeqCst);
    let err = service
        .apply_movement(&admin, &movement(&component, MovementDirection::Outward, 40))
        .unwrap_err();
    assert!(matches!(err, StockError::PersistenceUnavailable(_)));

    // Neither write is observable: quantity rolled back, log still empty.
    store.fail_transaction_writes.store(false, Ordering::SeqCst);
    assert_eq!(service.component(component.id).unwrap().quantity, 100);
    assert!(service.transactions_for(&admin).unwrap().is_empty());
    assert_eq!(service.component(component.id).unwrap().last_outward_at, None);
}
