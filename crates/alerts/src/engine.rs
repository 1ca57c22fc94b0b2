//! Alert derivation: predicates plus the de-duplicating scan.

use std::collections::HashSet;

use chrono::{DateTime, Months, Utc};

use labstock_core::{ComponentId, NotificationId};
use labstock_inventory::Component;

use crate::notification::{Notification, NotificationKind};

/// Staleness window: a component untouched for this many months is old stock.
pub const STALE_AFTER_MONTHS: u32 = 3;

/// Low stock: at or below the component's critical-low threshold.
pub fn is_low_stock(component: &Component) -> bool {
    component.quantity <= component.critical_low_threshold
}

/// Old stock: the most recent outward movement (or creation, if the component
/// never moved) is older than the staleness window.
pub fn is_old_stock(component: &Component, now: DateTime<Utc>) -> bool {
    let last_activity = component.last_outward_at.unwrap_or(component.created_at);
    match now.checked_sub_months(Months::new(STALE_AFTER_MONTHS)) {
        Some(cutoff) => last_activity < cutoff,
        None => false,
    }
}

/// Scan a component snapshot against the stored notifications and synthesize
/// the missing alerts.
///
/// For each component and each predicate that holds, a notification is
/// produced only if no stored notification with the same
/// `(kind, component_id)` pair exists. Stored notifications are never
/// rewritten or cleared, even when the condition no longer holds; deleting an
/// alert is a user action, after which the next scan regenerates it if the
/// condition persists.
pub fn scan(
    components: &[Component],
    existing: &[Notification],
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let stored: HashSet<(NotificationKind, ComponentId)> = existing
        .iter()
        .map(|n| (n.kind, n.component_id))
        .collect();

    let mut fresh = Vec::new();

    for component in components {
        if is_low_stock(component)
            && !stored.contains(&(NotificationKind::LowStock, component.id))
        {
            fresh.push(Notification {
                id: NotificationId::new(),
                kind: NotificationKind::LowStock,
                component_id: component.id,
                component_name: component.name.clone(),
                message: format!(
                    "{} is running low ({} units remaining, threshold: {})",
                    component.name, component.quantity, component.critical_low_threshold
                ),
                created_at: now,
                read: false,
            });
        }

        if is_old_stock(component, now)
            && !stored.contains(&(NotificationKind::OldStock, component.id))
        {
            fresh.push(Notification {
                id: NotificationId::new(),
                kind: NotificationKind::OldStock,
                component_id: component.id,
                component_name: component.name.clone(),
                message: format!(
                    "{} has been in inventory for over {} months without movement",
                    component.name, STALE_AFTER_MONTHS
                ),
                created_at: now,
                read: false,
            });
        }
    }

    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use labstock_inventory::{Category, NewComponent};
    use rust_decimal_macros::dec;

    fn component(quantity: u32, threshold: u32, age_days: u64) -> Component {
        let created_at = Utc::now()
            .checked_sub_days(Days::new(age_days))
            .expect("valid date");
        Component::create(
            ComponentId::new(),
            NewComponent {
                name: "ESP32-WROOM-32U".to_string(),
                manufacturer: "Espressif".to_string(),
                part_number: "ESP32-WROOM-32U".to_string(),
                description: "Wi-Fi & Bluetooth Module".to_string(),
                quantity,
                location: "IC-Box-F4".to_string(),
                unit_price: dec!(200.00),
                datasheet_link: String::new(),
                category: Category::IntegratedCircuits,
                critical_low_threshold: threshold,
            },
            created_at,
        )
        .expect("valid component")
    }

    #[test]
    fn low_stock_notification_mentions_quantity_and_threshold() {
        let c = component(5, 10, 1);
        let fresh = scan(&[c.clone()], &[], Utc::now());

        assert_eq!(fresh.len(), 1);
        let n = &fresh[0];
        assert_eq!(n.kind, NotificationKind::LowStock);
        assert_eq!(n.component_id, c.id);
        assert!(!n.read);
        assert!(n.message.contains('5') && n.message.contains("10"));
    }

    #[test]
    fn scan_is_idempotent_under_unchanged_state() {
        let c = component(5, 10, 1);
        let now = Utc::now();

        let first = scan(&[c.clone()], &[], now);
        assert_eq!(first.len(), 1);

        let second = scan(&[c], &first, now);
        assert!(second.is_empty());
    }

    #[test]
    fn deleting_a_notification_lets_the_scan_regenerate_exactly_one() {
        let c = component(5, 10, 1);
        let now = Utc::now();

        let mut stored = scan(&[c.clone()], &[], now);
        assert_eq!(stored.len(), 1);

        // User deletes the alert; the condition still holds.
        stored.clear();
        let regenerated = scan(&[c], &stored, now);
        assert_eq!(regenerated.len(), 1);
        assert_eq!(regenerated[0].kind, NotificationKind::LowStock);
    }

    #[test]
    fn component_created_100_days_ago_without_movement_is_old_stock() {
        let c = component(50, 10, 100);
        assert!(is_old_stock(&c, Utc::now()));

        let fresh = scan(&[c], &[], Utc::now());
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].kind, NotificationKind::OldStock);
    }

    #[test]
    fn recent_outward_movement_resets_the_staleness_clock() {
        let mut c = component(50, 10, 100);
        c.last_outward_at = Some(Utc::now());
        assert!(!is_old_stock(&c, Utc::now()));
    }

    #[test]
    fn existing_old_stock_notification_is_kept_even_after_condition_clears() {
        let c = component(50, 10, 100);
        let now = Utc::now();

        let stored = scan(&[c.clone()], &[], now);
        assert_eq!(stored.len(), 1);

        // A fresh outward movement makes the predicate false, but the stored
        // notification stays and no duplicate appears.
        let mut moved = c;
        moved.last_outward_at = Some(now);
        let after = scan(&[moved], &stored, now);
        assert!(after.is_empty());
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn one_component_can_raise_both_kinds_at_once() {
        let c = component(5, 10, 120);
        let fresh = scan(&[c], &[], Utc::now());

        assert_eq!(fresh.len(), 2);
        let kinds: Vec<_> = fresh.iter().map(|n| n.kind).collect();
        assert!(kinds.contains(&NotificationKind::LowStock));
        assert!(kinds.contains(&NotificationKind::OldStock));
    }

    #[test]
    fn boundary_quantity_equal_to_threshold_is_low_stock() {
        let c = component(10, 10, 1);
        assert!(is_low_stock(&c));

        let c = component(11, 10, 1);
        assert!(!is_low_stock(&c));
    }
}
