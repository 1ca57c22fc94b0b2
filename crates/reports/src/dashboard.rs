use chrono::{DateTime, Datelike, Months, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use labstock_alerts::{Notification, is_low_stock, is_old_stock, unread_count};
use labstock_inventory::{Category, Component, MovementDirection, StockTransaction};

/// Number of calendar-month buckets on the movement chart (current month
/// included).
const MOVEMENT_MONTHS: u32 = 6;

/// One calendar-month bucket of ledger movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyMovement {
    /// Display label, e.g. "Mar 2026".
    pub month: String,
    pub inward: u64,
    pub outward: u64,
}

/// Rolling inward/outward totals for the last six calendar months,
/// oldest first.
pub fn monthly_movement(
    transactions: &[StockTransaction],
    now: DateTime<Utc>,
) -> Vec<MonthlyMovement> {
    let mut buckets = Vec::with_capacity(MOVEMENT_MONTHS as usize);

    for offset in (0..MOVEMENT_MONTHS).rev() {
        let Some(month_start) = now.checked_sub_months(Months::new(offset)) else {
            continue;
        };
        let (year, month) = (month_start.year(), month_start.month());

        let mut inward: u64 = 0;
        let mut outward: u64 = 0;
        for t in transactions {
            if t.occurred_at.year() == year && t.occurred_at.month() == month {
                match t.direction {
                    MovementDirection::Inward => inward += u64::from(t.quantity),
                    MovementDirection::Outward => outward += u64::from(t.quantity),
                }
            }
        }

        buckets.push(MonthlyMovement {
            month: month_start.format("%b %Y").to_string(),
            inward,
            outward,
        });
    }

    buckets
}

/// Components at or below their critical-low threshold.
pub fn low_stock<'a>(components: &'a [Component]) -> Vec<&'a Component> {
    components.iter().filter(|c| is_low_stock(c)).collect()
}

/// Components with no outward movement inside the staleness window.
pub fn old_stock<'a>(components: &'a [Component], now: DateTime<Utc>) -> Vec<&'a Component> {
    components.iter().filter(|c| is_old_stock(c, now)).collect()
}

/// Quantity rolled up per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub quantity: u64,
}

/// Per-category quantity totals, in catalog category order, for categories
/// that appear in the snapshot.
pub fn category_totals(components: &[Component]) -> Vec<CategoryTotal> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let mut present = false;
            let mut quantity: u64 = 0;
            for c in components.iter().filter(|c| c.category == category) {
                present = true;
                quantity += u64::from(c.quantity);
            }
            present.then_some(CategoryTotal { category, quantity })
        })
        .collect()
}

/// Total inventory value: Σ quantity × unit price.
pub fn total_value(components: &[Component]) -> Decimal {
    components
        .iter()
        .map(|c| Decimal::from(c.quantity) * c.unit_price)
        .sum()
}

/// Everything the dashboard renders, computed in one pass over a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub monthly_movement: Vec<MonthlyMovement>,
    pub low_stock: Vec<Component>,
    pub old_stock: Vec<Component>,
    pub category_totals: Vec<CategoryTotal>,
    pub total_components: usize,
    pub total_value: Decimal,
    pub unread_notifications: usize,
}

pub fn dashboard(
    components: &[Component],
    transactions: &[StockTransaction],
    notifications: &[Notification],
    now: DateTime<Utc>,
) -> DashboardSummary {
    DashboardSummary {
        monthly_movement: monthly_movement(transactions, now),
        low_stock: low_stock(components).into_iter().cloned().collect(),
        old_stock: old_stock(components, now).into_iter().cloned().collect(),
        category_totals: category_totals(components),
        total_components: components.len(),
        total_value: total_value(components),
        unread_notifications: unread_count(notifications),
    }
}
