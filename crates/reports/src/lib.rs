//! Read-only dashboard projections over the entity collections.
//!
//! Pure functions over a snapshot: nothing here mutates stored state, and the
//! low/old-stock sets are recomputed independently of the notification
//! collection.

pub mod dashboard;

pub use dashboard::{
    CategoryTotal, DashboardSummary, MonthlyMovement, category_totals, dashboard, low_stock,
    monthly_movement, old_stock, total_value,
};
