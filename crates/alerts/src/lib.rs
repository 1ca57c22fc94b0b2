//! Derived alerting state over the inventory snapshot.
//!
//! Low-stock and old-stock conditions are recomputed from the component
//! snapshot on demand; stored notifications are only ever appended to here,
//! never rewritten or cleared (dismissal is a user action).

pub mod engine;
pub mod notification;

pub use engine::{STALE_AFTER_MONTHS, is_low_stock, is_old_stock, scan};
pub use notification::{Notification, NotificationKind, unread_count};
