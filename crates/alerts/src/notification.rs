use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labstock_core::{ComponentId, Entity, NotificationId};

/// Kind of derived inventory alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    LowStock,
    OldStock,
}

impl core::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NotificationKind::LowStock => f.write_str("low_stock"),
            NotificationKind::OldStock => f.write_str("old_stock"),
        }
    }
}

/// A derived alert persisted for the user to review.
///
/// # Invariants
/// - At most one stored notification exists per `(kind, component_id)` pair;
///   the scan never appends a duplicate while one is stored.
/// - The engine never deletes a notification, even after the underlying
///   condition clears; dismissal is a user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub component_id: ComponentId,
    /// Denormalized component name at scan time.
    pub component_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl Entity for Notification {
    type Id = NotificationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Number of notifications not yet marked read.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}
