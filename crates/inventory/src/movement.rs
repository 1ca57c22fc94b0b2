//! The stock ledger: movements in and out of the catalog.
//!
//! A component's `quantity` is never written directly; every change flows
//! through [`apply_movement`], which yields the updated component together
//! with the immutable transaction record that justifies it. Persisting both
//! (or neither) is the caller's responsibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labstock_core::{ComponentId, StockError, StockResult, TransactionId, UserId};

use crate::component::Component;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    Inward,
    Outward,
}

impl core::fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MovementDirection::Inward => f.write_str("inward"),
            MovementDirection::Outward => f.write_str("outward"),
        }
    }
}

/// Immutable ledger record of a single stock movement.
///
/// Once appended, a transaction is never edited or deleted. The transaction
/// log is the authoritative audit trail: a component's quantity is the net
/// sum of its transactions since creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    pub id: TransactionId,
    pub component_id: ComponentId,
    pub direction: MovementDirection,
    pub quantity: u32,
    pub user_id: UserId,
    /// Denormalized display name of the acting user at movement time.
    pub user_name: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// A requested movement against one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRequest {
    pub component_id: ComponentId,
    pub direction: MovementDirection,
    pub quantity: u32,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// Result of a successful movement: the component as it must be persisted,
/// plus the transaction that must be appended with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementOutcome {
    pub component: Component,
    pub transaction: StockTransaction,
}

/// Apply a movement to a component snapshot.
///
/// Pure decision logic: no IO, no side effects. On success the returned
/// component carries the new quantity (and, for outward movements,
/// `last_outward_at` stamped with `occurred_at`), and the returned
/// transaction carries the same timestamp.
///
/// # Errors
/// - [`StockError::ComponentNotFound`] if the request names a different
///   component than the snapshot.
/// - [`StockError::InvalidQuantity`] for a zero quantity (or inward overflow).
/// - [`StockError::MissingReason`] for a blank reason.
/// - [`StockError::InsufficientStock`] if an outward movement exceeds the
///   available quantity; the snapshot is left untouched.
pub fn apply_movement(
    component: &Component,
    request: &MovementRequest,
    transaction_id: TransactionId,
    user_id: UserId,
    user_name: &str,
    occurred_at: DateTime<Utc>,
) -> StockResult<MovementOutcome> {
    if request.component_id != component.id {
        return Err(StockError::ComponentNotFound);
    }
    if request.quantity == 0 {
        return Err(StockError::InvalidQuantity(request.quantity));
    }
    if request.reason.trim().is_empty() {
        return Err(StockError::MissingReason);
    }

    let new_quantity = match request.direction {
        MovementDirection::Inward => component
            .quantity
            .checked_add(request.quantity)
            .ok_or(StockError::InvalidQuantity(request.quantity))?,
        MovementDirection::Outward => {
            if request.quantity > component.quantity {
                return Err(StockError::InsufficientStock {
                    requested: request.quantity,
                    available: component.quantity,
                });
            }
            component.quantity - request.quantity
        }
    };

    let mut updated = component.clone();
    updated.quantity = new_quantity;
    if request.direction == MovementDirection::Outward {
        updated.last_outward_at = Some(occurred_at);
    }

    let transaction = StockTransaction {
        id: transaction_id,
        component_id: component.id,
        direction: request.direction,
        quantity: request.quantity,
        user_id,
        user_name: user_name.to_string(),
        reason: request.reason.trim().to_string(),
        project: request.project.clone(),
        occurred_at,
    };

    Ok(MovementOutcome {
        component: updated,
        transaction,
    })
}

/// Net effect of a transaction slice on one component's quantity
/// (Σ inward − Σ outward).
///
/// For any history of successful movements, `initial + net_quantity(..)`
/// reproduces the component's current quantity.
pub fn net_quantity(component_id: ComponentId, transactions: &[StockTransaction]) -> i64 {
    transactions
        .iter()
        .filter(|t| t.component_id == component_id)
        .map(|t| match t.direction {
            MovementDirection::Inward => i64::from(t.quantity),
            MovementDirection::Outward => -i64::from(t.quantity),
        })
        .sum()
}
