use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labstock_core::{Entity, StockError, StockResult, UserId};

use crate::role::Role;

/// A registered user account.
///
/// Role changes go through an explicit edit by a user-management actor; the
/// stored secret is compared by plain equality at login (no retry/lockout
/// policy at this layer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for UserAccount {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl UserAccount {
    /// Create an account from validated input.
    pub fn create(id: UserId, new: NewUser, created_at: DateTime<Utc>) -> StockResult<Self> {
        if new.username.trim().is_empty() {
            return Err(StockError::validation("username cannot be empty"));
        }
        // Validate email format (basic check)
        if new.email.trim().is_empty() || !new.email.contains('@') {
            return Err(StockError::validation("invalid email format"));
        }
        if new.password.is_empty() {
            return Err(StockError::validation("password cannot be empty"));
        }

        Ok(Self {
            id,
            username: new.username.trim().to_string(),
            email: new.email.trim().to_lowercase(),
            role: new.role,
            password: new.password,
            created_at,
        })
    }
}

/// Input for creating an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

/// Partial update of an account, applied by a user-management actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub password: Option<String>,
}

impl UserPatch {
    pub fn apply_to(&self, account: &mut UserAccount) -> StockResult<()> {
        if let Some(username) = &self.username {
            if username.trim().is_empty() {
                return Err(StockError::validation("username cannot be empty"));
            }
            account.username = username.trim().to_string();
        }
        if let Some(email) = &self.email {
            if email.trim().is_empty() || !email.contains('@') {
                return Err(StockError::validation("invalid email format"));
            }
            account.email = email.trim().to_lowercase();
        }
        if let Some(role) = self.role {
            account.role = role;
        }
        if let Some(password) = &self.password {
            if password.is_empty() {
                return Err(StockError::validation("password cannot be empty"));
            }
            account.password = password.clone();
        }
        Ok(())
    }
}

/// Match a submitted username/secret pair against the stored accounts.
pub fn authenticate<'a>(
    users: &'a [UserAccount],
    username: &str,
    secret: &str,
) -> StockResult<&'a UserAccount> {
    users
        .iter()
        .find(|u| u.username == username && u.password == secret)
        .ok_or(StockError::AuthenticationFailed)
}
