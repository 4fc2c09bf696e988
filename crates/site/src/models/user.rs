//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use driftwood_core::{Email, Role, UserId};

/// A site user (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Name shown in the admin panel and as post author.
    pub display_name: String,
    /// Access role.
    pub role: Role,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The authenticated identity carried in the session.
///
/// Re-derived from the signed session cookie on every request; nothing is
/// held in process memory between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl CurrentUser {
    /// Build the session identity from a full user record.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_owned(),
            display_name: user.display_name.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_from_user() {
        let user = User {
            id: UserId::new(1),
            email: Email::parse("admin@example.com").unwrap(),
            display_name: "Admin".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let current = CurrentUser::from_user(&user);
        assert_eq!(current.id, user.id);
        assert_eq!(current.email, "admin@example.com");
        assert!(current.role.is_admin());
    }
}
