//! The authenticated principal threaded through every ledger operation

use super::ids::UserId;
use super::user::User;

/// An authenticated user, resolved from a session token or credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub is_staff: bool,
}

impl Identity {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            is_staff: user.is_staff,
        }
    }

    /// Whether this identity owns the given record
    pub fn owns<T: Owned + ?Sized>(&self, record: &T) -> bool {
        record.owner() == self.user_id
    }
}

/// A record that belongs to exactly one user
pub trait Owned {
    fn owner(&self) -> UserId;
}
