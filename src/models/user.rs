//! User account model
//!
//! Accounts are identified by their normalized email address. The password
//! is only ever held as an Argon2 PHC hash and never appears in the profile
//! view handed to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use super::validation::{validate_text_len, ValidationError};

/// A user account
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Normalized (trimmed, lowercase) email, unique across the store
    pub email: String,

    #[serde(default)]
    pub name: String,

    /// Argon2 PHC string
    pub password_hash: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_staff: bool,

    #[serde(default)]
    pub is_superuser: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Create a new active user from an already normalized email and hash
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email: email.into(),
            name: name.into(),
            password_hash: password_hash.into(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Grant staff and superuser flags
    pub fn promote_to_superuser(&mut self) {
        self.is_staff = true;
        self.is_superuser = true;
        self.updated_at = Utc::now();
    }

    /// Read representation: never includes the password hash
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }

    /// Validate the user
    pub fn validate(&self) -> Result<(), ValidationError> {
        if normalize_email(&self.email)? != self.email {
            return Err(ValidationError::InvalidEmail);
        }
        validate_text_len("name", &self.name)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"[REDACTED]")
            .field("is_active", &self.is_active)
            .field("is_staff", &self.is_staff)
            .field("is_superuser", &self.is_superuser)
            .finish()
    }
}

/// The public view of a user ("me")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
}

/// Trim and lowercase an email address, rejecting blank or malformed input
pub fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyField { field: "email" });
    }
    validate_text_len("email", email)?;

    let (local, domain) = email.split_once('@').ok_or(ValidationError::InvalidEmail)?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
    {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(email.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_lowercases() {
        assert_eq!(
            normalize_email("Test@Example.COM").unwrap(),
            "test@example.com"
        );
        assert_eq!(
            normalize_email("  test1@ASDSS.com ").unwrap(),
            "test1@asdss.com"
        );
    }

    #[test]
    fn test_normalize_email_rejects_blank() {
        assert_eq!(
            normalize_email("  "),
            Err(ValidationError::EmptyField { field: "email" })
        );
    }

    #[test]
    fn test_normalize_email_rejects_malformed() {
        for bad in ["no-at-sign", "@example.com", "user@", "a@b@c", "a b@c.com"] {
            assert_eq!(normalize_email(bad), Err(ValidationError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn test_profile_has_no_password() {
        let user = User::new("test@test.com", "rodolfo", "$argon2id$v=19$secret");
        let json = serde_json::to_string(&user.profile()).unwrap();
        assert!(!json.contains("argon2"));
        assert_eq!(
            user.profile(),
            UserProfile {
                email: "test@test.com".into(),
                name: "rodolfo".into()
            }
        );
    }

    #[test]
    fn test_debug_redacts_hash() {
        let user = User::new("test@test.com", "", "$argon2id$v=19$secret");
        assert!(!format!("{:?}", user).contains("secret"));
    }

    #[test]
    fn test_promote_to_superuser() {
        let mut user = User::new("admin@test.com", "", "hash");
        assert!(!user.is_staff && !user.is_superuser);
        user.promote_to_superuser();
        assert!(user.is_staff && user.is_superuser);
    }

    #[test]
    fn test_display_is_email() {
        let user = User::new("test@test.com", "", "hash");
        assert_eq!(user.to_string(), "test@test.com");
    }
}
