//! User service
//!
//! Account creation, credential checks, session tokens and the "me"
//! profile. Emails are normalized before every lookup and write; passwords
//! are hashed with Argon2 and never leave this module in plain form.

use crate::audit::EntityType;
use crate::crypto::{generate_token, hash_password, validate_password, verify_password, SecureString};
use crate::error::{LedgerError, LedgerResult};
use crate::models::validation::validate_text_len;
use crate::models::{normalize_email, AuthToken, Identity, User, UserProfile};
use crate::storage::Storage;

/// Changes accepted by [`UserService::update_profile`]
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecureString>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// Service for user accounts and sessions
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a regular account
    pub fn create_user(&self, email: &str, password: &str, name: &str) -> LedgerResult<User> {
        self.create(email, password, name, false)
    }

    /// Register an account with staff and superuser flags set
    pub fn create_superuser(&self, email: &str, password: &str) -> LedgerResult<User> {
        self.create(email, password, "", true)
    }

    fn create(&self, email: &str, password: &str, name: &str, superuser: bool) -> LedgerResult<User> {
        let email = normalize_email(email)?;
        validate_password(password, self.storage.settings().min_password_length)?;
        let name = name.trim();
        validate_text_len("name", name)?;

        let _guard = self.storage.write_guard()?;

        if self.storage.users.get_by_email(&email)?.is_some() {
            return Err(LedgerError::Conflict {
                entity_type: "User",
                identifier: email,
            });
        }

        let mut user = User::new(email, name, hash_password(password)?);
        if superuser {
            user.promote_to_superuser();
        }
        user.validate()?;

        self.storage.users.insert(user.clone())?;
        self.storage.users.save()?;

        self.storage.log_create(
            user.id,
            EntityType::User,
            user.id.to_string(),
            Some(user.email.clone()),
            &user.profile(),
        )?;

        Ok(user)
    }

    /// Check credentials against an active account
    ///
    /// Every failure produces the same error so callers cannot tell an
    /// unknown email from a wrong password.
    pub fn authenticate(&self, email: &str, password: &str) -> LedgerResult<User> {
        if password.is_empty() {
            return Err(LedgerError::bad_credentials());
        }
        let email = normalize_email(email).map_err(|_| LedgerError::bad_credentials())?;

        let user = self
            .storage
            .users
            .get_by_email(&email)?
            .filter(|u| u.is_active)
            .ok_or_else(LedgerError::bad_credentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(LedgerError::bad_credentials());
        }

        Ok(user)
    }

    /// Authenticate and return the user's session token, creating it on
    /// first use
    pub fn issue_token(&self, email: &str, password: &str) -> LedgerResult<AuthToken> {
        let user = self.authenticate(email, password)?;

        let _guard = self.storage.write_guard()?;

        if let Some(existing) = self.storage.tokens.get_for_user(user.id)? {
            return Ok(existing);
        }

        let token = AuthToken::new(generate_token(), user.id);
        self.storage.tokens.insert(token.clone())?;
        self.storage.tokens.save()?;

        Ok(token)
    }

    /// Turn a presented token into the identity it belongs to
    pub fn resolve_token(&self, token: &str) -> LedgerResult<Identity> {
        let token = token.trim();
        if token.is_empty() {
            return Err(LedgerError::Unauthenticated);
        }

        let auth = self
            .storage
            .tokens
            .get(token)?
            .ok_or(LedgerError::Unauthenticated)?;

        self.storage
            .users
            .get(auth.user_id)?
            .filter(|u| u.is_active)
            .map(|u| Identity::from_user(&u))
            .ok_or(LedgerError::Unauthenticated)
    }

    /// Log out: drop the identity's token
    pub fn revoke_token(&self, identity: &Identity) -> LedgerResult<bool> {
        let _guard = self.storage.write_guard()?;
        let removed = self.storage.tokens.remove_for_user(identity.user_id)?;
        if removed {
            self.storage.tokens.save()?;
        }
        Ok(removed)
    }

    fn current_user(&self, identity: &Identity) -> LedgerResult<User> {
        self.storage
            .users
            .get(identity.user_id)?
            .ok_or(LedgerError::Unauthenticated)
    }

    pub fn profile(&self, identity: &Identity) -> LedgerResult<UserProfile> {
        Ok(self.current_user(identity)?.profile())
    }

    /// Patch the caller's own name, email or password
    pub fn update_profile(&self, identity: &Identity, patch: UserPatch) -> LedgerResult<UserProfile> {
        let email = patch.email.as_deref().map(normalize_email).transpose()?;
        let name = patch.name.as_deref().map(str::trim);
        if let Some(name) = name {
            validate_text_len("name", name)?;
        }
        if let Some(password) = &patch.password {
            validate_password(password, self.storage.settings().min_password_length)?;
        }

        let _guard = self.storage.write_guard()?;

        let before = self.current_user(identity)?;
        let mut user = before.clone();

        if let Some(email) = email {
            if email != user.email && self.storage.users.get_by_email(&email)?.is_some() {
                return Err(LedgerError::Conflict {
                    entity_type: "User",
                    identifier: email,
                });
            }
            user.email = email;
        }
        if let Some(name) = name {
            user.name = name.to_string();
        }
        if let Some(password) = &patch.password {
            user.password_hash = hash_password(password)?;
        }
        user.updated_at = chrono::Utc::now();
        user.validate()?;

        self.storage.users.update(user.clone())?;
        self.storage.users.save()?;

        self.storage.log_update(
            user.id,
            EntityType::User,
            user.id.to_string(),
            Some(user.email.clone()),
            &before.profile(),
            &user.profile(),
        )?;

        Ok(user.profile())
    }

    /// Staff-only listing, optionally filtered by a case-insensitive search
    /// over email and name
    pub fn list_users(&self, identity: &Identity, search: Option<&str>) -> LedgerResult<Vec<User>> {
        let caller = self.current_user(identity)?;
        if !caller.is_staff {
            return Err(LedgerError::PermissionDenied(
                "listing users requires staff status".into(),
            ));
        }

        let users = self.storage.users.get_all()?;
        let search = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());

        Ok(match search {
            Some(term) => users
                .into_iter()
                .filter(|u| u.email.contains(&term) || u.name.to_lowercase().contains(&term))
                .collect(),
            None => users,
        })
    }

    /// Delete the caller's own account
    ///
    /// Rejected with `Protected` while the account still owns ledger records.
    pub fn delete_user(&self, identity: &Identity) -> LedgerResult<()> {
        let _guard = self.storage.write_guard()?;

        let user = self.current_user(identity)?;
        self.storage.delete_user(&user)?;

        self.storage.log_delete(
            user.id,
            EntityType::User,
            user.id.to_string(),
            Some(user.email.clone()),
            &user.profile(),
        )?;

        Ok(())
    }
}
