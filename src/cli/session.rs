//! Session handling: `login`, `logout` and token resolution

use serde::{Deserialize, Serialize};

use crate::config::paths::FintrackPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Identity;
use crate::services::UserService;
use crate::storage::{read_json, write_json_atomic, Storage};

use super::args::password_or_prompt;

/// Contents of `session.json`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: String,
}

impl Session {
    pub fn load(paths: &FintrackPaths) -> LedgerResult<Option<Self>> {
        let session: Session = read_json(paths.session_file())?;
        Ok(Some(session).filter(|s| !s.token.is_empty()))
    }

    pub fn save(&self, paths: &FintrackPaths) -> LedgerResult<()> {
        write_json_atomic(paths.session_file(), self)
    }

    pub fn clear(paths: &FintrackPaths) -> LedgerResult<()> {
        let path = paths.session_file();
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| LedgerError::Io(format!("Failed to remove session file: {}", e)))?;
        }
        Ok(())
    }
}

/// Resolve the caller from an explicit token (`--token` / `FINTRACK_TOKEN`)
/// or the saved session
pub fn resolve_identity(storage: &Storage, token: Option<&str>) -> LedgerResult<Identity> {
    let service = UserService::new(storage);

    if let Some(token) = token {
        return service.resolve_token(token);
    }

    match Session::load(storage.paths())? {
        Some(session) => service.resolve_token(&session.token),
        None => Err(LedgerError::Unauthenticated),
    }
}

pub fn handle_login(storage: &Storage, email: &str, password: Option<String>) -> LedgerResult<()> {
    let password = password_or_prompt(password, "Password: ")?;
    let service = UserService::new(storage);
    let token = service.issue_token(email, &password)?;
    let identity = service.resolve_token(&token.key)?;

    Session {
        email: identity.email.clone(),
        token: token.key,
    }
    .save(storage.paths())?;

    println!("Logged in as {}", identity.email);
    Ok(())
}

/// Revoke the caller's token and forget the saved session
pub fn handle_logout(storage: &Storage, token: Option<&str>) -> LedgerResult<()> {
    match resolve_identity(storage, token) {
        Ok(identity) => {
            UserService::new(storage).revoke_token(&identity)?;
            println!("Logged out {}", identity.email);
        }
        Err(LedgerError::Unauthenticated) => println!("No active session."),
        Err(e) => return Err(e),
    }

    Session::clear(storage.paths())
}
