//! Storage initialization
//!
//! First-run setup: directories, the settings file and empty tables.

use crate::config::paths::FintrackPaths;
use crate::config::settings::Settings;
use crate::error::LedgerResult;

use super::Storage;

/// Initialize storage for a fresh installation
///
/// Existing settings and tables are left untouched, so running it twice is
/// harmless.
pub fn initialize_storage(paths: &FintrackPaths) -> LedgerResult<()> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    // Loading a missing table yields an empty one; saving writes it out
    let storage = Storage::open(paths.clone())?;
    storage.save_all()
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FintrackPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.users_file().exists());
        assert!(paths.expenses_file().exists());
        assert!(paths.incomes_file().exists());
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let storage = Storage::open(paths.clone()).unwrap();
        storage
            .users
            .insert(User::new("keep@example.com", "", "hash"))
            .unwrap();
        storage.users.save().unwrap();

        initialize_storage(&paths).unwrap();

        let reopened = Storage::open(paths).unwrap();
        assert!(reopened
            .users
            .get_by_email("keep@example.com")
            .unwrap()
            .is_some());
    }
}
