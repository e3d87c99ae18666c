//! Service layer for fintrack
//!
//! Business logic on top of the storage layer. Every ledger operation takes
//! the caller's [`Identity`](crate::models::Identity) explicitly, validates
//! its input, resolves records through the owner scope and writes under the
//! store's write guard.

pub mod annual_budget;
pub mod expense;
pub mod expenses_tag;
pub mod income;
pub mod month_budget;
pub mod scope;
pub mod user;

pub use annual_budget::AnnualBudgetService;
pub use expense::{ExpenseService, NewExpense};
pub use expenses_tag::ExpensesTagService;
pub use income::IncomeService;
pub use month_budget::MonthBudgetService;
pub use user::{UserPatch, UserService};

#[cfg(test)]
pub(crate) mod testing {
    use tempfile::TempDir;

    use crate::config::paths::FintrackPaths;
    use crate::models::{Identity, User};
    use crate::storage::Storage;

    pub fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    /// Insert a user directly (skipping password hashing) and return its identity
    pub fn register(storage: &Storage, email: &str) -> Identity {
        let user = User::new(email, "", "unused-hash");
        storage.users.insert(user.clone()).unwrap();
        storage.users.save().unwrap();
        Identity::from_user(&user)
    }
}
