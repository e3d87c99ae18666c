//! User account CLI commands

use clap::Subcommand;

use crate::display::{format_audit_entries, format_profile, format_user_list};
use crate::error::LedgerResult;
use crate::models::Identity;
use crate::services::{UserPatch, UserService};
use crate::storage::Storage;

use super::args::password_or_prompt;
use super::session::resolve_identity;

/// User accounts and tokens
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    Create {
        /// Email address (used to log in)
        email: String,
        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Register a staff superuser
    Superuser {
        email: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Print the session token for a user, creating it on first use
    Token {
        email: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List all users (staff only)
    List {
        /// Case-insensitive match on email or name
        #[arg(short, long)]
        search: Option<String>,
    },
}

/// The caller's own account
#[derive(Subcommand)]
pub enum MeCommands {
    /// Show the profile
    Show,
    /// Change name, email or password
    Update {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        change_password: bool,
    },
    /// Delete the account (only once it owns no records)
    Delete,
}

/// Handle a user command; only `list` needs a session
pub fn handle_user_command(
    storage: &Storage,
    token: Option<&str>,
    cmd: UserCommands,
) -> LedgerResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Create {
            email,
            name,
            password,
        } => {
            let password = password_or_prompt(password, "Password: ")?;
            let user = service.create_user(&email, &password, &name)?;
            println!("Created user: {}", user.email);
        }
        UserCommands::Superuser { email, password } => {
            let password = password_or_prompt(password, "Password: ")?;
            let user = service.create_superuser(&email, &password)?;
            println!("Created superuser: {}", user.email);
        }
        UserCommands::Token { email, password } => {
            let password = password_or_prompt(password, "Password: ")?;
            let token = service.issue_token(&email, &password)?;
            println!("{}", token.key);
        }
        UserCommands::List { search } => {
            let identity = resolve_identity(storage, token)?;
            let users = service.list_users(&identity, search.as_deref())?;
            println!("{}", format_user_list(&users));
        }
    }

    Ok(())
}

pub fn handle_me_command(storage: &Storage, identity: &Identity, cmd: MeCommands) -> LedgerResult<()> {
    let service = UserService::new(storage);

    match cmd {
        MeCommands::Show => {
            print!("{}", format_profile(&service.profile(identity)?));
        }
        MeCommands::Update {
            name,
            email,
            change_password,
        } => {
            let password = if change_password {
                Some(password_or_prompt(None, "New password: ")?)
            } else {
                None
            };
            let patch = UserPatch {
                name,
                email,
                password,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --name, --email or --change-password.");
                return Ok(());
            }

            let profile = service.update_profile(identity, patch)?;
            println!("Updated profile:");
            print!("{}", format_profile(&profile));
        }
        MeCommands::Delete => {
            service.delete_user(identity)?;
            println!("Deleted account: {}", identity.email);
        }
    }

    Ok(())
}

/// Show the caller's most recent audit entries
pub fn handle_audit(storage: &Storage, identity: &Identity, limit: usize) -> LedgerResult<()> {
    let entries = storage
        .audit_logger()
        .read_recent_for(identity.user_id, limit)?;
    println!("{}", format_audit_entries(&entries));
    Ok(())
}
