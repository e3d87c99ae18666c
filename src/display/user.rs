//! User and audit formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::audit::AuditEntry;
use crate::models::{User, UserProfile};

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "Staff")]
    staff: &'static str,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let rows = users.iter().map(|u| UserRow {
        email: u.email.clone(),
        name: u.name.clone(),
        active: yes_no(u.is_active),
        staff: yes_no(u.is_staff),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn format_profile(profile: &UserProfile) -> String {
    let mut output = format!("Email: {}\n", profile.email);
    if !profile.name.is_empty() {
        output.push_str(&format!("Name:  {}\n", profile.name));
    }
    output
}

pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries found.".to_string();
    }

    entries
        .iter()
        .map(AuditEntry::format_human_readable)
        .collect::<Vec<_>>()
        .join("\n")
}
