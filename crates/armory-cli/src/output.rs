//! Output formatting helpers.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use armory_core::{Role, UserProfile};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Role name, coloured by privilege.
pub fn role(role: Role) -> ColoredString {
    match role {
        Role::Admin => role.as_str().red().bold(),
        Role::BaseCommander => role.as_str().yellow(),
        Role::LogisticsOfficer => role.as_str().cyan(),
    }
}

/// Print the fields of a profile.
pub fn profile(user: &UserProfile) {
    field("User", user.username());
    field("Name", user.full_name());
    field("Role", &role(user.role()).to_string());
    match (user.base_id(), user.base_name()) {
        (Some(id), Some(name)) => field("Base", &format!("{name} (#{id})")),
        (Some(id), None) => field("Base", &format!("#{id}")),
        _ => field("Base", "all bases"),
    }
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
