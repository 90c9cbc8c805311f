//! REST endpoint paths and wire types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use armory_core::UserProfile;

pub const LOGIN: &str = "auth/login";
pub const ME: &str = "auth/me";
pub const CHANGE_PASSWORD: &str = "auth/change-password";

pub const DASHBOARD_METRICS: &str = "dashboard/metrics";
pub const DASHBOARD_MOVEMENT_DETAILS: &str = "dashboard/movement-details";
pub const DASHBOARD_INVENTORY_SUMMARY: &str = "dashboard/inventory-summary";

pub const PURCHASES: &str = "purchases";
pub const TRANSFERS: &str = "transfers";
pub const ASSIGNMENTS: &str = "assignments";
pub const EXPENDITURES: &str = "expenditures";

pub const BASES: &str = "common/bases";
pub const EQUIPMENT_TYPES: &str = "common/equipment-types";
pub const USERS: &str = "common/users";
pub const AUDIT_LOGS: &str = "common/audit-logs";

/// Query for requests without parameters.
pub const NO_QUERY: &[(&str, &str)] = &[];

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserProfile,
}

/// Response from auth/me.
#[derive(Debug, Deserialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

/// Request body for change-password.
#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

/// Request body for `transfers/{id}/status`.
#[derive(Debug, Serialize)]
pub struct TransferStatusRequest<'a> {
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_date: Option<NaiveDate>,
}

/// Request body for `assignments/{id}/return`.
#[derive(Debug, Serialize)]
pub struct ReturnAssignmentRequest {
    pub return_date: NaiveDate,
}

/// Error body returned by the backend on failure.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
