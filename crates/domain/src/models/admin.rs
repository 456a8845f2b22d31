//! Admin listing and statistics wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserRole;
use shared::pagination::PageInfo;

/// Query parameters for the admin user listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminUsersQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Case-insensitive substring match against name and email.
    pub search: Option<String>,
}

/// One row of the admin user listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub max_guests: i32,
    pub created_at: DateTime<Utc>,
    pub guest_count: i64,
    pub has_graduate: bool,
}

/// Event-wide registration totals shown on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStats {
    pub total_users: i64,
    pub total_guests: i64,
    pub total_graduates: i64,
}

/// Response body for `GET /api/admin/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUsersResponse {
    pub users: Vec<AdminUserSummary>,
    pub pagination: PageInfo,
    pub stats: RegistrationStats,
}
