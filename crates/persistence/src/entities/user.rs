//! Portal user entities.

use chrono::{DateTime, Utc};
use domain::models::admin::AdminUserSummary;
use domain::models::user::{User, UserRole};
use sqlx::FromRow;
use uuid::Uuid;

/// Database representation of the `user_role` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
pub enum UserRoleDb {
    User,
    Admin,
}

impl From<UserRoleDb> for UserRole {
    fn from(role: UserRoleDb) -> Self {
        match role {
            UserRoleDb::User => UserRole::User,
            UserRoleDb::Admin => UserRole::Admin,
        }
    }
}

/// Database entity for users.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRoleDb,
    pub max_guests: i32,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        User {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            role: entity.role.into(),
            max_guests: entity.max_guests,
            created_at: entity.created_at,
        }
    }
}

/// Admin listing row: user columns plus aggregates over invitees.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUserRowEntity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRoleDb,
    pub max_guests: i32,
    pub created_at: DateTime<Utc>,
    pub guest_count: i64,
    pub has_graduate: bool,
}

impl From<AdminUserRowEntity> for AdminUserSummary {
    fn from(entity: AdminUserRowEntity) -> Self {
        AdminUserSummary {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            role: entity.role.into(),
            max_guests: entity.max_guests,
            created_at: entity.created_at,
            guest_count: entity.guest_count,
            has_graduate: entity.has_graduate,
        }
    }
}
