//! Portal user repository.

use domain::models::admin::{AdminUserSummary, AdminUsersQuery, RegistrationStats};
use domain::models::user::User;
use shared::pagination::PageParams;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::user::{AdminUserRowEntity, UserEntity};

/// Repository for portal user database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a user with the identity-provider supplied id.
    pub async fn create(&self, id: Uuid, email: &str, name: &str) -> Result<User, sqlx::Error> {
        let entity = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, email, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, role, max_guests, created_at
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Find user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let entity = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, name, role, max_guests, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Find user by email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let entity = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, name, role, max_guests, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// List users for the admin console with guest counts and an optional
    /// case-insensitive name/email search.
    pub async fn list_admin(
        &self,
        query: &AdminUsersQuery,
    ) -> Result<(Vec<AdminUserSummary>, i64), sqlx::Error> {
        let params = PageParams {
            page: query.page,
            limit: query.limit,
        };
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let total: i64 = match &search {
            Some(pattern) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM users WHERE name ILIKE $1 OR email ILIKE $1",
                )
                .bind(pattern)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        let where_clause = if search.is_some() {
            "WHERE u.name ILIKE $3 OR u.email ILIKE $3"
        } else {
            ""
        };
        let select_query = format!(
            r#"
            SELECT u.id, u.email, u.name, u.role, u.max_guests, u.created_at,
                   (SELECT COUNT(*) FROM guests g WHERE g.user_id = u.id) AS guest_count,
                   EXISTS (SELECT 1 FROM graduates gr WHERE gr.user_id = u.id) AS has_graduate
            FROM users u
            {}
            ORDER BY u.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
            where_clause
        );

        let mut select = sqlx::query_as::<_, AdminUserRowEntity>(&select_query)
            .bind(params.limit() as i64)
            .bind(params.offset());
        if let Some(pattern) = &search {
            select = select.bind(pattern.clone());
        }

        let entities = select.fetch_all(&self.pool).await?;
        let users = entities.into_iter().map(Into::into).collect();

        Ok((users, total))
    }

    /// Aggregate registration totals for the admin console header.
    pub async fn stats(&self) -> Result<RegistrationStats, sqlx::Error> {
        let (total_users, total_guests, total_graduates): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users),
                (SELECT COUNT(*) FROM guests),
                (SELECT COUNT(*) FROM graduates)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(RegistrationStats {
            total_users,
            total_guests,
            total_graduates,
        })
    }
}
