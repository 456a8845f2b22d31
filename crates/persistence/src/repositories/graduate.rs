//! Graduate repository.

use chrono::NaiveDate;
use domain::models::graduate::Graduate;
use domain::models::qr_code::{generate_code, QrCode};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::graduate::GraduateEntity;
use crate::entities::qr_code::QrCodeEntity;

/// Repository for graduate database operations.
#[derive(Clone)]
pub struct GraduateRepository {
    pool: PgPool,
}

/// Column values for a new graduate row.
pub struct NewGraduate<'a> {
    pub name: &'a str,
    pub major: &'a str,
    pub date_of_birth: NaiveDate,
    pub gaf_id_number: &'a str,
    pub government_id: &'a str,
    pub id_image_url: &'a str,
}

impl GraduateRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a graduate together with its ledger row in one transaction.
    ///
    /// The unique index on `user_id` makes a second registration fail with a
    /// database error the caller maps to a conflict.
    pub async fn create_with_code(
        &self,
        user_id: Uuid,
        graduate: NewGraduate<'_>,
    ) -> Result<(Graduate, QrCode), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let entity = sqlx::query_as::<_, GraduateEntity>(
            r#"
            INSERT INTO graduates (name, major, date_of_birth, gaf_id_number, government_id, id_image_url, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, major, date_of_birth, gaf_id_number, government_id, id_image_url, user_id, created_at
            "#,
        )
        .bind(graduate.name)
        .bind(graduate.major)
        .bind(graduate.date_of_birth)
        .bind(graduate.gaf_id_number)
        .bind(graduate.government_id)
        .bind(graduate.id_image_url)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let code = sqlx::query_as::<_, QrCodeEntity>(
            r#"
            INSERT INTO qr_codes (code, kind, graduate_id)
            VALUES ($1, 'GRADUATE', $2)
            RETURNING id, code, kind, status, scanned_at, created_at, guest_id, graduate_id
            "#,
        )
        .bind(generate_code())
        .bind(entity.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((entity.into(), code.into()))
    }

    /// Find a user's graduate registration with its code.
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<(Graduate, Option<QrCode>)>, sqlx::Error> {
        let entity = sqlx::query_as::<_, GraduateEntity>(
            r#"
            SELECT id, name, major, date_of_birth, gaf_id_number, government_id, id_image_url, user_id, created_at
            FROM graduates
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(entity) = entity else {
            return Ok(None);
        };

        let code = sqlx::query_as::<_, QrCodeEntity>(
            r#"
            SELECT id, code, kind, status, scanned_at, created_at, guest_id, graduate_id
            FROM qr_codes
            WHERE graduate_id = $1
            "#,
        )
        .bind(entity.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(Some((entity.into(), code.map(Into::into))))
    }

    /// List every graduate in the system, for the admin roster export.
    pub async fn list_all(&self) -> Result<Vec<Graduate>, sqlx::Error> {
        let entities = sqlx::query_as::<_, GraduateEntity>(
            r#"
            SELECT id, name, major, date_of_birth, gaf_id_number, government_id, id_image_url, user_id, created_at
            FROM graduates
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}
