//! Graduate entities.

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::graduate::Graduate;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for graduate registrations.
#[derive(Debug, Clone, FromRow)]
pub struct GraduateEntity {
    pub id: Uuid,
    pub name: String,
    pub major: String,
    pub date_of_birth: NaiveDate,
    pub gaf_id_number: String,
    pub government_id: String,
    pub id_image_url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<GraduateEntity> for Graduate {
    fn from(entity: GraduateEntity) -> Self {
        Graduate {
            id: entity.id,
            name: entity.name,
            major: entity.major,
            date_of_birth: entity.date_of_birth,
            gaf_id_number: entity.gaf_id_number,
            government_id: entity.government_id,
            id_image_url: entity.id_image_url,
            user_id: entity.user_id,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_to_domain() {
        let entity = GraduateEntity {
            id: Uuid::new_v4(),
            name: "Jane Doe".to_string(),
            major: "Computer Science".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 6, 15).unwrap(),
            gaf_id_number: "GAF-2026-0042".to_string(),
            government_id: "X1".to_string(),
            id_image_url: "graduate-ids/abc.pdf".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let graduate: Graduate = entity.clone().into();
        assert_eq!(graduate.id, entity.id);
        assert_eq!(graduate.gaf_id_number, "GAF-2026-0042");
        assert_eq!(graduate.date_of_birth, entity.date_of_birth);
    }
}
