//! PostgreSQL implementation of NewsletterRepository.
//!
//! Content and settings are stored as JSONB exactly as serialized by the
//! codec; the database assigns nothing inside the blobs, so unknown
//! section types and data shapes round-trip untouched. The content codec's
//! defaults kick in only on the load path, for records with empty or
//! legacy-shaped content.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, NewsletterId, NewsletterStatus, Timestamp, UserId,
};
use crate::domain::newsletter::{ContentCodec, Newsletter};
use crate::ports::{NewsletterRepository, NewsletterSummary};

/// PostgreSQL implementation of the NewsletterRepository port.
#[derive(Clone)]
pub struct PostgresNewsletterRepository {
    pool: PgPool,
    codec: ContentCodec,
}

impl PostgresNewsletterRepository {
    /// Creates a new repository instance.
    pub fn new(pool: PgPool, codec: ContentCodec) -> Self {
        Self { pool, codec }
    }

    /// Maps a database row to a Newsletter aggregate.
    fn row_to_newsletter(&self, row: NewsletterRow) -> Result<Newsletter, DomainError> {
        let user_id = UserId::new(&row.user_id).map_err(|e| {
            DomainError::new(ErrorCode::InvalidFormat, format!("invalid user_id: {e}"))
        })?;

        let status: NewsletterStatus = row.status.parse().map_err(|e: String| {
            DomainError::new(ErrorCode::InvalidFormat, format!("invalid status: {e}"))
        })?;

        // Malformed/legacy content never fails a load; the codec
        // substitutes defaults.
        let content = self.codec.decode(Some(&row.content));

        let settings = match row.settings {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };

        Ok(Newsletter::reconstitute(
            NewsletterId::from_uuid(row.id),
            user_id,
            row.title,
            content,
            settings,
            status,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

/// Internal row type for sqlx query mapping.
#[derive(Debug, sqlx::FromRow)]
struct NewsletterRow {
    id: uuid::Uuid,
    user_id: String,
    title: String,
    content: serde_json::Value,
    settings: serde_json::Value,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: uuid::Uuid,
    title: String,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
impl NewsletterRepository for PostgresNewsletterRepository {
    async fn create(&self, newsletter: &Newsletter) -> Result<NewsletterId, DomainError> {
        let content = self.codec.encode(newsletter.content());
        let settings = serde_json::Value::Object(newsletter.settings().clone());

        let row: (uuid::Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO newsletters (user_id, title, content, settings, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(newsletter.user_id().as_str())
        .bind(newsletter.title())
        .bind(&content)
        .bind(&settings)
        .bind(newsletter.status().as_str())
        .bind(newsletter.created_at().as_datetime())
        .bind(newsletter.updated_at().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        Ok(NewsletterId::from_uuid(row.0))
    }

    async fn update(&self, newsletter: &Newsletter) -> Result<(), DomainError> {
        let id = newsletter.id().ok_or_else(|| {
            DomainError::new(ErrorCode::ValidationFailed, "cannot update an unsaved newsletter")
        })?;

        let content = self.codec.encode(newsletter.content());
        let settings = serde_json::Value::Object(newsletter.settings().clone());

        let result = sqlx::query(
            r#"
            UPDATE newsletters
            SET title = $2, content = $3, settings = $4, status = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(newsletter.title())
        .bind(&content)
        .bind(&settings)
        .bind(newsletter.status().as_str())
        .bind(newsletter.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NewsletterNotFound,
                format!("newsletter {id} not found"),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &NewsletterId) -> Result<Option<Newsletter>, DomainError> {
        let row: Option<NewsletterRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, title, content, settings, status, created_at, updated_at
            FROM newsletters
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        row.map(|row| self.row_to_newsletter(row)).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<NewsletterSummary>, DomainError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT id, title, status, created_at, updated_at
            FROM newsletters
            WHERE user_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let status: NewsletterStatus = row.status.parse().map_err(|e: String| {
                    DomainError::new(ErrorCode::InvalidFormat, format!("invalid status: {e}"))
                })?;
                Ok(NewsletterSummary {
                    id: NewsletterId::from_uuid(row.id),
                    title: row.title,
                    status,
                    created_at: Timestamp::from_datetime(row.created_at),
                    updated_at: Timestamp::from_datetime(row.updated_at),
                })
            })
            .collect()
    }

    async fn delete(&self, id: &NewsletterId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM newsletters WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NewsletterNotFound,
                format!("newsletter {id} not found"),
            ));
        }
        Ok(())
    }
}
