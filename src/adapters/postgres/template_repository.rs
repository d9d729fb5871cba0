//! PostgreSQL implementation of TemplateRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, TemplateId, Timestamp, UserId};
use crate::domain::newsletter::ContentCodec;
use crate::domain::template::Template;
use crate::ports::TemplateRepository;

/// PostgreSQL implementation of the TemplateRepository port.
#[derive(Clone)]
pub struct PostgresTemplateRepository {
    pool: PgPool,
    codec: ContentCodec,
}

impl PostgresTemplateRepository {
    /// Creates a new repository instance.
    pub fn new(pool: PgPool, codec: ContentCodec) -> Self {
        Self { pool, codec }
    }

    fn row_to_template(&self, row: TemplateRow) -> Result<Template, DomainError> {
        let user_id = UserId::new(&row.user_id).map_err(|e| {
            DomainError::new(ErrorCode::InvalidFormat, format!("invalid user_id: {e}"))
        })?;

        let content = self.codec.decode(Some(&row.content));
        let settings = match row.settings {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };

        Ok(Template::reconstitute(
            TemplateId::from_uuid(row.id),
            user_id,
            row.name,
            content,
            settings,
            row.is_public,
            row.is_global,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

/// Internal row type for sqlx query mapping.
#[derive(Debug, sqlx::FromRow)]
struct TemplateRow {
    id: uuid::Uuid,
    user_id: String,
    name: String,
    content: serde_json::Value,
    settings: serde_json::Value,
    is_public: bool,
    is_global: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
impl TemplateRepository for PostgresTemplateRepository {
    async fn create(&self, template: &Template) -> Result<TemplateId, DomainError> {
        let content = self.codec.encode(template.content());
        let settings = serde_json::Value::Object(template.settings().clone());

        let row: (uuid::Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO templates (user_id, name, content, settings, is_public, is_global, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(template.user_id().as_str())
        .bind(template.name())
        .bind(&content)
        .bind(&settings)
        .bind(template.is_public())
        .bind(template.is_global())
        .bind(template.created_at().as_datetime())
        .bind(template.updated_at().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        Ok(TemplateId::from_uuid(row.0))
    }

    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<Template>, DomainError> {
        let row: Option<TemplateRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, content, settings, is_public, is_global, created_at, updated_at
            FROM templates
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        row.map(|row| self.row_to_template(row)).transpose()
    }

    async fn list_visible_to(&self, user_id: &UserId) -> Result<Vec<Template>, DomainError> {
        let rows: Vec<TemplateRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, content, settings, is_public, is_global, created_at, updated_at
            FROM templates
            WHERE user_id = $1 OR is_public OR is_global
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        rows.into_iter()
            .map(|row| self.row_to_template(row))
            .collect()
    }

    async fn delete(&self, id: &TemplateId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TemplateNotFound,
                format!("template {id} not found"),
            ));
        }
        Ok(())
    }
}
