//! Resource persistence: the row mapping for the `resources` table and the
//! repository that reads and writes it.

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::filter::{SortField, SortOrder};
use crate::models::resource::{Metadata, Resource, ResourceStatus};
use crate::services::query::{order_clause, QueryConditions};

/// Columns of the `resources` table. The one place resource attributes are
/// mapped to storage names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceColumn {
    Id,
    Name,
    Description,
    Category,
    Status,
    Metadata,
    CreatedAt,
    UpdatedAt,
}

impl ResourceColumn {
    pub const ALL: [ResourceColumn; 8] = [
        Self::Id,
        Self::Name,
        Self::Description,
        Self::Category,
        Self::Status,
        Self::Metadata,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Category => "category",
            Self::Status => "status",
            Self::Metadata => "metadata",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl From<SortField> for ResourceColumn {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Id => Self::Id,
            SortField::Name => Self::Name,
            SortField::Category => Self::Category,
            SortField::Status => Self::Status,
            SortField::CreatedAt => Self::CreatedAt,
            SortField::UpdatedAt => Self::UpdatedAt,
        }
    }
}

fn select_columns() -> String {
    ResourceColumn::ALL
        .iter()
        .map(ResourceColumn::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// Fixed width keeps lexical order equal to chronological order in TEXT columns.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Current time at the precision the store keeps.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Internal(format!("Invalid {column} '{raw}': {e}")))
}

/// One row of the `resources` table, as stored.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct ResourceRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: String,
    pub metadata: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ResourceRow {
    pub fn from_resource(resource: &Resource) -> Result<Self, AppError> {
        let metadata = resource
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| AppError::Internal(format!("Failed to encode metadata: {e}")))?;

        Ok(Self {
            id: resource.id.to_string(),
            name: resource.name.clone(),
            description: resource.description.clone(),
            category: resource.category.clone(),
            status: resource.status.as_str().to_string(),
            metadata,
            created_at: format_timestamp(&resource.created_at),
            updated_at: format_timestamp(&resource.updated_at),
        })
    }
}

impl TryFrom<ResourceRow> for Resource {
    type Error = AppError;

    fn try_from(row: ResourceRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| AppError::Internal(format!("Invalid resource id '{}': {e}", row.id)))?;
        let status = row.status.parse::<ResourceStatus>().map_err(AppError::Internal)?;
        let metadata = row
            .metadata
            .as_deref()
            .map(serde_json::from_str::<Metadata>)
            .transpose()
            .map_err(|e| AppError::Internal(format!("Invalid metadata for {id}: {e}")))?;

        Ok(Self {
            id,
            name: row.name,
            description: row.description,
            category: row.category,
            status,
            metadata,
            created_at: parse_timestamp("created_at", &row.created_at)?,
            updated_at: parse_timestamp("updated_at", &row.updated_at)?,
        })
    }
}

/// Reads and writes resources. Owned by the service; cloning shares the pool.
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    pool: SqlitePool,
}

impl ResourceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of rows matching `conditions`.
    pub async fn count(&self, conditions: &QueryConditions) -> Result<i64, AppError> {
        let (where_sql, binds) = conditions.where_clause();
        let sql = format!("SELECT COUNT(*) FROM resources {where_sql}");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in &binds {
            query = query.bind(value);
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    /// One ordered window of the rows matching `conditions`. Uses the same
    /// rendering as `count`, but the two calls are not isolated from
    /// concurrent writes.
    pub async fn fetch(
        &self,
        conditions: &QueryConditions,
        sort_by: SortField,
        sort_order: SortOrder,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Resource>, AppError> {
        let (where_sql, binds) = conditions.where_clause();
        let sql = format!(
            "SELECT {} FROM resources {where_sql} {} LIMIT ? OFFSET ?",
            select_columns(),
            order_clause(sort_by, sort_order),
        );

        let mut query = sqlx::query_as::<_, ResourceRow>(&sql);
        for value in &binds {
            query = query.bind(value);
        }
        let rows = query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Resource::try_from).collect()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, AppError> {
        let sql = format!("SELECT {} FROM resources WHERE id = ?", select_columns());
        let row = sqlx::query_as::<_, ResourceRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Resource::try_from).transpose()
    }

    pub async fn insert(&self, resource: &Resource) -> Result<(), AppError> {
        let row = ResourceRow::from_resource(resource)?;
        sqlx::query(
            r#"
            INSERT INTO resources (id, name, description, category, status, metadata,
                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(&row.category)
        .bind(&row.status)
        .bind(&row.metadata)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrite every mutable column. Returns false when the row is gone.
    pub async fn update(&self, resource: &Resource) -> Result<bool, AppError> {
        let row = ResourceRow::from_resource(resource)?;
        let result = sqlx::query(
            r#"
            UPDATE resources SET
                name = ?,
                description = ?,
                category = ?,
                status = ?,
                metadata = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&row.name)
        .bind(&row.description)
        .bind(&row.category)
        .bind(&row.status)
        .bind(&row.metadata)
        .bind(&row.updated_at)
        .bind(&row.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a row permanently. Returns false when nothing was deleted.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
