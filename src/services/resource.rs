//! Resource service: create, read, list, update and delete resources.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::resources::{current_timestamp, ResourceRepository};
use crate::errors::AppError;
use crate::models::filter::ResourceFilter;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::resource::{clean_text, CreateResource, Resource, UpdateResource};
use crate::services::query::QueryConditions;

/// Business operations on resources. Built once at startup and shared
/// through `AppState`.
#[derive(Debug, Clone)]
pub struct ResourceService {
    repo: ResourceRepository,
}

impl ResourceService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: ResourceRepository::new(pool),
        }
    }

    pub fn repository(&self) -> &ResourceRepository {
        &self.repo
    }

    /// Create a new resource. `createdAt` and `updatedAt` start out equal.
    pub async fn create(&self, input: &CreateResource) -> Result<Resource, AppError> {
        let now = current_timestamp();
        let resource = Resource {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            description: clean_text(input.description.as_deref()),
            category: clean_text(input.category.as_deref()),
            status: input.status.unwrap_or_default(),
            metadata: input.metadata.clone(),
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(&resource).await?;
        tracing::info!(resource_id = %resource.id, "Resource created");
        Ok(resource)
    }

    /// Find a resource by ID.
    pub async fn get(&self, id: Uuid) -> Result<Resource, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))
    }

    /// List resources with filters and pagination.
    pub async fn list(&self, filter: &ResourceFilter) -> Result<PagedResult<Resource>, AppError> {
        let conditions = QueryConditions::from_filter(filter);
        let pagination = Pagination::new(filter.page(), filter.limit());
        tracing::debug!(
            ?conditions,
            sort_by = ?filter.sort_by(),
            sort_order = ?filter.sort_order(),
            page = pagination.page,
            limit = pagination.limit,
            "Listing resources"
        );

        let total = self.repo.count(&conditions).await?;
        let data = self
            .repo
            .fetch(
                &conditions,
                filter.sort_by(),
                filter.sort_order(),
                pagination.offset(),
                pagination.limit,
            )
            .await?;

        Ok(PagedResult::new(data, total, &pagination))
    }

    /// Apply a partial update. Only supplied fields change.
    pub async fn update(&self, id: Uuid, patch: &UpdateResource) -> Result<Resource, AppError> {
        let mut resource = self.get(id).await?;
        apply_patch(&mut resource, patch);

        // Strictly after the previous value even on a coarse clock.
        let previous = resource.updated_at;
        resource.updated_at = current_timestamp().max(previous + chrono::Duration::microseconds(1));

        if !self.repo.update(&resource).await? {
            return Err(AppError::NotFound("Resource not found".to_string()));
        }
        tracing::info!(resource_id = %id, "Resource updated");
        Ok(resource)
    }

    /// Delete a resource permanently.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("Resource not found".to_string()));
        }
        tracing::info!(resource_id = %id, "Resource deleted");
        Ok(())
    }
}

/// Merge `patch` into `resource`. Absent keys leave a field alone; an explicit
/// `null` (or a blank string for description/category) clears it.
fn apply_patch(resource: &mut Resource, patch: &UpdateResource) {
    if let Some(ref name) = patch.name {
        resource.name = name.trim().to_string();
    }
    if let Some(ref description) = patch.description {
        resource.description = clean_text(description.as_deref());
    }
    if let Some(ref category) = patch.category {
        resource.category = clean_text(category.as_deref());
    }
    if let Some(status) = patch.status {
        resource.status = status;
    }
    if let Some(ref metadata) = patch.metadata {
        resource.metadata = metadata.clone();
    }
}
