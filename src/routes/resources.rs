//! Resource routes: CRUD plus the filtered, paginated list.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::validation::{ResourceId, ValidatedJson, ValidatedQuery};
use crate::models::filter::{ListResourcesQuery, ResourceFilter};
use crate::models::pagination::PagedResult;
use crate::models::resource::{CreateResource, Resource, UpdateResource};
use crate::AppState;

/// GET /api/v1/resources — list resources with filters, sorting, and pagination.
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListResourcesQuery>,
) -> Result<Json<ApiResponse<PagedResult<Resource>>>, AppError> {
    let filter = ResourceFilter::normalize(&query);
    let result = state.resources.list(&filter).await?;
    Ok(ApiResponse::success(result))
}

/// POST /api/v1/resources — create a resource.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateResource>,
) -> Result<(StatusCode, Json<ApiResponse<Resource>>), AppError> {
    let resource = state.resources.create(&body).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message(resource, "Resource created successfully"),
    ))
}

/// GET /api/v1/resources/{id} — get resource by ID.
pub async fn get_by_id(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<ApiResponse<Resource>>, AppError> {
    let resource = state.resources.get(id).await?;
    Ok(ApiResponse::success(resource))
}

/// PUT /api/v1/resources/{id} — partially update a resource.
pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedJson(body): ValidatedJson<UpdateResource>,
) -> Result<Json<ApiResponse<Resource>>, AppError> {
    let resource = state.resources.update(id, &body).await?;
    Ok(ApiResponse::success_with_message(
        resource,
        "Resource updated successfully",
    ))
}

/// DELETE /api/v1/resources/{id} — delete a resource permanently.
pub async fn delete(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, AppError> {
    state.resources.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
