//! List filters: raw query parameters, their validation, and normalization
//! into a typed `ResourceFilter`.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::resource::{clean_text, ResourceStatus};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Resource attributes a list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "category")]
    Category,
    #[serde(rename = "status")]
    Status,
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "updatedAt")]
    UpdatedAt,
}

impl SortField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "category" => Some(Self::Category),
            "status" => Some(Self::Status),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Raw list query exactly as received; every value is an untyped string.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListResourcesQuery {
    #[validate(length(max = 255, message = "Name filter must not exceed 255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "Category filter must not exceed 100 characters"))]
    pub category: Option<String>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    #[validate(length(max = 255, message = "Search query must not exceed 255 characters"))]
    pub search: Option<String>,
    #[validate(custom(function = "validate_sort_by"))]
    pub sort_by: Option<String>,
    #[validate(custom(function = "validate_sort_order"))]
    pub sort_order: Option<String>,
    #[validate(custom(function = "validate_page"))]
    pub page: Option<String>,
    #[validate(custom(function = "validate_limit"))]
    pub limit: Option<String>,
}

// Blank values count as "not supplied" and are never rejected.

fn validate_status(value: &str) -> Result<(), ValidationError> {
    match value.trim() {
        "" => Ok(()),
        v if v.parse::<ResourceStatus>().is_ok() => Ok(()),
        _ => Err(ValidationError::new("status")
            .with_message("Status must be one of: active, inactive, archived".into())),
    }
}

fn validate_sort_by(value: &str) -> Result<(), ValidationError> {
    match value.trim() {
        "" => Ok(()),
        v if SortField::parse(v).is_some() => Ok(()),
        _ => Err(ValidationError::new("sort_by").with_message("Invalid sort field".into())),
    }
}

fn validate_sort_order(value: &str) -> Result<(), ValidationError> {
    match value.trim() {
        "" => Ok(()),
        v if SortOrder::parse(v).is_some() => Ok(()),
        _ => Err(ValidationError::new("sort_order")
            .with_message("Sort order must be \"asc\" or \"desc\"".into())),
    }
}

fn validate_page(value: &str) -> Result<(), ValidationError> {
    match value.trim() {
        "" => Ok(()),
        v if v.parse::<i64>().is_ok_and(|p| p >= 1) => Ok(()),
        _ => Err(ValidationError::new("page").with_message("Page must be a positive integer".into())),
    }
}

fn validate_limit(value: &str) -> Result<(), ValidationError> {
    match value.trim() {
        "" => Ok(()),
        v if v.parse::<i64>().is_ok_and(|l| (1..=MAX_LIMIT).contains(&l)) => Ok(()),
        _ => Err(ValidationError::new("limit")
            .with_message(format!("Limit must be between 1 and {MAX_LIMIT}").into())),
    }
}

/// Normalized list filter. Only supplied values are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub status: Option<ResourceStatus>,
    pub search: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ResourceFilter {
    /// Build a filter field by field from the raw query. Bounds are checked
    /// by `ListResourcesQuery::validate`; anything unparsable here is dropped.
    pub fn normalize(raw: &ListResourcesQuery) -> Self {
        let text = |v: &Option<String>| clean_text(v.as_deref());
        Self {
            name: text(&raw.name),
            category: text(&raw.category),
            status: text(&raw.status).and_then(|s| s.parse().ok()),
            search: text(&raw.search),
            sort_by: text(&raw.sort_by).and_then(|s| SortField::parse(&s)),
            sort_order: text(&raw.sort_order).and_then(|s| SortOrder::parse(&s)),
            page: text(&raw.page).and_then(|s| s.parse().ok()),
            limit: text(&raw.limit).and_then(|s| s.parse().ok()),
        }
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by.unwrap_or_default()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order.unwrap_or_default()
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}
