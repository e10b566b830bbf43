//! Resource model: the single managed entity and its create/update DTOs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Opaque key-value metadata attached to a resource.
pub type Metadata = Map<String, Value>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

impl ResourceStatus {
    pub const ALL: [ResourceStatus; 3] = [Self::Active, Self::Inactive, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown resource status '{s}'"))
    }
}

/// A managed resource. Plain record; storage mapping lives in `db::resources`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: ResourceStatus,
    pub metadata: Option<Metadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateResource {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_description"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,
    pub status: Option<ResourceStatus>,
    pub metadata: Option<Metadata>,
}

/// Partial update. For the nullable fields the outer `Option` tracks whether
/// the key was present at all and the inner one carries an explicit `null`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateResource {
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(custom(function = "validate_description"))]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(custom(function = "validate_category"))]
    pub category: Option<Option<String>>,
    pub status: Option<ResourceStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub metadata: Option<Option<Metadata>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if (1..=255).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("name")
            .with_message("Name must be between 1 and 255 characters".into()))
    }
}

// Text is stored trimmed, so lengths are checked after trimming.

fn validate_description(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() <= 2000 {
        Ok(())
    } else {
        Err(ValidationError::new("description")
            .with_message("Description must not exceed 2000 characters".into()))
    }
}

fn validate_category(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() <= 100 {
        Ok(())
    } else {
        Err(ValidationError::new("category")
            .with_message("Category must not exceed 100 characters".into()))
    }
}

/// Trim a text field; blank values collapse to `None`.
pub fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
