use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Order, Set};
use serde::{Deserialize, Deserializer, Serialize};

use crate::entity::resource::{self, ResourceType, Tags};
use crate::error::AppError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 50;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ResourceDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub url: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<resource::Model> for ResourceDto {
    fn from(model: resource::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            kind: model.kind,
            url: model.url,
            tags: model.tags.0,
            created_at: model.created_at,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct CreateResourceRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct UpdateResourceRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, rename = "type")]
    pub kind: Option<ResourceType>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing key (`None`).
fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Validated insert payload.
#[derive(Clone, Debug, PartialEq)]
pub struct NewResource {
    pub title: String,
    pub description: Option<String>,
    pub kind: ResourceType,
    pub url: String,
    pub tags: Vec<String>,
}

/// Sparse change-set: `None` leaves the stored value alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub kind: Option<ResourceType>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
}

fn validate_title(raw: &str) -> Result<String, AppError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::invalid_field("title", "title must not be empty"));
    }
    Ok(title.to_string())
}

impl CreateResourceRequest {
    pub fn validate(self) -> Result<NewResource, AppError> {
        Ok(NewResource {
            title: validate_title(&self.title)?,
            description: self.description,
            kind: self.kind,
            url: self.url,
            tags: self.tags,
        })
    }
}

impl UpdateResourceRequest {
    pub fn validate(self) -> Result<ResourcePatch, AppError> {
        let title = match self.title {
            Some(t) => Some(validate_title(&t)?),
            None => None,
        };
        Ok(ResourcePatch {
            title,
            description: self.description,
            kind: self.kind,
            url: self.url,
            tags: self.tags,
        })
    }
}

impl ResourcePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.kind.is_none()
            && self.url.is_none()
            && self.tags.is_none()
    }

    /// Overlays the present fields on `existing`; everything else stays `Unchanged`.
    pub fn merge(self, existing: resource::Model) -> resource::ActiveModel {
        let mut active = existing.into_active_model();
        if let Some(title) = self.title {
            active.title = Set(title);
        }
        if let Some(description) = self.description {
            active.description = Set(description);
        }
        if let Some(kind) = self.kind {
            active.kind = Set(kind);
        }
        if let Some(url) = self.url {
            active.url = Set(url);
        }
        if let Some(tags) = self.tags {
            active.tags = Set(Tags(tags));
        }
        active
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Title,
    Type,
    CreatedAt,
}

impl SortField {
    /// Unknown names fall back to `created_at` instead of failing.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "title" => Self::Title,
            "type" => Self::Type,
            _ => Self::CreatedAt,
        }
    }

    pub fn column(self) -> resource::Column {
        match self {
            Self::Title => resource::Column::Title,
            Self::Type => resource::Column::Kind,
            Self::CreatedAt => resource::Column::CreatedAt,
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub order_dir: SortDirection,
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            order_by: None,
            order_dir: SortDirection::Desc,
        }
    }
}

/// Bounds-checked listing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl PageRequest {
    /// Row offset of the page, or `None` when it lies past anything the store can address.
    pub fn offset(&self) -> Option<u64> {
        (self.page - 1)
            .checked_mul(self.size)
            .filter(|offset| *offset <= i64::MAX as u64)
    }
}

impl ListQuery {
    pub fn validate(self) -> Result<PageRequest, AppError> {
        if self.page < 1 {
            return Err(AppError::invalid_field("page", "page must be greater than or equal to 1"));
        }
        if self.size < 1 || self.size > MAX_PAGE_SIZE {
            return Err(AppError::invalid_field(
                "size",
                format!("size must be between 1 and {}", MAX_PAGE_SIZE),
            ));
        }
        Ok(PageRequest {
            page: self.page,
            size: self.size,
            sort_field: SortField::parse(self.order_by.as_deref().unwrap_or("created_at")),
            sort_direction: self.order_dir,
        })
    }
}
