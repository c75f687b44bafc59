use sea_orm::ConnectionTrait;

use crate::error::AppError;
use crate::model::{NewResource, PageRequest, ResourceDto, ResourcePatch};
use crate::repository::ResourceRepository;
use crate::response::PageDto;

/// Existence checks and DTO shaping on top of [`ResourceRepository`].
pub struct ResourceService<'a, C: ConnectionTrait> {
    repository: ResourceRepository<'a, C>,
}

impl<'a, C: ConnectionTrait> ResourceService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            repository: ResourceRepository::new(db),
        }
    }

    pub async fn list(&self, req: PageRequest) -> Result<PageDto<ResourceDto>, AppError> {
        let (items, total) = self.repository.list(&req).await?;
        Ok(PageDto {
            items: items.into_iter().map(ResourceDto::from).collect(),
            total,
            page: req.page,
            size: req.size,
        })
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ResourceDto, AppError> {
        let item = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::resource_not_found(id))?;
        Ok(item.into())
    }

    pub async fn create(&self, data: NewResource) -> Result<ResourceDto, AppError> {
        let created = self.repository.create(data).await?;
        Ok(created.into())
    }

    pub async fn update(&self, id: i32, patch: ResourcePatch) -> Result<ResourceDto, AppError> {
        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::resource_not_found(id))?;
        let updated = self.repository.update(existing, patch).await?;
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::resource_not_found(id))?;
        self.repository.delete(existing).await?;
        Ok(())
    }
}
