use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::resource::{self, Tags};
use crate::model::{NewResource, PageRequest, ResourcePatch};

/// Storage reads and writes for the `resources` table. Works against a pool or a transaction.
pub struct ResourceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ResourceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn list(&self, req: &PageRequest) -> Result<(Vec<resource::Model>, u64), DbErr> {
        let order = req.sort_direction.order();
        debug!(
            "list resources page={} size={} sort={:?} {:?}",
            req.page, req.size, req.sort_field, req.sort_direction
        );

        let total = resource::Entity::find().count(self.db).await?;
        let Some(offset) = req.offset() else {
            return Ok((Vec::new(), total));
        };

        let items = resource::Entity::find()
            .order_by(req.sort_field.column(), order.clone())
            .order_by(resource::Column::Id, order)
            .offset(offset)
            .limit(req.size)
            .all(self.db)
            .await?;
        Ok((items, total))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<resource::Model>, DbErr> {
        resource::Entity::find_by_id(id).one(self.db).await
    }

    pub async fn create(&self, data: NewResource) -> Result<resource::Model, DbErr> {
        let active = resource::ActiveModel {
            title: Set(data.title),
            description: Set(data.description),
            kind: Set(data.kind),
            url: Set(data.url),
            tags: Set(Tags(data.tags)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let created = active.insert(self.db).await?;
        debug!("inserted resource id={}", created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        existing: resource::Model,
        patch: ResourcePatch,
    ) -> Result<resource::Model, DbErr> {
        let active = patch.merge(existing.clone());
        if !active.is_changed() {
            return Ok(existing);
        }
        let updated = active.update(self.db).await?;
        debug!("updated resource id={}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, existing: resource::Model) -> Result<(), DbErr> {
        let id = existing.id;
        existing.delete(self.db).await?;
        debug!("deleted resource id={}", id);
        Ok(())
    }
}
