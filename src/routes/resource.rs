use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::db::unit_of_work;
use crate::error::AppError;
use crate::model::{CreateResourceRequest, ListQuery, UpdateResourceRequest};
use crate::service::ResourceService;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["", "/"])
            .route(web::get().to(list))
            .route(web::post().to(create)),
    )
    .service(
        web::resource("/{resource_id}")
            .route(web::get().to(get_resource))
            .route(web::put().to(update))
            .route(web::delete().to(remove)),
    );
}

async fn list(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let req = query.into_inner().validate()?;
    let page = unit_of_work(db.get_ref(), |txn| {
        Box::pin(async move { ResourceService::new(txn).list(req).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn get_resource(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let item = unit_of_work(db.get_ref(), |txn| {
        Box::pin(async move { ResourceService::new(txn).get_by_id(id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(item))
}

async fn create(
    db: web::Data<DatabaseConnection>,
    payload: web::Json<CreateResourceRequest>,
) -> Result<HttpResponse, AppError> {
    let data = payload.into_inner().validate()?;
    let created = unit_of_work(db.get_ref(), |txn| {
        Box::pin(async move { ResourceService::new(txn).create(data).await })
    })
    .await?;
    Ok(HttpResponse::Created().json(created))
}

async fn update(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    payload: web::Json<UpdateResourceRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let patch = payload.into_inner().validate()?;
    let updated = unit_of_work(db.get_ref(), |txn| {
        Box::pin(async move { ResourceService::new(txn).update(id, patch).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(updated))
}

async fn remove(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    unit_of_work(db.get_ref(), |txn| {
        Box::pin(async move { ResourceService::new(txn).delete(id).await })
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}
