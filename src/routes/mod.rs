pub mod cors;
pub mod health;
pub mod resource;

use actix_web::web;

use crate::response::{json_error_handler, path_error_handler, query_error_handler};

/// Mounts every route plus the extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(web::scope("/api/v1").service(web::scope("/resources").configure(resource::config)))
        .service(web::scope("/health").configure(health::config));
}
