use actix_web::{middleware, web, App, HttpServer};
use log::{error, info};
use resource_hub::config::AppConfig;
use resource_hub::db::connect_db;
use resource_hub::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let config = AppConfig::from_env();
    let db = connect_db(&config).await.map_err(|e| {
        error!("db connect failed: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let bind = (config.server_host.clone(), config.server_port);

    let app_config = config.clone();
    let app_db = db.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_config.clone()))
            .app_data(web::Data::new(app_db.clone()))
            .wrap(middleware::Logger::default())
            .wrap(middleware::from_fn(routes::cors::cors_handler))
            .configure(routes::configure)
    })
    .bind(bind.clone())?;
    info!("server started at http://{}:{} ({})", bind.0, bind.1, config.environment);
    server.run().await?;

    info!("server stopped, closing database pool");
    if let Err(e) = db.close().await {
        error!("db close failed: {}", e);
    }
    Ok(())
}
