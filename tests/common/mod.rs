#![allow(dead_code)]

use resource_hub::config::AppConfig;
use resource_hub::db::connect_db;
use sea_orm::DatabaseConnection;

pub fn test_config() -> AppConfig {
    AppConfig {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        sqlite_path: String::new(),
        database_url: Some("sqlite::memory:".to_string()),
        db_max_connections: 1,
        environment: "test".to_string(),
        cors_allow_origins: vec!["http://localhost:5173".to_string()],
    }
}

pub async fn test_db() -> DatabaseConnection {
    connect_db(&test_config()).await.unwrap()
}
