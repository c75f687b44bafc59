use futures_util::future::BoxFuture;
use log::{info, warn, LevelFilter};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbErr, Schema,
    TransactionError, TransactionTrait,
};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::AppConfig;
use crate::entity::resource;
use crate::error::AppError;

pub async fn connect_db(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let url = config.database_url();
    ensure_sqlite_dir(&url);

    let mut opts = ConnectOptions::new(url);
    opts.max_connections(config.db_max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(config.is_development())
        .sqlx_logging_level(LevelFilter::Debug);

    let db = Database::connect(opts).await?;
    init_schema(&db).await?;
    Ok(db)
}

fn ensure_sqlite_dir(url: &str) {
    let Some(rest) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    else {
        return;
    };
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.contains(":memory:") {
        return;
    }
    if let Some(parent) = Path::new(path).parent() {
        let _ = fs::create_dir_all(parent);
    }
}

/// Creates the `resources` table from the entity definition when it is missing.
pub async fn init_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(resource::Entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    info!("schema ready ({:?})", backend);
    Ok(())
}

/// Runs `work` inside one transaction: commit on `Ok`, rollback on `Err`.
/// The connection goes back to the pool on every exit path.
pub async fn unit_of_work<F, T>(db: &DatabaseConnection, work: F) -> Result<T, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T, AppError>> + Send,
    T: Send,
{
    db.transaction::<F, T, AppError>(work).await.map_err(map_tx_error)
}

fn map_tx_error(err: TransactionError<AppError>) -> AppError {
    match err {
        TransactionError::Connection(e) => {
            warn!("unit of work aborted by storage: {}", e);
            AppError::Storage(e)
        }
        TransactionError::Transaction(app) => {
            warn!("unit of work rolled back: {}", app);
            app
        }
    }
}
