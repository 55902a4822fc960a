use crate::migrator::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info};

/// Type alias for the database connection handle shared across services.
pub type DbPool = DatabaseConnection;

/// Establishes a connection to the SQLite database.
///
/// The store is a single local file and the application is effectively
/// single-user, so the pool stays small.
pub async fn establish_connection(database_url: &str) -> Result<DbPool, DbErr> {
    debug!("Connecting to database at {}", database_url);

    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(5)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    info!("Opened database [{}]", database_url);
    Ok(db)
}

/// Brings the schema up to date. Table creation is idempotent; an existing
/// schema is left untouched.
pub async fn run_migrations(db: &DbPool) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("Database schema is up to date");
    Ok(())
}
