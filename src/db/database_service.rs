use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

#[derive(Clone)]
pub struct DatabaseService {
    pub(crate) database_connection: DatabaseConnection,
}

impl DatabaseService {
    /// Connects and brings the schema up to date.
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        info!("Connecting to database...");
        let mut opts = ConnectOptions::new(uri.to_owned());
        opts.sqlx_logging(false);
        let database_connection = Database::connect(opts).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Database ready.");
        Ok(Self { database_connection })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.database_connection
    }
}
