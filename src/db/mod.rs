pub mod projects;
pub mod taxonomies;
pub mod users;

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Create a SeaORM database connection pool.
pub async fn create_pool(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
