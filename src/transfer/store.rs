use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::projects as project_db;
use crate::error::ApiError;
use crate::models::projects::NewProject;

/// The persistence side of an import: what names exist, and how to create
/// one project. Create errors carry the HTTP status the import reports on.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn project_names(&self) -> Result<Vec<String>, ApiError>;

    async fn create_project(&self, project: NewProject) -> Result<Uuid, ApiError>;
}

#[async_trait]
impl ProjectStore for DatabaseConnection {
    async fn project_names(&self) -> Result<Vec<String>, ApiError> {
        Ok(project_db::get_project_names(self).await?)
    }

    async fn create_project(&self, project: NewProject) -> Result<Uuid, ApiError> {
        project_db::insert_project(self, project)
            .await
            .map(|created| created.id)
    }
}
