use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Projects {
    Table,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Taxonomies {
    Table,
    Kind,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Project names are unique regardless of case.
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_projects_project_name_lower \
             ON projects (lower(project_name))",
        )
        .await?;

        // Taxonomy names are unique per kind regardless of case.
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_taxonomies_kind_name_lower \
             ON taxonomies (kind, lower(name))",
        )
        .await?;

        // Listing pages sort by newest first.
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_created_at")
                    .table(Projects::Table)
                    .col(Projects::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_taxonomies_kind")
                    .table(Taxonomies::Table)
                    .col(Taxonomies::Kind)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_taxonomies_kind").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_taxonomies_kind_name_lower").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_project_name_lower").to_owned())
            .await?;

        Ok(())
    }
}
