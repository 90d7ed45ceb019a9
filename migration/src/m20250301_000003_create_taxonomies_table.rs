use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Categories, technologies, tags and industries share one table keyed by `kind`.
#[derive(DeriveIden)]
enum Taxonomies {
    Table,
    Id,
    Kind,
    Name,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Taxonomies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Taxonomies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Taxonomies::Kind).string().not_null())
                    .col(ColumnDef::new(Taxonomies::Name).string().not_null())
                    .col(
                        ColumnDef::new(Taxonomies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Taxonomies::Table).to_owned())
            .await
    }
}
