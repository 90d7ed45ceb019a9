use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `projects` table and its columns.
#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    ProjectName,
    Technology,
    Category,
    Industry,
    Description,
    PageBuilder,
    ClientName,
    WebsiteLink,
    BidPlatform,
    BidPlatformUrl,
    InvoiceAmount,
    StartDate,
    CompletionDate,
    Testimonials,
    Tag,
    ClientInvoices,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::ProjectName).string().not_null())
                    .col(ColumnDef::new(Projects::Technology).string().not_null())
                    .col(ColumnDef::new(Projects::Category).string().null())
                    .col(ColumnDef::new(Projects::Industry).string().null())
                    .col(ColumnDef::new(Projects::Description).text().null())
                    .col(ColumnDef::new(Projects::PageBuilder).string().null())
                    .col(ColumnDef::new(Projects::ClientName).string().null())
                    .col(ColumnDef::new(Projects::WebsiteLink).text().null())
                    .col(ColumnDef::new(Projects::BidPlatform).string().null())
                    .col(ColumnDef::new(Projects::BidPlatformUrl).text().null())
                    .col(ColumnDef::new(Projects::InvoiceAmount).double().null())
                    .col(ColumnDef::new(Projects::StartDate).date().null())
                    .col(ColumnDef::new(Projects::CompletionDate).date().null())
                    .col(ColumnDef::new(Projects::Testimonials).text().null())
                    .col(
                        ColumnDef::new(Projects::Tag)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Projects::ClientInvoices)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Projects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}
