use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Customers::Phone)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Customers::FullName).string().not_null())
                    .col(ColumnDef::new(Customers::Stage).string().not_null())
                    .col(ColumnDef::new(Customers::WaOptIn).boolean().not_null())
                    .col(ColumnDef::new(Customers::LastMessageAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Customers::HealthFormSigned)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Customers::FaceRecognitionId).string())
                    .col(ColumnDef::new(Customers::IsNewClient).boolean().not_null())
                    .col(
                        ColumnDef::new(Customers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Customers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Customers::Table)
                    .col(Customers::Stage)
                    .name("idx_customers_stage")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
    Phone,
    FullName,
    Stage,
    WaOptIn,
    LastMessageAt,
    HealthFormSigned,
    FaceRecognitionId,
    IsNewClient,
    CreatedAt,
    UpdatedAt,
}
