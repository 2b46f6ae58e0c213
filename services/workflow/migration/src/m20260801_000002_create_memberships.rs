use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Memberships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Memberships::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Memberships::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Memberships::Kind).string().not_null())
                    .col(ColumnDef::new(Memberships::Balance).integer().not_null())
                    .col(
                        ColumnDef::new(Memberships::TotalPurchased)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Memberships::ExpiryDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Memberships::IsActive).boolean().not_null())
                    .col(
                        ColumnDef::new(Memberships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Memberships::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Memberships::Table, Memberships::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Memberships::Table)
                    .col(Memberships::CustomerId)
                    .col(Memberships::Kind)
                    .name("idx_memberships_customer_id_kind")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Memberships::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Memberships {
    Table,
    Id,
    CustomerId,
    Kind,
    Balance,
    TotalPurchased,
    ExpiryDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
}
