use sea_orm_migration::prelude::*;

use crate::columns::{pk_id_col, timestamp_col, uuid_col};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .if_not_exists()
                    .table(InstitutionalInfo::Table)
                    .col(pk_id_col(manager, InstitutionalInfo::Id))
                    .col(uuid_col(InstitutionalInfo::Uuid))
                    .col(
                        ColumnDef::new(InstitutionalInfo::Name)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(InstitutionalInfo::Mission).text())
                    .col(ColumnDef::new(InstitutionalInfo::Vision).text())
                    .col(ColumnDef::new(InstitutionalInfo::History).text())
                    .col(ColumnDef::new(InstitutionalInfo::Address).string_len(255))
                    .col(ColumnDef::new(InstitutionalInfo::Phone).string_len(50))
                    .col(ColumnDef::new(InstitutionalInfo::Email).string_len(254))
                    .col(ColumnDef::new(InstitutionalInfo::Website).string_len(200))
                    .col(timestamp_col(InstitutionalInfo::CreatedAt))
                    .col(timestamp_col(InstitutionalInfo::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_institutional_info_uuid")
                    .table(InstitutionalInfo::Table)
                    .col(InstitutionalInfo::Uuid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InstitutionalInfo::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum InstitutionalInfo {
    Table,
    Id,
    Uuid,
    Name,
    Mission,
    Vision,
    History,
    Address,
    Phone,
    Email,
    Website,
    CreatedAt,
    UpdatedAt,
}
