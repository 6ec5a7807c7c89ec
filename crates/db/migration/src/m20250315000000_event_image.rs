use sea_orm_migration::prelude::*;

use crate::guard;

/// Must be recorded as applied before this step runs.
pub const DEPENDS_ON: &str = "m20250301000000_institutional_info";

pub const TABLE: &str = "events";
pub const COLUMN: &str = "image";
/// Longest stored path, `events/` prefix included.
pub const MAX_LENGTH: u32 = 100;
pub const UPLOAD_TO: &str = "events/";
pub const HELP_TEXT: &str = "Event image";

/// Adds the optional `image` reference to events.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let name = self.name();
        guard::ensure_applied(manager, name, DEPENDS_ON).await?;
        guard::ensure_column_absent(manager, name, TABLE, COLUMN).await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Events::Table)
                    .add_column(ColumnDef::new(Events::Image).string_len(MAX_LENGTH).null())
                    .to_owned(),
            )
            .await?;

        tracing::info!(table = TABLE, column = COLUMN, "Added event image column");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        guard::ensure_column_present(manager, self.name(), TABLE, COLUMN).await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Events::Table)
                    .drop_column(Events::Image)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Image,
}
