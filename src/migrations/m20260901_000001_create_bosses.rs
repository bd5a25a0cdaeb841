//! Migration: Create bosses table

use sea_orm_migration::prelude::*;

/// Stored forms of the boss status; NULL means not started
const STATUS_VALUES: [&str; 3] = ["Not Started", "In Progress", "Completed"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bosses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bosses::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bosses::Name).string().not_null())
                    .col(
                        ColumnDef::new(Bosses::Status)
                            .string_len(16)
                            .null()
                            // Rows written outside the app must still decode
                            .check(Expr::col(Bosses::Status).is_in(STATUS_VALUES)),
                    )
                    .col(ColumnDef::new(Bosses::StartTime).string_len(16).null())
                    .col(ColumnDef::new(Bosses::EndTime).string_len(16).null())
                    .col(ColumnDef::new(Bosses::LevelEmily).integer().null())
                    .col(ColumnDef::new(Bosses::LevelAgent).integer().null())
                    .col(
                        ColumnDef::new(Bosses::DeathCountEmily)
                            .integer()
                            .null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Bosses::DeathCountAgent)
                            .integer()
                            .null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Bosses::ClipLink).text().null())
                    .col(ColumnDef::new(Bosses::OrderIndex).integer().not_null())
                    .col(
                        ColumnDef::new(Bosses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bosses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bosses_order_index")
                    .table(Bosses::Table)
                    .col(Bosses::OrderIndex)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bosses::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bosses {
    Table,
    Id,
    Name,
    Status,
    #[iden = "start_time"]
    StartTime,
    #[iden = "end_time"]
    EndTime,
    #[iden = "level_emily"]
    LevelEmily,
    #[iden = "level_agent"]
    LevelAgent,
    #[iden = "death_count_emily"]
    DeathCountEmily,
    #[iden = "death_count_agent"]
    DeathCountAgent,
    #[iden = "clip_link"]
    ClipLink,
    #[iden = "order_index"]
    OrderIndex,
    #[iden = "created_at"]
    CreatedAt,
    #[iden = "updated_at"]
    UpdatedAt,
}
