//! Create `song` table.
//!
//! Listing filters on group and title by exact match, so both are indexed together.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Song::Table)
                    .if_not_exists()
                    .col(pk_auto(Song::Id))
                    .col(string_len(Song::GroupName, 255).not_null())
                    .col(string_len(Song::Title, 255).not_null())
                    .col(string_len(Song::ReleaseDate, 64).not_null())
                    .col(text(Song::Text).not_null())
                    .col(string_len(Song::Link, 1024).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_song_group_title")
                    .table(Song::Table)
                    .col(Song::GroupName)
                    .col(Song::Title)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Song::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Song {
    Table,
    Id,
    GroupName,
    Title,
    ReleaseDate,
    Text,
    Link,
}
