use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Studios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Studios::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Studios::Name).string().not_null())
                    .col(ColumnDef::new(Studios::Url).string().null())
                    .col(ColumnDef::new(Studios::ParentId).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Scenes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scenes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Scenes::Title).string().null())
                    .col(ColumnDef::new(Scenes::Details).text().null())
                    .col(ColumnDef::new(Scenes::Date).string_len(10).null())
                    .col(ColumnDef::new(Scenes::Rating).integer().null())
                    .col(
                        ColumnDef::new(Scenes::Organized)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Scenes::StudioId).integer().null())
                    .col(
                        ColumnDef::new(Scenes::OCounter)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Scenes::PlayCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Scenes::LastPlayedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Scenes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Scenes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scenes_studio_id")
                            .from(Scenes::Table, Scenes::StudioId)
                            .to(Studios::Table, Studios::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Performers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Performers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Performers::Name).string().not_null())
                    .col(ColumnDef::new(Performers::Disambiguation).string().null())
                    .col(ColumnDef::new(Performers::Gender).string_len(32).null())
                    .col(
                        ColumnDef::new(Performers::Favorite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tags::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Tags::Description).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Galleries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Galleries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Galleries::Title).string().null())
                    .col(ColumnDef::new(Galleries::Date).string_len(10).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movies::Name).string().not_null())
                    .col(ColumnDef::new(Movies::Duration).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Files::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Files::Path).string().not_null().unique_key())
                    .col(ColumnDef::new(Files::Size).big_integer().not_null())
                    .col(ColumnDef::new(Files::Duration).double().not_null())
                    .col(ColumnDef::new(Files::Width).integer().not_null())
                    .col(ColumnDef::new(Files::Height).integer().not_null())
                    .col(ColumnDef::new(Files::VideoCodec).string_len(64).null())
                    .col(
                        ColumnDef::new(Files::ModTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Galleries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Performers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Scenes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Studios::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Scenes {
    Table,
    Id,
    Title,
    Details,
    Date,
    Rating,
    Organized,
    StudioId,
    OCounter,
    PlayCount,
    LastPlayedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Studios {
    Table,
    Id,
    Name,
    Url,
    ParentId,
}

#[derive(DeriveIden)]
enum Performers {
    Table,
    Id,
    Name,
    Disambiguation,
    Gender,
    Favorite,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Galleries {
    Table,
    Id,
    Title,
    Date,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Name,
    Duration,
}

#[derive(DeriveIden)]
enum Files {
    Table,
    Id,
    Path,
    Size,
    Duration,
    Width,
    Height,
    VideoCodec,
    ModTime,
}
