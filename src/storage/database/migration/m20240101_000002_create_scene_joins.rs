use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Scene join tables as (table, other id column, other table)
const JOINS: [(&str, &str, &str); 5] = [
    ("scenes_performers", "performer_id", "performers"),
    ("scenes_tags", "tag_id", "tags"),
    ("scenes_galleries", "gallery_id", "galleries"),
    ("scenes_movies", "movie_id", "movies"),
    ("scenes_files", "file_id", "files"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, column_name, target) in JOINS {
            let table = Alias::new(name);
            let column = Alias::new(column_name);
            let mut create = Table::create();
            create
                .table(table.clone())
                .if_not_exists()
                .col(ColumnDef::new(SceneJoin::SceneId).integer().not_null())
                .col(ColumnDef::new(column.clone()).integer().not_null())
                .primary_key(Index::create().col(SceneJoin::SceneId).col(column.clone()))
                .foreign_key(
                    ForeignKey::create()
                        .name(format!("fk_{name}_scene_id"))
                        .from(table.clone(), SceneJoin::SceneId)
                        .to(SceneJoin::Scenes, SceneJoin::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name(format!("fk_{name}_{column_name}"))
                        .from(table.clone(), column.clone())
                        .to(Alias::new(target), SceneJoin::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                );

            match name {
                "scenes_movies" => {
                    create.col(ColumnDef::new(SceneJoin::SceneIndex).integer().null());
                }
                "scenes_files" => {
                    create.col(
                        ColumnDef::new(SceneJoin::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    );
                }
                _ => {}
            }

            manager.create_table(create.to_owned()).await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(format!("idx_{name}_{column_name}"))
                        .table(table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _, _) in JOINS {
            manager
                .drop_table(Table::drop().table(Alias::new(name)).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum SceneJoin {
    Scenes,
    Id,
    SceneId,
    SceneIndex,
    IsPrimary,
}
