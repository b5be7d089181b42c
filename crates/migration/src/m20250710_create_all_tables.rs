use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create branches table
        manager
            .create_table(
                Table::create()
                    .table(Branches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Branches::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Branches::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create semesters table
        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Semesters::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Semesters::BranchId).uuid().not_null())
                    .col(ColumnDef::new(Semesters::Number).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-semesters-branch_id")
                            .from(Semesters::Table, Semesters::BranchId)
                            .to(Branches::Table, Branches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create subjects table
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subjects::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Subjects::SemesterId).uuid().not_null())
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-subjects-semester_id")
                            .from(Subjects::Table, Subjects::SemesterId)
                            .to(Semesters::Table, Semesters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create chapters table
        manager
            .create_table(
                Table::create()
                    .table(Chapters::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Chapters::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Chapters::SubjectId).uuid().not_null())
                    .col(ColumnDef::new(Chapters::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-chapters-subject_id")
                            .from(Chapters::Table, Chapters::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create resources table, one row per resource listed under a chapter
        manager
            .create_table(
                Table::create()
                    .table(Resources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Resources::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Resources::ChapterId).uuid().not_null())
                    .col(ColumnDef::new(Resources::Position).integer().not_null())
                    .col(ColumnDef::new(Resources::Kind).text().not_null())
                    .col(ColumnDef::new(Resources::Link).text().not_null())
                    .col(ColumnDef::new(Resources::LinkName).string())
                    .col(ColumnDef::new(Resources::FromSecs).integer())
                    .col(ColumnDef::new(Resources::ToSecs).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-resources-chapter_id")
                            .from(Resources::Table, Resources::ChapterId)
                            .to(Chapters::Table, Chapters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Resources::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Chapters::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Branches::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Branches {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Semesters {
    Table,
    Id,
    BranchId,
    Number,
}

#[derive(Iden)]
enum Subjects {
    Table,
    Id,
    SemesterId,
    Name,
}

#[derive(Iden)]
enum Chapters {
    Table,
    Id,
    SubjectId,
    Name,
}

#[derive(Iden)]
enum Resources {
    Table,
    Id,
    ChapterId,
    Position,
    Kind,
    Link,
    LinkName,
    FromSecs,
    ToSecs,
}
