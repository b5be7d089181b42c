use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Natural keys of the hierarchy, also the conflict targets of the get-or-create inserts
        manager
            .create_index(
                Index::create()
                    .name("idx_branches_name")
                    .table(Branches::Table)
                    .col(Branches::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_semesters_branch_id_number")
                    .table(Semesters::Table)
                    .col(Semesters::BranchId)
                    .col(Semesters::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subjects_semester_id_name")
                    .table(Subjects::Table)
                    .col(Subjects::SemesterId)
                    .col(Subjects::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chapters_subject_id_name")
                    .table(Chapters::Table)
                    .col(Chapters::SubjectId)
                    .col(Chapters::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Display order of resources within a chapter
        manager
            .create_index(
                Index::create()
                    .name("idx_resources_chapter_id_position")
                    .table(Resources::Table)
                    .col(Resources::ChapterId)
                    .col(Resources::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One event row per day
        manager
            .create_index(
                Index::create()
                    .name("idx_events_date")
                    .table(Events::Table)
                    .col(Events::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_events_date",
            "idx_resources_chapter_id_position",
            "idx_chapters_subject_id_name",
            "idx_subjects_semester_id_name",
            "idx_semesters_branch_id_number",
            "idx_branches_name",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Branches {
    Table,
    Name,
}

#[derive(Iden)]
enum Semesters {
    Table,
    BranchId,
    Number,
}

#[derive(Iden)]
enum Subjects {
    Table,
    SemesterId,
    Name,
}

#[derive(Iden)]
enum Chapters {
    Table,
    SubjectId,
    Name,
}

#[derive(Iden)]
enum Resources {
    Table,
    ChapterId,
    Position,
}

#[derive(Iden)]
enum Events {
    Table,
    Date,
}
