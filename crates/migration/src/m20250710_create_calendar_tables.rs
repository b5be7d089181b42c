use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create events table, one row per calendar day
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Events::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::Holidays).text())
                    .col(ColumnDef::new(Events::Examination).text())
                    .col(ColumnDef::new(Events::AcademicActivities).text())
                    .col(ColumnDef::new(Events::ExtraCurricularActivities).text())
                    .col(ColumnDef::new(Events::SpecialDaysJayantis).text())
                    .to_owned(),
            )
            .await?;

        // Create feedback table
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Feedback::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Feedback::Name).string().not_null())
                    .col(ColumnDef::new(Feedback::Branch).string().not_null())
                    .col(ColumnDef::new(Feedback::Suggestion).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Create visitors table, holding a single counter row
        manager
            .create_table(
                Table::create()
                    .table(Visitors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visitors::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Visitors::Count)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visitors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
    Date,
    Holidays,
    Examination,
    AcademicActivities,
    ExtraCurricularActivities,
    SpecialDaysJayantis,
}

#[derive(Iden)]
enum Feedback {
    Table,
    Id,
    Name,
    Branch,
    Suggestion,
}

#[derive(Iden)]
enum Visitors {
    Table,
    Id,
    Count,
}
