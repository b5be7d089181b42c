use crate::entities::{branches, chapters, resources, semesters, subjects};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};
use std::collections::HashMap;
use uuid::Uuid;

/// A chapter whose subject → semester → branch chain has been resolved
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ScopedChapter {
    pub id: Uuid,
    pub name: String,
    pub subject_id: Uuid,
    pub subject_name: String,
}

pub type ChapterWithResources = (ScopedChapter, Vec<resources::Model>);

pub struct QueryResourceService;

impl QueryResourceService {
    /// Chapters reachable from the given branch and semester through inner joins
    ///
    /// A chapter with a broken ancestor chain never joins, so it is never selected.
    fn scoped_chapters(branch: &str, semester: i32) -> Select<chapters::Entity> {
        chapters::Entity::find()
            .select_only()
            .column(chapters::Column::Id)
            .column(chapters::Column::Name)
            .column(chapters::Column::SubjectId)
            .column_as(subjects::Column::Name, "subject_name")
            .join(JoinType::InnerJoin, chapters::Relation::Subject.def())
            .join(JoinType::InnerJoin, subjects::Relation::Semester.def())
            .join(JoinType::InnerJoin, semesters::Relation::Branch.def())
            .filter(branches::Column::Name.eq(branch))
            .filter(semesters::Column::Number.eq(semester))
    }

    /// Get every chapter of a branch and semester, with its resources in display order
    ///
    /// # Returns
    /// Chapters ordered by subject then chapter name; empty when nothing matches
    pub async fn get_resources<C: ConnectionTrait>(
        db: &C,
        branch: &str,
        semester: i32,
    ) -> Result<Vec<ChapterWithResources>, DbErr> {
        let chapters = Self::scoped_chapters(branch, semester)
            .order_by_asc(subjects::Column::Name)
            .order_by_asc(chapters::Column::Name)
            .into_model::<ScopedChapter>()
            .all(db)
            .await?;

        if chapters.is_empty() {
            return Ok(vec![]);
        }

        let chapter_ids: Vec<Uuid> = chapters.iter().map(|c| c.id).collect();

        // Batch fetch all resources for all matched chapters
        let resources = resources::Entity::find()
            .filter(resources::Column::ChapterId.is_in(chapter_ids))
            .order_by_asc(resources::Column::Position)
            .all(db)
            .await?;

        let mut resources_by_chapter: HashMap<Uuid, Vec<resources::Model>> = HashMap::new();
        for resource in resources {
            resources_by_chapter
                .entry(resource.chapter_id)
                .or_default()
                .push(resource);
        }

        let results = chapters
            .into_iter()
            .map(|chapter| {
                let chapter_resources = resources_by_chapter
                    .remove(&chapter.id)
                    .unwrap_or_default();
                (chapter, chapter_resources)
            })
            .collect();

        Ok(results)
    }

    /// Get a single chapter by id, but only if it belongs to the given branch and semester
    pub async fn find_scoped_chapter<C: ConnectionTrait>(
        db: &C,
        branch: &str,
        semester: i32,
        chapter_id: Uuid,
    ) -> Result<Option<ScopedChapter>, DbErr> {
        Self::scoped_chapters(branch, semester)
            .filter(chapters::Column::Id.eq(chapter_id))
            .into_model::<ScopedChapter>()
            .one(db)
            .await
    }
}
