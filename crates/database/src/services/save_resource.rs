use crate::{
    entities::{branches, chapters, resources, semesters, subjects},
    services::{ServiceError, query_resource::QueryResourceService},
};
use log::{debug, info};
use models::resource::ResourceFields;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
    sea_query::OnConflict,
};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Where a new resource should be filed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePlacement {
    pub branch: String,
    pub semester: i32,
    pub subject: String,
    pub chapter: String,
}

/// The resolved chain and the stored resource after an insert
#[derive(Debug, Clone)]
pub struct AddedResource {
    pub branch: branches::Model,
    pub semester: semesters::Model,
    pub subject: subjects::Model,
    pub chapter: chapters::Model,
    pub resource: resources::Model,
}

pub struct SaveResourceService;

impl SaveResourceService {
    /// Files a resource under its chapter, creating any missing level of the hierarchy
    ///
    /// The whole chain is resolved in one transaction. Each level is inserted with
    /// `ON CONFLICT DO NOTHING` against its natural-key index and then read back, so
    /// repeated or concurrent submissions converge on the same rows. The chapter row is
    /// then locked while the new resource's position is taken.
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `placement` - Branch, semester, subject and chapter names
    /// * `fields` - The resource to append
    ///
    /// # Returns
    /// The resolved hierarchy together with the inserted resource
    pub async fn add_resource(
        db: &DatabaseConnection,
        placement: &ResourcePlacement,
        fields: ResourceFields,
    ) -> Result<AddedResource, ServiceError> {
        fields.validate()?;

        let txn = db.begin().await?;

        let branch = Self::get_or_create_branch(&txn, &placement.branch).await?;
        let semester = Self::get_or_create_semester(&txn, branch.id, placement.semester).await?;
        let subject = Self::get_or_create_subject(&txn, semester.id, &placement.subject).await?;
        let chapter = Self::get_or_create_chapter(&txn, subject.id, &placement.chapter).await?;

        let position = Self::next_position(&txn, chapter.id).await?;
        let resource = resources::ActiveModel {
            id: Set(Uuid::new_v4()),
            chapter_id: Set(chapter.id),
            position: Set(position),
            kind: Set(fields.kind),
            link: Set(fields.link),
            link_name: Set(fields.link_name),
            from_secs: Set(fields.from),
            to_secs: Set(fields.to),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "Added {} resource to {}/{}/{}/{}",
            resource.kind.as_str(),
            branch.name,
            semester.number,
            subject.name,
            chapter.name
        );

        Ok(AddedResource {
            branch,
            semester,
            subject,
            chapter,
            resource,
        })
    }

    /// Patches one resource of a chapter that must belong to the given branch and semester
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `branch` - Branch name the chapter is expected under
    /// * `semester` - Semester number the chapter is expected under
    /// * `chapter_id` - Chapter holding the resource
    /// * `resource_id` - Resource to patch
    /// * `updates` - JSON object shallow-merged over the resource's wire fields
    ///
    /// # Returns
    /// The updated resource. A chapter outside the requested scope is reported as not found,
    /// and an invalid merge leaves the stored resource untouched.
    pub async fn update_resource(
        db: &DatabaseConnection,
        branch: &str,
        semester: i32,
        chapter_id: Uuid,
        resource_id: Uuid,
        updates: &Map<String, Value>,
    ) -> Result<resources::Model, ServiceError> {
        let txn = db.begin().await?;

        let chapter = QueryResourceService::find_scoped_chapter(&txn, branch, semester, chapter_id)
            .await?
            .ok_or(ServiceError::NotFound(
                "Chapter not found for the specified branch and semester.",
            ))?;

        let resource = resources::Entity::find_by_id(resource_id)
            .filter(resources::Column::ChapterId.eq(chapter.id))
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("Resource not found."))?;

        let merged = ResourceFields::from(&resource).merge(updates)?;

        let mut active: resources::ActiveModel = resource.into();
        active.kind = Set(merged.kind);
        active.link = Set(merged.link);
        active.link_name = Set(merged.link_name);
        active.from_secs = Set(merged.from);
        active.to_secs = Set(merged.to);

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        debug!("Updated resource {} in chapter {}", updated.id, chapter.name);
        Ok(updated)
    }

    async fn get_or_create_branch(
        txn: &DatabaseTransaction,
        name: &str,
    ) -> Result<branches::Model, DbErr> {
        branches::Entity::insert(branches::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_owned()),
        })
        .on_conflict(
            OnConflict::column(branches::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

        branches::Entity::find()
            .filter(branches::Column::Name.eq(name))
            .one(txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("branch {name}")))
    }

    async fn get_or_create_semester(
        txn: &DatabaseTransaction,
        branch_id: Uuid,
        number: i32,
    ) -> Result<semesters::Model, DbErr> {
        semesters::Entity::insert(semesters::ActiveModel {
            id: Set(Uuid::new_v4()),
            branch_id: Set(branch_id),
            number: Set(number),
        })
        .on_conflict(
            OnConflict::columns([semesters::Column::BranchId, semesters::Column::Number])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

        semesters::Entity::find()
            .filter(semesters::Column::BranchId.eq(branch_id))
            .filter(semesters::Column::Number.eq(number))
            .one(txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("semester {number}")))
    }

    async fn get_or_create_subject(
        txn: &DatabaseTransaction,
        semester_id: Uuid,
        name: &str,
    ) -> Result<subjects::Model, DbErr> {
        subjects::Entity::insert(subjects::ActiveModel {
            id: Set(Uuid::new_v4()),
            semester_id: Set(semester_id),
            name: Set(name.to_owned()),
        })
        .on_conflict(
            OnConflict::columns([subjects::Column::SemesterId, subjects::Column::Name])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

        subjects::Entity::find()
            .filter(subjects::Column::SemesterId.eq(semester_id))
            .filter(subjects::Column::Name.eq(name))
            .one(txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("subject {name}")))
    }

    async fn get_or_create_chapter(
        txn: &DatabaseTransaction,
        subject_id: Uuid,
        name: &str,
    ) -> Result<chapters::Model, DbErr> {
        chapters::Entity::insert(chapters::ActiveModel {
            id: Set(Uuid::new_v4()),
            subject_id: Set(subject_id),
            name: Set(name.to_owned()),
        })
        .on_conflict(
            OnConflict::columns([chapters::Column::SubjectId, chapters::Column::Name])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

        chapters::Entity::find()
            .filter(chapters::Column::SubjectId.eq(subject_id))
            .filter(chapters::Column::Name.eq(name))
            .one(txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("chapter {name}")))
    }

    /// Row lock on the chapter, serializing appends to it
    fn chapter_lock(chapter_id: Uuid) -> Select<chapters::Entity> {
        chapters::Entity::find_by_id(chapter_id).lock_exclusive()
    }

    /// Position one past the chapter's last resource
    ///
    /// Holds the chapter lock until the transaction ends, so concurrent appends read
    /// the maximum one after the other instead of racing for the same slot.
    async fn next_position(txn: &DatabaseTransaction, chapter_id: Uuid) -> Result<i32, DbErr> {
        Self::chapter_lock(chapter_id)
            .one(txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("chapter {chapter_id}")))?;

        let last = resources::Entity::find()
            .filter(resources::Column::ChapterId.eq(chapter_id))
            .order_by_desc(resources::Column::Position)
            .one(txn)
            .await?;

        Ok(last.map_or(0, |resource| resource.position + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_chapter_lock_is_for_update() {
        let sql = SaveResourceService::chapter_lock(Uuid::nil())
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.starts_with(r#"SELECT "chapters"."id""#), "{sql}");
        assert!(sql.ends_with("FOR UPDATE"), "{sql}");
    }
}
