use crate::{entities::feedback, services::ServiceError};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use uuid::Uuid;

pub struct FeedbackService;

impl FeedbackService {
    pub async fn submit(
        db: &DatabaseConnection,
        name: &str,
        branch: &str,
        suggestion: &str,
    ) -> Result<feedback::Model, ServiceError> {
        let entry = feedback::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_owned()),
            branch: Set(branch.to_owned()),
            suggestion: Set(suggestion.to_owned()),
        }
        .insert(db)
        .await?;

        Ok(entry)
    }

    pub async fn all(db: &DatabaseConnection) -> Result<Vec<feedback::Model>, ServiceError> {
        Ok(feedback::Entity::find().all(db).await?)
    }
}
