use models::event::EventRecord;
use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub date: DateTimeUtc,
    pub holidays: Option<String>,
    pub examination: Option<String>,
    pub academic_activities: Option<String>,
    pub extra_curricular_activities: Option<String>,
    pub special_days_jayantis: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<EventRecord> for ActiveModel {
    fn from(record: EventRecord) -> Self {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            date: Set(record.date),
            holidays: Set(record.holidays),
            examination: Set(record.examination),
            academic_activities: Set(record.academic_activities),
            extra_curricular_activities: Set(record.extra_curricular_activities),
            special_days_jayantis: Set(record.special_days_jayantis),
        }
    }
}
