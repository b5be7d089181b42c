use crate::{entities::events, services::ServiceError};
use chrono::{DateTime, Utc};
use log::{debug, info};
use models::{
    event::EventRecord,
    event_date::{day_bounds, next_day},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

pub struct EventService;

impl EventService {
    const BATCH_SIZE: usize = 200;

    /// Inserts a batch of calendar events atomically
    ///
    /// Rows are written in chunks inside a single transaction. If any chunk fails,
    /// for example because a date is already stored, nothing from the batch is kept.
    ///
    /// # Returns
    /// The number of events inserted
    pub async fn insert_events(
        db: &DatabaseConnection,
        records: Vec<EventRecord>,
    ) -> Result<u64, ServiceError> {
        let total = records.len();
        if total == 0 {
            return Ok(0);
        }

        info!(
            "Inserting {} events in batches of {}",
            total,
            Self::BATCH_SIZE
        );

        let txn = db.begin().await?;

        let rows: Vec<events::ActiveModel> = records.into_iter().map(Into::into).collect();
        for (batch_idx, batch) in rows.chunks(Self::BATCH_SIZE).enumerate() {
            events::Entity::insert_many(batch.to_vec())
                .exec_without_returning(&txn)
                .await?;
            debug!(
                "Inserted event batch {}/{}",
                batch_idx + 1,
                total.div_ceil(Self::BATCH_SIZE)
            );
        }

        txn.commit().await?;
        info!("Inserted {total} events");

        Ok(total as u64)
    }

    /// Stores one event on the start of its UTC calendar day
    ///
    /// The time of day is dropped so a day never holds two events; a second event
    /// for the same day is a `Conflict`.
    pub async fn create_event(
        db: &DatabaseConnection,
        mut record: EventRecord,
    ) -> Result<events::Model, ServiceError> {
        record.date = day_bounds(record.date).0;

        let event = events::ActiveModel::from(record).insert(db).await?;
        debug!("Created event {} on {}", event.id, event.date);
        Ok(event)
    }

    /// Every stored event, earliest first
    pub async fn all_events(db: &DatabaseConnection) -> Result<Vec<events::Model>, ServiceError> {
        Ok(events::Entity::find()
            .order_by_asc(events::Column::Date)
            .all(db)
            .await?)
    }

    /// Events falling on the UTC calendar day of `day`
    ///
    /// The day is matched as the half-open range `[00:00:00, next 00:00:00)`.
    pub async fn events_on(
        db: &DatabaseConnection,
        day: DateTime<Utc>,
    ) -> Result<Vec<events::Model>, ServiceError> {
        let (start, end) = day_bounds(day);

        Ok(events::Entity::find()
            .filter(events::Column::Date.gte(start))
            .filter(events::Column::Date.lt(end))
            .order_by_asc(events::Column::Date)
            .all(db)
            .await?)
    }

    /// Moves every event forward by one day
    ///
    /// Latest dates are shifted first so the unique date index never sees two rows
    /// on the same day mid-update.
    ///
    /// # Returns
    /// The shifted events, earliest first
    pub async fn shift_all_dates(
        db: &DatabaseConnection,
    ) -> Result<Vec<events::Model>, ServiceError> {
        let txn = db.begin().await?;

        let existing = events::Entity::find()
            .order_by_desc(events::Column::Date)
            .all(&txn)
            .await?;

        if existing.is_empty() {
            return Err(ServiceError::NotFound("No events found."));
        }

        let mut shifted = Vec::with_capacity(existing.len());
        for event in existing {
            let date = next_day(event.date);
            let mut active: events::ActiveModel = event.into();
            active.date = Set(date);
            shifted.push(active.update(&txn).await?);
        }

        txn.commit().await?;
        info!("Shifted {} events by one day", shifted.len());

        shifted.reverse();
        Ok(shifted)
    }

    /// Removes every event
    ///
    /// # Returns
    /// How many events were deleted
    pub async fn delete_all(db: &DatabaseConnection) -> Result<u64, ServiceError> {
        let result = events::Entity::delete_many().exec(db).await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("No events found to delete."));
        }

        info!("Deleted {} events", result.rows_affected);
        Ok(result.rows_affected)
    }
}
