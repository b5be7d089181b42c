use crate::{entities::visitors, services::ServiceError};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
    sea_query::{Expr, ExprTrait, OnConflict},
};

pub struct VisitorService;

impl VisitorService {
    /// Id of the single counter row
    const COUNTER_ID: i32 = 1;

    /// Current visit count, creating the counter at zero on first use
    pub async fn current(db: &DatabaseConnection) -> Result<i64, ServiceError> {
        Self::ensure_counter(db).await?;
        Ok(Self::read(db).await?)
    }

    /// Adds one visit and returns the new count
    ///
    /// The increment is a single `count = count + 1` statement, so concurrent
    /// visits are never lost.
    pub async fn increment(db: &DatabaseConnection) -> Result<i64, ServiceError> {
        let txn = db.begin().await?;

        Self::ensure_counter(&txn).await?;
        visitors::Entity::update_many()
            .col_expr(
                visitors::Column::Count,
                Expr::col(visitors::Column::Count).add(1),
            )
            .filter(visitors::Column::Id.eq(Self::COUNTER_ID))
            .exec(&txn)
            .await?;
        let count = Self::read(&txn).await?;

        txn.commit().await?;
        Ok(count)
    }

    async fn ensure_counter<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
        visitors::Entity::insert(visitors::ActiveModel {
            id: Set(Self::COUNTER_ID),
            count: Set(0),
        })
        .on_conflict(
            OnConflict::column(visitors::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

        Ok(())
    }

    async fn read<C: ConnectionTrait>(db: &C) -> Result<i64, DbErr> {
        visitors::Entity::find_by_id(Self::COUNTER_ID)
            .one(db)
            .await?
            .map(|row| row.count)
            .ok_or_else(|| DbErr::RecordNotFound("visitor counter".to_owned()))
    }
}
