//! PostgreSQL adapter for ReviewableStore
//!
//! Reads the `reviewables`, `users` and `group_users` tables with raw
//! statements. System users (id <= 0) are never listed as recipients.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, FromQueryResult, Statement,
    Value,
};

use crate::domain::entities::{
    GroupId, Reviewable, ReviewableId, ReviewableStatus, Role, UserId, UserRecord,
};
use crate::domain::ports::ReviewableStore;
use crate::error::DomainError;

const REVIEWABLE_COLUMNS: &str = "SELECT id, score, status, reviewable_by_moderator, \
     reviewable_by_group_id FROM reviewables";

const USER_COLUMNS: &str = "SELECT u.id, u.admin, u.moderator, \
     COALESCE(array_agg(gu.group_id) FILTER (WHERE gu.group_id IS NOT NULL), '{}')::bigint[] \
     AS group_ids \
     FROM users u LEFT JOIN group_users gu ON gu.user_id = u.id";

#[derive(Debug, FromQueryResult)]
struct ReviewableRow {
    id: i64,
    score: f64,
    status: i32,
    reviewable_by_moderator: bool,
    reviewable_by_group_id: Option<i64>,
}

impl TryFrom<ReviewableRow> for Reviewable {
    type Error = DomainError;

    fn try_from(row: ReviewableRow) -> Result<Self, Self::Error> {
        let status = ReviewableStatus::try_from(row.status).map_err(DomainError::Internal)?;
        Ok(Reviewable {
            id: ReviewableId(row.id),
            priority: row.score.max(0.0),
            moderator_visible: row.reviewable_by_moderator,
            owner_group: row.reviewable_by_group_id.map(GroupId),
            status,
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: i64,
    admin: bool,
    moderator: bool,
    group_ids: Vec<i64>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: UserId(row.id),
            role: Role::from_flags(row.admin, row.moderator),
            group_ids: row.group_ids.into_iter().map(GroupId).collect(),
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct WatermarkRow {
    id: i64,
    last_seen_reviewable_id: i64,
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

fn statement<I>(sql: String, values: I) -> Statement
where
    I: IntoIterator<Item = Value>,
{
    Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, values)
}

/// PostgreSQL implementation of ReviewableStore
pub struct PostgresReviewableStore {
    db: DatabaseConnection,
}

impl PostgresReviewableStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_users(
        &self,
        filter: &str,
        values: Vec<Value>,
    ) -> Result<Vec<UserRecord>, DomainError> {
        let sql = format!(
            "{} WHERE u.id > 0 AND {} GROUP BY u.id ORDER BY u.id",
            USER_COLUMNS, filter
        );
        let rows = UserRow::find_by_statement(statement(sql, values))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }
}

#[async_trait]
impl ReviewableStore for PostgresReviewableStore {
    async fn get_reviewable(&self, id: &ReviewableId) -> Result<Option<Reviewable>, DomainError> {
        let sql = format!("{} WHERE id = $1", REVIEWABLE_COLUMNS);
        let row = ReviewableRow::find_by_statement(statement(sql, [id.0.into()]))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        row.map(Reviewable::try_from).transpose()
    }

    async fn list_visible_candidates(
        &self,
        min_priority: f64,
    ) -> Result<Vec<Reviewable>, DomainError> {
        let sql = format!(
            "{} WHERE status = $1 AND score >= $2 ORDER BY id",
            REVIEWABLE_COLUMNS
        );
        let rows = ReviewableRow::find_by_statement(statement(
            sql,
            [ReviewableStatus::Pending.code().into(), min_priority.into()],
        ))
        .all(&self.db)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Reviewable::try_from).collect()
    }

    async fn list_admins(&self) -> Result<Vec<UserRecord>, DomainError> {
        self.list_users("u.admin", Vec::new()).await
    }

    async fn list_moderators(&self) -> Result<Vec<UserRecord>, DomainError> {
        self.list_users("u.moderator", Vec::new()).await
    }

    async fn list_group_members(
        &self,
        group_id: &GroupId,
    ) -> Result<Vec<UserRecord>, DomainError> {
        self.list_users(
            "u.id IN (SELECT user_id FROM group_users WHERE group_id = $1)",
            vec![group_id.0.into()],
        )
        .await
    }

    async fn get_recipient_watermark(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ReviewableId>, DomainError> {
        let row = self
            .db
            .query_one(statement(
                "SELECT last_seen_reviewable_id FROM users WHERE id = $1".to_string(),
                [user_id.0.into()],
            ))
            .await
            .map_err(db_err)?;

        match row {
            Some(row) => {
                let seen: Option<i64> = row
                    .try_get("", "last_seen_reviewable_id")
                    .map_err(db_err)?;
                Ok(seen.map(ReviewableId))
            }
            None => Ok(None),
        }
    }

    async fn get_recipient_watermarks(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, ReviewableId>, DomainError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let ids: Vec<i64> = user_ids.iter().map(|u| u.0).collect();
        let rows = WatermarkRow::find_by_statement(statement(
            "SELECT id, last_seen_reviewable_id FROM users \
             WHERE id = ANY($1) AND last_seen_reviewable_id IS NOT NULL"
                .to_string(),
            [ids.into()],
        ))
        .all(&self.db)
        .await
        .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| (UserId(row.id), ReviewableId(row.last_seen_reviewable_id)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_scores_are_clamped() {
        let reviewable = Reviewable::try_from(ReviewableRow {
            id: 1,
            score: -3.0,
            status: 0,
            reviewable_by_moderator: true,
            reviewable_by_group_id: Some(4),
        })
        .unwrap();
        assert_eq!(reviewable.priority, 0.0);
        assert_eq!(reviewable.owner_group, Some(GroupId(4)));
        assert!(reviewable.is_pending());
    }

    #[test]
    fn unknown_status_is_an_internal_error() {
        let result = Reviewable::try_from(ReviewableRow {
            id: 1,
            score: 1.0,
            status: 42,
            reviewable_by_moderator: false,
            reviewable_by_group_id: None,
        });
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }

    #[test]
    fn user_rows_map_flags_to_roles() {
        let record = UserRecord::from(UserRow {
            id: 8,
            admin: true,
            moderator: true,
            group_ids: vec![3, 1],
        });
        assert_eq!(record.role, Role::Admin);
        assert_eq!(
            record.group_ids.into_iter().collect::<Vec<_>>(),
            vec![GroupId(1), GroupId(3)]
        );
    }
}
