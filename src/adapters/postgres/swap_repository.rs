//! PostgreSQL implementation of SwapRequestRepository.
//!
//! Lifecycle transitions are a single conditional UPDATE: the WHERE clause
//! carries the permitted source statuses and the actor role column required
//! by the action, so the status check and the status write cannot be
//! interleaved by a concurrent caller. Zero rows updated means the predicate
//! did not match.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, SwapRequestId, SwapStatus, Timestamp, UserId,
};
use crate::domain::swap::{ActorRule, SwapAction, SwapRequest};
use crate::ports::SwapRequestRepository;

/// PostgreSQL implementation of SwapRequestRepository.
#[derive(Clone)]
pub struct PostgresSwapRequestRepository {
    pool: PgPool,
}

impl PostgresSwapRequestRepository {
    /// Creates a new PostgresSwapRequestRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SWAP_COLUMNS: &str = "id, requester_id, recipient_id, requested_skill, offered_skill, \
                            message, status, created_at, updated_at";

#[async_trait]
impl SwapRequestRepository for PostgresSwapRequestRepository {
    async fn save(&self, swap: &SwapRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO swap_requests (
                id, requester_id, recipient_id, requested_skill, offered_skill,
                message, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(swap.id().as_uuid())
        .bind(swap.requester().as_str())
        .bind(swap.recipient().as_str())
        .bind(swap.requested_skill())
        .bind(swap.offered_skill())
        .bind(swap.message())
        .bind(swap.status().as_str())
        .bind(swap.created_at().as_datetime())
        .bind(swap.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert swap request: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &SwapRequestId,
    ) -> Result<Option<SwapRequest>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM swap_requests WHERE id = $1",
            SWAP_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch swap request: {}", e),
            )
        })?;

        row.map(row_to_swap).transpose()
    }

    async fn find_visible(
        &self,
        id: &SwapRequestId,
        caller: &UserId,
    ) -> Result<Option<SwapRequest>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM swap_requests \
             WHERE id = $1 AND (requester_id = $2 OR recipient_id = $2)",
            SWAP_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(caller.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch swap request: {}", e),
            )
        })?;

        row.map(row_to_swap).transpose()
    }

    async fn list_visible(&self, caller: &UserId) -> Result<Vec<SwapRequest>, DomainError> {
        self.list_where("requester_id = $1 OR recipient_id = $1", caller)
            .await
    }

    async fn list_sent(&self, caller: &UserId) -> Result<Vec<SwapRequest>, DomainError> {
        self.list_where("requester_id = $1", caller).await
    }

    async fn list_received(&self, caller: &UserId) -> Result<Vec<SwapRequest>, DomainError> {
        self.list_where("recipient_id = $1", caller).await
    }

    async fn transition(
        &self,
        id: &SwapRequestId,
        caller: &UserId,
        action: SwapAction,
    ) -> Result<Option<SwapRequest>, DomainError> {
        let role_predicate = match action.actor_rule() {
            ActorRule::RequesterOnly => "requester_id = $2",
            ActorRule::RecipientOnly => "recipient_id = $2",
            ActorRule::EitherParticipant => "(requester_id = $2 OR recipient_id = $2)",
        };
        let permitted: Vec<String> = action
            .permitted_from()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        let row = sqlx::query(&format!(
            "UPDATE swap_requests \
             SET status = $3, updated_at = $4 \
             WHERE id = $1 AND {} AND status = ANY($5) \
             RETURNING {}",
            role_predicate, SWAP_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(caller.as_str())
        .bind(action.target().as_str())
        .bind(Timestamp::now().as_datetime())
        .bind(&permitted)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to transition swap request: {}", e),
            )
        })?;

        row.map(row_to_swap).transpose()
    }

    async fn update(&self, swap: &SwapRequest) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE swap_requests SET
                message = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(swap.id().as_uuid())
        .bind(swap.message())
        .bind(swap.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update swap request: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SwapRequestNotFound,
                format!("Swap request not found: {}", swap.id()),
            ));
        }

        Ok(())
    }

    async fn delete_visible(
        &self,
        id: &SwapRequestId,
        caller: &UserId,
    ) -> Result<bool, DomainError> {
        // Ratings referencing the swap go with it (ON DELETE CASCADE).
        let result = sqlx::query(
            "DELETE FROM swap_requests \
             WHERE id = $1 AND (requester_id = $2 OR recipient_id = $2)",
        )
        .bind(id.as_uuid())
        .bind(caller.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to delete swap request: {}", e),
            )
        })?;

        Ok(result.rows_affected() > 0)
    }
}

impl PostgresSwapRequestRepository {
    async fn list_where(
        &self,
        predicate: &str,
        caller: &UserId,
    ) -> Result<Vec<SwapRequest>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM swap_requests WHERE {} ORDER BY created_at DESC",
            SWAP_COLUMNS, predicate
        ))
        .bind(caller.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list swap requests: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_swap).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn get_col<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

fn parse_user_id(raw: String) -> Result<UserId, DomainError> {
    UserId::new(raw)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e)))
}

fn row_to_swap(row: PgRow) -> Result<SwapRequest, DomainError> {
    let id: uuid::Uuid = get_col(&row, "id")?;
    let requester: String = get_col(&row, "requester_id")?;
    let recipient: String = get_col(&row, "recipient_id")?;
    let requested_skill: String = get_col(&row, "requested_skill")?;
    let offered_skill: String = get_col(&row, "offered_skill")?;
    let message: Option<String> = get_col(&row, "message")?;
    let status_str: String = get_col(&row, "status")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_col(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = get_col(&row, "updated_at")?;

    let status = SwapStatus::from_str(&status_str).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid swap status: {}", e),
        )
    })?;

    Ok(SwapRequest::reconstitute(
        SwapRequestId::from_uuid(id),
        parse_user_id(requester)?,
        parse_user_id(recipient)?,
        requested_skill,
        offered_skill,
        message,
        status,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_role_predicate_column() {
        // The transition SQL is assembled from these; keep them in sync
        // with the schema's column names.
        for action in [
            SwapAction::Accept,
            SwapAction::Reject,
            SwapAction::Complete,
            SwapAction::Cancel,
        ] {
            let predicate = match action.actor_rule() {
                ActorRule::RequesterOnly => "requester_id = $2",
                ActorRule::RecipientOnly => "recipient_id = $2",
                ActorRule::EitherParticipant => "(requester_id = $2 OR recipient_id = $2)",
            };
            assert!(predicate.contains("_id = $2"));
            assert!(!action.permitted_from().is_empty());
        }
    }
}
