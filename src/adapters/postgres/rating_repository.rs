//! PostgreSQL implementation of SwapRatingRepository.
//!
//! The (swap_request_id, rater_id) unique constraint is the authority on
//! duplicates: a violated insert maps to `DuplicateRating` and no aggregate
//! write happens for the loser.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, RatingId, RatingValue, SwapRequestId, Timestamp, UserId,
};
use crate::domain::rating::SwapRating;
use crate::ports::SwapRatingRepository;

/// PostgreSQL implementation of SwapRatingRepository.
#[derive(Clone)]
pub struct PostgresSwapRatingRepository {
    pool: PgPool,
}

impl PostgresSwapRatingRepository {
    /// Creates a new PostgresSwapRatingRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SwapRatingRepository for PostgresSwapRatingRepository {
    async fn save(&self, rating: &SwapRating) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO swap_ratings (
                id, swap_request_id, rater_id, rated_user_id, rating, comment, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(rating.id().as_uuid())
        .bind(rating.swap_request_id().as_uuid())
        .bind(rating.rater().as_str())
        .bind(rating.rated_user().as_str())
        .bind(rating.value().value())
        .bind(rating.comment())
        .bind(rating.created_at().as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(DomainError::new(
                ErrorCode::DuplicateRating,
                format!(
                    "A rating for swap request {} by this rater already exists",
                    rating.swap_request_id()
                ),
            )),
            Err(e) => Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert rating: {}", e),
            )),
        }
    }

    async fn find_for_rater(
        &self,
        id: &RatingId,
        rater: &UserId,
    ) -> Result<Option<SwapRating>, DomainError> {
        let row = sqlx::query(
            "SELECT id, swap_request_id, rater_id, rated_user_id, rating, comment, created_at \
             FROM swap_ratings WHERE id = $1 AND rater_id = $2",
        )
        .bind(id.as_uuid())
        .bind(rater.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch rating: {}", e),
            )
        })?;

        row.map(row_to_rating).transpose()
    }

    async fn list_by_rater(&self, rater: &UserId) -> Result<Vec<SwapRating>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, swap_request_id, rater_id, rated_user_id, rating, comment, created_at \
             FROM swap_ratings WHERE rater_id = $1 ORDER BY created_at DESC",
        )
        .bind(rater.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list ratings: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_rating).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Postgres SQLSTATE 23505.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}

fn row_to_rating(row: PgRow) -> Result<SwapRating, DomainError> {
    fn col<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
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

    let id: uuid::Uuid = col(&row, "id")?;
    let swap_request_id: uuid::Uuid = col(&row, "swap_request_id")?;
    let rater: String = col(&row, "rater_id")?;
    let rated_user: String = col(&row, "rated_user_id")?;
    let value: i16 = col(&row, "rating")?;
    let comment: Option<String> = col(&row, "comment")?;
    let created_at: chrono::DateTime<chrono::Utc> = col(&row, "created_at")?;

    let value = RatingValue::try_from_i16(value)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid rating: {}", e)))?;
    let parse_user = |raw: String| {
        UserId::new(raw).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
        })
    };

    Ok(SwapRating::reconstitute(
        RatingId::from_uuid(id),
        SwapRequestId::from_uuid(swap_request_id),
        parse_user(rater)?,
        parse_user(rated_user)?,
        value,
        comment,
        Timestamp::from_datetime(created_at),
    ))
}
