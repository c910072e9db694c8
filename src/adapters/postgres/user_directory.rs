//! PostgreSQL implementation of UserDirectory.
//!
//! The rating aggregate lives on the users table as (rating_sum,
//! rating_count). `record_rating` increments both in one UPDATE; the
//! increment commutes, so concurrent raters of the same user can never
//! lose each other's writes.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder, Row};

use crate::domain::foundation::{DomainError, ErrorCode, RatingValue, Timestamp, UserId};
use crate::domain::rating::RatingAggregate;
use crate::ports::{UserDirectory, UserFilter, UserProfile};

/// PostgreSQL implementation of UserDirectory.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a new PostgresUserDirectory.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, email, name, location, bio, skills_offered, skills_wanted, \
                            is_available, rating_sum, rating_count, created_at";

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn get_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch user: {}", e),
                )
            })?;

        row.map(row_to_profile).transpose()
    }

    async fn list(
        &self,
        filter: &UserFilter,
        exclude: &UserId,
    ) -> Result<Vec<UserProfile>, DomainError> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {} FROM users WHERE id <> ",
            USER_COLUMNS
        ));
        query.push_bind(exclude.as_str());

        if let Some(search) = &filter.search {
            let pattern = like_pattern(search);
            query.push(" AND (name ILIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR email ILIKE ");
            query.push_bind(pattern);
            query.push(")");
        }
        if let Some(skill) = &filter.skill {
            let pattern = like_pattern(skill);
            // skills are text arrays; match any element
            query.push(" AND (EXISTS (SELECT 1 FROM unnest(skills_offered) s WHERE s ILIKE ");
            query.push_bind(pattern.clone());
            query.push(") OR EXISTS (SELECT 1 FROM unnest(skills_wanted) s WHERE s ILIKE ");
            query.push_bind(pattern);
            query.push("))");
        }
        if let Some(location) = &filter.location {
            query.push(" AND location ILIKE ");
            query.push_bind(like_pattern(location));
        }
        if let Some(available) = filter.available {
            query.push(" AND is_available = ");
            query.push_bind(available);
        }
        query.push(" ORDER BY created_at DESC");

        let rows = query.build().fetch_all(&self.pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list users: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_profile).collect()
    }

    async fn record_rating(
        &self,
        id: &UserId,
        value: RatingValue,
    ) -> Result<RatingAggregate, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET rating_sum = rating_sum + $2,
                rating_count = rating_count + 1
            WHERE id = $1
            RETURNING rating_sum, rating_count
            "#,
        )
        .bind(id.as_str())
        .bind(i64::from(value.value()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to record rating: {}", e),
            )
        })?;

        let Some(row) = row else {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", id),
            ));
        };

        let sum: i64 = row.try_get("rating_sum").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get rating_sum: {}", e),
            )
        })?;
        let count: i64 = row.try_get("rating_count").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get rating_count: {}", e),
            )
        })?;

        Ok(RatingAggregate::from_parts(sum, count))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn like_pattern(term: &str) -> String {
    format!("%{}%", term.replace('%', "\\%").replace('_', "\\_"))
}

fn row_to_profile(row: PgRow) -> Result<UserProfile, DomainError> {
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

    let id: String = col(&row, "id")?;
    let email: String = col(&row, "email")?;
    let name: String = col(&row, "name")?;
    let location: Option<String> = col(&row, "location")?;
    let bio: Option<String> = col(&row, "bio")?;
    let skills_offered: Vec<String> = col(&row, "skills_offered")?;
    let skills_wanted: Vec<String> = col(&row, "skills_wanted")?;
    let is_available: bool = col(&row, "is_available")?;
    let rating_sum: i64 = col(&row, "rating_sum")?;
    let rating_count: i64 = col(&row, "rating_count")?;
    let created_at: chrono::DateTime<chrono::Utc> = col(&row, "created_at")?;

    Ok(UserProfile {
        id: UserId::new(id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
        })?,
        email,
        name,
        location,
        bio,
        skills_offered,
        skills_wanted,
        is_available,
        rating: RatingAggregate::from_parts(rating_sum, rating_count),
        created_at: Timestamp::from_datetime(created_at),
    })
}
