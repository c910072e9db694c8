//! In-memory adapters for the repository and directory ports.
//!
//! Used by tests and local development. Every operation takes the store
//! mutex for its full read-check-write, so these adapters give the same
//! atomicity guarantees as the Postgres adapters: transitions have at most
//! one winner and aggregate increments never lose updates.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{
    DomainError, ErrorCode, RatingId, RatingValue, SwapRequestId, UserId,
};
use crate::domain::rating::{RatingAggregate, SwapRating};
use crate::domain::swap::{transition, SwapAction, SwapRequest};
use crate::ports::{
    SwapRatingRepository, SwapRequestRepository, UserDirectory, UserFilter, UserProfile,
};

// ════════════════════════════════════════════════════════════════════════════
// Swap requests
// ════════════════════════════════════════════════════════════════════════════

/// In-memory implementation of `SwapRequestRepository`.
#[derive(Default)]
pub struct InMemorySwapRequestRepository {
    swaps: Mutex<Vec<SwapRequest>>,
    /// Rating store to cascade deletes into, mirroring the FK cascade.
    rating_cascade: Option<Arc<InMemorySwapRatingRepository>>,
}

impl InMemorySwapRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wires a rating store so deleting a swap removes its ratings.
    pub fn with_rating_cascade(mut self, ratings: Arc<InMemorySwapRatingRepository>) -> Self {
        self.rating_cascade = Some(ratings);
        self
    }

    /// Number of stored requests.
    pub fn len(&self) -> usize {
        self.swaps.lock().unwrap().len()
    }

    /// Returns true if no requests are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn newest_first(mut swaps: Vec<SwapRequest>) -> Vec<SwapRequest> {
    swaps.sort_by(|a, b| b.created_at().cmp(a.created_at()));
    swaps
}

#[async_trait]
impl SwapRequestRepository for InMemorySwapRequestRepository {
    async fn save(&self, swap: &SwapRequest) -> Result<(), DomainError> {
        self.swaps.lock().unwrap().push(swap.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &SwapRequestId,
    ) -> Result<Option<SwapRequest>, DomainError> {
        Ok(self
            .swaps
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn find_visible(
        &self,
        id: &SwapRequestId,
        caller: &UserId,
    ) -> Result<Option<SwapRequest>, DomainError> {
        Ok(self
            .swaps
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id && s.is_participant(caller))
            .cloned())
    }

    async fn list_visible(&self, caller: &UserId) -> Result<Vec<SwapRequest>, DomainError> {
        let swaps = self
            .swaps
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_participant(caller))
            .cloned()
            .collect();
        Ok(newest_first(swaps))
    }

    async fn list_sent(&self, caller: &UserId) -> Result<Vec<SwapRequest>, DomainError> {
        let swaps = self
            .swaps
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.requester() == caller)
            .cloned()
            .collect();
        Ok(newest_first(swaps))
    }

    async fn list_received(&self, caller: &UserId) -> Result<Vec<SwapRequest>, DomainError> {
        let swaps = self
            .swaps
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.recipient() == caller)
            .cloned()
            .collect();
        Ok(newest_first(swaps))
    }

    async fn transition(
        &self,
        id: &SwapRequestId,
        caller: &UserId,
        action: SwapAction,
    ) -> Result<Option<SwapRequest>, DomainError> {
        let mut swaps = self.swaps.lock().unwrap();
        let Some(swap) = swaps.iter_mut().find(|s| s.id() == id) else {
            return Ok(None);
        };
        let Some(role) = swap.role_of(caller) else {
            return Ok(None);
        };
        if transition(swap.status(), action, role).is_err() {
            return Ok(None);
        }
        swap.apply(action, caller)?;
        Ok(Some(swap.clone()))
    }

    async fn update(&self, swap: &SwapRequest) -> Result<(), DomainError> {
        let mut swaps = self.swaps.lock().unwrap();
        match swaps.iter_mut().find(|s| s.id() == swap.id()) {
            Some(existing) => {
                *existing = swap.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SwapRequestNotFound,
                format!("Swap request not found: {}", swap.id()),
            )),
        }
    }

    async fn delete_visible(
        &self,
        id: &SwapRequestId,
        caller: &UserId,
    ) -> Result<bool, DomainError> {
        let mut swaps = self.swaps.lock().unwrap();
        let Some(pos) = swaps
            .iter()
            .position(|s| s.id() == id && s.is_participant(caller))
        else {
            return Ok(false);
        };
        swaps.remove(pos);
        drop(swaps);

        if let Some(ratings) = &self.rating_cascade {
            ratings.remove_for_swap(id);
        }
        Ok(true)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Ratings
// ════════════════════════════════════════════════════════════════════════════

/// In-memory implementation of `SwapRatingRepository`.
#[derive(Default)]
pub struct InMemorySwapRatingRepository {
    ratings: Mutex<Vec<SwapRating>>,
}

impl InMemorySwapRatingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored ratings.
    pub fn len(&self) -> usize {
        self.ratings.lock().unwrap().len()
    }

    /// Returns true if no ratings are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all ratings referencing a swap (cascade delete).
    pub fn remove_for_swap(&self, swap_id: &SwapRequestId) {
        self.ratings
            .lock()
            .unwrap()
            .retain(|r| r.swap_request_id() != swap_id);
    }
}

#[async_trait]
impl SwapRatingRepository for InMemorySwapRatingRepository {
    async fn save(&self, rating: &SwapRating) -> Result<(), DomainError> {
        let mut ratings = self.ratings.lock().unwrap();
        let duplicate = ratings.iter().any(|r| {
            r.swap_request_id() == rating.swap_request_id() && r.rater() == rating.rater()
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::DuplicateRating,
                format!(
                    "A rating for swap request {} by this rater already exists",
                    rating.swap_request_id()
                ),
            ));
        }
        ratings.push(rating.clone());
        Ok(())
    }

    async fn find_for_rater(
        &self,
        id: &RatingId,
        rater: &UserId,
    ) -> Result<Option<SwapRating>, DomainError> {
        Ok(self
            .ratings
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id && r.rater() == rater)
            .cloned())
    }

    async fn list_by_rater(&self, rater: &UserId) -> Result<Vec<SwapRating>, DomainError> {
        let mut ratings: Vec<SwapRating> = self
            .ratings
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.rater() == rater)
            .cloned()
            .collect();
        ratings.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(ratings)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// User directory
// ════════════════════════════════════════════════════════════════════════════

/// In-memory implementation of `UserDirectory`.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<Vec<UserProfile>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a profile (builder form).
    pub fn with_profile(self, profile: UserProfile) -> Self {
        self.users.lock().unwrap().push(profile);
        self
    }

    /// Adds a profile at runtime.
    pub fn add_profile(&self, profile: UserProfile) {
        self.users.lock().unwrap().push(profile);
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_filter(profile: &UserProfile, filter: &UserFilter) -> bool {
    if let Some(search) = &filter.search {
        if !contains_ci(&profile.name, search) && !contains_ci(&profile.email, search) {
            return false;
        }
    }
    if let Some(skill) = &filter.skill {
        let offered = profile.skills_offered.iter().any(|s| contains_ci(s, skill));
        let wanted = profile.skills_wanted.iter().any(|s| contains_ci(s, skill));
        if !offered && !wanted {
            return false;
        }
    }
    if let Some(location) = &filter.location {
        let matched = profile
            .location
            .as_deref()
            .is_some_and(|l| contains_ci(l, location));
        if !matched {
            return false;
        }
    }
    if let Some(available) = filter.available {
        if profile.is_available != available {
            return false;
        }
    }
    true
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.id == id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &UserFilter,
        exclude: &UserId,
    ) -> Result<Vec<UserProfile>, DomainError> {
        let mut users: Vec<UserProfile> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| &u.id != exclude && matches_filter(u, filter))
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn record_rating(
        &self,
        id: &UserId,
        value: RatingValue,
    ) -> Result<RatingAggregate, DomainError> {
        let mut users = self.users.lock().unwrap();
        let Some(profile) = users.iter_mut().find(|u| &u.id == id) else {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", id),
            ));
        };
        profile.rating = profile.rating.apply(value);
        Ok(profile.rating)
    }
}

/// Builds a minimal test profile with the given id.
pub fn test_profile(id: &str) -> UserProfile {
    use crate::domain::foundation::Timestamp;

    UserProfile {
        id: UserId::new(id).unwrap(),
        email: format!("{}@test.example.com", id),
        name: id.to_string(),
        location: None,
        bio: None,
        skills_offered: Vec::new(),
        skills_wanted: Vec::new(),
        is_available: true,
        rating: RatingAggregate::empty(),
        created_at: Timestamp::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SwapStatus;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn new_swap(requester: &str, recipient: &str) -> SwapRequest {
        SwapRequest::new(
            SwapRequestId::new(),
            user(requester),
            user(recipient),
            "Yoga".to_string(),
            "Guitar".to_string(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn transition_succeeds_once_then_misses() {
        let repo = InMemorySwapRequestRepository::new();
        let swap = new_swap("alice", "bob");
        let id = *swap.id();
        repo.save(&swap).await.unwrap();

        let updated = repo
            .transition(&id, &user("bob"), SwapAction::Accept)
            .await
            .unwrap();
        assert_eq!(updated.unwrap().status(), SwapStatus::Accepted);

        let second = repo
            .transition(&id, &user("bob"), SwapAction::Accept)
            .await
            .unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn transition_misses_for_wrong_role() {
        let repo = InMemorySwapRequestRepository::new();
        let swap = new_swap("alice", "bob");
        let id = *swap.id();
        repo.save(&swap).await.unwrap();

        let result = repo
            .transition(&id, &user("alice"), SwapAction::Accept)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn find_visible_hides_foreign_swaps() {
        let repo = InMemorySwapRequestRepository::new();
        let swap = new_swap("alice", "bob");
        let id = *swap.id();
        repo.save(&swap).await.unwrap();

        assert!(repo.find_visible(&id, &user("alice")).await.unwrap().is_some());
        assert!(repo.find_visible(&id, &user("mallory")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_cascades_to_ratings() {
        let ratings = Arc::new(InMemorySwapRatingRepository::new());
        let repo = InMemorySwapRequestRepository::new().with_rating_cascade(ratings.clone());

        let swap = new_swap("alice", "bob");
        let id = *swap.id();
        repo.save(&swap).await.unwrap();

        let rating = SwapRating::new(
            RatingId::new(),
            id,
            user("bob"),
            user("alice"),
            RatingValue::try_from_i16(5).unwrap(),
            None,
        )
        .unwrap();
        ratings.save(&rating).await.unwrap();
        assert_eq!(ratings.len(), 1);

        assert!(repo.delete_visible(&id, &user("alice")).await.unwrap());
        assert!(ratings.is_empty());
    }

    #[tokio::test]
    async fn duplicate_rating_save_fails() {
        let ratings = InMemorySwapRatingRepository::new();
        let swap_id = SwapRequestId::new();
        let make = |id: RatingId| {
            SwapRating::new(
                id,
                swap_id,
                user("bob"),
                user("alice"),
                RatingValue::try_from_i16(4).unwrap(),
                None,
            )
            .unwrap()
        };

        ratings.save(&make(RatingId::new())).await.unwrap();
        let err = ratings.save(&make(RatingId::new())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateRating);
        assert_eq!(ratings.len(), 1);
    }

    #[tokio::test]
    async fn directory_filters_by_skill_and_availability() {
        let mut teacher = test_profile("carol");
        teacher.skills_offered = vec!["Guitar".to_string()];
        let mut busy = test_profile("dave");
        busy.skills_offered = vec!["Guitar".to_string()];
        busy.is_available = false;

        let dir = InMemoryUserDirectory::new()
            .with_profile(teacher)
            .with_profile(busy)
            .with_profile(test_profile("erin"));

        let filter = UserFilter {
            skill: Some("guitar".to_string()),
            available: Some(true),
            ..UserFilter::default()
        };
        let result = dir.list(&filter, &user("alice")).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, user("carol"));
    }

    #[tokio::test]
    async fn directory_excludes_caller_from_listing() {
        let dir = InMemoryUserDirectory::new()
            .with_profile(test_profile("alice"))
            .with_profile(test_profile("bob"));

        let result = dir.list(&UserFilter::default(), &user("alice")).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, user("bob"));
    }

    #[tokio::test]
    async fn record_rating_updates_aggregate() {
        let dir = InMemoryUserDirectory::new().with_profile(test_profile("alice"));

        let agg = dir
            .record_rating(&user("alice"), RatingValue::try_from_i16(4).unwrap())
            .await
            .unwrap();
        assert_eq!(agg.count(), 1);
        assert_eq!(agg.mean(), 4.0);

        let agg = dir
            .record_rating(&user("alice"), RatingValue::try_from_i16(5).unwrap())
            .await
            .unwrap();
        assert_eq!(agg.count(), 2);
        assert_eq!(agg.mean(), 4.5);
    }

    #[tokio::test]
    async fn record_rating_fails_for_unknown_user() {
        let dir = InMemoryUserDirectory::new();
        let err = dir
            .record_rating(&user("ghost"), RatingValue::try_from_i16(3).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
