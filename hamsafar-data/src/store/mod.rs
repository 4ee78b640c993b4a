//! The data source behind the read and write accessors.
//!
//! [`TravelStore`] is a table-level capability: one method per logical table
//! operation, no business rules. The active implementation is chosen once at
//! start-up by [`open`] from [`AppConfig::data_mode`].

use std::sync::Arc;

use chrono::NaiveDate;
use diesel::result::DatabaseErrorKind;

use hamsafar_shared::{AppError, ErrorCode};

use crate::config::{AppConfig, DataMode};
use crate::models::*;

#[cfg(test)]
pub(crate) mod faulty;
pub mod mock;
pub mod pg;
mod seed;

pub use mock::MockStore;
pub use pg::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique or primary key constraint rejected the write.
    #[error("duplicate key: {0}")]
    Conflict(String),

    /// A foreign key points at a row that does not exist.
    #[error("missing reference: {0}")]
    MissingReference(String),

    #[error("database error: {0}")]
    Database(diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                StoreError::Conflict(info.message().to_string())
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                StoreError::MissingReference(info.message().to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => AppError::conflict(msg),
            StoreError::MissingReference(msg) => AppError::new(ErrorCode::InvalidReference, msg),
            StoreError::Database(e) => AppError::Database(e),
            StoreError::Pool(msg) => AppError::internal(msg),
            StoreError::Unavailable(msg) => AppError::unavailable(msg),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait TravelStore: Send + Sync {
    fn mode(&self) -> DataMode;

    // --- users ---
    fn list_users(&self) -> StoreResult<Vec<User>>;
    fn find_user(&self, user_id: &str) -> StoreResult<Option<User>>;
    /// Inserts the user; the store is responsible for the matching empty profile.
    fn insert_user(&self, user: &NewUser) -> StoreResult<User>;
    fn list_regular_users(&self) -> StoreResult<Vec<RegularUserRow>>;
    fn list_moderators(&self) -> StoreResult<Vec<ModeratorRow>>;
    fn list_admins(&self) -> StoreResult<Vec<AdminRow>>;

    // --- profiles ---
    fn list_profiles(&self) -> StoreResult<Vec<ProfileWithCounts>>;
    fn find_profile_by_user(&self, user_id: &str) -> StoreResult<Option<ProfileWithCounts>>;
    fn update_profile(&self, user_id: &str, changes: &ProfileChangeset) -> StoreResult<()>;
    fn list_profile_interests(&self, profile_ids: &[String]) -> StoreResult<Vec<ProfileInterest>>;
    fn insert_profile_interests(&self, profile_id: &str, interests: &[String]) -> StoreResult<()>;
    fn delete_profile_interests(&self, profile_id: &str) -> StoreResult<()>;

    // --- cities & places ---
    fn list_cities(&self) -> StoreResult<Vec<City>>;
    fn find_city(&self, city_id: &str) -> StoreResult<Option<City>>;
    fn list_places(&self) -> StoreResult<Vec<PlaceRow>>;
    fn list_places_by_city(&self, city_id: &str) -> StoreResult<Vec<PlaceRow>>;
    fn find_place(&self, place_id: &str) -> StoreResult<Option<PlaceRow>>;
    fn list_place_features(&self, place_ids: &[String]) -> StoreResult<Vec<PlaceFeature>>;
    fn list_place_images(&self, place_ids: &[String]) -> StoreResult<Vec<PlaceImage>>;

    // --- posts ---
    fn list_posts(&self) -> StoreResult<Vec<PostWithRating>>;
    fn list_posts_by_user(&self, user_id: &str) -> StoreResult<Vec<PostWithRating>>;
    fn find_post(&self, post_id: &str) -> StoreResult<Option<PostWithRating>>;
    fn insert_post(&self, post: &NewPost) -> StoreResult<PostRow>;
    fn update_post(&self, post_id: &str, changes: &PostChangeset) -> StoreResult<()>;
    /// Images, comments and ratings of the post go with it.
    fn delete_post(&self, post_id: &str) -> StoreResult<()>;
    fn list_post_images(&self, post_ids: &[String]) -> StoreResult<Vec<PostImage>>;
    fn insert_post_images(&self, post_id: &str, urls: &[String]) -> StoreResult<()>;
    fn delete_post_images(&self, post_id: &str) -> StoreResult<()>;

    // --- comments & ratings ---
    fn list_comments_by_post(&self, post_id: &str) -> StoreResult<Vec<Comment>>;
    fn insert_comment(&self, comment: &NewComment) -> StoreResult<Comment>;
    fn delete_comment(&self, comment_id: &str) -> StoreResult<()>;
    fn list_ratings_by_post(&self, post_id: &str) -> StoreResult<Vec<Rating>>;
    /// Insert or overwrite the score keyed on `(user_id, post_id)`.
    fn upsert_rating(&self, rating: &NewRating) -> StoreResult<Rating>;

    // --- follows ---
    fn list_follows(&self) -> StoreResult<Vec<Follow>>;
    fn find_follow(&self, follower_id: &str, following_id: &str) -> StoreResult<Option<Follow>>;
    /// Fails with [`StoreError::Conflict`] when the pair already exists.
    fn insert_follow(&self, follow: &NewFollow) -> StoreResult<Follow>;
    fn delete_follow(&self, follower_id: &str, following_id: &str) -> StoreResult<()>;

    // --- companions ---
    fn list_companion_requests(&self) -> StoreResult<Vec<CompanionRequestRow>>;
    fn insert_companion_request(&self, request: &NewCompanionRequest) -> StoreResult<CompanionRequestRow>;
    fn update_companion_request_status(&self, request_id: &str, status: RequestStatus) -> StoreResult<()>;
    fn list_request_conditions(&self, request_ids: &[String]) -> StoreResult<Vec<RequestCondition>>;
    fn insert_request_conditions(&self, request_id: &str, conditions: &[String]) -> StoreResult<()>;
    fn list_companion_matches(&self) -> StoreResult<Vec<CompanionMatch>>;
    fn list_matches_by_request(&self, request_id: &str) -> StoreResult<Vec<CompanionMatch>>;
    fn insert_companion_match(&self, companion_match: &NewCompanionMatch) -> StoreResult<CompanionMatch>;
    fn update_companion_match_status(&self, match_id: &str, status: MatchStatus) -> StoreResult<()>;
}

/// Builds the data source selected by configuration.
pub fn open(config: &AppConfig) -> anyhow::Result<Arc<dyn TravelStore>> {
    let store: Arc<dyn TravelStore> = match config.data_mode {
        DataMode::Remote => {
            let pool = hamsafar_shared::db::create_pool(&config.database_url, config.pool_size)?;
            Arc::new(PgStore::new(pool))
        }
        DataMode::Mock => Arc::new(MockStore::seeded()),
    };

    tracing::info!(mode = %store.mode(), "data source opened");
    Ok(store)
}

/// Calendar helper shared by the seed data and tests.
pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
