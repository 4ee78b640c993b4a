//! Test double that forwards to a seeded [`MockStore`] but fails chosen
//! primitives.

use std::collections::HashMap;

use crate::config::DataMode;
use crate::models::*;

use super::{MockStore, StoreError, StoreResult, TravelStore};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Fault {
    Unavailable,
    Conflict,
}

pub(crate) struct FaultyStore {
    inner: MockStore,
    faults: HashMap<&'static str, Fault>,
}

impl FaultyStore {
    pub fn seeded() -> Self {
        Self {
            inner: MockStore::seeded(),
            faults: HashMap::new(),
        }
    }

    /// Makes the named trait method fail with `fault` on every call.
    pub fn failing(mut self, method: &'static str, fault: Fault) -> Self {
        self.faults.insert(method, fault);
        self
    }

    /// The healthy store underneath, for checking what survived a failure.
    pub fn inner(&self) -> &MockStore {
        &self.inner
    }

    fn check(&self, method: &'static str) -> StoreResult<()> {
        match self.faults.get(method) {
            None => Ok(()),
            Some(Fault::Unavailable) => Err(StoreError::Unavailable(format!("{method} failed"))),
            Some(Fault::Conflict) => Err(StoreError::Conflict(format!("{method} duplicate"))),
        }
    }
}

macro_rules! forward {
    ($( fn $name:ident(&self $(, $arg:ident : $ty:ty)*) -> $ret:ty; )*) => {
        $(
            fn $name(&self $(, $arg: $ty)*) -> $ret {
                self.check(stringify!($name))?;
                self.inner.$name($($arg),*)
            }
        )*
    };
}

impl TravelStore for FaultyStore {
    fn mode(&self) -> DataMode {
        DataMode::Mock
    }

    forward! {
        fn list_users(&self) -> StoreResult<Vec<User>>;
        fn find_user(&self, user_id: &str) -> StoreResult<Option<User>>;
        fn insert_user(&self, user: &NewUser) -> StoreResult<User>;
        fn list_regular_users(&self) -> StoreResult<Vec<RegularUserRow>>;
        fn list_moderators(&self) -> StoreResult<Vec<ModeratorRow>>;
        fn list_admins(&self) -> StoreResult<Vec<AdminRow>>;

        fn list_profiles(&self) -> StoreResult<Vec<ProfileWithCounts>>;
        fn find_profile_by_user(&self, user_id: &str) -> StoreResult<Option<ProfileWithCounts>>;
        fn update_profile(&self, user_id: &str, changes: &ProfileChangeset) -> StoreResult<()>;
        fn list_profile_interests(&self, profile_ids: &[String]) -> StoreResult<Vec<ProfileInterest>>;
        fn insert_profile_interests(&self, profile_id: &str, interests: &[String]) -> StoreResult<()>;
        fn delete_profile_interests(&self, profile_id: &str) -> StoreResult<()>;

        fn list_cities(&self) -> StoreResult<Vec<City>>;
        fn find_city(&self, city_id: &str) -> StoreResult<Option<City>>;
        fn list_places(&self) -> StoreResult<Vec<PlaceRow>>;
        fn list_places_by_city(&self, city_id: &str) -> StoreResult<Vec<PlaceRow>>;
        fn find_place(&self, place_id: &str) -> StoreResult<Option<PlaceRow>>;
        fn list_place_features(&self, place_ids: &[String]) -> StoreResult<Vec<PlaceFeature>>;
        fn list_place_images(&self, place_ids: &[String]) -> StoreResult<Vec<PlaceImage>>;

        fn list_posts(&self) -> StoreResult<Vec<PostWithRating>>;
        fn list_posts_by_user(&self, user_id: &str) -> StoreResult<Vec<PostWithRating>>;
        fn find_post(&self, post_id: &str) -> StoreResult<Option<PostWithRating>>;
        fn insert_post(&self, post: &NewPost) -> StoreResult<PostRow>;
        fn update_post(&self, post_id: &str, changes: &PostChangeset) -> StoreResult<()>;
        fn delete_post(&self, post_id: &str) -> StoreResult<()>;
        fn list_post_images(&self, post_ids: &[String]) -> StoreResult<Vec<PostImage>>;
        fn insert_post_images(&self, post_id: &str, urls: &[String]) -> StoreResult<()>;
        fn delete_post_images(&self, post_id: &str) -> StoreResult<()>;

        fn list_comments_by_post(&self, post_id: &str) -> StoreResult<Vec<Comment>>;
        fn insert_comment(&self, comment: &NewComment) -> StoreResult<Comment>;
        fn delete_comment(&self, comment_id: &str) -> StoreResult<()>;
        fn list_ratings_by_post(&self, post_id: &str) -> StoreResult<Vec<Rating>>;
        fn upsert_rating(&self, rating: &NewRating) -> StoreResult<Rating>;

        fn list_follows(&self) -> StoreResult<Vec<Follow>>;
        fn find_follow(&self, follower_id: &str, following_id: &str) -> StoreResult<Option<Follow>>;
        fn insert_follow(&self, follow: &NewFollow) -> StoreResult<Follow>;
        fn delete_follow(&self, follower_id: &str, following_id: &str) -> StoreResult<()>;

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
}
