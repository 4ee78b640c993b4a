use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::config::DataMode;
use crate::models::*;

use super::{seed, StoreError, StoreResult, TravelStore};

/// In-process tables for offline demos.
///
/// Each method holds the lock for its whole body, so single primitives are
/// atomic; sequences of calls made by the accessors are not.
pub struct MockStore {
    tables: Mutex<MockTables>,
}

#[derive(Debug, Default)]
pub(crate) struct MockTables {
    pub users: Vec<User>,
    pub regular_users: Vec<RegularUserRow>,
    pub moderators: Vec<ModeratorRow>,
    pub admins: Vec<AdminRow>,
    pub profiles: Vec<ProfileRow>,
    pub profile_interests: Vec<ProfileInterest>,
    pub cities: Vec<City>,
    pub places: Vec<PlaceRow>,
    pub place_features: Vec<PlaceFeature>,
    pub place_images: Vec<PlaceImage>,
    pub posts: Vec<PostRow>,
    pub post_images: Vec<PostImage>,
    pub comments: Vec<Comment>,
    pub ratings: Vec<Rating>,
    pub follows: Vec<Follow>,
    pub companion_requests: Vec<CompanionRequestRow>,
    pub request_conditions: Vec<RequestCondition>,
    pub companion_matches: Vec<CompanionMatch>,
    next_child_id: i64,
}

/// `"{prefix}-{uuid v7}"`: time ordered and unique within the process.
fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7())
}

fn contains(ids: &[String], id: &str) -> bool {
    ids.iter().any(|candidate| candidate == id)
}

fn present(found: bool, table: &str, id: &str) -> StoreResult<()> {
    if found {
        Ok(())
    } else {
        Err(StoreError::MissingReference(format!("no {table} with id {id}")))
    }
}

/// Foreign key checks, mirroring the constraints of the hosted schema.
impl MockTables {
    fn require_user(&self, user_id: &str) -> StoreResult<()> {
        present(self.users.iter().any(|u| u.user_id == user_id), "user", user_id)
    }

    fn require_profile(&self, profile_id: &str) -> StoreResult<()> {
        present(self.profiles.iter().any(|p| p.profile_id == profile_id), "profile", profile_id)
    }

    fn require_post(&self, post_id: &str) -> StoreResult<()> {
        present(self.posts.iter().any(|p| p.post_id == post_id), "post", post_id)
    }

    fn require_request(&self, request_id: &str) -> StoreResult<()> {
        present(
            self.companion_requests.iter().any(|r| r.request_id == request_id),
            "companion request",
            request_id,
        )
    }

    /// Place and city are both optional on posts and requests.
    fn require_destination(&self, place_id: Option<&str>, city_id: Option<&str>) -> StoreResult<()> {
        if let Some(place_id) = place_id {
            present(self.places.iter().any(|p| p.place_id == place_id), "place", place_id)?;
        }
        if let Some(city_id) = city_id {
            present(self.cities.iter().any(|c| c.city_id == city_id), "city", city_id)?;
        }
        Ok(())
    }
}

impl MockTables {
    fn child_id(&mut self) -> i64 {
        self.next_child_id += 1;
        self.next_child_id
    }

    pub fn add_profile_interest(&mut self, profile_id: &str, interest: &str) {
        let id = self.child_id();
        self.profile_interests.push(ProfileInterest {
            id,
            profile_id: profile_id.to_string(),
            interest: interest.to_string(),
        });
    }

    pub fn add_place_feature(&mut self, place_id: &str, feature: &str) {
        let id = self.child_id();
        self.place_features.push(PlaceFeature {
            id,
            place_id: place_id.to_string(),
            feature: feature.to_string(),
        });
    }

    pub fn add_place_image(&mut self, place_id: &str, image_url: &str) {
        let id = self.child_id();
        self.place_images.push(PlaceImage {
            id,
            place_id: place_id.to_string(),
            image_url: image_url.to_string(),
        });
    }

    pub fn add_post_image(&mut self, post_id: &str, image_url: &str) {
        let id = self.child_id();
        self.post_images.push(PostImage {
            id,
            post_id: post_id.to_string(),
            image_url: image_url.to_string(),
        });
    }

    pub fn add_request_condition(&mut self, request_id: &str, condition: &str) {
        let id = self.child_id();
        self.request_conditions.push(RequestCondition {
            id,
            request_id: request_id.to_string(),
            condition: condition.to_string(),
        });
    }

    /// Follower counts the way `profiles_with_counts` derives them.
    fn with_counts(&self, profile: &ProfileRow) -> ProfileWithCounts {
        let followers_count = self
            .follows
            .iter()
            .filter(|f| f.following_id == profile.user_id)
            .count() as i64;
        let following_count = self
            .follows
            .iter()
            .filter(|f| f.follower_id == profile.user_id)
            .count() as i64;

        ProfileWithCounts {
            profile_id: profile.profile_id.clone(),
            user_id: profile.user_id.clone(),
            bio: profile.bio.clone(),
            cover_image: profile.cover_image.clone(),
            followers_count,
            following_count,
        }
    }

    /// Rating aggregates the way `posts_with_rating` derives them.
    fn with_rating(&self, post: &PostRow) -> PostWithRating {
        let (sum, count) = self
            .ratings
            .iter()
            .filter(|r| r.post_id == post.post_id)
            .fold((0i64, 0i64), |(sum, count), r| (sum + i64::from(r.score), count + 1));

        let mut row = PostWithRating::unrated(post.clone());
        if count > 0 {
            row.avg_rating = sum as f64 / count as f64;
            row.rating_count = count;
        }
        row
    }
}

impl MockStore {
    pub fn empty() -> Self {
        Self::from_tables(MockTables::default())
    }

    /// A store preloaded with the demo dataset.
    pub fn seeded() -> Self {
        Self::from_tables(seed::demo_tables())
    }

    pub(crate) fn from_tables(tables: MockTables) -> Self {
        Self {
            tables: Mutex::new(tables),
        }
    }

    fn tables(&self) -> StoreResult<MutexGuard<'_, MockTables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("mock store lock poisoned".into()))
    }
}

impl TravelStore for MockStore {
    fn mode(&self) -> DataMode {
        DataMode::Mock
    }

    // --- users ---

    fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables()?.users.clone())
    }

    fn find_user(&self, user_id: &str) -> StoreResult<Option<User>> {
        Ok(self.tables()?.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    fn insert_user(&self, user: &NewUser) -> StoreResult<User> {
        let mut tables = self.tables()?;
        if tables
            .users
            .iter()
            .any(|u| u.user_id == user.user_id || u.username == user.username || u.email == user.email)
        {
            return Err(StoreError::Conflict(format!("user {} already exists", user.username)));
        }

        let created = User {
            user_id: user.user_id.clone(),
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            profile_image: user.profile_image.clone(),
            created_at: Utc::now(),
            user_type: user.user_type,
        };
        tables.users.push(created.clone());
        // Stands in for the backend's profile-on-signup trigger.
        tables.profiles.push(ProfileRow {
            profile_id: new_id("profile"),
            user_id: created.user_id.clone(),
            bio: None,
            cover_image: None,
        });
        Ok(created)
    }

    fn list_regular_users(&self) -> StoreResult<Vec<RegularUserRow>> {
        Ok(self.tables()?.regular_users.clone())
    }

    fn list_moderators(&self) -> StoreResult<Vec<ModeratorRow>> {
        Ok(self.tables()?.moderators.clone())
    }

    fn list_admins(&self) -> StoreResult<Vec<AdminRow>> {
        Ok(self.tables()?.admins.clone())
    }

    // --- profiles ---

    fn list_profiles(&self) -> StoreResult<Vec<ProfileWithCounts>> {
        let tables = self.tables()?;
        Ok(tables.profiles.iter().map(|p| tables.with_counts(p)).collect())
    }

    fn find_profile_by_user(&self, user_id: &str) -> StoreResult<Option<ProfileWithCounts>> {
        let tables = self.tables()?;
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .map(|p| tables.with_counts(p)))
    }

    fn update_profile(&self, user_id: &str, changes: &ProfileChangeset) -> StoreResult<()> {
        let mut tables = self.tables()?;
        if let Some(profile) = tables.profiles.iter_mut().find(|p| p.user_id == user_id) {
            if let Some(bio) = &changes.bio {
                profile.bio = Some(bio.clone());
            }
            if let Some(cover_image) = &changes.cover_image {
                profile.cover_image = Some(cover_image.clone());
            }
        }
        Ok(())
    }

    fn list_profile_interests(&self, profile_ids: &[String]) -> StoreResult<Vec<ProfileInterest>> {
        Ok(self
            .tables()?
            .profile_interests
            .iter()
            .filter(|i| contains(profile_ids, &i.profile_id))
            .cloned()
            .collect())
    }

    fn insert_profile_interests(&self, profile_id: &str, interests: &[String]) -> StoreResult<()> {
        let mut tables = self.tables()?;
        tables.require_profile(profile_id)?;
        for interest in interests {
            tables.add_profile_interest(profile_id, interest);
        }
        Ok(())
    }

    fn delete_profile_interests(&self, profile_id: &str) -> StoreResult<()> {
        self.tables()?
            .profile_interests
            .retain(|i| i.profile_id != profile_id);
        Ok(())
    }

    // --- cities & places ---

    fn list_cities(&self) -> StoreResult<Vec<City>> {
        Ok(self.tables()?.cities.clone())
    }

    fn find_city(&self, city_id: &str) -> StoreResult<Option<City>> {
        Ok(self.tables()?.cities.iter().find(|c| c.city_id == city_id).cloned())
    }

    fn list_places(&self) -> StoreResult<Vec<PlaceRow>> {
        Ok(self.tables()?.places.clone())
    }

    fn list_places_by_city(&self, city_id: &str) -> StoreResult<Vec<PlaceRow>> {
        Ok(self
            .tables()?
            .places
            .iter()
            .filter(|p| p.city_id == city_id)
            .cloned()
            .collect())
    }

    fn find_place(&self, place_id: &str) -> StoreResult<Option<PlaceRow>> {
        Ok(self.tables()?.places.iter().find(|p| p.place_id == place_id).cloned())
    }

    fn list_place_features(&self, place_ids: &[String]) -> StoreResult<Vec<PlaceFeature>> {
        Ok(self
            .tables()?
            .place_features
            .iter()
            .filter(|f| contains(place_ids, &f.place_id))
            .cloned()
            .collect())
    }

    fn list_place_images(&self, place_ids: &[String]) -> StoreResult<Vec<PlaceImage>> {
        Ok(self
            .tables()?
            .place_images
            .iter()
            .filter(|i| contains(place_ids, &i.place_id))
            .cloned()
            .collect())
    }

    // --- posts ---

    fn list_posts(&self) -> StoreResult<Vec<PostWithRating>> {
        let tables = self.tables()?;
        Ok(tables.posts.iter().map(|p| tables.with_rating(p)).collect())
    }

    fn list_posts_by_user(&self, user_id: &str) -> StoreResult<Vec<PostWithRating>> {
        let tables = self.tables()?;
        Ok(tables
            .posts
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| tables.with_rating(p))
            .collect())
    }

    fn find_post(&self, post_id: &str) -> StoreResult<Option<PostWithRating>> {
        let tables = self.tables()?;
        Ok(tables
            .posts
            .iter()
            .find(|p| p.post_id == post_id)
            .map(|p| tables.with_rating(p)))
    }

    fn insert_post(&self, post: &NewPost) -> StoreResult<PostRow> {
        let mut tables = self.tables()?;
        tables.require_user(&post.user_id)?;
        tables.require_destination(post.place_id.as_deref(), post.city_id.as_deref())?;

        let row = PostRow {
            post_id: new_id("post"),
            user_id: post.user_id.clone(),
            place_id: post.place_id.clone(),
            city_id: post.city_id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            experience_type: post.experience_type,
            approval_status: post.approval_status,
            created_at: Utc::now(),
        };
        tables.posts.push(row.clone());
        Ok(row)
    }

    fn update_post(&self, post_id: &str, changes: &PostChangeset) -> StoreResult<()> {
        let mut tables = self.tables()?;
        tables.require_destination(changes.place_id.as_deref(), changes.city_id.as_deref())?;
        if let Some(post) = tables.posts.iter_mut().find(|p| p.post_id == post_id) {
            if let Some(title) = &changes.title {
                post.title = title.clone();
            }
            if let Some(content) = &changes.content {
                post.content = content.clone();
            }
            if let Some(experience_type) = changes.experience_type {
                post.experience_type = experience_type;
            }
            if let Some(place_id) = &changes.place_id {
                post.place_id = Some(place_id.clone());
            }
            if let Some(city_id) = &changes.city_id {
                post.city_id = Some(city_id.clone());
            }
        }
        Ok(())
    }

    fn delete_post(&self, post_id: &str) -> StoreResult<()> {
        let mut tables = self.tables()?;
        tables.posts.retain(|p| p.post_id != post_id);
        tables.post_images.retain(|i| i.post_id != post_id);
        tables.comments.retain(|c| c.post_id != post_id);
        tables.ratings.retain(|r| r.post_id != post_id);
        Ok(())
    }

    fn list_post_images(&self, post_ids: &[String]) -> StoreResult<Vec<PostImage>> {
        Ok(self
            .tables()?
            .post_images
            .iter()
            .filter(|i| contains(post_ids, &i.post_id))
            .cloned()
            .collect())
    }

    fn insert_post_images(&self, post_id: &str, urls: &[String]) -> StoreResult<()> {
        let mut tables = self.tables()?;
        tables.require_post(post_id)?;
        for url in urls {
            tables.add_post_image(post_id, url);
        }
        Ok(())
    }

    fn delete_post_images(&self, post_id: &str) -> StoreResult<()> {
        self.tables()?.post_images.retain(|i| i.post_id != post_id);
        Ok(())
    }

    // --- comments & ratings ---

    fn list_comments_by_post(&self, post_id: &str) -> StoreResult<Vec<Comment>> {
        Ok(self
            .tables()?
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    fn insert_comment(&self, comment: &NewComment) -> StoreResult<Comment> {
        let mut tables = self.tables()?;
        tables.require_post(&comment.post_id)?;
        tables.require_user(&comment.user_id)?;

        let row = Comment {
            comment_id: new_id("comment"),
            post_id: comment.post_id.clone(),
            user_id: comment.user_id.clone(),
            content: comment.content.clone(),
            created_at: Utc::now(),
        };
        tables.comments.push(row.clone());
        Ok(row)
    }

    fn delete_comment(&self, comment_id: &str) -> StoreResult<()> {
        self.tables()?.comments.retain(|c| c.comment_id != comment_id);
        Ok(())
    }

    fn list_ratings_by_post(&self, post_id: &str) -> StoreResult<Vec<Rating>> {
        Ok(self
            .tables()?
            .ratings
            .iter()
            .filter(|r| r.post_id == post_id)
            .cloned()
            .collect())
    }

    fn upsert_rating(&self, rating: &NewRating) -> StoreResult<Rating> {
        let mut tables = self.tables()?;
        tables.require_post(&rating.post_id)?;
        tables.require_user(&rating.user_id)?;
        if let Some(existing) = tables
            .ratings
            .iter_mut()
            .find(|r| r.user_id == rating.user_id && r.post_id == rating.post_id)
        {
            existing.score = rating.score;
            return Ok(existing.clone());
        }

        let row = Rating {
            user_id: rating.user_id.clone(),
            post_id: rating.post_id.clone(),
            score: rating.score,
            created_at: Utc::now(),
        };
        tables.ratings.push(row.clone());
        Ok(row)
    }

    // --- follows ---

    fn list_follows(&self) -> StoreResult<Vec<Follow>> {
        Ok(self.tables()?.follows.clone())
    }

    fn find_follow(&self, follower_id: &str, following_id: &str) -> StoreResult<Option<Follow>> {
        Ok(self
            .tables()?
            .follows
            .iter()
            .find(|f| f.follower_id == follower_id && f.following_id == following_id)
            .cloned())
    }

    fn insert_follow(&self, follow: &NewFollow) -> StoreResult<Follow> {
        let mut tables = self.tables()?;
        tables.require_user(&follow.follower_id)?;
        tables.require_user(&follow.following_id)?;
        if tables
            .follows
            .iter()
            .any(|f| f.follower_id == follow.follower_id && f.following_id == follow.following_id)
        {
            return Err(StoreError::Conflict(format!(
                "follow ({}, {}) already exists",
                follow.follower_id, follow.following_id
            )));
        }

        let row = Follow {
            follower_id: follow.follower_id.clone(),
            following_id: follow.following_id.clone(),
            created_at: Utc::now(),
        };
        tables.follows.push(row.clone());
        Ok(row)
    }

    fn delete_follow(&self, follower_id: &str, following_id: &str) -> StoreResult<()> {
        self.tables()?
            .follows
            .retain(|f| !(f.follower_id == follower_id && f.following_id == following_id));
        Ok(())
    }

    // --- companions ---

    fn list_companion_requests(&self) -> StoreResult<Vec<CompanionRequestRow>> {
        Ok(self.tables()?.companion_requests.clone())
    }

    fn insert_companion_request(&self, request: &NewCompanionRequest) -> StoreResult<CompanionRequestRow> {
        let mut tables = self.tables()?;
        tables.require_user(&request.user_id)?;
        tables.require_destination(
            request.destination_place_id.as_deref(),
            request.destination_city_id.as_deref(),
        )?;

        let row = CompanionRequestRow {
            request_id: new_id("request"),
            user_id: request.user_id.clone(),
            destination_place_id: request.destination_place_id.clone(),
            destination_city_id: request.destination_city_id.clone(),
            travel_date: request.travel_date,
            description: request.description.clone(),
            status: request.status,
            created_at: Utc::now(),
        };
        tables.companion_requests.push(row.clone());
        Ok(row)
    }

    fn update_companion_request_status(&self, request_id: &str, status: RequestStatus) -> StoreResult<()> {
        let mut tables = self.tables()?;
        if let Some(request) = tables
            .companion_requests
            .iter_mut()
            .find(|r| r.request_id == request_id)
        {
            request.status = status;
        }
        Ok(())
    }

    fn list_request_conditions(&self, request_ids: &[String]) -> StoreResult<Vec<RequestCondition>> {
        Ok(self
            .tables()?
            .request_conditions
            .iter()
            .filter(|c| contains(request_ids, &c.request_id))
            .cloned()
            .collect())
    }

    fn insert_request_conditions(&self, request_id: &str, conditions: &[String]) -> StoreResult<()> {
        let mut tables = self.tables()?;
        tables.require_request(request_id)?;
        for condition in conditions {
            tables.add_request_condition(request_id, condition);
        }
        Ok(())
    }

    fn list_companion_matches(&self) -> StoreResult<Vec<CompanionMatch>> {
        Ok(self.tables()?.companion_matches.clone())
    }

    fn list_matches_by_request(&self, request_id: &str) -> StoreResult<Vec<CompanionMatch>> {
        Ok(self
            .tables()?
            .companion_matches
            .iter()
            .filter(|m| m.request_id == request_id)
            .cloned()
            .collect())
    }

    fn insert_companion_match(&self, companion_match: &NewCompanionMatch) -> StoreResult<CompanionMatch> {
        let mut tables = self.tables()?;
        tables.require_request(&companion_match.request_id)?;
        tables.require_user(&companion_match.companion_user_id)?;

        let row = CompanionMatch {
            match_id: new_id("match"),
            request_id: companion_match.request_id.clone(),
            companion_user_id: companion_match.companion_user_id.clone(),
            status: companion_match.status,
            message: companion_match.message.clone(),
            created_at: Utc::now(),
        };
        tables.companion_matches.push(row.clone());
        Ok(row)
    }

    fn update_companion_match_status(&self, match_id: &str, status: MatchStatus) -> StoreResult<()> {
        let mut tables = self.tables()?;
        if let Some(companion_match) = tables
            .companion_matches
            .iter_mut()
            .find(|m| m.match_id == match_id)
        {
            companion_match.status = status;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_follow(a: &str, b: &str) -> NewFollow {
        NewFollow {
            follower_id: a.into(),
            following_id: b.into(),
        }
    }

    fn new_user(id: &str) -> NewUser {
        NewUser {
            user_id: id.into(),
            name: id.to_uppercase(),
            username: format!("{id}_name"),
            email: format!("{id}@example.com"),
            phone: None,
            password_hash: "external".into(),
            profile_image: None,
            user_type: UserType::Regular,
        }
    }

    /// An otherwise empty store holding just these users and their profiles.
    fn store_with_users(ids: &[&str]) -> MockStore {
        let store = MockStore::empty();
        for id in ids {
            store.insert_user(&new_user(id)).unwrap();
        }
        store
    }

    fn new_post(user_id: &str) -> NewPost {
        NewPost {
            user_id: user_id.into(),
            place_id: None,
            city_id: None,
            title: "t".into(),
            content: "c".into(),
            experience_type: ExperienceType::Visited,
            approval_status: ApprovalStatus::Pending,
        }
    }

    #[test]
    fn generated_ids_carry_prefix_and_are_distinct() {
        let a = new_id("post");
        let b = new_id("post");
        assert!(a.starts_with("post-"));
        assert_ne!(a, b);
    }

    #[test]
    fn duplicate_follow_is_a_conflict() {
        let store = store_with_users(&["a", "b"]);
        store.insert_follow(&new_follow("a", "b")).unwrap();
        let err = store.insert_follow(&new_follow("a", "b")).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.list_follows().unwrap().len(), 1);
    }

    #[test]
    fn profile_counts_follow_edges() {
        let store = store_with_users(&["a", "b", "c"]);
        store.insert_follow(&new_follow("a", "b")).unwrap();
        store.insert_follow(&new_follow("a", "c")).unwrap();
        store.insert_follow(&new_follow("c", "a")).unwrap();

        let profile = store.find_profile_by_user("a").unwrap().unwrap();
        assert_eq!(profile.following_count, 2);
        assert_eq!(profile.followers_count, 1);
    }

    #[test]
    fn rating_aggregate_is_mean_of_scores() {
        let store = store_with_users(&["a", "b"]);
        let post = store.insert_post(&new_post("a")).unwrap();

        let unrated = store.find_post(&post.post_id).unwrap().unwrap();
        assert_eq!(unrated.avg_rating, 0.0);
        assert_eq!(unrated.rating_count, 0);

        for (user, score) in [("a", 4), ("b", 5)] {
            store
                .upsert_rating(&NewRating {
                    user_id: user.into(),
                    post_id: post.post_id.clone(),
                    score,
                })
                .unwrap();
        }

        let rated = store.find_post(&post.post_id).unwrap().unwrap();
        assert_eq!(rated.rating_count, 2);
        assert!((rated.avg_rating - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn deleting_a_post_cascades_to_children() {
        let store = MockStore::seeded();
        let post_id = "post-1";
        assert!(!store.list_comments_by_post(post_id).unwrap().is_empty());

        store.delete_post(post_id).unwrap();

        assert!(store.find_post(post_id).unwrap().is_none());
        assert!(store.list_comments_by_post(post_id).unwrap().is_empty());
        assert!(store.list_ratings_by_post(post_id).unwrap().is_empty());
        assert!(store.list_post_images(&[post_id.to_string()]).unwrap().is_empty());
    }

    #[test]
    fn inserting_a_user_creates_its_profile() {
        let store = MockStore::empty();
        let user = new_user("u-new");
        store.insert_user(&user).unwrap();

        let profile = store.find_profile_by_user("u-new").unwrap().unwrap();
        assert!(profile.profile_id.starts_with("profile-"));
        assert!(matches!(store.insert_user(&user), Err(StoreError::Conflict(_))));
    }

    fn is_missing_reference<T>(result: StoreResult<T>) -> bool {
        matches!(result, Err(StoreError::MissingReference(_)))
    }

    #[test]
    fn writes_reject_unknown_users() {
        let store = MockStore::seeded();

        assert!(is_missing_reference(store.insert_post(&new_post("ghost"))));
        assert!(is_missing_reference(store.insert_follow(&new_follow("ghost", "user-1"))));
        assert!(is_missing_reference(store.insert_follow(&new_follow("user-1", "ghost"))));
        assert!(is_missing_reference(store.upsert_rating(&NewRating {
            user_id: "ghost".into(),
            post_id: "post-1".into(),
            score: 4,
        })));

        let profile = store.find_profile_by_user("user-1").unwrap().unwrap();
        assert_eq!(profile.followers_count, 3);
        assert!(store.list_posts().unwrap().iter().all(|p| p.user_id != "ghost"));
    }

    #[test]
    fn children_require_their_parent() {
        let store = MockStore::seeded();
        let missing = vec!["x".to_string()];

        assert!(is_missing_reference(store.insert_post_images("no-such-post", &missing)));
        assert!(is_missing_reference(store.insert_profile_interests("no-such-profile", &missing)));
        assert!(is_missing_reference(store.insert_request_conditions("no-such-request", &missing)));
        assert!(is_missing_reference(store.insert_comment(&NewComment {
            post_id: "no-such-post".into(),
            user_id: "user-1".into(),
            content: "hello".into(),
        })));
        assert!(is_missing_reference(store.insert_companion_match(&NewCompanionMatch {
            request_id: "no-such-request".into(),
            companion_user_id: "user-1".into(),
            status: MatchStatus::Pending,
            message: None,
        })));

        assert!(store.list_post_images(&["no-such-post".to_string()]).unwrap().is_empty());
    }

    #[test]
    fn destinations_must_exist() {
        let store = MockStore::seeded();

        let mut post = new_post("user-1");
        post.place_id = Some("no-place".into());
        assert!(is_missing_reference(store.insert_post(&post)));

        assert!(is_missing_reference(store.update_post(
            "post-1",
            &PostChangeset {
                city_id: Some("no-city".into()),
                ..Default::default()
            },
        )));
        assert_eq!(store.find_post("post-1").unwrap().unwrap().city_id.as_deref(), Some("city-1"));

        assert!(is_missing_reference(store.insert_companion_request(&NewCompanionRequest {
            user_id: "user-1".into(),
            destination_place_id: None,
            destination_city_id: Some("no-city".into()),
            travel_date: crate::store::date(2025, 1, 1),
            description: "d".into(),
            status: RequestStatus::Active,
        })));
    }
}
