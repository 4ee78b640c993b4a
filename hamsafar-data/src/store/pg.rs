use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use hamsafar_shared::db::DbPool;

use crate::config::DataMode;
use crate::models::*;
use crate::schema::{
    admins, cities, comments, companion_matches, companion_requests, follows, moderators,
    place_features, place_images, places, post_images, posts, posts_with_rating,
    profile_interests, profiles, profiles_with_counts, ratings, regular_users, request_conditions,
    users,
};

use super::{StoreError, StoreResult, TravelStore};

type PgPooled = PooledConnection<ConnectionManager<PgConnection>>;

/// Hosted Postgres backend. Aggregates come from the `profiles_with_counts`
/// and `posts_with_rating` views; cascades and the profile-on-signup trigger
/// live in the database.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> StoreResult<PgPooled> {
        self.pool.get().map_err(|e| StoreError::Pool(e.to_string()))
    }
}

impl TravelStore for PgStore {
    fn mode(&self) -> DataMode {
        DataMode::Remote
    }

    // --- users ---

    fn list_users(&self) -> StoreResult<Vec<User>> {
        let mut conn = self.conn()?;
        Ok(users::table
            .order(users::created_at.asc())
            .select(User::as_select())
            .load(&mut conn)?)
    }

    fn find_user(&self, user_id: &str) -> StoreResult<Option<User>> {
        let mut conn = self.conn()?;
        Ok(users::table
            .filter(users::user_id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .optional()?)
    }

    fn insert_user(&self, user: &NewUser) -> StoreResult<User> {
        let mut conn = self.conn()?;
        Ok(diesel::insert_into(users::table)
            .values(user)
            .returning(User::as_returning())
            .get_result(&mut conn)?)
    }

    fn list_regular_users(&self) -> StoreResult<Vec<RegularUserRow>> {
        let mut conn = self.conn()?;
        Ok(regular_users::table
            .select(RegularUserRow::as_select())
            .load(&mut conn)?)
    }

    fn list_moderators(&self) -> StoreResult<Vec<ModeratorRow>> {
        let mut conn = self.conn()?;
        Ok(moderators::table
            .select(ModeratorRow::as_select())
            .load(&mut conn)?)
    }

    fn list_admins(&self) -> StoreResult<Vec<AdminRow>> {
        let mut conn = self.conn()?;
        Ok(admins::table.select(AdminRow::as_select()).load(&mut conn)?)
    }

    // --- profiles ---

    fn list_profiles(&self) -> StoreResult<Vec<ProfileWithCounts>> {
        let mut conn = self.conn()?;
        Ok(profiles_with_counts::table
            .select(ProfileWithCounts::as_select())
            .load(&mut conn)?)
    }

    fn find_profile_by_user(&self, user_id: &str) -> StoreResult<Option<ProfileWithCounts>> {
        let mut conn = self.conn()?;
        Ok(profiles_with_counts::table
            .filter(profiles_with_counts::user_id.eq(user_id))
            .select(ProfileWithCounts::as_select())
            .first(&mut conn)
            .optional()?)
    }

    fn update_profile(&self, user_id: &str, changes: &ProfileChangeset) -> StoreResult<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn()?;
        diesel::update(profiles::table.filter(profiles::user_id.eq(user_id)))
            .set(changes)
            .execute(&mut conn)?;
        Ok(())
    }

    fn list_profile_interests(&self, profile_ids: &[String]) -> StoreResult<Vec<ProfileInterest>> {
        let mut conn = self.conn()?;
        Ok(profile_interests::table
            .filter(profile_interests::profile_id.eq_any(profile_ids))
            .order(profile_interests::id.asc())
            .select(ProfileInterest::as_select())
            .load(&mut conn)?)
    }

    fn insert_profile_interests(&self, profile_id: &str, interests: &[String]) -> StoreResult<()> {
        if interests.is_empty() {
            return Ok(());
        }
        let rows: Vec<NewProfileInterest> = interests
            .iter()
            .map(|interest| NewProfileInterest { profile_id, interest })
            .collect();
        let mut conn = self.conn()?;
        diesel::insert_into(profile_interests::table)
            .values(&rows)
            .execute(&mut conn)?;
        Ok(())
    }

    fn delete_profile_interests(&self, profile_id: &str) -> StoreResult<()> {
        let mut conn = self.conn()?;
        diesel::delete(profile_interests::table.filter(profile_interests::profile_id.eq(profile_id)))
            .execute(&mut conn)?;
        Ok(())
    }

    // --- cities & places ---

    fn list_cities(&self) -> StoreResult<Vec<City>> {
        let mut conn = self.conn()?;
        Ok(cities::table
            .order(cities::name.asc())
            .select(City::as_select())
            .load(&mut conn)?)
    }

    fn find_city(&self, city_id: &str) -> StoreResult<Option<City>> {
        let mut conn = self.conn()?;
        Ok(cities::table
            .filter(cities::city_id.eq(city_id))
            .select(City::as_select())
            .first(&mut conn)
            .optional()?)
    }

    fn list_places(&self) -> StoreResult<Vec<PlaceRow>> {
        let mut conn = self.conn()?;
        Ok(places::table
            .order(places::name.asc())
            .select(PlaceRow::as_select())
            .load(&mut conn)?)
    }

    fn list_places_by_city(&self, city_id: &str) -> StoreResult<Vec<PlaceRow>> {
        let mut conn = self.conn()?;
        Ok(places::table
            .filter(places::city_id.eq(city_id))
            .order(places::name.asc())
            .select(PlaceRow::as_select())
            .load(&mut conn)?)
    }

    fn find_place(&self, place_id: &str) -> StoreResult<Option<PlaceRow>> {
        let mut conn = self.conn()?;
        Ok(places::table
            .filter(places::place_id.eq(place_id))
            .select(PlaceRow::as_select())
            .first(&mut conn)
            .optional()?)
    }

    fn list_place_features(&self, place_ids: &[String]) -> StoreResult<Vec<PlaceFeature>> {
        let mut conn = self.conn()?;
        Ok(place_features::table
            .filter(place_features::place_id.eq_any(place_ids))
            .order(place_features::id.asc())
            .select(PlaceFeature::as_select())
            .load(&mut conn)?)
    }

    fn list_place_images(&self, place_ids: &[String]) -> StoreResult<Vec<PlaceImage>> {
        let mut conn = self.conn()?;
        Ok(place_images::table
            .filter(place_images::place_id.eq_any(place_ids))
            .order(place_images::id.asc())
            .select(PlaceImage::as_select())
            .load(&mut conn)?)
    }

    // --- posts ---

    fn list_posts(&self) -> StoreResult<Vec<PostWithRating>> {
        let mut conn = self.conn()?;
        Ok(posts_with_rating::table
            .order(posts_with_rating::created_at.desc())
            .select(PostWithRating::as_select())
            .load(&mut conn)?)
    }

    fn list_posts_by_user(&self, user_id: &str) -> StoreResult<Vec<PostWithRating>> {
        let mut conn = self.conn()?;
        Ok(posts_with_rating::table
            .filter(posts_with_rating::user_id.eq(user_id))
            .order(posts_with_rating::created_at.desc())
            .select(PostWithRating::as_select())
            .load(&mut conn)?)
    }

    fn find_post(&self, post_id: &str) -> StoreResult<Option<PostWithRating>> {
        let mut conn = self.conn()?;
        Ok(posts_with_rating::table
            .filter(posts_with_rating::post_id.eq(post_id))
            .select(PostWithRating::as_select())
            .first(&mut conn)
            .optional()?)
    }

    fn insert_post(&self, post: &NewPost) -> StoreResult<PostRow> {
        let mut conn = self.conn()?;
        Ok(diesel::insert_into(posts::table)
            .values(post)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)?)
    }

    fn update_post(&self, post_id: &str, changes: &PostChangeset) -> StoreResult<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn()?;
        diesel::update(posts::table.filter(posts::post_id.eq(post_id)))
            .set(changes)
            .execute(&mut conn)?;
        Ok(())
    }

    fn delete_post(&self, post_id: &str) -> StoreResult<()> {
        let mut conn = self.conn()?;
        diesel::delete(posts::table.filter(posts::post_id.eq(post_id))).execute(&mut conn)?;
        Ok(())
    }

    fn list_post_images(&self, post_ids: &[String]) -> StoreResult<Vec<PostImage>> {
        let mut conn = self.conn()?;
        Ok(post_images::table
            .filter(post_images::post_id.eq_any(post_ids))
            .order(post_images::id.asc())
            .select(PostImage::as_select())
            .load(&mut conn)?)
    }

    fn insert_post_images(&self, post_id: &str, urls: &[String]) -> StoreResult<()> {
        if urls.is_empty() {
            return Ok(());
        }
        let rows: Vec<NewPostImage> = urls
            .iter()
            .map(|url| NewPostImage { post_id, image_url: url })
            .collect();
        let mut conn = self.conn()?;
        diesel::insert_into(post_images::table)
            .values(&rows)
            .execute(&mut conn)?;
        Ok(())
    }

    fn delete_post_images(&self, post_id: &str) -> StoreResult<()> {
        let mut conn = self.conn()?;
        diesel::delete(post_images::table.filter(post_images::post_id.eq(post_id)))
            .execute(&mut conn)?;
        Ok(())
    }

    // --- comments & ratings ---

    fn list_comments_by_post(&self, post_id: &str) -> StoreResult<Vec<Comment>> {
        let mut conn = self.conn()?;
        Ok(comments::table
            .filter(comments::post_id.eq(post_id))
            .order(comments::created_at.asc())
            .select(Comment::as_select())
            .load(&mut conn)?)
    }

    fn insert_comment(&self, comment: &NewComment) -> StoreResult<Comment> {
        let mut conn = self.conn()?;
        Ok(diesel::insert_into(comments::table)
            .values(comment)
            .returning(Comment::as_returning())
            .get_result(&mut conn)?)
    }

    fn delete_comment(&self, comment_id: &str) -> StoreResult<()> {
        let mut conn = self.conn()?;
        diesel::delete(comments::table.filter(comments::comment_id.eq(comment_id)))
            .execute(&mut conn)?;
        Ok(())
    }

    fn list_ratings_by_post(&self, post_id: &str) -> StoreResult<Vec<Rating>> {
        let mut conn = self.conn()?;
        Ok(ratings::table
            .filter(ratings::post_id.eq(post_id))
            .order(ratings::created_at.asc())
            .select(Rating::as_select())
            .load(&mut conn)?)
    }

    fn upsert_rating(&self, rating: &NewRating) -> StoreResult<Rating> {
        let mut conn = self.conn()?;
        Ok(diesel::insert_into(ratings::table)
            .values(rating)
            .on_conflict((ratings::user_id, ratings::post_id))
            .do_update()
            .set(ratings::score.eq(rating.score))
            .returning(Rating::as_returning())
            .get_result(&mut conn)?)
    }

    // --- follows ---

    fn list_follows(&self) -> StoreResult<Vec<Follow>> {
        let mut conn = self.conn()?;
        Ok(follows::table
            .order(follows::created_at.desc())
            .select(Follow::as_select())
            .load(&mut conn)?)
    }

    fn find_follow(&self, follower_id: &str, following_id: &str) -> StoreResult<Option<Follow>> {
        let mut conn = self.conn()?;
        Ok(follows::table
            .filter(follows::follower_id.eq(follower_id))
            .filter(follows::following_id.eq(following_id))
            .select(Follow::as_select())
            .first(&mut conn)
            .optional()?)
    }

    fn insert_follow(&self, follow: &NewFollow) -> StoreResult<Follow> {
        let mut conn = self.conn()?;
        Ok(diesel::insert_into(follows::table)
            .values(follow)
            .returning(Follow::as_returning())
            .get_result(&mut conn)?)
    }

    fn delete_follow(&self, follower_id: &str, following_id: &str) -> StoreResult<()> {
        let mut conn = self.conn()?;
        diesel::delete(
            follows::table
                .filter(follows::follower_id.eq(follower_id))
                .filter(follows::following_id.eq(following_id)),
        )
        .execute(&mut conn)?;
        Ok(())
    }

    // --- companions ---

    fn list_companion_requests(&self) -> StoreResult<Vec<CompanionRequestRow>> {
        let mut conn = self.conn()?;
        Ok(companion_requests::table
            .order(companion_requests::created_at.desc())
            .select(CompanionRequestRow::as_select())
            .load(&mut conn)?)
    }

    fn insert_companion_request(&self, request: &NewCompanionRequest) -> StoreResult<CompanionRequestRow> {
        let mut conn = self.conn()?;
        Ok(diesel::insert_into(companion_requests::table)
            .values(request)
            .returning(CompanionRequestRow::as_returning())
            .get_result(&mut conn)?)
    }

    fn update_companion_request_status(&self, request_id: &str, status: RequestStatus) -> StoreResult<()> {
        let mut conn = self.conn()?;
        diesel::update(companion_requests::table.filter(companion_requests::request_id.eq(request_id)))
            .set(companion_requests::status.eq(status))
            .execute(&mut conn)?;
        Ok(())
    }

    fn list_request_conditions(&self, request_ids: &[String]) -> StoreResult<Vec<RequestCondition>> {
        let mut conn = self.conn()?;
        Ok(request_conditions::table
            .filter(request_conditions::request_id.eq_any(request_ids))
            .order(request_conditions::id.asc())
            .select(RequestCondition::as_select())
            .load(&mut conn)?)
    }

    fn insert_request_conditions(&self, request_id: &str, conditions: &[String]) -> StoreResult<()> {
        if conditions.is_empty() {
            return Ok(());
        }
        let rows: Vec<NewRequestCondition> = conditions
            .iter()
            .map(|condition| NewRequestCondition { request_id, condition })
            .collect();
        let mut conn = self.conn()?;
        diesel::insert_into(request_conditions::table)
            .values(&rows)
            .execute(&mut conn)?;
        Ok(())
    }

    fn list_companion_matches(&self) -> StoreResult<Vec<CompanionMatch>> {
        let mut conn = self.conn()?;
        Ok(companion_matches::table
            .order(companion_matches::created_at.desc())
            .select(CompanionMatch::as_select())
            .load(&mut conn)?)
    }

    fn list_matches_by_request(&self, request_id: &str) -> StoreResult<Vec<CompanionMatch>> {
        let mut conn = self.conn()?;
        Ok(companion_matches::table
            .filter(companion_matches::request_id.eq(request_id))
            .order(companion_matches::created_at.asc())
            .select(CompanionMatch::as_select())
            .load(&mut conn)?)
    }

    fn insert_companion_match(&self, companion_match: &NewCompanionMatch) -> StoreResult<CompanionMatch> {
        let mut conn = self.conn()?;
        Ok(diesel::insert_into(companion_matches::table)
            .values(companion_match)
            .returning(CompanionMatch::as_returning())
            .get_result(&mut conn)?)
    }

    fn update_companion_match_status(&self, match_id: &str, status: MatchStatus) -> StoreResult<()> {
        let mut conn = self.conn()?;
        diesel::update(companion_matches::table.filter(companion_matches::match_id.eq(match_id)))
            .set(companion_matches::status.eq(status))
            .execute(&mut conn)?;
        Ok(())
    }
}
