//! Read accessor: fetch entities and assemble their view models.
//!
//! Absence is never an error here. Single-entity reads return `Ok(None)` and
//! collection reads return an empty `Vec`; `Err` always means the data source
//! itself failed.

use std::collections::HashMap;

use hamsafar_shared::AppResult;

use crate::models::*;
use crate::store::TravelStore;

use super::{group_children, logged};

/// Cities whose image is hosted here have no real picture yet and are hidden.
pub const PLACEHOLDER_IMAGE_HOST: &str = "placehold.co";

// --- Users ---

pub fn get_users(store: &dyn TravelStore) -> AppResult<Vec<User>> {
    logged(store.list_users(), "fetching users")
}

pub fn get_user_by_id(store: &dyn TravelStore, user_id: &str) -> AppResult<Option<User>> {
    logged(store.find_user(user_id), "fetching user")
}

fn users_by_id(store: &dyn TravelStore) -> AppResult<HashMap<String, User>> {
    Ok(get_users(store)?
        .into_iter()
        .map(|u| (u.user_id.clone(), u))
        .collect())
}

pub fn get_regular_users(store: &dyn TravelStore) -> AppResult<Vec<RegularUser>> {
    let rows = logged(store.list_regular_users(), "fetching regular users")?;
    let mut users = users_by_id(store)?;
    Ok(rows
        .into_iter()
        .filter_map(|row| {
            users.remove(&row.user_id).map(|user| RegularUser {
                user,
                experience_level: row.experience_level,
            })
        })
        .collect())
}

pub fn get_moderators(store: &dyn TravelStore) -> AppResult<Vec<Moderator>> {
    let rows = logged(store.list_moderators(), "fetching moderators")?;
    let mut users = users_by_id(store)?;
    Ok(rows
        .into_iter()
        .filter_map(|row| {
            users.remove(&row.user_id).map(|user| Moderator {
                user,
                access_level: row.access_level,
            })
        })
        .collect())
}

pub fn get_admins(store: &dyn TravelStore) -> AppResult<Vec<Admin>> {
    let rows = logged(store.list_admins(), "fetching admins")?;
    let mut users = users_by_id(store)?;
    Ok(rows
        .into_iter()
        .filter_map(|row| users.remove(&row.user_id).map(|user| Admin { user }))
        .collect())
}

// --- Profiles ---

fn with_interests(store: &dyn TravelStore, rows: Vec<ProfileWithCounts>) -> AppResult<Vec<Profile>> {
    if rows.is_empty() {
        return Ok(vec![]);
    }
    let ids: Vec<String> = rows.iter().map(|p| p.profile_id.clone()).collect();
    let mut interests = group_children(
        logged(store.list_profile_interests(&ids), "fetching profile interests")?,
        |i| (i.profile_id, i.interest),
    );

    Ok(rows
        .into_iter()
        .map(|row| {
            let own = interests.remove(&row.profile_id).unwrap_or_default();
            Profile::from_row(row, own)
        })
        .collect())
}

pub fn get_profiles(store: &dyn TravelStore) -> AppResult<Vec<Profile>> {
    let rows = logged(store.list_profiles(), "fetching profiles")?;
    with_interests(store, rows)
}

pub fn get_profile_by_user_id(store: &dyn TravelStore, user_id: &str) -> AppResult<Option<Profile>> {
    let row = logged(store.find_profile_by_user(user_id), "fetching profile")?;
    Ok(with_interests(store, row.into_iter().collect())?.pop())
}

// --- Cities & places ---

pub fn get_cities(store: &dyn TravelStore) -> AppResult<Vec<City>> {
    let cities = logged(store.list_cities(), "fetching cities")?;
    Ok(cities
        .into_iter()
        .filter(|c| {
            !c.image
                .as_deref()
                .is_some_and(|image| image.contains(PLACEHOLDER_IMAGE_HOST))
        })
        .collect())
}

pub fn get_city_by_id(store: &dyn TravelStore, city_id: &str) -> AppResult<Option<City>> {
    logged(store.find_city(city_id), "fetching city")
}

fn with_place_children(store: &dyn TravelStore, rows: Vec<PlaceRow>) -> AppResult<Vec<Place>> {
    if rows.is_empty() {
        return Ok(vec![]);
    }
    let ids: Vec<String> = rows.iter().map(|p| p.place_id.clone()).collect();
    let mut features = group_children(
        logged(store.list_place_features(&ids), "fetching place features")?,
        |f| (f.place_id, f.feature),
    );
    let mut images = group_children(
        logged(store.list_place_images(&ids), "fetching place images")?,
        |i| (i.place_id, i.image_url),
    );

    Ok(rows
        .into_iter()
        .map(|row| {
            let own_features = features.remove(&row.place_id).unwrap_or_default();
            let own_images = images.remove(&row.place_id).unwrap_or_default();
            Place::from_row(row, own_features, own_images)
        })
        .collect())
}

pub fn get_places(store: &dyn TravelStore) -> AppResult<Vec<Place>> {
    let rows = logged(store.list_places(), "fetching places")?;
    with_place_children(store, rows)
}

pub fn get_places_by_city_id(store: &dyn TravelStore, city_id: &str) -> AppResult<Vec<Place>> {
    let rows = logged(store.list_places_by_city(city_id), "fetching places for city")?;
    with_place_children(store, rows)
}

pub fn get_place_by_id(store: &dyn TravelStore, place_id: &str) -> AppResult<Option<Place>> {
    let row = logged(store.find_place(place_id), "fetching place")?;
    Ok(with_place_children(store, row.into_iter().collect())?.pop())
}

// --- Posts ---

/// Attaches images and orders newest first. The sort is stable, so posts
/// sharing a timestamp keep the store's order.
fn with_images(store: &dyn TravelStore, mut rows: Vec<PostWithRating>) -> AppResult<Vec<Post>> {
    if rows.is_empty() {
        return Ok(vec![]);
    }
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let ids: Vec<String> = rows.iter().map(|p| p.post_id.clone()).collect();
    let mut images = group_children(
        logged(store.list_post_images(&ids), "fetching post images")?,
        |i| (i.post_id, i.image_url),
    );

    Ok(rows
        .into_iter()
        .map(|row| {
            let own = images.remove(&row.post_id).unwrap_or_default();
            Post::from_row(row, own)
        })
        .collect())
}

pub fn get_posts(store: &dyn TravelStore) -> AppResult<Vec<Post>> {
    let rows = logged(store.list_posts(), "fetching posts")?;
    with_images(store, rows)
}

pub fn get_post_by_id(store: &dyn TravelStore, post_id: &str) -> AppResult<Option<Post>> {
    let row = logged(store.find_post(post_id), "fetching post")?;
    Ok(with_images(store, row.into_iter().collect())?.pop())
}

pub fn get_posts_by_user_id(store: &dyn TravelStore, user_id: &str) -> AppResult<Vec<Post>> {
    let rows = logged(store.list_posts_by_user(user_id), "fetching posts for user")?;
    with_images(store, rows)
}

// --- Comments & ratings ---

pub fn get_comments_by_post_id(store: &dyn TravelStore, post_id: &str) -> AppResult<Vec<Comment>> {
    logged(store.list_comments_by_post(post_id), "fetching comments")
}

pub fn get_ratings_by_post_id(store: &dyn TravelStore, post_id: &str) -> AppResult<Vec<Rating>> {
    logged(store.list_ratings_by_post(post_id), "fetching ratings")
}

// --- Companions ---

pub fn get_companion_requests(store: &dyn TravelStore) -> AppResult<Vec<CompanionRequest>> {
    let rows = logged(store.list_companion_requests(), "fetching companion requests")?;
    if rows.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<String> = rows.iter().map(|r| r.request_id.clone()).collect();
    let mut conditions = group_children(
        logged(store.list_request_conditions(&ids), "fetching request conditions")?,
        |c| (c.request_id, c.condition),
    );

    Ok(rows
        .into_iter()
        .map(|row| {
            let own = conditions.remove(&row.request_id).unwrap_or_default();
            CompanionRequest::from_row(row, own)
        })
        .collect())
}

pub fn get_companion_matches(store: &dyn TravelStore) -> AppResult<Vec<CompanionMatch>> {
    logged(store.list_companion_matches(), "fetching companion matches")
}

pub fn get_matches_by_request_id(store: &dyn TravelStore, request_id: &str) -> AppResult<Vec<CompanionMatch>> {
    logged(store.list_matches_by_request(request_id), "fetching matches for request")
}

// --- Follows ---

pub fn get_follows(store: &dyn TravelStore) -> AppResult<Vec<Follow>> {
    logged(store.list_follows(), "fetching follows")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use hamsafar_shared::ErrorCode;

    use super::*;
    use crate::store::faulty::{Fault, FaultyStore};
    use crate::store::MockStore;

    #[test]
    fn unknown_ids_read_as_absent() {
        let store = MockStore::seeded();
        assert!(get_user_by_id(&store, "non-existent-user").unwrap().is_none());
        assert!(get_post_by_id(&store, "non-existent-post").unwrap().is_none());
        assert!(get_profile_by_user_id(&store, "non-existent-user").unwrap().is_none());
        assert!(get_place_by_id(&store, "nowhere").unwrap().is_none());
    }

    #[test]
    fn unknown_parents_have_no_children() {
        let store = MockStore::seeded();
        assert!(get_posts_by_user_id(&store, "no-such-user").unwrap().is_empty());
        assert!(get_comments_by_post_id(&store, "no-such-post").unwrap().is_empty());
        assert!(get_matches_by_request_id(&store, "no-such-request").unwrap().is_empty());
    }

    #[test]
    fn posts_are_newest_first_with_images_and_ratings() {
        let store = MockStore::seeded();
        let posts = get_posts(&store).unwrap();
        assert!(!posts.is_empty());
        assert!(posts.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let first = posts.iter().find(|p| p.post_id == "post-1").unwrap();
        assert_eq!(first.images, vec!["/images/post_1_a.png", "/images/post_1_b.png"]);
        assert_eq!(first.rating_count, 2);
        assert!((first.avg_rating - 4.5).abs() < f64::EPSILON);

        assert!(posts.iter().all(|p| (0.0..=5.0).contains(&p.avg_rating) && p.rating_count >= 0));
    }

    #[test]
    fn posts_by_user_only_contains_that_user() {
        let store = MockStore::seeded();
        let posts = get_posts_by_user_id(&store, "user-1").unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.user_id == "user-1"));
        assert!(posts[0].created_at >= posts[1].created_at);
    }

    #[test]
    fn placeholder_cities_are_hidden_but_still_addressable() {
        let store = MockStore::seeded();
        let cities = get_cities(&store).unwrap();
        assert!(!cities.is_empty());
        assert!(cities
            .iter()
            .all(|c| !c.image.as_deref().unwrap_or("").contains(PLACEHOLDER_IMAGE_HOST)));
        assert!(cities.iter().any(|c| c.image.is_none()));
        assert!(get_city_by_id(&store, "city-4").unwrap().is_some());
    }

    #[test]
    fn places_carry_features_and_images() {
        let store = MockStore::seeded();
        let place = get_place_by_id(&store, "place-1").unwrap().unwrap();
        assert_eq!(place.features, vec!["historic", "family friendly"]);
        assert_eq!(place.images.len(), 2);

        let in_tabriz = get_places_by_city_id(&store, "city-3").unwrap();
        assert_eq!(in_tabriz.len(), 1);
        assert_eq!(in_tabriz[0].features, vec!["shopping", "covered"]);
    }

    #[test]
    fn profiles_carry_interests_and_follow_counts() {
        let store = MockStore::seeded();
        let profile = get_profile_by_user_id(&store, "user-1").unwrap().unwrap();
        assert_eq!(profile.interests, vec!["hiking", "photography", "nature"]);
        assert_eq!(profile.followers_count, 3);
        assert_eq!(profile.following_count, 2);

        let quiet = get_profile_by_user_id(&store, "user-6").unwrap().unwrap();
        assert!(quiet.interests.is_empty());
        assert_eq!(quiet.followers_count, 0);
    }

    #[test]
    fn companion_requests_carry_conditions() {
        let store = MockStore::seeded();
        let requests = get_companion_requests(&store).unwrap();
        let first = requests.iter().find(|r| r.request_id == "request-1").unwrap();
        assert_eq!(first.conditions, vec!["non-smoker", "shares fuel costs"]);
        assert_eq!(get_matches_by_request_id(&store, "request-1").unwrap().len(), 1);
    }

    #[test]
    fn user_subtypes_join_their_users() {
        let store = MockStore::seeded();
        let regular = get_regular_users(&store).unwrap();
        assert_eq!(regular.len(), 4);
        assert!(regular.iter().all(|r| r.user.user_type == UserType::Regular));

        let moderators = get_moderators(&store).unwrap();
        assert_eq!(moderators[0].user.user_id, "user-5");
        assert_eq!(moderators[0].access_level, AccessLevel::Standard);

        let admins = get_admins(&store).unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].user.user_type, UserType::Admin);
    }

    #[test]
    fn dataset_is_referentially_consistent() {
        let store = MockStore::seeded();
        let users = get_users(&store).unwrap();
        let user_ids: HashSet<_> = users.iter().map(|u| u.user_id.as_str()).collect();

        let profiles = get_profiles(&store).unwrap();
        for user in &users {
            assert_eq!(profiles.iter().filter(|p| p.user_id == user.user_id).count(), 1);
        }

        assert!(get_posts(&store).unwrap().iter().all(|p| user_ids.contains(p.user_id.as_str())));
        assert!(get_companion_requests(&store)
            .unwrap()
            .iter()
            .all(|r| user_ids.contains(r.user_id.as_str())));

        let follows = get_follows(&store).unwrap();
        assert!(follows.iter().all(|f| f.follower_id != f.following_id));
        assert!(follows.iter().all(|f| {
            user_ids.contains(f.follower_id.as_str()) && user_ids.contains(f.following_id.as_str())
        }));

        for place in get_places(&store).unwrap() {
            assert!(get_city_by_id(&store, &place.city_id).unwrap().is_some());
        }
    }

    #[test]
    fn read_failures_are_errors_not_empty_results() {
        let store = FaultyStore::seeded()
            .failing("list_posts", Fault::Unavailable)
            .failing("find_post", Fault::Unavailable);
        assert!(get_posts(&store).is_err());
        assert!(get_post_by_id(&store, "post-1").is_err());
        assert!(get_post_by_id(&store, "no-such-post").is_err());
    }

    #[test]
    fn child_table_failure_fails_the_whole_read() {
        let store = FaultyStore::seeded().failing("list_post_images", Fault::Unavailable);
        let err = get_posts(&store).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);

        let store = FaultyStore::seeded().failing("list_place_features", Fault::Unavailable);
        assert!(get_place_by_id(&store, "place-1").is_err());
        assert!(get_place_by_id(&store, "nowhere").unwrap().is_none());
    }
}
