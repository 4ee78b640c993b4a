//! Write accessor: validate input, apply business rules, then hand rows to the
//! store.
//!
//! Multi-table writes run as separate statements. When a child insert fails
//! the parent row stays in place and the error is returned to the caller.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use hamsafar_shared::{AppError, AppResult, ErrorCode};

use crate::models::*;
use crate::store::{StoreError, TravelStore};

use super::logged;

/// Recorded in `users.password_hash`; credentials are owned by the auth provider.
const EXTERNAL_AUTH: &str = "external_auth";

fn validated<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::new(ErrorCode::ValidationError, e.to_string()))
}

// --- Users & profiles ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUserInput {
    /// Identity issued by the auth provider.
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
}

pub fn create_user(store: &dyn TravelStore, input: NewUserInput) -> AppResult<User> {
    validated(&input)?;

    let new_user = NewUser {
        user_id: input.user_id,
        name: input.name,
        username: input.username.to_lowercase(),
        email: input.email.to_lowercase(),
        phone: input.phone,
        password_hash: EXTERNAL_AUTH.to_string(),
        profile_image: input.profile_image,
        user_type: UserType::Regular,
    };

    match store.insert_user(&new_user) {
        Ok(user) => {
            tracing::info!(user_id = %user.user_id, "user created");
            Ok(user)
        }
        Err(StoreError::Conflict(_)) => Err(AppError::new(
            ErrorCode::UserAlreadyExists,
            "username or email already taken",
        )),
        Err(e) => logged(Err(e), "creating user"),
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileChanges {
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    pub cover_image: Option<String>,
    /// Replaces the whole interest list when present.
    pub interests: Option<Vec<String>>,
}

pub fn update_profile(
    store: &dyn TravelStore,
    user_id: &str,
    profile_id: &str,
    changes: ProfileChanges,
) -> AppResult<()> {
    validated(&changes)?;

    let changeset = ProfileChangeset {
        bio: changes.bio,
        cover_image: changes.cover_image,
    };
    if !changeset.is_empty() {
        logged(store.update_profile(user_id, &changeset), "updating profile")?;
    }

    if let Some(interests) = changes.interests {
        logged(store.delete_profile_interests(profile_id), "clearing profile interests")?;
        if !interests.is_empty() {
            logged(
                store.insert_profile_interests(profile_id, &interests),
                "adding profile interests",
            )?;
        }
    }

    tracing::debug!(user_id, profile_id, "profile updated");
    Ok(())
}

// --- Posts ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPostInput {
    #[validate(length(min = 1))]
    pub user_id: String,
    pub place_id: Option<String>,
    pub city_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub experience_type: ExperienceType,
    #[serde(default)]
    pub images: Vec<String>,
}

/// New posts always enter moderation as pending.
pub fn create_post(store: &dyn TravelStore, input: NewPostInput) -> AppResult<Post> {
    validated(&input)?;

    let new_post = NewPost {
        user_id: input.user_id,
        place_id: input.place_id,
        city_id: input.city_id,
        title: input.title,
        content: input.content,
        experience_type: input.experience_type,
        approval_status: ApprovalStatus::Pending,
    };
    let row = logged(store.insert_post(&new_post), "creating post")?;

    if !input.images.is_empty() {
        logged(store.insert_post_images(&row.post_id, &input.images), "adding post images")?;
    }

    tracing::info!(post_id = %row.post_id, images = input.images.len(), "post created");
    Ok(Post::from_row(PostWithRating::unrated(row), input.images))
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostChanges {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub experience_type: Option<ExperienceType>,
    pub place_id: Option<String>,
    pub city_id: Option<String>,
    /// Replaces every image of the post when present.
    pub images: Option<Vec<String>>,
}

pub fn update_post(store: &dyn TravelStore, post_id: &str, changes: PostChanges) -> AppResult<()> {
    validated(&changes)?;

    let changeset = PostChangeset {
        title: changes.title,
        content: changes.content,
        experience_type: changes.experience_type,
        place_id: changes.place_id,
        city_id: changes.city_id,
    };
    if !changeset.is_empty() {
        logged(store.update_post(post_id, &changeset), "updating post")?;
    }

    if let Some(images) = changes.images {
        logged(store.delete_post_images(post_id), "clearing post images")?;
        if !images.is_empty() {
            logged(store.insert_post_images(post_id, &images), "adding post images")?;
        }
    }

    tracing::debug!(post_id, "post updated");
    Ok(())
}

pub fn delete_post(store: &dyn TravelStore, post_id: &str) -> AppResult<()> {
    logged(store.delete_post(post_id), "deleting post")?;
    tracing::info!(post_id, "post deleted");
    Ok(())
}

// --- Comments & ratings ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCommentInput {
    pub post_id: String,
    pub user_id: String,
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

pub fn create_comment(store: &dyn TravelStore, input: NewCommentInput) -> AppResult<Comment> {
    validated(&input)?;

    let comment = logged(
        store.insert_comment(&NewComment {
            post_id: input.post_id,
            user_id: input.user_id,
            content: input.content,
        }),
        "creating comment",
    )?;
    tracing::debug!(comment_id = %comment.comment_id, post_id = %comment.post_id, "comment created");
    Ok(comment)
}

pub fn delete_comment(store: &dyn TravelStore, comment_id: &str) -> AppResult<()> {
    logged(store.delete_comment(comment_id), "deleting comment")
}

#[derive(Debug, Validate)]
struct RatingInput {
    #[validate(range(min = 1, max = 5))]
    score: i16,
}

/// One rating per user and post; rating again overwrites the score.
pub fn create_or_update_rating(
    store: &dyn TravelStore,
    user_id: &str,
    post_id: &str,
    score: i16,
) -> AppResult<Rating> {
    RatingInput { score }.validate().map_err(|_| {
        AppError::new(ErrorCode::InvalidRating, format!("score must be between 1 and 5, got {score}"))
    })?;

    let rating = logged(
        store.upsert_rating(&NewRating {
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
            score,
        }),
        "saving rating",
    )?;
    tracing::debug!(user_id, post_id, score, "rating saved");
    Ok(rating)
}

// --- Follows ---

/// Following someone twice is not an error; the existing edge is kept.
pub fn follow_user(store: &dyn TravelStore, follower_id: &str, following_id: &str) -> AppResult<()> {
    if follower_id == following_id {
        return Err(AppError::new(ErrorCode::CannotFollowSelf, "Cannot follow yourself"));
    }

    let follow = NewFollow {
        follower_id: follower_id.to_string(),
        following_id: following_id.to_string(),
    };
    match store.insert_follow(&follow) {
        Ok(_) => {
            tracing::debug!(follower_id, following_id, "follow created");
            Ok(())
        }
        Err(StoreError::Conflict(_)) => {
            tracing::debug!(follower_id, following_id, "already following");
            Ok(())
        }
        Err(e) => logged(Err(e), "following user"),
    }
}

pub fn unfollow_user(store: &dyn TravelStore, follower_id: &str, following_id: &str) -> AppResult<()> {
    logged(store.delete_follow(follower_id, following_id), "unfollowing user")
}

pub fn is_following(store: &dyn TravelStore, follower_id: &str, following_id: &str) -> AppResult<bool> {
    logged(store.find_follow(follower_id, following_id), "checking follow status").map(|f| f.is_some())
}

// --- Companions ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCompanionRequestInput {
    pub user_id: String,
    pub destination_place_id: Option<String>,
    pub destination_city_id: Option<String>,
    pub travel_date: NaiveDate,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub conditions: Vec<String>,
}

/// Requests open as active.
pub fn create_companion_request(
    store: &dyn TravelStore,
    input: NewCompanionRequestInput,
) -> AppResult<CompanionRequest> {
    validated(&input)?;

    let row = logged(
        store.insert_companion_request(&NewCompanionRequest {
            user_id: input.user_id,
            destination_place_id: input.destination_place_id,
            destination_city_id: input.destination_city_id,
            travel_date: input.travel_date,
            description: input.description,
            status: RequestStatus::Active,
        }),
        "creating companion request",
    )?;

    if !input.conditions.is_empty() {
        logged(
            store.insert_request_conditions(&row.request_id, &input.conditions),
            "adding request conditions",
        )?;
    }

    tracing::info!(request_id = %row.request_id, "companion request created");
    Ok(CompanionRequest::from_row(row, input.conditions))
}

pub fn update_companion_request_status(
    store: &dyn TravelStore,
    request_id: &str,
    status: RequestStatus,
) -> AppResult<()> {
    logged(
        store.update_companion_request_status(request_id, status),
        "updating companion request status",
    )?;
    tracing::info!(request_id, %status, "companion request status changed");
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCompanionMatchInput {
    pub request_id: String,
    pub companion_user_id: String,
    #[validate(length(max = 1000))]
    pub message: Option<String>,
}

/// Offers start out pending until the requester answers.
pub fn create_companion_match(
    store: &dyn TravelStore,
    input: NewCompanionMatchInput,
) -> AppResult<CompanionMatch> {
    validated(&input)?;

    let created = logged(
        store.insert_companion_match(&NewCompanionMatch {
            request_id: input.request_id,
            companion_user_id: input.companion_user_id,
            status: MatchStatus::Pending,
            message: input.message,
        }),
        "creating companion match",
    )?;
    tracing::info!(match_id = %created.match_id, request_id = %created.request_id, "companion match created");
    Ok(created)
}

pub fn update_companion_match_status(
    store: &dyn TravelStore,
    match_id: &str,
    status: MatchStatus,
) -> AppResult<()> {
    logged(
        store.update_companion_match_status(match_id, status),
        "updating companion match status",
    )?;
    tracing::info!(match_id, %status, "companion match status changed");
    Ok(())
}
