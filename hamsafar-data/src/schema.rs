// Mirrors the hosted database. The `*_with_*` entries are read-only views that
// compute follower counts and rating aggregates server-side.

pub mod sql_types {
    #[derive(diesel::query_builder::QueryId, diesel::sql_types::SqlType)]
    #[diesel(postgres_type(name = "user_type"))]
    pub struct UserType;

    #[derive(diesel::query_builder::QueryId, diesel::sql_types::SqlType)]
    #[diesel(postgres_type(name = "experience_type"))]
    pub struct ExperienceType;

    #[derive(diesel::query_builder::QueryId, diesel::sql_types::SqlType)]
    #[diesel(postgres_type(name = "approval_status"))]
    pub struct ApprovalStatus;

    #[derive(diesel::query_builder::QueryId, diesel::sql_types::SqlType)]
    #[diesel(postgres_type(name = "request_status"))]
    pub struct RequestStatus;

    #[derive(diesel::query_builder::QueryId, diesel::sql_types::SqlType)]
    #[diesel(postgres_type(name = "match_status"))]
    pub struct MatchStatus;

    #[derive(diesel::query_builder::QueryId, diesel::sql_types::SqlType)]
    #[diesel(postgres_type(name = "experience_level"))]
    pub struct ExperienceLevel;

    #[derive(diesel::query_builder::QueryId, diesel::sql_types::SqlType)]
    #[diesel(postgres_type(name = "access_level"))]
    pub struct AccessLevel;
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::UserType;

    users (user_id) {
        user_id -> Text,
        name -> Text,
        username -> Text,
        email -> Text,
        phone -> Nullable<Text>,
        password_hash -> Text,
        profile_image -> Nullable<Text>,
        created_at -> Timestamptz,
        user_type -> UserType,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::ExperienceLevel;

    regular_users (user_id) {
        user_id -> Text,
        experience_level -> ExperienceLevel,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::AccessLevel;

    moderators (user_id) {
        user_id -> Text,
        access_level -> AccessLevel,
    }
}

diesel::table! {
    admins (user_id) {
        user_id -> Text,
    }
}

diesel::table! {
    profiles (profile_id) {
        profile_id -> Text,
        user_id -> Text,
        bio -> Nullable<Text>,
        cover_image -> Nullable<Text>,
    }
}

diesel::table! {
    profiles_with_counts (profile_id) {
        profile_id -> Text,
        user_id -> Text,
        bio -> Nullable<Text>,
        cover_image -> Nullable<Text>,
        followers_count -> Int8,
        following_count -> Int8,
    }
}

diesel::table! {
    profile_interests (id) {
        id -> Int8,
        profile_id -> Text,
        interest -> Text,
    }
}

diesel::table! {
    cities (city_id) {
        city_id -> Text,
        name -> Text,
        province -> Text,
        description -> Nullable<Text>,
        image -> Nullable<Text>,
    }
}

diesel::table! {
    places (place_id) {
        place_id -> Text,
        city_id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        latitude -> Nullable<Float8>,
        longitude -> Nullable<Float8>,
        map_url -> Nullable<Text>,
    }
}

diesel::table! {
    place_features (id) {
        id -> Int8,
        place_id -> Text,
        feature -> Text,
    }
}

diesel::table! {
    place_images (id) {
        id -> Int8,
        place_id -> Text,
        image_url -> Text,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::{ApprovalStatus, ExperienceType};

    posts (post_id) {
        post_id -> Text,
        user_id -> Text,
        place_id -> Nullable<Text>,
        city_id -> Nullable<Text>,
        title -> Text,
        content -> Text,
        experience_type -> ExperienceType,
        approval_status -> ApprovalStatus,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::{ApprovalStatus, ExperienceType};

    posts_with_rating (post_id) {
        post_id -> Text,
        user_id -> Text,
        place_id -> Nullable<Text>,
        city_id -> Nullable<Text>,
        title -> Text,
        content -> Text,
        experience_type -> ExperienceType,
        approval_status -> ApprovalStatus,
        created_at -> Timestamptz,
        avg_rating -> Float8,
        rating_count -> Int8,
    }
}

diesel::table! {
    post_images (id) {
        id -> Int8,
        post_id -> Text,
        image_url -> Text,
    }
}

diesel::table! {
    comments (comment_id) {
        comment_id -> Text,
        post_id -> Text,
        user_id -> Text,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    ratings (user_id, post_id) {
        user_id -> Text,
        post_id -> Text,
        score -> Int2,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    follows (follower_id, following_id) {
        follower_id -> Text,
        following_id -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::RequestStatus;

    companion_requests (request_id) {
        request_id -> Text,
        user_id -> Text,
        destination_place_id -> Nullable<Text>,
        destination_city_id -> Nullable<Text>,
        travel_date -> Date,
        description -> Text,
        status -> RequestStatus,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    request_conditions (id) {
        id -> Int8,
        request_id -> Text,
        condition -> Text,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::MatchStatus;

    companion_matches (match_id) {
        match_id -> Text,
        request_id -> Text,
        companion_user_id -> Text,
        status -> MatchStatus,
        message -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(profiles -> users (user_id));
diesel::joinable!(places -> cities (city_id));
diesel::joinable!(posts -> users (user_id));
diesel::joinable!(post_images -> posts (post_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(companion_matches -> companion_requests (request_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    profiles,
    cities,
    places,
    posts,
    post_images,
    comments,
    companion_requests,
    companion_matches,
);
