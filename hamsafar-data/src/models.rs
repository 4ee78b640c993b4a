use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::schema::{
    admins, cities, comments, companion_matches, companion_requests, follows, moderators,
    place_features, place_images, places, post_images, posts, posts_with_rating,
    profile_interests, profiles, profiles_with_counts, ratings, regular_users, request_conditions,
    users,
};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::UserType"]
#[DbValueStyle = "snake_case"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserType {
    Regular,
    Moderator,
    Admin,
}

/// Whether a post describes a trip that happened or one the author dreams of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::ExperienceType"]
#[DbValueStyle = "snake_case"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExperienceType {
    Visited,
    Imagined,
}

/// Moderation state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::ApprovalStatus"]
#[DbValueStyle = "snake_case"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::RequestStatus"]
#[DbValueStyle = "snake_case"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::MatchStatus"]
#[DbValueStyle = "snake_case"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::ExperienceLevel"]
#[DbValueStyle = "snake_case"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::AccessLevel"]
#[DbValueStyle = "snake_case"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccessLevel {
    Limited,
    Standard,
    Full,
}

// --- User ---

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = users)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_type: UserType,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub user_id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    /// Credentials live with the auth service; the column only records that.
    pub password_hash: String,
    pub profile_image: Option<String>,
    pub user_type: UserType,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = regular_users)]
pub struct RegularUserRow {
    pub user_id: String,
    pub experience_level: ExperienceLevel,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = moderators)]
pub struct ModeratorRow {
    pub user_id: String,
    pub access_level: AccessLevel,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admins)]
pub struct AdminRow {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegularUser {
    #[serde(flatten)]
    pub user: User,
    pub experience_level: ExperienceLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct Moderator {
    #[serde(flatten)]
    pub user: User,
    pub access_level: AccessLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct Admin {
    #[serde(flatten)]
    pub user: User,
}

// --- Profile ---

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
pub struct ProfileRow {
    pub profile_id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles_with_counts)]
pub struct ProfileWithCounts {
    pub profile_id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub cover_image: Option<String>,
    pub followers_count: i64,
    pub following_count: i64,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = profiles)]
pub struct ProfileChangeset {
    pub bio: Option<String>,
    pub cover_image: Option<String>,
}

impl ProfileChangeset {
    pub fn is_empty(&self) -> bool {
        self.bio.is_none() && self.cover_image.is_none()
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profile_interests)]
pub struct ProfileInterest {
    pub id: i64,
    pub profile_id: String,
    pub interest: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = profile_interests)]
pub struct NewProfileInterest<'a> {
    pub profile_id: &'a str,
    pub interest: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub profile_id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub cover_image: Option<String>,
    pub interests: Vec<String>,
    pub followers_count: i64,
    pub following_count: i64,
}

impl Profile {
    pub fn from_row(row: ProfileWithCounts, interests: Vec<String>) -> Self {
        Self {
            profile_id: row.profile_id,
            user_id: row.user_id,
            bio: row.bio,
            cover_image: row.cover_image,
            interests,
            followers_count: row.followers_count,
            following_count: row.following_count,
        }
    }
}

// --- City / Place ---

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = cities)]
pub struct City {
    pub city_id: String,
    pub name: String,
    pub province: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = places)]
pub struct PlaceRow {
    pub place_id: String,
    pub city_id: String,
    pub name: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub map_url: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = place_features)]
pub struct PlaceFeature {
    pub id: i64,
    pub place_id: String,
    pub feature: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = place_images)]
pub struct PlaceImage {
    pub id: i64,
    pub place_id: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub place_id: String,
    pub city_id: String,
    pub name: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub map_url: Option<String>,
    pub features: Vec<String>,
    pub images: Vec<String>,
}

impl Place {
    pub fn from_row(row: PlaceRow, features: Vec<String>, images: Vec<String>) -> Self {
        Self {
            place_id: row.place_id,
            city_id: row.city_id,
            name: row.name,
            description: row.description,
            latitude: row.latitude,
            longitude: row.longitude,
            map_url: row.map_url,
            features,
            images,
        }
    }
}

// --- Post ---

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
pub struct PostRow {
    pub post_id: String,
    pub user_id: String,
    pub place_id: Option<String>,
    pub city_id: Option<String>,
    pub title: String,
    pub content: String,
    pub experience_type: ExperienceType,
    pub approval_status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts_with_rating)]
pub struct PostWithRating {
    pub post_id: String,
    pub user_id: String,
    pub place_id: Option<String>,
    pub city_id: Option<String>,
    pub title: String,
    pub content: String,
    pub experience_type: ExperienceType,
    pub approval_status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub avg_rating: f64,
    pub rating_count: i64,
}

impl PostWithRating {
    /// A freshly inserted post has no ratings yet.
    pub fn unrated(row: PostRow) -> Self {
        Self {
            post_id: row.post_id,
            user_id: row.user_id,
            place_id: row.place_id,
            city_id: row.city_id,
            title: row.title,
            content: row.content,
            experience_type: row.experience_type,
            approval_status: row.approval_status,
            created_at: row.created_at,
            avg_rating: 0.0,
            rating_count: 0,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPost {
    pub user_id: String,
    pub place_id: Option<String>,
    pub city_id: Option<String>,
    pub title: String,
    pub content: String,
    pub experience_type: ExperienceType,
    pub approval_status: ApprovalStatus,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = posts)]
pub struct PostChangeset {
    pub title: Option<String>,
    pub content: Option<String>,
    pub experience_type: Option<ExperienceType>,
    pub place_id: Option<String>,
    pub city_id: Option<String>,
}

impl PostChangeset {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.experience_type.is_none()
            && self.place_id.is_none()
            && self.city_id.is_none()
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = post_images)]
pub struct PostImage {
    pub id: i64,
    pub post_id: String,
    pub image_url: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = post_images)]
pub struct NewPostImage<'a> {
    pub post_id: &'a str,
    pub image_url: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub post_id: String,
    pub user_id: String,
    pub place_id: Option<String>,
    pub city_id: Option<String>,
    pub title: String,
    pub content: String,
    pub experience_type: ExperienceType,
    pub approval_status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub images: Vec<String>,
    pub avg_rating: f64,
    pub rating_count: i64,
}

impl Post {
    pub fn from_row(row: PostWithRating, images: Vec<String>) -> Self {
        Self {
            post_id: row.post_id,
            user_id: row.user_id,
            place_id: row.place_id,
            city_id: row.city_id,
            title: row.title,
            content: row.content,
            experience_type: row.experience_type,
            approval_status: row.approval_status,
            created_at: row.created_at,
            images,
            avg_rating: row.avg_rating,
            rating_count: row.rating_count,
        }
    }
}

// --- Comment ---

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub comment_id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment {
    pub post_id: String,
    pub user_id: String,
    pub content: String,
}

// --- Rating ---

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = ratings)]
pub struct Rating {
    pub user_id: String,
    pub post_id: String,
    pub score: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ratings)]
pub struct NewRating {
    pub user_id: String,
    pub post_id: String,
    pub score: i16,
}

// --- Follow ---

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = follows)]
pub struct Follow {
    pub follower_id: String,
    pub following_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = follows)]
pub struct NewFollow {
    pub follower_id: String,
    pub following_id: String,
}

// --- Companion request / match ---

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companion_requests)]
pub struct CompanionRequestRow {
    pub request_id: String,
    pub user_id: String,
    pub destination_place_id: Option<String>,
    pub destination_city_id: Option<String>,
    pub travel_date: NaiveDate,
    pub description: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companion_requests)]
pub struct NewCompanionRequest {
    pub user_id: String,
    pub destination_place_id: Option<String>,
    pub destination_city_id: Option<String>,
    pub travel_date: NaiveDate,
    pub description: String,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = request_conditions)]
pub struct RequestCondition {
    pub id: i64,
    pub request_id: String,
    pub condition: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = request_conditions)]
pub struct NewRequestCondition<'a> {
    pub request_id: &'a str,
    pub condition: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanionRequest {
    pub request_id: String,
    pub user_id: String,
    pub destination_place_id: Option<String>,
    pub destination_city_id: Option<String>,
    pub travel_date: NaiveDate,
    pub description: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub conditions: Vec<String>,
}

impl CompanionRequest {
    pub fn from_row(row: CompanionRequestRow, conditions: Vec<String>) -> Self {
        Self {
            request_id: row.request_id,
            user_id: row.user_id,
            destination_place_id: row.destination_place_id,
            destination_city_id: row.destination_city_id,
            travel_date: row.travel_date,
            description: row.description,
            status: row.status,
            created_at: row.created_at,
            conditions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = companion_matches)]
pub struct CompanionMatch {
    pub match_id: String,
    pub request_id: String,
    pub companion_user_id: String,
    pub status: MatchStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companion_matches)]
pub struct NewCompanionMatch {
    pub request_id: String,
    pub companion_user_id: String,
    pub status: MatchStatus,
    pub message: Option<String>,
}
