//! Demo dataset for mock mode.

use chrono::{DateTime, Utc};

use crate::models::*;

use super::date;
use super::mock::MockTables;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn user(id: &str, name: &str, username: &str, user_type: UserType, joined: i64) -> User {
    User {
        user_id: id.into(),
        name: name.into(),
        username: username.into(),
        email: format!("{username}@example.com"),
        phone: None,
        profile_image: Some(format!("/images/avatar_{}.png", id.replace('-', "_"))),
        created_at: at(joined),
        user_type,
    }
}

fn post(
    id: &str,
    user_id: &str,
    place_id: Option<&str>,
    city_id: &str,
    title: &str,
    experience_type: ExperienceType,
    approval_status: ApprovalStatus,
    created: i64,
) -> PostRow {
    PostRow {
        post_id: id.into(),
        user_id: user_id.into(),
        place_id: place_id.map(Into::into),
        city_id: Some(city_id.into()),
        title: title.into(),
        content: format!("{title}: notes from the road."),
        experience_type,
        approval_status,
        created_at: at(created),
    }
}

pub(crate) fn demo_tables() -> MockTables {
    let mut t = MockTables::default();

    // 2024-01-15 onwards, one day apart
    let day = 86_400;
    let base = 1_705_314_600;

    t.users = vec![
        user("user-1", "Ali Ahmadi", "ali_ahmadi", UserType::Regular, base),
        user("user-2", "Sara Karimi", "sara_karimi", UserType::Regular, base + day),
        user("user-3", "Reza Hosseini", "reza_h", UserType::Regular, base + 2 * day),
        user("user-4", "Maryam Rahimi", "maryam_r", UserType::Regular, base + 3 * day),
        user("user-5", "Nima Jafari", "nima_mod", UserType::Moderator, base + 4 * day),
        user("user-6", "Leila Tehrani", "leila_admin", UserType::Admin, base + 5 * day),
    ];
    t.users[0].phone = Some("09121234567".into());

    t.regular_users = vec![
        RegularUserRow { user_id: "user-1".into(), experience_level: ExperienceLevel::Advanced },
        RegularUserRow { user_id: "user-2".into(), experience_level: ExperienceLevel::Intermediate },
        RegularUserRow { user_id: "user-3".into(), experience_level: ExperienceLevel::Beginner },
        RegularUserRow { user_id: "user-4".into(), experience_level: ExperienceLevel::Expert },
    ];
    t.moderators = vec![ModeratorRow { user_id: "user-5".into(), access_level: AccessLevel::Standard }];
    t.admins = vec![AdminRow { user_id: "user-6".into() }];

    t.profiles = (1..=6)
        .map(|n| ProfileRow {
            profile_id: format!("profile-{n}"),
            user_id: format!("user-{n}"),
            bio: Some("Traveller and storyteller.".into()),
            cover_image: Some(format!("/images/cover_profile_{n}.png")),
        })
        .collect();
    for (profile, interest) in [
        ("profile-1", "hiking"),
        ("profile-1", "photography"),
        ("profile-1", "nature"),
        ("profile-2", "history"),
        ("profile-2", "food"),
        ("profile-3", "deserts"),
        ("profile-4", "architecture"),
    ] {
        t.add_profile_interest(profile, interest);
    }

    t.cities = vec![
        City {
            city_id: "city-1".into(),
            name: "Isfahan".into(),
            province: "Isfahan".into(),
            description: Some("Half the world: bridges, domes and the grand square.".into()),
            image: Some("/images/city_isfahan.png".into()),
        },
        City {
            city_id: "city-2".into(),
            name: "Shiraz".into(),
            province: "Fars".into(),
            description: Some("Gardens, poets and the gateway to Persepolis.".into()),
            image: Some("/images/city_shiraz.png".into()),
        },
        City {
            city_id: "city-3".into(),
            name: "Tabriz".into(),
            province: "East Azerbaijan".into(),
            description: None,
            image: None,
        },
        City {
            city_id: "city-4".into(),
            name: "Yazd".into(),
            province: "Yazd".into(),
            description: Some("Windcatchers and adobe lanes.".into()),
            image: Some("https://placehold.co/600x400?text=Yazd".into()),
        },
    ];

    t.places = vec![
        PlaceRow {
            place_id: "place-1".into(),
            city_id: "city-1".into(),
            name: "Naqsh-e Jahan Square".into(),
            description: Some("One of the largest city squares in the world.".into()),
            latitude: Some(32.6575),
            longitude: Some(51.6777),
            map_url: None,
        },
        PlaceRow {
            place_id: "place-2".into(),
            city_id: "city-2".into(),
            name: "Eram Garden".into(),
            description: Some("Persian garden with a Qajar-era pavilion.".into()),
            latitude: Some(29.6362),
            longitude: Some(52.5250),
            map_url: None,
        },
        PlaceRow {
            place_id: "place-3".into(),
            city_id: "city-3".into(),
            name: "Tabriz Grand Bazaar".into(),
            description: None,
            latitude: None,
            longitude: None,
            map_url: None,
        },
    ];
    for (place, feature) in [
        ("place-1", "historic"),
        ("place-1", "family friendly"),
        ("place-2", "garden"),
        ("place-3", "shopping"),
        ("place-3", "covered"),
    ] {
        t.add_place_feature(place, feature);
    }
    for (place, image) in [
        ("place-1", "/images/place_1_a.png"),
        ("place-1", "/images/place_1_b.png"),
        ("place-2", "/images/place_2_a.png"),
        ("place-3", "/images/place_3_a.png"),
    ] {
        t.add_place_image(place, image);
    }

    t.posts = vec![
        post("post-1", "user-1", Some("place-1"), "city-1", "Sunset at the square", ExperienceType::Visited, ApprovalStatus::Approved, base + 10 * day),
        post("post-2", "user-2", Some("place-2"), "city-2", "Spring in Eram", ExperienceType::Visited, ApprovalStatus::Approved, base + 12 * day),
        post("post-3", "user-1", None, "city-3", "Someday, Tabriz", ExperienceType::Imagined, ApprovalStatus::Pending, base + 11 * day),
        post("post-4", "user-3", Some("place-3"), "city-3", "Lost in the bazaar", ExperienceType::Visited, ApprovalStatus::Rejected, base + 14 * day),
    ];
    for (post_id, image) in [
        ("post-1", "/images/post_1_a.png"),
        ("post-1", "/images/post_1_b.png"),
        ("post-2", "/images/post_2_a.png"),
        ("post-4", "/images/post_4_a.png"),
    ] {
        t.add_post_image(post_id, image);
    }

    t.comments = vec![
        Comment {
            comment_id: "comment-1".into(),
            post_id: "post-1".into(),
            user_id: "user-2".into(),
            content: "Beautiful shots!".into(),
            created_at: at(base + 10 * day + 3_600),
        },
        Comment {
            comment_id: "comment-2".into(),
            post_id: "post-1".into(),
            user_id: "user-3".into(),
            content: "Adding this to my list.".into(),
            created_at: at(base + 10 * day + 7_200),
        },
        Comment {
            comment_id: "comment-3".into(),
            post_id: "post-2".into(),
            user_id: "user-1".into(),
            content: "Was it crowded?".into(),
            created_at: at(base + 12 * day + 600),
        },
    ];

    t.ratings = [("user-2", "post-1", 5), ("user-3", "post-1", 4), ("user-1", "post-2", 4)]
        .into_iter()
        .map(|(user_id, post_id, score)| Rating {
            user_id: user_id.into(),
            post_id: post_id.into(),
            score,
            created_at: at(base + 15 * day),
        })
        .collect();

    t.follows = [
        ("user-1", "user-2"),
        ("user-1", "user-3"),
        ("user-2", "user-1"),
        ("user-3", "user-1"),
        ("user-4", "user-1"),
    ]
    .into_iter()
    .map(|(follower_id, following_id)| Follow {
        follower_id: follower_id.into(),
        following_id: following_id.into(),
        created_at: at(base + 16 * day),
    })
    .collect();

    t.companion_requests = vec![
        CompanionRequestRow {
            request_id: "request-1".into(),
            user_id: "user-2".into(),
            destination_place_id: Some("place-2".into()),
            destination_city_id: Some("city-2".into()),
            travel_date: date(2025, 4, 2),
            description: "Looking for company for a Nowruz trip to Shiraz.".into(),
            status: RequestStatus::Active,
            created_at: at(base + 20 * day),
        },
        CompanionRequestRow {
            request_id: "request-2".into(),
            user_id: "user-4".into(),
            destination_place_id: None,
            destination_city_id: Some("city-3".into()),
            travel_date: date(2025, 9, 10),
            description: "Autumn road trip through the north-west.".into(),
            status: RequestStatus::Completed,
            created_at: at(base + 21 * day),
        },
    ];
    for (request, condition) in [
        ("request-1", "non-smoker"),
        ("request-1", "shares fuel costs"),
        ("request-2", "has a driving licence"),
    ] {
        t.add_request_condition(request, condition);
    }

    t.companion_matches = vec![CompanionMatch {
        match_id: "match-1".into(),
        request_id: "request-1".into(),
        companion_user_id: "user-3".into(),
        status: MatchStatus::Pending,
        message: Some("I know the city well, happy to join.".into()),
        created_at: at(base + 22 * day),
    }];

    t
}
