//! Canned backend data

use chrono::{TimeZone, Utc};
use vlogsnap_core::{User, Video, DEFAULT_AVATAR};

/// Fixed profile returned for every successful sign-in
pub fn demo_user(email: &str) -> User {
    User {
        id: "1".to_string(),
        username: "creativemind".to_string(),
        email: email.to_string(),
        full_name: "Alex Johnson".to_string(),
        avatar: Some(DEFAULT_AVATAR.to_string()),
        bio: Some("Content creator sharing travel, food, and lifestyle moments ✨".to_string()),
        followers: 45_600,
        following: 1_234,
        videos: 89,
    }
}

struct SeedVideo {
    id: &'static str,
    title: &'static str,
    username: &'static str,
    views: u64,
    likes: u64,
    comments: u64,
    thumbnail: &'static str,
    video_url: &'static str,
    duration: &'static str,
    description: &'static str,
    hashtags: [&'static str; 3],
    day: u32,
}

const SEED: [SeedVideo; 3] = [
    SeedVideo {
        id: "1",
        title: "Amazing Travel Adventure in Bali - You Won't Believe What Happened!",
        username: "traveljunkie",
        views: 125_000,
        likes: 8_500,
        comments: 342,
        thumbnail: "https://images.pexels.com/photos/3225517/pexels-photo-3225517.jpeg?auto=compress&cs=tinysrgb&w=800",
        video_url: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
        duration: "3:45",
        description: "Join me on this incredible journey through Bali!",
        hashtags: ["#travel", "#bali", "#adventure"],
        day: 15,
    },
    SeedVideo {
        id: "2",
        title: "Cooking the Perfect Pasta - Chef's Secret Recipe",
        username: "kitchenmaster",
        views: 89_000,
        likes: 6_200,
        comments: 189,
        thumbnail: "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=800",
        video_url: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
        duration: "2:18",
        description: "Learn the secret to perfect pasta every time!",
        hashtags: ["#cooking", "#pasta", "#recipe"],
        day: 14,
    },
    SeedVideo {
        id: "3",
        title: "Mind-Blowing Magic Tricks That Will Amaze You",
        username: "magicwizard",
        views: 234_000,
        likes: 15_600,
        comments: 891,
        thumbnail: "https://images.pexels.com/photos/6941/music-bokeh-lights-party.jpg?auto=compress&cs=tinysrgb&w=800",
        video_url: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
        duration: "4:02",
        description: "Prepare to be amazed by these incredible magic tricks!",
        hashtags: ["#magic", "#tricks", "#amazing"],
        day: 13,
    },
];

/// The three-video starter feed, newest first
pub fn seed_videos() -> Vec<Video> {
    SEED.iter()
        .map(|seed| Video {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            username: seed.username.to_string(),
            views: seed.views,
            likes: seed.likes,
            comments: seed.comments,
            thumbnail: seed.thumbnail.to_string(),
            video_url: seed.video_url.to_string(),
            duration: seed.duration.to_string(),
            description: Some(seed.description.to_string()),
            hashtags: Some(seed.hashtags.iter().map(|t| t.to_string()).collect()),
            created_at: Utc
                .with_ymd_and_hms(2024, 1, seed.day, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            is_liked: false,
            is_bookmarked: false,
        })
        .collect()
}
