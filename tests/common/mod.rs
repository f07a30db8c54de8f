#![allow(dead_code)] // each test binary uses a different subset of helpers

use chrono::Utc;
use grind_coach::coach::types::{Problem, Submission, UserProfile};

pub fn submission(
    name: &str,
    rating: Option<i64>,
    tags: &[&str],
    verdict: Option<&str>,
    ts: i64,
) -> Submission {
    Submission {
        problem: Problem {
            name: name.to_string(),
            index: "A".to_string(),
            rating,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            contest_id: Some(1),
        },
        verdict: verdict.map(str::to_string),
        programming_language: "Rust".to_string(),
        creation_time_seconds: ts,
        time_consumed_millis: 150,
        memory_consumed_bytes: 1 << 20,
        passed_test_count: 12,
    }
}

pub fn accepted(name: &str, rating: Option<i64>, tags: &[&str]) -> Submission {
    submission(name, rating, tags, Some("OK"), Utc::now().timestamp())
}

pub fn rejected(name: &str, rating: Option<i64>, tags: &[&str]) -> Submission {
    submission(
        name,
        rating,
        tags,
        Some("WRONG_ANSWER"),
        Utc::now().timestamp(),
    )
}

pub fn profile(handle: &str, rating: Option<i64>) -> UserProfile {
    UserProfile {
        handle: handle.to_string(),
        rating,
        max_rating: rating.map(|r| r + 100),
        rank: Some("specialist".to_string()),
    }
}
