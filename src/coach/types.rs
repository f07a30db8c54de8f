use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::ACCEPTED_VERDICT;

/// One problem as delivered by the Codeforces API. Tag uniqueness is not
/// guaranteed by the source, so readers go through [`Problem::unique_tags`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub name: String,
    pub index: String,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub contest_id: Option<u32>,
}

impl Problem {
    /// Tags with duplicates removed, first occurrence order preserved.
    pub fn unique_tags(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for tag in &self.tags {
            if !seen.contains(&tag.as_str()) {
                seen.push(tag.as_str());
            }
        }
        seen
    }

    pub fn difficulty_bucket(&self) -> RatingBucket {
        RatingBucket::of(self.rating.unwrap_or(0))
    }
}

/// One raw submission record. Owned by the external data supplier; the
/// engine only reads slices passed in per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub problem: Problem,
    #[serde(default)]
    pub verdict: Option<String>,
    pub programming_language: String,
    pub creation_time_seconds: i64,
    #[serde(default)]
    pub time_consumed_millis: i64,
    #[serde(default)]
    pub memory_consumed_bytes: i64,
    #[serde(default)]
    pub passed_test_count: u32,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        self.verdict.as_deref() == Some(ACCEPTED_VERDICT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub handle: String,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub max_rating: Option<i64>,
    #[serde(default)]
    pub rank: Option<String>,
}

/// Contiguous, half-open rating ranges covering [0, ∞).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingBucket {
    Beginner,
    Easy,
    Medium,
    Hard,
    Expert,
    Master,
}

impl RatingBucket {
    pub const ALL: [RatingBucket; 6] = [
        Self::Beginner,
        Self::Easy,
        Self::Medium,
        Self::Hard,
        Self::Expert,
        Self::Master,
    ];

    pub fn of(rating: i64) -> Self {
        match rating {
            i64::MIN..=799 => Self::Beginner,
            800..=1199 => Self::Easy,
            1200..=1599 => Self::Medium,
            1600..=1999 => Self::Hard,
            2000..=2399 => Self::Expert,
            _ => Self::Master,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner (0-799)",
            Self::Easy => "Easy (800-1199)",
            Self::Medium => "Medium (1200-1599)",
            Self::Hard => "Hard (1600-1999)",
            Self::Expert => "Expert (2000-2399)",
            Self::Master => "Master (2400+)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Practice,
    Improvement,
    Topic,
    Contest,
    Streak,
}

impl SuggestionType {
    /// Case-insensitive match; unrecognized values fall back to Practice.
    pub fn parse_loose(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "improvement" => Self::Improvement,
            "topic" => Self::Topic,
            "contest" => Self::Contest,
            "streak" => Self::Streak,
            _ => Self::Practice,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Practice => "book.fill",
            Self::Improvement => "chart.line.uptrend.xyaxis",
            Self::Topic => "tag.fill",
            Self::Contest => "trophy.fill",
            Self::Streak => "flame.fill",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Practice => "blue",
            Self::Improvement => "green",
            Self::Topic => "purple",
            Self::Contest => "orange",
            Self::Streak => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl SuggestionPriority {
    /// Case-insensitive match; unrecognized values fall back to Medium.
    pub fn parse_loose(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// One typed suggestion decoded from the generative model's reply.
/// Constructed only by the parser; immutable once built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub suggestion_type: SuggestionType,
    pub priority: SuggestionPriority,
    pub action: String,
    pub url: Option<String>,
}

/// Priority scale for local recommendations. Deliberately a separate enum
/// from [`SuggestionPriority`]; the two scales are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

impl RecommendationPriority {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::High => "exclamationmark.circle.fill",
            Self::Medium => "info.circle.fill",
            Self::Low => "lightbulb.fill",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::High => "red",
            Self::Medium => "orange",
            Self::Low => "blue",
        }
    }
}

/// One deterministic problem recommendation from the local recommender.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecommendation {
    pub id: Uuid,
    pub title: String,
    pub difficulty: String,
    pub topic: String,
    pub reason: String,
    pub url: String,
    pub priority: RecommendationPriority,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketShare {
    pub bucket: RatingBucket,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicAnalysis {
    /// Canonical topics solved fewer times than the prompt threshold.
    pub weak: Vec<String>,
    /// Top 3 tags by accepted count, first-encounter order breaking ties.
    pub strong: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyProgression {
    pub avg_recent_rating: i64,
    pub recommended_min: i64,
    pub recommended_max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityLevel {
    High,
    Medium,
    Low,
}

impl ActivityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPerformance {
    pub count: usize,
    pub accepted_count: usize,
    pub acceptance_rate_percent: f64,
    pub unique_accepted_problems: usize,
    pub activity_level: ActivityLevel,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;

    use super::*;

    pub(crate) fn submission(
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
            time_consumed_millis: 100,
            memory_consumed_bytes: 1 << 16,
            passed_test_count: 10,
        }
    }

    pub(crate) fn accepted(name: &str, rating: Option<i64>, tags: &[&str]) -> Submission {
        submission(name, rating, tags, Some("OK"), Utc::now().timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_cover_the_rating_axis() {
        assert_eq!(RatingBucket::of(0), RatingBucket::Beginner);
        assert_eq!(RatingBucket::of(799), RatingBucket::Beginner);
        assert_eq!(RatingBucket::of(800), RatingBucket::Easy);
        assert_eq!(RatingBucket::of(1200), RatingBucket::Medium);
        assert_eq!(RatingBucket::of(1600), RatingBucket::Hard);
        assert_eq!(RatingBucket::of(2000), RatingBucket::Expert);
        assert_eq!(RatingBucket::of(2399), RatingBucket::Expert);
        assert_eq!(RatingBucket::of(2400), RatingBucket::Master);
        assert_eq!(RatingBucket::of(3500), RatingBucket::Master);
    }

    #[test]
    fn unrated_problem_falls_into_beginner() {
        let p = Problem {
            name: "X".to_string(),
            index: "A".to_string(),
            rating: None,
            tags: vec![],
            contest_id: None,
        };
        assert_eq!(p.difficulty_bucket(), RatingBucket::Beginner);
    }

    #[test]
    fn unique_tags_dedupes_preserving_order() {
        let p = Problem {
            name: "X".to_string(),
            index: "A".to_string(),
            rating: Some(1200),
            tags: vec!["dp".into(), "math".into(), "dp".into()],
            contest_id: None,
        };
        assert_eq!(p.unique_tags(), vec!["dp", "math"]);
    }

    #[test]
    fn loose_parsing_defaults() {
        assert_eq!(SuggestionType::parse_loose("CONTEST"), SuggestionType::Contest);
        assert_eq!(SuggestionType::parse_loose("???"), SuggestionType::Practice);
        assert_eq!(SuggestionPriority::parse_loose("High"), SuggestionPriority::High);
        assert_eq!(SuggestionPriority::parse_loose("urgent"), SuggestionPriority::Medium);
    }

    #[test]
    fn presentation_accessors_are_stable() {
        assert_eq!(SuggestionType::Streak.icon(), "flame.fill");
        assert_eq!(SuggestionType::Topic.color(), "purple");
        assert_eq!(SuggestionPriority::High.display_text(), "High");
        assert_eq!(RecommendationPriority::High.icon(), "exclamationmark.circle.fill");
        assert_eq!(RecommendationPriority::Low.color(), "blue");
    }

    #[test]
    fn submission_serde_roundtrip() {
        let json = r#"{
            "problem": {"name": "Theatre Square", "index": "A", "rating": 1000,
                        "tags": ["math"], "contestId": 1},
            "verdict": "OK",
            "programmingLanguage": "Rust",
            "creationTimeSeconds": 1700000000,
            "timeConsumedMillis": 30,
            "memoryConsumedBytes": 1024,
            "passedTestCount": 5
        }"#;
        let sub: Submission = serde_json::from_str(json).unwrap();
        assert!(sub.is_accepted());
        assert_eq!(sub.problem.difficulty_bucket(), RatingBucket::Easy);
    }
}
