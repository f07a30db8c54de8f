//! Deterministic, LLM-free problem recommendations. Never calls out and
//! never fails; no history means no recommendations.

use uuid::Uuid;

use crate::coach::analysis::tag_counts;
use crate::coach::types::{ProblemRecommendation, RecommendationPriority, Submission};
use crate::constants::{
    CANONICAL_TOPICS, DEFAULT_WORKING_RATING, MAX_WEAK_TOPIC_RECOMMENDATIONS,
    WEAK_TOPIC_MIN_SOLVED_LOCAL,
};

/// Rank up to `target_count` problem recommendations from the accepted
/// history. `user_rating` of zero or less substitutes a default working
/// rating for the arithmetic only; it is never surfaced as user data.
pub fn recommend(
    accepted: &[Submission],
    user_rating: i64,
    target_count: usize,
) -> Vec<ProblemRecommendation> {
    if accepted.is_empty() {
        return Vec::new();
    }

    let rating = if user_rating > 0 {
        user_rating
    } else {
        DEFAULT_WORKING_RATING
    };

    let (counts, _) = tag_counts(accepted);
    let mut recommendations = Vec::new();

    // Weak canonical topics first, in fixed list order. The local threshold
    // is looser than the prompt-analysis one on purpose.
    let weak_topics = CANONICAL_TOPICS
        .iter()
        .filter(|topic| counts.get(**topic).copied().unwrap_or(0) < WEAK_TOPIC_MIN_SOLVED_LOCAL)
        .take(MAX_WEAK_TOPIC_RECOMMENDATIONS);

    for topic in weak_topics {
        let solved = counts.get(*topic).copied().unwrap_or(0);
        recommendations.push(ProblemRecommendation {
            id: Uuid::new_v4(),
            title: format!("Master {}", capitalize(topic)),
            difficulty: format!("Rating {} - {}", rating - 50, rating + 150),
            topic: topic.to_string(),
            reason: format!("You've solved only {solved} problems in this area"),
            url: problemset_url(Some(topic)),
            priority: RecommendationPriority::High,
        });
    }

    // If the solved history sits well below the user's level, nudge upward.
    let rated_sum: i64 = accepted
        .iter()
        .filter_map(|s| s.problem.rating.filter(|r| *r > 0))
        .sum();
    let avg_solved_rating = rated_sum / accepted.len().max(1) as i64;

    if avg_solved_rating < rating - 100 {
        recommendations.push(ProblemRecommendation {
            id: Uuid::new_v4(),
            title: "Challenge Yourself".to_string(),
            difficulty: format!("Rating {} - {}", rating, rating + 200),
            topic: "mixed".to_string(),
            reason: "Your recent problems are too easy. Time to level up!".to_string(),
            url: problemset_url(None),
            priority: RecommendationPriority::High,
        });
    }

    recommendations.truncate(target_count);
    recommendations
}

fn problemset_url(tag: Option<&str>) -> String {
    match tag {
        Some(tag) => format!(
            "https://codeforces.com/problemset?tags={}&order=BY_RATING_ASC",
            tag.replace(' ', "%20")
        ),
        None => "https://codeforces.com/problemset?order=BY_RATING_ASC".to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
