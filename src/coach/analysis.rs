//! Pure statistics over a submission history. Every function here is
//! side-effect-free, takes immutable slices, and never fails: absent or
//! zero data yields empty/zero results.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use crate::coach::types::*;
use crate::constants::{
    CANONICAL_TOPICS, HIGH_ACTIVITY_SUBMISSIONS, MEDIUM_ACTIVITY_SUBMISSIONS, PROGRESSION_SAMPLE,
    RECENT_WINDOW_DAYS, WEAK_TOPIC_MIN_SOLVED_PROMPT,
};

/// Bucket the accepted submissions by problem rating. All six buckets are
/// returned in ascending order; an unrated problem counts as rating 0 and
/// lands in Beginner (a known quirk of the source data, kept as-is).
pub fn rating_distribution(accepted: &[Submission]) -> Vec<BucketShare> {
    let mut counts: HashMap<RatingBucket, usize> = HashMap::new();
    for sub in accepted {
        *counts.entry(sub.problem.difficulty_bucket()).or_insert(0) += 1;
    }

    let total = accepted.len();
    RatingBucket::ALL
        .iter()
        .map(|bucket| {
            let count = counts.get(bucket).copied().unwrap_or(0);
            let percent = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            BucketShare {
                bucket: *bucket,
                count,
                percent,
            }
        })
        .collect()
}

/// Counts tag occurrences across accepted submissions (a submission with N
/// distinct tags contributes N counts) and both directions of the result:
/// weak canonical topics and the strongest three tags overall.
pub fn topic_weaknesses(accepted: &[Submission]) -> TopicAnalysis {
    let (counts, encounter_order) = tag_counts(accepted);

    let weak = CANONICAL_TOPICS
        .iter()
        .filter(|topic| counts.get(**topic).copied().unwrap_or(0) < WEAK_TOPIC_MIN_SOLVED_PROMPT)
        .map(|topic| topic.to_string())
        .collect();

    // Stable sort keeps first-encountered order among equal counts.
    let mut strong: Vec<(String, usize)> = encounter_order
        .iter()
        .map(|tag| (tag.clone(), counts[tag.as_str()]))
        .collect();
    strong.sort_by(|a, b| b.1.cmp(&a.1));
    strong.truncate(3);

    TopicAnalysis { weak, strong }
}

/// Average rating over the most recent [`PROGRESSION_SAMPLE`] accepted
/// submissions (the caller passes newest-first) and the next recommended
/// difficulty window. Zero/unset ratings are excluded from the sum but the
/// divisor stays the sample size, matching the source computation.
pub fn difficulty_progression(accepted: &[Submission], user_rating: i64) -> DifficultyProgression {
    let recent = &accepted[..accepted.len().min(PROGRESSION_SAMPLE)];
    let rated_sum: i64 = recent
        .iter()
        .filter_map(|s| s.problem.rating.filter(|r| *r > 0))
        .sum();
    let avg_recent_rating = rated_sum / recent.len().max(1) as i64;

    let baseline = if user_rating > 0 {
        user_rating
    } else {
        avg_recent_rating
    };

    DifficultyProgression {
        avg_recent_rating,
        recommended_min: baseline + 100,
        recommended_max: baseline + 300,
    }
}

/// Activity summary over the trailing two weeks ending at `now`.
pub fn recent_performance(all: &[Submission], now: DateTime<Utc>) -> RecentPerformance {
    let cutoff = (now - Duration::days(RECENT_WINDOW_DAYS)).timestamp();
    let recent: Vec<&Submission> = all
        .iter()
        .filter(|s| s.creation_time_seconds >= cutoff)
        .collect();
    let accepted: Vec<&Submission> = recent
        .iter()
        .copied()
        .filter(|s| s.is_accepted())
        .collect();

    let acceptance_rate_percent = if recent.is_empty() {
        0.0
    } else {
        accepted.len() as f64 / recent.len() as f64 * 100.0
    };

    let unique_accepted_problems = accepted
        .iter()
        .map(|s| s.problem.name.as_str())
        .collect::<HashSet<_>>()
        .len();

    let activity_level = if recent.len() > HIGH_ACTIVITY_SUBMISSIONS {
        ActivityLevel::High
    } else if recent.len() > MEDIUM_ACTIVITY_SUBMISSIONS {
        ActivityLevel::Medium
    } else {
        ActivityLevel::Low
    };

    RecentPerformance {
        count: recent.len(),
        accepted_count: accepted.len(),
        acceptance_rate_percent,
        unique_accepted_problems,
        activity_level,
    }
}

/// Per-tag accepted counts plus the order tags were first encountered in.
pub(crate) fn tag_counts(accepted: &[Submission]) -> (HashMap<String, usize>, Vec<String>) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut encounter_order: Vec<String> = Vec::new();
    for sub in accepted {
        for tag in sub.problem.unique_tags() {
            match counts.get_mut(tag) {
                Some(c) => *c += 1,
                None => {
                    counts.insert(tag.to_string(), 1);
                    encounter_order.push(tag.to_string());
                }
            }
        }
    }
    (counts, encounter_order)
}
