/// Verdict label the judge assigns to an accepted submission.
pub const ACCEPTED_VERDICT: &str = "OK";

/// Hard cap on the suggestion list handed back to callers.
pub const MAX_SUGGESTIONS: usize = 6;

/// A canonical topic counts as weak for prompt analysis below this many
/// accepted solves.
pub const WEAK_TOPIC_MIN_SOLVED_PROMPT: usize = 3;

/// Weak-topic threshold used by the local recommender. Intentionally
/// different from the prompt-analysis threshold; the two callers were
/// tuned to different sensitivities and must not be unified.
pub const WEAK_TOPIC_MIN_SOLVED_LOCAL: usize = 5;

/// Trailing window for recent-performance analysis, in days.
pub const RECENT_WINDOW_DAYS: i64 = 14;

/// How many of the most recent accepted submissions feed the
/// difficulty-progression average.
pub const PROGRESSION_SAMPLE: usize = 20;

/// Working rating substituted when the user is unrated. Computation only,
/// never surfaced as user data.
pub const DEFAULT_WORKING_RATING: i64 = 1200;

/// More than this many submissions in the recent window counts as high
/// activity.
pub const HIGH_ACTIVITY_SUBMISSIONS: usize = 10;

/// More than this many submissions in the recent window counts as medium
/// activity.
pub const MEDIUM_ACTIVITY_SUBMISSIONS: usize = 5;

/// At most this many weak-topic entries per recommendation pass.
pub const MAX_WEAK_TOPIC_RECOMMENDATIONS: usize = 3;

/// Canonical competitive-programming topics, in priority order. Weakness
/// analysis only ever reports members of this list.
pub const CANONICAL_TOPICS: &[&str] = &[
    "implementation",
    "math",
    "greedy",
    "dp",
    "graph",
    "data structures",
    "binary search",
    "two pointers",
    "sorting",
    "strings",
    "number theory",
    "combinatorics",
    "geometry",
    "brute force",
];
