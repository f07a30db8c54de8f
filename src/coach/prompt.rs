//! Renders the statistics into the single instruction document sent to the
//! generative model. Total and deterministic: missing profile data renders
//! as placeholder text, never as an error.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::coach::analysis::{
    difficulty_progression, rating_distribution, recent_performance, topic_weaknesses,
};
use crate::coach::types::{Submission, UserProfile};

/// Build the coaching prompt for one refresh. `now` anchors the trailing
/// recent-performance window so the output is reproducible in tests.
pub fn build_prompt(
    profile: Option<&UserProfile>,
    submissions: &[Submission],
    now: DateTime<Utc>,
) -> String {
    let accepted: Vec<Submission> = submissions
        .iter()
        .filter(|s| s.is_accepted())
        .cloned()
        .collect();

    let total = submissions.len();
    let acceptance_rate = if total > 0 {
        accepted.len() as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let rating = profile.and_then(|p| p.rating).unwrap_or(0);
    let max_rating = profile.and_then(|p| p.max_rating).unwrap_or(0);
    let rank = profile
        .and_then(|p| p.rank.as_deref())
        .unwrap_or("Unrated");

    format!(
        "You are an AI coach for competitive programming. Analyze this Codeforces user's data and recommend SPECIFIC problems they should solve next.\n\
        \n\
        USER PROFILE:\n\
        - Current Rating: {rating}\n\
        - Max Rating: {max_rating}\n\
        - Rank: {rank}\n\
        - Total Submissions: {total}\n\
        - Accepted Solutions: {accepted_count}\n\
        - Acceptance Rate: {acceptance_rate:.1}%\n\
        \n\
        PROBLEM DIFFICULTY ANALYSIS:\n\
        {rating_block}\n\
        \n\
        TOPIC WEAKNESSES IDENTIFIED:\n\
        {topic_block}\n\
        \n\
        DIFFICULTY PROGRESSION ANALYSIS:\n\
        {progression_block}\n\
        \n\
        RECENT PERFORMANCE (Last 2 weeks):\n\
        {recent_block}\n\
        \n\
        PRIMARY LANGUAGE: {language}\n\
        \n\
        {format_instructions}",
        accepted_count = accepted.len(),
        rating_block = rating_block(&accepted),
        topic_block = topic_block(&accepted),
        progression_block = progression_block(&accepted, rating),
        recent_block = recent_block(submissions, now),
        language = primary_language(submissions),
        format_instructions = FORMAT_INSTRUCTIONS,
    )
}

fn rating_block(accepted: &[Submission]) -> String {
    let mut out = String::new();
    for share in rating_distribution(accepted) {
        let _ = writeln!(
            out,
            "{}: {} problems ({:.1}%)",
            share.bucket.label(),
            share.count,
            share.percent
        );
    }
    out.truncate(out.trim_end().len());
    out
}

fn topic_block(accepted: &[Submission]) -> String {
    let analysis = topic_weaknesses(accepted);
    let weak = if analysis.weak.is_empty() {
        "None identified".to_string()
    } else {
        analysis.weak.join(", ")
    };
    let strong = analysis
        .strong
        .iter()
        .map(|(tag, count)| format!("{tag} ({count})"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Weak Areas (need focus): {weak}\nStrong Areas: {strong}")
}

fn progression_block(accepted: &[Submission], user_rating: i64) -> String {
    let p = difficulty_progression(accepted, user_rating);
    format!(
        "Average problem rating solved recently: {}\n\
         Current user rating: {}\n\
         Recommended next difficulty range: {} - {}",
        p.avg_recent_rating, user_rating, p.recommended_min, p.recommended_max
    )
}

fn recent_block(submissions: &[Submission], now: DateTime<Utc>) -> String {
    let perf = recent_performance(submissions, now);
    format!(
        "Recent submissions: {}\n\
         Recent acceptance rate: {:.1}%\n\
         Unique problems solved: {}\n\
         Activity level: {}",
        perf.count,
        perf.acceptance_rate_percent,
        perf.unique_accepted_problems,
        perf.activity_level.label()
    )
}

fn primary_language(submissions: &[Submission]) -> &str {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for sub in submissions {
        let lang = sub.programming_language.as_str();
        match counts.get_mut(lang) {
            Some(c) => *c += 1,
            None => {
                counts.insert(lang, 1);
                order.push(lang);
            }
        }
    }
    // First-encountered language wins ties so the output is stable.
    let mut best: Option<&str> = None;
    for lang in order.iter().copied() {
        if best.map_or(true, |b| counts[lang] > counts[b]) {
            best = Some(lang);
        }
    }
    best.unwrap_or("Not specified")
}

/// Output contract the parser depends on. The SUGGESTION_<n> header and the
/// six field labels must stay exactly as written.
const FORMAT_INSTRUCTIONS: &str = "\
Based on this analysis, provide exactly 4-6 SPECIFIC problem recommendations in this format:

SUGGESTION_1:
Type: practice
Priority: high
Title: [Specific topic like \"Dynamic Programming - LCS Problems\"]
Description: [Why this topic is important for their growth and what rating range to target]
Action: Practice Now
URL: https://codeforces.com/problemset?tags=[specific-tag]

SUGGESTION_2:
Type: improvement
Priority: medium
Title: [Specific weakness like \"Graph Theory - DFS/BFS\"]
Description: [Detailed explanation of why they need this and expected improvement]
Action: Study Topic
URL: https://codeforces.com/problemset?tags=[specific-tag]

[Continue for 4-6 suggestions]

Focus on:
1. Identifying their current skill level and next logical step
2. Recommending problems 100-200 rating points above their current level
3. Addressing their weakest topics first
4. Suggesting rating-appropriate contest problems
5. Building consistency in problem-solving patterns

Make each recommendation specific with exact Codeforces problem tags and rating ranges!";
