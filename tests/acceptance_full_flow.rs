//! End-to-end pipeline against a deterministic generator stub: analysis
//! feeds the prompt, the reply is parsed back into typed suggestions, and
//! the engine settles in the expected phase.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use grind_coach::coach::engine::{EngineError, EnginePhase, SuggestionEngine};
use grind_coach::coach::recommender::recommend;
use grind_coach::coach::types::{SuggestionPriority, SuggestionType};
use grind_coach::services::gemini::{GatewayError, TextGenerator};

mod common;
use common::{accepted, profile, rejected};

/// Records the prompt it was handed, then replies with a fixed document.
struct RecordingGenerator {
    seen_prompt: Mutex<Option<String>>,
    reply: String,
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.reply.clone())
    }
}

const REPLY: &str = "\
Here is my coaching plan.

SUGGESTION_1:
Type: topic
Priority: high
Title: Master Dynamic Programming
Description: dp shows up repeatedly below your target range.
Action: Practice Now
URL: https://codeforces.com/problemset?tags=dp

SUGGESTION_2:
Type: practice
Priority: medium
Title: Binary Search Drills
Description: Sharpen binary search fundamentals.
Action: Start Drilling
URL: none

SUGGESTION_3:
Priority: broken-value
Title: Streak Builder
Description: Solve one problem a day for two weeks.
Action: Commit
URL: none
";

#[tokio::test]
async fn full_refresh_pipeline_produces_typed_suggestions() {
    let generator = Arc::new(RecordingGenerator {
        seen_prompt: Mutex::new(None),
        reply: REPLY.to_string(),
    });
    let engine = SuggestionEngine::new(generator.clone());

    let submissions = vec![
        accepted("Watermelon", Some(800), &["math", "implementation"]),
        accepted("Theatre Square", Some(1000), &["math"]),
        rejected("Hard One", Some(1900), &["dp"]),
        accepted("Spreadsheet", Some(1600), &["implementation"]),
    ];
    let user = profile("grinder", Some(1400));

    engine.refresh(Some(&user), &submissions).await.unwrap();

    // The synthesized prompt carried the analysis and the output contract.
    let prompt = generator.seen_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("- Current Rating: 1400"));
    assert!(prompt.contains("- Total Submissions: 4"));
    assert!(prompt.contains("- Accepted Solutions: 3"));
    assert!(prompt.contains("SUGGESTION_1:"));
    assert!(prompt.contains("Weak Areas (need focus):"));

    assert_eq!(engine.phase(), EnginePhase::Ready);
    assert!(engine.current_error().is_none());

    let suggestions = engine.current_suggestions();
    assert_eq!(suggestions.len(), 3);

    assert_eq!(suggestions[0].suggestion_type, SuggestionType::Topic);
    assert_eq!(suggestions[0].priority, SuggestionPriority::High);
    assert_eq!(suggestions[0].title, "Master Dynamic Programming");
    assert_eq!(
        suggestions[0].url.as_deref(),
        Some("https://codeforces.com/problemset?tags=dp")
    );

    assert!(suggestions[1].url.is_none());

    // Third block had no Type and a junk Priority: defaults apply.
    assert_eq!(suggestions[2].suggestion_type, SuggestionType::Practice);
    assert_eq!(suggestions[2].priority, SuggestionPriority::Medium);
}

#[tokio::test]
async fn local_recommendations_agree_with_the_same_history() {
    let submissions = vec![
        accepted("Watermelon", Some(800), &["math"]),
        accepted("Theatre Square", Some(1000), &["math"]),
    ];

    let recs = recommend(&submissions, 1400, 5);
    assert!(!recs.is_empty());
    assert!(recs.len() <= 5);
    // math solved twice: still below the local threshold of 5.
    assert!(recs.iter().any(|r| r.topic == "math"));
    // avg solved 900 << 1400: the raise-difficulty entry joins the list.
    assert!(recs.iter().any(|r| r.title == "Challenge Yourself"));
}

#[tokio::test]
async fn failed_refresh_surfaces_a_message_and_allows_retry() {
    struct AlwaysDown;

    #[async_trait]
    impl TextGenerator for AlwaysDown {
        async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
            Err(GatewayError::Network("connection refused".into()))
        }
    }

    let engine = SuggestionEngine::new(Arc::new(AlwaysDown));
    engine.refresh(None, &[]).await.unwrap();

    assert_eq!(engine.phase(), EnginePhase::Failed);
    let message = engine.current_error().unwrap();
    assert!(message.contains("Failed to generate suggestions"));

    // A caller-invoked refresh is the only way out of Failed; it must not
    // be rejected once the previous one finished.
    let second = engine.refresh(None, &[]).await;
    assert!(!matches!(second, Err(EngineError::RefreshInProgress)));
}
