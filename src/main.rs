use std::sync::Arc;

use grind_coach::coach::engine::SuggestionEngine;
use grind_coach::coach::recommender::recommend;
use grind_coach::coach::types::{Submission, UserProfile};
use grind_coach::config::Config;
use grind_coach::logging::{init_tracing, LogConfig};
use grind_coach::services::gemini::{GeminiClient, MockGenerator, TextGenerator};
use serde::Deserialize;

/// Input snapshot: the data-fetching client is an external collaborator, so
/// the binary consumes its output as a JSON file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    #[serde(default)]
    user: Option<UserProfile>,
    submissions: Vec<Submission>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    init_tracing(&LogConfig {
        log_level: config.log_level.clone(),
        enable_file_logs: config.enable_file_logs,
        log_dir: config.log_dir.clone(),
    });
    tracing::info!("Starting grind-coach");

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("Usage: grind-coach <snapshot.json>");
            std::process::exit(2);
        }
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(path, error = %e, "Failed to read snapshot");
            std::process::exit(1);
        }
    };

    let snapshot: Snapshot = match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(path, error = %e, "Failed to decode snapshot");
            std::process::exit(1);
        }
    };

    tracing::info!(
        submissions = snapshot.submissions.len(),
        handle = snapshot.user.as_ref().map(|u| u.handle.as_str()),
        "Snapshot loaded"
    );

    let generator: Arc<dyn TextGenerator> = if config.gemini.mock {
        tracing::info!("GEMINI_MOCK is on, using the canned generator");
        Arc::new(MockGenerator)
    } else {
        Arc::new(GeminiClient::new(&config.gemini))
    };

    let engine = SuggestionEngine::new(generator);

    let user_rating = snapshot
        .user
        .as_ref()
        .and_then(|u| u.rating)
        .unwrap_or(0);
    let accepted: Vec<Submission> = snapshot
        .submissions
        .iter()
        .filter(|s| s.is_accepted())
        .cloned()
        .collect();

    println!("== Local recommendations ==");
    for rec in recommend(&accepted, user_rating, 5) {
        println!("[{:?}] {} ({})", rec.priority, rec.title, rec.difficulty);
        println!("    {}", rec.reason);
        println!("    {}", rec.url);
    }

    if let Err(e) = engine
        .refresh(snapshot.user.as_ref(), &snapshot.submissions)
        .await
    {
        tracing::error!(error = %e, "Refresh rejected");
        std::process::exit(1);
    }

    println!();
    println!("== AI suggestions ==");
    match engine.current_error() {
        Some(error) => println!("error: {error}"),
        None => {
            for s in engine.current_suggestions() {
                println!(
                    "[{:?}/{:?}] {}",
                    s.suggestion_type, s.priority, s.title
                );
                println!("    {}", s.description);
                match &s.url {
                    Some(url) => println!("    {} -> {url}", s.action),
                    None => println!("    {}", s.action),
                }
            }
        }
    }
}
