//! Orchestrates one refresh: analysis → prompt → gateway → parse. Owns the
//! (phase, suggestions, error) triple and updates it under a single-writer
//! discipline so readers never observe a torn state.

use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::coach::parser;
use crate::coach::prompt::build_prompt;
use crate::coach::types::{AiSuggestion, Submission, UserProfile};
use crate::services::gemini::{GatewayError, TextGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A refresh is already in flight on this instance. Overlapping calls
    /// are rejected rather than coalesced so at most one gateway request
    /// exists per engine at a time.
    #[error("a refresh is already in progress")]
    RefreshInProgress,
}

struct EngineState {
    phase: EnginePhase,
    suggestions: Vec<AiSuggestion>,
    error: Option<String>,
}

/// One engine instance per composition root; consumers receive it by
/// injection instead of reaching a shared global.
pub struct SuggestionEngine {
    generator: Arc<dyn TextGenerator>,
    refresh_guard: tokio::sync::Mutex<()>,
    state: RwLock<EngineState>,
}

impl SuggestionEngine {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            refresh_guard: tokio::sync::Mutex::new(()),
            state: RwLock::new(EngineState {
                phase: EnginePhase::Idle,
                suggestions: Vec::new(),
                error: None,
            }),
        }
    }

    /// Run the full pipeline once. The gateway call is the only suspension
    /// point. A gateway failure lands in the Failed phase with a
    /// human-readable message and leaves the previous suggestion list
    /// untouched; it is not an `Err` here. The only way out of Failed is
    /// another caller-invoked refresh.
    pub async fn refresh(
        &self,
        profile: Option<&UserProfile>,
        submissions: &[Submission],
    ) -> Result<(), EngineError> {
        let _guard = self
            .refresh_guard
            .try_lock()
            .map_err(|_| EngineError::RefreshInProgress)?;

        self.write(|state| {
            state.phase = EnginePhase::Loading;
            state.error = None;
        });

        let prompt = build_prompt(profile, submissions, Utc::now());

        match self.generator.generate(&prompt).await {
            Ok(text) => {
                let suggestions = parser::parse(&text);
                tracing::info!(count = suggestions.len(), "Suggestions refreshed");
                self.write(|state| {
                    state.suggestions = suggestions;
                    state.phase = EnginePhase::Ready;
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Suggestion refresh failed");
                let message = failure_message(&e);
                self.write(|state| {
                    state.phase = EnginePhase::Failed;
                    state.error = Some(message);
                });
            }
        }

        Ok(())
    }

    pub fn current_suggestions(&self) -> Vec<AiSuggestion> {
        self.read(|state| state.suggestions.clone())
    }

    pub fn current_error(&self) -> Option<String> {
        self.read(|state| state.error.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.read(|state| state.phase == EnginePhase::Loading)
    }

    pub fn phase(&self) -> EnginePhase {
        self.read(|state| state.phase)
    }

    fn read<T>(&self, f: impl FnOnce(&EngineState) -> T) -> T {
        let state = self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&state)
    }

    fn write(&self, f: impl FnOnce(&mut EngineState)) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut state);
    }
}

/// Transport, server, and decode failures all read the same to the caller;
/// only a bad endpoint configuration is called out specifically.
fn failure_message(error: &GatewayError) -> String {
    match error {
        GatewayError::InvalidEndpoint(_) => {
            "AI suggestions are not configured correctly. Check the endpoint settings.".to_string()
        }
        _ => format!("Failed to generate suggestions: {error}"),
    }
}
