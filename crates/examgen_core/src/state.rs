//! crates/examgen_core/src/state.rs
//!
//! The application lifecycle as a closed state machine: collecting input,
//! one in-flight generation, then results or an error. Transitions are pure
//! total functions so any front end can bind gestures to them; the terminal
//! adapter in the app crate is one such binding.

use crate::domain::{ExamData, GenerationConfig};
use crate::ports::{ExamGenerationService, GenerationResult};

/// The local validation message shown when a submission is rejected.
pub const VALIDATION_NOTICE: &str = "Please provide either a topic or upload study material.";

/// The four user-visible phases of a session.
///
/// Exactly one generation call is ever in flight: `Loading` is only reachable
/// through [`AppState::submit`], and submit is only effective from `Input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Editable form. `notice` is a local validation message, if any.
    Input {
        config: GenerationConfig,
        notice: Option<String>,
    },
    /// A request is in flight; `config` is the immutable snapshot it uses.
    Loading { config: GenerationConfig },
    /// A generation succeeded and `exam` is being displayed.
    Results {
        config: GenerationConfig,
        exam: ExamData,
    },
    /// A generation failed; `message` is the human-readable failure text.
    Error {
        config: GenerationConfig,
        message: String,
    },
}

impl AppState {
    /// The initial state: an empty form with the default configuration.
    pub fn new() -> Self {
        AppState::Input {
            config: GenerationConfig::default(),
            notice: None,
        }
    }

    /// The configuration carried by the current state.
    pub fn config(&self) -> &GenerationConfig {
        match self {
            AppState::Input { config, .. }
            | AppState::Loading { config }
            | AppState::Results { config, .. }
            | AppState::Error { config, .. } => config,
        }
    }

    /// Mutable access to the configuration, only while the form is editable.
    /// The snapshot a request runs with can never change underneath it.
    pub fn config_mut(&mut self) -> Option<&mut GenerationConfig> {
        match self {
            AppState::Input { config, .. } => Some(config),
            _ => None,
        }
    }

    /// Submits the form.
    ///
    /// Guarded: when neither topic nor content is non-blank the state stays
    /// `Input` with [`VALIDATION_NOTICE`] set and no request may be issued.
    /// Otherwise the configuration is snapshotted into `Loading`. From any
    /// state other than `Input` this is a no-op.
    pub fn submit(self) -> Self {
        match self {
            AppState::Input { config, .. } => {
                if config.has_source_material() {
                    AppState::Loading { config }
                } else {
                    AppState::Input {
                        config,
                        notice: Some(VALIDATION_NOTICE.to_string()),
                    }
                }
            }
            other => other,
        }
    }

    /// Applies the outcome of the in-flight request. From any state other
    /// than `Loading` the outcome is discarded and the state is unchanged.
    pub fn settle(self, outcome: GenerationResult<ExamData>) -> Self {
        match self {
            AppState::Loading { config } => match outcome {
                Ok(exam) => AppState::Results { config, exam },
                Err(e) => AppState::Error {
                    config,
                    message: e.to_string(),
                },
            },
            other => other,
        }
    }

    /// "Try Again" from the error panel: back to the editable form with the
    /// prior configuration fully intact, content included.
    pub fn retry(self) -> Self {
        match self {
            AppState::Error { config, .. } => AppState::Input {
                config,
                notice: None,
            },
            other => other,
        }
    }

    /// "Create New" / "Generate New Exam": back to the editable form with the
    /// study material blanked and any exam or error dropped. Topic,
    /// difficulty and question count are kept for convenience. Total and
    /// idempotent from every state.
    pub fn reset(self) -> Self {
        let mut config = match self {
            AppState::Input { config, .. }
            | AppState::Loading { config }
            | AppState::Results { config, .. }
            | AppState::Error { config, .. } => config,
        };
        config.content.clear();
        AppState::Input {
            config,
            notice: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the in-flight generation for a `Loading` state and settles the
/// outcome. Any other state passes through untouched with zero service
/// calls, so the service is invoked exactly once per submission.
pub async fn run_generation(state: AppState, service: &dyn ExamGenerationService) -> AppState {
    match state {
        AppState::Loading { config } => {
            let outcome = service.generate_exam(&config).await;
            AppState::Loading { config }.settle(outcome)
        }
        other => other,
    }
}
