//! # Narrative
//!
//! Turns a ranked profile into personalised prose through a remote
//! chat-completions model: a step-by-step learning plan or a short
//! first-person professional bio.
//!
//! Ranking never depends on this crate. A missing API key is reported as
//! [`NarrativeError::MissingCredential`] before any network activity.
//!
//! ```rust,ignore
//! use careerlens_narrative::{NarrativeConfig, NarrativeGenerator};
//!
//! let generator = NarrativeGenerator::from_env(NarrativeConfig::default())?;
//! let plan = generator
//!     .generate_learning_plan(&text, &analysis.competencies, &analysis.jobs)
//!     .await?;
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod generator;
pub mod request;

pub use backend::{ChatBackend, ChatMessage, ChatRequest, HttpChatBackend};
pub use config::NarrativeConfig;
pub use error::{NarrativeError, Result};
pub use generator::NarrativeGenerator;
pub use request::{NarrativeKind, NarrativeRequest, profile_context, render_prompt};
