//! Narrative generation from ranked profiles.

use std::sync::Arc;

use careerlens_ranking::{ScoredCompetency, ScoredJob};
use tracing::{debug, info};

use crate::backend::{ChatBackend, ChatMessage, ChatRequest, HttpChatBackend};
use crate::config::NarrativeConfig;
use crate::error::{NarrativeError, Result};
use crate::request::{NarrativeKind, NarrativeRequest, render_prompt};

/// Generates learning plans and bios through a [`ChatBackend`].
///
/// The credential is checked on every call before the backend is touched, so
/// a generator without a key can be constructed and shared freely.
pub struct NarrativeGenerator {
    config: NarrativeConfig,
    backend: Arc<dyn ChatBackend>,
    credential: Option<String>,
}

impl NarrativeGenerator {
    /// Create a generator with an explicit backend and credential.
    pub fn new(
        config: NarrativeConfig,
        backend: Arc<dyn ChatBackend>,
        credential: Option<String>,
    ) -> Self {
        let credential = credential.filter(|key| !key.trim().is_empty());
        Self {
            config,
            backend,
            credential,
        }
    }

    /// Create an HTTP-backed generator reading the key from `config.api_key_env`.
    ///
    /// A missing key is not an error here; it surfaces on the first generation.
    pub fn from_env(config: NarrativeConfig) -> Result<Self> {
        let backend = Arc::new(HttpChatBackend::new(&config)?);
        let credential = std::env::var(&config.api_key_env).ok();
        Ok(Self::new(config, backend, credential))
    }

    /// Whether an API key is available.
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// The service configuration.
    pub fn config(&self) -> &NarrativeConfig {
        &self.config
    }

    /// Generate the text described by `request`, trimmed.
    pub async fn generate(&self, request: &NarrativeRequest<'_>) -> Result<String> {
        let api_key = self
            .credential
            .as_deref()
            .ok_or_else(|| NarrativeError::MissingCredential {
                env_var: self.config.api_key_env.clone(),
            })?;

        let chat = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.config.system_prompt.clone()),
                ChatMessage::user(render_prompt(request)),
            ],
            temperature: self.config.temperature,
        };

        info!("Generating {:?} with {}", request.kind, self.config.model);
        let reply = self.backend.complete(api_key, &chat).await?;
        let text = reply.trim();
        if text.is_empty() {
            return Err(NarrativeError::EmptyContent);
        }

        debug!("Generated {} characters", text.len());
        Ok(text.to_string())
    }

    /// Generate a 3 to 5 step progression plan.
    pub async fn generate_learning_plan(
        &self,
        profile_text: &str,
        competencies: &[ScoredCompetency],
        jobs: &[ScoredJob],
    ) -> Result<String> {
        self.generate(&NarrativeRequest::new(
            NarrativeKind::LearningPlan,
            profile_text,
            competencies,
            jobs,
        ))
        .await
    }

    /// Generate a short first-person professional bio.
    pub async fn generate_professional_bio(
        &self,
        profile_text: &str,
        competencies: &[ScoredCompetency],
        jobs: &[ScoredJob],
    ) -> Result<String> {
        self.generate(&NarrativeRequest::new(
            NarrativeKind::ProfessionalBio,
            profile_text,
            competencies,
            jobs,
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Records every request and answers with a canned reply.
    struct RecordingBackend {
        reply: String,
        calls: Mutex<Vec<(String, ChatRequest)>>,
    }

    impl RecordingBackend {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, ChatRequest)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for RecordingBackend {
        async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((api_key.to_string(), request.clone()));
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn test_missing_credential_never_reaches_backend() {
        let backend = RecordingBackend::new("unused");
        let generator = NarrativeGenerator::new(NarrativeConfig::default(), backend.clone(), None);

        let err = generator
            .generate_learning_plan("profil", &[], &[])
            .await
            .unwrap_err();

        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "GROQ_API_KEY is not set in the environment");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_credential_is_missing() {
        let backend = RecordingBackend::new("unused");
        let generator = NarrativeGenerator::new(
            NarrativeConfig::default(),
            backend.clone(),
            Some("   ".to_string()),
        );
        assert!(!generator.has_credential());
        let err = generator
            .generate_professional_bio("profil", &[], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, NarrativeError::MissingCredential { .. }));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_request_shape_and_trimmed_reply() {
        let backend = RecordingBackend::new("\n  Étape 1 : ...  \n");
        let generator = NarrativeGenerator::new(
            NarrativeConfig::default(),
            backend.clone(),
            Some("secret".to_string()),
        );

        let plan = generator
            .generate_learning_plan("Étudiant en data", &[], &[])
            .await
            .unwrap();
        assert_eq!(plan, "Étape 1 : ...");

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        let (key, request) = &calls[0];
        assert_eq!(key, "secret");
        assert_eq!(request.model, "llama-3.1-8b-instant");
        assert!((request.temperature - 0.6).abs() < f32::EPSILON);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].role, "user");
        assert!(request.messages[1].content.contains("Étudiant en data"));
    }

    #[tokio::test]
    async fn test_blank_reply_is_empty_content() {
        let backend = RecordingBackend::new("   \n");
        let generator = NarrativeGenerator::new(
            NarrativeConfig::default(),
            backend,
            Some("secret".to_string()),
        );
        let err = generator
            .generate_professional_bio("profil", &[], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, NarrativeError::EmptyContent));
        assert!(!err.is_configuration());
    }
}
