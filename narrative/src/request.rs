//! Narrative requests and prompt rendering.

use careerlens_ranking::{ScoredCompetency, ScoredJob};
use serde::{Deserialize, Serialize};

/// Which text to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeKind {
    /// A 3 to 5 step progression plan addressed to the user.
    LearningPlan,
    /// A 3 to 5 sentence first-person bio.
    ProfessionalBio,
}

/// Everything the prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeRequest<'a> {
    pub kind: NarrativeKind,
    pub profile_text: &'a str,
    pub competencies: &'a [ScoredCompetency],
    pub jobs: &'a [ScoredJob],
}

impl<'a> NarrativeRequest<'a> {
    /// Create a request.
    pub fn new(
        kind: NarrativeKind,
        profile_text: &'a str,
        competencies: &'a [ScoredCompetency],
        jobs: &'a [ScoredJob],
    ) -> Self {
        Self {
            kind,
            profile_text,
            competencies,
            jobs,
        }
    }
}

/// Render the profile summary shared by every prompt.
pub fn profile_context(
    profile_text: &str,
    competencies: &[ScoredCompetency],
    jobs: &[ScoredJob],
) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(competencies.len() + jobs.len() + 6);

    lines.push("Résumé du profil utilisateur (texte brut) :".to_string());
    lines.push(profile_text.trim().to_string());
    lines.push(String::new());

    lines.push("Top compétences détectées :".to_string());
    for item in competencies {
        let c = &item.competency;
        lines.push(format!(
            "- {} ({}) – {} : score {:.3}",
            c.id, c.block, c.label, item.score
        ));
    }
    lines.push(String::new());

    lines.push("Métiers recommandés :".to_string());
    for item in jobs {
        let j = &item.job;
        lines.push(format!(
            "- {} – {} (score {:.3}) : {}",
            j.id, j.title, item.score, j.description
        ));
    }

    lines.join("\n")
}

/// Render the full user prompt for `request`.
pub fn render_prompt(request: &NarrativeRequest<'_>) -> String {
    let context = profile_context(request.profile_text, request.competencies, request.jobs);
    let mut prompt = String::new();

    if request.kind == NarrativeKind::ProfessionalBio {
        prompt.push_str(
            "À partir du profil et des informations suivantes, écris une courte biographie professionnelle.\n\n",
        );
    }

    prompt.push_str(&format!("Contexte :\n{context}\n\nTâche :\n"));

    let task: &[&str] = match request.kind {
        NarrativeKind::LearningPlan => &[
            "- Propose un plan de progression en 3 à 5 étapes claires.",
            "- Chaque étape doit contenir : un objectif, des compétences à travailler, et des exemples d'actions concrètes (cours, projets, ressources).",
            "- Rédige en français, style simple, directement adressé à l'utilisateur (\"tu\").",
        ],
        NarrativeKind::ProfessionalBio => &[
            "- Rédige une bio professionnelle en 3 à 5 phrases maximum.",
            "- Style : sobre, professionnel, à la 1ère personne (je).",
            "- Mentionne le domaine (data, IA, finance) et 1 à 2 métiers cibles.",
        ],
    };
    prompt.push_str(&task.join("\n"));
    prompt
}
