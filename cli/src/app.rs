//! Command execution.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use careerlens_catalog::Catalog;
use careerlens_embeddings::build_provider;
use careerlens_narrative::{NarrativeGenerator, NarrativeKind, NarrativeRequest};
use careerlens_ranking::{ProfileAnalysis, ProfileMatcher};
use serde::Serialize;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::cli::{AnalyzeArgs, Cli, Commands};
use crate::config::CareerLensConfig;
use crate::output::{render_catalog, render_competencies, render_jobs, render_section};

/// A problem with how the command was invoked rather than with its execution.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

/// Generated narrative, or the reason it could not be produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "value")]
pub enum NarrativeOutcome {
    Generated(String),
    Failed(String),
}

/// Everything `analyze` produces.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeReport {
    #[serde(flatten)]
    pub analysis: ProfileAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_plan: Option<NarrativeOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_bio: Option<NarrativeOutcome>,
}

/// Resolve the effective configuration from the file and global flags.
pub fn resolve_config(cli: &Cli) -> Result<CareerLensConfig> {
    let mut config = CareerLensConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(kind) = cli.embedder {
        config.embedding = config.embedding.with_provider(kind);
    }
    Ok(config)
}

/// Run the parsed command.
pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    match cli.command {
        Commands::Analyze(args) => {
            let text = read_profile_text(&args).await?;
            let report = analyze(&config, &args, &text).await?;
            print_report(&report, args.json)?;
        }
        Commands::Catalog { json } => {
            let catalog = load_catalog(&config.catalog.data_dir).await?;
            if json {
                let value = serde_json::json!({
                    "competencies": catalog.competencies(),
                    "jobs": catalog.jobs(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", render_catalog(&catalog));
            }
        }
    }
    Ok(())
}

/// Read the profile from the argument, the file, or stdin, rejecting blank text.
pub async fn read_profile_text(args: &AnalyzeArgs) -> Result<String> {
    let text = if let Some(text) = &args.text {
        text.clone()
    } else if let Some(path) = &args.file {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read profile {}", path.display()))?
    } else if std::io::stdin().is_terminal() {
        return Err(UsageError(
            "no profile text given; pass TEXT, --file PATH, or pipe it on stdin".to_string(),
        )
        .into());
    } else {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read profile from stdin")?;
        buf
    };

    ensure_profile_text(text)
}

/// Reject empty or whitespace-only profile text.
pub fn ensure_profile_text(text: String) -> Result<String> {
    if text.trim().is_empty() {
        return Err(UsageError("profile text is empty".to_string()).into());
    }
    Ok(text)
}

async fn load_catalog(dir: &Path) -> Result<Catalog> {
    Catalog::load_dir(dir)
        .await
        .with_context(|| format!("failed to load catalog from {}", dir.display()))
}

/// Rank the profile and, when asked, generate narratives.
pub async fn analyze(
    config: &CareerLensConfig,
    args: &AnalyzeArgs,
    text: &str,
) -> Result<AnalyzeReport> {
    let catalog = load_catalog(&config.catalog.data_dir).await?;
    let provider = build_provider(&config.embedding).context("failed to set up embeddings")?;
    info!("Using {} embeddings ({})", provider.name(), provider.model());

    let ranking = config.ranking.clone();
    let competency_k = args.top_competencies.unwrap_or(ranking.top_competencies);
    let job_k = args.top_jobs.unwrap_or(ranking.top_jobs);

    let matcher = ProfileMatcher::builder()
        .with_catalog(catalog)
        .with_provider(provider)
        .with_config(ranking)
        .build()
        .await?;
    let analysis = matcher.analyze(text, competency_k, job_k).await?;

    let mut report = AnalyzeReport {
        analysis,
        learning_plan: None,
        professional_bio: None,
    };

    if !(args.plan || args.bio) {
        return Ok(report);
    }
    if !report.analysis.is_complete() {
        warn!("Skipping narrative generation: no ranked competencies or jobs");
        return Ok(report);
    }

    let generator = NarrativeGenerator::from_env(config.narrative.clone());
    attach_narratives(&mut report, args, text, generator).await;
    Ok(report)
}

/// Fill the narratives requested by `args`.
///
/// A generator that could not be built marks each requested narrative as
/// failed; the rankings in `report` are left untouched.
pub async fn attach_narratives(
    report: &mut AnalyzeReport,
    args: &AnalyzeArgs,
    text: &str,
    generator: careerlens_narrative::Result<NarrativeGenerator>,
) {
    let generator = match generator {
        Ok(generator) => generator,
        Err(err) => {
            warn!("Narrative client unavailable: {err}");
            let failed = NarrativeOutcome::Failed(format!("narrative client unavailable: {err}"));
            if args.plan {
                report.learning_plan = Some(failed.clone());
            }
            if args.bio {
                report.professional_bio = Some(failed);
            }
            return;
        }
    };

    if args.plan {
        report.learning_plan =
            Some(narrate(&generator, NarrativeKind::LearningPlan, text, &report.analysis).await);
    }
    if args.bio {
        report.professional_bio = Some(
            narrate(&generator, NarrativeKind::ProfessionalBio, text, &report.analysis).await,
        );
    }
}

async fn narrate(
    generator: &NarrativeGenerator,
    kind: NarrativeKind,
    text: &str,
    analysis: &ProfileAnalysis,
) -> NarrativeOutcome {
    let request = NarrativeRequest::new(kind, text, &analysis.competencies, &analysis.jobs);
    match generator.generate(&request).await {
        Ok(body) => NarrativeOutcome::Generated(body),
        Err(err) => {
            warn!("Narrative generation failed: {err}");
            NarrativeOutcome::Failed(err.to_string())
        }
    }
}

fn print_report(report: &AnalyzeReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    print!("{}", render_competencies(&report.analysis.competencies));
    println!();
    print!("{}", render_jobs(&report.analysis.jobs));

    let sections = [
        ("Learning plan", &report.learning_plan),
        ("Professional bio", &report.professional_bio),
    ];
    for (title, outcome) in sections {
        match outcome {
            Some(NarrativeOutcome::Generated(body)) => {
                println!();
                print!("{}", render_section(title, body));
            }
            Some(NarrativeOutcome::Failed(message)) => {
                eprintln!("error: {} could not be generated: {message}", title.to_lowercase());
            }
            None => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_text_is_usage_error() {
        let err = ensure_profile_text(" \n\t ".to_string()).unwrap_err();
        assert!(err.downcast_ref::<UsageError>().is_some());
        assert_eq!(err.to_string(), "profile text is empty");
    }

    #[test]
    fn test_text_kept_verbatim() {
        let text = ensure_profile_text("  Python dev ".to_string()).unwrap();
        assert_eq!(text, "  Python dev ");
    }

    #[tokio::test]
    async fn test_read_profile_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        tokio::fs::write(&path, "Financial analyst using Python")
            .await
            .unwrap();

        let args = AnalyzeArgs {
            file: Some(path),
            ..AnalyzeArgs::default()
        };
        assert_eq!(
            read_profile_text(&args).await.unwrap(),
            "Financial analyst using Python"
        );
    }

    #[tokio::test]
    async fn test_read_blank_file_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        tokio::fs::write(&path, "\n\n").await.unwrap();

        let args = AnalyzeArgs {
            file: Some(path),
            ..AnalyzeArgs::default()
        };
        let err = read_profile_text(&args).await.unwrap_err();
        assert!(err.downcast_ref::<UsageError>().is_some());
    }

    #[tokio::test]
    async fn test_unavailable_client_keeps_rankings() {
        let analysis = ProfileAnalysis {
            competencies: vec![careerlens_ranking::ScoredCompetency {
                competency: careerlens_ranking::Competency::new(
                    "C1",
                    "Python",
                    "Programming",
                    "Python code",
                ),
                score: 0.8,
            }],
            jobs: Vec::new(),
        };
        let mut report = AnalyzeReport {
            analysis: analysis.clone(),
            learning_plan: None,
            professional_bio: None,
        };
        let args = AnalyzeArgs {
            plan: true,
            bio: true,
            ..AnalyzeArgs::default()
        };
        let generator = Err(careerlens_narrative::NarrativeError::InvalidResponse(
            "tls backend unavailable".to_string(),
        ));

        attach_narratives(&mut report, &args, "Python dev", generator).await;

        assert_eq!(report.analysis, analysis);
        let expected = NarrativeOutcome::Failed(
            "narrative client unavailable: invalid response: tls backend unavailable".to_string(),
        );
        assert_eq!(report.learning_plan, Some(expected.clone()));
        assert_eq!(report.professional_bio, Some(expected));
    }

    #[tokio::test]
    async fn test_unrequested_narratives_stay_empty() {
        let mut report = AnalyzeReport {
            analysis: ProfileAnalysis::default(),
            learning_plan: None,
            professional_bio: None,
        };
        let args = AnalyzeArgs {
            bio: true,
            ..AnalyzeArgs::default()
        };
        let generator = Err(careerlens_narrative::NarrativeError::EmptyContent);

        attach_narratives(&mut report, &args, "Python dev", generator).await;

        assert!(report.learning_plan.is_none());
        assert!(matches!(
            report.professional_bio,
            Some(NarrativeOutcome::Failed(_))
        ));
    }

    #[test]
    fn test_outcome_serialization() {
        let value = serde_json::to_value(NarrativeOutcome::Failed("boom".to_string())).unwrap();
        assert_eq!(value, serde_json::json!({"status": "failed", "value": "boom"}));
    }
}
