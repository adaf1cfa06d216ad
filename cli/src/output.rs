//! Terminal rendering of analyses and catalogs.

use careerlens_catalog::Catalog;
use careerlens_ranking::{ScoredCompetency, ScoredJob};

/// Width of the score bar in cells.
pub const BAR_WIDTH: usize = 20;

/// Format a similarity score as a percentage with one decimal.
pub fn format_percent(score: f32) -> String {
    let percent = score * 100.0;
    format!("{percent:.1} %")
}

/// Render a fixed-width bar for `score`, clamped to `[0, 1]`.
///
/// Cosine similarity can be negative; such scores draw an empty bar.
pub fn progress_bar(score: f32, width: usize) -> String {
    let ratio = if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((ratio * width as f32).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Render ranked competencies.
pub fn render_competencies(items: &[ScoredCompetency]) -> String {
    let mut lines = vec!["Top competencies".to_string()];
    if items.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (i, item) in items.iter().enumerate() {
        let c = &item.competency;
        lines.push(format!("{}. {} ({})", i + 1, c.label, c.block));
        lines.push(format!(
            "   {} {}",
            progress_bar(item.score, BAR_WIDTH),
            format_percent(item.score)
        ));
    }
    finish(lines)
}

/// Render ranked jobs.
pub fn render_jobs(items: &[ScoredJob]) -> String {
    let mut lines = vec!["Recommended jobs".to_string()];
    if items.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (i, item) in items.iter().enumerate() {
        let j = &item.job;
        lines.push(format!(
            "{}. {} – estimated fit {}",
            i + 1,
            j.title,
            format_percent(item.score)
        ));
        lines.push(format!("   {}", j.description));
    }
    finish(lines)
}

/// Render a titled block of generated text.
pub fn render_section(title: &str, body: &str) -> String {
    let underline = "=".repeat(title.chars().count());
    format!("{title}\n{underline}\n{body}\n")
}

/// Render the catalog listing, with any dangling references at the end.
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut lines = vec![format!("Competencies ({})", catalog.competencies().len())];
    for c in catalog.competencies() {
        lines.push(format!("  {:<12} {} ({})", c.id, c.label, c.block));
    }

    lines.push(String::new());
    lines.push(format!("Jobs ({})", catalog.jobs().len()));
    for j in catalog.jobs() {
        let requires = if j.required_competencies.is_empty() {
            "nothing".to_string()
        } else {
            j.required_competencies.join(", ")
        };
        lines.push(format!("  {:<12} {} [requires: {requires}]", j.id, j.title));
    }

    let dangling = catalog.dangling_references();
    if !dangling.is_empty() {
        lines.push(String::new());
        lines.push(format!("Unknown competency references ({})", dangling.len()));
        for d in dangling {
            lines.push(format!("  {} -> {}", d.job_id, d.competency_id));
        }
    }

    finish(lines)
}

/// Join rendered lines, ending with a newline.
fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerlens_catalog::{Competency, Job};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_percent_one_decimal() {
        assert_eq!(format_percent(0.8123), "81.2 %");
        assert_eq!(format_percent(0.0), "0.0 %");
        assert_eq!(format_percent(-0.05), "-5.0 %");
    }

    #[test]
    fn test_progress_bar_clamped() {
        assert_eq!(progress_bar(0.5, 10), "[#####-----]");
        assert_eq!(progress_bar(1.7, 4), "[####]");
        assert_eq!(progress_bar(-0.3, 4), "[----]");
        assert_eq!(progress_bar(f32::NAN, 4), "[----]");
    }

    #[test]
    fn test_render_competencies() {
        let items = vec![ScoredCompetency {
            competency: Competency::new("C1", "Python", "Programming", "Python code"),
            score: 0.75,
        }];
        assert_eq!(
            render_competencies(&items),
            "Top competencies\n1. Python (Programming)\n   [###############-----] 75.0 %\n"
        );
        assert_eq!(render_competencies(&[]), "Top competencies\n  (none)\n");
    }

    #[test]
    fn test_render_jobs() {
        let items = vec![ScoredJob {
            job: Job::new("J1", "Data Engineer", "Builds pipelines"),
            score: 0.423,
        }];
        assert_eq!(
            render_jobs(&items),
            "Recommended jobs\n1. Data Engineer – estimated fit 42.3 %\n   Builds pipelines\n"
        );
    }

    #[test]
    fn test_render_section() {
        assert_eq!(render_section("Bio", "Je suis."), "Bio\n===\nJe suis.\n");
    }

    #[test]
    fn test_render_catalog_lists_dangling() {
        let catalog = Catalog::new(
            vec![Competency::new("C1", "Python", "Programming", "Python code")],
            vec![
                Job::new("J1", "Dev", "Writes code").with_requirements(["C1", "C9"]),
                Job::new("J2", "Idle", "Nothing required"),
            ],
        )
        .unwrap();

        let out = render_catalog(&catalog);
        assert!(out.starts_with("Competencies (1)\n"));
        assert!(out.contains("J1           Dev [requires: C1, C9]"));
        assert!(out.contains("J2           Idle [requires: nothing]"));
        assert!(out.contains("Unknown competency references (1)\n  J1 -> C9\n"));
    }

    #[test]
    fn test_render_catalog_layout() {
        let catalog = Catalog::new(
            vec![Competency::new("C1", "Python", "Programming", "Python code")],
            vec![Job::new("J1", "Dev", "Writes code").with_requirements(["C1"])],
        )
        .unwrap();

        assert_eq!(
            render_catalog(&catalog),
            format!(
                "Competencies (1)\n  {:<12} Python (Programming)\n\nJobs (1)\n  {:<12} Dev [requires: C1]\n",
                "C1", "J1"
            )
        );
    }
}
