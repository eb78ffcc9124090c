//! Writing finished reports to disk.
//!
//! Each run produces two files in the output directory sharing one stem,
//! `<slug>-<timestamp>`: the Markdown report and a JSON log of every step
//! together with the citation registry.

use super::coordinator::ResearchOutcome;
use super::prompts::ReportProfile;
use super::registry::SourceEntry;
use crate::types::{ResearchStep, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Longest slug taken from a topic, in characters
const MAX_SLUG_CHARS: usize = 60;

/// Paths of the files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    pub report_path: PathBuf,
    pub log_path: PathBuf,
}

#[derive(Serialize)]
struct RunLog<'a> {
    run_id: Uuid,
    topic: &'a str,
    profile: ReportProfile,
    generated_at: DateTime<Utc>,
    steps: &'a [ResearchStep],
    sources: &'a [SourceEntry],
}

/// Lowercase, dash-separated file stem for `topic`.
pub fn slugify(topic: &str) -> String {
    let slug = topic
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    let slug: String = slug.chars().take(MAX_SLUG_CHARS).collect();
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        "research".to_string()
    } else {
        slug.to_string()
    }
}

/// Write the report and its step log under `output_dir`, creating it if needed.
pub fn save_report(
    output_dir: &Path,
    outcome: &ResearchOutcome,
    profile: ReportProfile,
    report: &str,
    generated_at: DateTime<Utc>,
) -> Result<SavedReport> {
    fs::create_dir_all(output_dir)?;

    let stem = format!(
        "{}-{}",
        slugify(&outcome.topic),
        generated_at.format("%Y%m%d-%H%M%S")
    );
    let report_path = output_dir.join(format!("{}.md", stem));
    let log_path = output_dir.join(format!("{}.json", stem));

    fs::write(&report_path, report)?;

    let log = RunLog {
        run_id: outcome.run_id,
        topic: &outcome.topic,
        profile,
        generated_at,
        steps: &outcome.steps,
        sources: outcome.sources.entries(),
    };
    fs::write(&log_path, serde_json::to_string_pretty(&log)?)?;

    tracing::info!(
        report = %report_path.display(),
        log = %log_path.display(),
        "Saved research report"
    );

    Ok(SavedReport {
        report_path,
        log_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::registry::SourceRegistry;
    use crate::types::SearchResult;
    use chrono::TimeZone;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("quantum computing", "quantum-computing")]
    #[case("  What's new in Rust 2024?  ", "what-s-new-in-rust-2024")]
    #[case("LLM / RAG & agents", "llm-rag-agents")]
    #[case("***", "research")]
    fn test_slugify(#[case] topic: &str, #[case] expected: &str) {
        assert_eq!(slugify(topic), expected);
    }

    #[test]
    fn test_slugify_caps_length() {
        let slug = slugify(&"word ".repeat(40));
        assert!(slug.chars().count() <= MAX_SLUG_CHARS);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_save_report_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("reports");

        let mut sources = SourceRegistry::new();
        sources.register("https://a.example", 0);
        let outcome = ResearchOutcome {
            run_id: Uuid::new_v4(),
            topic: "quantum computing".to_string(),
            steps: vec![ResearchStep {
                query: "quantum computing".to_string(),
                results: vec![SearchResult::new("A", "https://a.example", "snippet")],
                synthesis: "findings".to_string(),
            }],
            sources,
        };
        let generated_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();

        let saved = save_report(
            &output_dir,
            &outcome,
            ReportProfile::Summary,
            "# Report\n\n[1] https://a.example",
            generated_at,
        )
        .unwrap();

        assert_eq!(
            saved.report_path,
            output_dir.join("quantum-computing-20240301-123005.md")
        );
        assert_eq!(
            fs::read_to_string(&saved.report_path).unwrap(),
            "# Report\n\n[1] https://a.example"
        );

        let log: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&saved.log_path).unwrap()).unwrap();
        assert_eq!(log["topic"], "quantum computing");
        assert_eq!(log["profile"], "summary");
        assert_eq!(log["steps"][0]["synthesis"], "findings");
        assert_eq!(log["sources"][0]["citation_number"], 1);
    }
}
