//! Final report generation.
//!
//! The assembler only ever reads citation numbers from the
//! [`SourceRegistry`]; it never numbers sources itself, so the `[n]`
//! references the model is told to use match the reference list exactly.

use super::prompts::{ReportProfile, REPORT_FORMATTING_REQUIREMENTS, REPORT_WRITER_SYSTEM_PROMPT};
use super::registry::SourceRegistry;
use crate::llm::{GenerationParams, LLMClient};
use crate::types::{ResearchStep, Result};

/// Temperature used when writing the final report
pub const DEFAULT_REPORT_TEMPERATURE: f32 = 0.7;

pub struct ReportAssembler {
    llm: Box<dyn LLMClient>,
    params: GenerationParams,
}

impl ReportAssembler {
    pub fn new(llm: Box<dyn LLMClient>) -> Self {
        Self {
            llm,
            params: GenerationParams::with_temperature(DEFAULT_REPORT_TEMPERATURE),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.params = GenerationParams::with_temperature(temperature);
        self
    }

    /// Write the cited report for a completed run.
    ///
    /// The model's text is returned unmodified; an empty response yields an
    /// empty string. LLM errors propagate.
    pub async fn build_report(
        &self,
        steps: &[ResearchStep],
        sources: &SourceRegistry,
        profile: ReportProfile,
    ) -> Result<String> {
        let prompt = report_prompt(steps, sources, profile);
        tracing::info!(
            profile = %profile,
            steps = steps.len(),
            sources = sources.len(),
            model = self.llm.model_name(),
            "Generating report"
        );

        self.llm
            .generate_with_params(REPORT_WRITER_SYSTEM_PROMPT, &prompt, &self.params)
            .await
    }
}

/// Build the report-writing prompt.
pub fn report_prompt(
    steps: &[ResearchStep],
    sources: &SourceRegistry,
    profile: ReportProfile,
) -> String {
    let research_summary = steps
        .iter()
        .enumerate()
        .map(|(i, step)| format_step(i, step, sources))
        .collect::<Vec<_>>()
        .join("\n\n");

    let reference_list = if sources.is_empty() {
        "No sources were found during research.".to_string()
    } else {
        sources.references()
    };

    format!(
        "Based on the following research:\n\n{}\n\n{}\n\n{}\n\nSource list (cite only these numbers):\n{}",
        research_summary,
        profile.instructions(),
        REPORT_FORMATTING_REQUIREMENTS,
        reference_list
    )
}

fn format_step(index: usize, step: &ResearchStep, sources: &SourceRegistry) -> String {
    let links = if step.results.is_empty() {
        "none".to_string()
    } else {
        step.results
            .iter()
            .map(|result| match sources.citation_for(&result.link) {
                Some(number) => format!("[{}] {}", number, result.link),
                None => result.link.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Step {}\nQuery: {}\nSources: {}\nFindings:\n{}",
        index + 1,
        step.query,
        links,
        step.synthesis.trim()
    )
}
