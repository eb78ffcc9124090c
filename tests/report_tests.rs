//! Report assembly integration tests

mod common;

use common::mocks::{MockFetcher, MockLLMClient, MockSynthesizer};
use rstest::rstest;
use webscout::llm::GenerationParams;
use webscout::research::prompts::{REPORT_FORMATTING_REQUIREMENTS, REPORT_WRITER_SYSTEM_PROMPT};
use webscout::research::{ReportAssembler, ReportProfile, ResearchLoop, SourceRegistry};
use webscout::types::{AppError, ResearchStep, SearchResult};

fn single_step() -> (Vec<ResearchStep>, SourceRegistry) {
    let mut sources = SourceRegistry::new();
    sources.register("https://a.example", 0);

    let steps = vec![ResearchStep {
        query: "quantum computing".to_string(),
        results: vec![SearchResult::new("A", "https://a.example", "snippet")],
        synthesis: "Qubits are fragile [1].".to_string(),
    }];
    (steps, sources)
}

#[tokio::test]
async fn test_report_text_returned_unmodified() {
    let text = "# Quantum Computing\n\nFragile qubits [1].\n\n## References\n[1] https://a.example\n";
    let llm = MockLLMClient::new(text);
    let (steps, sources) = single_step();

    let report = ReportAssembler::new(Box::new(llm.clone()))
        .with_temperature(0.4)
        .build_report(&steps, &sources, ReportProfile::Summary)
        .await
        .unwrap();

    assert_eq!(report, text);

    let calls = llm.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, REPORT_WRITER_SYSTEM_PROMPT);
    assert!(calls[0].1.contains(ReportProfile::Summary.instructions()));
    assert!(calls[0].1.contains(REPORT_FORMATTING_REQUIREMENTS));
    assert_eq!(calls[0].2, GenerationParams::with_temperature(0.4));
}

#[tokio::test]
async fn test_empty_model_response_is_empty_report() {
    let (steps, sources) = single_step();

    let report = ReportAssembler::new(Box::new(MockLLMClient::new("")))
        .build_report(&steps, &sources, ReportProfile::Comprehensive)
        .await
        .unwrap();

    assert_eq!(report, "");
}

#[tokio::test]
async fn test_report_failure_propagates() {
    let (steps, sources) = single_step();

    let result = ReportAssembler::new(Box::new(MockLLMClient::failing()))
        .build_report(&steps, &sources, ReportProfile::Technical)
        .await;

    assert!(matches!(result, Err(AppError::LLM(_))));
}

#[rstest]
#[case("technical", ReportProfile::Technical)]
#[case("MARKET", ReportProfile::Market)]
#[case(" summary ", ReportProfile::Summary)]
#[case("comprehensive", ReportProfile::Comprehensive)]
#[case("haiku", ReportProfile::Comprehensive)]
#[case("", ReportProfile::Comprehensive)]
fn test_profile_resolution(#[case] name: &str, #[case] expected: ReportProfile) {
    assert_eq!(ReportProfile::from_name(name), expected);
}

#[tokio::test]
async fn test_unknown_profile_falls_back_without_error() {
    let llm = MockLLMClient::new("report");
    let (steps, sources) = single_step();

    let report = ReportAssembler::new(Box::new(llm.clone()))
        .build_report(&steps, &sources, ReportProfile::from_name("limerick"))
        .await
        .unwrap();

    assert_eq!(report, "report");
    assert!(llm.calls()[0]
        .1
        .contains(ReportProfile::Comprehensive.instructions()));
}

#[tokio::test]
async fn test_report_prompt_keeps_run_numbering() {
    let fetcher = MockFetcher::new()
        .with_results(
            "quantum computing",
            &["https://a.example", "https://b.example", "https://c.example"],
        )
        .with_results("quantum error correction 2024", &["https://d.example", "https://b.example"]);
    let synthesizer =
        MockSynthesizer::new().with_follow_ups(vec![vec!["quantum error correction 2024"]]);

    let outcome = ResearchLoop::new(Box::new(fetcher), Box::new(synthesizer))
        .research_topic("quantum computing", 2)
        .await
        .unwrap();

    let llm = MockLLMClient::new("report");
    ReportAssembler::new(Box::new(llm.clone()))
        .build_report(&outcome.steps, &outcome.sources, ReportProfile::Comprehensive)
        .await
        .unwrap();

    let prompt = &llm.calls()[0].1;
    assert!(prompt.contains("Sources: [4] https://d.example, [2] https://b.example"));
    assert!(prompt.contains(
        "[1] https://a.example\n[2] https://b.example\n[3] https://c.example\n[4] https://d.example"
    ));
    // Registry untouched by report assembly
    assert_eq!(outcome.sources.len(), 4);
}
