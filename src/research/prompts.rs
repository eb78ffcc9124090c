//! Prompt text and report profiles used by the research loop.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const RESEARCH_ASSISTANT_SYSTEM_PROMPT: &str =
    "You are a research assistant helping to gather and analyze information from web searches.";

pub const QUERY_GENERATOR_SYSTEM_PROMPT: &str =
    "You are a research assistant helping to generate effective follow-up search queries.";

pub const REPORT_WRITER_SYSTEM_PROMPT: &str = "You are a research paper writer synthesizing findings from web research. Use Markdown formatting and include proper citations.";

pub const SYNTHESIS_INSTRUCTIONS: &str = r#"Please analyze these search results and their full content to provide:
1. Key facts and data points
2. Expert opinions and perspectives
3. Recent developments or trends
4. Contrasting viewpoints or contradictions
5. Industry-specific insights
6. Statistical information when available
7. Practical applications or real-world examples
8. Technical details or specifications
9. Potential limitations or challenges
10. Market or domain context

Structure your analysis to:
- Highlight the most significant and reliable information
- Note the credibility and relevance of sources
- Identify any potential biases or limitations in the data
- Connect new information with previous findings
- Flag areas that need verification or deeper investigation

Provide your analysis in a detailed but concise format."#;

pub const FOLLOW_UP_INSTRUCTIONS: &str = r#"Generate 3 specific follow-up search queries that would help:
1. Fill gaps in our current knowledge
2. Verify important claims
3. Explore related aspects we haven't covered

Return ONLY search queries that are clear and contain no special characters.
Respond with a JSON array of strings and nothing else, like this:

["first query", "second query", "third query"]"#;

pub const REPORT_FORMATTING_REQUIREMENTS: &str = r#"Formatting requirements:
- Use Markdown formatting for clear structure
- Include inline citations using the numbers from the source list, e.g. [1], [2]
- Only cite numbers that appear in the source list; never renumber sources
- Add a References section listing all sources
- Format each reference on its own line as: [n] URL
- Use tables for comparing data where appropriate
- Use bullet points for lists
- Include relevant quotes when they add value
- Break down complex information into digestible sections"#;

/// Kind of report the assembler asks the model to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportProfile {
    #[default]
    Comprehensive,
    Technical,
    Market,
    Summary,
}

impl ReportProfile {
    pub const ALL: [ReportProfile; 4] = [
        ReportProfile::Comprehensive,
        ReportProfile::Technical,
        ReportProfile::Market,
        ReportProfile::Summary,
    ];

    /// Resolve a profile by name. Unknown names fall back to `Comprehensive`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(profile = name, "Unknown report profile, using comprehensive");
            ReportProfile::Comprehensive
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReportProfile::Comprehensive => "comprehensive",
            ReportProfile::Technical => "technical",
            ReportProfile::Market => "market",
            ReportProfile::Summary => "summary",
        }
    }

    /// Fixed instruction block for this profile.
    pub fn instructions(&self) -> &'static str {
        match self {
            ReportProfile::Comprehensive => {
                r#"Generate a comprehensive report that:
1. Provides an executive summary
2. Outlines key findings and insights
3. Presents detailed analysis with supporting evidence
4. Includes relevant statistics and data
5. Discusses market/industry implications
6. Highlights best practices and recommendations
7. Addresses challenges and limitations
8. Suggests next steps or areas for further investigation"#
            }
            ReportProfile::Technical => {
                r#"Generate a technical analysis report that:
1. Focuses on technical specifications and capabilities
2. Provides detailed architectural or system information
3. Compares technical approaches and solutions
4. Analyzes performance metrics and benchmarks
5. Discusses implementation considerations
6. Addresses technical challenges and limitations
7. Includes code examples or technical diagrams where relevant"#
            }
            ReportProfile::Market => {
                r#"Generate a market analysis report that:
1. Analyzes market trends and dynamics
2. Examines competitive landscape
3. Identifies market opportunities and challenges
4. Provides relevant market statistics
5. Discusses economic factors and implications
6. Includes customer/user insights
7. Offers market forecasts and predictions"#
            }
            ReportProfile::Summary => {
                r#"Generate a concise summary report that:
1. Highlights the most important findings
2. Presents key conclusions
3. Outlines critical insights
4. Provides essential recommendations
5. Lists main action items"#
            }
        }
    }
}

impl fmt::Display for ReportProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognised profile name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report profile: {0}")]
pub struct UnknownProfile(pub String);

impl FromStr for ReportProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comprehensive" => Ok(ReportProfile::Comprehensive),
            "technical" => Ok(ReportProfile::Technical),
            "market" => Ok(ReportProfile::Market),
            "summary" => Ok(ReportProfile::Summary),
            _ => Err(UnknownProfile(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("comprehensive", ReportProfile::Comprehensive)]
    #[case("Technical", ReportProfile::Technical)]
    #[case(" market ", ReportProfile::Market)]
    #[case("SUMMARY", ReportProfile::Summary)]
    #[case("haiku", ReportProfile::Comprehensive)]
    #[case("", ReportProfile::Comprehensive)]
    fn test_from_name(#[case] name: &str, #[case] expected: ReportProfile) {
        assert_eq!(ReportProfile::from_name(name), expected);
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        assert_eq!(
            "haiku".parse::<ReportProfile>(),
            Err(UnknownProfile("haiku".to_string()))
        );
    }

    #[test]
    fn test_every_profile_has_distinct_instructions() {
        for profile in ReportProfile::ALL {
            assert_eq!(ReportProfile::from_name(profile.name()), profile);
            assert!(profile.instructions().starts_with("Generate"));
        }
        assert_ne!(
            ReportProfile::Technical.instructions(),
            ReportProfile::Market.instructions()
        );
    }
}
