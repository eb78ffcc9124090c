//! Search-query hygiene.
//!
//! Follow-up queries come back from a language model, so they are parsed
//! leniently and then reduced to characters a search provider accepts.

/// Maximum number of follow-up queries taken from a model response.
pub const MAX_FOLLOW_UP_QUERIES: usize = 3;

const ALLOWED_PUNCTUATION: &[char] = &['.', ',', '\'', '-', '?', ':', '!', '(', ')', '&', '/'];

/// Keep alphanumerics, whitespace and basic punctuation; collapse whitespace.
///
/// Returns an empty string when nothing usable remains.
pub fn sanitize_query(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || ALLOWED_PUNCTUATION.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Query used when the model produced no usable follow-up.
pub fn fallback_query(topic: &str) -> String {
    sanitize_query(&format!("{} latest research", topic))
}

/// Extract up to [`MAX_FOLLOW_UP_QUERIES`] sanitized queries from model output.
///
/// Accepts a JSON array of strings anywhere in the text; otherwise treats each
/// non-empty line as a query after removing list markers. Returns an empty
/// vector when nothing usable is found.
pub fn parse_follow_up_queries(raw: &str) -> Vec<String> {
    let candidates = parse_json_array(raw).unwrap_or_else(|| parse_lines(raw));

    candidates
        .iter()
        .map(|candidate| sanitize_query(candidate))
        .filter(|query| !query.is_empty())
        .take(MAX_FOLLOW_UP_QUERIES)
        .collect()
}

fn parse_json_array(raw: &str) -> Option<Vec<String>> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Vec<String>>(&raw[start..=end]).ok()
}

fn parse_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```") && !line.ends_with(':'))
        .map(|line| strip_list_marker(line).to_string())
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim_start();
        }
        return line;
    }
    line.trim_start_matches(&['-', '*', '•'][..]).trim_start()
}
