//! Live-data intent detection.
//!
//! A question is only handed to the synthesizer when it combines a
//! countable/listable/recency/search verb with the campaign noun. Sub-intent
//! detection is an ordered rule list: name-search first (its phrasing also
//! contains list verbs), then count, recency, list.

use std::sync::LazyLock;

use regex::Regex;

static NAME_SEARCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"campaigns?\b.*?\b(?:called|named|about|for)\s+"?([^"?]+?)"?\s*\??\s*$"#)
        .expect("name search regex is valid")
});

const COUNT_VERBS: &[&str] = &["how many", "count", "total"];
const LIST_VERBS: &[&str] = &["list", "show", "what", "which"];
const RECENCY_VERBS: &[&str] = &["recent", "latest", "last", "new"];

/// True when the question is about the live campaign snapshot at all.
/// Evaluated by the engine only when a non-empty snapshot was supplied.
pub fn matches_data_intent(question: &str) -> bool {
    let q = question.to_lowercase();
    if !q.contains("campaign") {
        return false;
    }
    COUNT_VERBS
        .iter()
        .chain(LIST_VERBS)
        .chain(RECENCY_VERBS)
        .any(|v| q.contains(v))
}

/// The specific live-data question being asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataIntent {
    /// Total plus draft/active breakdown.
    Count,
    /// Numbered list of campaigns.
    List,
    /// Top campaigns by last edit.
    Recency,
    /// Campaigns whose name contains the captured term.
    NameSearch(String),
}

impl DataIntent {
    /// First matching sub-intent rule, or `None` when the question is not a
    /// recognizable live-data question (explicit fallthrough to the
    /// knowledge path).
    pub fn detect(question: &str) -> Option<DataIntent> {
        let q = question.to_lowercase();

        if let Some(caps) = NAME_SEARCH_RE.captures(&q) {
            let term = caps[1].trim().trim_matches('"').to_string();
            if !term.is_empty() {
                return Some(DataIntent::NameSearch(term));
            }
        }
        if COUNT_VERBS.iter().any(|v| q.contains(v)) {
            return Some(DataIntent::Count);
        }
        if RECENCY_VERBS.iter().any(|v| q.contains(v)) {
            return Some(DataIntent::Recency);
        }
        if LIST_VERBS.iter().any(|v| q.contains(v)) {
            return Some(DataIntent::List);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_question_matches() {
        assert!(matches_data_intent("how many campaigns do we have"));
        assert_eq!(
            DataIntent::detect("how many campaigns do we have"),
            Some(DataIntent::Count)
        );
    }

    #[test]
    fn recency_question_matches() {
        assert!(matches_data_intent("recent campaigns"));
        assert_eq!(
            DataIntent::detect("recent campaigns"),
            Some(DataIntent::Recency)
        );
    }

    #[test]
    fn list_question_matches() {
        assert_eq!(
            DataIntent::detect("list my campaigns"),
            Some(DataIntent::List)
        );
    }

    #[test]
    fn name_search_beats_list_verbs() {
        assert_eq!(
            DataIntent::detect("which campaign is called Summer Sale?"),
            Some(DataIntent::NameSearch("summer sale".into()))
        );
    }

    #[test]
    fn name_search_strips_quotes() {
        assert_eq!(
            DataIntent::detect(r#"show the campaign named "Welcome Series""#),
            Some(DataIntent::NameSearch("welcome series".into()))
        );
    }

    #[test]
    fn question_without_campaign_noun_is_not_data_intent() {
        assert!(!matches_data_intent("how many channels does Braze support"));
    }

    #[test]
    fn campaign_mention_without_verb_falls_through() {
        assert!(!matches_data_intent("tell me about campaign strategy"));
        assert_eq!(DataIntent::detect("tell me something please"), None);
    }
}
