//! FAQ matching and topic routing.
//!
//! All matching is lexical: lowercased substring tests over whitespace
//! tokens. The topic table is data (ordered predicate → tag pairs) so the
//! routing that feeds context assembly and the routing that feeds fallback
//! rendering cannot diverge.

use std::collections::BTreeSet;

use crate::types::{Faq, KnowledgeDocument, MatchResult, TopicTag};

/// Lowercased whitespace tokens of length > 3. These drive all FAQ scoring;
/// a question with none of them scores 0 against every FAQ.
pub fn significant_tokens(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .split_whitespace()
        .filter(|t| t.len() > 3)
        .map(|t| t.to_string())
        .collect()
}

/// Score every FAQ against the question and return the index and score of
/// the best one. Score = matched significant tokens / total significant
/// tokens; a token matches when it appears as a substring of the FAQ's
/// lowercased question text. Strictly-greater comparison keeps the first
/// FAQ in document order on ties.
pub fn find_best_faq(question: &str, faqs: &[Faq]) -> (Option<usize>, f32) {
    let tokens = significant_tokens(question);
    if tokens.is_empty() {
        return (None, 0.0);
    }

    let mut best: Option<usize> = None;
    let mut best_score = 0.0f32;

    for (idx, faq) in faqs.iter().enumerate() {
        let faq_question = faq.question.to_lowercase();
        let matched = tokens.iter().filter(|t| faq_question.contains(t.as_str())).count();
        let score = matched as f32 / tokens.len().max(1) as f32;
        if score > best_score {
            best = Some(idx);
            best_score = score;
        }
    }

    tracing::debug!(
        tokens = tokens.len(),
        best = ?best,
        score = best_score,
        "FAQ scoring complete"
    );

    (best, best_score)
}

/// Ordered topic-routing table. Each rule is a plain substring predicate over
/// the lowercased question; rules are independent and the union of all
/// matching tags is returned.
const TOPIC_RULES: &[(TopicTag, fn(&str) -> bool)] = &[
    (TopicTag::LeadScoring, |q| q.contains("lead scor")),
    (TopicTag::Churn, |q| q.contains("churn")),
    (TopicTag::Channels, |q| q.contains("channel")),
    (TopicTag::Attribution, |q| {
        q.contains("mta") || q.contains("mmm") || q.contains("attribution")
    }),
    (TopicTag::Compliance, |q| {
        ["gdpr", "compliance", "privacy", "consent"]
            .iter()
            .any(|t| q.contains(t))
    }),
    (TopicTag::DataFlow, |q| {
        (q.contains("data") && (q.contains("collect") || q.contains("flow")))
            || q.contains("segment")
    }),
];

/// Route a question to zero or more document sections. Independent of FAQ
/// scoring. The `Tool` tag additionally fires when any tool name from the
/// document appears in the question.
pub fn route_topics(question: &str, document: &KnowledgeDocument) -> BTreeSet<TopicTag> {
    let q = question.to_lowercase();
    let mut topics: BTreeSet<TopicTag> = TOPIC_RULES
        .iter()
        .filter(|(_, predicate)| predicate(&q))
        .map(|(tag, _)| *tag)
        .collect();

    let mentions_tool = document
        .categories
        .iter()
        .flat_map(|c| &c.tools)
        .any(|tool| q.contains(&tool.name.to_lowercase()));
    if mentions_tool {
        topics.insert(TopicTag::Tool);
    }

    if !topics.is_empty() {
        tracing::debug!(?topics, "Topic routing matched");
    }
    topics
}

/// Full match pass: best FAQ plus routed topics.
pub fn match_question(question: &str, document: &KnowledgeDocument) -> MatchResult {
    let (faq, score) = find_best_faq(question, &document.faqs);
    MatchResult {
        faq: if score > 0.0 { faq } else { None },
        score,
        topics: route_topics(question, document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MarketingTool, MatchStrength, ToolCategory};

    fn faq(question: &str) -> Faq {
        Faq {
            question: question.to_string(),
            answer: format!("answer to {}", question),
        }
    }

    #[test]
    fn lead_scoring_question_is_confident_match() {
        let faqs = vec![
            faq("What channels does Braze support?"),
            faq("How does lead scoring work?"),
        ];
        let (best, score) = find_best_faq("How does lead scoring work in our system", &faqs);
        assert_eq!(best, Some(1));
        // 4 of 5 significant tokens (does, lead, scoring, work) match
        assert!(score > 0.5, "expected confident score, got {}", score);
    }

    #[test]
    fn scoring_is_deterministic() {
        let faqs = vec![faq("How does churn prediction work?")];
        let a = find_best_faq("explain churn prediction please", &faqs);
        let b = find_best_faq("explain churn prediction please", &faqs);
        assert_eq!(a, b);
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let faqs = vec![faq("How does lead scoring work?")];
        let (_, score) = find_best_faq("lead scoring lead scoring lead scoring", &faqs);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn no_significant_tokens_scores_zero() {
        let faqs = vec![faq("How does lead scoring work?")];
        let (best, score) = find_best_faq("hi", &faqs);
        assert_eq!(best, None);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn tie_break_keeps_first_faq_in_document_order() {
        let faqs = vec![
            faq("How does lead scoring work?"),
            faq("How does lead scoring work today?"),
        ];
        let (best, _) = find_best_faq("lead scoring work", &faqs);
        assert_eq!(best, Some(0));
    }

    #[test]
    fn topic_table_matches_expected_tags() {
        let doc = KnowledgeDocument::default();
        let topics = route_topics("how is churn related to gdpr consent and attribution", &doc);
        assert!(topics.contains(&TopicTag::Churn));
        assert!(topics.contains(&TopicTag::Compliance));
        assert!(topics.contains(&TopicTag::Attribution));
        assert!(!topics.contains(&TopicTag::Channels));
    }

    #[test]
    fn channel_alone_triggers_channels() {
        let doc = KnowledgeDocument::default();
        let topics = route_topics("what channels do we use", &doc);
        assert!(topics.contains(&TopicTag::Channels));
    }

    #[test]
    fn data_flow_needs_collect_or_flow_unless_segment() {
        let doc = KnowledgeDocument::default();
        assert!(route_topics("how do we collect data", &doc).contains(&TopicTag::DataFlow));
        assert!(route_topics("explain the data flow", &doc).contains(&TopicTag::DataFlow));
        assert!(route_topics("what is a segment", &doc).contains(&TopicTag::DataFlow));
        assert!(!route_topics("show me the data", &doc).contains(&TopicTag::DataFlow));
    }

    #[test]
    fn tool_name_from_document_triggers_tool_tag() {
        let mut doc = KnowledgeDocument::default();
        doc.categories.push(ToolCategory {
            name: "Engagement".into(),
            description: "Customer engagement".into(),
            tools: vec![MarketingTool {
                name: "Braze".into(),
                description: "Engagement platform".into(),
                capabilities: vec![],
                channels: vec![],
                integrations: vec![],
            }],
        });
        let topics = route_topics("is braze set up", &doc);
        assert!(topics.contains(&TopicTag::Tool));
    }

    #[test]
    fn match_question_clears_faq_on_zero_score() {
        let mut doc = KnowledgeDocument::default();
        doc.faqs.push(faq("How does lead scoring work?"));
        let result = match_question("hi", &doc);
        assert_eq!(result.faq, None);
        assert_eq!(result.strength(), MatchStrength::None);
    }
}
