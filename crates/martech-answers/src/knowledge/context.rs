//! Section renderers and context assembly for the completion-service path.
//!
//! The renderers here are shared with the deterministic fallback so both
//! paths present identical section content. Markdown conventions are fixed
//! for consumer rendering compatibility: bold via `**`, bullets via `•`.

use crate::knowledge::matcher::significant_tokens;
use crate::types::{KnowledgeDocument, MatchResult, TopicTag};

/// Up to `limit` FAQs whose question or answer shares a significant token
/// with the user's question, rendered as `Q:`/`A:` pairs.
pub fn render_relevant_faqs(
    question: &str,
    document: &KnowledgeDocument,
    limit: usize,
) -> Option<String> {
    let tokens = significant_tokens(question);
    if tokens.is_empty() || document.faqs.is_empty() {
        return None;
    }

    let relevant: Vec<String> = document
        .faqs
        .iter()
        .filter(|faq| {
            let haystack = format!("{} {}", faq.question, faq.answer).to_lowercase();
            tokens.iter().any(|t| haystack.contains(t.as_str()))
        })
        .take(limit)
        .map(|faq| format!("Q: {}\nA: {}", faq.question, faq.answer))
        .collect();

    if relevant.is_empty() {
        None
    } else {
        Some(relevant.join("\n\n"))
    }
}

/// Every predictive model with its scale and tier actions.
pub fn render_predictive_models(document: &KnowledgeDocument) -> Option<String> {
    if document.predictive_models.is_empty() {
        return None;
    }

    let mut out = String::from("**Predictive Models**\n");
    for model in &document.predictive_models {
        out.push_str(&format!("\n**{}** — {}\n", model.name, model.description));
        if let Some(scale) = &model.scale {
            out.push_str(&format!("Scale: {}\n", scale));
        }
        for tier in &model.tiers {
            match &tier.label {
                Some(label) => {
                    out.push_str(&format!("• {} ({}): {}\n", tier.tier, label, tier.action))
                }
                None => out.push_str(&format!("• {}: {}\n", tier.tier, tier.action)),
            }
        }
    }
    Some(out)
}

/// Tools referenced by name in the question; when none is named, every tool
/// in the document (the section was still topically requested).
pub fn render_tools(question: &str, document: &KnowledgeDocument) -> Option<String> {
    let q = question.to_lowercase();
    let all: Vec<_> = document
        .categories
        .iter()
        .flat_map(|c| &c.tools)
        .collect();
    if all.is_empty() {
        return None;
    }

    let referenced: Vec<_> = all
        .iter()
        .filter(|t| q.contains(&t.name.to_lowercase()))
        .copied()
        .collect();
    let selected = if referenced.is_empty() { all } else { referenced };

    let mut out = String::from("**Tools**\n");
    for tool in selected {
        out.push_str(&format!("\n**{}** — {}\n", tool.name, tool.description));
        if !tool.capabilities.is_empty() {
            out.push_str(&format!("Capabilities: {}\n", tool.capabilities.join(", ")));
        }
        if !tool.channels.is_empty() {
            out.push_str("Channels:\n");
            for channel in &tool.channels {
                out.push_str(&format!("• {}\n", channel));
            }
        }
        if !tool.integrations.is_empty() {
            out.push_str(&format!("Integrations: {}\n", tool.integrations.join(", ")));
        }
    }
    Some(out)
}

/// Measurement framework description plus each approach.
pub fn render_measurement(document: &KnowledgeDocument) -> Option<String> {
    let framework = &document.measurement_framework;
    if framework.description.is_empty() && framework.approaches.is_empty() {
        return None;
    }

    let mut out = String::from("**Measurement Framework**\n");
    if !framework.description.is_empty() {
        out.push_str(&framework.description);
        out.push('\n');
    }
    for approach in &framework.approaches {
        out.push_str(&format!(
            "• **{}** ({}): {}\n",
            approach.name, approach.purpose, approach.description
        ));
    }
    Some(out)
}

/// Regulations, the governing principle, and high-risk area requirements.
pub fn render_compliance(document: &KnowledgeDocument) -> Option<String> {
    let compliance = &document.compliance;
    if compliance.regulations.is_empty()
        && compliance.principle.is_empty()
        && compliance.high_risk_areas.is_empty()
    {
        return None;
    }

    let mut out = String::from("**Compliance**\n");
    if !compliance.regulations.is_empty() {
        out.push_str(&format!("Regulations: {}\n", compliance.regulations.join(", ")));
    }
    if !compliance.principle.is_empty() {
        out.push_str(&format!("Principle: {}\n", compliance.principle));
    }
    for area in &compliance.high_risk_areas {
        out.push_str(&format!("\n**{}**\n", area.area));
        for requirement in &area.requirements {
            out.push_str(&format!("• {}\n", requirement));
        }
    }
    Some(out)
}

/// Each data flow as `name: source -> destination (dataType)`.
pub fn render_data_flows(document: &KnowledgeDocument) -> Option<String> {
    if document.data_flows.is_empty() {
        return None;
    }

    let mut out = String::from("**Data Flows**\n");
    for flow in &document.data_flows {
        out.push_str(&format!(
            "• {}: {} -> {} ({})\n",
            flow.name, flow.source, flow.destination, flow.data_type
        ));
    }
    Some(out)
}

/// Build the knowledge context handed to the completion service. Fixed
/// section order; a section is omitted when its data is absent or its topic
/// was not routed. An empty result falls back to rendering the full
/// document so the completion service never receives an empty context.
pub fn assemble_context(
    question: &str,
    document: &KnowledgeDocument,
    result: &MatchResult,
    faq_limit: usize,
) -> String {
    let mut sections: Vec<String> = Vec::new();

    if let Some(faqs) = render_relevant_faqs(question, document, faq_limit) {
        sections.push(faqs);
    }
    if result.topics.contains(&TopicTag::LeadScoring) || result.topics.contains(&TopicTag::Churn) {
        sections.extend(render_predictive_models(document));
    }
    if result.topics.contains(&TopicTag::Tool) || result.topics.contains(&TopicTag::Channels) {
        sections.extend(render_tools(question, document));
    }
    if result.topics.contains(&TopicTag::Attribution) {
        sections.extend(render_measurement(document));
    }
    if result.topics.contains(&TopicTag::Compliance) {
        sections.extend(render_compliance(document));
    }
    if result.topics.contains(&TopicTag::DataFlow) {
        sections.extend(render_data_flows(document));
    }

    if sections.is_empty() {
        tracing::debug!("No topical sections matched, rendering full document context");
        return render_full_document(document);
    }

    sections.join("\n\n")
}

/// Unfiltered rendering of every document section, in the same fixed order.
pub fn render_full_document(document: &KnowledgeDocument) -> String {
    let mut sections: Vec<String> = Vec::new();

    if !document.faqs.is_empty() {
        let faqs: Vec<String> = document
            .faqs
            .iter()
            .map(|faq| format!("Q: {}\nA: {}", faq.question, faq.answer))
            .collect();
        sections.push(faqs.join("\n\n"));
    }
    sections.extend(render_predictive_models(document));
    sections.extend(render_tools("", document));
    sections.extend(render_measurement(document));
    sections.extend(render_compliance(document));
    sections.extend(render_data_flows(document));

    sections.join("\n\n")
}
