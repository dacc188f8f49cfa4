//! Data model for the answer engine.
//!
//! The knowledge document and live campaign snapshots originate from a
//! JS-side producer, so everything deserializes from camelCase JSON. All
//! collections default to empty so a partial document is still usable.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The hand-curated knowledge document. Read-only for the lifetime of a
/// request; the matcher never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnowledgeDocument {
    pub faqs: Vec<Faq>,
    pub predictive_models: Vec<PredictiveModel>,
    pub categories: Vec<ToolCategory>,
    pub data_flows: Vec<DataFlow>,
    pub measurement_framework: MeasurementFramework,
    pub compliance: Compliance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveModel {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub scale: Option<String>,
    #[serde(default)]
    pub tiers: Vec<ModelTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelTier {
    pub tier: String,
    #[serde(default)]
    pub label: Option<String>,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCategory {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tools: Vec<MarketingTool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingTool {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub integrations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFlow {
    pub name: String,
    pub source: String,
    pub destination: String,
    pub description: String,
    pub data_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeasurementFramework {
    pub description: String,
    pub approaches: Vec<MeasurementApproach>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementApproach {
    pub name: String,
    pub purpose: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Compliance {
    pub regulations: Vec<String>,
    pub principle: String,
    pub high_risk_areas: Vec<HighRiskArea>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighRiskArea {
    pub area: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// A live campaign record fetched per request from the engagement platform.
/// Never persisted by this crate. Timestamps tolerate RFC 3339 or bare
/// `YYYY-MM-DD`; anything else deserializes to `None` rather than failing
/// the whole snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_edited: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_draft: bool,
}

impl Campaign {
    /// Sort key for recency ordering: last edit, falling back to creation.
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.last_edited.or(self.created_at)
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Coarse category labels routing a question to a document section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicTag {
    LeadScoring,
    Churn,
    Channels,
    Attribution,
    Compliance,
    DataFlow,
    Tool,
}

/// How useful the best FAQ match is, per the two-threshold policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrength {
    /// score > 0.5 — usable as a final answer on its own
    Confident,
    /// 0.3 < score <= 0.5 — usable as context for a completion call
    Contextual,
    /// score <= 0.3 — no FAQ match, proceed to topic routing
    None,
}

/// Result of matching a question against the knowledge document.
/// Computed fresh per request, never persisted.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Index into `document.faqs` of the best-scoring FAQ, if any scored > 0.
    pub faq: Option<usize>,
    pub score: f32,
    pub topics: BTreeSet<TopicTag>,
}

impl MatchResult {
    pub fn strength(&self) -> MatchStrength {
        if self.faq.is_none() {
            return MatchStrength::None;
        }
        if self.score > 0.5 {
            MatchStrength::Confident
        } else if self.score > 0.3 {
            MatchStrength::Contextual
        } else {
            MatchStrength::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_deserializes_with_defaults() {
        let doc: KnowledgeDocument =
            serde_json::from_str(r#"{"faqs":[{"question":"q","answer":"a"}]}"#).unwrap();
        assert_eq!(doc.faqs.len(), 1);
        assert!(doc.predictive_models.is_empty());
        assert!(doc.compliance.regulations.is_empty());
    }

    #[test]
    fn campaign_accepts_bare_date() {
        let c: Campaign =
            serde_json::from_str(r#"{"name":"Summer Sale","lastEdited":"2024-06-01"}"#).unwrap();
        assert!(c.last_edited.is_some());
        assert_eq!(c.recency(), c.last_edited);
    }

    #[test]
    fn campaign_tolerates_garbage_timestamp() {
        let c: Campaign =
            serde_json::from_str(r#"{"name":"X","createdAt":"not a date","isDraft":true}"#)
                .unwrap();
        assert!(c.created_at.is_none());
        assert!(c.recency().is_none());
        assert!(c.is_draft);
    }

    #[test]
    fn recency_falls_back_to_created_at() {
        let c: Campaign =
            serde_json::from_str(r#"{"name":"Welcome Series","createdAt":"2024-05-01"}"#).unwrap();
        assert_eq!(c.recency(), c.created_at);
    }

    #[test]
    fn strength_thresholds_are_exclusive() {
        let mk = |score: f32| MatchResult {
            faq: Some(0),
            score,
            topics: BTreeSet::new(),
        };
        assert_eq!(mk(0.75).strength(), MatchStrength::Confident);
        assert_eq!(mk(0.5).strength(), MatchStrength::Contextual);
        assert_eq!(mk(0.4).strength(), MatchStrength::Contextual);
        assert_eq!(mk(0.3).strength(), MatchStrength::None);
    }
}
