//! Templated answers over the live campaign snapshot.
//!
//! Pure function of the question and snapshot. Never errors: an empty or
//! unusable snapshot, or a question with no recognizable sub-intent, returns
//! `None` so the caller falls through to the knowledge path.

use crate::config::AnswerLimits;
use crate::live::intent::DataIntent;
use crate::types::Campaign;

/// Produce a live-data answer, or `None` to fall through to the knowledge
/// matcher. Records are presented most recently edited first, falling back
/// to creation time.
pub fn synthesize(question: &str, records: &[Campaign], limits: &AnswerLimits) -> Option<String> {
    if records.is_empty() {
        return None;
    }
    let intent = DataIntent::detect(question)?;

    let mut sorted: Vec<&Campaign> = records.iter().collect();
    sorted.sort_by(|a, b| b.recency().cmp(&a.recency()));

    tracing::debug!(?intent, records = records.len(), "Synthesizing live-data answer");

    let answer = match intent {
        DataIntent::Count => render_count(&sorted),
        DataIntent::List => render_list(&sorted, limits.list_limit),
        DataIntent::Recency => render_recent(&sorted, limits.recent_limit),
        DataIntent::NameSearch(term) => render_search(&sorted, &term, limits.search_limit),
    };
    Some(answer)
}

fn render_count(sorted: &[&Campaign]) -> String {
    let total = sorted.len();
    let drafts = sorted.iter().filter(|c| c.is_draft).count();
    let active = total - drafts;
    format!(
        "**You have {} {}**\n• {} active\n• {} in draft",
        total,
        pluralize(total),
        active,
        drafts
    )
}

fn render_list(sorted: &[&Campaign], limit: usize) -> String {
    let mut out = String::from("**Your campaigns** (most recently edited first):\n");
    for (i, campaign) in sorted.iter().take(limit).enumerate() {
        out.push_str(&campaign_line(i + 1, campaign));
    }
    if sorted.len() > limit {
        out.push_str(&format!("...and {} more", sorted.len() - limit));
    }
    out.trim_end().to_string()
}

fn render_recent(sorted: &[&Campaign], limit: usize) -> String {
    let shown = limit.min(sorted.len());
    let mut out = format!(
        "**Your {} most recent {}:**\n",
        shown,
        pluralize(shown)
    );
    for (i, campaign) in sorted.iter().take(limit).enumerate() {
        out.push_str(&campaign_line(i + 1, campaign));
    }
    out.trim_end().to_string()
}

fn render_search(sorted: &[&Campaign], term: &str, limit: usize) -> String {
    let term_lower = term.to_lowercase();
    let matches: Vec<&&Campaign> = sorted
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&term_lower))
        .collect();

    if matches.is_empty() {
        return format!(
            "No campaigns matching \"{}\". You have {} {} in total.",
            term,
            sorted.len(),
            pluralize(sorted.len())
        );
    }

    let mut out = format!("**Campaigns matching \"{}\":**\n", term);
    for (i, campaign) in matches.iter().take(limit).enumerate() {
        out.push_str(&campaign_line(i + 1, campaign));
    }
    out.trim_end().to_string()
}

fn campaign_line(position: usize, campaign: &Campaign) -> String {
    let mut line = format!("{}. **{}**", position, campaign.name);
    if campaign.is_draft {
        line.push_str(" (draft)");
    }
    if let Some(edited) = campaign.recency() {
        line.push_str(&format!(" — last edited {}", edited.format("%b %d, %Y")));
    }
    line.push('\n');
    line
}

fn pluralize(n: usize) -> &'static str {
    if n == 1 {
        "campaign"
    } else {
        "campaigns"
    }
}
