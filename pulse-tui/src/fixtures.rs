//! Sample feedback clusters shown by the dashboard.

use record_table::{CellValue, ColumnDef, Record};

/// Lifecycle of a feedback cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterStatus {
    New,
    Triaged,
    Planned,
    Shipped,
}

impl ClusterStatus {
    pub fn label(self) -> &'static str {
        match self {
            ClusterStatus::New => "new",
            ClusterStatus::Triaged => "triaged",
            ClusterStatus::Planned => "planned",
            ClusterStatus::Shipped => "shipped",
        }
    }
}

/// A group of related customer feedback items.
#[derive(Debug, Clone)]
pub struct FeedbackCluster {
    pub id: String,
    pub title: String,
    pub segment: String,
    pub mentions: u32,
    /// -1.0 (negative) to 1.0 (positive).
    pub sentiment: f64,
    pub status: ClusterStatus,
    pub tags: Vec<String>,
    /// Linked persona as (id, name).
    pub persona: Option<(String, String)>,
    pub owner: Option<String>,
}

impl Record for FeedbackCluster {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn values(&self) -> Vec<CellValue> {
        vec![
            self.id.clone().into(),
            self.title.clone().into(),
            self.segment.clone().into(),
            self.mentions.into(),
            self.sentiment.into(),
            self.status.label().into(),
            self.tags.clone().into(),
            persona(self),
            self.owner.clone().into(),
        ]
    }
}

fn persona(cluster: &FeedbackCluster) -> CellValue {
    cluster
        .persona
        .as_ref()
        .map(|(id, name)| CellValue::reference(id.clone(), name.clone()))
        .unwrap_or_default()
}

/// Column schema of the feedback hub list.
pub fn feedback_columns() -> Vec<ColumnDef<FeedbackCluster>> {
    vec![
        ColumnDef::new("title", "Cluster", |c: &FeedbackCluster| c.title.clone().into()).width(28),
        ColumnDef::new("segment", "Segment", |c: &FeedbackCluster| c.segment.clone().into()),
        ColumnDef::new("mentions", "Mentions", |c: &FeedbackCluster| c.mentions.into())
            .class("numeric"),
        ColumnDef::new("sentiment", "Sentiment", |c: &FeedbackCluster| c.sentiment.into())
            .class("numeric")
            .render(|c: &FeedbackCluster| format!("{:+.2}", c.sentiment)),
        ColumnDef::new("status", "Status", |c: &FeedbackCluster| c.status.label().into())
            .class("badge"),
        ColumnDef::new("tags", "Tags", |c: &FeedbackCluster| c.tags.clone().into())
            .render(|c: &FeedbackCluster| c.tags.join(", ")),
        ColumnDef::new("persona", "Persona", persona),
        ColumnDef::new("owner", "Owner", |c: &FeedbackCluster| c.owner.clone().into())
            .class("muted"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn cluster(
    id: &str,
    title: &str,
    segment: &str,
    mentions: u32,
    sentiment: f64,
    status: ClusterStatus,
    tags: &[&str],
    persona: Option<(&str, &str)>,
    owner: Option<&str>,
) -> FeedbackCluster {
    FeedbackCluster {
        id: id.to_string(),
        title: title.to_string(),
        segment: segment.to_string(),
        mentions,
        sentiment,
        status,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        persona: persona.map(|(id, name)| (id.to_string(), name.to_string())),
        owner: owner.map(str::to_string),
    }
}

/// Sample clusters, in the order the feedback service returns them.
pub fn feedback_clusters() -> Vec<FeedbackCluster> {
    use ClusterStatus::*;

    let admin = Some(("p-admin", "IT admin"));
    let analyst = Some(("p-analyst", "Data analyst"));
    let founder = Some(("p-founder", "Startup founder"));

    vec![
        cluster("fc-101", "Search is slow on large workspaces", "Enterprise", 48, -0.62, Triaged, &["performance", "search"], admin, Some("maya")),
        cluster("fc-102", "Export dashboards to PDF", "Mid-market", 31, 0.15, Planned, &["reporting", "export"], analyst, Some("jon")),
        cluster("fc-103", "SSO with Okta", "Enterprise", 27, -0.20, Shipped, &["security", "auth"], admin, Some("maya")),
        cluster("fc-104", "Onboarding checklist is confusing", "SMB", 22, -0.48, New, &["onboarding"], founder, None),
        cluster("fc-105", "Dark mode", "SMB", 64, 0.41, Triaged, &["ui"], None, Some("lee")),
        cluster("fc-106", "Bulk edit for roadmap items", "Mid-market", 12, 0.05, New, &["roadmap"], analyst, None),
        cluster("fc-107", "Slack alerts for new insights", "Mid-market", 19, 0.33, Planned, &["integrations", "slack"], None, Some("jon")),
        cluster("fc-108", "Audit log retention", "Enterprise", 9, -0.12, New, &["security", "compliance"], admin, None),
        cluster("fc-109", "Billing page shows wrong currency", "SMB", 15, -0.71, Triaged, &["billing"], founder, Some("ana")),
        cluster("fc-110", "Custom fields on feedback", "Enterprise", 38, 0.22, Planned, &["feedback", "customization"], analyst, Some("ana")),
        cluster("fc-111", "Mobile app crashes on login", "SMB", 7, -0.88, New, &["mobile", "auth"], None, None),
        cluster("fc-112", "Weighted scoring for opportunities", "Mid-market", 26, 0.48, Shipped, &["prioritization"], analyst, Some("lee")),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_cluster_ids_are_unique() {
        let clusters = feedback_clusters();
        let ids: HashSet<String> = clusters.iter().map(Record::id).collect();
        assert_eq!(ids.len(), clusters.len());
    }

    #[test]
    fn test_column_keys_are_unique() {
        let columns = feedback_columns();
        let keys: HashSet<&str> = columns.iter().map(|c| c.key).collect();
        assert_eq!(keys.len(), columns.len());
    }

    #[test]
    fn test_missing_owner_renders_empty() {
        let clusters = feedback_clusters();
        let owner = feedback_columns()
            .into_iter()
            .find(|c| c.key == "owner")
            .unwrap();
        let unowned = clusters.iter().find(|c| c.owner.is_none()).unwrap();
        assert_eq!(owner.cell_text(unowned), "");
    }

    #[test]
    fn test_sentiment_render() {
        let clusters = feedback_clusters();
        let sentiment = feedback_columns()
            .into_iter()
            .find(|c| c.key == "sentiment")
            .unwrap();
        assert_eq!(sentiment.cell_text(&clusters[0]), "-0.62");
        assert_eq!(sentiment.cell_text(&clusters[1]), "+0.15");
    }
}
