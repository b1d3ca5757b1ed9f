//! Aggregate audit report: status buckets, summary metrics, and the fixed
//! priority action list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{AuditRecord, AuditStatus};

/// Follow-up actions printed at the end of every report.
///
/// Static boilerplate: the list does not depend on the audit findings.
pub const PRIORITY_ACTIONS: [&str; 5] = [
    "Replace generic or placeholder analyses with quote-and-explain analyses",
    "Run analysis for every company that has a document but no results",
    "Scrape and store ToS documents for companies that have none",
    "Recalibrate transparency scores that disagree with their red flag counts",
    "Re-run this audit after each batch of fixes",
];

/// Records partitioned by status. Each record lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusBuckets {
    #[serde(rename = "High Quality")]
    pub high_quality: Vec<AuditRecord>,
    #[serde(rename = "Needs Improvement")]
    pub needs_improvement: Vec<AuditRecord>,
    #[serde(rename = "Missing Analysis")]
    pub missing_analysis: Vec<AuditRecord>,
    #[serde(rename = "Poor Quality")]
    pub poor_quality: Vec<AuditRecord>,
    #[serde(rename = "Missing Document")]
    pub missing_document: Vec<AuditRecord>,
}

impl StatusBuckets {
    /// Partition records by status, keeping input order within each bucket.
    pub fn partition(records: &[AuditRecord]) -> Self {
        let mut buckets = Self::default();
        for record in records {
            buckets.bucket_mut(record.status).push(record.clone());
        }
        buckets
    }

    pub fn get(&self, status: AuditStatus) -> &[AuditRecord] {
        match status {
            AuditStatus::HighQuality => &self.high_quality,
            AuditStatus::NeedsImprovement => &self.needs_improvement,
            AuditStatus::MissingAnalysis => &self.missing_analysis,
            AuditStatus::PoorQuality => &self.poor_quality,
            AuditStatus::MissingDocument => &self.missing_document,
        }
    }

    fn bucket_mut(&mut self, status: AuditStatus) -> &mut Vec<AuditRecord> {
        match status {
            AuditStatus::HighQuality => &mut self.high_quality,
            AuditStatus::NeedsImprovement => &mut self.needs_improvement,
            AuditStatus::MissingAnalysis => &mut self.missing_analysis,
            AuditStatus::PoorQuality => &mut self.poor_quality,
            AuditStatus::MissingDocument => &mut self.missing_document,
        }
    }

    /// Buckets in report order.
    pub fn iter(&self) -> impl Iterator<Item = (AuditStatus, &[AuditRecord])> {
        AuditStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, records)| records.len()).sum()
    }
}

/// Summary counts and rounded percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetrics {
    pub total: usize,
    pub high_quality_count: usize,
    pub high_quality_percent: u32,
    pub needs_work_count: usize,
    pub needs_work_percent: u32,
}

impl AuditMetrics {
    pub fn from_buckets(buckets: &StatusBuckets) -> Self {
        let total = buckets.total();
        let high_quality_count = buckets.high_quality.len();
        let needs_work_count = total - high_quality_count;
        Self {
            total,
            high_quality_count,
            high_quality_percent: percent(high_quality_count, total),
            needs_work_count,
            needs_work_percent: percent(needs_work_count, total),
        }
    }
}

/// `round(count / total * 100)`, or 0 for an empty set.
pub fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Full result of one audit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Run timestamp. The only field that varies between identical runs.
    pub generated_at: DateTime<Utc>,
    /// Every record, in scan order.
    pub records: Vec<AuditRecord>,
    pub buckets: StatusBuckets,
    pub metrics: AuditMetrics,
    pub priority_actions: Vec<String>,
}

impl AuditReport {
    pub fn build(records: Vec<AuditRecord>, generated_at: DateTime<Utc>) -> Self {
        let buckets = StatusBuckets::partition(&records);
        let metrics = AuditMetrics::from_buckets(&buckets);
        Self {
            generated_at,
            records,
            buckets,
            metrics,
            priority_actions: PRIORITY_ACTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Compare two reports while ignoring `generated_at`.
    pub fn eq_ignoring_timestamp(&self, other: &Self) -> bool {
        self.records == other.records
            && self.buckets == other.buckets
            && self.metrics == other.metrics
            && self.priority_actions == other.priority_actions
    }
}
