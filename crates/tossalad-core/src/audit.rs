//! Per-company audit: document presence, analysis presence, content
//! quality, and score alignment folded into one status.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alignment::{self, ScoreAlignment};
use crate::content::{self, ContentQuality};
use crate::model::{CompanyRecord, Document};

/// Documents shorter than this are flagged as too short.
const MIN_DOCUMENT_CHARS: usize = 100;

pub const ISSUE_NO_DOCUMENT: &str = "No ToS document found";
pub const ISSUE_NO_ANALYSIS: &str = "No analysis results found";
pub const ISSUE_SHORT_CONTENT: &str = "Document content too short or missing";
pub const ISSUE_LENGTH_MISMATCH: &str = "Document content_length does not match stored content";
pub const ISSUE_NO_SCORE: &str = "Transparency score missing";

pub const REC_SCRAPE: &str = "Need to scrape and store ToS document";
pub const REC_ANALYSE: &str = "Need to perform quote-and-explain analysis on existing document";
pub const REC_REVIEW: &str = "Review and improve analysis quality";
pub const REC_REPLACE: &str = "Replace with proper quote-and-explain analysis";

/// Terminal status of one audited company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AuditStatus {
    #[serde(rename = "High Quality")]
    HighQuality,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    #[serde(rename = "Missing Analysis")]
    MissingAnalysis,
    #[serde(rename = "Poor Quality")]
    PoorQuality,
    #[serde(rename = "Missing Document")]
    MissingDocument,
}

impl AuditStatus {
    /// All statuses in report order.
    pub const ALL: [AuditStatus; 5] = [
        Self::HighQuality,
        Self::NeedsImprovement,
        Self::MissingAnalysis,
        Self::PoorQuality,
        Self::MissingDocument,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighQuality => "High Quality",
            Self::NeedsImprovement => "Needs Improvement",
            Self::MissingAnalysis => "Missing Analysis",
            Self::PoorQuality => "Poor Quality",
            Self::MissingDocument => "Missing Document",
        }
    }

    /// Status for a record with both a document and an analysis.
    ///
    /// High Quality needs genuine content *and* good alignment; exactly one
    /// of the two gives Needs Improvement; neither gives Poor Quality.
    /// Generic filler is always Poor Quality: a well-aligned score on
    /// placeholder text still has to be replaced.
    pub fn from_checks(quality: ContentQuality, alignment: Option<ScoreAlignment>) -> Self {
        if quality == ContentQuality::Generic {
            return Self::PoorQuality;
        }
        let genuine = quality == ContentQuality::Genuine;
        let aligned = alignment == Some(ScoreAlignment::Good);
        match (genuine, aligned) {
            (true, true) => Self::HighQuality,
            (true, false) | (false, true) => Self::NeedsImprovement,
            (false, false) => Self::PoorQuality,
        }
    }
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit outcome for one company. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub company_name: String,
    pub domain: String,
    pub has_document: bool,
    pub has_analysis: bool,
    pub transparency_score: Option<f64>,
    pub red_flag_count: Option<usize>,
    pub score_alignment: Option<ScoreAlignment>,
    pub content_quality: Option<ContentQuality>,
    pub status: AuditStatus,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AuditRecord {
    fn empty(record: &CompanyRecord, status: AuditStatus) -> Self {
        Self {
            company_name: record.company.name.clone(),
            domain: record.company.domain.clone(),
            has_document: record.document.is_some(),
            has_analysis: record.result.is_some(),
            transparency_score: None,
            red_flag_count: None,
            score_alignment: None,
            content_quality: None,
            status,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// Audit one resolved company record.
///
/// Never fails: every anomaly becomes an entry in `issues`.
pub fn audit_record(record: &CompanyRecord) -> AuditRecord {
    let Some(document) = &record.document else {
        let mut out = AuditRecord::empty(record, AuditStatus::MissingDocument);
        out.issues.push(ISSUE_NO_DOCUMENT.into());
        out.recommendations.push(REC_SCRAPE.into());
        debug!(company = %out.company_name, status = %out.status, "audited");
        return out;
    };

    let Some(result) = &record.result else {
        let mut out = AuditRecord::empty(record, AuditStatus::MissingAnalysis);
        out.issues.push(ISSUE_NO_ANALYSIS.into());
        out.issues.extend(document_issues(document));
        out.recommendations.push(REC_ANALYSE.into());
        debug!(company = %out.company_name, status = %out.status, "audited");
        return out;
    };

    let quality = content::classify(document.raw_content.as_deref());
    let red_flags = result.red_flag_count();

    let mut issues = Vec::new();
    if let Some(issue) = quality.issue() {
        issues.push(issue.to_string());
    }

    let alignment = match result.transparency_score {
        Some(score) => {
            let check = alignment::check(score, red_flags);
            if check.verdict != ScoreAlignment::Good {
                issues.push(format!(
                    "Score alignment {}: transparency score {} vs expected {} for {} red flags",
                    check.verdict, score, check.expected, red_flags
                ));
            }
            Some(check.verdict)
        }
        None => {
            issues.push(ISSUE_NO_SCORE.into());
            None
        }
    };
    issues.extend(document_issues(document));

    let status = AuditStatus::from_checks(quality, alignment);
    let recommendations = match status {
        AuditStatus::NeedsImprovement => vec![REC_REVIEW.to_string()],
        AuditStatus::PoorQuality => vec![REC_REPLACE.to_string()],
        _ => Vec::new(),
    };

    let mut out = AuditRecord::empty(record, status);
    out.transparency_score = result.transparency_score;
    out.red_flag_count = Some(red_flags);
    out.score_alignment = alignment;
    out.content_quality = Some(quality);
    out.issues = issues;
    out.recommendations = recommendations;
    debug!(
        company = %out.company_name,
        status = %out.status,
        quality = %quality,
        red_flags,
        "audited"
    );
    out
}

/// Diagnostics on the stored document that do not affect status.
fn document_issues(document: &Document) -> Vec<String> {
    let mut issues = Vec::new();
    if document.char_len() < MIN_DOCUMENT_CHARS {
        issues.push(ISSUE_SHORT_CONTENT.to_string());
    }
    if document.content_length_mismatch() {
        issues.push(ISSUE_LENGTH_MISMATCH.to_string());
    }
    issues
}
