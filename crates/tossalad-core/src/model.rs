//! Row types for companies, ToS documents, and analysis results.
//!
//! Shapes follow the hosted store's JSON rows. Nested arrays come from
//! embedded selects and may be absent or `null` on a partial payload; both
//! deserialise to an empty `Vec` so the auditor sees "no rows", not an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// An organisation whose Terms of Service are analysed. Unique by `domain`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub domain: String,
    pub industry: Option<String>,
    pub headquarters: Option<String>,
    pub founded_year: Option<i32>,
    pub tos_url: Option<String>,
    pub corporate_website: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub documents: Vec<Document>,
    /// Results embedded directly under the company (keyed by `company_id`).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub analysis_results: Vec<AnalysisResult>,
}

/// A stored ToS document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "id_string")]
    pub company_id: String,
    pub document_type: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub raw_content: Option<String>,
    pub cleaned_content: Option<String>,
    pub content_hash: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub scraped_at: Option<DateTime<Utc>>,
    pub http_status: Option<u16>,
    pub content_length: Option<i64>,
    pub content_type: Option<String>,
    pub is_analyzed: Option<bool>,
    /// Results embedded under the document (keyed by `document_id`).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub analysis_results: Vec<AnalysisResult>,
}

impl Document {
    /// Raw content, with a missing column read as empty text.
    pub fn text(&self) -> &str {
        self.raw_content.as_deref().unwrap_or("")
    }

    /// Character length of `raw_content`.
    pub fn char_len(&self) -> usize {
        self.text().chars().count()
    }

    /// Whether the stored `content_length` disagrees with the actual content.
    ///
    /// A missing `content_length` is not a mismatch. Seed rows may count
    /// UTF-16 code units rather than characters, so either count matches.
    pub fn content_length_mismatch(&self) -> bool {
        match self.content_length {
            Some(stored) => {
                stored != self.char_len() as i64
                    && stored != self.text().encode_utf16().count() as i64
            }
            None => false,
        }
    }
}

/// A flagged clause inside an analysis.
///
/// Older seed rows store clauses as bare strings; those load with the text
/// as `concern` and an empty `category`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ClauseRepr")]
pub struct ConcerningClause {
    pub category: String,
    pub concern: String,
    #[serde(rename = "originalText")]
    pub original_text: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClauseRepr {
    Text(String),
    Detailed {
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        concern: Option<String>,
        #[serde(default, rename = "originalText", alias = "original_text")]
        original_text: Option<String>,
        #[serde(default)]
        explanation: Option<String>,
    },
}

impl From<ClauseRepr> for ConcerningClause {
    fn from(repr: ClauseRepr) -> Self {
        match repr {
            ClauseRepr::Text(concern) => Self {
                concern,
                ..Self::default()
            },
            ClauseRepr::Detailed {
                category,
                concern,
                original_text,
                explanation,
            } => Self {
                category: category.unwrap_or_default(),
                concern: concern.unwrap_or_default(),
                original_text,
                explanation,
            },
        }
    }
}

/// Scores and structured findings for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub company_id: Option<String>,
    /// 0–100, higher is more transparent.
    #[serde(default, deserialize_with = "lenient_score")]
    pub transparency_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub user_friendliness_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub privacy_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub manipulation_risk_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub data_collection_risk: Option<f64>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub data_sharing_risk: Option<f64>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub account_termination_risk: Option<f64>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub legal_jurisdiction_risk: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub concerning_clauses: Vec<ConcerningClause>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub manipulation_tactics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub key_concerns: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommendations: Vec<String>,
    pub executive_summary: Option<String>,
    pub ai_model_used: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub analysis_version: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub analyzed_at: Option<DateTime<Utc>>,
}

impl AnalysisResult {
    /// Number of flagged clauses ("red flags").
    pub fn red_flag_count(&self) -> usize {
        self.concerning_clauses.len()
    }
}

/// A company with its current document and current result resolved.
///
/// The store may hold several documents or results per company; the store
/// layer picks one of each before auditing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyRecord {
    pub company: Company,
    pub document: Option<Document>,
    pub result: Option<AnalysisResult>,
}

// ── Deserialisation helpers ──

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Int(i64),
    Float(f64),
}

impl IdRepr {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
        }
    }
}

/// Row ids arrive as UUID strings or integer keys depending on the table.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_id_string(deserializer)?.unwrap_or_default())
}

fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<IdRepr>::deserialize(deserializer)?.map(IdRepr::into_string))
}

/// Scores may be stored as numbers or numeric strings; anything else is `None`.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|score: &f64| score.is_finite()))
}

/// Accepts RFC 3339 timestamps, offset-less `timestamp` columns (read as UTC)
/// and bare dates (midnight UTC). Anything else reads as missing.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(serde_json::Value::String(raw)) = Option::<serde_json::Value>::deserialize(deserializer)?
    else {
        return Ok(None);
    };
    Ok(parse_timestamp(raw.trim()))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
    {
        return Some(naive.and_utc());
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()),
        Err(_) => {
            tracing::debug!(value = raw, "unparseable timestamp read as missing");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_with_nested_rows() {
        let json = r#"{
            "id": 7,
            "name": "Acme",
            "domain": "acme.com",
            "industry": "Retail",
            "documents": [{
                "id": "doc-1",
                "company_id": 7,
                "raw_content": "Original Text: \"...\"",
                "scraped_at": "2025-06-01T12:00:00+00:00",
                "content_length": 20,
                "analysis_results": [{
                    "id": 3,
                    "document_id": "doc-1",
                    "transparency_score": 42,
                    "concerning_clauses": [
                        {"category": "Arbitration", "concern": "Forced arbitration", "originalText": "You agree..."},
                        "Unilateral changes"
                    ],
                    "analyzed_at": "2025-06-02T08:30:00.123456"
                }]
            }]
        }"#;
        let company: Company = serde_json::from_str(json).unwrap();
        assert_eq!(company.id, "7");
        assert_eq!(company.documents.len(), 1);
        let doc = &company.documents[0];
        assert_eq!(doc.company_id, "7");
        assert!(!doc.content_length_mismatch());
        let result = &doc.analysis_results[0];
        assert_eq!(result.id, "3");
        assert_eq!(result.transparency_score, Some(42.0));
        assert_eq!(result.red_flag_count(), 2);
        assert_eq!(
            result.concerning_clauses[0].original_text.as_deref(),
            Some("You agree...")
        );
        assert_eq!(result.concerning_clauses[1].concern, "Unilateral changes");
        assert!(result.analyzed_at.is_some());
    }

    #[test]
    fn null_and_missing_arrays_are_empty() {
        let json = r#"{"id": "c1", "name": "Beta", "domain": "beta.io", "documents": null}"#;
        let company: Company = serde_json::from_str(json).unwrap();
        assert!(company.documents.is_empty());
        assert!(company.analysis_results.is_empty());
    }

    #[test]
    fn string_scores_are_parsed() {
        let json = r#"{"id": 1, "transparency_score": "55", "privacy_score": "n/a"}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.transparency_score, Some(55.0));
        assert_eq!(result.privacy_score, None);
        assert!(result.concerning_clauses.is_empty());
    }

    #[test]
    fn content_length_mismatch_detected() {
        let doc = Document {
            raw_content: Some("short".into()),
            content_length: Some(5000),
            ..Document::default()
        };
        assert!(doc.content_length_mismatch());

        let unknown = Document {
            raw_content: Some("short".into()),
            ..Document::default()
        };
        assert!(!unknown.content_length_mismatch());
    }

    #[test]
    fn char_len_counts_characters() {
        let doc = Document {
            raw_content: Some("données".into()),
            ..Document::default()
        };
        assert_eq!(doc.char_len(), 7);
        assert_eq!(Document::default().char_len(), 0);
    }

    #[test]
    fn non_finite_scores_are_missing() {
        let json = r#"{"id": 1, "transparency_score": "NaN", "privacy_score": "inf", "user_friendliness_score": " -Infinity "}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.transparency_score, None);
        assert_eq!(result.privacy_score, None);
        assert_eq!(result.user_friendliness_score, None);
    }

    #[test]
    fn utf16_content_length_is_not_a_mismatch() {
        let text = format!("🚨 RED FLAG {}", "y".repeat(200));
        let utf16 = text.encode_utf16().count() as i64;
        assert_eq!(utf16, 212);
        assert_ne!(utf16, text.chars().count() as i64);

        let doc = Document {
            raw_content: Some(text.clone()),
            content_length: Some(utf16),
            ..Document::default()
        };
        assert!(!doc.content_length_mismatch());

        let by_chars = Document {
            content_length: Some(text.chars().count() as i64),
            ..doc.clone()
        };
        assert!(!by_chars.content_length_mismatch());

        let by_bytes = Document {
            content_length: Some(text.len() as i64),
            ..doc
        };
        assert!(by_bytes.content_length_mismatch());
    }

    #[test]
    fn date_only_and_garbage_timestamps() {
        let json = r#"[
            {"id": 1, "name": "Acme", "domain": "acme.com", "documents": [
                {"id": 10, "company_id": 1, "scraped_at": "2025-06-01"}
            ]},
            {"id": 2, "name": "Beta", "domain": "beta.io", "documents": [
                {"id": 20, "company_id": 2, "scraped_at": "2025-06-02T09:00:00Z",
                 "analysis_results": [{"id": 5, "analyzed_at": "last tuesday"}]}
            ]}
        ]"#;
        let companies: Vec<Company> = serde_json::from_str(json).unwrap();
        assert_eq!(companies.len(), 2);

        let midnight = "2025-06-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(companies[0].documents[0].scraped_at, Some(midnight));

        let beta = &companies[1].documents[0];
        assert!(beta.scraped_at.is_some());
        assert_eq!(beta.analysis_results[0].analyzed_at, None);
    }

    #[test]
    fn non_string_timestamps_are_missing() {
        let json = r#"{"id": 1, "scraped_at": 1717200000}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.scraped_at, None);
    }
}
