//! Current-row selection for companies with several documents or results.
//!
//! The schema allows many documents per company and many results per
//! document, but the audit looks at one of each. The rule is:
//!
//! - document: latest `scraped_at`, then greatest id
//! - result: restricted to rows pointing at the chosen document when any
//!   do, then latest `analyzed_at`, then greatest id
//!
//! Missing timestamps sort before any timestamp. Ids compare numerically
//! when both parse as integers, otherwise as strings.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tossalad_core::{AnalysisResult, Company, CompanyRecord, Document};

/// The document the audit should look at.
pub fn current_document(company: &Company) -> Option<&Document> {
    company
        .documents
        .iter()
        .max_by(|a, b| newest_first(a.scraped_at, &a.id, b.scraped_at, &b.id))
}

/// The analysis result the audit should look at.
///
/// Candidates are results embedded under the company and under any of its
/// documents.
pub fn current_result<'a>(
    company: &'a Company,
    document: Option<&Document>,
) -> Option<&'a AnalysisResult> {
    let candidates: Vec<&AnalysisResult> = company
        .analysis_results
        .iter()
        .chain(company.documents.iter().flat_map(|d| d.analysis_results.iter()))
        .collect();

    let for_document: Vec<&AnalysisResult> = match document {
        Some(doc) => candidates
            .iter()
            .copied()
            .filter(|r| r.document_id.as_deref() == Some(doc.id.as_str()))
            .collect(),
        None => Vec::new(),
    };
    let pool = if for_document.is_empty() {
        candidates
    } else {
        for_document
    };

    pool.into_iter()
        .max_by(|a, b| newest_first(a.analyzed_at, &a.id, b.analyzed_at, &b.id))
}

/// Resolve a company into the 1:1 record the auditor consumes.
pub fn resolve(company: Company) -> CompanyRecord {
    let document = current_document(&company).cloned();
    let result = current_result(&company, document.as_ref()).cloned();
    CompanyRecord {
        company,
        document,
        result,
    }
}

fn newest_first(
    a_ts: Option<DateTime<Utc>>,
    a_id: &str,
    b_ts: Option<DateTime<Utc>>,
    b_id: &str,
) -> Ordering {
    a_ts.cmp(&b_ts).then_with(|| compare_ids(a_id, b_id))
}

fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}
