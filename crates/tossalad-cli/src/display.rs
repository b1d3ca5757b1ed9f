//! Text rendering for audit reports.
//!
//! The report is sectioned: scan lines (one per company, printed live while
//! the audit runs), status buckets with issues, summary metrics, and the
//! fixed priority action list.

use std::fmt::Write;

use tossalad_core::{AuditRecord, AuditReport, AuditStatus};

const RULE: &str = "============================================================";

// ── Public API ──

/// Report title and run timestamp.
pub fn render_header(report_time: &chrono::DateTime<chrono::Utc>) -> String {
    format!(
        "{RULE}\nToS Analysis Quality Audit\nRun at {}\n{RULE}\n\nScan\n",
        report_time.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    )
}

/// One scan line for a company.
pub fn status_line(record: &AuditRecord) -> String {
    let mut line = format!(
        "  {} {:<28} {:<20}",
        status_marker(record.status),
        record.company_name,
        record.status.as_str()
    );
    if let Some(quality) = record.content_quality {
        let _ = write!(line, " content={quality}");
    }
    if let Some(alignment) = record.score_alignment {
        let _ = write!(line, " alignment={alignment}");
    }
    if let Some(score) = record.transparency_score {
        let _ = write!(line, " score={score}");
    }
    if let Some(flags) = record.red_flag_count {
        let _ = write!(line, " red_flags={flags}");
    }
    line.truncate(line.trim_end().len());
    line
}

/// Everything after the scan lines: buckets, metrics, priority actions.
pub fn render_summary(report: &AuditReport) -> String {
    let mut out = String::new();
    render_buckets(&mut out, report);
    render_metrics(&mut out, report);
    render_actions(&mut out, report);
    out
}

// ── Sections ──

fn render_buckets(out: &mut String, report: &AuditReport) {
    for (status, records) in report.buckets.iter() {
        let _ = writeln!(out, "\n{} ({})", status.as_str(), records.len());
        if records.is_empty() {
            let _ = writeln!(out, "  (none)");
            continue;
        }
        for record in records {
            let _ = writeln!(out, "  - {} ({})", record.company_name, record.domain);
            for issue in &record.issues {
                let _ = writeln!(out, "      issue: {issue}");
            }
            for rec in &record.recommendations {
                let _ = writeln!(out, "      action: {rec}");
            }
        }
    }
}

fn render_metrics(out: &mut String, report: &AuditReport) {
    let m = &report.metrics;
    let missing = report.buckets.missing_document.len() + report.buckets.missing_analysis.len();
    let _ = writeln!(out, "\nSummary");
    let _ = writeln!(out, "  {:<24} {}", "Total companies:", m.total);
    let _ = writeln!(
        out,
        "  {:<24} {} ({}%)",
        "High quality:", m.high_quality_count, m.high_quality_percent
    );
    let _ = writeln!(
        out,
        "  {:<24} {} ({}%)",
        "Needs work:", m.needs_work_count, m.needs_work_percent
    );
    let _ = writeln!(out, "  {:<24} {}", "Missing document/analysis:", missing);
}

fn render_actions(out: &mut String, report: &AuditReport) {
    let _ = writeln!(out, "\nPriority actions");
    for (i, action) in report.priority_actions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, action);
    }
}

// ── Helpers ──

fn status_marker(status: AuditStatus) -> &'static str {
    match status {
        AuditStatus::HighQuality => "[ok]  ",
        AuditStatus::NeedsImprovement => "[warn]",
        AuditStatus::MissingAnalysis | AuditStatus::MissingDocument => "[miss]",
        AuditStatus::PoorQuality => "[fail]",
    }
}
