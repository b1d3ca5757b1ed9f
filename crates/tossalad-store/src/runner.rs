//! Audit run: one bulk fetch, then per-company classification in memory.

use chrono::{DateTime, Utc};
use tossalad_core::{AuditRecord, AuditReport, audit_record};
use tracing::info;

use crate::accessor::{FetchPolicy, RecordStore, fetch_with_policy};
use crate::{StoreError, select};

/// Runs the quality audit against an injected store.
pub struct Auditor<S> {
    store: S,
    policy: FetchPolicy,
}

impl<S: RecordStore> Auditor<S> {
    pub fn new(store: S) -> Self {
        Self::with_policy(store, FetchPolicy::default())
    }

    pub fn with_policy(store: S, policy: FetchPolicy) -> Self {
        Self { store, policy }
    }

    /// Run the full audit and return the report.
    pub async fn run(&self) -> Result<AuditReport, StoreError> {
        self.run_with(|_| {}).await
    }

    /// Run the full audit, calling `observer` with each record as it is
    /// produced. A fetch failure aborts before any record is observed.
    pub async fn run_with<F>(&self, observer: F) -> Result<AuditReport, StoreError>
    where
        F: FnMut(&AuditRecord),
    {
        self.run_at(Utc::now(), observer).await
    }

    /// Same as [`Auditor::run_with`], with the report stamped `generated_at`
    /// so callers can print the run time before the first record.
    pub async fn run_at<F>(
        &self,
        generated_at: DateTime<Utc>,
        mut observer: F,
    ) -> Result<AuditReport, StoreError>
    where
        F: FnMut(&AuditRecord),
    {
        info!(store = %self.store.describe(), "starting analysis quality audit");
        let companies = fetch_with_policy(&self.store, self.policy).await?;

        let mut records = Vec::with_capacity(companies.len());
        for company in companies {
            let record = audit_record(&select::resolve(company));
            observer(&record);
            records.push(record);
        }

        let report = AuditReport::build(records, generated_at);
        info!(
            total = report.metrics.total,
            high_quality = report.metrics.high_quality_count,
            needs_work = report.metrics.needs_work_count,
            "audit complete"
        );
        Ok(report)
    }
}
