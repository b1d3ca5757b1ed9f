pub mod alignment;
pub mod audit;
pub mod content;
pub mod model;
pub mod report;

pub use alignment::{AlignmentCheck, ScoreAlignment};
pub use audit::{AuditRecord, AuditStatus, audit_record};
pub use content::{ContentQuality, ContentSignals};
pub use model::{AnalysisResult, Company, CompanyRecord, ConcerningClause, Document};
pub use report::{AuditMetrics, AuditReport, PRIORITY_ACTIONS, StatusBuckets};
