//! In-process stores: a fixed in-memory list and a JSON fixture file.
//!
//! The fixture file holds the same JSON array the hosted store returns for
//! `companies` with embedded `documents` and `analysis_results`, so a saved
//! response can be audited offline.

use std::path::PathBuf;

use async_trait::async_trait;
use tossalad_core::Company;
use tracing::info;

use crate::{RecordStore, StoreError};

/// Store backed by a list held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    companies: Vec<Company>,
}

impl MemoryStore {
    pub fn new(companies: Vec<Company>) -> Self {
        Self { companies }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all_companies(&self) -> Result<Vec<Company>, StoreError> {
        Ok(self.companies.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} companies)", self.companies.len())
    }
}

/// Store that reads a JSON array of companies from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn fetch_all_companies(&self) -> Result<Vec<Company>, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::FixtureNotFound(self.path.clone()));
        }
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;
        let companies: Vec<Company> = serde_json::from_slice(&bytes)?;
        info!(path = %self.path.display(), count = companies.len(), "loaded fixture");
        Ok(companies)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn memory_store_returns_its_rows() {
        let store = MemoryStore::new(vec![Company {
            name: "Acme".into(),
            domain: "acme.com".into(),
            ..Company::default()
        }]);
        let companies = store.fetch_all_companies().await.unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(store.describe(), "memory (1 companies)");
    }

    #[tokio::test]
    async fn file_store_reads_fixture() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": 1, "name": "Acme", "domain": "acme.com", "documents": []}},
                {{"id": 2, "name": "Beta", "domain": "beta.io", "documents": [
                    {{"id": 10, "company_id": 2, "raw_content": "placeholder"}}
                ]}}
            ]"#
        )
        .unwrap();

        let store = FileStore::new(file.path());
        let companies = store.fetch_all_companies().await.unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[1].documents[0].id, "10");
    }

    #[tokio::test]
    async fn file_store_empty_array_is_valid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        let companies = FileStore::new(file.path())
            .fetch_all_companies()
            .await
            .unwrap();
        assert!(companies.is_empty());
    }

    #[tokio::test]
    async fn file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        let err = store.fetch_all_companies().await.unwrap_err();
        assert!(matches!(err, StoreError::FixtureNotFound(_)));
    }

    #[tokio::test]
    async fn file_store_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"not": "an array"}}"#).unwrap();
        let err = FileStore::new(file.path())
            .fetch_all_companies()
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
