//! Store accessor boundary and the fetch policy applied around it.

use std::time::Duration;

use async_trait::async_trait;
use tossalad_core::Company;
use tracing::{info, warn};

use crate::StoreError;

/// Source of company rows with their documents and results embedded.
///
/// An empty list is a valid answer. Any transport, auth, or shape failure
/// is an error and aborts the audit.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every company with nested `documents` and `analysis_results`.
    async fn fetch_all_companies(&self) -> Result<Vec<Company>, StoreError>;

    /// Short human label for logs, e.g. a URL or file path.
    fn describe(&self) -> String;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    async fn fetch_all_companies(&self) -> Result<Vec<Company>, StoreError> {
        (**self).fetch_all_companies().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Bounded retry and per-attempt timeout for the bulk fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    pub attempts: u32,
    pub timeout: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            attempts: 2,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Run the bulk fetch under `policy`. Returns the last error once every
/// attempt has failed. Zero attempts is treated as one.
pub async fn fetch_with_policy<S: RecordStore + ?Sized>(
    store: &S,
    policy: FetchPolicy,
) -> Result<Vec<Company>, StoreError> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        let outcome = match tokio::time::timeout(policy.timeout, store.fetch_all_companies()).await
        {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(policy.timeout)),
        };
        match outcome {
            Ok(companies) => {
                info!(
                    store = %store.describe(),
                    count = companies.len(),
                    attempt,
                    "fetched companies"
                );
                return Ok(companies);
            }
            Err(e) if attempt < attempts => {
                warn!(store = %store.describe(), attempt, error = %e, "fetch failed, retrying");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `failures` calls, then returns one company.
    struct FlakyStore {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyStore {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl RecordStore for FlakyStore {
        async fn fetch_all_companies(&self) -> Result<Vec<Company>, StoreError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                return Err(StoreError::Fetch(format!("connection reset ({n})").into()));
            }
            Ok(vec![Company {
                name: "Acme".into(),
                domain: "acme.com".into(),
                ..Company::default()
            }])
        }

        fn describe(&self) -> String {
            "flaky".into()
        }
    }

    struct StalledStore;

    #[async_trait]
    impl RecordStore for StalledStore {
        async fn fetch_all_companies(&self) -> Result<Vec<Company>, StoreError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }

        fn describe(&self) -> String {
            "stalled".into()
        }
    }

    #[test]
    fn default_policy() {
        let policy = FetchPolicy::default();
        assert_eq!(policy.attempts, 2);
        assert_eq!(policy.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn succeeds_first_try() {
        let store = FlakyStore::new(0);
        let companies = fetch_with_policy(&store, FetchPolicy::default())
            .await
            .unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_once() {
        let store = FlakyStore::new(1);
        let companies = fetch_with_policy(&store, FetchPolicy::default())
            .await
            .unwrap();
        assert_eq!(companies[0].name, "Acme");
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_attempts() {
        let store = FlakyStore::new(5);
        let err = fetch_with_policy(&store, FetchPolicy::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Fetch(ref e) if e.to_string().contains("(1)")));
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let store = FlakyStore::new(0);
        let policy = FetchPolicy {
            attempts: 0,
            ..FetchPolicy::default()
        };
        assert!(fetch_with_policy(&store, policy).await.is_ok());
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out() {
        let policy = FetchPolicy {
            attempts: 2,
            timeout: Duration::from_millis(50),
        };
        let err = fetch_with_policy(&StalledStore, policy).await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(d) if d == Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn boxed_store_delegates() {
        let store: Box<dyn RecordStore> = Box::new(FlakyStore::new(0));
        assert_eq!(store.describe(), "flaky");
        assert_eq!(store.fetch_all_companies().await.unwrap().len(), 1);
    }
}
