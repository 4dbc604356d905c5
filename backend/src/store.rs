//! The process-wide dataset store.
//!
//! One slot per dataset type, held in a `CsvData` snapshot behind an
//! `Arc<RwLock>`. Handlers read under the shared lock and commit under the
//! exclusive one; the validation core itself never sees the lock.

use common::model::datasource::CsvData;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared state injected into every handler as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    data: Arc<RwLock<CsvData>>,
    /// Per-file cap applied by the upload handler.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(max_upload_bytes: usize) -> Self {
        Self {
            data: Arc::default(),
            max_upload_bytes,
        }
    }

    /// Starts from an existing snapshot instead of an empty store.
    pub fn with_data(data: CsvData, max_upload_bytes: usize) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
            max_upload_bytes,
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, CsvData> {
        self.data.read().await
    }

    /// Holding the returned guard across read, reconcile and write keeps
    /// concurrent updates from interleaving.
    pub async fn write(&self) -> RwLockWriteGuard<'_, CsvData> {
        self.data.write().await
    }

    /// A copy of the current snapshot.
    pub async fn snapshot(&self) -> CsvData {
        self.data.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::model::csv::ClassificationRow;
    use common::model::datasource::Dataset;

    #[actix_web::test]
    async fn clones_share_one_store() {
        let state = AppState::new(1024);
        let handle = state.clone();

        handle.write().await.classifications = Some(Dataset::new(
            vec![ClassificationRow::new("AI", "ML", "Tech", "safe")],
            "labels.csv",
            Utc::now(),
        ));

        assert!(state.read().await.has_classifications());
        assert!(!state.snapshot().await.has_strings());
    }
}
