use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::cv::{CvRecordRow, CvUpdate, ExtractedRecord};
use crate::store::RecordStore;

/// Process-local store. Records are lost on restart.
#[derive(Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: Vec<CvRecordRow>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create(&self, record: ExtractedRecord) -> Result<i64, AppError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        inner
            .rows
            .push(CvRecordRow::from_extracted(id, record, Utc::now()));
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<CvRecordRow>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<CvRecordRow>, AppError> {
        Ok(self.inner.read().await.rows.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CvRecordRow>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.iter().find(|r| r.email == email).cloned())
    }

    async fn update(&self, id: i64, update: &CvUpdate) -> Result<Option<CvRecordRow>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        update.apply_to(row);
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }
}
