//! Record store — persists extracted CV records.
//!
//! `AppState` holds an `Arc<dyn RecordStore>`; the backend is chosen at startup
//! from config (`PgRecordStore` when `DATABASE_URL` is set, otherwise
//! `InMemoryRecordStore`).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::cv::{CvRecordRow, CvUpdate, ExtractedRecord};

pub use memory::InMemoryRecordStore;
pub use postgres::PgRecordStore;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a freshly extracted record and returns its store-generated id.
    async fn create(&self, record: ExtractedRecord) -> Result<i64, AppError>;

    async fn get(&self, id: i64) -> Result<Option<CvRecordRow>, AppError>;

    /// All records, oldest first.
    async fn list(&self) -> Result<Vec<CvRecordRow>, AppError>;

    /// Oldest record carrying `email`, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<CvRecordRow>, AppError>;

    /// Overwrites the provided fields. `None` if no record has this id.
    async fn update(&self, id: i64, update: &CvUpdate) -> Result<Option<CvRecordRow>, AppError>;
}
