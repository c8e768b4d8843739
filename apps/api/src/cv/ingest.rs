use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extract;
use crate::models::cv::ExtractedRecord;
use crate::store::RecordStore;

#[derive(Debug)]
pub struct IngestOutcome {
    pub id: i64,
    pub details: ExtractedRecord,
}

/// Full upload pipeline: validate, keep the raw file, read its text, extract, store.
/// The raw file is only kept when the record was stored.
pub async fn ingest_upload(
    store: &dyn RecordStore,
    upload_dir: &Path,
    file_name: &str,
    data: Bytes,
) -> Result<IngestOutcome, AppError> {
    if !file_name.ends_with(".pdf") {
        return Err(AppError::Validation("Invalid file type".to_string()));
    }

    let saved = save_upload(upload_dir, file_name, &data).await?;
    info!("Saved upload {} ({} bytes)", saved.display(), data.len());

    let result = match pdf_to_text(data).await {
        Ok(text) => ingest_text(store, &text).await,
        Err(e) => Err(e),
    };
    if result.is_err() {
        discard_upload(&saved).await;
    }
    result
}

async fn discard_upload(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed rejected upload {}", path.display()),
        Err(e) => warn!("Failed to remove rejected upload {}: {e}", path.display()),
    }
}

/// Extracts a record from already-flattened document text and persists it.
/// Nothing is written when a required field is missing.
pub async fn ingest_text(store: &dyn RecordStore, text: &str) -> Result<IngestOutcome, AppError> {
    let details = extract(text).map_err(|e| {
        warn!("Extraction rejected document: {e}");
        AppError::from(e)
    })?;
    debug!(
        linkedin = details.linkedin.is_some(),
        education = details.education.is_some(),
        work_experience = details.work_experience.is_some(),
        projects = details.projects.is_some(),
        skills = details.skills.is_some(),
        "Extracted optional fields"
    );

    let id = store.create(details.clone()).await?;
    info!("Stored CV {id}");
    Ok(IngestOutcome { id, details })
}

/// Writes the upload to `upload_dir/<uuid>-<sanitised name>`.
pub async fn save_upload(upload_dir: &Path, file_name: &str, data: &[u8]) -> Result<PathBuf, AppError> {
    tokio::fs::create_dir_all(upload_dir).await?;
    let path = upload_dir.join(format!("{}-{}", Uuid::new_v4(), sanitize_file_name(file_name)));
    tokio::fs::write(&path, data).await?;
    Ok(path)
}

fn sanitize_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload.pdf");
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Text of every page, in page order.
async fn pdf_to_text(data: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            // pdf-extract panics on some malformed documents
            if e.is_panic() {
                AppError::Validation("Could not read PDF".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("PDF worker failed: {e}"))
            }
        })?
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?;
    Ok(text)
}
