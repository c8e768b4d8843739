use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cv::ingest::ingest_upload;
use crate::errors::AppError;
use crate::models::cv::{CvRecordRow, CvUpdate, ExtractedRecord};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub id: i64,
    pub details: ExtractedRecord,
}

#[derive(Serialize)]
pub struct DetailsResponse<T> {
    pub message: &'static str,
    pub details: T,
}

#[derive(Deserialize)]
pub struct DetailsQuery {
    pub email: Option<String>,
}

/// POST /api/v1/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Upload has no file name".to_string()))?;
        let data = field.bytes().await?;

        let outcome =
            ingest_upload(state.store.as_ref(), &state.config.upload_dir, &file_name, data)
                .await?;
        return Ok(Json(UploadResponse {
            message: "File processed successfully",
            id: outcome.id,
            details: outcome.details,
        }));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// GET /api/v1/details
pub async fn handle_list_details(
    State(state): State<AppState>,
    Query(params): Query<DetailsQuery>,
) -> Result<Json<DetailsResponse<Vec<CvRecordRow>>>, AppError> {
    let details = match params.email {
        Some(email) => state.store.find_by_email(&email).await?.into_iter().collect(),
        None => state.store.list().await?,
    };
    Ok(Json(DetailsResponse {
        message: "Data retrieved successfully",
        details,
    }))
}

/// GET /api/v1/details/:id
pub async fn handle_get_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DetailsResponse<CvRecordRow>>, AppError> {
    let details = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))?;
    Ok(Json(DetailsResponse {
        message: "Data retrieved successfully",
        details,
    }))
}

/// PATCH /api/v1/details/:id
pub async fn handle_update_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<CvUpdate>,
) -> Result<Json<DetailsResponse<CvRecordRow>>, AppError> {
    let update = update.normalized();
    if update.is_empty() {
        return Err(AppError::Validation(
            "Provide at least one of name, email, phone, linkedin".to_string(),
        ));
    }

    let details = state
        .store
        .update(id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))?;
    info!("Updated CV {id}");
    Ok(Json(DetailsResponse {
        message: "Data updated successfully",
        details,
    }))
}
