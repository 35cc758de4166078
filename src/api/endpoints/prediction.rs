//! Lab report analysis endpoint.
//!
//! `POST /api/prediction/analyze` receives one CSV or PDF report as the
//! multipart field `file` and returns the classification result.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::ClassificationResult;
use crate::pipeline::extraction::UploadedFile;

const FILE_FIELD: &str = "file";

pub async fn analyze(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<ClassificationResult>, ApiError> {
    let file = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No file uploaded".into()))?;

    tracing::debug!(bytes = file.bytes.len(), "Upload received");

    // Parsing and inference are CPU-bound; keep them off the async workers.
    let core = ctx.core.clone();
    let result = tokio::task::spawn_blocking(move || core.processor().analyze(&file))
        .await
        .map_err(|e| ApiError::Internal(format!("Analysis task failed: {e}")))??;

    Ok(Json(result))
}

/// First `file` field wins; other fields are ignored.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok(Some(UploadedFile::new(filename, bytes.to_vec())));
    }
    Ok(None)
}
