//! Upload session orchestration handlers.
//!
//! Each handler translates one HTTP request into a single call against the
//! storage provider and adapts the response into the service's own contract.
//! Requests are fully stateless: the `(fileName, uploadId)` pair supplied by
//! the caller is forwarded verbatim, and the provider alone decides whether
//! it is valid.

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson, ValidatedQuery};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use conveyor_core::models::{
    AbortUploadResponse, CompleteUploadResponse, PartReceipt, SignPartParams, SignPartResponse,
    StartUploadParams, StartUploadResponse, UploadSessionParams,
};
use conveyor_core::AppError;
use conveyor_storage::StorageError;
use std::sync::Arc;
use validator::Validate;

/// Map a storage failure to an AppError whose message names the operation
/// and the session it was issued for.
fn op_error(
    operation: &str,
    key: &str,
    upload_id: Option<&str>,
    err: StorageError,
) -> HttpAppError {
    let session = match upload_id {
        Some(id) => format!("{} (upload {})", key, id),
        None => key.to_string(),
    };
    let app = match err {
        StorageError::Signing(msg) => {
            AppError::Signing(format!("{} failed for {}: {}", operation, session, msg))
        }
        StorageError::ConfigError(msg) => AppError::Internal(msg),
        other => AppError::Upstream(format!("{} failed for {}: {}", operation, session, other)),
    };
    HttpAppError(app)
}

/// Start a multipart upload session
#[utoipa::path(
    get,
    path = "/uploads/start",
    tag = "uploads",
    params(StartUploadParams),
    responses(
        (status = 200, description = "Upload session started", body = StartUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 502, description = "Storage provider rejected the request", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, params),
    fields(file_name = %params.file_name, operation = "start_upload")
)]
pub async fn start_upload(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<StartUploadParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let upload_id = state
        .store
        .create_upload(&params.file_name)
        .await
        .map_err(|e| op_error("start upload", &params.file_name, None, e))?;

    tracing::info!(
        file_name = %params.file_name,
        upload_id = %upload_id,
        "Multipart upload session started"
    );

    Ok(Json(StartUploadResponse { upload_id }))
}

/// Sign an upload URL for one part of an existing session
#[utoipa::path(
    get,
    path = "/uploads/sign/part",
    tag = "uploads",
    params(SignPartParams),
    responses(
        (status = 200, description = "Signed part URL generated", body = SignPartResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Signing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, params),
    fields(
        file_name = %params.file_name,
        upload_id = %params.upload_id,
        part_number = params.part_number,
        operation = "sign_part"
    )
)]
pub async fn sign_part(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<SignPartParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    let ttl = state.config.part_url_ttl();
    let url = state
        .store
        .sign_part(&params.file_name, &params.upload_id, params.part_number, ttl)
        .await
        .map_err(|e| {
            op_error(
                "sign part",
                &params.file_name,
                Some(&params.upload_id),
                e,
            )
        })?;

    let expires_at = Utc::now()
        + chrono::Duration::from_std(ttl)
            .map_err(|e| HttpAppError(AppError::Internal(e.to_string())))?;

    tracing::info!(
        upload_id = %params.upload_id,
        part_number = params.part_number,
        "Signed upload URL for part"
    );

    Ok(Json(SignPartResponse {
        part_number: params.part_number,
        url,
        expires_at,
    }))
}

/// Complete a multipart upload session once every part has been uploaded
#[utoipa::path(
    post,
    path = "/uploads/complete",
    tag = "uploads",
    params(UploadSessionParams),
    request_body = Vec<PartReceipt>,
    responses(
        (status = 200, description = "Upload completed", body = CompleteUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 502, description = "Storage provider rejected the completion", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, params, parts),
    fields(
        file_name = %params.file_name,
        upload_id = %params.upload_id,
        operation = "complete_upload"
    )
)]
pub async fn complete_upload(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<UploadSessionParams>,
    ValidatedJson(parts): ValidatedJson<Vec<PartReceipt>>,
) -> Result<impl IntoResponse, HttpAppError> {
    // Shape of each receipt is checked at the boundary; coverage and
    // contiguity stay with the provider.
    for part in &parts {
        part.validate()
            .map_err(|e| HttpAppError(AppError::from(e)))?;
    }

    let location = state
        .store
        .complete_upload(&params.file_name, &params.upload_id, &parts)
        .await
        .map_err(|e| {
            op_error(
                "complete upload",
                &params.file_name,
                Some(&params.upload_id),
                e,
            )
        })?;

    tracing::info!(
        upload_id = %params.upload_id,
        parts = parts.len(),
        location = %location,
        "Multipart upload completed"
    );

    Ok(Json(CompleteUploadResponse { location }))
}

/// Abort a multipart upload session and release provider-side resources
#[utoipa::path(
    post,
    path = "/uploads/abort",
    tag = "uploads",
    params(UploadSessionParams),
    responses(
        (status = 200, description = "Upload aborted", body = AbortUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 502, description = "Storage provider rejected the abort", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, params),
    fields(
        file_name = %params.file_name,
        upload_id = %params.upload_id,
        operation = "abort_upload"
    )
)]
pub async fn abort_upload(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<UploadSessionParams>,
) -> Result<impl IntoResponse, HttpAppError> {
    state
        .store
        .abort_upload(&params.file_name, &params.upload_id)
        .await
        .map_err(|e| {
            op_error(
                "abort upload",
                &params.file_name,
                Some(&params.upload_id),
                e,
            )
        })?;

    tracing::info!(
        upload_id = %params.upload_id,
        "Multipart upload aborted"
    );

    Ok(Json(AbortUploadResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use conveyor_core::ErrorMetadata;

    #[test]
    fn test_op_error_names_operation_and_session() {
        let HttpAppError(app) = op_error(
            "complete upload",
            "images/a.png",
            Some("u-42"),
            StorageError::Upstream("missing parts".to_string()),
        );
        assert_eq!(app.error_code(), "UPSTREAM_ERROR");
        let message = app.client_message();
        assert!(message.contains("complete upload"));
        assert!(message.contains("images/a.png"));
        assert!(message.contains("u-42"));
    }

    #[test]
    fn test_op_error_keeps_signing_failures_local() {
        let HttpAppError(app) = op_error(
            "sign part",
            "images/a.png",
            Some("u-42"),
            StorageError::Signing("no credentials".to_string()),
        );
        assert_eq!(app.error_code(), "SIGNING_ERROR");
        assert_eq!(app.http_status_code(), 500);
    }
}
