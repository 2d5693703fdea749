//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use conveyor_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Conveyor Upload Gateway",
        version = "0.1.0",
        description = "Backend facade for multipart uploads to object storage: start an upload session, fetch time-limited signed URLs for individual parts, then complete or abort the session. Part bytes go directly to the storage provider via the signed URLs; this service never sees them."
    ),
    paths(
        handlers::uploads::start_upload,
        handlers::uploads::sign_part,
        handlers::uploads::complete_upload,
        handlers::uploads::abort_upload,
        handlers::health::liveness_check,
    ),
    components(schemas(
        models::upload::PartReceipt,
        models::upload::StartUploadResponse,
        models::upload::SignPartResponse,
        models::upload::CompleteUploadResponse,
        models::upload::AbortUploadResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Multipart upload session orchestration"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
