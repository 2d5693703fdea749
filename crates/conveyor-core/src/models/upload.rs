use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for starting a multipart upload session
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StartUploadParams {
    /// Full path of the target object inside the configured bucket
    #[validate(length(min = 1, message = "fileName must not be empty"))]
    pub file_name: String,
}

/// Query parameters for signing one part of an upload session
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SignPartParams {
    /// Full path of the target object inside the configured bucket
    #[validate(length(min = 1, message = "fileName must not be empty"))]
    pub file_name: String,
    /// Identifier of the upload session, as returned by start
    #[validate(length(min = 1, message = "uploadId must not be empty"))]
    pub upload_id: String,
    /// 1-based part number
    #[validate(range(min = 1, message = "partNumber must be a positive integer"))]
    pub part_number: i32,
}

/// Query parameters identifying an existing upload session
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UploadSessionParams {
    /// Full path of the target object inside the configured bucket
    #[validate(length(min = 1, message = "fileName must not be empty"))]
    pub file_name: String,
    /// Identifier of the upload session, as returned by start
    #[validate(length(min = 1, message = "uploadId must not be empty"))]
    pub upload_id: String,
}

/// One uploaded part, as acknowledged by the storage provider.
///
/// Clients collect the `ETag` response header from each part upload and send
/// the full list back when completing the session. Coverage and contiguity
/// are validated by the provider, not here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PartReceipt {
    /// 1-based part number
    #[validate(range(min = 1, message = "partNumber must be a positive integer"))]
    pub part_number: i32,
    /// Checksum token returned by the provider for the uploaded part
    #[validate(length(min = 1, message = "eTag must not be empty"))]
    pub e_tag: String,
}

/// Response containing the provider-assigned upload session identifier
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartUploadResponse {
    pub upload_id: String,
}

/// Response containing a time-limited signed URL for one part
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignPartResponse {
    pub part_number: i32,
    /// Presigned URL the client PUTs the raw part bytes to
    pub url: String,
    /// URL expiration time
    pub expires_at: DateTime<Utc>,
}

/// Response after the provider has stitched all parts into the final object
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteUploadResponse {
    /// Resource location of the completed object, as reported by the provider
    pub location: String,
}

/// Fixed acknowledgment returned after a successful abort
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AbortUploadResponse {
    pub status: String,
}

impl AbortUploadResponse {
    pub fn ok() -> Self {
        AbortUploadResponse {
            status: "OK".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The wire contract uses camelCase names: partNumber / eTag.
    #[test]
    fn test_part_receipt_wire_shape() {
        let receipt: PartReceipt =
            serde_json::from_str(r#"{"partNumber": 2, "eTag": "\"abc123\""}"#).expect("deserialize");
        assert_eq!(receipt.part_number, 2);
        assert_eq!(receipt.e_tag, "\"abc123\"");

        let json = serde_json::to_value(&receipt).expect("serialize");
        assert!(json.get("partNumber").is_some());
        assert!(json.get("eTag").is_some());
    }

    #[test]
    fn test_part_receipt_rejects_non_positive_part_number() {
        let receipt = PartReceipt {
            part_number: 0,
            e_tag: "etag".to_string(),
        };
        assert!(receipt.validate().is_err());

        let receipt = PartReceipt {
            part_number: 1,
            e_tag: String::new(),
        };
        assert!(receipt.validate().is_err());
    }

    #[test]
    fn test_sign_part_params_validation() {
        let params = SignPartParams {
            file_name: "images/a.png".to_string(),
            upload_id: "u-1".to_string(),
            part_number: -3,
        };
        assert!(params.validate().is_err());

        let params = SignPartParams {
            file_name: "images/a.png".to_string(),
            upload_id: "u-1".to_string(),
            part_number: 1,
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_abort_acknowledgment_is_fixed() {
        let json = serde_json::to_value(AbortUploadResponse::ok()).expect("serialize");
        assert_eq!(json, serde_json::json!({"status": "OK"}));
    }
}
