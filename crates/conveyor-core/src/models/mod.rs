pub mod upload;

pub use upload::{
    AbortUploadResponse, CompleteUploadResponse, PartReceipt, SignPartParams, SignPartResponse,
    StartUploadParams, StartUploadResponse, UploadSessionParams,
};
