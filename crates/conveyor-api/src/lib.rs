//! Conveyor API
//!
//! HTTP surface of the multipart upload gateway. Four endpoints orchestrate
//! an upload session against the configured storage provider (start, sign a
//! part URL, complete, abort); everything else here is transport plumbing:
//! request logging, CORS, OpenAPI docs, and error rendering.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod setup;
pub mod state;
pub mod telemetry;
