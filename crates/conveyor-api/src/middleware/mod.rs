pub mod request_log;

pub use request_log::{get_request_id, request_log_middleware, RequestId};
