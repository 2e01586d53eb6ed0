pub mod request_id;

pub use request_id::{http_span, request_id_middleware, RequestId, REQUEST_ID_HEADER};
