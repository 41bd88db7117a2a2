pub mod convert;
pub mod serializer;
pub mod types;

pub use convert::{IntoResponse, DEFAULT_STATUS};
pub use serializer::{json_body_string, serialize_envelope, serialize_json_response, Envelope};
pub use types::{Response, ResponseBody};
