pub mod error;
pub mod extract;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use extract::ApiJson;
