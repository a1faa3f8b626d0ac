pub mod auth;
pub mod chat;
pub mod error;
pub mod history;
pub mod profile;
pub mod response;
pub mod state;
pub mod themes;

pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;
