//! Dashboard client: HTTP engine for the upload and status endpoints.
mod api;
mod handle;
mod types;

pub use api::{ApiClient, ClientSettings, HttpApiClient};
pub use handle::ClientHandle;
pub use types::{ApiError, ClientEvent, JobId, StatusUpdate, UploadReceipt};
