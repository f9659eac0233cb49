//! Dashboard core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, Job, JobId, JobSeed, StatusPatch, UploadNote, DEFAULT_STATUS};
pub use update::update;
pub use view_model::{download_href, AppViewModel, JobRowView, DONE_STATUS, NAME_PLACEHOLDER};
