//! Vidpull core: pure download-queue state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, DownloadId, Job, JobStatus, Video, DEFAULT_OUTPUT_PATH};
pub use update::update;
pub use view_model::{AppViewModel, JobRowView};
