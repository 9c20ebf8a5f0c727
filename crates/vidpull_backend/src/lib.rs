//! Vidpull backend: HTTP client for the download worker and the
//! command/event runtime that drives it off the UI thread.
mod client;
mod poller;
mod runtime;
mod types;

pub use client::{BackendApi, BackendSettings, HttpBackend};
pub use poller::StatusPoller;
pub use runtime::{BackendEvent, BackendHandle};
pub use types::{ApiError, StatusKind, StatusPayload, VideoEntry};
