use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use queue_logging::{queue_info, queue_warn};
use vidpull_backend::{
    ApiError, BackendEvent, BackendHandle, BackendSettings, HttpBackend, StatusKind,
    StatusPayload, StatusPoller, VideoEntry,
};
use vidpull_core::{DownloadId, Effect, JobStatus, Msg, Video};

use super::app::ShellEvent;

/// How often active jobs are polled for status.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Shown for a submission that never reached the backend.
const CONNECTION_ERROR_MESSAGE: &str = "connection error";

/// Bridges core effects to the backend runtime and backend events back to
/// core messages.
pub struct EffectRunner {
    backend: BackendHandle,
    poller: StatusPoller,
}

impl EffectRunner {
    pub fn new(
        settings: BackendSettings,
        event_tx: mpsc::Sender<ShellEvent>,
    ) -> Result<Self, ApiError> {
        let api = HttpBackend::new(settings)?;
        let (backend, backend_events) = BackendHandle::spawn(std::sync::Arc::new(api));

        let poll_commands = backend.clone();
        let poller = StatusPoller::new(POLL_INTERVAL, move |ids| {
            // One independent fetch per active job; each runs as its own
            // task on the backend runtime.
            for id in ids {
                poll_commands.fetch_status(id.clone());
            }
        });

        spawn_event_loop(backend_events, event_tx);
        Ok(Self { backend, poller })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartDownload {
                    id,
                    url,
                    output_path,
                } => {
                    queue_info!("start download job={} url={}", id, url);
                    self.backend.start_download(id, url, output_path);
                }
                Effect::RefreshVideos { path } => {
                    self.backend.list_videos(path);
                }
            }
        }
    }

    /// Hands the poller the current downloading set; the poll timer exists
    /// exactly while this set is non-empty.
    pub fn sync_poller(&self, ids: Vec<DownloadId>) {
        self.poller.sync(ids);
    }
}

fn spawn_event_loop(
    backend_events: mpsc::Receiver<BackendEvent>,
    event_tx: mpsc::Sender<ShellEvent>,
) {
    thread::spawn(move || {
        while let Ok(event) = backend_events.recv() {
            let msg = match event {
                BackendEvent::StartFinished { job_id, result } => match result {
                    Ok(download_id) => Some(Msg::DownloadStarted {
                        id: job_id,
                        download_id,
                    }),
                    Err(err) => {
                        queue_warn!("start request for job {} failed: {}", job_id, err);
                        Some(Msg::DownloadRejected {
                            id: job_id,
                            message: submit_failure_message(&err),
                        })
                    }
                },
                BackendEvent::StatusFetched { id, result } => match result {
                    Ok(payload) => Some(Msg::StatusFetched {
                        id,
                        status: map_status(payload),
                    }),
                    Err(err) => {
                        // Tolerated: the job keeps its status and the next
                        // tick retries.
                        queue_warn!("status poll for {} failed: {}", id, err);
                        None
                    }
                },
                BackendEvent::VideosListed { result } => match result {
                    Ok(entries) => Some(Msg::VideosFetched(
                        entries.into_iter().map(map_video).collect(),
                    )),
                    Err(err) => {
                        queue_warn!("video listing failed: {}", err);
                        None
                    }
                },
            };
            if let Some(msg) = msg {
                if event_tx.send(ShellEvent::Core(msg)).is_err() {
                    break;
                }
            }
        }
    });
}

/// A failed submission must always surface a reason: the backend's own
/// message when it answered, a generic one when it was unreachable.
fn submit_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Rejected(message) => message.clone(),
        _ => CONNECTION_ERROR_MESSAGE.to_string(),
    }
}

fn map_status(payload: StatusPayload) -> JobStatus {
    let StatusPayload {
        status,
        progress,
        message,
    } = payload;
    match status {
        StatusKind::Downloading => JobStatus::Downloading {
            progress: progress.clamp(0.0, 100.0).round() as u8,
            message,
        },
        StatusKind::Completed => JobStatus::Completed { message },
        StatusKind::Error => JobStatus::Error { message },
        StatusKind::NotFound => JobStatus::NotFound { message },
    }
}

fn map_video(entry: VideoEntry) -> Video {
    Video {
        filename: entry.filename,
        size: entry.size,
        size_mb: entry.size_mb,
    }
}
