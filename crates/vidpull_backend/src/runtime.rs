use std::sync::{mpsc, Arc};
use std::thread;

use crate::client::BackendApi;
use crate::types::{ApiError, StatusPayload, VideoEntry};

enum BackendCommand {
    StartDownload {
        job_id: String,
        url: String,
        output_path: String,
    },
    FetchStatus {
        id: String,
    },
    ListVideos {
        path: String,
    },
}

/// Completion of one backend round-trip. `job_id` / `id` echo the command so
/// the shell can route the result back to the right queue entry.
#[derive(Debug)]
pub enum BackendEvent {
    StartFinished {
        job_id: String,
        result: Result<String, ApiError>,
    },
    StatusFetched {
        id: String,
        result: Result<StatusPayload, ApiError>,
    },
    VideosListed {
        result: Result<Vec<VideoEntry>, ApiError>,
    },
}

/// Command side of the backend runtime. A dedicated thread owns a tokio
/// runtime; every command is spawned as its own task, so a slow status
/// fetch for one job never delays the others. Cloning shares the command
/// channel only; events go to the single receiver returned by `spawn`.
#[derive(Clone)]
pub struct BackendHandle {
    cmd_tx: mpsc::Sender<BackendCommand>,
}

impl BackendHandle {
    pub fn spawn(api: Arc<dyn BackendApi>) -> (Self, mpsc::Receiver<BackendEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel::<BackendCommand>();
        let (event_tx, event_rx) = mpsc::channel::<BackendEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn start_download(
        &self,
        job_id: impl Into<String>,
        url: impl Into<String>,
        output_path: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(BackendCommand::StartDownload {
            job_id: job_id.into(),
            url: url.into(),
            output_path: output_path.into(),
        });
    }

    pub fn fetch_status(&self, id: impl Into<String>) {
        let _ = self.cmd_tx.send(BackendCommand::FetchStatus { id: id.into() });
    }

    pub fn list_videos(&self, path: impl Into<String>) {
        let _ = self.cmd_tx.send(BackendCommand::ListVideos { path: path.into() });
    }
}

async fn handle_command(
    api: &dyn BackendApi,
    command: BackendCommand,
    event_tx: mpsc::Sender<BackendEvent>,
) {
    match command {
        BackendCommand::StartDownload {
            job_id,
            url,
            output_path,
        } => {
            let result = api.start_download(&url, &output_path).await;
            let _ = event_tx.send(BackendEvent::StartFinished { job_id, result });
        }
        BackendCommand::FetchStatus { id } => {
            let result = api.fetch_status(&id).await;
            let _ = event_tx.send(BackendEvent::StatusFetched { id, result });
        }
        BackendCommand::ListVideos { path } => {
            let result = api.list_videos(&path).await;
            let _ = event_tx.send(BackendEvent::VideosListed { result });
        }
    }
}
