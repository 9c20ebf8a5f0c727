use crate::DownloadId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue a start-download request to the backend for a freshly queued job.
    StartDownload {
        id: DownloadId,
        url: String,
        output_path: String,
    },
    /// Re-fetch the listing of files already on disk. Fire-and-forget; the
    /// result comes back as `Msg::VideosFetched` and never touches the queue.
    RefreshVideos { path: String },
}
