use crate::{DownloadId, JobStatus, Video};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlInputChanged(String),
    /// User edited the output-path box.
    OutputPathChanged(String),
    /// User submitted the current URL input for download.
    SubmitClicked,
    /// Backend accepted the start request and assigned a real id.
    DownloadStarted {
        id: DownloadId,
        download_id: DownloadId,
    },
    /// Backend rejected the start request, or it never reached the backend.
    DownloadRejected { id: DownloadId, message: String },
    /// A status poll for `id` came back.
    StatusFetched { id: DownloadId, status: JobStatus },
    /// User removed one job from the queue.
    RemoveClicked { id: DownloadId },
    /// User cleared all completed and errored jobs.
    ClearCompletedClicked,
    /// User asked for a fresh video listing.
    RefreshVideosClicked,
    /// A video-list fetch came back.
    VideosFetched(Vec<Video>),
    /// UI tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
