use crate::{DownloadId, JobStatus, Video};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub url_input: String,
    pub output_path: String,
    pub jobs: Vec<JobRowView>,
    pub videos: Vec<Video>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub id: DownloadId,
    pub url: String,
    pub status: JobStatus,
}
