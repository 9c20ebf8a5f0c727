use crate::view_model::{AppViewModel, JobRowView};

/// Identifier for one download job. Temporary (`pending-<n>`) until the
/// backend acknowledges the start request, then replaced in place by the
/// backend-assigned id.
pub type DownloadId = String;

/// Output directory sent with start requests when the user has not set one.
pub const DEFAULT_OUTPUT_PATH: &str = "./vids";

/// Current state of one job as reported by the backend (or synthesized
/// locally at submission time).
///
/// `Downloading` is the only active kind; the other three are terminal and
/// never polled again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Downloading { progress: u8, message: String },
    Completed { message: String },
    Error { message: String },
    NotFound { message: String },
}

impl JobStatus {
    /// Initial status of a freshly submitted job.
    pub fn queued() -> Self {
        JobStatus::Downloading {
            progress: 0,
            message: "queued...".to_string(),
        }
    }

    pub fn is_downloading(&self) -> bool {
        matches!(self, JobStatus::Downloading { .. })
    }

    /// Human-readable description, shown regardless of kind.
    pub fn message(&self) -> &str {
        match self {
            JobStatus::Downloading { message, .. }
            | JobStatus::Completed { message }
            | JobStatus::Error { message }
            | JobStatus::NotFound { message } => message,
        }
    }
}

/// One submitted download request tracked client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub(crate) id: DownloadId,
    pub(crate) url: String,
    pub(crate) status: JobStatus,
}

/// Read-only projection of a file already on disk, owned by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub filename: String,
    pub size: u64,
    pub size_mb: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    url_input: String,
    output_path: String,
    jobs: Vec<Job>,
    videos: Vec<Video>,
    next_local_id: u64,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            url_input: String::new(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            jobs: Vec::new(),
            videos: Vec::new(),
            next_local_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            url_input: self.url_input.clone(),
            output_path: self.output_path.clone(),
            jobs: self
                .jobs
                .iter()
                .map(|job| JobRowView {
                    id: job.id.clone(),
                    url: job.url.clone(),
                    status: job.status.clone(),
                })
                .collect(),
            videos: self.videos.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Ids of every job currently downloading, in queue order. This is the
    /// poll target set; the poll timer runs iff it is non-empty.
    pub fn downloading_ids(&self) -> Vec<DownloadId> {
        self.jobs
            .iter()
            .filter(|job| job.status.is_downloading())
            .map(|job| job.id.clone())
            .collect()
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn set_output_path(&mut self, text: String) {
        if self.output_path != text {
            self.output_path = text;
            self.dirty = true;
        }
    }

    pub(crate) fn contains_url(&self, url: &str) -> bool {
        self.jobs.iter().any(|job| job.url == url)
    }

    /// Appends a queued job for `url` and returns its temporary id.
    pub(crate) fn push_job(&mut self, url: String) -> DownloadId {
        let id = format!("pending-{}", self.next_local_id);
        self.next_local_id += 1;
        self.jobs.push(Job {
            id: id.clone(),
            url,
            status: JobStatus::queued(),
        });
        self.dirty = true;
        id
    }

    /// Swaps a job's temporary id for the backend-assigned one, keeping its
    /// queue position. No-op when the job was removed in the meantime.
    pub(crate) fn adopt_backend_id(&mut self, temp_id: &str, backend_id: DownloadId) {
        if let Some(job) = self.jobs.iter_mut().find(|job| job.id == temp_id) {
            job.id = backend_id;
            self.dirty = true;
        }
    }

    /// Overwrites the status of the job matching `id`. Returns whether the
    /// job existed and was still downloading before the overwrite (the
    /// caller uses this to fire the video-list refresh exactly once per
    /// terminal transition). Missing job means a poll response outlived a
    /// removal; last write wins, lost updates are fine.
    pub(crate) fn apply_status(&mut self, id: &str, status: JobStatus) -> bool {
        match self.jobs.iter_mut().find(|job| job.id == id) {
            Some(job) => {
                let was_downloading = job.status.is_downloading();
                job.status = status;
                self.dirty = true;
                was_downloading
            }
            None => false,
        }
    }

    /// Deletes the job with `id`. Idempotent.
    pub(crate) fn remove_job(&mut self, id: &str) {
        let before = self.jobs.len();
        self.jobs.retain(|job| job.id != id);
        if self.jobs.len() != before {
            self.dirty = true;
        }
    }

    /// Deletes every `Completed` and `Error` job; `Downloading` and
    /// `NotFound` jobs are kept. Idempotent.
    pub(crate) fn clear_completed(&mut self) {
        let before = self.jobs.len();
        self.jobs.retain(|job| {
            !matches!(
                job.status,
                JobStatus::Completed { .. } | JobStatus::Error { .. }
            )
        });
        if self.jobs.len() != before {
            self.dirty = true;
        }
    }

    pub(crate) fn set_videos(&mut self, videos: Vec<Video>) {
        self.videos = videos;
        self.dirty = true;
    }
}
