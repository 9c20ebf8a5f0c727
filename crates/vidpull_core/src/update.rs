use crate::{AppState, Effect, JobStatus, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlInputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::OutputPathChanged(text) => {
            state.set_output_path(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            let url = state.url_input().trim().to_string();
            if url.is_empty() {
                return (state, Vec::new());
            }
            if state.contains_url(&url) {
                // Dedup contract: one job per URL, whatever its status.
                // The input is cleared but nothing is created or requested.
                state.set_url_input(String::new());
                return (state, Vec::new());
            }
            let output_path = state.output_path().to_string();
            let id = state.push_job(url.clone());
            state.set_url_input(String::new());
            vec![Effect::StartDownload {
                id,
                url,
                output_path,
            }]
        }
        Msg::DownloadStarted { id, download_id } => {
            state.adopt_backend_id(&id, download_id);
            Vec::new()
        }
        Msg::DownloadRejected { id, message } => {
            // The job keeps its temporary id; once errored it is never polled.
            state.apply_status(&id, JobStatus::Error { message });
            Vec::new()
        }
        Msg::StatusFetched { id, status } => {
            let finished = matches!(
                status,
                JobStatus::Completed { .. } | JobStatus::Error { .. }
            );
            let was_downloading = state.apply_status(&id, status);
            if was_downloading && finished {
                // Exactly one refresh per downloading -> completed/error
                // transition; stale duplicate responses overwrite the status
                // again but no longer pass the was_downloading guard.
                vec![Effect::RefreshVideos {
                    path: state.output_path().to_string(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::RemoveClicked { id } => {
            state.remove_job(&id);
            Vec::new()
        }
        Msg::ClearCompletedClicked => {
            state.clear_completed();
            Vec::new()
        }
        Msg::RefreshVideosClicked => vec![Effect::RefreshVideos {
            path: state.output_path().to_string(),
        }],
        Msg::VideosFetched(videos) => {
            state.set_videos(videos);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
