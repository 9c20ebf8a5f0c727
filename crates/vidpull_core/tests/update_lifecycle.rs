use std::sync::Once;

use vidpull_core::{update, AppState, Effect, JobStatus, Msg, Video};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(queue_logging::initialize_for_tests);
}

fn submit(state: AppState, url: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlInputChanged(url.to_string()));
    update(state, Msg::SubmitClicked)
}

/// Queue with one job in each status kind, ids pending-1..pending-4.
fn mixed_queue() -> AppState {
    let (state, _) = submit(AppState::new(), "https://x/downloading");
    let (state, _) = submit(state, "https://x/completed");
    let (state, _) = submit(state, "https://x/error");
    let (state, _) = submit(state, "https://x/missing");

    let (state, _) = update(
        state,
        Msg::StatusFetched {
            id: "pending-2".to_string(),
            status: JobStatus::Completed {
                message: "done".to_string(),
            },
        },
    );
    let (state, _) = update(
        state,
        Msg::StatusFetched {
            id: "pending-3".to_string(),
            status: JobStatus::Error {
                message: "boom".to_string(),
            },
        },
    );
    let (state, _) = update(
        state,
        Msg::StatusFetched {
            id: "pending-4".to_string(),
            status: JobStatus::NotFound {
                message: "Download not found".to_string(),
            },
        },
    );
    state
}

#[test]
fn clear_completed_removes_only_terminal_completed_and_error() {
    init_logging();
    let (state, _) = update(mixed_queue(), Msg::ClearCompletedClicked);
    let view = state.view();

    let urls: Vec<_> = view.jobs.iter().map(|j| j.url.clone()).collect();
    assert_eq!(urls, vec!["https://x/downloading", "https://x/missing"]);

    // Idempotent: a second clear changes nothing.
    let (state, _) = update(state, Msg::ClearCompletedClicked);
    assert_eq!(state.view().jobs.len(), 2);
}

#[test]
fn remove_is_idempotent() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://x/v1");
    let (state, _) = update(
        state,
        Msg::RemoveClicked {
            id: "pending-1".to_string(),
        },
    );
    assert!(state.view().jobs.is_empty());

    let (state, effects) = update(
        state,
        Msg::RemoveClicked {
            id: "pending-1".to_string(),
        },
    );
    assert!(state.view().jobs.is_empty());
    assert!(effects.is_empty());
}

#[test]
fn removal_is_allowed_from_any_status() {
    init_logging();
    let state = mixed_queue();
    let (state, _) = update(
        state,
        Msg::RemoveClicked {
            id: "pending-4".to_string(),
        },
    );
    assert_eq!(state.view().jobs.len(), 3);
}

#[test]
fn downloading_ids_tracks_the_active_set() {
    init_logging();
    let state = mixed_queue();
    assert_eq!(state.downloading_ids(), vec!["pending-1"]);

    let (state, _) = update(
        state,
        Msg::StatusFetched {
            id: "pending-1".to_string(),
            status: JobStatus::Completed {
                message: "done".to_string(),
            },
        },
    );
    assert!(state.downloading_ids().is_empty());
}

#[test]
fn refresh_click_emits_effect_with_current_path() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::OutputPathChanged("./media".to_string()),
    );
    let (state, effects) = update(state, Msg::RefreshVideosClicked);

    assert_eq!(
        effects,
        vec![Effect::RefreshVideos {
            path: "./media".to_string(),
        }]
    );
    assert_eq!(state.view().jobs.len(), 0);
}

#[test]
fn videos_fetched_replaces_the_listing() {
    init_logging();
    let listing = vec![
        Video {
            filename: "a.mp4".to_string(),
            size: 1_048_576,
            size_mb: 1.0,
        },
        Video {
            filename: "b.mp4".to_string(),
            size: 2_097_152,
            size_mb: 2.0,
        },
    ];
    let (mut state, effects) = update(AppState::new(), Msg::VideosFetched(listing.clone()));

    assert!(effects.is_empty());
    assert_eq!(state.view().videos, listing);
    assert!(state.consume_dirty());

    let (state, _) = update(state, Msg::VideosFetched(Vec::new()));
    assert!(state.view().videos.is_empty());
}
