use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use queue_logging::queue_info;
use vidpull_backend::{ApiError, BackendSettings};
use vidpull_core::{update, AppState, Msg};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::render;

/// Environment variable overriding the backend API root.
const API_BASE_ENV: &str = "VIDPULL_API_BASE";

/// One unit of work for the dispatch loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    Core(Msg),
    Render,
    Quit,
}

pub fn run_app() -> Result<(), ApiError> {
    logging::initialize(LogDestination::File);

    let mut settings = BackendSettings::default();
    if let Ok(base) = std::env::var(API_BASE_ENV) {
        settings.base_url = base;
    }
    queue_info!("vidpull shell starting, backend {}", settings.base_url);

    let (event_tx, event_rx) = mpsc::channel::<ShellEvent>();
    let runner = EffectRunner::new(settings, event_tx.clone())?;
    spawn_stdin_reader(event_tx.clone());

    // The original front fetches the listing once on startup.
    let _ = event_tx.send(ShellEvent::Core(Msg::RefreshVideosClicked));
    render::print_help();

    let mut state = AppState::new();
    while let Ok(event) = event_rx.recv() {
        match event {
            ShellEvent::Quit => break,
            ShellEvent::Render => render::render(&state.view()),
            ShellEvent::Core(msg) => {
                let (next, effects) = update(state, msg);
                state = next;
                runner.run(effects);
                runner.sync_poller(state.downloading_ids());
                if state.consume_dirty() {
                    render::render(&state.view());
                }
            }
        }
    }

    queue_info!("vidpull shell exiting");
    Ok(())
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<ShellEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Some(events) => {
                    let quit = events.contains(&ShellEvent::Quit);
                    for event in events {
                        if event_tx.send(event).is_err() {
                            return;
                        }
                    }
                    if quit {
                        return;
                    }
                }
                None => render::print_help(),
            }
        }
        // stdin closed; wind the app down.
        let _ = event_tx.send(ShellEvent::Quit);
    });
}

/// Maps one input line to shell events. `None` means "show usage".
fn parse_line(line: &str) -> Option<Vec<ShellEvent>> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (line, ""),
    };

    match (command, rest) {
        ("", "") => Some(Vec::new()),
        ("add", url) if !url.is_empty() => Some(vec![
            ShellEvent::Core(Msg::UrlInputChanged(url.to_string())),
            ShellEvent::Core(Msg::SubmitClicked),
        ]),
        ("path", dir) if !dir.is_empty() => Some(vec![ShellEvent::Core(Msg::OutputPathChanged(
            dir.to_string(),
        ))]),
        ("rm", id) if !id.is_empty() => Some(vec![ShellEvent::Core(Msg::RemoveClicked {
            id: id.to_string(),
        })]),
        ("clear", "") => Some(vec![ShellEvent::Core(Msg::ClearCompletedClicked)]),
        ("videos", "") => Some(vec![ShellEvent::Core(Msg::RefreshVideosClicked)]),
        ("ls", "") => Some(vec![ShellEvent::Render]),
        ("quit", "") | ("exit", "") => Some(vec![ShellEvent::Quit]),
        _ => None,
    }
}
