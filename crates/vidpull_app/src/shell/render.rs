//! Plain-text rendering of the queue and video listing.

use vidpull_core::{AppViewModel, JobStatus};

pub fn print_help() {
    println!("commands:");
    println!("  add <url>     queue a download");
    println!("  path <dir>    set the output directory (default ./vids)");
    println!("  rm <id>       remove one job from the queue");
    println!("  clear         drop completed and errored jobs");
    println!("  videos        refresh the downloaded-video listing");
    println!("  ls            show the current queue and listing");
    println!("  quit          exit");
}

pub fn render(view: &AppViewModel) {
    println!();
    if view.jobs.is_empty() {
        println!("queue: empty");
    } else {
        println!("queue:");
        for job in &view.jobs {
            println!("  [{}] {}  {}", job.id, job.url, status_line(&job.status));
        }
    }

    if view.videos.is_empty() {
        println!("videos ({}): none yet", view.output_path);
    } else {
        println!("videos ({}):", view.output_path);
        for video in &view.videos {
            println!("  {}  {:.2} mb", video.filename, video.size_mb);
        }
    }
}

fn status_line(status: &JobStatus) -> String {
    match status {
        JobStatus::Downloading { progress, message } => {
            format!("downloading {progress:>3}% | {message}")
        }
        JobStatus::Completed { message } => format!("completed | {message}"),
        JobStatus::Error { message } => format!("error | {message}"),
        JobStatus::NotFound { message } => format!("not found | {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::status_line;
    use vidpull_core::JobStatus;

    #[test]
    fn status_lines_show_progress_only_while_downloading() {
        assert_eq!(
            status_line(&JobStatus::Downloading {
                progress: 42,
                message: "42%".to_string(),
            }),
            "downloading  42% | 42%"
        );
        assert_eq!(
            status_line(&JobStatus::Completed {
                message: "done".to_string(),
            }),
            "completed | done"
        );
    }
}
