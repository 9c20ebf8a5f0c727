use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use queue_logging::queue_debug;

/// Fixed-interval scheduler for status polling.
///
/// The caller re-submits the full target set via [`sync`](Self::sync) after
/// every queue change. A tick thread exists only while the set is non-empty:
/// each tick re-reads the current set and invokes the callback once with all
/// targets, and a tick that finds the set empty winds the thread down. The
/// timer being active is therefore a function of queue state, not a flag
/// anyone toggles by hand.
pub struct StatusPoller {
    shared: Arc<PollerShared>,
    interval: Duration,
}

struct PollerShared {
    targets: Mutex<Vec<String>>,
    ticking: AtomicBool,
    on_tick: Box<dyn Fn(&[String]) + Send + Sync>,
}

impl StatusPoller {
    pub fn new(interval: Duration, on_tick: impl Fn(&[String]) + Send + Sync + 'static) -> Self {
        Self {
            shared: Arc::new(PollerShared {
                targets: Mutex::new(Vec::new()),
                ticking: AtomicBool::new(false),
                on_tick: Box::new(on_tick),
            }),
            interval,
        }
    }

    /// Replaces the set of polled ids, starting the tick thread when the set
    /// becomes non-empty.
    pub fn sync(&self, targets: Vec<String>) {
        let non_empty = {
            let mut guard = self.shared.targets.lock().expect("poller targets");
            *guard = targets;
            !guard.is_empty()
        };
        if non_empty && !self.shared.ticking.swap(true, Ordering::SeqCst) {
            queue_debug!("status poller starting, interval {:?}", self.interval);
            let shared = self.shared.clone();
            let interval = self.interval;
            thread::spawn(move || run_ticks(shared, interval));
        }
    }

    /// Whether a tick thread is currently running.
    pub fn is_active(&self) -> bool {
        self.shared.ticking.load(Ordering::SeqCst)
    }
}

fn run_ticks(shared: Arc<PollerShared>, interval: Duration) {
    loop {
        thread::sleep(interval);
        let targets = shared.targets.lock().expect("poller targets").clone();
        if targets.is_empty() {
            shared.ticking.store(false, Ordering::SeqCst);
            // A sync() racing this shutdown may have repopulated the set after
            // the clone above while seeing `ticking` still true; reclaim the
            // flag and keep going instead of stranding those targets.
            let repopulated = !shared.targets.lock().expect("poller targets").is_empty();
            if repopulated && !shared.ticking.swap(true, Ordering::SeqCst) {
                continue;
            }
            queue_debug!("status poller idle, stopping");
            break;
        }
        (shared.on_tick)(&targets);
    }
}
