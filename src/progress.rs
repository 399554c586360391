// src/progress.rs
/// Lightweight progress reporting used by long-running operations (paging/details).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one listing's details were extracted.
    fn item_done(&mut self, _job_id: &str) {}

    /// Called when one listing could not be fetched; the run goes on.
    fn item_failed(&mut self, _job_id: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Prints one status line per item to stderr.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    failed: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, job_id: &str) {
        self.done += 1;
        eprintln!("Fetched job {} ({}/{})", job_id, self.done + self.failed, self.total);
    }
    fn item_failed(&mut self, job_id: &str, reason: &str) {
        self.failed += 1;
        eprintln!("Failed job {} ({}/{}): {}", job_id, self.done + self.failed, self.total, reason);
    }
    fn finish(&mut self) {
        if self.total == 0 {
            eprintln!("Fetch complete");
        } else {
            eprintln!("Fetch complete ({} ok, {} failed, {} total)", self.done, self.failed, self.total);
        }
    }
}
