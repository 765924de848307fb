// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for analysis runs
// reference: uses indicatif for progress bars and tracks per-item outcomes

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub items_processed: usize,
    pub items_failed: usize,
    pub matches_found: usize,
    pub duration_secs: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.items_processed + self.items_failed;
        if total == 0 {
            return 0.0;
        }
        (self.items_processed as f64 / total as f64) * 100.0
    }
}

/// Streams per-item progress to the console while a run is in flight:
/// a position bar plus a detail line with running match/failure counts.
pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    items_processed: Arc<AtomicUsize>,
    items_failed: Arc<AtomicUsize>,
    matches_found: Arc<AtomicUsize>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_items: usize) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_items as u64);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            items_processed: Arc::new(AtomicUsize::new(0)),
            items_failed: Arc::new(AtomicUsize::new(0)),
            matches_found: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_item_processed(&self) {
        self.items_processed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_item_failed(&self) {
        self.items_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_matches(&self, count: usize) {
        self.matches_found.fetch_add(count, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Analysis complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> RunStats {
        let duration = self.start_time.elapsed().as_secs();

        RunStats {
            items_processed: self.items_processed.load(Ordering::SeqCst),
            items_failed: self.items_failed.load(Ordering::SeqCst),
            matches_found: self.matches_found.load(Ordering::SeqCst),
            duration_secs: duration,
        }
    }

    fn update_detail_bar(&self) {
        let matches = self.matches_found.load(Ordering::SeqCst);
        let failed = self.items_failed.load(Ordering::SeqCst);

        let message = format!("Matches: {} | Failed: {}", matches, failed);

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            )
            .expect("Failed to create progress bar template")
            .progress_chars("█▓▒░"),
    );
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}
