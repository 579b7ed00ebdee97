use crate::ui::output;
use indicatif::ProgressBar;

/// Per-item progress over the chunk loop.
///
/// Hidden when stdout is not a terminal so piped output and tests stay
/// clean. Warnings go through [`ChunkProgress::warn`] so they print above
/// the live bar instead of through it.
pub struct ChunkProgress {
    pb: ProgressBar,
}

impl ChunkProgress {
    pub fn new(total: usize) -> Self {
        let pb = if console::Term::stdout().is_term() {
            ProgressBar::new(total as u64).with_message("Processing chunks")
        } else {
            ProgressBar::hidden()
        };
        Self { pb }
    }

    /// One item handled (staged or skipped).
    pub fn inc(&self) {
        self.pb.inc(1);
    }

    /// Warning for one skipped item, rendered above the bar.
    pub fn warn(&self, text: &str) {
        self.pb.suspend(|| output::warn(text));
    }

    pub fn finish(&self) {
        self.pb.finish_with_message("Done");
    }
}
