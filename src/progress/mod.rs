//! Progress reporting.
//!
//! The [`Chunker`](crate::Chunker) reports bytes processed out of the source
//! length to a [`ProgressSink`] after every iteration. What the sink does with
//! it (draw a bar, log, record) is up to the caller.

use indicatif::{ProgressBar, ProgressStyle};

/// Receives progress updates from a split run.
pub trait ProgressSink {
    /// Called once before the first chunk is read.
    fn begin(&mut self, _total: u64) {}

    /// Called after every iteration with `done <= total`.
    fn update(&mut self, done: u64, total: u64);

    /// Called once after the last iteration.
    fn end(&mut self) {}
}

impl<P: ProgressSink + ?Sized> ProgressSink for &mut P {
    fn begin(&mut self, total: u64) {
        (**self).begin(total)
    }

    fn update(&mut self, done: u64, total: u64) {
        (**self).update(done, total)
    }

    fn end(&mut self) {
        (**self).end()
    }
}

/// A sink that discards all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&mut self, _done: u64, _total: u64) {}
}

/// Adapts a closure `FnMut(done, total)` into a sink.
///
/// ```
/// use imgsplit::{ProgressFn, ProgressSink};
///
/// let mut seen = Vec::new();
/// let mut sink = ProgressFn(|done: u64, _total: u64| seen.push(done));
/// sink.update(4096, 10000);
/// drop(sink);
/// assert_eq!(seen, vec![4096]);
/// ```
pub struct ProgressFn<F>(pub F);

impl<F: FnMut(u64, u64)> ProgressSink for ProgressFn<F> {
    fn update(&mut self, done: u64, total: u64) {
        (self.0)(done, total)
    }
}

impl ProgressSink for ProgressBar {
    fn begin(&mut self, total: u64) {
        self.set_length(total);
        self.set_position(0);
    }

    fn update(&mut self, done: u64, _total: u64) {
        self.set_position(done);
    }

    fn end(&mut self) {
        self.finish();
    }
}

/// Creates a byte-unit progress bar labelled `Splitting...`.
///
/// The length is set by [`ProgressSink::begin`].
pub fn progress_bar() -> ProgressBar {
    let progress_bar = ProgressBar::new(0);
    // The template is a literal; fall back to the default style if it ever
    // stops parsing.
    let style = ProgressStyle::default_bar()
        .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    progress_bar.set_style(style);
    progress_bar.set_message("Splitting...");
    progress_bar
}
