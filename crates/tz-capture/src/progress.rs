//! Monotonic OCR progress.
//!
//! Engines report whatever they like; the sink clamps to 100 and drops any
//! value below the last one published, so subscribers only ever see a
//! non-decreasing sequence.

use tokio::sync::watch;

/// Create a sink and the receiver that observes it. Both start at 0.
pub fn progress_channel() -> (ProgressSink, watch::Receiver<u8>) {
    let (tx, rx) = watch::channel(0);
    (ProgressSink { tx }, rx)
}

/// Write side of a recognition progress channel.
#[derive(Debug)]
pub struct ProgressSink {
    tx: watch::Sender<u8>,
}

impl ProgressSink {
    /// Publish a percentage. Values above 100 are clamped; values not above
    /// the current one are ignored.
    pub fn report(&self, percent: u32) {
        let percent = percent.min(100) as u8;
        self.tx.send_if_modified(|current| {
            if percent > *current {
                *current = percent;
                true
            } else {
                false
            }
        });
    }

    /// Last published value.
    pub fn current(&self) -> u8 {
        *self.tx.borrow()
    }
}
