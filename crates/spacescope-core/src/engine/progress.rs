/// Scan event stream -- messages pushed by an engine while a deep scan runs
/// and the subscription handle that receives them.
use crate::model::Entry;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::path::PathBuf;

/// Maximum number of scan events that may queue up before the engine blocks.
///
/// The UI drains the subscription once per frame. Progress is emitted on a
/// fixed heartbeat, so this leaves minutes of headroom.
pub const SCAN_CHANNEL_CAPACITY: usize = 4_096;

/// A periodic progress snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanProgress {
    /// Most recently visited path.
    pub current_path: PathBuf,
    pub files_scanned: u64,
    /// 0.0 to 100.0.
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    Progress(ScanProgress),
    /// Terminal. Carries the authoritative result set for the scanned root.
    Complete(Vec<Entry>),
}

/// Producer side handed to `Engine::start_scan`.
///
/// Once the matching `ScanSubscription` is released every send fails, which
/// is the engine's cue to stop reporting.
pub type ScanSink = Sender<ScanEvent>;

/// Receiving end of one scan session's event stream.
///
/// Owned by exactly one `ScanSession`; dropping or releasing it detaches
/// the session from the engine.
#[derive(Debug)]
pub struct ScanSubscription {
    session: u64,
    rx: Receiver<ScanEvent>,
}

impl ScanSubscription {
    /// Open a fresh channel for `session`.
    pub fn open(session: u64) -> (ScanSink, Self) {
        let (tx, rx) = crossbeam_channel::bounded(SCAN_CHANNEL_CAPACITY);
        (tx, Self { session, rx })
    }

    #[inline]
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Non-blocking receive. `Disconnected` means the engine went away
    /// without completing.
    pub fn try_recv(&self) -> Result<ScanEvent, TryRecvError> {
        self.rx.try_recv()
    }

    /// Blocking receive with a deadline.
    #[cfg(test)]
    pub(crate) fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<ScanEvent, crossbeam_channel::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Tear down the subscription. Consumes the handle so it cannot run twice.
    pub fn release(self) {
        tracing::debug!(session = self.session, "scan subscription released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_recv_reports_events_then_empty() {
        let (tx, sub) = ScanSubscription::open(7);
        assert_eq!(sub.session(), 7);
        tx.send(ScanEvent::Complete(Vec::new())).unwrap();
        assert_eq!(sub.try_recv(), Ok(ScanEvent::Complete(Vec::new())));
        assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));
        drop(tx);
        assert_eq!(sub.try_recv(), Err(TryRecvError::Disconnected));
    }

    #[test]
    fn test_release_disconnects_sink() {
        let (tx, sub) = ScanSubscription::open(1);
        sub.release();
        assert!(tx.send(ScanEvent::Complete(Vec::new())).is_err());
    }
}
