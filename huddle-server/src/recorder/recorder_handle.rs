use crate::error::RecorderError;
use crate::recorder::session_record::SessionRecord;
use crate::recorder::session_recorder::SessionRecorder;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Non-blocking front of a `SessionRecorder`.
///
/// Records go through a bounded queue drained by a background task. When
/// the queue is full the record is dropped: analytics may lose data,
/// signaling may not stall.
#[derive(Clone)]
pub struct RecorderHandle {
    tx: mpsc::Sender<SessionRecord>,
}

impl RecorderHandle {
    pub fn spawn(recorder: Arc<dyn SessionRecorder>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let task = tokio::spawn(drain(recorder, rx));
        (Self { tx }, task)
    }

    /// Queue a record without waiting. Failures are logged here and also
    /// returned for callers that care; the hub ignores them.
    pub fn dispatch(&self, record: SessionRecord) -> Result<(), RecorderError> {
        match self.tx.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(record)) => {
                warn!(
                    "Session recorder queue full, dropping {:?} for {}",
                    record.kind, record.connection_id
                );
                Err(RecorderError::QueueFull)
            }
            Err(TrySendError::Closed(record)) => {
                warn!(
                    "Session recorder is gone, dropping {:?} for {}",
                    record.kind, record.connection_id
                );
                Err(RecorderError::Closed)
            }
        }
    }
}

async fn drain(recorder: Arc<dyn SessionRecorder>, mut rx: mpsc::Receiver<SessionRecord>) {
    info!("Session recorder started");

    while let Some(record) = rx.recv().await {
        let kind = record.kind;
        match recorder.record(record).await {
            Ok(()) => debug!("Recorded {:?}", kind),
            Err(e) => error!("Failed to record {:?}: {}", kind, e),
        }
    }

    info!("Session recorder stopped");
}
