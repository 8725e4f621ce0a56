//! Fire-and-forget persistence of page snapshots.
//!
//! The store hands whole-page snapshots to a [`PersistHandle`]; a background
//! task writes them to the [`ConfigSink`] in submission order. There is no
//! retry and no acknowledgement: the outcome of each write is only reported
//! as a [`SiteEvent`].

use std::sync::Arc;

use pardaz_api::{PageId, Section, SiteEvent};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::sink::ConfigSink;

/// One page snapshot waiting to be written.
#[derive(Debug, Clone)]
pub struct PersistJob {
    pub page: PageId,
    pub version: u64,
    pub sections: Vec<Section>,
}

/// Sending half of the persist queue.
#[derive(Debug, Clone)]
pub struct PersistHandle {
    tx: mpsc::UnboundedSender<PersistJob>,
}

impl PersistHandle {
    /// A handle paired with its raw receiver, for callers that drain the
    /// queue themselves.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PersistJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a snapshot. Returns `false` if the worker is gone.
    pub fn submit(&self, job: PersistJob) -> bool {
        self.tx.send(job).is_ok()
    }
}

/// Spawn the worker on the current tokio runtime.
///
/// The worker exits once every [`PersistHandle`] is dropped and the queue
/// is drained.
pub fn spawn(
    sink: Arc<dyn ConfigSink>,
    events: broadcast::Sender<SiteEvent>,
) -> (PersistHandle, JoinHandle<()>) {
    let (handle, rx) = PersistHandle::channel();
    let worker = tokio::spawn(run(sink, rx, events));
    (handle, worker)
}

async fn run(
    sink: Arc<dyn ConfigSink>,
    mut rx: mpsc::UnboundedReceiver<PersistJob>,
    events: broadcast::Sender<SiteEvent>,
) {
    while let Some(job) = rx.recv().await {
        let PersistJob {
            page,
            version,
            sections,
        } = job;

        let sink = Arc::clone(&sink);
        let result = tokio::task::spawn_blocking(move || sink.save(page, &sections)).await;

        let event = match result {
            Ok(Ok(())) => {
                tracing::debug!(%page, version, "layout persisted");
                SiteEvent::Persisted { page, version }
            }
            Ok(Err(e)) => {
                tracing::warn!(%page, version, "failed to persist layout: {}", e);
                SiteEvent::PersistFailed {
                    page,
                    version,
                    error: e.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(%page, version, "persist task aborted: {}", e);
                SiteEvent::PersistFailed {
                    page,
                    version,
                    error: e.to_string(),
                }
            }
        };

        // No subscribers is fine.
        let _ = events.send(event);
    }

    tracing::debug!("persist queue closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use pardaz_api::ComponentTag;

    fn job(page: PageId, version: u64, id: &str) -> PersistJob {
        PersistJob {
            page,
            version,
            sections: vec![Section::new(id, ComponentTag::ContentBlock, "Block")],
        }
    }

    #[tokio::test]
    async fn test_worker_writes_in_order_and_reports() {
        let sink = Arc::new(MemorySink::new());
        let (events, mut rx) = broadcast::channel(16);
        let (handle, worker) = spawn(sink.clone(), events);

        assert!(handle.submit(job(PageId::Blog, 1, "first")));
        assert!(handle.submit(job(PageId::Blog, 2, "second")));
        drop(handle);
        worker.await.unwrap();

        assert_eq!(sink.stored(PageId::Blog).unwrap()[0].id.as_str(), "second");
        assert_eq!(
            rx.try_recv().unwrap(),
            SiteEvent::Persisted {
                page: PageId::Blog,
                version: 1
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            SiteEvent::Persisted {
                page: PageId::Blog,
                version: 2
            }
        );
    }

    #[tokio::test]
    async fn test_worker_reports_failures() {
        let sink = Arc::new(MemorySink::new());
        sink.set_failing(true);
        let (events, mut rx) = broadcast::channel(16);
        let (handle, worker) = spawn(sink.clone(), events);

        handle.submit(job(PageId::Home, 7, "x"));
        drop(handle);
        worker.await.unwrap();

        match rx.try_recv().unwrap() {
            SiteEvent::PersistFailed { page, version, .. } => {
                assert_eq!(page, PageId::Home);
                assert_eq!(version, 7);
            }
            other => panic!("expected PersistFailed, got {:?}", other),
        }
        assert!(sink.stored(PageId::Home).is_none());
    }

    #[test]
    fn test_submit_after_receiver_dropped() {
        let (handle, rx) = PersistHandle::channel();
        drop(rx);
        assert!(!handle.submit(job(PageId::Blog, 1, "x")));
    }
}
