//! Background fetch execution.
//!
//! The UI thread never awaits the network. [`Worker::dispatch`] runs a
//! [`FetchTicket`] on the tokio runtime and posts a [`FetchOutcome`] back on an
//! unbounded channel; the UI thread drains that channel between frames.

use std::sync::Arc;

use pustaka_client::{Book, BookSource, FetchError};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tokio::task::JoinHandle;

use crate::controller::{Controller, FetchTicket};

/// Completion message for one fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<Vec<Book>, FetchError>,
}

/// Runs fetches off the UI thread.
pub struct Worker {
    source: Arc<dyn BookSource>,
    runtime: Handle,
    tx: UnboundedSender<FetchOutcome>,
}

impl Worker {
    /// Create a worker and the receiving end of its outcome channel.
    pub fn new(source: Arc<dyn BookSource>, runtime: Handle) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { source, runtime, tx }, rx)
    }

    /// Start a fetch. Earlier fetches keep running; their outcomes are
    /// filtered by generation when applied.
    pub fn dispatch(&self, ticket: FetchTicket) -> JoinHandle<()> {
        let source = self.source.clone();
        let tx = self.tx.clone();

        self.runtime.spawn(async move {
            let FetchTicket { generation, query } = ticket;
            let result = source.search(&query).await;
            if tx.send(FetchOutcome { generation, result }).is_err() {
                tracing::debug!(generation, "outcome receiver closed");
            }
        })
    }
}

/// Feed every outcome that is already waiting into the controller.
///
/// Returns `true` if any outcome changed the screen.
pub fn apply_ready(rx: &mut UnboundedReceiver<FetchOutcome>, controller: &mut Controller) -> bool {
    let mut changed = false;
    loop {
        match rx.try_recv() {
            Ok(outcome) => changed |= controller.complete(outcome.generation, outcome.result),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use pustaka_client::SearchQuery;

    use crate::controller::tests::{Recorder, Switch, book};

    /// Answers each term after a per-term delay.
    struct DelayedSource;

    #[async_trait::async_trait]
    impl BookSource for DelayedSource {
        async fn search(&self, query: &SearchQuery) -> Result<Vec<Book>, FetchError> {
            match query.term() {
                "slow" => {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    Ok(vec![book("Slow", "https://x/slow")])
                }
                "fast" => Ok(vec![book("Fast", "https://x/fast")]),
                "broken" => Err(FetchError::Parse("expected value".into())),
                _ => Ok(vec![]),
            }
        }
    }

    fn setup() -> (Controller, Worker, UnboundedReceiver<FetchOutcome>) {
        let controller = Controller::new(Switch::online(), Arc::new(Recorder::default()));
        let (worker, rx) = Worker::new(Arc::new(DelayedSource), Handle::current());
        (controller, worker, rx)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_dispatch_posts_outcome() {
        let (mut controller, worker, mut rx) = setup();

        let ticket = controller.search("fast").unwrap();
        worker.dispatch(ticket).await.unwrap();

        assert!(apply_ready(&mut rx, &mut controller));
        assert_eq!(controller.results(), [book("Fast", "https://x/fast")].as_slice());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_superseded_fetch_finishing_last_is_ignored() {
        let (mut controller, worker, mut rx) = setup();

        let slow = worker.dispatch(controller.search("slow").unwrap());
        let fast = worker.dispatch(controller.search("fast").unwrap());

        fast.await.unwrap();
        assert!(apply_ready(&mut rx, &mut controller));
        assert_eq!(controller.results()[0].title(), "Fast");

        slow.await.unwrap();
        assert!(!apply_ready(&mut rx, &mut controller));
        assert_eq!(controller.results(), [book("Fast", "https://x/fast")].as_slice());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_superseded_fetch_finishing_first_is_ignored() {
        let (mut controller, worker, mut rx) = setup();

        let fast = worker.dispatch(controller.search("fast").unwrap());
        let slow = worker.dispatch(controller.search("slow").unwrap());

        fast.await.unwrap();
        assert!(!apply_ready(&mut rx, &mut controller));
        assert!(controller.is_busy());

        slow.await.unwrap();
        assert!(apply_ready(&mut rx, &mut controller));
        assert_eq!(controller.results()[0].title(), "Slow");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_fetch_shows_empty_state() {
        let (mut controller, worker, mut rx) = setup();

        worker.dispatch(controller.search("broken").unwrap()).await.unwrap();
        apply_ready(&mut rx, &mut controller);

        assert!(controller.results().is_empty());
        assert_eq!(controller.view().notice, Some("No books found"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_apply_ready_with_nothing_waiting() {
        let (mut controller, _worker, mut rx) = setup();
        assert!(!apply_ready(&mut rx, &mut controller));
    }
}
