//! Queue of raw scan events and the single consumer that drains it.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use shelftrack_core::{normalize, ItemId, ItemPath, Normalized, Outcome};
use shelftrack_shelving::{lock_service, OpResult, SharedService};

use crate::sources::{FeedbackSink, LinePrompt};

/// One raw scanned/typed string bound for a target nested shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    pub raw: String,
    pub target: ItemPath,
}

impl ScanEvent {
    pub fn new(raw: impl Into<String>, target: ItemPath) -> Self {
        Self { raw: raw.into(), target }
    }
}

/// Producer handle; clone one per acquisition source.
#[derive(Debug, Clone)]
pub struct ScanFeed {
    tx: Sender<ScanEvent>,
}

impl ScanFeed {
    /// Submit a raw scan. Returns false when the consumer is gone.
    pub fn submit(&self, event: ScanEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Consumer end of the scan queue.
#[derive(Debug)]
pub struct ScanQueue {
    rx: Receiver<ScanEvent>,
}

/// FIFO queue between acquisition sources and the scan worker.
pub fn scan_queue() -> (ScanFeed, ScanQueue) {
    let (tx, rx) = channel();
    (ScanFeed { tx }, ScanQueue { rx })
}

/// Consumes scan events one at a time.
///
/// Each event is fully normalized first; only then is the shared service
/// locked for its load→mutate→save critical section. An abandoned
/// line-number prompt drops the event without touching the store.
pub struct ScanWorker<P, F> {
    service: SharedService,
    queue: ScanQueue,
    prompt: P,
    feedback: F,
}

impl<P: LinePrompt, F: FeedbackSink> ScanWorker<P, F> {
    pub fn new(service: SharedService, queue: ScanQueue, prompt: P, feedback: F) -> Self {
        Self { service, queue, prompt, feedback }
    }

    /// Process every event currently queued, in arrival order.
    pub fn pump(&mut self) -> Vec<OpResult<Outcome>> {
        let mut results = Vec::new();
        loop {
            match self.queue.rx.try_recv() {
                Ok(event) => {
                    if let Some(result) = self.process(event) {
                        results.push(result);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        results
    }

    /// Block on the queue until every [`ScanFeed`] is dropped.
    pub fn run(&mut self) {
        while let Ok(event) = self.queue.rx.recv() {
            if let Some(Err(err)) = self.process(event) {
                tracing::error!(error = %err, "scan processing failed");
            }
        }
    }

    /// Handle one event. `None` means the scan was abandoned at the
    /// line-number prompt.
    pub fn process(&mut self, event: ScanEvent) -> Option<OpResult<Outcome>> {
        let item = match self.resolve(&event.raw) {
            Some(item) => item,
            None => {
                tracing::info!(raw = %event.raw, "scan abandoned at line-number prompt");
                return None;
            }
        };
        let service = lock_service(&self.service);
        let result = service.locate_and_move(item, &event.target);
        if let Ok(outcome) = &result {
            self.feedback.item_located(matches!(outcome, Outcome::Moved { .. }));
        }
        Some(result)
    }

    /// Finish normalization, suspending on the prompt when needed.
    fn resolve(&mut self, raw: &str) -> Option<ItemId> {
        match normalize(raw) {
            Normalized::Complete(item) => Some(item),
            Normalized::NeedsLineNumber(pending) => {
                let line = self.prompt.request_line_number(pending.order_number())?;
                Some(pending.complete(&line))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sources::{FnPrompt, SilentFeedback};
    use shelftrack_shelving::ShelfService;
    use shelftrack_store::JsonStore;

    struct RecordingFeedback(Vec<bool>);

    impl FeedbackSink for RecordingFeedback {
        fn item_located(&mut self, found: bool) {
            self.0.push(found);
        }
    }

    fn shared_service_with_bins(dir: &tempfile::TempDir) -> SharedService {
        let svc = ShelfService::new(JsonStore::new(dir.path().join("inventory.json")));
        svc.add_location("Warehouse").unwrap();
        svc.add_shelf("Warehouse", "Rack1").unwrap();
        svc.add_nested_shelf("Warehouse", "Rack1", "BinA").unwrap();
        svc.add_nested_shelf("Warehouse", "Rack1", "BinB").unwrap();
        svc.into_shared()
    }

    fn bin(nested: &str) -> ItemPath {
        ItemPath::new("Warehouse", "Rack1", nested)
    }

    #[test]
    fn worker_drains_queued_scans_in_arrival_order() {
        let dir = tempfile::tempdir().unwrap();
        let shared = shared_service_with_bins(&dir);
        let (feed, queue) = scan_queue();
        let no_prompt = FnPrompt(|_: &str| -> Option<String> { panic!("prompt not expected") });
        let mut worker = ScanWorker::new(Arc::clone(&shared), queue, no_prompt, SilentFeedback);

        assert!(feed.submit(ScanEvent::new("1234567890-1", bin("BinA"))));
        assert!(feed.submit(ScanEvent::new("1234567890-2", bin("BinA"))));
        let results = worker.pump();
        assert_eq!(results.len(), 2);

        let doc = lock_service(&shared).snapshot().unwrap();
        assert_eq!(
            doc.items("Warehouse", "Rack1", "BinA").unwrap(),
            &[
                ItemId::from_compound("1234567890-1"),
                ItemId::from_compound("1234567890-2"),
            ]
        );
    }

    #[test]
    fn separator_free_scan_suspends_for_the_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let shared = shared_service_with_bins(&dir);
        let (feed, queue) = scan_queue();
        let prompt = FnPrompt(|order: &str| -> Option<String> {
            assert_eq!(order, "1234567890");
            Some("3".to_string())
        });
        let mut worker = ScanWorker::new(Arc::clone(&shared), queue, prompt, SilentFeedback);

        feed.submit(ScanEvent::new("12345678901299", bin("BinA")));
        worker.pump();

        let doc = lock_service(&shared).snapshot().unwrap();
        assert_eq!(
            doc.items("Warehouse", "Rack1", "BinA").unwrap(),
            &[ItemId::from_compound("1234567890-3")]
        );
    }

    #[test]
    fn abandoned_prompt_drops_the_scan_without_store_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let shared = shared_service_with_bins(&dir);
        let before = lock_service(&shared).snapshot().unwrap();
        let (feed, queue) = scan_queue();
        let abandon = FnPrompt(|_: &str| -> Option<String> { None });
        let mut worker = ScanWorker::new(Arc::clone(&shared), queue, abandon, SilentFeedback);

        feed.submit(ScanEvent::new("9999999999", bin("BinA")));
        let results = worker.pump();
        assert!(results.is_empty());
        assert_eq!(lock_service(&shared).snapshot().unwrap(), before);
    }

    #[test]
    fn feedback_reports_found_only_for_relocations() {
        let dir = tempfile::tempdir().unwrap();
        let shared = shared_service_with_bins(&dir);
        let (feed, queue) = scan_queue();
        let no_prompt = FnPrompt(|_: &str| -> Option<String> { None });
        let mut worker =
            ScanWorker::new(Arc::clone(&shared), queue, no_prompt, RecordingFeedback(Vec::new()));

        feed.submit(ScanEvent::new("1234567890-1", bin("BinA")));
        feed.submit(ScanEvent::new("1234567890-1", bin("BinB")));
        worker.pump();

        assert_eq!(worker.feedback.0, vec![false, true]);
    }
}
