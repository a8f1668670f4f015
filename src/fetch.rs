use crate::app::AppEvent;
use crate::error::Result;
use crate::http::ApiClient;
use crate::request::RequestDescriptor;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Result of one dispatch, tagged with its issuance sequence.
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub result: Result<Value>,
}

/// Owns the single outstanding network operation. Every dispatch gets a
/// monotonically increasing sequence number; a result is rendered only if its
/// sequence is still the latest when it arrives. Cancellation is cooperative:
/// superseded requests run to completion and their results are dropped.
pub struct Dispatcher {
    client: Arc<ApiClient>,
    events: UnboundedSender<AppEvent>,
    next_seq: u64,
    active_seq: Option<u64>,
}

impl Dispatcher {
    pub fn new(client: Arc<ApiClient>, events: UnboundedSender<AppEvent>) -> Self {
        Dispatcher {
            client,
            events,
            next_seq: 0,
            active_seq: None,
        }
    }

    /// Issues the request on its own task and returns its sequence. The newest
    /// dispatch supersedes any still-pending one.
    pub fn dispatch(&mut self, descriptor: RequestDescriptor) -> u64 {
        let seq = self.begin();
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = client.get(&descriptor).await;
            // A closed receiver just means the app is shutting down.
            let _ = events.send(AppEvent::Fetch(FetchOutcome { seq, result }));
        });
        seq
    }

    /// Allocates the next sequence and marks it as the active dispatch.
    pub fn begin(&mut self) -> u64 {
        self.next_seq += 1;
        self.active_seq = Some(self.next_seq);
        self.next_seq
    }

    /// Whether a result with this sequence may reach the renderer. True only
    /// for the latest issued dispatch; acceptance also retires it, which is
    /// what clears the busy state.
    pub fn accept(&mut self, seq: u64) -> bool {
        if self.active_seq == Some(seq) {
            self.active_seq = None;
            true
        } else {
            debug!(seq, active = ?self.active_seq, "discarding superseded fetch result");
            false
        }
    }

    /// True while the latest dispatch is still outstanding.
    pub fn busy(&self) -> bool {
        self.active_seq.is_some()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::profile::ApiConfig;
    use tokio::sync::mpsc;

    fn dispatcher() -> Dispatcher {
        let config = ApiConfig::resolve(None, None).unwrap();
        let client = Arc::new(ApiClient::new(&config).unwrap());
        let (tx, _rx) = mpsc::unbounded_channel();
        Dispatcher::new(client, tx)
    }

    #[test]
    fn sequences_increase_monotonically() {
        let mut dispatcher = dispatcher();
        let first = dispatcher.begin();
        let second = dispatcher.begin();
        assert!(second > first);
    }

    #[test]
    fn only_the_latest_dispatch_is_accepted() {
        let mut dispatcher = dispatcher();
        let slow = dispatcher.begin();
        let fast = dispatcher.begin();

        // The superseded result lands first and must be discarded.
        assert!(!dispatcher.accept(slow));
        assert!(dispatcher.busy());

        assert!(dispatcher.accept(fast));
        assert!(!dispatcher.busy());
    }

    #[test]
    fn late_result_after_acceptance_is_discarded() {
        let mut dispatcher = dispatcher();
        let slow = dispatcher.begin();
        let fast = dispatcher.begin();

        assert!(dispatcher.accept(fast));
        // The slow request finally completes; nothing is active anymore.
        assert!(!dispatcher.accept(slow));
        assert!(!dispatcher.busy());
    }

    #[test]
    fn same_selection_twice_still_supersedes_the_first() {
        let mut dispatcher = dispatcher();
        let first = dispatcher.begin();
        let second = dispatcher.begin();
        assert_ne!(first, second);
        assert!(!dispatcher.accept(first));
        assert!(dispatcher.accept(second));
    }

    #[test]
    fn busy_tracks_the_active_dispatch_only() {
        let mut dispatcher = dispatcher();
        assert!(!dispatcher.busy());
        let seq = dispatcher.begin();
        assert!(dispatcher.busy());
        dispatcher.accept(seq);
        assert!(!dispatcher.busy());
    }
}
