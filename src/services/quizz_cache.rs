use std::sync::Arc;

use futures::Stream;
use tokio::sync::{broadcast, RwLock};

use crate::models::domain::Quizz;

/// An immutable published collection. Mutations clone it, patch the copy and
/// publish the copy; a snapshot held by an in-flight operation never changes.
pub type QuizzList = Arc<Vec<Quizz>>;

/// Result of patching one entry of the current collection.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOutcome {
    Applied(QuizzList),
    /// The target id was absent; nothing was published.
    Missing(QuizzList),
    /// Nothing has been published yet.
    Unset,
}

impl PatchOutcome {
    /// The collection as it stands after the patch attempt.
    pub fn into_list(self) -> QuizzList {
        match self {
            PatchOutcome::Applied(list) | PatchOutcome::Missing(list) => list,
            PatchOutcome::Unset => Arc::new(Vec::new()),
        }
    }
}

/// Single-owner holder of the latest collection, fanned out to subscribers.
pub struct QuizzCache {
    current: RwLock<Option<QuizzList>>,
    notifier: broadcast::Sender<QuizzList>,
}

impl QuizzCache {
    pub fn new(capacity: usize) -> Self {
        let (notifier, _) = broadcast::channel(capacity);
        Self {
            current: RwLock::new(None),
            notifier,
        }
    }

    pub async fn snapshot(&self) -> Option<QuizzList> {
        self.current.read().await.clone()
    }

    /// Replaces the collection and notifies every subscriber.
    pub async fn publish(&self, quizzs: Vec<Quizz>) -> QuizzList {
        let list: QuizzList = Arc::new(quizzs);
        let mut current = self.current.write().await;
        *current = Some(list.clone());
        // the send happens under the write lock so subscribe() never misses
        // or duplicates a publication
        let receivers = self.notifier.send(list.clone()).unwrap_or(0);
        log::debug!(
            "Published {} quizzs to {} subscriber(s)",
            list.len(),
            receivers
        );
        list
    }

    /// Applies `patch` to the entry with `id` in the collection current at
    /// call time, then publishes the patched copy.
    pub async fn patch<F>(&self, id: &str, patch: F) -> PatchOutcome
    where
        F: FnOnce(&mut Quizz),
    {
        let mut current = self.current.write().await;
        let Some(list) = current.as_ref() else {
            return PatchOutcome::Unset;
        };

        let Some(index) = list.iter().position(|q| q.id == id) else {
            return PatchOutcome::Missing(list.clone());
        };

        let mut next: Vec<Quizz> = list.as_ref().clone();
        patch(&mut next[index]);
        let next: QuizzList = Arc::new(next);

        *current = Some(next.clone());
        let _ = self.notifier.send(next.clone());
        PatchOutcome::Applied(next)
    }

    pub async fn subscribe(&self) -> QuizzSubscription {
        let current = self.current.read().await;
        QuizzSubscription {
            pending: current.clone(),
            receiver: self.notifier.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier.receiver_count()
    }
}

/// Receives the current collection first (when one is set), then every later
/// publication in order. Dropping it unsubscribes.
pub struct QuizzSubscription {
    pending: Option<QuizzList>,
    receiver: broadcast::Receiver<QuizzList>,
}

impl QuizzSubscription {
    /// Waits for the next publication. `None` once the cache is gone.
    pub async fn next(&mut self) -> Option<QuizzList> {
        if let Some(list) = self.pending.take() {
            return Some(list);
        }
        loop {
            match self.receiver.recv().await {
                Ok(list) => return Some(list),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("Quizz subscriber lagged, skipped {} publication(s)", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Returns a publication that is already waiting, without blocking.
    pub fn try_next(&mut self) -> Option<QuizzList> {
        if let Some(list) = self.pending.take() {
            return Some(list);
        }
        loop {
            match self.receiver.try_recv() {
                Ok(list) => return Some(list),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    log::warn!("Quizz subscriber lagged, skipped {} publication(s)", skipped);
                }
                Err(_) => return None,
            }
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = QuizzList> + Send {
        futures::stream::unfold(self, |mut subscription| async move {
            subscription.next().await.map(|list| (list, subscription))
        })
    }
}
