//! The event outbox: a FIFO queue of events per participant.
//!
//! Queues are keyed by [`ParticipantToken`] rather than by participant
//! code alone, since participant codes are only unique within a session.

use std::collections::HashMap;

use liars_protocol::{Event, ParticipantToken};
use tokio::sync::Mutex;

use crate::StoreError;

/// Per-participant event queues.
///
/// Order is guaranteed within one participant's queue (insertion order),
/// never across participants.
pub trait EventOutbox: Send + Sync + 'static {
    /// Appends `event` to the participant's queue.
    fn publish(
        &self,
        participant: &ParticipantToken,
        event: Event,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Appends every event in `batch` to its participant's queue.
    ///
    /// All or nothing: on error no queue has changed. Events for the same
    /// participant keep their order within the batch.
    fn publish_all(
        &self,
        batch: Vec<(ParticipantToken, Event)>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Returns the participant's whole queue, oldest first, and empties it.
    fn drain(
        &self,
        participant: &ParticipantToken,
    ) -> impl std::future::Future<Output = Result<Vec<Event>, StoreError>> + Send;

    /// Empties the participant's queue without returning it.
    fn clear(
        &self,
        participant: &ParticipantToken,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

// ---------------------------------------------------------------------------
// MemoryOutbox
// ---------------------------------------------------------------------------

/// An in-process [`EventOutbox`].
///
/// A single mutex guards every queue, which makes `drain` atomic: a
/// publish either lands before the drain (and is returned) or after it
/// (and waits for the next one).
#[derive(Default)]
pub struct MemoryOutbox {
    queues: Mutex<HashMap<ParticipantToken, Vec<Event>>>,
}

impl MemoryOutbox {
    /// Creates an outbox with no queued events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events waiting for a participant, without draining.
    pub async fn pending(&self, participant: &ParticipantToken) -> usize {
        self.queues
            .lock()
            .await
            .get(participant)
            .map_or(0, Vec::len)
    }
}

impl EventOutbox for MemoryOutbox {
    async fn publish(
        &self,
        participant: &ParticipantToken,
        event: Event,
    ) -> Result<(), StoreError> {
        self.queues
            .lock()
            .await
            .entry(participant.clone())
            .or_default()
            .push(event);
        Ok(())
    }

    async fn publish_all(&self, batch: Vec<(ParticipantToken, Event)>) -> Result<(), StoreError> {
        let mut queues = self.queues.lock().await;
        for (participant, event) in batch {
            queues.entry(participant).or_default().push(event);
        }
        Ok(())
    }

    async fn drain(&self, participant: &ParticipantToken) -> Result<Vec<Event>, StoreError> {
        let events = self
            .queues
            .lock()
            .await
            .remove(participant)
            .unwrap_or_default();
        tracing::trace!(%participant, count = events.len(), "events drained");
        Ok(events)
    }

    async fn clear(&self, participant: &ParticipantToken) -> Result<(), StoreError> {
        self.queues.lock().await.remove(participant);
        Ok(())
    }
}
