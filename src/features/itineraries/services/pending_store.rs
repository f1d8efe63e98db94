use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::features::itineraries::models::PendingItinerary;

struct SessionEntry {
    pending: PendingItinerary,
    last_seen: Instant,
}

/// Process-local session storage for itineraries awaiting save
///
/// Entries idle for longer than the TTL are treated as gone and are swept
/// on the next write. At most `max_entries` sessions are held; a new session
/// beyond that evicts the least recently used one.
pub struct PendingStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
    max_entries: usize,
}

impl std::fmt::Debug for PendingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingStore")
            .field("ttl", &self.ttl)
            .field("max_entries", &self.max_entries)
            .finish_non_exhaustive()
    }
}

impl PendingStore {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Replace the session's pending itinerary
    pub async fn put(&self, session: Uuid, pending: PendingItinerary) {
        let mut sessions = self.sessions.write().await;
        let ttl = self.ttl;
        sessions.retain(|_, entry| entry.last_seen.elapsed() < ttl);

        if !sessions.contains_key(&session) {
            while sessions.len() >= self.max_entries {
                let Some(oldest) = sessions
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_seen)
                    .map(|(id, _)| *id)
                else {
                    break;
                };
                sessions.remove(&oldest);
                tracing::debug!("Evicted pending itinerary for session {}", oldest);
            }
        }

        sessions.insert(
            session,
            SessionEntry {
                pending,
                last_seen: Instant::now(),
            },
        );
    }

    pub async fn get(&self, session: Uuid) -> Option<PendingItinerary> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&session)?;
        if entry.last_seen.elapsed() >= self.ttl {
            sessions.remove(&session);
            return None;
        }
        entry.last_seen = Instant::now();
        Some(entry.pending.clone())
    }

    pub async fn remove(&self, session: Uuid) {
        self.sessions.write().await.remove(&session);
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
