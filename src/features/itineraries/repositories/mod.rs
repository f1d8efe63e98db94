//! Storage seam for itineraries.
//!
//! Every lookup is scoped to the owning user, so another user's id behaves
//! exactly like a missing one.

mod pg_itinerary_repository;

#[cfg(test)]
mod memory_itinerary_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::itineraries::models::{Itinerary, ItineraryUpdate, NewItinerary};

pub use pg_itinerary_repository::PgItineraryRepository;

#[cfg(test)]
pub use memory_itinerary_repository::InMemoryItineraryRepository;

#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    async fn insert(&self, new: NewItinerary) -> Result<Itinerary>;

    async fn find_for_user(&self, id: Uuid, user_id: &str) -> Result<Option<Itinerary>>;

    /// Newest first, with the total count for the user
    async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Itinerary>, i64)>;

    async fn update(
        &self,
        id: Uuid,
        user_id: &str,
        update: ItineraryUpdate,
    ) -> Result<Option<Itinerary>>;

    /// Whether a row was removed
    async fn delete(&self, id: Uuid, user_id: &str) -> Result<bool>;
}
