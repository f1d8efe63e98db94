mod itinerary_service;
mod pending_store;

pub use itinerary_service::{CreateOutcome, ItineraryService};
pub use pending_store::PendingStore;
