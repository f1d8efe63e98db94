mod itinerary;
mod pending;
mod trip;

pub use itinerary::{Itinerary, ItineraryUpdate, NewItinerary};
pub use pending::PendingItinerary;
pub use trip::{TravelStyle, TripDetails};
