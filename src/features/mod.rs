pub mod auth;
pub mod destinations;
pub mod events;
pub mod itineraries;
pub mod planner;
