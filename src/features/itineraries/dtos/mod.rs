mod itinerary_dto;

pub use itinerary_dto::*;
