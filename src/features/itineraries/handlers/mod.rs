mod itinerary_handler;
mod pending_handler;
mod style_handler;

pub use itinerary_handler::*;
pub use pending_handler::*;
pub use style_handler::*;
