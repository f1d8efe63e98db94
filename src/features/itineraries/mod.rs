//! Trip itineraries: generation, session previews and saved trips.
//!
//! A generated itinerary is either kept in the caller's session for review
//! (anonymous callers included) or saved to the signed-in user's account.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/styles` | No | Selectable travel styles |
//! | POST | `/api/itineraries` | Optional | Generate, then preview or save |
//! | GET | `/api/itineraries` | Yes | List own itineraries |
//! | GET | `/api/itineraries/preview` | No | Session's pending itinerary |
//! | POST | `/api/itineraries/pending/save` | Yes | Save the pending itinerary |
//! | GET | `/api/itineraries/{id}` | Yes | Get an itinerary |
//! | PUT | `/api/itineraries/{id}` | Yes | Edit, optionally regenerating |
//! | DELETE | `/api/itineraries/{id}` | Yes | Delete an itinerary |
//! | GET | `/api/itineraries/{id}/events` | Yes | Events during the trip |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::ItineraryService;
