//! Ticketed events near each destination segment of a trip.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/events/search` | No | Segments and events for ad-hoc trip text |

pub mod dto;
pub mod handler;
pub mod model;
pub mod routes;
pub mod service;

pub use service::EventsService;
