//! Itinerary generation: prompt rendering plus the text-generation call.

pub mod service;

pub use service::PlannerService;
