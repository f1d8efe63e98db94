//! Destination normalization.
//!
//! Splits the free-text destination field of a trip into ordered per-city
//! segments with date ranges, used for event lookup. A language model is
//! asked first when one is configured; the line-based heuristics are the
//! fallback for every failure mode.

pub mod heuristics;
pub mod models;
pub mod service;

pub use models::DestinationSegment;
pub use service::DestinationService;
