//! Ticketmaster Discovery API client

mod client;
mod models;

pub use client::{EventQuery, TicketmasterClient};
pub use models::TmEvent;

#[cfg(test)]
pub use models::EventSearchResponse;
