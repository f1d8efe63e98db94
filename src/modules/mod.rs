//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients for the text-generation and events-search providers.

pub mod openai;
pub mod ticketmaster;
