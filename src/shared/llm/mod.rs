//! Helpers for turning free-form LLM output into typed values.

mod parser;
mod schema;

pub use parser::parse_json;
pub use schema::json_schema_string;
