//! Prompt template management module.
//!
//! Templates live in `templates/prompts/` and use Jinja2 syntax.
//!
//! # Usage
//!
//! ```ignore
//! use std::collections::HashMap;
//! use minijinja::Value;
//! use crate::shared::prompts::render_template;
//!
//! let mut ctx = HashMap::new();
//! ctx.insert("destination", Value::from("Kyoto"));
//!
//! let prompt = render_template("itinerary/general.jinja", &ctx)?;
//! ```

pub mod engine;

pub use engine::{render_template, TemplateError};

use chrono::NaiveDate;
use minijinja::Value;
use std::collections::HashMap;

/// Values substituted into an itinerary prompt template
#[derive(Debug, Clone)]
pub struct ItineraryPromptVars<'a> {
    pub destination: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interests: &'a str,
    pub activities: &'a str,
    pub food_preferences: &'a str,
    pub style_label: &'a str,
}

/// Render the itinerary prompt for a travel style.
///
/// `style_key` selects `itinerary/<style_key>.jinja`.
pub fn render_itinerary_prompt(
    style_key: &str,
    vars: &ItineraryPromptVars<'_>,
) -> Result<String, TemplateError> {
    let total_days = (vars.end_date - vars.start_date).num_days() + 1;

    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("destination", Value::from(vars.destination));
    ctx.insert("start_date", Value::from(vars.start_date.format("%Y-%m-%d").to_string()));
    ctx.insert("end_date", Value::from(vars.end_date.format("%Y-%m-%d").to_string()));
    ctx.insert("total_days", Value::from(total_days));
    ctx.insert("interests", Value::from(vars.interests));
    ctx.insert("activities", Value::from(vars.activities));
    ctx.insert("food_preferences", Value::from(vars.food_preferences));
    ctx.insert("style_label", Value::from(vars.style_label));

    render_template(&format!("itinerary/{}.jinja", style_key), &ctx)
}

/// Render the (system, user) prompt pair for destination normalization.
pub fn render_destination_prompts(
    destination_text: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    item_schema: Option<&str>,
) -> Result<(String, String), TemplateError> {
    let mut system_ctx: HashMap<&str, Value> = HashMap::new();
    system_ctx.insert("item_schema", Value::from(item_schema.unwrap_or("")));
    let system = render_template("destinations/system.jinja", &system_ctx)?;

    let text = destination_text.trim();
    let mut user_ctx: HashMap<&str, Value> = HashMap::new();
    user_ctx.insert(
        "destination_text",
        Value::from(if text.is_empty() { "[no text]" } else { text }),
    );
    user_ctx.insert("start_date", Value::from(start_date.format("%Y-%m-%d").to_string()));
    user_ctx.insert("end_date", Value::from(end_date.format("%Y-%m-%d").to_string()));
    let user = render_template("destinations/user.jinja", &user_ctx)?;

    Ok((system, user))
}
