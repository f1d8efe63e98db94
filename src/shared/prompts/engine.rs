//! Template engine for prompt management using Jinja2 syntax.
//!
//! Built-in templates are compiled into the binary. A file with the same
//! name under `templates/prompts/` replaces the built-in copy, so prompts
//! can be tuned without a rebuild.

use minijinja::{Environment, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Template directory relative to the working directory
const TEMPLATE_DIR: &str = "templates/prompts";

/// Templates shipped with the binary, keyed by their path under `templates/prompts/`
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "itinerary/base.jinja",
        include_str!("../../../templates/prompts/itinerary/base.jinja"),
    ),
    (
        "itinerary/general.jinja",
        include_str!("../../../templates/prompts/itinerary/general.jinja"),
    ),
    (
        "itinerary/culture_history.jinja",
        include_str!("../../../templates/prompts/itinerary/culture_history.jinja"),
    ),
    (
        "itinerary/city_shopping.jinja",
        include_str!("../../../templates/prompts/itinerary/city_shopping.jinja"),
    ),
    (
        "itinerary/adventure.jinja",
        include_str!("../../../templates/prompts/itinerary/adventure.jinja"),
    ),
    (
        "destinations/system.jinja",
        include_str!("../../../templates/prompts/destinations/system.jinja"),
    ),
    (
        "destinations/user.jinja",
        include_str!("../../../templates/prompts/destinations/user.jinja"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, source) in BUILTIN_TEMPLATES {
        if let Err(e) = env.add_template(*name, *source) {
            tracing::error!("Built-in template {} is invalid: {}", name, e);
        }
    }

    let template_path = Path::new(TEMPLATE_DIR);
    if template_path.exists() {
        load_templates_recursive(&mut env, template_path, template_path);
    }

    env
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    let Ok(entries) = std::fs::read_dir(current_path) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            load_templates_recursive(env, base_path, &path);
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == "jinja") {
            continue;
        }
        let Ok(relative) = path.strip_prefix(base_path) else {
            continue;
        };
        // Template names always use forward slashes
        let template_name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                // Leaked once at startup; templates live for the whole process
                let static_name: &'static str = Box::leak(template_name.clone().into_boxed_str());
                let static_content: &'static str = Box::leak(content.into_boxed_str());
                if let Err(e) = env.add_template(static_name, static_content) {
                    tracing::warn!("Failed to load template {}: {}", template_name, e);
                } else {
                    tracing::debug!("Loaded template: {}", template_name);
                }
            }
            Err(e) => tracing::warn!("Failed to read template {}: {}", path.display(), e),
        }
    }
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
///
/// # Arguments
/// * `template_name` - The template path relative to `templates/prompts/` (e.g., "itinerary/general.jinja")
/// * `ctx` - A HashMap of variable names to values
pub fn render_template(
    template_name: &str,
    ctx: &HashMap<&str, Value>,
) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    let render_ctx = Value::from_iter(ctx.iter().map(|(k, v)| (*k, v.clone())));

    template
        .render(render_ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Check if a template exists
#[cfg(test)]
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}
