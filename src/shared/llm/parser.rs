use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::time::Duration;

lazy_static! {
    /// Regex for trailing commas before } or ]
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[}\]])").unwrap();

    /// Regex for JavaScript string concatenation ("str1" + "str2")
    static ref JS_STRING_CONCAT_RE: Regex = Regex::new(r#""\s*\+\s*""#).unwrap();
}

/// Timeout for JSON repair operations
const JSON_REPAIR_TIMEOUT: Duration = Duration::from_secs(5);

/// Extract a JSON object or array from text (handles multiple formats)
///
/// Tries in order:
/// 1. JSON in markdown code block: ```json ... ```
/// 2. Generic markdown code block: ``` ... ```
/// 3. Plain JSON starting with `{` or `[`
/// 4. JSON embedded anywhere in text (first opener to last matching closer)
pub fn extract_json_string(text: &str) -> Result<String, String> {
    // Try 1: Markdown code block with json
    if text.contains("```json") {
        return text
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim().to_string())
            .ok_or_else(|| "Failed to extract JSON from markdown code block".to_string());
    }

    // Try 2: Generic markdown code block
    if let Some(start) = text.find("```") {
        let block_start = start + 3;
        // Skip optional language identifier on the same line
        if let Some(newline_offset) = text[block_start..].find('\n') {
            let json_start = block_start + newline_offset + 1;
            if let Some(end_offset) = text[json_start..].find("```") {
                return Ok(text[json_start..json_start + end_offset].trim().to_string());
            }
        }
    }

    // Try 3: Plain JSON
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(trimmed.to_string());
    }

    // Try 4: Embedded JSON, whichever kind opens first
    let (start, closer) = match (text.find('{'), text.find('[')) {
        (Some(o), Some(a)) if a < o => (a, ']'),
        (Some(o), _) => (o, '}'),
        (None, Some(a)) => (a, ']'),
        (None, None) => return Err("No JSON found in response".to_string()),
    };

    let end = text
        .rfind(closer)
        .ok_or_else(|| "Incomplete JSON in response".to_string())?;

    if start < end {
        Ok(text[start..=end].to_string())
    } else {
        Err("Invalid JSON boundaries in response".to_string())
    }
}

/// Fix trailing commas in JSON (common LLM mistake)
///
/// Example: `{"name": "John",}` -> `{"name": "John"}`
pub fn fix_trailing_commas(json_str: &str) -> String {
    TRAILING_COMMA_RE.replace_all(json_str, "$1").to_string()
}

/// Fix JavaScript string concatenation which is invalid in JSON
///
/// LLMs sometimes output: `"str1" + "str2"` which is invalid JSON.
/// This merges them into: `"str1str2"`
pub fn fix_js_string_concatenation(json_str: &str) -> String {
    JS_STRING_CONCAT_RE.replace_all(json_str, "").to_string()
}

fn apply_quick_fixes(json_str: &str) -> String {
    let fixed = fix_js_string_concatenation(json_str);
    fix_trailing_commas(&fixed)
}

/// Attempt to repair JSON using llm_json
///
/// Returns the repaired JSON string if successful, or None if repair fails or is too slow
fn repair_json_with_timeout(json_str: &str) -> Option<String> {
    let start = std::time::Instant::now();

    let options = llm_json::RepairOptions::default();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        llm_json::repair_json(json_str, &options)
    }));

    if start.elapsed() > JSON_REPAIR_TIMEOUT {
        tracing::warn!("JSON repair took longer than timeout");
        return None;
    }

    match result {
        Ok(Ok(repaired)) => Some(repaired),
        Ok(Err(e)) => {
            tracing::debug!("JSON repair failed: {:?}", e);
            None
        }
        Err(_) => {
            tracing::warn!("JSON repair panicked");
            None
        }
    }
}

/// Parse LLM output into `T` using multiple strategies
///
/// Parsing pipeline:
/// 1. Extract JSON string (markdown/plain/embedded)
/// 2. Try direct parse (fast path)
/// 3. Apply quick fixes (trailing commas, string concat) and parse
/// 4. Apply llm_json::repair_json() and parse
pub fn parse_json<T>(text: &str) -> Result<T, String>
where
    T: DeserializeOwned,
{
    let json_str = extract_json_string(text)?;

    tracing::debug!(
        "Extracted JSON (first 500 chars): {}",
        json_str.chars().take(500).collect::<String>()
    );

    if let Ok(parsed) = serde_json::from_str::<T>(&json_str) {
        return Ok(parsed);
    }

    let fixed_json = apply_quick_fixes(&json_str);
    if let Ok(parsed) = serde_json::from_str::<T>(&fixed_json) {
        tracing::debug!("JSON parsed successfully after quick fixes");
        return Ok(parsed);
    }

    if let Some(repaired) = repair_json_with_timeout(&json_str) {
        if let Ok(parsed) = serde_json::from_str::<T>(&repaired) {
            tracing::debug!("JSON parsed successfully after llm_json repair");
            return Ok(parsed);
        }
    }

    Err(format!(
        "Failed to parse JSON after all repair attempts. Original: {}",
        json_str.chars().take(200).collect::<String>()
    ))
}
