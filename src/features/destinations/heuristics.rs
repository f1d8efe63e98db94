use chrono::{Days, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use super::models::DestinationSegment;
use crate::shared::validation::is_two_letter_code;

lazy_static! {
    /// "for 3 days", "for 2 nights"
    static ref DURATION_RE: Regex =
        Regex::new(r"(?i)\bfor\s+(\d+)\s*(?:day|days|night|nights)\b").unwrap();
}

const DASH_SEPARATORS: [&str; 3] = [" - ", " – ", " — "];
const DEFAULT_COUNTRY: &str = "US";
const UNKNOWN_CITY: &str = "Unknown";

const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("UNITED STATES", "US"),
    ("USA", "US"),
    ("US", "US"),
    ("UNITED KINGDOM", "GB"),
    ("UK", "GB"),
    ("ENGLAND", "GB"),
    ("SCOTLAND", "GB"),
    ("WALES", "GB"),
    ("NORTHERN IRELAND", "GB"),
    ("CANADA", "CA"),
    ("FRANCE", "FR"),
    ("GERMANY", "DE"),
    ("SPAIN", "ES"),
    ("ITALY", "IT"),
    ("PORTUGAL", "PT"),
    ("MEXICO", "MX"),
    ("AUSTRALIA", "AU"),
    ("NEW ZEALAND", "NZ"),
    ("JAPAN", "JP"),
    ("SINGAPORE", "SG"),
    ("BRAZIL", "BR"),
    ("IRELAND", "IE"),
    ("SWITZERLAND", "CH"),
    ("NETHERLANDS", "NL"),
    ("BELGIUM", "BE"),
    ("SWEDEN", "SE"),
    ("NORWAY", "NO"),
];

/// A parsed destination line before days are allocated
#[derive(Debug)]
struct Stop {
    city: String,
    state: Option<String>,
    country: String,
    duration: Option<i64>,
}

/// Map a country name or code to ISO 3166-1 alpha-2
///
/// Two ASCII letters are taken as a code. Known names and aliases are looked
/// up case-insensitively; anything else yields `default`.
pub fn normalise_country(value: &str, default: &str) -> String {
    let code = value.trim();
    if code.is_empty() {
        return default.to_string();
    }
    if is_two_letter_code(code) {
        return code.to_ascii_uppercase();
    }

    let upper = code.to_uppercase();
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, iso)| (*iso).to_string())
        .unwrap_or_else(|| default.to_string())
}

fn strip_duration(line: &str) -> String {
    let mut cleaned = line;
    for separator in DASH_SEPARATORS {
        if let Some((head, _)) = cleaned.split_once(separator) {
            cleaned = head;
        }
    }
    DURATION_RE.replace_all(cleaned, "").trim().to_string()
}

fn duration_days(line: &str) -> Option<i64> {
    let captures = DURATION_RE.captures(line)?;
    captures
        .get(1)?
        .as_str()
        .parse::<i64>()
        .ok()
        .map(|n| n.max(1))
}

fn parse_line(line: &str) -> Option<Stop> {
    let location = strip_duration(line);
    let parts: Vec<&str> = location
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let (city, state, country) = match parts.as_slice() {
        [] => return None,
        [city] => (*city, None, DEFAULT_COUNTRY.to_string()),
        [city, country] => (*city, None, normalise_country(country, DEFAULT_COUNTRY)),
        [city, second, .., last] => {
            let state = is_two_letter_code(second).then(|| second.to_ascii_uppercase());
            (*city, state, normalise_country(last, DEFAULT_COUNTRY))
        }
    };

    let state = if country == DEFAULT_COUNTRY { state } else { None };

    Some(Stop {
        city: city.to_string(),
        state,
        country,
        duration: duration_days(line),
    })
}

fn trip_segment(city: &str, start: NaiveDate, end: NaiveDate) -> DestinationSegment {
    DestinationSegment {
        city: city.to_string(),
        state: None,
        country: DEFAULT_COUNTRY.to_string(),
        start_date: start,
        end_date: end,
    }
}

fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    u64::try_from(days)
        .ok()
        .and_then(|d| date.checked_add_days(Days::new(d)))
        .unwrap_or(NaiveDate::MAX)
}

/// Split destination text into contiguous per-city segments
///
/// Each non-empty line is one stop: `City`, `City, Country` or
/// `City, ST, ..., Country`, optionally with a "for N days/nights" phrase or
/// a dash-separated note. Days are handed out in order; stops without a
/// duration share what is left and the last stop takes the remainder.
pub fn heuristic_destinations(
    text: &str,
    trip_start: NaiveDate,
    trip_end: NaiveDate,
) -> Vec<DestinationSegment> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return vec![trip_segment(UNKNOWN_CITY, trip_start, trip_end)];
    }

    let stops: Vec<Stop> = lines.into_iter().filter_map(parse_line).collect();
    if stops.is_empty() {
        let name = text.trim();
        let name = if name.is_empty() { UNKNOWN_CITY } else { name };
        return vec![trip_segment(name, trip_start, trip_end)];
    }

    let mut remaining_segments = stops.len() as i64;
    let mut cursor = trip_start;
    let mut segments = Vec::with_capacity(stops.len());

    for stop in &stops {
        if cursor > trip_end {
            break;
        }
        let remaining_days = days_inclusive(cursor, trip_end);

        let length = match stop.duration {
            Some(days) if remaining_segments > 1 => {
                days.min(remaining_days - (remaining_segments - 1))
            }
            Some(days) => days.min(remaining_days),
            None if remaining_segments == 1 => remaining_days,
            None => (remaining_days / remaining_segments).max(1),
        }
        .clamp(1, remaining_days);

        let end = add_days(cursor, length - 1).min(trip_end);
        segments.push(DestinationSegment {
            city: stop.city.clone(),
            state: stop.state.clone(),
            country: stop.country.clone(),
            start_date: cursor,
            end_date: end,
        });

        cursor = add_days(end, 1);
        remaining_segments -= 1;
    }

    if segments.is_empty() {
        let first = &stops[0];
        segments.push(DestinationSegment {
            city: first.city.clone(),
            state: first.state.clone(),
            country: first.country.clone(),
            start_date: trip_start,
            end_date: trip_end,
        });
    }

    tracing::debug!("Heuristic destinations: {:?}", segments);
    segments
}

fn str_field<'a>(item: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| item.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn duration_field(item: &Map<String, Value>) -> Option<i64> {
    ["stay_length_days", "duration_days"]
        .iter()
        .filter_map(|key| item.get(*key))
        .find_map(|value| match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
        .filter(|n| *n > 0)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Convert model-produced items into segments within the trip range
///
/// Items that are not objects, have no city, or carry unparseable dates are
/// skipped. Explicit dates are clamped to the trip; otherwise the stay starts
/// at the cursor and lasts `stay_length_days`/`duration_days`, or an even
/// share of the remaining days.
pub fn segments_from_llm(
    items: &[Value],
    trip_start: NaiveDate,
    trip_end: NaiveDate,
) -> Vec<DestinationSegment> {
    let mut segments = Vec::new();
    let mut cursor = trip_start;
    let mut remaining_segments = items.len() as i64;

    for raw in items {
        if remaining_segments <= 0 || cursor > trip_end {
            break;
        }
        let Some(item) = raw.as_object() else {
            continue;
        };
        let Some(city) = str_field(item, &["city"]) else {
            continue;
        };

        let state = str_field(item, &["state_code", "state"]).map(str::to_uppercase);
        let country = normalise_country(
            str_field(item, &["country_code", "country"]).unwrap_or(DEFAULT_COUNTRY),
            DEFAULT_COUNTRY,
        );

        let explicit = (
            str_field(item, &["start_date"]),
            str_field(item, &["end_date"]),
        );
        let (start, end) = match explicit {
            (Some(start), Some(end)) => {
                let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) else {
                    continue;
                };
                (
                    start.clamp(trip_start, trip_end),
                    end.clamp(trip_start, trip_end),
                )
            }
            _ => {
                let remaining_days = days_inclusive(cursor, trip_end);
                let length = match duration_field(item) {
                    Some(days) => days,
                    None if remaining_segments == 1 => remaining_days,
                    None => (remaining_days / remaining_segments).max(1),
                };
                (cursor, add_days(cursor, length - 1).min(trip_end))
            }
        };
        let end = end.max(start);

        segments.push(DestinationSegment {
            city: city.to_string(),
            state: if country == DEFAULT_COUNTRY { state } else { None },
            country,
            start_date: start,
            end_date: end,
        });

        cursor = add_days(end, 1);
        remaining_segments -= 1;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn assert_contiguous(segments: &[DestinationSegment]) {
        for pair in segments.windows(2) {
            assert_eq!(add_days(pair[0].end_date, 1), pair[1].start_date);
        }
        for seg in segments {
            assert!(seg.start_date <= seg.end_date);
        }
    }

    #[test]
    fn test_normalise_country_codes_and_aliases() {
        assert_eq!(normalise_country("fr", "US"), "FR");
        assert_eq!(normalise_country("  United Kingdom ", "US"), "GB");
        assert_eq!(normalise_country("scotland", "US"), "GB");
        assert_eq!(normalise_country("usa", "US"), "US");
        assert_eq!(normalise_country("New Zealand", "US"), "NZ");
        assert_eq!(normalise_country("Atlantis", "US"), "US");
        assert_eq!(normalise_country("", "CA"), "CA");
    }

    #[test]
    fn test_empty_text_spans_trip_as_unknown() {
        let segments = heuristic_destinations("  \n ", date("2025-05-01"), date("2025-05-04"));

        assert_eq!(
            segments,
            vec![DestinationSegment {
                city: "Unknown".to_string(),
                state: None,
                country: "US".to_string(),
                start_date: date("2025-05-01"),
                end_date: date("2025-05-04"),
            }]
        );
    }

    #[test]
    fn test_lines_without_parts_fall_back_to_trimmed_text() {
        let segments = heuristic_destinations(" , ,\n,", date("2025-05-01"), date("2025-05-02"));

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].city, ", ,\n,");
        assert_eq!(segments[0].start_date, date("2025-05-01"));
        assert_eq!(segments[0].end_date, date("2025-05-02"));
    }

    #[test]
    fn test_durations_are_honoured_in_order() {
        let text = "Chicago, IL, US for 3 days\nDetroit, MI, USA for 2 nights";
        let segments = heuristic_destinations(text, date("2025-05-01"), date("2025-05-05"));

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].city, "Chicago");
        assert_eq!(segments[0].state.as_deref(), Some("IL"));
        assert_eq!(segments[0].country, "US");
        assert_eq!(segments[0].start_date, date("2025-05-01"));
        assert_eq!(segments[0].end_date, date("2025-05-03"));
        assert_eq!(segments[1].city, "Detroit");
        assert_eq!(segments[1].state.as_deref(), Some("MI"));
        assert_eq!(segments[1].start_date, date("2025-05-04"));
        assert_eq!(segments[1].end_date, date("2025-05-05"));
        assert_contiguous(&segments);
    }

    #[test]
    fn test_duration_leaves_a_day_for_each_later_stop() {
        let text = "Paris, France for 10 days\nLyon, France\nNice, France";
        let segments = heuristic_destinations(text, date("2025-06-01"), date("2025-06-05"));

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].end_date, date("2025-06-03"));
        assert_eq!(segments[1].start_date, date("2025-06-04"));
        assert_eq!(segments[1].end_date, date("2025-06-04"));
        assert_eq!(segments[2].start_date, date("2025-06-05"));
        assert_eq!(segments[2].end_date, date("2025-06-05"));
        assert_contiguous(&segments);
    }

    #[test]
    fn test_stops_without_duration_split_evenly_and_last_takes_rest() {
        let text = "Rome, Italy\nFlorence, Italy\nVenice, Italy";
        let segments = heuristic_destinations(text, date("2025-09-01"), date("2025-09-07"));

        let spans: Vec<(NaiveDate, NaiveDate)> = segments
            .iter()
            .map(|s| (s.start_date, s.end_date))
            .collect();
        assert_eq!(
            spans,
            vec![
                (date("2025-09-01"), date("2025-09-02")),
                (date("2025-09-03"), date("2025-09-04")),
                (date("2025-09-05"), date("2025-09-07")),
            ]
        );
        assert!(segments.iter().all(|s| s.country == "IT"));
    }

    #[test]
    fn test_region_rules() {
        let text = "Toronto, ON, Canada\nAustin, Texas, USA\nPortland, OR\nBoston";
        let segments = heuristic_destinations(text, date("2025-07-01"), date("2025-07-04"));

        // Non-US drops the region
        assert_eq!(segments[0].country, "CA");
        assert_eq!(segments[0].state, None);
        // Second part is only a region when it is two letters
        assert_eq!(segments[1].country, "US");
        assert_eq!(segments[1].state, None);
        // Two parts read as city, country
        assert_eq!(segments[2].country, "OR");
        assert_eq!(segments[2].state, None);
        assert_eq!(segments[3].city, "Boston");
        assert_eq!(segments[3].country, "US");
        assert_contiguous(&segments);
    }

    #[test]
    fn test_dash_notes_are_ignored_but_duration_counts() {
        let text = "Kyoto, Japan - temples and gardens for 2 days\nTokyo, Japan";
        let segments = heuristic_destinations(text, date("2025-04-10"), date("2025-04-14"));

        assert_eq!(segments[0].city, "Kyoto");
        assert_eq!(segments[0].country, "JP");
        assert_eq!(segments[0].end_date, date("2025-04-11"));
        assert_eq!(segments[1].start_date, date("2025-04-12"));
        assert_eq!(segments[1].end_date, date("2025-04-14"));
    }

    #[test]
    fn test_more_stops_than_days_stops_at_trip_end() {
        let text = "A\nB\nC";
        let segments = heuristic_destinations(text, date("2025-05-01"), date("2025-05-02"));

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].end_date, date("2025-05-02"));
        assert_contiguous(&segments);
    }

    #[test]
    fn test_llm_items_are_clamped_to_trip() {
        let items = vec![
            json!({"city": "Chicago", "state_code": "il", "country_code": "US",
                   "start_date": "2025-04-28", "end_date": "2025-05-02"}),
            json!({"city": "Montreal", "state_code": "QC", "country_code": "Canada",
                   "start_date": "2025-05-03", "end_date": "2025-05-20"}),
        ];
        let segments = segments_from_llm(&items, date("2025-05-01"), date("2025-05-05"));

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].state.as_deref(), Some("IL"));
        assert_eq!(segments[0].start_date, date("2025-05-01"));
        assert_eq!(segments[0].end_date, date("2025-05-02"));
        assert_eq!(segments[1].country, "CA");
        assert_eq!(segments[1].state, None);
        assert_eq!(segments[1].end_date, date("2025-05-05"));
    }

    #[test]
    fn test_llm_items_without_dates_use_duration_or_even_split() {
        let items = vec![
            json!({"city": "Lisbon", "country": "Portugal", "stay_length_days": 2}),
            json!({"city": "Porto", "country": "PT", "duration_days": "1"}),
            json!({"city": "Faro", "country": "PT"}),
        ];
        let segments = segments_from_llm(&items, date("2025-08-01"), date("2025-08-06"));

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].end_date, date("2025-08-02"));
        assert_eq!(segments[1].start_date, date("2025-08-03"));
        assert_eq!(segments[1].end_date, date("2025-08-03"));
        assert_eq!(segments[2].start_date, date("2025-08-04"));
        assert_eq!(segments[2].end_date, date("2025-08-06"));
    }

    #[test]
    fn test_llm_invalid_items_are_skipped() {
        let items = vec![
            json!("Chicago"),
            json!({"city": "  "}),
            json!({"city": "Nowhere", "start_date": "soon", "end_date": "later"}),
            json!({"city": "Denver", "state": "co", "start_date": "2025-05-03", "end_date": "2025-05-02"}),
        ];
        let segments = segments_from_llm(&items, date("2025-05-01"), date("2025-05-05"));

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].city, "Denver");
        assert_eq!(segments[0].state.as_deref(), Some("CO"));
        assert_eq!(segments[0].country, "US");
        // end before start is coerced to a single day
        assert_eq!(segments[0].start_date, date("2025-05-03"));
        assert_eq!(segments[0].end_date, date("2025-05-03"));
    }

    #[test]
    fn test_llm_empty_array_yields_nothing() {
        assert!(segments_from_llm(&[], date("2025-05-01"), date("2025-05-05")).is_empty());
    }
}
