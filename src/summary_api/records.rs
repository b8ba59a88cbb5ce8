//! Summary records and the text rules used to display and search them.

use serde_json::{Map, Number, Value};

/// One table row: column name to scalar value, in the order the service sent.
pub type Record = Map<String, Value>;

/// Column rendered as a rounded integer percentage.
pub const COMPLETION_COLUMN: &str = "Completion%";

/// Text shown in the cell for `column` of `record`.
///
/// Absent keys are treated like `null`.
pub fn cell_text(record: &Record, column: &str) -> String {
    let value = record.get(column);
    if column == COMPLETION_COLUMN {
        return percent_text(value);
    }
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value) => display_text(value),
    }
}

/// Rounded percentage text, or an empty string when the value is not numeric.
pub fn percent_text(value: Option<&Value>) -> String {
    let number = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(number) if number.is_finite() => format!("{}%", round_half_up(number)),
        _ => String::new(),
    }
}

/// Stringified value as shown in a plain cell. `null` renders as `"null"`.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// True when any value of `record` contains `needle`, ignoring case.
///
/// `needle` must already be lowercase.
pub fn record_matches(record: &Record, needle: &str) -> bool {
    record
        .values()
        .any(|value| display_text(value).to_lowercase().contains(needle))
}

fn round_half_up(number: f64) -> i64 {
    let floor = number.floor();
    let rounded = if number - floor >= 0.5 { floor + 1.0 } else { floor };
    if rounded == 0.0 { 0 } else { rounded as i64 }
}

fn number_text(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    let Some(float) = number.as_f64() else {
        return number.to_string();
    };
    if float == 0.0 {
        return "0".to_string();
    }
    if float.fract() == 0.0 && float.abs() < 1e21 {
        return format!("{float:.0}");
    }
    float.to_string()
}
