//! Presentation of stored results: dominant colour, chart slices and trait lists.

use serde_json::{Map, Value};

use crate::models::{ClassicResult, Letter};

/// Colour profile associated with each classic letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Profile {
    pub fn of(letter: Letter) -> Self {
        match letter {
            Letter::A => Profile::Red,
            Letter::B => Profile::Yellow,
            Letter::C => Profile::Green,
            Letter::D => Profile::Blue,
        }
    }

    /// Translation key of the descriptive label.
    pub fn label_key(self) -> &'static str {
        match self {
            Profile::Red => "done.profile_red",
            Profile::Yellow => "done.profile_yellow",
            Profile::Green => "done.profile_green",
            Profile::Blue => "done.profile_blue",
        }
    }
}

pub const SLICE_COLORS: [&str; 4] = ["#f87171", "#facc15", "#4ade80", "#60a5fa"];
const EMPTY_CHART_COLOR: &str = "#e5e7eb";

/// Letter with the highest percentage; ties go to the earliest letter.
pub fn dominant(result: &ClassicResult) -> Letter {
    let mut letters = Letter::ALL;
    // stable: equal percentages keep A..D order
    letters.sort_by(|a, b| result.get(*b).cmp(&result.get(*a)));
    letters[0]
}

/// CSS `conic-gradient` drawing the four percentages as pie slices.
pub fn pie_gradient(result: &ClassicResult) -> String {
    let total: i64 = Letter::ALL.iter().map(|l| result.get(*l).max(0)).sum();
    if total == 0 {
        return format!("conic-gradient({EMPTY_CHART_COLOR} 0% 100%)");
    }

    let mut start = 0.0;
    let stops: Vec<String> = Letter::ALL
        .iter()
        .map(|letter| {
            let share = result.get(*letter).max(0) as f64 * 100.0 / total as f64;
            let end = start + share;
            let stop = format!(
                "{} {:.2}% {:.2}%",
                SLICE_COLORS[letter.index()],
                start,
                end
            );
            start = end;
            stop
        })
        .collect();

    format!("conic-gradient({})", stops.join(", "))
}

/// Decode a stored trait column. Text that is not JSON is treated as a plain string.
pub fn decode_trait_column(raw: &str) -> Vec<String> {
    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
    normalize_trait_list(&value)
}

/// Normalize a trait list that may be an array, a JSON-encoded string of an
/// array, or a key-indexed object. Anything else yields an empty list.
pub fn normalize_trait_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => strings(items.iter()),
        Value::Object(map) => strings(ordered_values(map).into_iter()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => strings(items.iter()),
            Ok(Value::Object(map)) => strings(ordered_values(&map).into_iter()),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn strings<'a>(items: impl Iterator<Item = &'a Value>) -> Vec<String> {
    items
        .filter_map(|item| match item {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        })
        .collect()
}

// Integer keys first in numeric order, then the remaining keys.
fn ordered_values(map: &Map<String, Value>) -> Vec<&Value> {
    let mut entries: Vec<(Option<u64>, &Value)> = map
        .iter()
        .map(|(key, value)| (key.parse::<u64>().ok(), value))
        .collect();
    entries.sort_by_key(|(index, _)| (index.is_none(), *index));
    entries.into_iter().map(|(_, value)| value).collect()
}
