//! # Key Case Conversion
//!
//! Pure string transforms between `snake_case` and `camelCase`, and a
//! recursive key-renaming pass over nested JSON objects.
//!
//! `recursive_rename` only descends into object values. Lists are passed
//! through untouched; renaming records nested inside lists is the job of
//! the conversion layer that knows where records live.

use serde_json::{Map, Value};

/// A key converter, e.g. [`to_snake`] or [`to_camel`].
pub type Converter = fn(&str) -> String;

/// Convert a key to `snake_case`.
///
/// Every uppercase character is lowercased and, unless it is the first
/// character, preceded by an underscore. Existing underscores and
/// lowercase runs pass through unchanged.
///
/// ```
/// assert_eq!(typedrec_core::case::to_snake("objectId"), "object_id");
/// ```
pub fn to_snake(input: &str) -> String {
    let mut converted = String::with_capacity(input.len() + 4);
    for (i, c) in input.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                converted.push('_');
            }
            converted.extend(c.to_lowercase());
        } else {
            converted.push(c);
        }
    }
    converted
}

/// Convert a key to `camelCase`.
///
/// Underscores are dropped and capitalize the next character, except for
/// leading runs, which are absorbed before anything is emitted. The first
/// emitted character is always lowercase. An uppercase character in the
/// input keeps its capital unless it is the first one emitted.
///
/// ```
/// assert_eq!(typedrec_core::case::to_camel("___here___is"), "hereIs");
/// ```
pub fn to_camel(input: &str) -> String {
    let mut converted = String::with_capacity(input.len());
    let mut next_is_capital = false;

    for c in input.chars() {
        if c == '_' {
            next_is_capital = !converted.is_empty();
            continue;
        }

        // Uncased characters (digits, symbols) take the capital branch,
        // which emits them unchanged and clears the flag.
        if !c.is_lowercase() {
            next_is_capital = true;
        }

        if converted.is_empty() {
            converted.extend(c.to_lowercase());
            next_is_capital = false;
            continue;
        }

        if next_is_capital {
            converted.extend(c.to_uppercase());
            next_is_capital = false;
        } else {
            converted.extend(c.to_lowercase());
        }
    }

    converted
}

/// Rename every key of `map` with `converter`, recursing into object values.
///
/// Non-object values, including arrays, are cloned as-is.
pub fn recursive_rename(map: &Map<String, Value>, converter: Converter) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Object(inner) => Value::Object(recursive_rename(inner, converter)),
                other => other.clone(),
            };
            (converter(key), value)
        })
        .collect()
}
