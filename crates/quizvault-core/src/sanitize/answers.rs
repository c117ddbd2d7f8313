//! Canonical per-type shapes for `options` and `correctAnswer`
//!
//! Canonical forms:
//! - `SINGLE_CHOICE`, `MULTIPLE_CHOICE`, `ORDERING`: options `[{id, text}]`;
//!   single choice answer is one id, the others an array of ids
//! - `TRUE_FALSE`: options `["true", "false"]`, answer `"true"` or `"false"`
//! - `SHORT_ANSWER`, `FILL_BLANK`: options `{caseSensitive}`, answer an array of
//!   accepted strings
//! - `MATCHING`: options `{left: [{id, text}], right: [{id, text}]}`, answer
//!   `[{left, right}]` id pairs
//!
//! Answers resolve against options by id, then by text, then by 0-based index.
//! A shape that cannot be recognized is kept as-is with every string leaf
//! sanitized. Canonical shapes are fixed points of [`canonicalize`].

use serde_json::{json, Map, Value as JsonValue};
use std::collections::HashSet;

use super::html::sanitize_rich_text;
use crate::models::QuestionType;

/// Longest option id kept after sanitization
pub const MAX_OPTION_ID_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq)]
struct Choice {
    id: String,
    text: String,
}

fn choices_to_json(choices: &[Choice]) -> JsonValue {
    JsonValue::Array(
        choices
            .iter()
            .map(|c| json!({ "id": c.id, "text": c.text }))
            .collect(),
    )
}

/// Rewrite `options` and `correct_answer` into the canonical shape for `question_type`
pub fn canonicalize(
    question_type: QuestionType,
    options: &JsonValue,
    correct_answer: &JsonValue,
) -> (JsonValue, JsonValue) {
    match question_type {
        QuestionType::SingleChoice => choice_shape(options, correct_answer, false),
        QuestionType::MultipleChoice | QuestionType::Ordering => {
            choice_shape(options, correct_answer, true)
        }
        QuestionType::TrueFalse => true_false_shape(correct_answer),
        QuestionType::ShortAnswer | QuestionType::FillBlank => {
            text_answer_shape(options, correct_answer)
        }
        QuestionType::Matching => matching_shape(options, correct_answer),
    }
}

/// Sanitize every string leaf of an arbitrary JSON value. Object keys are untouched.
pub fn sanitize_leaves(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::String(s) => JsonValue::String(sanitize_rich_text(s)),
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(sanitize_leaves).collect()),
        JsonValue::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), sanitize_leaves(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Restrict an id to `[A-Za-z0-9_-]` and at most [`MAX_OPTION_ID_LEN`] characters
pub fn sanitize_option_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(MAX_OPTION_ID_LEN)
        .collect()
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a list of options into choices, generating `{prefix}{n}` ids where
/// none usable is given. `None` if any entry has an unrecognized shape.
fn parse_choices(value: &JsonValue, prefix: &str) -> Option<Vec<Choice>> {
    let items = value.as_array()?;
    let mut seen = HashSet::new();
    let mut choices = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let (raw_id, text) = match item {
            JsonValue::Object(map) => {
                let text = map.get("text").and_then(scalar_text)?;
                (map.get("id").and_then(scalar_text), text)
            }
            other => (None, scalar_text(other)?),
        };

        let mut id = raw_id
            .map(|raw| sanitize_option_id(&raw))
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("{}{}", prefix, i + 1));
        if seen.contains(&id) {
            let base = format!("{}{}", prefix, i + 1);
            id = base.clone();
            let mut suffix = 2;
            while seen.contains(&id) {
                id = format!("{}_{}", base, suffix);
                suffix += 1;
            }
        }
        seen.insert(id.clone());

        choices.push(Choice {
            id,
            text: sanitize_rich_text(&text),
        });
    }

    Some(choices)
}

/// Find the id an answer value refers to: by id, then by text, then by index
fn resolve(value: &JsonValue, choices: &[Choice]) -> Option<String> {
    match value {
        JsonValue::String(s) => choices
            .iter()
            .find(|c| &c.id == s)
            .or_else(|| {
                let text = sanitize_rich_text(s);
                choices.iter().find(|c| c.text == text)
            })
            .map(|c| c.id.clone()),
        JsonValue::Number(n) => n
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| choices.get(i))
            .map(|c| c.id.clone()),
        JsonValue::Object(map) => match map.get("id") {
            Some(id) => resolve(id, choices),
            None => map.get("text").and_then(|text| resolve(text, choices)),
        },
        _ => None,
    }
}

fn resolve_all(value: &JsonValue, choices: &[Choice]) -> Option<Vec<String>> {
    match value {
        JsonValue::Array(items) => items.iter().map(|v| resolve(v, choices)).collect(),
        single => resolve(single, choices).map(|id| vec![id]),
    }
}

fn choice_shape(options: &JsonValue, answer: &JsonValue, many: bool) -> (JsonValue, JsonValue) {
    let Some(choices) = parse_choices(options, "opt") else {
        return (sanitize_leaves(options), sanitize_leaves(answer));
    };

    let resolved = if many {
        resolve_all(answer, &choices).map(|ids| json!(ids))
    } else {
        let id = match answer {
            JsonValue::Array(items) if items.len() == 1 => resolve(&items[0], &choices),
            other => resolve(other, &choices),
        };
        id.map(JsonValue::String)
    };

    (
        choices_to_json(&choices),
        resolved.unwrap_or_else(|| sanitize_leaves(answer)),
    )
}

fn truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Bool(b) => *b,
        JsonValue::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        JsonValue::Number(n) => n.as_i64() == Some(1),
        JsonValue::Array(items) if items.len() == 1 => truthy(&items[0]),
        _ => false,
    }
}

fn true_false_shape(answer: &JsonValue) -> (JsonValue, JsonValue) {
    let answer = if truthy(answer) { "true" } else { "false" };
    (json!(["true", "false"]), json!(answer))
}

fn text_answer_shape(options: &JsonValue, answer: &JsonValue) -> (JsonValue, JsonValue) {
    let options = match options {
        JsonValue::Object(map) => {
            let case_sensitive = map
                .get("caseSensitive")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false);
            json!({ "caseSensitive": case_sensitive })
        }
        other => sanitize_leaves(other),
    };

    let accepted: Option<Vec<String>> = match answer {
        JsonValue::Array(items) => items.iter().map(scalar_text).collect(),
        single => scalar_text(single).map(|s| vec![s]),
    };

    let answer = match accepted {
        Some(accepted) => JsonValue::Array(
            accepted
                .iter()
                .map(|s| JsonValue::String(sanitize_rich_text(s)))
                .collect(),
        ),
        None => sanitize_leaves(answer),
    };

    (options, answer)
}

/// Matching options come either as `{left, right}` lists or as an array of
/// `{left, right}` pairs, one pair per row.
fn parse_matching_sides(options: &JsonValue) -> Option<(Vec<Choice>, Vec<Choice>)> {
    match options {
        JsonValue::Object(map) => Some((
            parse_choices(map.get("left")?, "l")?,
            parse_choices(map.get("right")?, "r")?,
        )),
        JsonValue::Array(rows) => {
            let mut left = Vec::with_capacity(rows.len());
            let mut right = Vec::with_capacity(rows.len());
            for row in rows {
                let row = row.as_object()?;
                left.push(row.get("left")?.clone());
                right.push(row.get("right")?.clone());
            }
            Some((
                parse_choices(&JsonValue::Array(left), "l")?,
                parse_choices(&JsonValue::Array(right), "r")?,
            ))
        }
        _ => None,
    }
}

fn resolve_pair(
    left: &JsonValue,
    right: &JsonValue,
    left_side: &[Choice],
    right_side: &[Choice],
) -> Option<JsonValue> {
    Some(json!({
        "left": resolve(left, left_side)?,
        "right": resolve(right, right_side)?,
    }))
}

fn matching_shape(options: &JsonValue, answer: &JsonValue) -> (JsonValue, JsonValue) {
    let Some((left_side, right_side)) = parse_matching_sides(options) else {
        return (sanitize_leaves(options), sanitize_leaves(answer));
    };

    let pairs: Option<Vec<JsonValue>> = match answer {
        JsonValue::Array(items) => items
            .iter()
            .map(|item| {
                let item = item.as_object()?;
                resolve_pair(item.get("left")?, item.get("right")?, &left_side, &right_side)
            })
            .collect(),
        JsonValue::Object(map) => map
            .iter()
            .map(|(left, right)| {
                resolve_pair(
                    &JsonValue::String(left.clone()),
                    right,
                    &left_side,
                    &right_side,
                )
            })
            .collect(),
        _ => None,
    };

    let mut canonical = Map::new();
    canonical.insert("left".to_string(), choices_to_json(&left_side));
    canonical.insert("right".to_string(), choices_to_json(&right_side));

    (
        JsonValue::Object(canonical),
        pairs
            .map(JsonValue::Array)
            .unwrap_or_else(|| sanitize_leaves(answer)),
    )
}
