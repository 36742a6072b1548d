// Record parser - extracts a flat CreatureRecord from the API's JSON document
//
// Field extraction is deliberately manual (serde_json::Value navigation)
// so that a malformed document reports exactly which path failed. A record
// is all-or-nothing: no partial records ever leave this module.

use crate::model::CreatureRecord;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed creature document at `{field}`")]
    MalformedDocument { field: String },
}

impl ParseError {
    fn at(field: impl Into<String>) -> Self {
        ParseError::MalformedDocument {
            field: field.into(),
        }
    }
}

/// Parse one creature document as returned by `GET {base}/pokemon/{identifier}`.
///
/// Required: `id`, `name`, `weight`, `height`, and the
/// `sprites.other.official-artwork` container. `base_experience` is optional
/// (defaults to 0), and empty `abilities`/`moves` arrays yield empty strings.
pub fn parse_creature(body: &str) -> Result<CreatureRecord, ParseError> {
    let doc: Value = serde_json::from_str(body).map_err(|_| ParseError::at("root"))?;

    let id = require_int(&doc, "id")?;
    let id = u32::try_from(id).map_err(|_| ParseError::at("id"))?;

    let name = require_str(&doc, "name")?;
    if name.is_empty() {
        return Err(ParseError::at("name"));
    }

    let weight = require_int(&doc, "weight")?;
    let height = require_int(&doc, "height")?;

    // Optional upstream; absent or null means 0
    let base_experience = doc
        .get("base_experience")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    let primary_ability = first_listed_name(&doc, "abilities", "ability")?;
    let primary_move = first_listed_name(&doc, "moves", "move")?;
    let image_url = artwork_url(&doc)?;

    debug!(id, name = %name, "parsed creature document");

    Ok(CreatureRecord {
        id,
        name,
        weight,
        height,
        base_experience,
        primary_ability,
        primary_move,
        image_url,
    })
}

fn require_int(doc: &Value, field: &str) -> Result<i64, ParseError> {
    doc.get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| ParseError::at(field))
}

fn require_str(doc: &Value, field: &str) -> Result<String, ParseError> {
    doc.get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ParseError::at(field))
}

/// Name of the first entry in `{list}[].{inner}.name`.
///
/// An empty list is fine (empty string); a missing list container or a
/// first entry without the expected shape is a malformed document.
fn first_listed_name(doc: &Value, list: &str, inner: &str) -> Result<String, ParseError> {
    let entries = doc
        .get(list)
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::at(list))?;

    match entries.first() {
        None => Ok(String::new()),
        Some(entry) => entry
            .get(inner)
            .and_then(|v| v.get("name"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ParseError::at(format!("{list}[0].{inner}.name"))),
    }
}

/// Official artwork URL. The container chain must exist; the leaf itself is
/// null for some forms, which legitimately means "no artwork".
fn artwork_url(doc: &Value) -> Result<String, ParseError> {
    let artwork = doc
        .get("sprites")
        .and_then(|v| v.get("other"))
        .and_then(|v| v.get("official-artwork"))
        .ok_or_else(|| ParseError::at("sprites.other.official-artwork"))?;

    match artwork.get("front_default") {
        Some(Value::Null) => Ok(String::new()),
        Some(Value::String(url)) => Ok(url.clone()),
        _ => Err(ParseError::at("sprites.other.official-artwork.front_default")),
    }
}

// ============================================================================
// TESTS
// ============================================================================
