//! Identifier resolution across the modern `id` and legacy `_id` schemas.

use std::collections::HashSet;

use serde_json::Value;
use shared::{domain::TutorialId, protocol::RawTutorial};
use tracing::warn;

use crate::types::Tutorial;

/// Resolves a raw service record into a [`Tutorial`].
///
/// `id` wins when it holds a usable value, then `_id`; otherwise the result
/// carries no identifier. Never fails, and normalizing an already
/// normalized record is a no-op.
pub fn normalize(raw: RawTutorial) -> Tutorial {
    let id = resolve_identifier(raw.id.as_ref())
        .or_else(|| resolve_identifier(raw.legacy_id.as_ref()));
    Tutorial {
        id,
        title: raw.title,
        description: raw.description,
        published: raw.published,
    }
}

fn resolve_identifier(value: Option<&Value>) -> Option<TutorialId> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(TutorialId(text.clone())),
        Value::Number(number) => Some(TutorialId(number.to_string())),
        _ => None,
    }
}

pub(crate) struct NormalizedList {
    pub tutorials: Vec<Tutorial>,
    pub unidentified: usize,
}

/// Normalizes a whole response, keeping server order.
///
/// Records no schema could identify are dropped from the list and counted,
/// as are repeats of an id already seen.
pub(crate) fn normalize_list(raw: Vec<RawTutorial>) -> NormalizedList {
    let mut seen = HashSet::new();
    let mut tutorials = Vec::with_capacity(raw.len());
    let mut unidentified = 0;

    for record in raw {
        let tutorial = normalize(record);
        let Some(id) = tutorial.id.clone() else {
            warn!(title = %tutorial.title, "tutorials: record without id or _id hidden");
            unidentified += 1;
            continue;
        };
        if !seen.insert(id.clone()) {
            warn!(tutorial_id = %id, "tutorials: duplicate id in response ignored");
            continue;
        }
        tutorials.push(tutorial);
    }

    NormalizedList {
        tutorials,
        unidentified,
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
