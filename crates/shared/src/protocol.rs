use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tutorial as it arrives from the service, before identifier resolution.
///
/// Modern backends send `id`, legacy ones send `_id`; either may be a number,
/// a string, `null`, or missing entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTutorial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub published: bool,
}

/// Body of a create request; the service assigns the identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialDraft {
    pub title: String,
    pub description: String,
}

impl TutorialDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Body of an update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialFields {
    pub title: String,
    pub description: String,
    pub published: bool,
}

/// Acknowledgement returned by delete operations. Services differ in what
/// they send back, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalConfirmation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TitleQuery {
    pub title: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}
