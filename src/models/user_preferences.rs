use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Reserved value meaning "no filter on this attribute"
pub const NO_PREFERENCE: &str = "none";

/// Style attributes a user picked on the preferences page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StylePreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub sleeve_type: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub pattern: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub fabric: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub neckline: Vec<String>,
}

impl StylePreferences {
    /// The free-text attributes matched against the caption, in filter order
    pub fn caption_attributes(&self) -> [(&'static str, &[String]); 5] {
        [
            ("type", self.types.as_slice()),
            ("sleeveType", self.sleeve_type.as_slice()),
            ("pattern", self.pattern.as_slice()),
            ("fabric", self.fabric.as_slice()),
            ("neckline", self.neckline.as_slice()),
        ]
    }
}

/// True when `value` is the "no filter" sentinel
pub fn is_no_preference(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(NO_PREFERENCE)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accepts `null`, a bare string or a list of strings
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

/// Stored preference document, one per username
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferenceRecord {
    pub username: String,
    pub preferences: StylePreferences,
    pub updated_at: DateTime<Utc>,
}

impl PreferenceRecord {
    pub fn new(username: impl Into<String>, preferences: StylePreferences) -> Self {
        Self {
            username: username.into(),
            preferences,
            updated_at: Utc::now(),
        }
    }
}
