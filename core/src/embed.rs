//! Rich message embeds built from backend payloads.

use chrono::{DateTime, SecondsFormat};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::response::RawResponse;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "color", skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    /// RFC 3339; epoch milliseconds are converted on the way in.
    #[serde(default, deserialize_with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a backend result. `Empty` yields a blank embed; anything that is
    /// not an embed-shaped object is rejected.
    pub fn from_raw(raw: RawResponse, endpoint: impl ToString) -> Result<Self, ApiError> {
        Ok(raw.decode(endpoint)?.unwrap_or_default())
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url: None,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmbedMedia {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmbedField {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// Deserialize an `embed` field, treating `null` like a missing field.
pub(crate) fn embed_or_blank<'de, D>(deserializer: D) -> Result<Embed, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Embed>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Rgb(u32),
    Hex(String),
    Channels([u8; 3]),
}

/// Accepts `16711680`, `"#FF0000"`, `"FF0000"` or `[255, 0, 0]`.
fn color<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let rgb = match Option::<ColorRepr>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(ColorRepr::Rgb(rgb)) => rgb,
        Some(ColorRepr::Hex(hex)) => {
            let digits = hex.trim().trim_start_matches('#');
            u32::from_str_radix(digits, 16).map_err(|_| D::Error::custom(format!("invalid color {hex:?}")))?
        }
        Some(ColorRepr::Channels([r, g, b])) => u32::from_be_bytes([0, r, g, b]),
    };
    if rgb > 0xFF_FFFF {
        return Err(D::Error::custom(format!("color {rgb:#x} is out of range")));
    }
    Ok(Some(rgb))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Millis(i64),
    Text(String),
}

fn timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<TimestampRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(TimestampRepr::Text(text)) => Ok(Some(text)),
        Some(TimestampRepr::Millis(ms)) => DateTime::from_timestamp_millis(ms)
            .map(|dt| Some(dt.to_rfc3339_opts(SecondsFormat::Millis, true)))
            .ok_or_else(|| D::Error::custom(format!("timestamp {ms} is out of range"))),
    }
}

/// Field text: numbers and booleans are rendered, arrays are joined by lines.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    fn render(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Array(lines) => lines.into_iter().map(render).collect::<Vec<_>>().join("\n"),
            other => other.to_string(),
        }
    }
    Ok(render(Value::deserialize(deserializer)?))
}
