//! Presentation AST (de)serialization as JSON.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Presentation;

/// Output formatting for the JSON dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonFormat {
    /// Human-readable, indented
    #[default]
    Pretty,
    /// Single line, no extra whitespace
    Compact,
}

/// Serialize a presentation to JSON.
pub fn to_json(presentation: &Presentation, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(presentation)?,
        JsonFormat::Compact => serde_json::to_string(presentation)?,
    };
    Ok(json)
}

/// Deserialize a presentation from JSON.
pub fn from_json(text: &str) -> Result<Presentation> {
    Ok(serde_json::from_str(text)?)
}
