//! Chat Components
//!
//! JSON text as sent in chat, titles, disconnect reasons and the server list.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::shared::error::DecodeError;

/// A JSON chat component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Component(Value);

impl Component {
    /// Plain text component
    pub fn text(text: impl Into<String>) -> Self {
        Self(json!({ "text": text.into() }))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json(raw: &str) -> Result<Self, DecodeError> {
        Ok(Self(serde_json::from_str(raw)?))
    }

    pub fn to_json(&self) -> String {
        self.0.to_string()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Flattened text content.
    ///
    /// Translatable components render as their key followed by their
    /// arguments, since no translation table is available.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        flatten(&self.0, &mut out);
        out
    }
}

fn flatten(value: &Value, out: &mut String) {
    match value {
        Value::String(text) => out.push_str(text),
        Value::Array(parts) => parts.iter().for_each(|part| flatten(part, out)),
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                out.push_str(text);
            }
            if let Some(Value::String(key)) = map.get("translate") {
                out.push_str(key);
                if let Some(Value::Array(args)) = map.get("with") {
                    for arg in args {
                        out.push(' ');
                        flatten(arg, out);
                    }
                }
            }
            if let Some(Value::Array(extra)) = map.get("extra") {
                extra.iter().for_each(|part| flatten(part, out));
            }
        }
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Null => {}
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_text())
    }
}

impl From<&str> for Component {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Component {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_component_json() {
        assert_eq!(Component::text("hi").to_json(), r#"{"text":"hi"}"#);
    }

    #[test]
    fn test_plain_text_flattens_extra() {
        let component = Component::from_json(
            r#"{"text":"Hello ","extra":[{"text":"world","bold":true},"!"]}"#,
        )
        .unwrap();
        assert_eq!(component.plain_text(), "Hello world!");
    }

    #[test]
    fn test_plain_text_translate() {
        let component = Component::from_json(
            r#"{"translate":"chat.type.text","with":[{"text":"Steve"},"hi"]}"#,
        )
        .unwrap();
        assert_eq!(component.to_string(), "chat.type.text Steve hi");
    }

    #[test]
    fn test_bare_string_component() {
        let component = Component::from_json(r#""just text""#).unwrap();
        assert_eq!(component.plain_text(), "just text");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Component::from_json("{not json"),
            Err(DecodeError::InvalidComponent(_))
        ));
    }
}
