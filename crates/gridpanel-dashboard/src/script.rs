//! Client-side script bridge.
//!
//! Pages that drive client-side widgets embed a JSON object in a
//! `<script>` element, assigned to `window.Panel`. Values are serialized
//! with serde and escaped so the JSON can never close the script element.

use serde::Serialize;
use serde_json::{Map, Value};

/// Key/value data handed to the page's scripts.
#[derive(Debug, Default, Clone)]
pub struct ScriptContext {
    values: Map<String, Value>,
}

impl ScriptContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under `key`, replacing any previous value.
    pub fn put<T: Serialize>(mut self, key: &str, value: &T) -> Result<Self, serde_json::Error> {
        self.values.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// JSON safe to paste between `<script>` tags.
    pub fn to_script_json(&self) -> String {
        let json = Value::Object(self.values.clone()).to_string();
        escape_for_script(&json)
    }
}

/// Escape the characters that let JSON break out of an HTML script element.
///
/// They can only occur inside JSON strings, where `\uXXXX` is equivalent.
fn escape_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_collects_values() {
        let ctx = ScriptContext::new()
            .put("canTransfer", &true)
            .unwrap()
            .put("nodes", &vec![1, 2])
            .unwrap();
        let parsed: Value = serde_json::from_str(&ctx.to_script_json()).unwrap();
        assert_eq!(parsed["canTransfer"], true);
        assert_eq!(parsed["nodes"][1], 2);
    }

    #[test]
    fn script_terminator_is_escaped() {
        let ctx = ScriptContext::new()
            .put("name", &"</script><script>alert(1)</script>")
            .unwrap();
        let json = ctx.to_script_json();
        assert!(!json.contains("</script>"));
        assert!(!json.contains('<'));

        // Still the same value once parsed.
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["name"], "</script><script>alert(1)</script>");
    }

    #[test]
    fn empty_context_is_empty_object() {
        assert_eq!(ScriptContext::new().to_script_json(), "{}");
    }
}
