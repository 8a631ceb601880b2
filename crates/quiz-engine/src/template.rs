//! `{{field}}` sentence templates.
//!
//! Placeholders are `{{` + word characters + `}}`. A placeholder with no value
//! is left in the output verbatim and reported back to the caller.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{(\w+)\}\}").unwrap_or_else(|err| unreachable!("placeholder pattern: {err}"))
    })
}

/// Result of filling one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Placeholder names with no value, in order of first appearance.
    pub missing: Vec<String>,
}

/// Fill every `{{field}}` in `template` from `fields`.
#[must_use]
pub fn render(template: &str, fields: &IndexMap<String, String>) -> Rendered {
    let mut missing: Vec<String> = Vec::new();
    let text = placeholder()
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            fields.get(key).cloned().unwrap_or_else(|| {
                if !missing.iter().any(|name| name == key) {
                    missing.push(key.to_string());
                }
                caps[0].to_string()
            })
        })
        .into_owned();
    Rendered { text, missing }
}
