//! Message templates shown to crafters.
//!
//! Flags refer to messages by id. A flag configured with a custom message uses
//! that text instead; a custom message of `false` hides the message.

use std::collections::HashMap;

/// Built-in templates, keyed by message id.
const DEFAULTS: &[(&str, &str)] = &[
    (
        "flag.permission",
        "You need the {permission} permission to craft this.",
    ),
    ("flag.reqexp", "You need {exp} experience to craft this."),
    ("flag.modexp", "Your experience changed by {amount}."),
    ("flag.inventory", "This recipe needs a {inventory} inventory."),
    ("flag.restrict", "This recipe is disabled."),
    ("flag.needs.location", "{flag} needs a location!"),
    ("flag.needs.result", "{flag} needs a result!"),
    ("flag.needs.crafter", "{flag} needs a crafter!"),
    ("flag.needs.world", "{flag} can not reach the world!"),
];

/// Keyword that hides a message when used as a custom override.
pub const HIDDEN: &str = "false";

/// Message id → template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Catalog without any templates; unknown ids render as the id itself.
    pub fn blank() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    pub fn get<'a>(&'a self, id: &'a str) -> &'a str {
        self.templates.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn set(&mut self, id: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(id.into(), template.into());
    }

    /// Overlays templates, replacing existing ids.
    pub fn extend<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (id, template) in overrides {
            self.set(id, template);
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Picks the custom text or the template for `id` and substitutes `vars`.
    ///
    /// Returns `None` when the custom text hides the message.
    pub fn render(&self, id: &str, custom: Option<&str>, vars: &[(&str, &str)]) -> Option<String> {
        let template = match custom {
            Some(text) if is_hidden(text) => return None,
            Some(text) => text,
            None => self.get(id),
        };
        Some(substitute(template, vars))
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let mut catalog = Self::blank();
        catalog.extend(DEFAULTS.iter().copied());
        catalog
    }
}

pub fn is_hidden(custom: &str) -> bool {
    custom.trim().eq_ignore_ascii_case(HIDDEN)
}

/// Single left-to-right pass; substituted values are never scanned again.
pub(crate) fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while !rest.is_empty() {
        if let Some((name, value)) = vars
            .iter()
            .find(|(name, _)| !name.is_empty() && rest.starts_with(name))
        {
            out.push_str(value);
            rest = &rest[name.len()..];
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}
