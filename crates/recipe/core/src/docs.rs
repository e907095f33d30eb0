//! Markdown reference of every flag kind.

use std::fmt::Write;

use crate::flag::{FlagBits, FlagKind, FlagRegistry};

/// Renders name, aliases, restrictions, usage, description and examples of
/// every kind, in declaration order.
pub fn render_flag_reference(registry: &FlagRegistry) -> String {
    let mut out = String::from("# Flags\n");
    for kind in registry.kinds() {
        render_kind(&mut out, kind);
    }
    out
}

fn render_kind(out: &mut String, kind: FlagKind) {
    let flag = kind.to_string();
    let docs = kind.docs();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "\n## {flag}\n");

    if !kind.aliases().is_empty() {
        let aliases: Vec<String> = kind.aliases().iter().map(|a| format!("`@{a}`")).collect();
        let _ = writeln!(out, "Aliases: {}\n", aliases.join(", "));
    }
    for note in restriction_notes(kind.bits()) {
        let _ = writeln!(out, "- {note}");
    }
    if !kind.bits().is_empty() {
        out.push('\n');
    }

    out.push_str("```\n");
    for line in docs.usage {
        let _ = writeln!(out, "{}", line.replace("{flag}", &flag));
    }
    out.push_str("```\n\n");

    for line in docs.description {
        let _ = writeln!(out, "{line}");
    }

    out.push_str("\nExamples:\n```\n");
    for line in docs.examples {
        let _ = writeln!(out, "{}", line.replace("{flag}", &flag));
    }
    out.push_str("```\n");
}

fn restriction_notes(bits: FlagBits) -> Vec<&'static str> {
    [
        (FlagBits::RECIPE_ONLY, "Only works on recipes."),
        (FlagBits::RESULT_ONLY, "Only works on results."),
        (FlagBits::NO_VALUE, "Takes no value."),
        (FlagBits::NO_STORE, "Not stored with persisted items."),
        (
            FlagBits::NO_FALSE_REMOVAL,
            "'false' is a literal value and does not remove the flag.",
        ),
    ]
    .into_iter()
    .filter(|(bit, _)| bits.contains(*bit))
    .map(|(_, note)| note)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_kind_in_order() {
        let reference = render_flag_reference(&FlagRegistry::new());
        let positions: Vec<usize> = FlagKind::all()
            .map(|kind| {
                reference
                    .find(&format!("## {kind}\n"))
                    .unwrap_or_else(|| panic!("{kind} missing"))
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn expands_flag_placeholder_and_notes() {
        let reference = render_flag_reference(&FlagRegistry::new());
        assert!(reference.contains("@explode nobreak | fire | power 6"));
        assert!(reference.contains("Aliases: `@itemlore`, `@itemdescription`"));
        assert!(reference.contains("'false' is a literal value"));
        assert!(!reference.contains("{flag}"));
    }
}
