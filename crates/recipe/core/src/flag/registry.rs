//! Name and alias lookup for flag kinds.

use std::collections::HashMap;

use super::{Flag, FlagBits, FlagKind};
use crate::config::EngineConfig;
use crate::error::FlagError;

/// Immutable name → kind table.
///
/// Built once by the host at startup and shared by every parser afterwards.
#[derive(Clone, Debug)]
pub struct FlagRegistry {
    by_name: HashMap<&'static str, FlagKind>,
}

/// A `@flag` line split into its kind and argument text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlagDeclaration<'l> {
    pub kind: FlagKind,
    pub value: Option<&'l str>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        let mut by_name = HashMap::new();
        for kind in FlagKind::all() {
            by_name.insert(kind.name(), kind);
            for alias in kind.aliases() {
                by_name.insert(*alias, kind);
            }
        }
        Self { by_name }
    }

    /// Case-insensitive lookup by canonical name or alias. A leading `@` is ignored.
    pub fn resolve(&self, token: &str) -> Option<FlagKind> {
        let token = token.trim();
        let token = token.strip_prefix('@').unwrap_or(token);
        self.by_name.get(token.to_ascii_lowercase().as_str()).copied()
    }

    pub fn bits(&self, kind: FlagKind) -> FlagBits {
        kind.bits()
    }

    pub fn create(&self, kind: FlagKind) -> Flag {
        Flag::new(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = FlagKind> {
        FlagKind::all()
    }

    /// Every permission node that bypasses flag checks: the wildcard first,
    /// then one node per name and alias.
    pub fn bypass_permissions(&self, config: &EngineConfig) -> Vec<String> {
        let Some(wildcard) = config.bypass_all_node() else {
            return Vec::new();
        };
        let mut nodes = vec![wildcard];
        for kind in self.kinds() {
            let names = std::iter::once(kind.name()).chain(kind.aliases().iter().copied());
            nodes.extend(names.filter_map(|name| config.bypass_node(name)));
        }
        nodes
    }

    /// Splits `@name[ text]` and resolves the name.
    pub fn parse_declaration<'l>(&self, line: &'l str) -> Result<FlagDeclaration<'l>, FlagError> {
        let line = line.trim();
        let Some(body) = line.strip_prefix('@') else {
            return Err(FlagError::NotAFlag(line.to_string()));
        };

        let (token, value) = match body.split_once(char::is_whitespace) {
            Some((token, rest)) => (token, Some(rest.trim()).filter(|v| !v.is_empty())),
            None => (body, None),
        };
        let kind = self
            .resolve(token)
            .ok_or_else(|| FlagError::UnknownFlag(token.to_ascii_lowercase()))?;

        Ok(FlagDeclaration { kind, value })
    }
}

impl Default for FlagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_and_aliases_case_insensitively() {
        let registry = FlagRegistry::new();
        assert_eq!(registry.resolve("explode"), Some(FlagKind::Explode));
        assert_eq!(registry.resolve("@PERM"), Some(FlagKind::Permission));
        assert_eq!(registry.resolve("NeedXP"), Some(FlagKind::ReqExp));
        assert_eq!(registry.resolve("bogus"), None);
    }

    #[test]
    fn names_and_aliases_are_unique() {
        let registry = FlagRegistry::new();
        let total: usize = FlagKind::all().map(|k| 1 + k.aliases().len()).sum();
        assert_eq!(registry.by_name.len(), total);
    }

    #[test]
    fn parses_declaration_lines() {
        let registry = FlagRegistry::new();
        assert_eq!(
            registry.parse_declaration("  @Explode  nobreak | fire  "),
            Ok(FlagDeclaration {
                kind: FlagKind::Explode,
                value: Some("nobreak | fire"),
            })
        );
        assert_eq!(
            registry.parse_declaration("@secret"),
            Ok(FlagDeclaration {
                kind: FlagKind::Secret,
                value: None,
            })
        );
        assert_eq!(
            registry.parse_declaration("@nope 1"),
            Err(FlagError::UnknownFlag("nope".to_string()))
        );
        assert!(matches!(
            registry.parse_declaration("craft"),
            Err(FlagError::NotAFlag(_))
        ));
    }

    #[test]
    fn bypass_permissions_cover_aliases() {
        let registry = FlagRegistry::new();
        let nodes = registry.bypass_permissions(&EngineConfig::default());
        assert_eq!(nodes[0], "recipes.noflag.*");
        assert!(nodes.contains(&"recipes.noflag.explode".to_string()));
        assert!(nodes.contains(&"recipes.noflag.perm".to_string()));

        let config = EngineConfig {
            bypass_permission_prefix: None,
            ..EngineConfig::default()
        };
        assert!(registry.bypass_permissions(&config).is_empty());
    }
}
