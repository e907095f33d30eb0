//! Message template overrides from TOML.
//!
//! Nested tables flatten into dotted ids, so
//!
//! ```toml
//! [flag.explode]
//! effect = "<red>BOOM!"
//! ```
//!
//! overrides `flag.explode.effect`.

use std::path::Path;

use recipe_core::MessageCatalog;

use crate::loaders::{LoadResult, read_file};

pub struct MessagesLoader;

impl MessagesLoader {
    /// Default catalog with the file's templates laid over it.
    pub fn load(path: &Path) -> LoadResult<MessageCatalog> {
        let mut catalog = MessageCatalog::default();
        Self::load_into(path, &mut catalog)?;
        Ok(catalog)
    }

    /// Lays the file's templates over `catalog`. Returns how many were set.
    pub fn load_into(path: &Path, catalog: &mut MessageCatalog) -> LoadResult<usize> {
        let content = read_file(path)?;
        let overrides = Self::parse(&content)?;
        let count = overrides.len();
        catalog.extend(overrides);
        Ok(count)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(String, String)>> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse messages TOML: {}", e))?;
        let mut overrides = Vec::new();
        flatten(String::new(), &table, &mut overrides)?;
        Ok(overrides)
    }
}

fn flatten(prefix: String, table: &toml::Table, out: &mut Vec<(String, String)>) -> LoadResult<()> {
    for (key, value) in table {
        let id = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::String(template) => out.push((id, template.clone())),
            toml::Value::Table(nested) => flatten(id, nested, out)?,
            other => {
                return Err(anyhow::anyhow!(
                    "Message '{}' must be a string, got {}",
                    id,
                    other.type_str()
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_tables_become_dotted_ids() {
        let mut overrides = MessagesLoader::parse(
            r#"
            "flag.noperm" = "<red>Nope."

            [flag.explode]
            effect = "BOOM"
            "#,
        )
        .unwrap();
        overrides.sort();
        assert_eq!(
            overrides,
            vec![
                ("flag.explode.effect".to_string(), "BOOM".to_string()),
                ("flag.noperm".to_string(), "<red>Nope.".to_string()),
            ]
        );
    }

    #[test]
    fn non_string_values_are_rejected() {
        let err = MessagesLoader::parse("[flag]\nexplode = 3\n").unwrap_err();
        assert!(err.to_string().contains("flag.explode"));
    }
}
