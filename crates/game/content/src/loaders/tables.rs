//! Drop table catalog loader.

use std::path::Path;

use delve_core::{DropTable, DropTableRegistry};

use crate::loaders::{LoadResult, read_file};

#[derive(serde::Deserialize)]
struct DropCatalog {
    tables: Vec<DropTable>,
}

/// Loader for drop tables from TOML files.
///
/// TOML format: an array of `[[tables]]` entries, each with nested
/// `[[tables.drops]]` lines. Tables with no usable weight are rejected at
/// load time.
pub struct DropTableLoader;

impl DropTableLoader {
    /// Load and validate a [`DropTableRegistry`] from a TOML file.
    pub fn load(path: &Path) -> LoadResult<DropTableRegistry> {
        let content = read_file(path)?;
        let catalog: DropCatalog = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse drop table TOML: {}", e))?;

        DropTableRegistry::new(catalog.tables)
            .map_err(|e| anyhow::anyhow!("Invalid drop tables {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_weighted_tables() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[tables]]
table_id = "default"

[[tables.drops]]
item_code = "potion"
weight = 5.0
min_quantity = 1
max_quantity = 2

[[tables.drops]]
item_code = "gem"
weight = 1.0
min_quantity = 1
max_quantity = 1
"#
        )
        .unwrap();

        let registry = DropTableLoader::load(file.path()).unwrap();
        let table = registry.get("default").unwrap();
        assert_eq!(table.drops.len(), 2);
    }

    #[test]
    fn zero_weight_tables_are_rejected_at_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[tables]]
table_id = "broken"

[[tables.drops]]
item_code = "dust"
weight = 0.0
min_quantity = 1
max_quantity = 1
"#
        )
        .unwrap();

        assert!(DropTableLoader::load(file.path()).is_err());
    }
}
