//! Monster catalog loader.

use std::path::Path;

use delve_core::{MonsterRegistry, MonsterTemplate};

use crate::loaders::{LoadResult, read_file};

#[derive(serde::Deserialize)]
struct MonsterCatalog {
    monsters: Vec<MonsterTemplate>,
}

/// Loader for the monster catalog from TOML files.
///
/// TOML format: an array of `[[monsters]]` tables matching
/// [`MonsterTemplate`]. Registry validation (non-empty normal pool,
/// resolvable elite variants) runs as part of loading.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load and validate a [`MonsterRegistry`] from a TOML file.
    pub fn load(path: &Path) -> LoadResult<MonsterRegistry> {
        let content = read_file(path)?;
        let catalog: MonsterCatalog = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog TOML: {}", e))?;

        MonsterRegistry::new(catalog.monsters)
            .map_err(|e| anyhow::anyhow!("Invalid monster catalog {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG: &str = r#"
[[monsters]]
code = "slime"
name = "Slime"
hp = 30
atk = 8
def = 3

[[monsters]]
code = "slime_king"
name = "Slime King"
hp = 60
atk = 14
def = 6
rarity = "elite"
variant_of = "slime"
"#;

    #[test]
    fn loads_and_links_elite_variants() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{CATALOG}").unwrap();

        let registry = MonsterLoader::load(file.path()).unwrap();
        assert_eq!(registry.normal_pool(), ["slime".to_string()]);
        assert_eq!(
            registry.elite_variant_of("slime").map(|t| t.code.as_str()),
            Some("slime_king")
        );
    }

    #[test]
    fn catalog_without_normal_monsters_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[monsters]]
code = "boss"
name = "Boss"
hp = 100
atk = 20
def = 10
rarity = "elite"
"#
        )
        .unwrap();

        assert!(MonsterLoader::load(file.path()).is_err());
    }
}
