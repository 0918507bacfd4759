//! Engine configuration loader.

use std::path::Path;

use delve_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
///
/// Every section is optional; omitted values fall back to the engine
/// defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load an [`EngineConfig`] from a TOML file.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        let config: EngineConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[weights]
battle = 70.0
treasure = 10.0
rest = 15.0
trap = 5.0

[battle]
turn_limit = 50
"#
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.weights.battle, 70.0);
        assert_eq!(config.battle.turn_limit, 50);
        // untouched sections keep their defaults
        assert_eq!(config.progress.battle_gain, 20);
        assert_eq!(config.battle.default_drop_table, "default");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "weights = not valid").unwrap();
        assert!(ConfigLoader::load(file.path()).is_err());
    }
}
