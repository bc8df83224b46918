use std::cell::RefCell;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate, YamlConfigSerializer};

/// Loads a config once and keeps it cached. Every config that is read from storage or
/// written to it goes through [`Validate`] first.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: RefCell<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + DeserializeOwned + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new())
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + DeserializeOwned + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(config_content_provider: TConfigContentProvider, config_serializer: TConfigSerializer) -> Self {
        Self {
            config_serializer,
            config_content_provider,
            config: RefCell::new(None),
        }
    }

    pub fn content_provider(&self) -> &TConfigContentProvider {
        &self.config_content_provider
    }

    /// Falls back to `TConfig::default()` when nothing is stored; the default is not
    /// cached, so a config saved later by another process is still picked up.
    pub fn get_config(&self) -> Result<TConfig, String> {
        if let Some(config) = self.config.borrow().as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *self.config.borrow_mut() = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized = self.config_serializer.serialize(config)?;
        self.config_content_provider.set_config_content(&serialized)?;

        *self.config.borrow_mut() = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        name: String,
        level: u32,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                name: "default".to_string(),
                level: 1,
            }
        }
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.level > 10 {
                return Err("level must not exceed 10".to_string());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryContentProvider {
        content: RefCell<Option<String>>,
        reads: Cell<usize>,
    }

    impl ConfigContentProvider for MemoryContentProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.content.borrow().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.borrow_mut() = Some(content.to_string());
            Ok(())
        }
    }

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_rolling_config_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_content_returns_default() {
        let manager: ConfigManager<_, TestConfig, _> =
            ConfigManager::new(MemoryContentProvider::default(), YamlConfigSerializer::new());
        assert_eq!(manager.get_config().unwrap(), TestConfig::default());
    }

    #[test]
    fn test_loaded_config_is_cached() {
        let provider = MemoryContentProvider::default();
        provider.set_config_content("name: cached\nlevel: 4\n").unwrap();
        let manager: ConfigManager<_, TestConfig, _> = ConfigManager::new(provider, YamlConfigSerializer::new());

        let first = manager.get_config().unwrap();
        let second = manager.get_config().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.level, 4);
        assert_eq!(manager.content_provider().reads.get(), 1);
    }

    #[test]
    fn test_invalid_stored_config_is_rejected() {
        let provider = MemoryContentProvider::default();
        provider.set_config_content("name: loud\nlevel: 11\n").unwrap();
        let manager: ConfigManager<_, TestConfig, _> = ConfigManager::new(provider, YamlConfigSerializer::new());

        let error = manager.get_config().unwrap_err();
        assert!(error.contains("Config validation error"));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let provider = MemoryContentProvider::default();
        provider.set_config_content("name: [unterminated").unwrap();
        let manager: ConfigManager<_, TestConfig, _> = ConfigManager::new(provider, YamlConfigSerializer::new());
        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_set_config_refuses_invalid_values() {
        let manager: ConfigManager<_, TestConfig, _> =
            ConfigManager::new(MemoryContentProvider::default(), YamlConfigSerializer::new());
        let invalid = TestConfig {
            name: "too high".to_string(),
            level: 99,
        };
        assert!(manager.set_config(&invalid).is_err());
        assert!(manager.content_provider().content.borrow().is_none());
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let file_path = get_temp_file_path();
        let config = TestConfig {
            name: "saved".to_string(),
            level: 7,
        };

        let writer: ConfigManager<_, TestConfig, _> = ConfigManager::from_yaml_file(file_path.clone());
        writer.set_config(&config).unwrap();

        let reader: ConfigManager<_, TestConfig, _> = ConfigManager::from_yaml_file(file_path.clone());
        assert_eq!(reader.get_config().unwrap(), config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let provider = FileContentConfigProvider::new("this_file_does_not_exist.yaml");
        assert_eq!(provider.get_config_content().unwrap(), None);
    }
}
