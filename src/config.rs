//! unitgen project configuration
//!
//! Handles loading of `.unitgen.yaml` from the project directory and
//! merging it with command-line overrides.

use crate::class::{GenerationOptions, NodeType};
use crate::emit::Language;
use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration file name
pub const CONFIG_FILE: &str = ".unitgen.yaml";

/// Package used when neither the file nor the command line names one
pub const DEFAULT_PACKAGE: &str = "org.web3j.generated";

/// Runtime major version assumed when none is configured
pub const DEFAULT_RUNTIME_VERSION: u32 = 17;

/// Project configuration (`.unitgen.yaml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnitgenConfig {
    /// Schema version for migrations
    pub version: u32,

    /// Package of generated test classes
    #[serde(default = "default_package")]
    pub package: String,

    /// Existing directory generated sources are written below
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Language of generated test classes
    #[serde(default)]
    pub language: Language,

    /// Major version of the runtime the tests will run on
    #[serde(default = "default_runtime_version")]
    pub target_runtime_version: u32,

    /// Node type forced onto the runner annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,

    /// Directory with template overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

fn default_package() -> String {
    DEFAULT_PACKAGE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_runtime_version() -> u32 {
    DEFAULT_RUNTIME_VERSION
}

impl Default for UnitgenConfig {
    fn default() -> Self {
        Self {
            version: 1,
            package: default_package(),
            output_dir: default_output_dir(),
            language: Language::default(),
            target_runtime_version: default_runtime_version(),
            node_type: None,
            template_dir: None,
        }
    }
}

/// Values given on the command line; each one beats the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub package: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub language: Option<Language>,
    pub target_runtime_version: Option<u32>,
    pub node_type: Option<NodeType>,
    pub template_dir: Option<PathBuf>,
}

/// Final settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub package: String,
    pub output_dir: PathBuf,
    pub language: Language,
    pub target_runtime_version: u32,
    pub node_type: Option<NodeType>,
    pub template_dir: Option<PathBuf>,
}

impl UnitgenConfig {
    /// Parse and validate a configuration document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: UnitgenConfig = serde_norway::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;

        if config.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported {} version: {}",
                CONFIG_FILE, config.version
            )));
        }
        Ok(config)
    }

    /// Load `.unitgen.yaml` from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_file = dir.join(CONFIG_FILE);
        if !config_file.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_file).map_err(Error::Io)?;
        Self::from_yaml(&content).map(Some)
    }

    /// Apply command-line overrides
    pub fn merge(&self, overrides: &Overrides) -> MergedConfig {
        MergedConfig {
            package: overrides
                .package
                .clone()
                .unwrap_or_else(|| self.package.clone()),
            output_dir: overrides
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            language: overrides.language.unwrap_or(self.language),
            target_runtime_version: overrides
                .target_runtime_version
                .unwrap_or(self.target_runtime_version),
            node_type: overrides.node_type.or(self.node_type),
            template_dir: overrides
                .template_dir
                .clone()
                .or_else(|| self.template_dir.clone()),
        }
    }
}

impl MergedConfig {
    /// Options for the class assembler
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            package: self.package.clone(),
            output_dir: self.output_dir.clone(),
            target_runtime_version: self.target_runtime_version,
            node_type: self.node_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = UnitgenConfig::from_yaml("version: 1\n").unwrap();
        assert_eq!(config, UnitgenConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = UnitgenConfig::from_yaml(
            r#"
version: 1
package: org.example.contracts
output_dir: src/test/kotlin
language: kotlin
target_runtime_version: 8
node_type: open-ethereum
template_dir: templates
"#,
        )
        .unwrap();

        assert_eq!(config.package, "org.example.contracts");
        assert_eq!(config.language, Language::Kotlin);
        assert_eq!(config.target_runtime_version, 8);
        assert_eq!(config.node_type, Some(NodeType::OpenEthereum));
        assert_eq!(config.template_dir, Some(PathBuf::from("templates")));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            UnitgenConfig::from_yaml("version: 2\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            UnitgenConfig::from_yaml("version: 1\nlanguage: scala\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            UnitgenConfig::from_yaml("version: 1\nnode_type: ganache\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_merge_config() {
        let config = UnitgenConfig {
            package: "org.example".to_string(),
            node_type: Some(NodeType::Besu),
            ..Default::default()
        };
        let overrides = Overrides {
            language: Some(Language::Kotlin),
            target_runtime_version: Some(11),
            ..Default::default()
        };

        let merged = config.merge(&overrides);
        assert_eq!(merged.package, "org.example"); // Inherited from file
        assert_eq!(merged.language, Language::Kotlin);
        assert_eq!(merged.target_runtime_version, 11);
        assert_eq!(merged.node_type, Some(NodeType::Besu));

        let options = merged.generation_options();
        assert_eq!(options.package, "org.example");
        assert_eq!(options.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(UnitgenConfig::load_from_dir(dir.path()).unwrap(), None);

        std::fs::write(dir.path().join(CONFIG_FILE), "version: 1\npackage: a.b\n").unwrap();
        let config = UnitgenConfig::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.package, "a.b");
    }
}
