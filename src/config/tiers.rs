//! Tier table configuration
//!
//! The tier table ships with the binary (`default_tiers.yaml`) and can be
//! replaced by a file on disk. Either way it is validated into a
//! `TierRegistry` once, at startup.

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ConfigError;
use crate::domain::membership::{TierRegistry, TierTable};

const BUILTIN_TIER_TABLE: &str = include_str!("default_tiers.yaml");

/// Tier table configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TierConfig {
    /// Path to a YAML tier table. The built-in table is used when unset.
    pub table_path: Option<PathBuf>,
}

impl TierConfig {
    /// Read and parse the configured tier table.
    ///
    /// # Errors
    ///
    /// - `TierTableRead` if the file cannot be read
    /// - `TierTableParse` if the document is not a valid tier table
    pub fn load_table(&self) -> Result<TierTable, ConfigError> {
        match &self.table_path {
            Some(path) => {
                let source =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::TierTableRead {
                        path: path.clone(),
                        source,
                    })?;
                Ok(TierTable::from_yaml(&source)?)
            }
            None => builtin_tier_table(),
        }
    }

    /// Load the tier table and build the registry from it.
    ///
    /// The process must not start if this fails.
    pub fn load_registry(&self) -> Result<TierRegistry, ConfigError> {
        let table = self.load_table()?;
        Ok(TierRegistry::from_table(table)?)
    }
}

/// The tier table compiled into the binary.
pub fn builtin_tier_table() -> Result<TierTable, ConfigError> {
    Ok(TierTable::from_yaml(BUILTIN_TIER_TABLE)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::{Permission, RegistryError, TierId};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_table(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn builtin_table_builds_a_registry() {
        let registry = TierConfig::default().load_registry().unwrap();

        assert_eq!(registry.tiers().len(), 6);
        assert_eq!(registry.default_tier().id, TierId::Free);
        assert!(registry.get(TierId::Founders).unwrap().is_hidden);
        assert_eq!(registry.visible_tiers().count(), 5);
    }

    #[test]
    fn builtin_table_lowest_tiers() {
        let registry = TierConfig::default().load_registry().unwrap();

        let lowest = |p| registry.lowest_tier_granting(p).map(|t| t.id);
        assert_eq!(lowest(Permission::CanAccessAffiliateTools), Some(TierId::Premium));
        assert_eq!(lowest(Permission::CanCreateSignals), Some(TierId::Vip));
        assert_eq!(lowest(Permission::CanCreateCtas), Some(TierId::Pro));
        assert_eq!(lowest(Permission::CanDuplicateCourses), Some(TierId::Lifetime));
    }

    #[test]
    fn loads_table_from_file() {
        let file = write_table(
            r#"
tiers:
  - id: free
    order: 10
    isDefault: true
    permissions:
      can_access_affiliate_tools: false
      can_create_signals: false
      can_access_ai_advisor: false
      can_create_ctas: false
      can_use_custom_domains: false
      can_duplicate_courses: false
  - id: pro
    order: 20
    permissions:
      canAccessAffiliateTools: true
      canCreateSignals: true
      canAccessAIAdvisor: true
      canCreateCTAs: true
      canUseCustomDomains: true
      canDuplicateCourses: true
"#,
        );
        let config = TierConfig {
            table_path: Some(file.path().to_path_buf()),
        };

        let registry = config.load_registry().unwrap();
        assert_eq!(registry.tiers().len(), 2);
        assert!(registry.has_permission(Some("pro"), Permission::CanCreateCtas, false));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let config = TierConfig {
            table_path: Some(PathBuf::from("/nonexistent/tiers.yaml")),
        };
        assert!(matches!(
            config.load_registry(),
            Err(ConfigError::TierTableRead { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let file = write_table("tiers: [ { id: free, order: not-a-number } ]");
        let config = TierConfig {
            table_path: Some(file.path().to_path_buf()),
        };
        assert!(matches!(
            config.load_registry(),
            Err(ConfigError::TierTableParse(_))
        ));
    }

    #[test]
    fn incomplete_permission_map_is_a_registry_error() {
        let file = write_table(
            r#"
tiers:
  - id: free
    order: 1
    is_default: true
    permissions:
      can_create_signals: false
"#,
        );
        let config = TierConfig {
            table_path: Some(file.path().to_path_buf()),
        };
        assert!(matches!(
            config.load_registry(),
            Err(ConfigError::Registry(RegistryError::MissingPermission { .. }))
        ));
    }
}
