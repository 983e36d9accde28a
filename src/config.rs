//! View configuration loading and validation

use crate::core::criteria::DateFilterMode;
use crate::core::error::{ViewError, ViewResult};
use serde::{Deserialize, Serialize};

/// Tunables for one record view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Records per page
    pub page_size: usize,

    /// Whether date-range filters compare calendar dates or full instants
    pub date_filter_mode: DateFilterMode,

    /// Reference slot used for the by-reference statistics distribution
    pub reference_slot: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            page_size: 20,
            date_filter_mode: DateFilterMode::DateOnly,
            reference_slot: "staff".to_string(),
        }
    }
}

impl ViewConfig {
    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> ViewResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> ViewResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> ViewResult<()> {
        if self.page_size == 0 {
            return Err(ViewError::Config("page_size must be at least 1".to_string()));
        }
        if self.reference_slot.is_empty() {
            return Err(ViewError::Config("reference_slot must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.date_filter_mode, DateFilterMode::DateOnly);
        assert_eq!(config.reference_slot, "staff");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_str() {
        let config = ViewConfig::from_yaml_str(
            "page_size: 10\ndate_filter_mode: exact\nreference_slot: category\n",
        )
        .expect("valid yaml should parse");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.date_filter_mode, DateFilterMode::Exact);
        assert_eq!(config.reference_slot, "category");
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let config = ViewConfig::from_yaml_str("page_size: 5\n").unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.date_filter_mode, DateFilterMode::DateOnly);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = ViewConfig::from_yaml_str("page_size: 0\n").unwrap_err();
        assert!(matches!(err, ViewError::Config(_)));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let err = ViewConfig::from_yaml_str("page_size: many\n").unwrap_err();
        assert!(matches!(err, ViewError::Config(_)));
    }
}
