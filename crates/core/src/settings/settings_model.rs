use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_TAGS, DEFAULT_PIVOT_CURRENCY};
use crate::errors::{Error, Result};
use crate::hierarchy::{HierarchyType, TagImportanceScheme};
use crate::money::Currency;

/// Tunables shared by the analytics computations.
///
/// Missing keys fall back to their defaults, so `{}` is a valid document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsSettings {
    /// ISO code of the currency every exchange rate is quoted against.
    pub pivot_currency: String,
    /// Ranked siblings kept per hierarchy level before the rest fold into "other".
    pub max_tags: usize,
    pub importance_scheme: TagImportanceScheme,
    pub hierarchy_type: HierarchyType,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            pivot_currency: DEFAULT_PIVOT_CURRENCY.to_string(),
            max_tags: DEFAULT_MAX_TAGS,
            importance_scheme: TagImportanceScheme::default(),
            hierarchy_type: HierarchyType::default(),
        }
    }
}

impl AnalyticsSettings {
    /// Parses and validates a camelCase JSON settings document.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: AnalyticsSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_tags == 0 {
            return Err(Error::InvalidConfigValue(
                "maxTags must be at least 1".to_string(),
            ));
        }
        self.pivot_currency()?;
        Ok(())
    }

    pub fn pivot_currency(&self) -> Result<Currency> {
        Currency::parse(&self.pivot_currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::currency::{EUR, USD};

    #[test]
    fn test_empty_document_uses_defaults() {
        let settings = AnalyticsSettings::from_json("{}").unwrap();
        assert_eq!(settings, AnalyticsSettings::default());
        assert_eq!(settings.pivot_currency().unwrap(), USD);
        assert_eq!(settings.max_tags, 5);
        assert_eq!(settings.importance_scheme, TagImportanceScheme::RankByAmount);
        assert_eq!(settings.hierarchy_type, HierarchyType::Spending);
    }

    #[test]
    fn test_parses_camel_case_keys() {
        let settings = AnalyticsSettings::from_json(
            r#"{
                "pivotCurrency": "EUR",
                "maxTags": 3,
                "importanceScheme": "RANK_BY_COUNT",
                "hierarchyType": "EARNINGS"
            }"#,
        )
        .unwrap();
        assert_eq!(settings.pivot_currency().unwrap(), EUR);
        assert_eq!(settings.max_tags, 3);
        assert_eq!(settings.importance_scheme, TagImportanceScheme::RankByCount);
        assert_eq!(settings.hierarchy_type, HierarchyType::Earnings);
    }

    #[test]
    fn test_rejects_zero_max_tags() {
        let err = AnalyticsSettings::from_json(r#"{"maxTags": 0}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));
    }

    #[test]
    fn test_rejects_unknown_pivot() {
        let err = AnalyticsSettings::from_json(r#"{"pivotCurrency": "NOPE"}"#).unwrap_err();
        assert_eq!(err, Error::UnknownCurrencyCode("NOPE".to_string()));
    }

    #[test]
    fn test_malformed_json_is_a_config_error() {
        let err = AnalyticsSettings::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue(_)));
    }
}
