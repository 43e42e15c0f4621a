use serde::{Deserialize, Serialize};

use super::view::DiagnosticsSource;
use crate::core::PropertyBag;

/// Detached, read-only snapshot of a diagnostics source.
///
/// Owns copies of everything it carries, so a consumer holding a summary can
/// never reach back into the live record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsSourceSummary {
    pub connection_string: Option<String>,
    pub index_name: Option<String>,
    pub partition_key: String,
    pub row_key: String,
    pub type_name: String,
    pub dynamic_properties: PropertyBag,
}

impl DiagnosticsSource<'_> {
    pub fn to_summary(&self) -> DiagnosticsSourceSummary {
        DiagnosticsSourceSummary {
            connection_string: self.connection_string(),
            index_name: self.index_name(),
            partition_key: self.partition_key().to_string(),
            row_key: self.row_key().to_string(),
            type_name: self.to_type_key(),
            dynamic_properties: self.properties().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DynamicEntity, PropertyValue};
    use crate::source::fields;

    #[test]
    fn test_summary_carries_promoted_and_raw_fields() {
        let mut e = DynamicEntity::new("shard", "0")
            .with(fields::CONNECTION_STRING, "AccountName=logs")
            .with(fields::INDEX_NAME, "fixed")
            .with("Custom", 9);
        let source = DiagnosticsSource::new(&mut e);

        let summary = source.to_summary();
        assert_eq!(summary.connection_string.as_deref(), Some("AccountName=logs"));
        assert_eq!(summary.index_name.as_deref(), Some("fixed"));
        assert_eq!(summary.partition_key, "shard");
        assert_eq!(summary.row_key, "0");
        assert_eq!(summary.type_name, "shard_0");
        assert_eq!(
            summary.dynamic_properties.keys().collect::<Vec<_>>(),
            vec![fields::CONNECTION_STRING, fields::INDEX_NAME, "Custom"]
        );
    }

    #[test]
    fn test_summary_is_detached() {
        let mut e = DynamicEntity::new("shard", "0").with("Custom", 9);
        let mut summary = DiagnosticsSource::new(&mut e).to_summary();

        summary.dynamic_properties.insert("Custom", 10);
        summary.dynamic_properties.insert("Injected", true);
        summary.partition_key = "other".into();

        assert_eq!(e.properties.get("Custom"), Some(&PropertyValue::Int32(9)));
        assert!(!e.properties.contains_key("Injected"));
        assert_eq!(e.partition_key, "shard");
    }
}
