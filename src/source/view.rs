use chrono::{DateTime, FixedOffset};
use tracing::error;

use super::fields;
use super::offset::parse_offset_point;
use crate::core::{
    DynamicEntity, EntityKey, FromProperty, PropertyBag, PropertyValue, Result, SourceError,
};

/// Typed view over one diagnostics source record.
///
/// The view borrows the record exclusively for one logical operation. Every
/// setter writes straight through to the record's property bag; persisting
/// the change is the store's job.
///
/// # Examples
///
/// ```
/// use diagsource::{DiagnosticsSource, DynamicEntity};
///
/// let mut entity = DynamicEntity::new("iis", "web01")
///     .with("ConnectionString", "UseDevelopmentStorage=true");
/// let source = DiagnosticsSource::new(&mut entity);
///
/// assert_eq!(source.to_type_key(), "iis_web01");
/// assert_eq!(source.grace_period_minutes(), Some(5));
/// ```
#[derive(Debug)]
pub struct DiagnosticsSource<'a> {
    entity: &'a mut DynamicEntity,
}

impl<'a> DiagnosticsSource<'a> {
    pub fn new(entity: &'a mut DynamicEntity) -> Self {
        Self { entity }
    }

    pub(crate) fn properties(&self) -> &PropertyBag {
        &self.entity.properties
    }

    fn string(&self, name: &str) -> Option<String> {
        self.entity.properties.get_string_value(name, None)
    }

    // ========================================
    // Read-only fields
    // ========================================

    pub fn scheduler_type(&self) -> Option<String> {
        self.string(fields::SCHEDULER_TYPE)
    }

    pub fn connection_string(&self) -> Option<String> {
        self.string(fields::CONNECTION_STRING)
    }

    /// Opaque pass-through settings for the collector; never interpreted here.
    pub fn custom_attributes(&self) -> Option<String> {
        self.string(fields::CUSTOM_ATTRIBUTES)
    }

    /// Upper bound cursor past which collection stops.
    pub fn stop_offset_point(&self) -> Option<String> {
        self.string(fields::STOP_OFFSET_POINT)
    }

    /// Minutes after which a missing entry is considered done: anything that
    /// was going to show up has been copied to storage by then.
    pub fn grace_period_minutes(&self) -> Option<i32> {
        self.entity.properties.get_int_value(
            fields::GRACE_PERIOD_MINUTES,
            Some(fields::DEFAULT_GRACE_PERIOD_MINUTES),
        )
    }

    pub fn scheduling_frequency_minutes(&self) -> Option<i32> {
        self.entity.properties.get_int_value(
            fields::SCHEDULING_FREQUENCY_MINUTES,
            Some(fields::DEFAULT_SCHEDULING_FREQUENCY_MINUTES),
        )
    }

    pub fn max_items_in_a_schedule_run(&self) -> Option<i32> {
        self.entity
            .properties
            .get_int_value(fields::MAX_ITEMS_IN_A_SCHEDULE_RUN, None)
    }

    pub fn is_active(&self) -> Option<bool> {
        self.entity
            .properties
            .get_boolean_value(fields::IS_ACTIVE, Some(fields::DEFAULT_IS_ACTIVE))
    }

    /// Manual override: when set, it is the only index a run visits.
    pub fn index_name(&self) -> Option<String> {
        self.string(fields::INDEX_NAME)
    }

    pub fn alternate_type_name(&self) -> Option<String> {
        self.string(fields::ALTERNATE_TYPE_NAME)
    }

    // ========================================
    // Mutable fields
    // ========================================

    pub fn error_message(&self) -> Option<String> {
        self.string(fields::ERROR_MESSAGE)
    }

    pub fn set_error_message(&mut self, message: impl Into<String>) {
        let message: String = message.into();
        self.entity.properties.insert(fields::ERROR_MESSAGE, message);
    }

    pub fn clear_error_message(&mut self) {
        self.entity
            .properties
            .insert(fields::ERROR_MESSAGE, PropertyValue::Null);
    }

    pub fn last_scheduled(&self) -> Option<DateTime<FixedOffset>> {
        self.entity
            .properties
            .get_datetime_value(fields::LAST_SCHEDULED, None)
    }

    pub fn set_last_scheduled(&mut self, when: Option<DateTime<FixedOffset>>) {
        self.entity.properties.insert(fields::LAST_SCHEDULED, when);
    }

    /// Round-trip timestamp cursor into the collected source.
    pub fn last_offset_point(&self) -> Option<String> {
        self.string(fields::LAST_OFFSET_POINT)
    }

    pub fn set_last_offset_point(&mut self, offset: Option<String>) {
        self.entity
            .properties
            .insert(fields::LAST_OFFSET_POINT, offset);
    }

    /// Raw cursor text. Absent, null and empty all read as `None`; a cursor
    /// stored as any kind other than text is an [`SourceError::InvalidOffset`].
    pub(crate) fn stored_offset_point(&self) -> Result<Option<String>> {
        match self.entity.properties.get(fields::LAST_OFFSET_POINT) {
            None | Some(PropertyValue::Null) => Ok(None),
            Some(PropertyValue::Text(offset)) if offset.is_empty() => Ok(None),
            Some(PropertyValue::Text(offset)) => Ok(Some(offset.clone())),
            Some(other) => Err(SourceError::InvalidOffset {
                value: other.to_string(),
                reason: format!("stored as {}, expected Edm.String", other.type_name()),
            }),
        }
    }

    /// Parsed cursor; `None` when unset or empty.
    pub fn last_offset_time(&self) -> Result<Option<DateTime<FixedOffset>>> {
        match self.stored_offset_point()? {
            Some(offset) => parse_offset_point(&offset).map(Some),
            None => Ok(None),
        }
    }

    // ========================================
    // Identity
    // ========================================

    pub fn partition_key(&self) -> &str {
        &self.entity.partition_key
    }

    /// Relocates the record; takes effect on the next save.
    pub fn set_partition_key(&mut self, partition_key: impl Into<String>) {
        self.entity.partition_key = partition_key.into();
    }

    pub fn row_key(&self) -> &str {
        &self.entity.row_key
    }

    pub fn set_row_key(&mut self, row_key: impl Into<String>) {
        self.entity.row_key = row_key.into();
    }

    pub fn key(&self) -> EntityKey {
        self.entity.key()
    }

    /// Stable identity downstream consumers use to correlate runs with this
    /// source: `AlternateTypeName`, or `PartitionKey_RowKey`.
    pub fn to_type_key(&self) -> String {
        self.alternate_type_name()
            .unwrap_or_else(|| format!("{}_{}", self.entity.partition_key, self.entity.row_key))
    }

    pub fn entity(&self) -> &DynamicEntity {
        &*self.entity
    }

    pub fn entity_mut(&mut self) -> &mut DynamicEntity {
        &mut *self.entity
    }

    // ========================================
    // Dynamic properties
    // ========================================

    /// Reads an arbitrary property as `T`.
    ///
    /// Absent (or stored null) yields `Ok(None)`. A stored value that cannot
    /// be represented as `T` is logged and returned as
    /// [`SourceError::Conversion`]. Stored timestamps can be read as either
    /// `DateTime<Utc>` or `DateTime<FixedOffset>`.
    pub fn get_property<T: FromProperty>(&self, name: &str) -> Result<Option<T>> {
        let Some(value) = self.entity.properties.get(name) else {
            return Ok(None);
        };
        if value.is_null() {
            return Ok(None);
        }

        match T::from_property(value) {
            Some(converted) => Ok(Some(converted)),
            None => {
                error!(
                    property = name,
                    target_type = T::TYPE_NAME,
                    stored = value.type_name(),
                    "Failed to convert {} to {}",
                    name,
                    T::TYPE_NAME
                );
                Err(SourceError::Conversion {
                    property: name.to_string(),
                    target: T::TYPE_NAME,
                    actual: value.type_name(),
                })
            }
        }
    }

    /// Stores `value` under `name`, overwriting whatever was there.
    pub fn set_property<T: Into<PropertyValue>>(&mut self, name: &str, value: T) {
        self.entity.properties.insert(name, value);
    }

    /// `MappingName`, falling back to the older `TableName`.
    pub fn get_mapping_name(&self) -> Result<Option<String>> {
        match self.get_property::<String>(fields::MAPPING_NAME)? {
            Some(name) => Ok(Some(name)),
            None => self.get_property::<String>(fields::TABLE_NAME),
        }
    }
}
