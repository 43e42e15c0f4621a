//! Property names promoted to typed fields, and their documented defaults.

pub const SCHEDULER_TYPE: &str = "SchedulerType";
pub const CONNECTION_STRING: &str = "ConnectionString";
pub const CUSTOM_ATTRIBUTES: &str = "CustomAttributes";
pub const ERROR_MESSAGE: &str = "ErrorMessage";
pub const LAST_SCHEDULED: &str = "LastScheduled";
pub const LAST_OFFSET_POINT: &str = "LastOffsetPoint";
pub const STOP_OFFSET_POINT: &str = "StopOffsetPoint";
pub const GRACE_PERIOD_MINUTES: &str = "GracePeriodMinutes";
pub const SCHEDULING_FREQUENCY_MINUTES: &str = "SchedulingFrequencyMinutes";
pub const MAX_ITEMS_IN_A_SCHEDULE_RUN: &str = "MaxItemsInAScheduleRun";
pub const IS_ACTIVE: &str = "IsActive";
pub const INDEX_NAME: &str = "IndexName";
pub const ALTERNATE_TYPE_NAME: &str = "AlternateTypeName";

// Historical rename: both may exist on older records.
pub const MAPPING_NAME: &str = "MappingName";
pub const TABLE_NAME: &str = "TableName";

pub const DEFAULT_GRACE_PERIOD_MINUTES: i32 = 5;
pub const DEFAULT_SCHEDULING_FREQUENCY_MINUTES: i32 = 1;
pub const DEFAULT_IS_ACTIVE: bool = true;
