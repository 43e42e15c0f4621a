// ============================================================================
// diagsource: typed access to diagnostics source records
// ============================================================================

//! A diagnostics source is a schemaless record telling a log/metric
//! collection pipeline what to collect, where from, how often, and where it
//! last left off. This crate wraps such a record in a typed view and derives
//! the day-partitioned index names a run still has to visit.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use diagsource::{DiagnosticsSource, DynamicEntity};
//!
//! let mut entity = DynamicEntity::new("iis", "web01")
//!     .with("LastOffsetPoint", "2024-01-01T00:00:00.0000000+00:00");
//! let mut source = DiagnosticsSource::new(&mut entity);
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
//! let names = source.get_index_names_at(now, 7).unwrap();
//!
//! assert_eq!(names.len(), 11);
//! assert_eq!(names[0], "20240111");
//! assert_eq!(names[10], "20240101");
//! ```

pub mod config;
pub mod core;
pub mod source;
pub mod storage;

// Re-export main types for convenience
pub use config::SchedulingConfig;
pub use self::core::{
    DynamicEntity, EntityKey, FromProperty, PropertyBag, PropertyValue, Result, SourceError,
};
pub use source::{DiagnosticsSource, DiagnosticsSourceSummary, fields};
pub use storage::{InMemorySourceStore, SourceStore};
