pub mod fields;
pub mod index_names;
pub mod offset;
pub mod summary;
pub mod view;

pub use offset::{format_round_trip, parse_offset_point};
pub use summary::DiagnosticsSourceSummary;
pub use view::DiagnosticsSource;
