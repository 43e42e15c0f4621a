pub mod bag;
pub mod entity;
pub mod error;
pub mod value;

pub use bag::PropertyBag;
pub use entity::{DynamicEntity, EntityKey};
pub use error::{Result, SourceError};
pub use value::{FromProperty, PropertyValue};
