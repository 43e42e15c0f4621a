pub mod memory;
pub mod store;

pub use memory::InMemorySourceStore;
pub use store::SourceStore;
