//! Storage adapters - implementations of the reader ports.

pub mod in_memory;

pub use in_memory::InMemoryDispatchStore;
