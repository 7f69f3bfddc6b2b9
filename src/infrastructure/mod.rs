//! Storage adapters for the domain and application ports.

pub mod in_memory;
