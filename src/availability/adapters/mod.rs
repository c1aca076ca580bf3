//! Adapter implementations for availability storage.

pub mod memory;
